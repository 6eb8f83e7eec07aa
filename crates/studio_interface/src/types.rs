//! Types shared across the trait seams.

use crate::Connectivity;
use serde::{Deserialize, Serialize};
use studio_core::ResourceLocator;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Handle naming an in-flight long-running job on the remote service.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct OperationHandle(String);

impl OperationHandle {
    /// Borrow the operation name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

/// Status reported by one poll of a long-running job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationState {
    /// Still running
    Pending,
    /// Finished successfully; the locator is absent when the job produced no output
    Succeeded(Option<ResourceLocator>),
    /// Finished with an error message from the service
    Failed(String),
}

impl OperationState {
    /// Whether the job has reached a terminal state.
    pub fn is_done(&self) -> bool {
        !matches!(self, OperationState::Pending)
    }
}

/// Shared boolean "is online" flag fed by the host environment.
///
/// Clones share the same flag, so the host can flip it while the core holds
/// a copy.
///
/// # Examples
///
/// ```
/// use studio_interface::{Connectivity, OnlineSignal};
///
/// let signal = OnlineSignal::new(true);
/// let observer = signal.clone();
/// signal.set_online(false);
/// assert!(!observer.is_online());
/// ```
#[derive(Debug, Clone)]
pub struct OnlineSignal(Arc<AtomicBool>);

impl OnlineSignal {
    /// Create a signal with the given initial state.
    pub fn new(online: bool) -> Self {
        Self(Arc::new(AtomicBool::new(online)))
    }

    /// Update the state (host `online`/`offline` events).
    pub fn set_online(&self, online: bool) {
        self.0.store(online, Ordering::SeqCst);
    }
}

impl Default for OnlineSignal {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Connectivity for OnlineSignal {
    fn is_online(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
