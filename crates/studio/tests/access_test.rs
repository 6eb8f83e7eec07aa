//! Tests for the credential gate.

mod test_utils;

use studio::{AccessGate, AccessState, EnvAccessProvider};
use studio_interface::AccessProvider;
use test_utils::MockAccessProvider;

#[tokio::test]
async fn test_gate_starts_checking() {
    let gate = AccessGate::new(MockAccessProvider::granted());
    assert_eq!(gate.state().await, AccessState::Checking);
    assert!(!gate.state().await.is_granted());
}

#[tokio::test]
async fn test_verify_records_provider_answer() {
    let gate = AccessGate::new(MockAccessProvider::answering(vec![Some(true), Some(false)]));

    assert_eq!(gate.verify().await, AccessState::Granted);
    assert_eq!(gate.verify().await, AccessState::Denied);
}

#[tokio::test]
async fn test_check_error_denies_when_not_yet_granted() {
    let gate = AccessGate::new(MockAccessProvider::answering(vec![None]));

    assert_eq!(gate.verify().await, AccessState::Denied);
}

#[tokio::test]
async fn test_check_error_keeps_existing_grant() {
    let gate = AccessGate::new(MockAccessProvider::answering(vec![Some(true), None]));
    gate.verify().await;

    assert_eq!(gate.verify().await, AccessState::Granted);
}

#[tokio::test]
async fn test_select_assumes_then_confirms() -> anyhow::Result<()> {
    let provider = MockAccessProvider::answering(vec![Some(false), Some(true)]);
    let gate = AccessGate::new(provider);
    assert_eq!(gate.verify().await, AccessState::Denied);

    assert_eq!(gate.select().await?, AccessState::Granted);
    Ok(())
}

#[tokio::test]
async fn test_select_reverts_when_recheck_fails() -> anyhow::Result<()> {
    let provider = MockAccessProvider::answering(vec![Some(false)]);
    let gate = AccessGate::new(provider);
    gate.verify().await;

    assert_eq!(gate.select().await?, AccessState::Denied);
    Ok(())
}

#[tokio::test]
async fn test_select_failure_leaves_state_and_skips_check() {
    let provider = MockAccessProvider::answering(vec![Some(false)]).failing_selection();
    let gate = AccessGate::new(provider);
    gate.verify().await;

    assert!(gate.select().await.is_err());
    assert_eq!(gate.state().await, AccessState::Denied);
}

#[tokio::test]
async fn test_select_runs_one_selection_and_one_recheck() -> anyhow::Result<()> {
    let provider = std::sync::Arc::new(MockAccessProvider::answering(vec![Some(true)]));
    let gate = AccessGate::new(provider.clone());

    gate.select().await?;

    assert_eq!(provider.selection_count(), 1);
    assert_eq!(provider.check_count(), 1);
    Ok(())
}

#[tokio::test]
async fn test_env_provider_reads_variable() -> anyhow::Result<()> {
    // SAFETY: each test in this file uses its own variable name.
    unsafe {
        std::env::set_var("STUDIO_TEST_KEY_PRESENT", "abc123");
        std::env::set_var("STUDIO_TEST_KEY_BLANK", "   ");
    }

    assert!(EnvAccessProvider::new("STUDIO_TEST_KEY_PRESENT").has_access().await?);
    assert!(!EnvAccessProvider::new("STUDIO_TEST_KEY_BLANK").has_access().await?);
    assert!(!EnvAccessProvider::new("STUDIO_TEST_KEY_MISSING").has_access().await?);
    Ok(())
}

#[test]
fn test_env_provider_defaults_to_configured_variable() {
    assert_eq!(EnvAccessProvider::default().var(), "GEMINI_API_KEY");
}
