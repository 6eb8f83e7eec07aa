//! Tests for the session context.

mod test_utils;

use std::sync::{Arc, Mutex};
use studio::{
    AspectRatio, BatchOutcome, BlockReason, ShotUpdate, StoryboardErrorKind, StudioConfig,
    StudioErrorKind, StudioSession,
};
use test_utils::{MockAccessProvider, MockBackend};

struct Fixture {
    session: StudioSession<MockAccessProvider, Arc<MockBackend>>,
    backend: Arc<MockBackend>,
    builds: Arc<Mutex<usize>>,
}

fn fixture(config: StudioConfig, provider: MockAccessProvider) -> Fixture {
    let backend = Arc::new(MockBackend::default());
    let builds = Arc::new(Mutex::new(0));
    let session = {
        let backend = backend.clone();
        let builds = builds.clone();
        StudioSession::with_backend(config, provider, move |_| {
            *builds.lock().unwrap() += 1;
            Ok(backend.clone())
        })
    };
    Fixture {
        session,
        backend,
        builds,
    }
}

async fn fill_prompts(session: &StudioSession<MockAccessProvider, Arc<MockBackend>>) {
    let store = session.store();
    for (i, id) in store.snapshot().await.shots().ids().into_iter().enumerate() {
        store
            .update_shot(id, ShotUpdate::SetPrompt(format!("Scene {}", i + 1)))
            .await
            .expect("idle store accepts edits");
    }
}

#[tokio::test]
async fn test_client_requires_access() {
    let f = fixture(StudioConfig::default(), MockAccessProvider::answering(vec![Some(false)]));
    f.session.access().verify().await;

    let err = f.session.client().await.unwrap_err();

    match err.kind() {
        StudioErrorKind::Storyboard(e) => assert_eq!(e.kind, StoryboardErrorKind::AccessDenied),
        other => panic!("unexpected error: {}", other),
    }
    assert_eq!(*f.builds.lock().unwrap(), 0);
}

#[tokio::test]
async fn test_client_built_once_after_grant() -> anyhow::Result<()> {
    let f = fixture(StudioConfig::default(), MockAccessProvider::granted());
    f.session.access().verify().await;

    let first = f.session.client().await?;
    let second = f.session.client().await?;

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(*f.builds.lock().unwrap(), 1);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_batch_and_export_through_session() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let mut config = StudioConfig::default();
    config.export.directory = dir.path().to_path_buf();
    config.storyboard.title = "Launch Teaser".to_string();
    let f = fixture(config, MockAccessProvider::granted());
    f.session.access().verify().await;
    fill_prompts(&f.session).await;

    let outcome = f.session.run_batch().await?;

    let BatchOutcome::Finished(summary) = outcome else {
        panic!("batch should run, got {:?}", outcome);
    };
    assert_eq!(*summary.completed(), 3);
    assert_eq!(f.backend.submit_count(), 3);

    let path = f.session.export().await?.expect("manifest written");
    assert_eq!(path, dir.path().join("Launch-Teaser-storyboard.json"));
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_offline_session_blocks_batch() -> anyhow::Result<()> {
    let f = fixture(StudioConfig::default(), MockAccessProvider::granted());
    f.session.access().verify().await;
    fill_prompts(&f.session).await;
    f.session.online().set_online(false);

    let outcome = f.session.run_batch().await?;

    assert_eq!(outcome, BatchOutcome::Blocked(BlockReason::Offline));
    assert_eq!(f.backend.submit_count(), 0);
    Ok(())
}

#[tokio::test]
async fn test_video_flow_starts_with_configured_aspect_ratio() -> anyhow::Result<()> {
    let mut config = StudioConfig::default();
    config.storyboard.aspect_ratio = AspectRatio::Portrait;
    let f = fixture(config, MockAccessProvider::granted());
    f.session.access().verify().await;

    let flow = f.session.video_flow().await?;

    assert_eq!(flow.aspect_ratio(), AspectRatio::Portrait);
    Ok(())
}

#[tokio::test]
async fn test_store_starts_from_configured_storyboard() {
    let mut config = StudioConfig::default();
    config.storyboard.initial_shots = 5;
    let f = fixture(config, MockAccessProvider::granted());

    assert_eq!(f.session.store().snapshot().await.shots().len(), 5);
}
