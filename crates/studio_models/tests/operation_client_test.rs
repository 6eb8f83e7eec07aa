//! Tests for the submit-and-await operation client.

mod test_utils;

use std::sync::Arc;
use studio_core::{AspectRatio, ImageEditRequest, ResourceLocator, VideoRequest};
use studio_error::GenerationErrorKind;
use studio_interface::{ImageEditor, OnlineSignal, OperationState, VideoGenerator};
use studio_models::OperationClient;
use test_utils::{MockImageEditing, MockVideoOperations, polling, sample_image};

fn request() -> VideoRequest {
    VideoRequest::text("A lighthouse in a storm", AspectRatio::Landscape)
}

#[tokio::test(start_paused = true)]
async fn test_polls_until_done() -> anyhow::Result<()> {
    let backend = Arc::new(MockVideoOperations::new(vec![
        OperationState::Pending,
        OperationState::Pending,
        OperationState::Succeeded(Some(ResourceLocator::from("https://example.com/v.mp4"))),
    ]));
    let client = OperationClient::new(backend.clone(), OnlineSignal::new(true), polling(3600));

    let started = tokio::time::Instant::now();
    let locator = client.generate_video(&request()).await?;

    assert_eq!(locator.as_str(), "https://example.com/v.mp4");
    assert_eq!(backend.submit_count(), 1);
    assert_eq!(backend.poll_count(), 3);
    // One fixed five second sleep before every poll
    assert!(started.elapsed() >= std::time::Duration::from_secs(15));
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_done_without_locator_is_no_output() {
    let backend = Arc::new(MockVideoOperations::new(vec![OperationState::Succeeded(
        None,
    )]));
    let client = OperationClient::new(backend.clone(), OnlineSignal::new(true), polling(3600));

    let err = client.generate_video(&request()).await.unwrap_err();

    assert!(matches!(err.kind, GenerationErrorKind::NoOutput(_)));
    assert_eq!(err.message(), "No video URI returned.");
}

#[tokio::test(start_paused = true)]
async fn test_remote_failure_message_is_surfaced() {
    let backend = Arc::new(MockVideoOperations::new(vec![OperationState::Failed(
        "Quota exceeded".to_string(),
    )]));
    let client = OperationClient::new(backend, OnlineSignal::new(true), polling(3600));

    let err = client.generate_video(&request()).await.unwrap_err();

    assert_eq!(err.message(), "Quota exceeded");
}

#[tokio::test(start_paused = true)]
async fn test_blank_remote_failure_uses_generic_message() {
    let backend = Arc::new(MockVideoOperations::new(vec![OperationState::Failed(
        String::new(),
    )]));
    let client = OperationClient::new(backend, OnlineSignal::new(true), polling(3600));

    let err = client.generate_video(&request()).await.unwrap_err();

    assert_eq!(err.message(), "Generation failed");
}

#[tokio::test(start_paused = true)]
async fn test_offline_fails_fast_without_remote_call() {
    let backend = Arc::new(MockVideoOperations::new(Vec::new()));
    let client = OperationClient::new(backend.clone(), OnlineSignal::new(false), polling(3600));

    let err = client.generate_video(&request()).await.unwrap_err();

    assert!(err.is_offline());
    assert_eq!(
        err.message(),
        "You are currently offline. Please check your internet connection."
    );
    assert_eq!(backend.submit_count(), 0);
    assert_eq!(backend.poll_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_going_offline_mid_job_stops_polling() {
    let signal = OnlineSignal::new(true);
    let backend = Arc::new(MockVideoOperations::new(Vec::new()).offline_after(2, signal.clone()));
    let client = OperationClient::new(backend.clone(), signal, polling(3600));

    let err = client.generate_video(&request()).await.unwrap_err();

    assert!(err.is_offline());
    assert_eq!(backend.poll_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_max_wait_bounds_polling() {
    let backend = Arc::new(MockVideoOperations::new(Vec::new()));
    let client = OperationClient::new(backend.clone(), OnlineSignal::new(true), polling(12));

    let err = client.generate_video(&request()).await.unwrap_err();

    match err.kind {
        GenerationErrorKind::TimedOut { waited_secs } => assert_eq!(waited_secs, 15),
        other => panic!("expected timeout, got {:?}", other),
    }
    assert_eq!(backend.poll_count(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_submit_failure_skips_polling() {
    let backend = Arc::new(MockVideoOperations::failing_submit("HTTP 400 error: bad prompt"));
    let client = OperationClient::new(backend.clone(), OnlineSignal::new(true), polling(3600));

    let err = client.generate_video(&request()).await.unwrap_err();

    assert_eq!(err.message(), "HTTP 400 error: bad prompt");
    assert_eq!(backend.poll_count(), 0);
}

#[tokio::test]
async fn test_image_edit_returns_payload() -> anyhow::Result<()> {
    let backend = Arc::new(MockImageEditing::returning(Some(sample_image())));
    let client = OperationClient::new(backend.clone(), OnlineSignal::new(true), polling(3600));

    let edited = client
        .edit(&ImageEditRequest::new(sample_image(), "Add a retro filter"))
        .await?;

    assert_eq!(edited.mime_type(), "image/png");
    assert!(edited.to_data_uri().starts_with("data:image/png;base64,"));
    assert_eq!(backend.call_count(), 1);
    Ok(())
}

#[tokio::test]
async fn test_image_edit_without_output_fails() {
    let backend = Arc::new(MockImageEditing::returning(None));
    let client = OperationClient::new(backend, OnlineSignal::new(true), polling(3600));

    let err = client
        .edit(&ImageEditRequest::new(sample_image(), "Remove the person"))
        .await
        .unwrap_err();

    assert_eq!(err.message(), "No image generated in response.");
}

#[tokio::test]
async fn test_image_edit_offline_makes_no_call() {
    let backend = Arc::new(MockImageEditing::returning(Some(sample_image())));
    let client = OperationClient::new(backend.clone(), OnlineSignal::new(false), polling(3600));

    let err = client
        .edit(&ImageEditRequest::new(sample_image(), "Add a retro filter"))
        .await
        .unwrap_err();

    assert!(err.is_offline());
    assert_eq!(backend.call_count(), 0);
}
