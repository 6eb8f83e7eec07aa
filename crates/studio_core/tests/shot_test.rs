//! Tests for shot records and generation status.

use studio_core::{
    AspectRatio, GenerationStatus, MediaPayload, ResourceLocator, Shot, ShotDuration, ShotStatus,
    ShotUpdate, Transition,
};
use strum::IntoEnumIterator;

fn assert_result_error_invariant(status: &ShotStatus) {
    match status {
        GenerationStatus::Idle | GenerationStatus::Processing => {
            assert!(status.result().is_none());
            assert!(status.error().is_none());
        }
        GenerationStatus::Completed { .. } | GenerationStatus::Failed { .. } => {
            assert!(status.result().is_some() ^ status.error().is_some());
        }
    }
}

#[test]
fn test_new_shot_defaults() {
    let shot = Shot::new(ShotDuration::default(), Transition::default());

    assert_eq!(shot.prompt(), "");
    assert_eq!(shot.duration().seconds(), 5);
    assert_eq!(*shot.transition(), Transition::Fade);
    assert_eq!(*shot.status(), ShotStatus::Idle);
    assert!(!shot.has_prompt());
}

#[test]
fn test_fresh_ids_are_distinct() {
    let a = Shot::new(ShotDuration::default(), Transition::Fade);
    let b = Shot::new(ShotDuration::default(), Transition::Fade);
    assert_ne!(a.id(), b.id());
}

#[test]
fn test_apply_touches_only_named_field() {
    let mut shot = Shot::new(ShotDuration::default(), Transition::Fade);
    let id = *shot.id();

    shot.apply(ShotUpdate::SetTransition(Transition::Dissolve));
    assert_eq!(*shot.transition(), Transition::Dissolve);
    assert_eq!(shot.duration().seconds(), 5);
    assert_eq!(shot.prompt(), "");
    assert_eq!(*shot.id(), id);

    shot.apply(ShotUpdate::SetDuration(0));
    assert_eq!(shot.duration().seconds(), 1);
}

#[test]
fn test_whitespace_prompt_is_not_a_prompt() {
    let mut shot = Shot::new(ShotDuration::default(), Transition::Fade);
    shot.apply(ShotUpdate::SetPrompt("   \n\t".to_string()));
    assert!(!shot.has_prompt());
}

#[test]
fn test_status_invariant_holds_for_every_state() {
    let statuses = [
        ShotStatus::Idle,
        ShotStatus::Processing,
        ShotStatus::completed(ResourceLocator::from("https://example.com/a.mp4")),
        ShotStatus::failed("No video URI returned."),
    ];

    let mut shot = Shot::new(ShotDuration::default(), Transition::Cut);
    for status in statuses {
        shot.set_status(status);
        assert_result_error_invariant(shot.status());
    }
}

#[test]
fn test_shot_serializes_with_flat_status() -> anyhow::Result<()> {
    let mut shot = Shot::new(ShotDuration::clamped(7), Transition::Cut);
    shot.apply(ShotUpdate::SetPrompt("Close-up of a cat".to_string()));
    shot.set_status(ShotStatus::completed(ResourceLocator::from("uri://1")));

    let value = serde_json::to_value(&shot)?;
    assert_eq!(value["status"], "completed");
    assert_eq!(value["result"], "uri://1");
    assert_eq!(value["duration"], 7);
    assert_eq!(value["transition"], "cut");

    let back: Shot = serde_json::from_value(value)?;
    assert_eq!(back, shot);
    Ok(())
}

#[test]
fn test_transition_parsing() {
    assert_eq!("Dissolve".parse::<Transition>(), Ok(Transition::Dissolve));
    assert!("wipe".parse::<Transition>().is_err());
    assert_eq!(Transition::iter().count(), 3);
}

#[test]
fn test_aspect_ratio_has_two_values() {
    let all: Vec<&str> = AspectRatio::iter().map(|r| r.as_str()).collect();
    assert_eq!(all, vec!["16:9", "9:16"]);
    assert!("4:3".parse::<AspectRatio>().is_err());
}

#[test]
fn test_media_payload_base64_roundtrip() -> anyhow::Result<()> {
    let payload = MediaPayload::from_base64("image/jpeg", "/9j/4AAQ")?;
    assert_eq!(payload.mime_type(), "image/jpeg");
    assert_eq!(payload.to_base64(), "/9j/4AAQ");
    assert!(payload.to_data_uri().starts_with("data:image/jpeg;base64,"));
    Ok(())
}
