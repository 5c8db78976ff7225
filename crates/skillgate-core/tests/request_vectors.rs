//! Typed request catalog vector tests.
//!
//! Each vector is a complete platform payload; decoding must preserve
//! every declared field, and the shallow envelope read must agree with the
//! full typed decode on the discriminant.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::fs;

use skillgate_core::protocol::envelope::Envelope;
use skillgate_core::protocol::request::{
    AudioPlaybackFailedRequest, AudioPlaybackRequest, IntentRequest, LaunchRequest,
    PlaybackControllerRequest, RequestKind, SessionEndedRequest, SystemExceptionRequest,
};

const APP_ID: &str = "amzn1.echo-sdk-ams.app.000000-d0ed-0000-ad00-000000d00ebe";

fn load(name: &str) -> String {
    fs::read_to_string(format!("tests/vectors/{name}")).unwrap()
}

#[test]
fn launch_vector() {
    let s = load("launch.json");

    let env = Envelope::decode(s.as_bytes()).unwrap();
    assert_eq!(env.request.kind, RequestKind::Launch.as_type());
    assert_eq!(env.application_id(), APP_ID);

    let req: LaunchRequest = serde_json::from_str(&s).unwrap();
    assert_eq!(req.version, "1.0");
    assert!(req.session.is_new);
    assert_eq!(req.session.application.application_id, APP_ID);
    assert_eq!(req.context.system.api_endpoint, "https://api.amazonalexa.com");
    assert_eq!(req.request.locale, "en-US");
    assert_eq!(req.request.timestamp, "2015-05-13T12:34:56Z");
}

#[test]
fn intent_vector() {
    let s = load("intent.json");

    let req: IntentRequest = serde_json::from_str(&s).unwrap();
    assert_eq!(req.request.dialog_state, "COMPLETED");
    assert_eq!(req.request.intent.name, "GetZodiacHoroscopeIntent");

    let slot = &req.request.intent.slots["ZodiacSign"];
    assert_eq!(slot.value, "virgo");
    assert_eq!(slot.confirmation_status, "NONE");

    let res = slot.resolutions.as_ref().unwrap();
    let authority = &res.resolutions_per_authority[0];
    assert_eq!(authority.status.code, "ER_SUCCESS_MATCH");
    assert_eq!(authority.values[0].value.id, "VIRGO");

    // Session attributes pass through unmodified.
    let periods = &req.session.attributes["supportedHoroscopePeriods"];
    assert_eq!(periods["daily"], serde_json::json!(true));
}

#[test]
fn session_ended_vector() {
    let s = load("session_ended.json");

    let req: SessionEndedRequest = serde_json::from_str(&s).unwrap();
    assert_eq!(req.request.reason, "ERROR");
    let err = req.request.error.unwrap();
    assert_eq!(err.error_type, "INVALID_RESPONSE");
    assert_eq!(err.message, "the skill returned an invalid response");
}

#[test]
fn playback_started_vector() {
    let s = load("playback_started.json");

    let env = Envelope::decode(s.as_bytes()).unwrap();
    assert_eq!(
        RequestKind::from_type(&env.request.kind),
        Some(RequestKind::PlaybackStarted)
    );

    let req: AudioPlaybackRequest = serde_json::from_str(&s).unwrap();
    assert_eq!(req.request.token, "track-7");
    assert_eq!(req.request.offset_in_milliseconds, 1500);
}

#[test]
fn playback_failed_vector() {
    let s = load("playback_failed.json");

    let req: AudioPlaybackFailedRequest = serde_json::from_str(&s).unwrap();
    assert_eq!(req.request.error.error_type, "MEDIA_ERROR_INVALID_REQUEST");
    assert_eq!(req.request.error.current_playback_state.token, "track-6");
    assert_eq!(
        req.request.error.current_playback_state.offset_in_milliseconds,
        187_000
    );
    assert_eq!(req.request.error.current_playback_state.player_activity, "PLAYING");
}

#[test]
fn playback_controller_vector() {
    let s = load("playback_controller.json");

    let env = Envelope::decode(s.as_bytes()).unwrap();
    assert_eq!(
        RequestKind::from_type(&env.request.kind),
        Some(RequestKind::NextCommandIssued)
    );

    let req: PlaybackControllerRequest = serde_json::from_str(&s).unwrap();
    assert_eq!(req.request.locale, "en-US");
    assert!(!req.request.request_id.is_empty());
}

#[test]
fn system_exception_vector() {
    let s = load("system_exception.json");

    let req: SystemExceptionRequest = serde_json::from_str(&s).unwrap();
    assert_eq!(req.request.error.error_type, "INVALID_RESPONSE");
    assert_eq!(
        req.request.cause.request_id,
        "amzn1.echo-api.request.0000000-0000-0000-0000-00000000000"
    );
    assert_ne!(req.request.cause.request_id, req.request.request_id);
}
