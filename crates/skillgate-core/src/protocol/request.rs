//! Typed request catalog.
//!
//! The discriminant domain is closed: `RequestKind` enumerates every
//! request type the platform can deliver, and each kind owns exactly one
//! payload shape. Unrecognized discriminant strings are not an error, they
//! are a valid "no handler" outcome.
//!
//! Payload structs are tolerant decoders: every field defaults when absent,
//! matching the platform's habit of omitting blocks per request type.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

/// Closed set of request discriminants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    Launch,
    Intent,
    SessionEnded,
    PlaybackStarted,
    PlaybackFinished,
    PlaybackNearlyFinished,
    PlaybackStopped,
    PlaybackFailed,
    NextCommandIssued,
    PausedCommandIssued,
    PlayCommandIssued,
    PreviousCommandIssued,
    SystemException,
}

impl RequestKind {
    /// Map a discriminant string to its kind. `None` for unrecognized
    /// values.
    pub fn from_type(s: &str) -> Option<Self> {
        Some(match s {
            "LaunchRequest" => RequestKind::Launch,
            "IntentRequest" => RequestKind::Intent,
            "SessionEndedRequest" => RequestKind::SessionEnded,
            "AudioPlayer.PlaybackStarted" => RequestKind::PlaybackStarted,
            "AudioPlayer.PlaybackFinished" => RequestKind::PlaybackFinished,
            "AudioPlayer.PlaybackNearlyFinished" => RequestKind::PlaybackNearlyFinished,
            "AudioPlayer.PlaybackStopped" => RequestKind::PlaybackStopped,
            "AudioPlayer.PlaybackFailed" => RequestKind::PlaybackFailed,
            "PlaybackController.NextCommandIssued" => RequestKind::NextCommandIssued,
            "PlaybackController.PausedCommandIssued" => RequestKind::PausedCommandIssued,
            "PlaybackController.PlayCommandIssued" => RequestKind::PlayCommandIssued,
            "PlaybackController.PreviousCommandIssued" => RequestKind::PreviousCommandIssued,
            "System.ExceptionEncountered" => RequestKind::SystemException,
            _ => return None,
        })
    }

    /// Discriminant string for this kind.
    pub fn as_type(self) -> &'static str {
        match self {
            RequestKind::Launch => "LaunchRequest",
            RequestKind::Intent => "IntentRequest",
            RequestKind::SessionEnded => "SessionEndedRequest",
            RequestKind::PlaybackStarted => "AudioPlayer.PlaybackStarted",
            RequestKind::PlaybackFinished => "AudioPlayer.PlaybackFinished",
            RequestKind::PlaybackNearlyFinished => "AudioPlayer.PlaybackNearlyFinished",
            RequestKind::PlaybackStopped => "AudioPlayer.PlaybackStopped",
            RequestKind::PlaybackFailed => "AudioPlayer.PlaybackFailed",
            RequestKind::NextCommandIssued => "PlaybackController.NextCommandIssued",
            RequestKind::PausedCommandIssued => "PlaybackController.PausedCommandIssued",
            RequestKind::PlayCommandIssued => "PlaybackController.PlayCommandIssued",
            RequestKind::PreviousCommandIssued => "PlaybackController.PreviousCommandIssued",
            RequestKind::SystemException => "System.ExceptionEncountered",
        }
    }

    /// Whether callbacks for this kind may produce a response envelope.
    /// The two fire-and-forget kinds never serialize a body.
    pub fn responds(self) -> bool {
        !matches!(self, RequestKind::SessionEnded | RequestKind::SystemException)
    }
}

// --------------------
// Shared blocks
// --------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    #[serde(default)]
    pub application_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permissions {
    #[serde(default)]
    pub consent_token: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub permissions: Permissions,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct System {
    #[serde(default)]
    pub api_endpoint: String,
    #[serde(default)]
    pub application: Application,
    #[serde(default)]
    pub user: User,
}

/// Device/user/application identifiers. The platform emits the system key
/// as `System`; both spellings are accepted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Context {
    #[serde(default, rename = "System", alias = "system")]
    pub system: System,
}

/// Session block. Attributes pass through opaque and unmodified.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default)]
    pub application: Application,
    #[serde(default)]
    pub attributes: HashMap<String, Value>,
    #[serde(default)]
    pub session_id: String,
    #[serde(default, rename = "new")]
    pub is_new: bool,
    #[serde(default)]
    pub user: User,
}

// --------------------
// Launch
// --------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LaunchRequest {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub context: Context,
    #[serde(default)]
    pub session: Session,
    #[serde(default)]
    pub request: LaunchData,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchData {
    #[serde(default)]
    pub request_id: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub locale: String,
}

// --------------------
// Intent
// --------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IntentRequest {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub context: Context,
    #[serde(default)]
    pub session: Session,
    #[serde(default)]
    pub request: IntentData,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentData {
    #[serde(default)]
    pub request_id: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub dialog_state: String,
    #[serde(default)]
    pub locale: String,
    #[serde(default)]
    pub intent: Intent,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Intent {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub confirmation_status: String,
    #[serde(default)]
    pub slots: HashMap<String, Slot>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub confirmation_status: String,
    #[serde(default)]
    pub resolutions: Option<Resolutions>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolutions {
    #[serde(default)]
    pub resolutions_per_authority: Vec<Resolution>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
    #[serde(default)]
    pub authority: String,
    #[serde(default)]
    pub status: ResolutionStatus,
    #[serde(default)]
    pub values: Vec<ResolutionValueEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResolutionStatus {
    #[serde(default)]
    pub code: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResolutionValueEntry {
    #[serde(default)]
    pub value: ResolutionValue,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResolutionValue {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub id: String,
}

// --------------------
// Session ended
// --------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionEndedRequest {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub context: Context,
    #[serde(default)]
    pub session: Session,
    #[serde(default)]
    pub request: SessionEndedData,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionEndedData {
    #[serde(default)]
    pub request_id: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub error: Option<SessionEndedError>,
    #[serde(default)]
    pub locale: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionEndedError {
    #[serde(default, rename = "type")]
    pub error_type: String,
    #[serde(default)]
    pub message: String,
}

// --------------------
// Audio player state changes
// --------------------

/// Payload shared by the started/finished/nearly-finished/stopped state
/// changes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AudioPlaybackRequest {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub context: Context,
    #[serde(default)]
    pub request: AudioPlaybackData,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioPlaybackData {
    #[serde(default)]
    pub request_id: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub offset_in_milliseconds: i64,
    #[serde(default)]
    pub locale: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AudioPlaybackFailedRequest {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub context: Context,
    #[serde(default)]
    pub request: AudioPlaybackFailedData,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioPlaybackFailedData {
    #[serde(default)]
    pub request_id: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub offset_in_milliseconds: i64,
    #[serde(default)]
    pub locale: String,
    #[serde(default)]
    pub error: PlaybackFailure,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackFailure {
    #[serde(default, rename = "type")]
    pub error_type: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub current_playback_state: PlaybackState,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackState {
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub offset_in_milliseconds: i64,
    #[serde(default)]
    pub player_activity: String,
}

// --------------------
// Playback controller commands
// --------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaybackControllerRequest {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub context: Context,
    #[serde(default)]
    pub request: PlaybackControllerData,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackControllerData {
    #[serde(default)]
    pub request_id: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub locale: String,
}

// --------------------
// System exception
// --------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SystemExceptionRequest {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub context: Context,
    #[serde(default)]
    pub request: SystemExceptionData,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemExceptionData {
    #[serde(default)]
    pub request_id: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub locale: String,
    #[serde(default)]
    pub error: SystemExceptionError,
    #[serde(default)]
    pub cause: SystemExceptionCause,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SystemExceptionError {
    #[serde(default, rename = "type")]
    pub error_type: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemExceptionCause {
    #[serde(default)]
    pub request_id: String,
}
