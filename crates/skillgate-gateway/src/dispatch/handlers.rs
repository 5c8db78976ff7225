//! Application callback traits and the per-skill handler set.
//!
//! One trait per callback signature family. The response argument is the
//! capability view for that request type: voice interactions get
//! `ResponseWriter`, audio state changes get stop/clear or the full
//! directive surface, and the two fire-and-forget types get no response
//! argument at all, so nothing they do can produce a body.

use std::sync::Arc;

use async_trait::async_trait;

use skillgate_core::error::HandlerError;
use skillgate_core::protocol::request::{
    AudioPlaybackFailedRequest, AudioPlaybackRequest, IntentRequest, LaunchRequest,
    PlaybackControllerRequest, SessionEndedRequest, SystemExceptionRequest,
};
use skillgate_core::protocol::response::{AudioControl, AudioDirectives, ResponseWriter};

/// Result every callback returns. The error is opaque to the gateway.
pub type HandlerResult = std::result::Result<(), HandlerError>;

#[async_trait]
pub trait LaunchHandler: Send + Sync {
    async fn handle(&self, res: &mut dyn ResponseWriter, req: &LaunchRequest) -> HandlerResult;
}

#[async_trait]
pub trait IntentHandler: Send + Sync {
    async fn handle(&self, res: &mut dyn ResponseWriter, req: &IntentRequest) -> HandlerResult;
}

/// Fire-and-forget: the session is already gone, no response is possible.
#[async_trait]
pub trait SessionEndedHandler: Send + Sync {
    async fn handle(&self, req: &SessionEndedRequest) -> HandlerResult;
}

/// Playback started/finished: may stop playback or clear the queue.
#[async_trait]
pub trait AudioStateHandler: Send + Sync {
    async fn handle(&self, res: &mut dyn AudioControl, req: &AudioPlaybackRequest)
        -> HandlerResult;
}

/// Playback nearly finished: full directive surface, typically to enqueue
/// the next stream.
#[async_trait]
pub trait AudioQueueHandler: Send + Sync {
    async fn handle(
        &self,
        res: &mut dyn AudioDirectives,
        req: &AudioPlaybackRequest,
    ) -> HandlerResult;
}

/// Playback stopped: the device reports an offset to persist; the platform
/// accepts no directives in reply.
#[async_trait]
pub trait PlaybackStoppedHandler: Send + Sync {
    async fn handle(&self, req: &AudioPlaybackRequest) -> HandlerResult;
}

#[async_trait]
pub trait PlaybackFailedHandler: Send + Sync {
    async fn handle(
        &self,
        res: &mut dyn AudioDirectives,
        req: &AudioPlaybackFailedRequest,
    ) -> HandlerResult;
}

/// Hardware transport-control buttons; one registration slot per command.
#[async_trait]
pub trait PlaybackCommandHandler: Send + Sync {
    async fn handle(
        &self,
        res: &mut dyn AudioDirectives,
        req: &PlaybackControllerRequest,
    ) -> HandlerResult;
}

/// Fire-and-forget: a directive the skill sent could not be processed.
#[async_trait]
pub trait SystemExceptionHandler: Send + Sync {
    async fn handle(&self, req: &SystemExceptionRequest) -> HandlerResult;
}

/// A skill's registered callbacks, one individually-optional slot per
/// discriminant. An empty slot is a compile-time-visible choice, not a
/// routing error.
#[derive(Default, Clone)]
pub struct SkillHandlers {
    pub launch: Option<Arc<dyn LaunchHandler>>,
    pub intent: Option<Arc<dyn IntentHandler>>,
    pub session_ended: Option<Arc<dyn SessionEndedHandler>>,

    pub playback_started: Option<Arc<dyn AudioStateHandler>>,
    pub playback_finished: Option<Arc<dyn AudioStateHandler>>,
    pub playback_nearly_finished: Option<Arc<dyn AudioQueueHandler>>,
    pub playback_stopped: Option<Arc<dyn PlaybackStoppedHandler>>,
    pub playback_failed: Option<Arc<dyn PlaybackFailedHandler>>,

    pub next_command: Option<Arc<dyn PlaybackCommandHandler>>,
    pub paused_command: Option<Arc<dyn PlaybackCommandHandler>>,
    pub play_command: Option<Arc<dyn PlaybackCommandHandler>>,
    pub previous_command: Option<Arc<dyn PlaybackCommandHandler>>,

    pub system_exception: Option<Arc<dyn SystemExceptionHandler>>,
}
