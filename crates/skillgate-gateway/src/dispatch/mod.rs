//! Discriminant dispatch.
//!
//! `route` is one exhaustive match over `RequestKind`: the discriminant
//! picks exactly one registered callback, the full typed payload is decoded
//! only on that path, and the callback writes into a fresh accumulator
//! through its capability view. `Ok(None)` means "no content to write" —
//! the fire-and-forget outcome — and is not an error.

pub mod handlers;
pub mod mux;

use serde::de::DeserializeOwned;

use skillgate_core::error::DispatchError;
use skillgate_core::protocol::envelope::Envelope;
use skillgate_core::protocol::request::{
    AudioPlaybackFailedRequest, AudioPlaybackRequest, IntentRequest, LaunchRequest,
    PlaybackControllerRequest, RequestKind, SessionEndedRequest, SystemExceptionRequest,
};
use skillgate_core::protocol::response::{ResponseBuilder, ResponseEnvelope};

pub use handlers::{
    AudioQueueHandler, AudioStateHandler, HandlerResult, IntentHandler, LaunchHandler,
    PlaybackCommandHandler, PlaybackFailedHandler, PlaybackStoppedHandler, SessionEndedHandler,
    SkillHandlers, SystemExceptionHandler,
};
pub use mux::SkillMux;

fn decode<T: DeserializeOwned>(raw: &[u8]) -> Result<T, DispatchError> {
    serde_json::from_slice(raw).map_err(|e| DispatchError::MalformedPayload(e.to_string()))
}

/// Route a decoded envelope to the one matching callback.
///
/// `raw` must be the same bytes the envelope was decoded from; the typed
/// payload is read from them only when a callback is registered.
pub async fn route(
    handlers: &SkillHandlers,
    env: &Envelope,
    raw: &[u8],
) -> Result<Option<ResponseEnvelope>, DispatchError> {
    // Unrecognized discriminants are a valid no-handler outcome.
    let Some(kind) = RequestKind::from_type(&env.request.kind) else {
        return Ok(Some(ResponseEnvelope::empty()));
    };

    match kind {
        RequestKind::Launch => match &handlers.launch {
            Some(h) => {
                let req: LaunchRequest = decode(raw)?;
                let mut res = ResponseBuilder::new();
                h.handle(&mut res, &req).await.map_err(DispatchError::Handler)?;
                Ok(Some(res.into_envelope()))
            }
            None => Ok(Some(ResponseEnvelope::empty())),
        },

        RequestKind::Intent => match &handlers.intent {
            Some(h) => {
                let req: IntentRequest = decode(raw)?;
                let mut res = ResponseBuilder::new();
                h.handle(&mut res, &req).await.map_err(DispatchError::Handler)?;
                Ok(Some(res.into_envelope()))
            }
            None => Ok(Some(ResponseEnvelope::empty())),
        },

        RequestKind::SessionEnded => match &handlers.session_ended {
            Some(h) => {
                let req: SessionEndedRequest = decode(raw)?;
                h.handle(&req).await.map_err(DispatchError::Handler)?;
                Ok(None)
            }
            None => Ok(None),
        },

        RequestKind::PlaybackStarted => {
            audio_state(&handlers.playback_started, raw).await
        }
        RequestKind::PlaybackFinished => {
            audio_state(&handlers.playback_finished, raw).await
        }

        RequestKind::PlaybackNearlyFinished => match &handlers.playback_nearly_finished {
            Some(h) => {
                let req: AudioPlaybackRequest = decode(raw)?;
                let mut res = ResponseBuilder::new();
                h.handle(&mut res, &req).await.map_err(DispatchError::Handler)?;
                Ok(Some(res.into_envelope()))
            }
            None => Ok(Some(ResponseEnvelope::empty())),
        },

        RequestKind::PlaybackStopped => match &handlers.playback_stopped {
            Some(h) => {
                let req: AudioPlaybackRequest = decode(raw)?;
                h.handle(&req).await.map_err(DispatchError::Handler)?;
                // The platform accepts no directives here; reply with an
                // empty envelope.
                Ok(Some(ResponseEnvelope::empty()))
            }
            None => Ok(Some(ResponseEnvelope::empty())),
        },

        RequestKind::PlaybackFailed => match &handlers.playback_failed {
            Some(h) => {
                let req: AudioPlaybackFailedRequest = decode(raw)?;
                let mut res = ResponseBuilder::new();
                h.handle(&mut res, &req).await.map_err(DispatchError::Handler)?;
                Ok(Some(res.into_envelope()))
            }
            None => Ok(Some(ResponseEnvelope::empty())),
        },

        RequestKind::NextCommandIssued => command(&handlers.next_command, raw).await,
        RequestKind::PausedCommandIssued => command(&handlers.paused_command, raw).await,
        RequestKind::PlayCommandIssued => command(&handlers.play_command, raw).await,
        RequestKind::PreviousCommandIssued => command(&handlers.previous_command, raw).await,

        RequestKind::SystemException => match &handlers.system_exception {
            Some(h) => {
                let req: SystemExceptionRequest = decode(raw)?;
                h.handle(&req).await.map_err(DispatchError::Handler)?;
                Ok(None)
            }
            None => Ok(None),
        },
    }
}

async fn audio_state(
    slot: &Option<std::sync::Arc<dyn AudioStateHandler>>,
    raw: &[u8],
) -> Result<Option<ResponseEnvelope>, DispatchError> {
    match slot {
        Some(h) => {
            let req: AudioPlaybackRequest = decode(raw)?;
            let mut res = ResponseBuilder::new();
            h.handle(&mut res, &req).await.map_err(DispatchError::Handler)?;
            Ok(Some(res.into_envelope()))
        }
        None => Ok(Some(ResponseEnvelope::empty())),
    }
}

async fn command(
    slot: &Option<std::sync::Arc<dyn PlaybackCommandHandler>>,
    raw: &[u8],
) -> Result<Option<ResponseEnvelope>, DispatchError> {
    match slot {
        Some(h) => {
            let req: PlaybackControllerRequest = decode(raw)?;
            let mut res = ResponseBuilder::new();
            h.handle(&mut res, &req).await.map_err(DispatchError::Handler)?;
            Ok(Some(res.into_envelope()))
        }
        None => Ok(Some(ResponseEnvelope::empty())),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;

    use skillgate_core::error::HandlerError;
    use skillgate_core::protocol::response::{AudioDirectives, ResponseWriter};

    use super::*;

    fn body(kind: &str) -> Vec<u8> {
        format!(
            r#"{{"version":"1.0","request":{{"type":"{kind}","requestId":"r-1","timestamp":"2015-05-13T12:34:56Z"}}}}"#
        )
        .into_bytes()
    }

    fn envelope(raw: &[u8]) -> Envelope {
        Envelope::decode(raw).unwrap()
    }

    struct Hello;

    #[async_trait]
    impl LaunchHandler for Hello {
        async fn handle(&self, res: &mut dyn ResponseWriter, _req: &LaunchRequest) -> HandlerResult {
            res.plain_text("hello");
            Ok(())
        }
    }

    struct EndedProbe(Arc<AtomicUsize>);

    #[async_trait]
    impl SessionEndedHandler for EndedProbe {
        async fn handle(&self, _req: &SessionEndedRequest) -> HandlerResult {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct EnqueueNext;

    #[async_trait]
    impl AudioQueueHandler for EnqueueNext {
        async fn handle(
            &self,
            res: &mut dyn AudioDirectives,
            req: &AudioPlaybackRequest,
        ) -> HandlerResult {
            res.enqueue("next", "https://cdn.example.com/next.mp3", &req.request.token, 0);
            Ok(())
        }
    }

    struct Failing;

    #[async_trait]
    impl IntentHandler for Failing {
        async fn handle(&self, _res: &mut dyn ResponseWriter, _req: &IntentRequest) -> HandlerResult {
            Err(HandlerError::msg("boom"))
        }
    }

    #[tokio::test]
    async fn unrecognized_discriminant_yields_empty_envelope() {
        let raw = body("Display.ElementSelected");
        let out = route(&SkillHandlers::default(), &envelope(&raw), &raw)
            .await
            .unwrap();
        let json = serde_json::to_string(&out.unwrap()).unwrap();
        assert_eq!(json, r#"{"version":"1.0","response":{}}"#);
    }

    #[tokio::test]
    async fn registered_launch_handler_populates_response() {
        let handlers = SkillHandlers {
            launch: Some(Arc::new(Hello)),
            ..Default::default()
        };
        let raw = body("LaunchRequest");
        let out = route(&handlers, &envelope(&raw), &raw).await.unwrap();
        let json = serde_json::to_string(&out.unwrap()).unwrap();
        assert!(json.contains(r#""text":"hello""#));
    }

    #[tokio::test]
    async fn session_ended_is_fire_and_forget_even_when_registered() {
        let hits = Arc::new(AtomicUsize::new(0));
        let handlers = SkillHandlers {
            session_ended: Some(Arc::new(EndedProbe(hits.clone()))),
            ..Default::default()
        };
        let raw = body("SessionEndedRequest");
        let out = route(&handlers, &envelope(&raw), &raw).await.unwrap();
        assert!(out.is_none());
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn session_ended_without_handler_writes_nothing() {
        let raw = body("SessionEndedRequest");
        let out = route(&SkillHandlers::default(), &envelope(&raw), &raw)
            .await
            .unwrap();
        assert!(out.is_none());
    }

    #[tokio::test]
    async fn nearly_finished_handler_can_enqueue() {
        let handlers = SkillHandlers {
            playback_nearly_finished: Some(Arc::new(EnqueueNext)),
            ..Default::default()
        };
        let raw = br#"{"version":"1.0","request":{"type":"AudioPlayer.PlaybackNearlyFinished","requestId":"r-1","timestamp":"2015-05-13T12:34:56Z","token":"track-1","offsetInMilliseconds":90000}}"#.to_vec();
        let out = route(&handlers, &envelope(&raw), &raw).await.unwrap();
        let json = serde_json::to_value(out.unwrap()).unwrap();
        let d = &json["response"]["directives"][0];
        assert_eq!(d["playBehavior"], "ENQUEUE");
        assert_eq!(d["audioItem"]["stream"]["expectedPreviousToken"], "track-1");
    }

    #[tokio::test]
    async fn handler_error_is_opaque_dispatch_error() {
        let handlers = SkillHandlers {
            intent: Some(Arc::new(Failing)),
            ..Default::default()
        };
        let raw = body("IntentRequest");
        let err = route(&handlers, &envelope(&raw), &raw).await.unwrap_err();
        assert!(matches!(err, DispatchError::Handler(_)));
    }

    #[tokio::test]
    async fn malformed_typed_payload_is_distinct_from_malformed_envelope() {
        let handlers = SkillHandlers {
            intent: Some(Arc::new(Failing)),
            ..Default::default()
        };
        // Valid envelope, but the intent block has the wrong shape.
        let raw = br#"{"version":"1.0","request":{"type":"IntentRequest","requestId":"r-1","timestamp":"2015-05-13T12:34:56Z","intent":"nope"}}"#.to_vec();
        let err = route(&handlers, &envelope(&raw), &raw).await.unwrap_err();
        assert!(matches!(err, DispatchError::MalformedPayload(_)));
    }
}
