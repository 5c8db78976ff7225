//! Built-in greeter skill.
//!
//! Small demo handler set registered by the binary so a fresh deployment
//! answers launch and intent requests out of the box. Embedding
//! applications register their own `SkillHandlers` instead.

use std::sync::Arc;

use async_trait::async_trait;

use skillgate_core::protocol::request::{IntentRequest, LaunchRequest, SessionEndedRequest};
use skillgate_core::protocol::response::ResponseWriter;

use crate::dispatch::{
    HandlerResult, IntentHandler, LaunchHandler, SessionEndedHandler, SkillHandlers,
};

#[derive(Default)]
pub struct GreeterService;

impl GreeterService {
    pub fn new() -> Self {
        Self
    }

    /// Handler set exposing the greeter under every voice discriminant it
    /// supports.
    pub fn handlers() -> SkillHandlers {
        let svc = Arc::new(GreeterService::new());
        SkillHandlers {
            launch: Some(svc.clone()),
            intent: Some(svc.clone()),
            session_ended: Some(svc),
            ..Default::default()
        }
    }
}

#[async_trait]
impl LaunchHandler for GreeterService {
    async fn handle(&self, res: &mut dyn ResponseWriter, _req: &LaunchRequest) -> HandlerResult {
        res.plain_text("Welcome. Ask me to say hello.");
        res.reprompt_plain_text("You can say: say hello.");
        res.should_end_session(false);
        Ok(())
    }
}

#[async_trait]
impl IntentHandler for GreeterService {
    async fn handle(&self, res: &mut dyn ResponseWriter, req: &IntentRequest) -> HandlerResult {
        match req.request.intent.name.as_str() {
            "HelloIntent" => {
                res.plain_text("Hello from skillgate.");
                res.simple_card("skillgate", "Hello from skillgate.");
                res.should_end_session(true);
            }
            other => {
                tracing::debug!(intent = other, "unhandled intent");
                res.plain_text("Sorry, I did not catch that.");
                res.should_end_session(false);
            }
        }
        Ok(())
    }
}

#[async_trait]
impl SessionEndedHandler for GreeterService {
    async fn handle(&self, req: &SessionEndedRequest) -> HandlerResult {
        tracing::info!(reason = %req.request.reason, "session ended");
        Ok(())
    }
}
