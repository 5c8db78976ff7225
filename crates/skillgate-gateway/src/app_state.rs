//! Shared application state for the skillgate gateway.
//!
//! Construction is explicit `Result` so `main` can handle startup faults
//! gracefully instead of panicking mid-boot.

use std::sync::Arc;
use std::time::Duration;

use skillgate_core::Result;

use crate::config::GatewayConfig;
use crate::dispatch::{SkillHandlers, SkillMux};
use crate::obs::SkillMetrics;
use crate::services::GreeterService;
use crate::verify::RequestVerifier;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: GatewayConfig,
    mux: SkillMux,
    verifier: RequestVerifier,
    metrics: SkillMetrics,
}

impl AppState {
    /// Build application state and register the built-in greeter for each
    /// configured skill id.
    pub fn new(cfg: GatewayConfig) -> Result<Self> {
        let verifier = RequestVerifier::new(Duration::from_millis(
            cfg.verification.fetch_timeout_ms,
        ))?;

        let mux = SkillMux::new();
        for skill in &cfg.skills {
            mux.register(skill.application_id.clone(), GreeterService::handlers());
            tracing::info!(application_id = %skill.application_id, "registered built-in greeter");
        }

        Ok(Self {
            inner: Arc::new(AppStateInner {
                cfg,
                mux,
                verifier,
                metrics: SkillMetrics::default(),
            }),
        })
    }

    /// Replace or add the handler set for an application id. Embedding
    /// applications call this at startup with their own handlers.
    pub fn register_skill(&self, application_id: impl Into<String>, handlers: SkillHandlers) {
        self.inner.mux.register(application_id, handlers);
    }

    pub fn cfg(&self) -> &GatewayConfig {
        &self.inner.cfg
    }

    pub fn skills(&self) -> &SkillMux {
        &self.inner.mux
    }

    pub fn verifier(&self) -> &RequestVerifier {
        &self.inner.verifier
    }

    pub fn metrics(&self) -> &SkillMetrics {
        &self.inner.metrics
    }
}
