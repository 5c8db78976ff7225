//! Application-ID mux.
//!
//! Routes an inbound request to the handler set registered for its
//! application id. Registration happens at startup; request routing reads
//! concurrently without blocking on it.

use std::sync::Arc;

use dashmap::DashMap;

use super::handlers::SkillHandlers;

/// Registry of handler sets keyed by application id.
#[derive(Default)]
pub struct SkillMux {
    skills: DashMap<String, Arc<SkillHandlers>>,
}

impl SkillMux {
    pub fn new() -> Self {
        Self {
            skills: DashMap::new(),
        }
    }

    /// Associate an application id with a handler set. A second
    /// registration under the same id replaces the first.
    pub fn register(&self, application_id: impl Into<String>, handlers: SkillHandlers) {
        self.skills.insert(application_id.into(), Arc::new(handlers));
    }

    pub fn lookup(&self, application_id: &str) -> Option<Arc<SkillHandlers>> {
        self.skills.get(application_id).map(|e| e.value().clone())
    }

    pub fn registered_ids(&self) -> Vec<String> {
        self.skills.iter().map(|e| e.key().clone()).collect()
    }
}
