use serde::Deserialize;

use skillgate_core::error::GateError;
use skillgate_core::Result;

fn bad(msg: &str) -> GateError {
    GateError::Config(msg.into())
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    pub version: u32,

    #[serde(default)]
    pub gateway: GatewaySection,

    #[serde(default)]
    pub verification: VerificationSection,

    #[serde(default)]
    pub skills: Vec<SkillConfig>,
}

impl GatewayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(bad("version must be 1"));
        }
        if self.skills.is_empty() {
            return Err(bad("skills must not be empty"));
        }
        if self.skills.iter().any(|s| s.application_id.is_empty()) {
            return Err(bad("skills[].application_id must not be empty"));
        }

        self.verification.validate()?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewaySection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for GatewaySection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VerificationSection {
    /// Disable only for local development; the platform rejects skills
    /// that skip verification in production.
    #[serde(default = "default_verification_enabled")]
    pub enabled: bool,

    #[serde(default = "default_fetch_timeout_ms")]
    pub fetch_timeout_ms: u64,
}

impl Default for VerificationSection {
    fn default() -> Self {
        Self {
            enabled: default_verification_enabled(),
            fetch_timeout_ms: default_fetch_timeout_ms(),
        }
    }
}

impl VerificationSection {
    pub fn validate(&self) -> Result<()> {
        if !(100..=30000).contains(&self.fetch_timeout_ms) {
            return Err(bad(
                "verification.fetch_timeout_ms must be between 100 and 30000",
            ));
        }
        Ok(())
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}
fn default_verification_enabled() -> bool {
    true
}
fn default_fetch_timeout_ms() -> u64 {
    3000
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SkillConfig {
    pub application_id: String,
}
