//! Inbound request envelope (shallow JSON decode).
//!
//! The envelope reads only what the trust boundary needs before routing:
//! the request discriminant, the declared timestamp, and the application
//! id. The session block stays as `RawValue` so attributes pass through
//! opaque and unmodified; the full typed payload is decoded later, on the
//! one dispatch path that needs it.

use serde::Deserialize;
use serde_json::value::RawValue;

use crate::error::DispatchError;

/// Shallow view of an inbound request body.
#[derive(Debug, Deserialize)]
pub struct Envelope {
    /// Protocol version declared by the platform.
    #[serde(default)]
    pub version: String,
    /// Opaque session block (pass-through, lazy).
    #[serde(default)]
    pub session: Option<Box<RawValue>>,
    /// Context, read only as far as the application id.
    #[serde(default)]
    pub context: ContextHead,
    /// Request head carrying the discriminant.
    #[serde(default)]
    pub request: RequestHead,
}

impl Envelope {
    /// Decode the shallow envelope from raw body bytes.
    pub fn decode(raw: &[u8]) -> Result<Self, DispatchError> {
        serde_json::from_slice(raw).map_err(|e| DispatchError::MalformedEnvelope(e.to_string()))
    }

    /// Application id declared in the context block, if any.
    pub fn application_id(&self) -> &str {
        &self.context.system.application.application_id
    }
}

/// Context block, decoded only as far as `system.application.applicationId`.
///
/// The platform emits the key as `System`; the original decoder matched it
/// case-insensitively, so both spellings are accepted.
#[derive(Debug, Default, Deserialize)]
pub struct ContextHead {
    #[serde(default, rename = "System", alias = "system")]
    pub system: SystemHead,
}

#[derive(Debug, Default, Deserialize)]
pub struct SystemHead {
    #[serde(default)]
    pub application: ApplicationHead,
}

#[derive(Debug, Default, Deserialize)]
pub struct ApplicationHead {
    #[serde(default, rename = "applicationId")]
    pub application_id: String,
}

/// Request head: the discriminant plus the fields authentication needs.
#[derive(Debug, Default, Deserialize)]
pub struct RequestHead {
    /// Discriminant string (`request.type` in JSON).
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default, rename = "requestId")]
    pub request_id: String,
    #[serde(default)]
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn decode_reads_discriminant_and_application_id() {
        let body = br#"{
            "version": "1.0",
            "session": {"attributes": {"counter": 3}},
            "context": {"System": {"application": {"applicationId": "app-1"}}},
            "request": {"type": "LaunchRequest", "requestId": "r-1", "timestamp": "2015-05-13T12:34:56Z"}
        }"#;
        let env = Envelope::decode(body).unwrap();
        assert_eq!(env.request.kind, "LaunchRequest");
        assert_eq!(env.request.timestamp, "2015-05-13T12:34:56Z");
        assert_eq!(env.application_id(), "app-1");
        assert!(env.session.unwrap().get().contains("counter"));
    }

    #[test]
    fn lowercase_system_key_is_accepted() {
        let body = br#"{"context": {"system": {"application": {"applicationId": "app-2"}}}}"#;
        let env = Envelope::decode(body).unwrap();
        assert_eq!(env.application_id(), "app-2");
    }

    #[test]
    fn missing_blocks_default_to_empty() {
        let env = Envelope::decode(b"{}").unwrap();
        assert_eq!(env.request.kind, "");
        assert_eq!(env.application_id(), "");
        assert!(env.session.is_none());
    }

    #[test]
    fn invalid_json_is_malformed_envelope() {
        let err = Envelope::decode(b"not json at all").unwrap_err();
        assert!(matches!(err, DispatchError::MalformedEnvelope(_)));
    }
}
