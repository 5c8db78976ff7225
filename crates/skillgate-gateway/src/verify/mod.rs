//! Request authentication.
//!
//! Proves an inbound body was produced by the platform within the
//! freshness window: timestamp check, chain-URL policy, certificate fetch
//! and chain validation, then an RSA/SHA-1 signature check over the exact
//! raw body bytes. Steps run in order and the first failure wins; each
//! step has its own `AuthError` variant, but the boundary layer collapses
//! them all into one silent drop.
//!
//! Verification is stateless per request. The certificate fetch is the one
//! suspension point; fetched chains are not cached across requests (the
//! chain-URL-keyed cache is the documented extension seam).

pub mod certificate;
pub mod chain_url;

use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{DateTime, Utc};
use rsa::{Pkcs1v15Sign, RsaPublicKey};
use sha1::{Digest, Sha1};
use url::Url;

use skillgate_core::error::{AuthError, GateError};

/// Header naming the certificate-chain URL.
pub const CHAIN_URL_HEADER: &str = "SignatureCertChainUrl";

/// Header carrying the base64 body signature.
pub const SIGNATURE_HEADER: &str = "Signature";

/// Symmetric freshness tolerance. Both future and past skew beyond the
/// window are rejected.
pub const MAX_TIMESTAMP_DRIFT_MS: i64 = 150_000;

/// Stateless verifier; owns only the HTTP client used for chain fetches.
pub struct RequestVerifier {
    http: reqwest::Client,
}

impl RequestVerifier {
    pub fn new(fetch_timeout: Duration) -> skillgate_core::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(fetch_timeout)
            .build()
            .map_err(|e| GateError::Internal(format!("http client init: {e}")))?;
        Ok(Self { http })
    }

    /// Verify one request. `body` must be the exact raw bytes received;
    /// `now` is injected so freshness is testable.
    pub async fn verify(
        &self,
        chain_url: &str,
        signature_b64: &str,
        body: &[u8],
        timestamp: &str,
        now: DateTime<Utc>,
    ) -> Result<(), AuthError> {
        check_freshness(timestamp, now)?;
        let url = chain_url::validate(chain_url)?;
        let bundle = self.fetch_chain(url).await?;
        let key = certificate::leaf_public_key(&bundle, now)?;
        check_signature(&key, signature_b64, body)
    }

    async fn fetch_chain(&self, url: Url) -> Result<bytes::Bytes, AuthError> {
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| AuthError::FetchFailed(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(AuthError::FetchFailed(format!(
                "unexpected status {}",
                resp.status()
            )));
        }

        resp.bytes()
            .await
            .map_err(|e| AuthError::FetchFailed(e.to_string()))
    }
}

/// Reject timestamps more than the tolerance from `now`, in either
/// direction. Unparseable timestamps are stale, not a distinct failure.
pub fn check_freshness(timestamp: &str, now: DateTime<Utc>) -> Result<(), AuthError> {
    let t = DateTime::parse_from_rfc3339(timestamp).map_err(|_| AuthError::StaleRequest)?;
    let drift = now.signed_duration_since(t.with_timezone(&Utc));
    if drift.num_milliseconds().abs() > MAX_TIMESTAMP_DRIFT_MS {
        return Err(AuthError::StaleRequest);
    }
    Ok(())
}

fn check_signature(
    key: &RsaPublicKey,
    signature_b64: &str,
    body: &[u8],
) -> Result<(), AuthError> {
    let sig = BASE64
        .decode(signature_b64)
        .map_err(|_| AuthError::SignatureMismatch)?;
    let digest = Sha1::digest(body);
    key.verify(Pkcs1v15Sign::new::<Sha1>(), digest.as_slice(), &sig)
        .map_err(|_| AuthError::SignatureMismatch)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn freshness_accepts_exactly_150s_skew() {
        assert!(check_freshness("2026-01-01T11:57:30Z", now()).is_ok());
        assert!(check_freshness("2026-01-01T12:02:30Z", now()).is_ok());
    }

    #[test]
    fn freshness_rejects_just_past_150s_skew() {
        let err = check_freshness("2026-01-01T11:57:29.999Z", now()).unwrap_err();
        assert!(matches!(err, AuthError::StaleRequest));
        let err = check_freshness("2026-01-01T12:02:30.001Z", now()).unwrap_err();
        assert!(matches!(err, AuthError::StaleRequest));
    }

    #[test]
    fn freshness_accepts_offset_timestamps() {
        // Same instant written with a zone offset.
        assert!(check_freshness("2026-01-01T13:00:00+01:00", now()).is_ok());
    }

    #[test]
    fn unparseable_timestamp_is_stale() {
        assert!(matches!(
            check_freshness("yesterday-ish", now()),
            Err(AuthError::StaleRequest)
        ));
        assert!(matches!(
            check_freshness("", now()),
            Err(AuthError::StaleRequest)
        ));
    }
}
