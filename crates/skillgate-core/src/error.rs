//! Shared error types across skillgate crates.

use thiserror::Error;

/// Transport-facing disposition of an error (stable mapping).
///
/// Authentication failures map to `Drop`: the request is terminated with a
/// uniform, success-shaped empty reply so the remote caller learns nothing
/// about which verification step failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Reply 400, empty body.
    BadRequest,
    /// Silently terminate the request; no body, no distinguishing status.
    Drop,
    /// Reply 500, empty body.
    Internal,
}

impl Disposition {
    /// String representation used in logs and metrics labels.
    pub fn as_str(self) -> &'static str {
        match self {
            Disposition::BadRequest => "BAD_REQUEST",
            Disposition::Drop => "DROP",
            Disposition::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, GateError>;

/// Request authentication failure. One variant per verification step;
/// the first failing step short-circuits the rest.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Timestamp missing, unparseable, or outside the freshness window.
    #[error("request timestamp outside tolerance")]
    StaleRequest,
    /// Certificate-chain URL violates the trusted-source policy.
    #[error("untrusted certificate chain source: {0}")]
    UntrustedSource(String),
    /// Transport error or non-success status while fetching the chain.
    #[error("certificate fetch failed: {0}")]
    FetchFailed(String),
    /// PEM/X.509 parsing or chain validation failed.
    #[error("invalid certificate: {0}")]
    InvalidCertificate(String),
    /// Signature header did not decode or did not verify over the body.
    #[error("signature mismatch")]
    SignatureMismatch,
}

impl AuthError {
    /// Reason label for metrics. Never sent to the remote caller.
    pub fn reason(&self) -> &'static str {
        match self {
            AuthError::StaleRequest => "stale_request",
            AuthError::UntrustedSource(_) => "untrusted_source",
            AuthError::FetchFailed(_) => "fetch_failed",
            AuthError::InvalidCertificate(_) => "invalid_certificate",
            AuthError::SignatureMismatch => "signature_mismatch",
        }
    }
}

/// Opaque error returned by an application callback. The content is logged
/// by the embedding application and never echoed to the platform.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct HandlerError(Box<dyn std::error::Error + Send + Sync>);

impl HandlerError {
    /// Wrap any application error.
    pub fn new(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self(err.into())
    }

    /// Wrap a plain message.
    pub fn msg(msg: impl Into<String>) -> Self {
        Self(msg.into().into())
    }
}

/// Dispatch failure, distinct per stage so the boundary can tell "no type
/// field at all" from "typed decode failed" from "callback failed".
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Body was not valid JSON even for the shallow discriminant read.
    #[error("malformed envelope: {0}")]
    MalformedEnvelope(String),
    /// Discriminant was recognized but the body did not match its shape.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),
    /// The registered callback returned an error.
    #[error("handler failed: {0}")]
    Handler(#[source] HandlerError),
}

/// Unified error type used by the gateway boundary.
#[derive(Debug, Error)]
pub enum GateError {
    /// Request body could not be read or was otherwise unusable.
    #[error("transport: {0}")]
    Transport(String),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
    /// Startup-time configuration fault.
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl GateError {
    /// Map an error to its stable transport-facing disposition.
    pub fn disposition(&self) -> Disposition {
        match self {
            GateError::Transport(_) => Disposition::BadRequest,
            GateError::Auth(_) => Disposition::Drop,
            GateError::Dispatch(DispatchError::MalformedEnvelope(_)) => Disposition::BadRequest,
            GateError::Dispatch(DispatchError::MalformedPayload(_)) => Disposition::BadRequest,
            GateError::Dispatch(DispatchError::Handler(_)) => Disposition::Internal,
            GateError::Config(_) => Disposition::Internal,
            GateError::Internal(_) => Disposition::Internal,
        }
    }
}
