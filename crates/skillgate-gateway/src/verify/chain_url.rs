//! Certificate-chain URL policy.
//!
//! The platform publishes its signing certificates from one fixed bucket;
//! a request may only name a chain URL inside it. Four axes are checked:
//! scheme, host, port, path prefix. Any violation is `UntrustedSource`,
//! which keeps an attacker from pointing the verifier at a certificate of
//! their own choosing.

use url::Url;

use skillgate_core::error::AuthError;

/// Only host the platform serves certificate chains from.
pub const TRUSTED_CHAIN_HOST: &str = "s3.amazonaws.com";

/// Required path prefix inside the trusted host.
pub const REQUIRED_PATH_PREFIX: &str = "/echo.api/";

/// Validate a chain URL against the trusted-source policy.
///
/// Returns the parsed URL for the subsequent fetch. The path-prefix check
/// is textual, against the header value as written: dot segments are not
/// resolved (platform-compatibility policy; see DESIGN.md).
pub fn validate(raw: &str) -> Result<Url, AuthError> {
    let url =
        Url::parse(raw).map_err(|e| AuthError::UntrustedSource(format!("unparseable url: {e}")))?;

    if !url.scheme().eq_ignore_ascii_case("https") {
        return Err(AuthError::UntrustedSource("scheme mismatch".into()));
    }

    match url.host_str() {
        Some(host) if host.eq_ignore_ascii_case(TRUSTED_CHAIN_HOST) => {}
        _ => return Err(AuthError::UntrustedSource("host mismatch".into())),
    }

    // `Url` strips the default port, so any remaining explicit port is
    // non-default.
    if let Some(port) = url.port() {
        if port != 443 {
            return Err(AuthError::UntrustedSource(format!("port mismatch: {port}")));
        }
    }

    if !raw_path(raw).starts_with(REQUIRED_PATH_PREFIX) {
        return Err(AuthError::UntrustedSource("path prefix mismatch".into()));
    }

    Ok(url)
}

/// Path portion of the URL as written, before any normalization.
fn raw_path(raw: &str) -> &str {
    let after_scheme = match raw.find("://") {
        Some(i) => &raw[i + 3..],
        None => raw,
    };
    let end = after_scheme
        .find(['?', '#'])
        .unwrap_or(after_scheme.len());
    let authority_and_path = &after_scheme[..end];
    match authority_and_path.find('/') {
        Some(i) => &authority_and_path[i..],
        None => "",
    }
}
