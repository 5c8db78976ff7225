//! Signing-certificate bundle validation.
//!
//! The fetched PEM bundle carries the leaf first, then its issuers up to a
//! self-signed anchor. The leaf must be inside its validity window and
//! bound to the platform's service hostname; every link in the chain must
//! be signed by an issuer present in the bundle.

use chrono::{DateTime, Utc};
use rsa::pkcs8::DecodePublicKey;
use rsa::RsaPublicKey;
use x509_parser::certificate::X509Certificate;
use x509_parser::extensions::GeneralName;
use x509_parser::pem::Pem;
use x509_parser::time::ASN1Time;

use skillgate_core::error::AuthError;

/// DNS name the leaf certificate must be issued for.
pub const CERTIFICATE_DNS_NAME: &str = "echo-api.amazon.com";

fn invalid(msg: impl Into<String>) -> AuthError {
    AuthError::InvalidCertificate(msg.into())
}

/// Validate the PEM bundle at `now` and extract the leaf's RSA public key.
pub fn leaf_public_key(bundle: &[u8], now: DateTime<Utc>) -> Result<RsaPublicKey, AuthError> {
    let pems: Vec<Pem> = Pem::iter_from_buffer(bundle)
        .collect::<Result<_, _>>()
        .map_err(|e| invalid(format!("pem decode: {e}")))?;
    if pems.is_empty() {
        return Err(invalid("empty certificate bundle"));
    }

    let certs: Vec<X509Certificate<'_>> = pems
        .iter()
        .map(|p| p.parse_x509())
        .collect::<Result<_, _>>()
        .map_err(|e| invalid(format!("x509 parse: {e}")))?;

    let leaf = &certs[0];

    let at = ASN1Time::from_timestamp(now.timestamp())
        .map_err(|_| invalid("clock out of certificate time range"))?;
    if !leaf.validity().is_valid_at(at) {
        return Err(invalid("leaf outside validity window"));
    }

    if !has_dns_name(leaf, CERTIFICATE_DNS_NAME) {
        return Err(invalid("service hostname missing from subjectAltName"));
    }

    verify_chain(&certs)?;

    RsaPublicKey::from_public_key_der(leaf.public_key().raw)
        .map_err(|e| invalid(format!("leaf public key: {e}")))
}

fn has_dns_name(cert: &X509Certificate<'_>, name: &str) -> bool {
    match cert.subject_alternative_name() {
        Ok(Some(san)) => san
            .value
            .general_names
            .iter()
            .any(|g| matches!(g, GeneralName::DNSName(n) if n.eq_ignore_ascii_case(name))),
        _ => false,
    }
}

/// Walk issuer links from the leaf to a self-signed anchor. Issuers are
/// located by subject match anywhere in the bundle, so ordering beyond
/// "leaf first" is not assumed.
fn verify_chain(certs: &[X509Certificate<'_>]) -> Result<(), AuthError> {
    let mut used = vec![false; certs.len()];
    used[0] = true;
    let mut current = &certs[0];

    loop {
        if current.subject().as_raw() == current.issuer().as_raw() {
            return current
                .verify_signature(None)
                .map_err(|_| invalid("anchor self-signature invalid"));
        }

        let issuer_idx = certs
            .iter()
            .enumerate()
            .position(|(i, c)| !used[i] && c.subject().as_raw() == current.issuer().as_raw())
            .ok_or_else(|| invalid("issuer not present in bundle"))?;

        current
            .verify_signature(Some(certs[issuer_idx].public_key()))
            .map_err(|_| invalid("chain signature invalid"))?;

        used[issuer_idx] = true;
        current = &certs[issuer_idx];
    }
}
