//! Skill webhook endpoint.
//!
//! Pipeline per inbound POST: shallow envelope decode, verification,
//! application-id lookup, dispatch, serialize. The status mapping is a
//! fixed contract:
//!
//! - unreadable/malformed body -> 400, empty body
//! - failed verification       -> dropped: 200, empty body, no detail
//! - unknown application id    -> 404
//! - dispatched, no content    -> 200, empty body
//! - dispatched with content   -> 200, JSON envelope
//! - malformed typed payload   -> 400
//! - callback error            -> 500, body suppressed

use std::time::Instant;

use axum::extract::rejection::BytesRejection;
use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use chrono::Utc;

use skillgate_core::error::{DispatchError, Disposition, GateError};
use skillgate_core::protocol::envelope::Envelope;
use skillgate_core::protocol::request::RequestKind;

use crate::app_state::AppState;
use crate::dispatch;
use crate::obs::SkillMetrics;
use crate::verify::{CHAIN_URL_HEADER, SIGNATURE_HEADER};

const CONTENT_TYPE_JSON: &str = "application/json;charset=UTF-8";

pub async fn skill_request(
    State(app): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let metrics = app.metrics();

    let body = match body {
        Ok(body) => body,
        Err(err) => {
            let err = GateError::Transport(err.to_string());
            tracing::debug!(error = %err, "failed to read request body");
            return reply(status_for(err.disposition()), metrics);
        }
    };

    let env = match Envelope::decode(&body) {
        Ok(env) => env,
        Err(err) => {
            metrics.dispatch_errors.inc(&[("kind", "malformed_envelope")]);
            tracing::debug!(error = %err, "rejecting unreadable request body");
            return reply(StatusCode::BAD_REQUEST, metrics);
        }
    };

    metrics.requests.inc(&[("type", kind_label(&env.request.kind))]);

    if app.cfg().verification.enabled {
        let chain_url = header_str(&headers, CHAIN_URL_HEADER);
        let signature = header_str(&headers, SIGNATURE_HEADER);

        let started = Instant::now();
        let outcome = app
            .verifier()
            .verify(chain_url, signature, &body, &env.request.timestamp, Utc::now())
            .await;
        metrics.verify_duration.observe(&[], started.elapsed());

        if let Err(err) = outcome {
            metrics.auth_rejections.inc(&[("reason", err.reason())]);
            tracing::warn!(
                reason = err.reason(),
                request_type = %env.request.kind,
                "dropping request that failed verification"
            );
            // Uniform success-shaped empty reply: no verification oracle.
            return reply(StatusCode::OK, metrics);
        }
    }

    let Some(handlers) = app.skills().lookup(env.application_id()) else {
        tracing::debug!(application_id = %env.application_id(), "no handler set registered");
        return reply(StatusCode::NOT_FOUND, metrics);
    };

    match dispatch::route(&handlers, &env, &body).await {
        Ok(Some(envelope)) => match serde_json::to_vec(&envelope) {
            Ok(json) => {
                metrics.responses.inc(&[("status", "200")]);
                (
                    StatusCode::OK,
                    [(header::CONTENT_TYPE, CONTENT_TYPE_JSON)],
                    json,
                )
                    .into_response()
            }
            Err(err) => {
                tracing::error!(error = %err, "response serialization failed");
                reply(StatusCode::INTERNAL_SERVER_ERROR, metrics)
            }
        },
        Ok(None) => reply(StatusCode::OK, metrics),
        Err(err) => {
            match &err {
                DispatchError::Handler(e) => {
                    metrics.handler_errors.inc(&[]);
                    tracing::error!(error = %e, request_type = %env.request.kind, "handler failed");
                }
                other => {
                    let kind = match other {
                        DispatchError::MalformedEnvelope(_) => "malformed_envelope",
                        _ => "malformed_payload",
                    };
                    metrics.dispatch_errors.inc(&[("kind", kind)]);
                    tracing::debug!(error = %other, "rejecting undecodable payload");
                }
            }
            reply(status_for(GateError::from(err).disposition()), metrics)
        }
    }
}

fn status_for(disposition: Disposition) -> StatusCode {
    match disposition {
        Disposition::BadRequest => StatusCode::BAD_REQUEST,
        Disposition::Drop => StatusCode::OK,
        Disposition::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn reply(status: StatusCode, metrics: &SkillMetrics) -> Response {
    metrics.responses.inc(&[("status", status.as_str())]);
    status.into_response()
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> &'a str {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

/// Bounded-cardinality metric label for a discriminant string.
fn kind_label(kind: &str) -> &'static str {
    match RequestKind::from_type(kind) {
        Some(k) => k.as_type(),
        None => "unknown",
    }
}
