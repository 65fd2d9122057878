//! Tool-call webhook dispatcher.
//!
//! Receives the voice platform's webhook envelope, answers
//! `delivery_tracker` invocations by querying the content store, and returns
//! one output per answerable call as a JSON array. Failures are scoped:
//! a bad call yields an error-shaped output for that call only, sibling
//! calls in the batch are unaffected.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde_json::{json, Value};
use tracing::{debug, info, instrument, warn};
use voxtrack_core::{
    OutputPayload, ToolCall, ToolOutput, TrackingId, WebhookEnvelope, TOOL_CALLS_MESSAGE_TYPE,
};

use crate::server::AppState;

/// Handles `POST /webhook`.
///
/// The body is read raw and parsed by hand: a malformed top-level payload
/// must surface as HTTP 500 with the parse error in the detail, not as an
/// extractor rejection.
#[instrument(name = "handle_webhook", skip(state, body), fields(body_bytes = body.len()))]
pub async fn handle_webhook(State(state): State<AppState>, body: Bytes) -> Response {
    let envelope: WebhookEnvelope = match serde_json::from_slice(&body) {
        Ok(envelope) => envelope,
        Err(e) => {
            warn!(error = %e, "request body is not a valid webhook payload");
            return internal_error(&e.to_string());
        },
    };

    let Some(message) = envelope.message else {
        debug!("payload has no message, ignoring");
        return ignored();
    };
    if message.kind.as_deref() != Some(TOOL_CALLS_MESSAGE_TYPE) {
        debug!(kind = ?message.kind, "not a tool-calls message, ignoring");
        return ignored();
    }

    let mut outputs = Vec::new();
    for call in &message.tool_calls {
        if let Some(output) = answer_tool_call(&state, call).await {
            outputs.push(output);
        }
    }

    if outputs.is_empty() {
        debug!("no answerable tool calls in batch, ignoring");
        return ignored();
    }

    info!(outputs = outputs.len(), "answering tool calls");
    (StatusCode::OK, Json(outputs)).into_response()
}

/// Answers one tool call, or returns `None` when the call is not ours to
/// answer: wrong call type or function name, or no id to correlate an
/// output with.
async fn answer_tool_call(state: &AppState, call: &ToolCall) -> Option<ToolOutput> {
    if !call.is_delivery_tracker() {
        debug!(id = ?call.id, "skipping call for another function");
        return None;
    }

    let Some(id) = call.id.as_deref().filter(|id| !id.is_empty()) else {
        warn!("skipping delivery_tracker call without an id");
        return None;
    };

    let output = build_output(state, call).await;
    Some(ToolOutput { tool_call_id: id.to_string(), output })
}

/// Produces the output payload for one delivery-tracker call.
///
/// Every failure past this point is shaped as an error output rather than
/// propagated, keeping the rest of the batch intact.
async fn build_output(state: &AppState, call: &ToolCall) -> OutputPayload {
    let Some(function) = &call.function else {
        return OutputPayload::error("Tool call has no function body.");
    };

    let arguments = match function.resolved_arguments() {
        Ok(arguments) => arguments,
        Err(e) => {
            warn!(error = %e, "could not decode tool-call arguments");
            return OutputPayload::error(format!("Could not decode tool arguments: {e}"));
        },
    };

    let raw_id =
        arguments.get("tracking_id").and_then(Value::as_str).map(str::trim).unwrap_or_default();
    if raw_id.is_empty() {
        warn!("tracking_id missing from tool arguments");
        return OutputPayload::error("Tracking ID is missing.");
    }

    // Symbols-only input has no normalized form; nothing to query.
    let Some(tracking_id) = TrackingId::normalize(raw_id) else {
        debug!(raw_id, "tracking id empty after normalization");
        return OutputPayload::not_found(raw_id);
    };

    let deliveries = state.lookup.find_deliveries(&tracking_id).await;
    match deliveries.into_iter().next() {
        // First record wins; order is whatever the store returned.
        Some(record) => OutputPayload::success(record),
        None => OutputPayload::not_found(raw_id),
    }
}

/// Acknowledgment for traffic this service does not handle.
fn ignored() -> Response {
    (StatusCode::OK, Json(json!({ "status": "ignored", "reason": "Not a relevant tool-call." })))
        .into_response()
}

/// Fixed 500 shape for failures before the per-call loop.
fn internal_error(detail: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "detail": format!("Internal Server Error: {detail}") })),
    )
        .into_response()
}
