//! Voice-platform tool-call envelope and output shaping.
//!
//! Models the webhook payload the voice platform posts when the assistant
//! invokes a server tool, and the batch output objects it expects back.
//! Every output is unified around the three-field
//! `{status, message, deliveryDetails}` form.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::DeliveryRecord;

/// `message.type` value that carries tool invocations.
pub const TOOL_CALLS_MESSAGE_TYPE: &str = "tool-calls";

/// Tool-call `type` for function invocations.
pub const FUNCTION_CALL_TYPE: &str = "function";

/// Function name this service answers.
pub const DELIVERY_TRACKER_FUNCTION: &str = "delivery_tracker";

/// Top-level webhook payload from the voice platform.
///
/// The platform posts many message kinds to the same webhook; only
/// tool-call messages are relevant here, everything else is acknowledged
/// as ignored.
#[derive(Debug, Deserialize)]
pub struct WebhookEnvelope {
    /// Conversation message that triggered the webhook.
    #[serde(default)]
    pub message: Option<ToolCallMessage>,
}

/// The `message` object of a webhook payload.
#[derive(Debug, Deserialize)]
pub struct ToolCallMessage {
    /// Message kind, `"tool-calls"` for tool invocations.
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    /// Tool invocations carried by this message.
    #[serde(default, rename = "toolCalls")]
    pub tool_calls: Vec<ToolCall>,
}

/// A single tool invocation embedded in a webhook.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolCall {
    /// Opaque call identifier. Outputs are correlated by this id; a call
    /// without one cannot be answered at all.
    #[serde(default)]
    pub id: Option<String>,
    /// Call kind, `"function"` for function invocations.
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    /// The invoked function, when the call carries one.
    #[serde(default)]
    pub function: Option<FunctionCall>,
}

impl ToolCall {
    /// Whether this call targets the delivery-tracker function.
    pub fn is_delivery_tracker(&self) -> bool {
        self.kind.as_deref() == Some(FUNCTION_CALL_TYPE)
            && self.function.as_ref().is_some_and(|f| f.name == DELIVERY_TRACKER_FUNCTION)
    }
}

/// Named function plus arguments inside a tool call.
#[derive(Debug, Clone, Deserialize)]
pub struct FunctionCall {
    /// Function name the assistant invoked.
    pub name: String,
    /// Arguments object, or a JSON string needing one decode step.
    #[serde(default)]
    pub arguments: Option<Value>,
}

impl FunctionCall {
    /// Resolves the arguments to a JSON value.
    ///
    /// The platform sends arguments either as a structured object or as a
    /// serialized string. A string gets exactly one decode; the decode
    /// failure is surfaced so the caller can report it instead of silently
    /// dropping the call.
    pub fn resolved_arguments(&self) -> Result<Value, serde_json::Error> {
        match &self.arguments {
            None => Ok(Value::Object(serde_json::Map::new())),
            Some(Value::String(raw)) => serde_json::from_str(raw),
            Some(other) => Ok(other.clone()),
        }
    }
}

/// One entry of the batch response returned to the voice platform.
#[derive(Debug, Serialize)]
pub struct ToolOutput {
    /// Id of the tool call this output answers.
    pub tool_call_id: String,
    /// Payload the assistant speaks back.
    pub output: OutputPayload,
}

/// Outcome of answering one tool call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputStatus {
    /// A delivery record was found.
    Success,
    /// No record matched the tracking id (or the store was unreachable).
    NotFound,
    /// The call itself was unanswerable, e.g. missing or undecodable
    /// arguments.
    Error,
}

/// Output payload spoken back by the assistant.
#[derive(Debug, Serialize)]
pub struct OutputPayload {
    /// Outcome of the lookup.
    pub status: OutputStatus,
    /// Natural-language sentence for the assistant to read.
    pub message: String,
    /// The matched record, present only on success.
    #[serde(rename = "deliveryDetails", skip_serializing_if = "Option::is_none")]
    pub delivery_details: Option<DeliveryRecord>,
}

impl OutputPayload {
    /// Success payload built from the matched record.
    pub fn success(record: DeliveryRecord) -> Self {
        Self {
            status: OutputStatus::Success,
            message: record.spoken_summary(),
            delivery_details: Some(record),
        }
    }

    /// No record matched; the message embeds the id the caller supplied.
    pub fn not_found(raw_tracking_id: &str) -> Self {
        Self {
            status: OutputStatus::NotFound,
            message: format!("No delivery found for tracking ID: {raw_tracking_id}"),
            delivery_details: None,
        }
    }

    /// The call could not be answered.
    pub fn error(message: impl Into<String>) -> Self {
        Self { status: OutputStatus::Error, message: message.into(), delivery_details: None }
    }
}
