//! Core domain types for the delivery lookup service.
//!
//! Provides the voice-platform tool-call envelope model, tracking-id
//! normalization, and the delivery record shape returned by the content
//! store. All other crates depend on these foundational types.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod delivery;
pub mod toolcall;
pub mod tracking;

pub use delivery::DeliveryRecord;
pub use toolcall::{
    FunctionCall, OutputPayload, OutputStatus, ToolCall, ToolCallMessage, ToolOutput,
    WebhookEnvelope, DELIVERY_TRACKER_FUNCTION, FUNCTION_CALL_TYPE, TOOL_CALLS_MESSAGE_TYPE,
};
pub use tracking::TrackingId;
