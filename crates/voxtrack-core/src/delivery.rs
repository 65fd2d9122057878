//! Delivery record model as projected from the content store.

use serde::{Deserialize, Serialize};

/// A delivery record in the store's wire form.
///
/// Field names mirror the fixed query projection, a mix of snake and camel
/// case the store contract pins down. Values pass through verbatim; nothing
/// here validates or reinterprets what the store returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryRecord {
    /// Canonical tracking number stored with the record.
    #[serde(default)]
    pub tracking_id: String,
    /// Free-form fulfillment status, e.g. "in transit".
    #[serde(default)]
    pub status: String,
    /// Recipient name on the delivery.
    #[serde(default, rename = "customerName")]
    pub customer_name: String,
    /// Recipient contact phone number.
    #[serde(default, rename = "customerPhone")]
    pub customer_phone: String,
    /// Expected delivery time, when the store has one.
    #[serde(default, rename = "estimatedDelivery", skip_serializing_if = "Option::is_none")]
    pub estimated_delivery: Option<String>,
    /// Exception or delay note attached to the delivery, when present.
    #[serde(default, rename = "issueMessage", skip_serializing_if = "Option::is_none")]
    pub issue_message: Option<String>,
}

impl DeliveryRecord {
    /// Builds the sentence the voice assistant reads back to the caller.
    ///
    /// Always names the customer, phone, and status. Estimated delivery and
    /// issue text are appended only when the record carries them.
    pub fn spoken_summary(&self) -> String {
        let mut summary = format!(
            "Delivery {} for {} (phone {}) is currently {}.",
            self.tracking_id, self.customer_name, self.customer_phone, self.status
        );

        if let Some(eta) = &self.estimated_delivery {
            summary.push_str(&format!(" Estimated delivery: {eta}."));
        }
        if let Some(issue) = &self.issue_message {
            summary.push_str(&format!(" Please note: {issue}"));
        }

        summary
    }
}
