//! Tracking identifier normalization.
//!
//! Callers dictate tracking ids over voice, so the raw value arrives with
//! arbitrary spacing, punctuation, and casing ("ab-123 cd"). Lookups run
//! against the canonical form only.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Normalized delivery tracking identifier.
///
/// The canonical form keeps only ASCII letters and digits, uppercased.
/// Construction goes through [`TrackingId::normalize`]; a value of this type
/// is always non-empty and already canonical.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackingId(String);

impl TrackingId {
    /// Normalizes a raw user-supplied tracking id.
    ///
    /// Strips every character outside `[A-Za-z0-9]` and uppercases the
    /// remainder. Returns `None` when nothing is left, which downstream
    /// means no lookup is possible.
    pub fn normalize(raw: &str) -> Option<Self> {
        let normalized: String = raw
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_uppercase())
            .collect();

        if normalized.is_empty() {
            None
        } else {
            Some(Self(normalized))
        }
    }

    /// Returns the canonical id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
