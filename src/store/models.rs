//! Review records exchanged with the remote store.

use serde::{Deserialize, Serialize};

/// A review as accepted by the remote store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    /// Server-assigned identifier.
    pub id: u64,
    /// Trimmed, non-empty review text.
    pub text: String,
    /// Product the review belongs to.
    pub product_id: u64,
}

/// A review submission that has not been assigned an identifier yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    /// Product the review is attached to.
    pub product_id: u64,
    /// Trimmed, non-empty review text.
    pub text: String,
}
