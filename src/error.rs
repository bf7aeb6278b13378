//! Error types shared by the review controller, the remote store, and the
//! CLI host.

use thiserror::Error;

/// Broad classification of a [`CatalogError`].
///
/// The controller treats every kind as "leave state unchanged"; the kind only
/// decides how loudly the failure is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Local input was rejected before any request was issued.
    Validation,
    /// The remote store answered with a non-success status.
    RemoteRejected,
    /// The request never produced a usable response.
    Transport,
    /// The user declined a confirmation prompt.
    UserAborted,
    /// Host-side failure (configuration, file access).
    Local,
}

/// Errors surfaced while driving reviews, tables, or the remote store.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// Review text was empty after trimming.
    #[error("review text must not be empty")]
    EmptyText,

    /// The submission did not carry a product identifier.
    #[error("product identifier is required")]
    MissingProductId,

    /// No review with this identifier is displayed.
    #[error("review {review_id} is not displayed")]
    UnknownReview {
        /// Identifier that was looked up.
        review_id: u64,
    },

    /// An operation was requested for a review that is not being edited.
    #[error("review {review_id} is not being edited")]
    NotEditing {
        /// Identifier of the review.
        review_id: u64,
    },

    /// The same request is already waiting for the remote store.
    #[error("{operation} is already in progress")]
    RequestInFlight {
        /// Name of the pending operation.
        operation: String,
    },

    /// A listing query parameter was out of range.
    #[error("invalid listing query: {message}")]
    InvalidQuery {
        /// Description of the invalid parameter.
        message: String,
    },

    /// The remote store returned a non-success status.
    #[error("remote store rejected {operation} with status {status}: {message}")]
    RemoteRejected {
        /// Name of the rejected operation.
        operation: String,
        /// HTTP status code.
        status: u16,
        /// Truncated response body.
        message: String,
    },

    /// Networking failed while calling the remote store.
    #[error("network error talking to the remote store: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// The remote store did not answer within the configured timeout.
    #[error("{operation} timed out after {seconds}s")]
    Timeout {
        /// Name of the operation that timed out.
        operation: String,
        /// Timeout that elapsed, in seconds.
        seconds: u64,
    },

    /// A response body could not be decoded.
    #[error("failed to decode remote store response: {message}")]
    Decode {
        /// Decoder error detail.
        message: String,
    },

    /// The user declined the confirmation prompt.
    #[error("operation cancelled by user")]
    UserAborted,

    /// A URL could not be built or parsed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Configuration could not be loaded.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },
}

impl CatalogError {
    /// Returns the classification of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyText
            | Self::MissingProductId
            | Self::UnknownReview { .. }
            | Self::NotEditing { .. }
            | Self::RequestInFlight { .. }
            | Self::InvalidQuery { .. } => ErrorKind::Validation,
            Self::RemoteRejected { .. } => ErrorKind::RemoteRejected,
            Self::Network { .. } | Self::Timeout { .. } | Self::Decode { .. } => {
                ErrorKind::Transport
            }
            Self::UserAborted => ErrorKind::UserAborted,
            Self::InvalidUrl(_) | Self::Configuration { .. } | Self::Io { .. } => ErrorKind::Local,
        }
    }

    /// Returns the HTTP status for remote rejections.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::RemoteRejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}
