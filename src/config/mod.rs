//! Application configuration loaded from CLI, environment, and files.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.vitrine.toml` in current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `VITRINE_BASE_URL`, `VITRINE_PRODUCT_ID`,
//!    and so on
//! 4. **Command-line arguments** – `--base-url`/`-b`, `--product-id`/`-p`, …
//!
//! # Configuration File
//!
//! ```toml
//! base_url = "http://127.0.0.1:5000"
//! request_timeout_seconds = 10
//! per_page = 5
//! ```

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::listing::ListingQuery;
use crate::logs::DEFAULT_LOG_LIMIT;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 10;
const DEFAULT_REVIEWS_PATH: &str = "product/{product_id}/reviews";
const DEFAULT_PAGE: u32 = 1;
const DEFAULT_PER_PAGE: u32 = 5;

/// Operation mode determined by CLI arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationMode {
    /// Render a log export as a sortable, filterable table.
    ViewLogs,
    /// Submit a new review.
    AddReview,
    /// Replace the text of an existing review.
    EditReview,
    /// Delete a review.
    DeleteReview,
    /// Delete a product.
    DeleteProduct,
    /// Not enough arguments to pick an operation.
    Usage,
}

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Example
///
/// ```no_run
/// use ortho_config::OrthoConfig;
/// use vitrine::VitrineConfig;
///
/// let config = VitrineConfig::load().expect("failed to load configuration");
/// let mode = config.operation_mode();
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "VITRINE",
    discovery(
        dotfile_name = ".vitrine.toml",
        config_file_name = "vitrine.toml",
        app_name = "vitrine"
    )
)]
pub struct VitrineConfig {
    /// Base URL of the catalog service.
    ///
    /// Can be provided via:
    /// - CLI: `--base-url <URL>` or `-b <URL>`
    /// - Environment: `VITRINE_BASE_URL`
    /// - Config file: `base_url = "..."`
    #[ortho_config(cli_short = 'b')]
    pub base_url: String,

    /// Bound on every remote call, in seconds.
    ///
    /// Defaults to 10 seconds.
    #[ortho_config(cli_short = 'T')]
    pub request_timeout_seconds: u64,

    /// Path of the review listing endpoint; `{product_id}` is substituted.
    #[ortho_config(cli_short = 'R')]
    pub reviews_path: String,

    /// Product the operation applies to.
    #[ortho_config(cli_short = 'p')]
    pub product_id: Option<u64>,

    /// Review the operation applies to.
    #[ortho_config(cli_short = 'r')]
    pub review_id: Option<u64>,

    /// Review text to submit or save.
    #[ortho_config(cli_short = 'm')]
    pub review_text: Option<String>,

    /// Deletes the selected review, or the product when no review is given.
    ///
    /// Note: `ortho_config` does not load boolean values from the
    /// environment, so this is CLI or config file only.
    #[ortho_config(cli_short = 'd')]
    pub delete: bool,

    /// Skips the interactive confirmation before deleting.
    #[ortho_config(cli_short = 'y')]
    pub assume_yes: bool,

    /// Emits telemetry events to stderr as JSON lines.
    #[ortho_config()]
    pub telemetry: bool,

    /// Log export (JSON array or JSON Lines) to display.
    #[ortho_config(cli_short = 'l')]
    pub logs_file: Option<String>,

    /// Maximum number of log entries shown, newest first.
    #[ortho_config()]
    pub log_limit: usize,

    /// Zero-based column to sort the log table by.
    #[ortho_config(cli_short = 's')]
    pub sort_column: Option<usize>,

    /// Sorts the same column a second time, giving descending order.
    #[ortho_config()]
    pub descending: bool,

    /// Case-insensitive substring filter for the log table.
    #[ortho_config(cli_short = 'f')]
    pub filter: Option<String>,

    /// Listing page the user is on; forwarded with product deletion.
    #[ortho_config()]
    pub page: u32,

    /// Listing page size; forwarded with product deletion.
    #[ortho_config()]
    pub per_page: u32,

    /// Listing search term; forwarded with product deletion.
    #[ortho_config(cli_short = 'q')]
    pub query: Option<String>,
}

impl Default for VitrineConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            request_timeout_seconds: DEFAULT_REQUEST_TIMEOUT_SECONDS,
            reviews_path: DEFAULT_REVIEWS_PATH.to_owned(),
            product_id: None,
            review_id: None,
            review_text: None,
            delete: false,
            assume_yes: false,
            telemetry: false,
            logs_file: None,
            log_limit: DEFAULT_LOG_LIMIT,
            sort_column: None,
            descending: false,
            filter: None,
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
            query: None,
        }
    }
}

impl VitrineConfig {
    /// Determines the operation mode based on provided configuration.
    ///
    /// A log export wins over every review operation. With a review
    /// identifier, `delete` selects deletion and review text selects an
    /// edit; with only a product identifier, `delete` deletes the product.
    /// Review text on its own submits a new review.
    #[must_use]
    pub const fn operation_mode(&self) -> OperationMode {
        if self.logs_file.is_some() {
            OperationMode::ViewLogs
        } else if self.review_id.is_some() && self.delete {
            OperationMode::DeleteReview
        } else if self.review_id.is_some() && self.review_text.is_some() {
            OperationMode::EditReview
        } else if self.product_id.is_some() && self.delete {
            OperationMode::DeleteProduct
        } else if self.review_text.is_some() {
            OperationMode::AddReview
        } else {
            OperationMode::Usage
        }
    }

    /// Checks that the configured values are consistent.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Configuration`] when the timeout is zero or
    /// when `delete` is combined with review text.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.request_timeout_seconds == 0 {
            return Err(CatalogError::Configuration {
                message: "request_timeout_seconds must be at least 1".to_owned(),
            });
        }
        if self.delete && self.review_text.is_some() {
            return Err(CatalogError::Configuration {
                message: "--delete cannot be combined with --review-text".to_owned(),
            });
        }
        Ok(())
    }

    /// Returns the bound on every remote call.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    /// Returns the listing query the user is on.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidQuery`] when `page` or `per_page` is zero.
    pub fn listing_query(&self) -> Result<ListingQuery, CatalogError> {
        ListingQuery::new(
            self.page,
            self.per_page,
            self.query.clone().unwrap_or_default(),
        )
    }

    /// Returns the product identifier or an error if missing.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::MissingProductId`] when no product is configured.
    pub const fn require_product_id(&self) -> Result<u64, CatalogError> {
        match self.product_id {
            Some(product_id) => Ok(product_id),
            None => Err(CatalogError::MissingProductId),
        }
    }

    /// Returns the review identifier or an error if missing.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Configuration`] when no review is configured.
    pub fn require_review_id(&self) -> Result<u64, CatalogError> {
        self.review_id.ok_or_else(|| CatalogError::Configuration {
            message: "review identifier is required (use --review-id or -r)".to_owned(),
        })
    }

    /// Returns the review text or an error if missing.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Configuration`] when no text is configured.
    pub fn require_review_text(&self) -> Result<&str, CatalogError> {
        self.review_text
            .as_deref()
            .ok_or_else(|| CatalogError::Configuration {
                message: "review text is required (use --review-text or -m)".to_owned(),
            })
    }
}

#[cfg(test)]
mod tests;
