//! Vitrine library crate: client-side interaction core for a product catalog.
//!
//! Two controllers make up the core:
//!
//! - [`review::ReviewListController`] drives the inline review lifecycle
//!   (create, edit, cancel, delete) against a remote [`store::ReviewStore`],
//!   only showing mutations the store has confirmed.
//! - [`table`] sorts and filters a rendered table in place, used for the
//!   log viewer and listing pages.
//!
//! Everything around them, such as confirmation prompts, markdown rendering
//! and listing navigation, is a trait the host implements.

pub mod config;
pub mod error;
pub mod listing;
pub mod logs;
pub mod markup;
pub mod review;
pub mod store;
pub mod table;
pub mod telemetry;

pub use config::{OperationMode, VitrineConfig};
pub use error::{CatalogError, ErrorKind};
pub use listing::{ListingNavigator, ListingQuery, NoopListingNavigator};
pub use logs::LogEntry;
pub use markup::{MarkdownBlock, MarkdownRenderer};
pub use review::{
    AlwaysConfirm, Cmd, Confirm, EditMode, ReviewEditSession, ReviewItem, ReviewListController,
    ReviewMsg, ReviewView, dispatch,
};
pub use store::{HttpReviewStore, HttpReviewStoreConfig, NewReview, Review, ReviewStore};
pub use table::{ColumnSorter, ElementRef, Row, RowFilter, SortState, Table};
pub use telemetry::{NoopTelemetrySink, StderrJsonlTelemetrySink, TelemetryEvent, TelemetrySink};
