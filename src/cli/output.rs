//! Output formatting for CLI operation modes.

use std::io::{self, Write};

use vitrine::table::render::render_table;
use vitrine::{CatalogError, ReviewItem, Table};

/// Writes one line per displayed review, in display order.
///
/// # Errors
///
/// Returns [`CatalogError::Io`] if writing fails.
pub fn write_reviews<W: Write>(writer: &mut W, items: &[ReviewItem]) -> Result<(), CatalogError> {
    if items.is_empty() {
        return writeln!(writer, "No reviews.").map_err(|error| io_error(&error));
    }
    for item in items {
        writeln!(writer, "#{} {}", item.id(), item.display()).map_err(|error| io_error(&error))?;
    }
    Ok(())
}

/// Writes the visible rows of `table`.
///
/// # Errors
///
/// Returns [`CatalogError::Io`] if writing fails.
pub fn write_table<W: Write>(writer: &mut W, table: &Table) -> Result<(), CatalogError> {
    writer
        .write_all(render_table(table).as_bytes())
        .map_err(|error| io_error(&error))
}

/// Writes a single status line.
///
/// # Errors
///
/// Returns [`CatalogError::Io`] if writing fails.
pub fn write_status<W: Write>(writer: &mut W, message: &str) -> Result<(), CatalogError> {
    writeln!(writer, "{message}").map_err(|error| io_error(&error))
}

/// Converts an I/O error to an [`CatalogError::Io`].
pub(crate) fn io_error(error: &io::Error) -> CatalogError {
    CatalogError::Io {
        message: error.to_string(),
    }
}
