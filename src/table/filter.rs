//! Case-insensitive substring filtering of table rows.

use super::{Row, Table};

/// Shows data rows whose text contains the query and hides the rest.
#[derive(Debug, Clone, Copy, Default)]
pub struct RowFilter;

impl RowFilter {
    /// Applies `query` to every data row of `table`.
    ///
    /// The query is trimmed and compared case-insensitively; a missing or
    /// empty query shows every row. Only visibility changes: row order and
    /// the header are left alone.
    pub fn apply(table: &mut Table, query: Option<&str>) {
        let needle = normalise_query(query);
        for row in table.rows_mut() {
            let visible = Self::matches(row, &needle);
            row.set_visible(visible);
        }
    }

    /// Returns whether `row` matches an already normalised needle.
    #[must_use]
    pub fn matches(row: &Row, needle: &str) -> bool {
        needle.is_empty() || row.text().to_lowercase().contains(needle)
    }
}

fn normalise_query(query: Option<&str>) -> String {
    query.unwrap_or_default().trim().to_lowercase()
}
