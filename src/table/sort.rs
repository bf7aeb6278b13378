//! Toggling column sort over a table's data rows.

use std::cmp::Reverse;

use super::collation::CollationKey;
use super::{Row, SortState, Table};

/// Reorders data rows by one column, alternating direction on each call.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColumnSorter;

impl ColumnSorter {
    /// Sorts the data rows of `table` by `column` and flips the direction.
    ///
    /// The new direction is ascending unless the table was last sorted
    /// ascending. Keys are the trimmed cell text compared with
    /// [`collation::compare`](super::collation::compare); rows without the
    /// column sort as empty text. The sort is stable so equal keys keep
    /// their previous relative order, in both directions.
    ///
    /// Returns the direction that was applied.
    pub fn apply(table: &mut Table, column: usize) -> SortState {
        let direction = table.sort_state().toggled();
        let rows = table.rows_mut();

        match direction {
            SortState::Descending => {
                rows.sort_by_cached_key(|row| Reverse(CollationKey::new(sort_text(row, column))));
            }
            SortState::Ascending | SortState::Unsorted => {
                rows.sort_by_cached_key(|row| CollationKey::new(sort_text(row, column)));
            }
        }

        table.record_sort(direction, column);
        tracing::debug!(column, ?direction, "table sorted");
        direction
    }
}

fn sort_text(row: &Row, column: usize) -> &str {
    row.cell(column).map_or("", str::trim)
}
