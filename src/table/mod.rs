//! Client-side table view state with column sorting and row filtering.
//!
//! A [`Table`] holds a header row and its data rows. The header is stored
//! apart from the data rows, so neither [`ColumnSorter`] nor [`RowFilter`]
//! can reorder or hide it.
//!
//! # Modules
//!
//! - [`collation`]: locale-aware string ordering
//! - [`render`]: plain-text rendering of the visible rows

pub mod collation;
mod filter;
pub mod render;
mod sort;

pub use filter::RowFilter;
pub use sort::ColumnSorter;

/// Opaque handle to the display element backing a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementRef(u64);

impl ElementRef {
    /// Returns the raw handle value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Sort direction persisted on a table.
///
/// The direction is shared by every column of the table: sorting a
/// different column toggles relative to the last direction used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortState {
    /// The table has not been sorted yet.
    #[default]
    Unsorted,
    /// Rows are in ascending order of the sort column.
    Ascending,
    /// Rows are in descending order of the sort column.
    Descending,
}

impl SortState {
    /// Returns the direction the next sort applies.
    ///
    /// Anything other than ascending becomes ascending, so the first sort of
    /// a table is always ascending.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Unsorted | Self::Descending => Self::Ascending,
        }
    }
}

/// One renderable record of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    cells: Vec<String>,
    element: ElementRef,
    visible: bool,
}

impl Row {
    /// Returns the cell values in column order.
    #[must_use]
    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    /// Returns the value of a cell, if the row has that column.
    #[must_use]
    pub fn cell(&self, column: usize) -> Option<&str> {
        self.cells.get(column).map(String::as_str)
    }

    /// Returns the handle of the display element backing this row.
    #[must_use]
    pub const fn element(&self) -> ElementRef {
        self.element
    }

    /// Returns whether the row is currently shown.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Returns the concatenated visible text of the row.
    ///
    /// Cells are separated by a tab, mirroring how a rendered table row
    /// reports its text.
    #[must_use]
    pub fn text(&self) -> String {
        self.cells.join("\t")
    }

    pub(crate) const fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

/// A header row, ordered data rows, and the table-global sort state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    header: Row,
    rows: Vec<Row>,
    sort_state: SortState,
    sort_column: Option<usize>,
    next_element: u64,
}

impl Table {
    /// Creates an empty table with the given header cells.
    #[must_use]
    pub fn new<I, S>(header: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            header: Row {
                cells: header.into_iter().map(Into::into).collect(),
                element: ElementRef(0),
                visible: true,
            },
            rows: Vec::new(),
            sort_state: SortState::Unsorted,
            sort_column: None,
            next_element: 1,
        }
    }

    /// Creates a table from a header and data rows.
    #[must_use]
    pub fn from_rows<H, HS, R, C, CS>(header: H, rows: R) -> Self
    where
        H: IntoIterator<Item = HS>,
        HS: Into<String>,
        R: IntoIterator<Item = C>,
        C: IntoIterator<Item = CS>,
        CS: Into<String>,
    {
        let mut table = Self::new(header);
        for row in rows {
            table.push_row(row);
        }
        table
    }

    /// Appends a visible data row and returns its element handle.
    pub fn push_row<I, S>(&mut self, cells: I) -> ElementRef
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let element = ElementRef(self.next_element);
        self.next_element = self.next_element.saturating_add(1);
        self.rows.push(Row {
            cells: cells.into_iter().map(Into::into).collect(),
            element,
            visible: true,
        });
        element
    }

    /// Returns the header row.
    #[must_use]
    pub const fn header(&self) -> &Row {
        &self.header
    }

    /// Returns the data rows in display order, hidden rows included.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Returns the data rows that are currently shown.
    pub fn visible_rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter().filter(|row| row.is_visible())
    }

    /// Returns the number of columns in the header.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.header.cells.len()
    }

    /// Returns the direction applied by the last sort.
    #[must_use]
    pub const fn sort_state(&self) -> SortState {
        self.sort_state
    }

    /// Returns the column used by the last sort.
    #[must_use]
    pub const fn sort_column(&self) -> Option<usize> {
        self.sort_column
    }

    pub(crate) fn rows_mut(&mut self) -> &mut [Row] {
        &mut self.rows
    }

    pub(crate) const fn record_sort(&mut self, state: SortState, column: usize) {
        self.sort_state = state;
        self.sort_column = Some(column);
    }
}
