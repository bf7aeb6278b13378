//! Plain-text rendering of a table's visible rows.
//!
//! Columns are padded to their widest visible cell using terminal display
//! width, so wide characters line up. The sorted column carries a `^`
//! (ascending) or `v` (descending) marker in the header.

use unicode_width::UnicodeWidthStr;

use super::{Row, SortState, Table};

const COLUMN_GAP: &str = "  ";

/// Renders the header, a rule, and every visible data row.
///
/// Each line ends with a newline. Trailing padding is trimmed.
#[must_use]
pub fn render_table(table: &Table) -> String {
    let header = header_cells(table);
    let visible: Vec<&Row> = table.visible_rows().collect();
    let widths = column_widths(&header, &visible);

    let mut output = String::new();
    push_line(&mut output, header.iter().map(String::as_str), &widths);
    let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    push_line(&mut output, rule.iter().map(String::as_str), &widths);
    for row in visible {
        push_line(&mut output, row.cells().iter().map(String::as_str), &widths);
    }
    output
}

fn header_cells(table: &Table) -> Vec<String> {
    table
        .header()
        .cells()
        .iter()
        .enumerate()
        .map(|(index, cell)| match (table.sort_column(), table.sort_state()) {
            (Some(column), SortState::Ascending) if column == index => format!("{cell} ^"),
            (Some(column), SortState::Descending) if column == index => format!("{cell} v"),
            _ => cell.clone(),
        })
        .collect()
}

fn column_widths(header: &[String], rows: &[&Row]) -> Vec<usize> {
    let mut widths: Vec<usize> = header.iter().map(|cell| cell.width()).collect();
    for row in rows {
        for (index, cell) in row.cells().iter().enumerate() {
            let cell_width = cell.width();
            match widths.get_mut(index) {
                Some(width) => *width = (*width).max(cell_width),
                None => widths.push(cell_width),
            }
        }
    }
    widths
}

fn push_line<'a>(output: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let mut line = String::new();
    for (index, cell) in cells.enumerate() {
        if index > 0 {
            line.push_str(COLUMN_GAP);
        }
        line.push_str(cell);
        let width = widths.get(index).copied().unwrap_or(0);
        line.push_str(&" ".repeat(width.saturating_sub(cell.width())));
    }
    output.push_str(line.trim_end());
    output.push('\n');
}
