//! Log viewer operation.

use std::io::{self, Write};

use camino::Utf8Path;
use tracing::debug;
use vitrine::logs::{latest, load_log_export, log_table};
use vitrine::{CatalogError, ColumnSorter, RowFilter, Table, VitrineConfig};

use super::output::{io_error, write_table};

/// Renders the configured log export to stdout.
///
/// # Errors
///
/// Returns [`CatalogError::Configuration`] when no export or an unknown
/// sort column is configured, or the error from loading the export.
pub fn run(config: &VitrineConfig) -> Result<(), CatalogError> {
    let path = config
        .logs_file
        .as_deref()
        .ok_or_else(|| CatalogError::Configuration {
            message: "log export is required (use --logs-file or -l)".to_owned(),
        })?;

    let entries = latest(load_log_export(Utf8Path::new(path))?, config.log_limit);
    debug!(path, count = entries.len(), "loaded log export");

    let mut table = log_table(&entries);
    apply_view(&mut table, config)?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_table(&mut handle, &table)?;
    handle.flush().map_err(|error| io_error(&error))
}

fn apply_view(table: &mut Table, config: &VitrineConfig) -> Result<(), CatalogError> {
    if let Some(column) = config.sort_column {
        if column >= table.column_count() {
            return Err(CatalogError::Configuration {
                message: format!(
                    "sort column {column} is out of range (table has {} columns)",
                    table.column_count()
                ),
            });
        }
        ColumnSorter::apply(table, column);
        if config.descending {
            ColumnSorter::apply(table, column);
        }
    }
    RowFilter::apply(table, config.filter.as_deref());
    Ok(())
}
