//! Operational log entries and their table view.
//!
//! The log repository exports entries either as a JSON array or as JSON
//! Lines, with timestamps formatted as `YYYY-MM-DD HH:MM:SS`. The viewer
//! shows the newest entries first, capped at [`DEFAULT_LOG_LIMIT`].

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CatalogError;
use crate::table::Table;

/// Number of entries the log viewer shows.
pub const DEFAULT_LOG_LIMIT: usize = 500;

/// Timestamp format used by log exports.
pub const LOG_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Column headers of the log table.
pub const LOG_COLUMNS: [&str; 4] = ["ID", "Action", "Details", "Time"];

/// One recorded application event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Repository-assigned identifier.
    pub id: u64,
    /// Short event name, such as `review_added`.
    pub action: String,
    /// Free-form event detail.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub details: String,
    /// When the event was recorded.
    #[serde(
        serialize_with = "serialize_timestamp",
        deserialize_with = "deserialize_timestamp"
    )]
    pub created_at: NaiveDateTime,
}

impl LogEntry {
    /// Returns the table cells for this entry, in [`LOG_COLUMNS`] order.
    #[must_use]
    pub fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.action.clone(),
            self.details.clone(),
            self.created_at.format(LOG_TIME_FORMAT).to_string(),
        ]
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn serialize_timestamp<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&value.format(LOG_TIME_FORMAT))
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    NaiveDateTime::parse_from_str(raw.trim(), LOG_TIME_FORMAT).map_err(serde::de::Error::custom)
}

/// Parses a log export in JSON array or JSON Lines form.
///
/// # Errors
///
/// Returns [`CatalogError::Decode`] naming the offending line when an entry
/// does not parse.
pub fn parse_log_export(content: &str) -> Result<Vec<LogEntry>, CatalogError> {
    if content.trim_start().starts_with('[') {
        return serde_json::from_str(content).map_err(|error| CatalogError::Decode {
            message: format!("log export: {error}"),
        });
    }

    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str(line).map_err(|error| CatalogError::Decode {
                message: format!("log export line {}: {error}", index.saturating_add(1)),
            })
        })
        .collect()
}

/// Reads and parses the log export at `path`.
///
/// # Errors
///
/// Returns [`CatalogError::Io`] when the file cannot be read, or the
/// [`parse_log_export`] error.
pub fn load_log_export(path: &Utf8Path) -> Result<Vec<LogEntry>, CatalogError> {
    let file_name = path.file_name().ok_or_else(|| CatalogError::Io {
        message: format!("log export path '{path}' has no file name"),
    })?;
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };

    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(|error| {
        CatalogError::Io {
            message: format!("failed to open log directory '{parent}': {error}"),
        }
    })?;
    let content = dir
        .read_to_string(file_name)
        .map_err(|error| CatalogError::Io {
            message: format!("failed to read log export '{path}': {error}"),
        })?;

    parse_log_export(&content)
}

/// Orders entries newest first and keeps at most `limit` of them.
///
/// Entries with the same timestamp keep their export order.
#[must_use]
pub fn latest(mut entries: Vec<LogEntry>, limit: usize) -> Vec<LogEntry> {
    entries.sort_by(|left, right| right.created_at.cmp(&left.created_at));
    entries.truncate(limit);
    entries
}

/// Builds the log table shown by the viewer.
#[must_use]
pub fn log_table(entries: &[LogEntry]) -> Table {
    Table::from_rows(LOG_COLUMNS, entries.iter().map(LogEntry::cells))
}

#[cfg(test)]
mod tests {
    use camino::Utf8PathBuf;
    use cap_std::ambient_authority;
    use cap_std::fs_utf8::Dir;
    use chrono::NaiveDate;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    use super::{LogEntry, latest, load_log_export, log_table, parse_log_export};
    use crate::error::CatalogError;

    fn entry(id: u64, action: &str, time: (u32, u32)) -> LogEntry {
        let created_at = NaiveDate::from_ymd_opt(2024, 5, 1)
            .and_then(|date| date.and_hms_opt(time.0, time.1, 0))
            .expect("timestamp should be valid");
        LogEntry {
            id,
            action: action.to_owned(),
            details: String::new(),
            created_at,
        }
    }

    #[fixture]
    fn temp_dir() -> TempDir {
        TempDir::new().expect("temp dir should be created")
    }

    #[test]
    fn parses_json_array_exports() {
        let content = r#"[
            {"id": 1, "action": "review_added", "details": "product 3", "created_at": "2024-05-01 09:30:00"}
        ]"#;

        let entries = parse_log_export(content).expect("export should parse");

        assert_eq!(entries.len(), 1);
        assert_eq!(
            entries.first().map(LogEntry::cells),
            Some(vec![
                "1".to_owned(),
                "review_added".to_owned(),
                "product 3".to_owned(),
                "2024-05-01 09:30:00".to_owned(),
            ])
        );
    }

    #[test]
    fn parses_json_lines_with_missing_details() {
        let content = concat!(
            "{\"id\": 1, \"action\": \"login\", \"created_at\": \"2024-05-01 09:30:00\"}\n",
            "\n",
            "{\"id\": 2, \"action\": \"logout\", \"details\": null, \"created_at\": \"2024-05-01 10:00:00\"}\n",
        );

        let entries = parse_log_export(content).expect("export should parse");

        assert_eq!(entries, vec![entry(1, "login", (9, 30)), entry(2, "logout", (10, 0))]);
    }

    #[test]
    fn reports_the_line_that_failed() {
        let content = concat!(
            "{\"id\": 1, \"action\": \"login\", \"created_at\": \"2024-05-01 09:30:00\"}\n",
            "{\"id\": 2, \"action\": \"logout\", \"created_at\": \"yesterday\"}\n",
        );

        let result = parse_log_export(content);

        assert!(
            matches!(&result, Err(CatalogError::Decode { message }) if message.contains("line 2")),
            "expected decode failure on line 2, got {result:?}"
        );
    }

    #[test]
    fn latest_orders_newest_first_and_caps() {
        let entries = vec![
            entry(1, "a", (9, 0)),
            entry(2, "b", (11, 0)),
            entry(3, "c", (10, 0)),
        ];

        let ids: Vec<u64> = latest(entries, 2).iter().map(|log| log.id).collect();

        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn log_table_uses_fixed_columns() {
        let table = log_table(&[entry(7, "review_deleted", (8, 5))]);

        assert_eq!(table.header().cells(), ["ID", "Action", "Details", "Time"]);
        assert_eq!(table.rows().len(), 1);
        assert_eq!(
            table.rows().first().map(crate::table::Row::text),
            Some("7\treview_deleted\t\t2024-05-01 08:05:00".to_owned())
        );
    }

    #[rstest]
    fn loads_export_from_disk(temp_dir: TempDir) {
        let dir_path = Utf8PathBuf::from_path_buf(temp_dir.path().to_path_buf())
            .expect("temp path should be UTF-8");
        let dir = Dir::open_ambient_dir(&dir_path, ambient_authority())
            .expect("temp dir should open");
        dir.write(
            "logs.jsonl",
            "{\"id\": 4, \"action\": \"login\", \"created_at\": \"2024-05-01 09:30:00\"}\n",
        )
        .expect("export should be written");
        let path = dir_path.join("logs.jsonl");

        let entries = load_log_export(&path).expect("export should load");

        assert_eq!(entries, vec![entry(4, "login", (9, 30))]);
    }

    #[rstest]
    fn missing_export_is_an_io_error(temp_dir: TempDir) {
        let path = Utf8PathBuf::from_path_buf(temp_dir.path().join("absent.json"))
            .expect("temp path should be UTF-8");

        let result = load_log_export(&path);

        assert!(
            matches!(result, Err(CatalogError::Io { .. })),
            "expected I/O error, got {result:?}"
        );
    }
}
