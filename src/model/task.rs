use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Format used for due dates everywhere a human or the storage file sees them
pub const DATE_FORMAT: &str = "%m/%d/%Y";

/// Format produced by a date picker (`<input type="date">` style)
pub const INPUT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Completion state. `Pending → Completed` is the only transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TaskStatus {
    Pending,
    Completed,
}

impl TaskStatus {
    /// Label shown in the status column
    pub fn label(self) -> &'static str {
        match self {
            TaskStatus::Pending => "PENDING",
            TaskStatus::Completed => "COMPLETED",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single to-do entry.
///
/// Serialized field names (`task`, `date`) follow the persisted layout, not
/// the Rust field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Opaque id, unique within the list and never reused
    pub id: String,
    /// What to do (trimmed, never empty)
    #[serde(rename = "task")]
    pub description: String,
    /// Due date, stored as `MM/DD/YYYY`
    #[serde(rename = "date", with = "due_date_format")]
    pub due_date: NaiveDate,
    pub status: TaskStatus,
}

impl Task {
    /// Create a new pending task
    pub fn new(id: String, description: String, due_date: NaiveDate) -> Self {
        Task {
            id,
            description,
            due_date,
            status: TaskStatus::Pending,
        }
    }

    /// Due date as `MM/DD/YYYY`
    pub fn formatted_date(&self) -> String {
        format_date(self.due_date)
    }

    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }
}

/// Format a date as `MM/DD/YYYY`
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a user-entered due date. Accepts the date-picker form `YYYY-MM-DD`
/// and the display form `MM/DD/YYYY`.
pub fn parse_due_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    NaiveDate::parse_from_str(input, INPUT_DATE_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(input, DATE_FORMAT))
        .ok()
}

mod due_date_format {
    use chrono::NaiveDate;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(super::DATE_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&raw, super::DATE_FORMAT).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn new_task_is_pending() {
        let task = Task::new("1".into(), "Buy milk".into(), date(2024, 1, 15));
        assert_eq!(task.status, TaskStatus::Pending);
        assert!(!task.is_completed());
    }

    #[test]
    fn formatted_date_is_zero_padded() {
        let task = Task::new("1".into(), "Buy milk".into(), date(2024, 1, 5));
        assert_eq!(task.formatted_date(), "01/05/2024");
    }

    #[test]
    fn parse_due_date_accepts_picker_and_display_forms() {
        assert_eq!(parse_due_date("2024-01-15"), Some(date(2024, 1, 15)));
        assert_eq!(parse_due_date("01/15/2024"), Some(date(2024, 1, 15)));
        assert_eq!(parse_due_date("  2024-12-31 "), Some(date(2024, 12, 31)));
    }

    #[test]
    fn parse_due_date_rejects_garbage() {
        assert_eq!(parse_due_date(""), None);
        assert_eq!(parse_due_date("tomorrow"), None);
        assert_eq!(parse_due_date("2024-02-30"), None);
        assert_eq!(parse_due_date("13/01/2024"), None);
    }

    #[test]
    fn serializes_to_persisted_layout() {
        let mut task = Task::new("1705276800000".into(), "Buy milk".into(), date(2024, 1, 15));
        task.status = TaskStatus::Completed;
        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "id": "1705276800000",
                "task": "Buy milk",
                "date": "01/15/2024",
                "status": "COMPLETED",
            })
        );
    }

    #[test]
    fn deserializes_from_persisted_layout() {
        let task: Task = serde_json::from_str(
            r#"{"id":"42","task":"Walk dog","date":"02/29/2024","status":"PENDING"}"#,
        )
        .unwrap();
        assert_eq!(task.id, "42");
        assert_eq!(task.description, "Walk dog");
        assert_eq!(task.due_date, date(2024, 2, 29));
        assert_eq!(task.status, TaskStatus::Pending);
    }

    #[test]
    fn rejects_unknown_status_and_bad_date() {
        assert!(
            serde_json::from_str::<Task>(r#"{"id":"1","task":"x","date":"01/01/2024","status":"DONE"}"#)
                .is_err()
        );
        assert!(
            serde_json::from_str::<Task>(r#"{"id":"1","task":"x","date":"NaN/NaN/NaN","status":"PENDING"}"#)
                .is_err()
        );
    }
}
