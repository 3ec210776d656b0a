//! Task model definitions

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default title limit, in characters
pub const MAX_TEXT_CHARS: usize = 100;

/// Default description limit, in characters
pub const MAX_DESCRIPTION_CHARS: usize = 2000;

/// Opaque task identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for TaskId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A single to-do item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_date::deserialize"
    )]
    pub date_and_time: Option<DateTime<Utc>>,
}

impl Task {
    /// Create a new, incomplete task with the given title
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: TaskId::generate(),
            text: text.into(),
            description: String::new(),
            completed: false,
            date_and_time: None,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the due date/time
    pub fn with_date_and_time(mut self, date_and_time: DateTime<Utc>) -> Self {
        self.date_and_time = Some(date_and_time);
        self
    }
}

/// Character limits applied to user-entered text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextLimits {
    pub max_text_chars: usize,
    pub max_description_chars: usize,
}

impl Default for TextLimits {
    fn default() -> Self {
        Self {
            max_text_chars: MAX_TEXT_CHARS,
            max_description_chars: MAX_DESCRIPTION_CHARS,
        }
    }
}

/// Cut `value` to at most `max_chars` characters.
///
/// Returns the kept text and whether anything was dropped. Counts Unicode
/// scalar values, so multi-byte characters are never split.
pub fn truncate_chars(value: &str, max_chars: usize) -> (String, bool) {
    match value.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => (value[..byte_idx].to_string(), true),
        None => (value.to_string(), false),
    }
}

/// Partial update for an existing task. Unset fields keep their value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub text: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
    /// `Some(None)` clears the due date.
    pub date_and_time: Option<Option<DateTime<Utc>>>,
}

impl TaskPatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Patch that only changes the completion flag
    pub fn completion(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Self::default()
        }
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    pub fn date_and_time(mut self, date_and_time: DateTime<Utc>) -> Self {
        self.date_and_time = Some(Some(date_and_time));
        self
    }

    pub fn clear_date_and_time(mut self) -> Self {
        self.date_and_time = Some(None);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_none()
            && self.description.is_none()
            && self.completed.is_none()
            && self.date_and_time.is_none()
    }

    /// Merge the patch into `task`, truncating text fields to `limits`.
    ///
    /// Returns the names of the fields that had to be truncated.
    pub fn apply(self, task: &mut Task, limits: &TextLimits) -> Vec<&'static str> {
        let mut truncated = Vec::new();
        if let Some(text) = self.text {
            let (text, cut) = truncate_chars(&text, limits.max_text_chars);
            if cut {
                truncated.push("text");
            }
            task.text = text;
        }
        if let Some(description) = self.description {
            let (description, cut) = truncate_chars(&description, limits.max_description_chars);
            if cut {
                truncated.push("description");
            }
            task.description = description;
        }
        if let Some(completed) = self.completed {
            task.completed = completed;
        }
        if let Some(date_and_time) = self.date_and_time {
            task.date_and_time = date_and_time;
        }
        truncated
    }
}

/// Input collected by an "add task" form before it reaches the store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub text: String,
    pub description: String,
    pub date_and_time: Option<DateTime<Utc>>,
}

impl TaskDraft {
    /// A draft can be submitted once it has a non-blank title and a due date.
    pub fn is_submittable(&self) -> bool {
        !self.text.trim().is_empty() && self.date_and_time.is_some()
    }
}

/// Accepts RFC 3339 timestamps and the `Date.prototype.toString` form
/// written by older app builds. Unparseable values decode as absent.
mod lenient_date {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    const JS_DATE_FORMAT: &str = "%a %b %d %Y %H:%M:%S GMT%z";

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(None),
            Value::String(raw) => Ok(parse(&raw)),
            other => {
                tracing::warn!("Ignoring non-string task date {}", other);
                Ok(None)
            }
        }
    }

    pub(super) fn parse(raw: &str) -> Option<DateTime<Utc>> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return Some(parsed.with_timezone(&Utc));
        }
        // Drop the trailing "(Zone Name)" the JS formatter appends.
        let without_zone_name = raw.split(" (").next().unwrap_or(raw);
        match DateTime::parse_from_str(without_zone_name, JS_DATE_FORMAT) {
            Ok(parsed) => Some(parsed.with_timezone(&Utc)),
            Err(err) => {
                tracing::warn!("Ignoring unparseable task date {:?}: {}", raw, err);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_create_task() {
        let task = Task::new("Buy milk");
        assert_eq!(task.text, "Buy milk");
        assert!(!task.completed);
        assert!(task.description.is_empty());
        assert!(task.date_and_time.is_none());
        assert!(!task.id.as_str().is_empty());
    }

    #[test]
    fn test_generated_ids_differ() {
        assert_ne!(Task::new("a").id, Task::new("a").id);
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("hello", 10), ("hello".to_string(), false));
        assert_eq!(truncate_chars("hello", 5), ("hello".to_string(), false));
        assert_eq!(truncate_chars("hello", 3), ("hel".to_string(), true));
        // multi-byte characters count once
        assert_eq!(truncate_chars("héllo wörld", 4), ("héll".to_string(), true));
    }

    #[test]
    fn test_patch_only_touches_listed_fields() {
        let due = Utc.with_ymd_and_hms(2026, 10, 19, 8, 0, 0).unwrap();
        let mut task = Task::new("Title")
            .with_description("Notes")
            .with_date_and_time(due);
        let before = task.clone();
        assert!(TaskPatch::new().is_empty());
        assert!(!TaskPatch::completion(true).is_empty());

        let truncated = TaskPatch::completion(true).apply(&mut task, &TextLimits::default());

        assert!(truncated.is_empty());
        assert!(task.completed);
        assert_eq!(task.text, before.text);
        assert_eq!(task.description, before.description);
        assert_eq!(task.date_and_time, before.date_and_time);
        assert_eq!(task.id, before.id);
    }

    #[test]
    fn test_patch_truncates_and_clears_date() {
        let due = Utc.with_ymd_and_hms(2026, 10, 19, 8, 0, 0).unwrap();
        let mut task = Task::new("Title").with_date_and_time(due);
        let limits = TextLimits {
            max_text_chars: 3,
            max_description_chars: 4,
        };

        let truncated = TaskPatch::new()
            .text("abcdef")
            .description("123456")
            .clear_date_and_time()
            .apply(&mut task, &limits);

        assert_eq!(truncated, vec!["text", "description"]);
        assert_eq!(task.text, "abc");
        assert_eq!(task.description, "1234");
        assert!(task.date_and_time.is_none());
    }

    #[test]
    fn test_draft_submittable() {
        let mut draft = TaskDraft {
            text: "   ".to_string(),
            ..TaskDraft::default()
        };
        assert!(!draft.is_submittable());

        draft.text = "Buy milk".to_string();
        assert!(!draft.is_submittable());

        draft.date_and_time = Some(Utc::now());
        assert!(draft.is_submittable());
    }

    #[test]
    fn test_serialized_field_names() {
        let due = Utc.with_ymd_and_hms(2026, 10, 19, 8, 0, 0).unwrap();
        let task = Task::new("Buy milk").with_date_and_time(due);
        let value = serde_json::to_value(&task).unwrap();

        assert_eq!(value["text"], "Buy milk");
        assert_eq!(value["completed"], false);
        assert_eq!(value["dateAndTime"], "2026-10-19T08:00:00Z");
        assert!(value.get("date_and_time").is_none());

        let undated = serde_json::to_value(Task::new("x")).unwrap();
        assert!(undated.get("dateAndTime").is_none());
    }

    #[test]
    fn test_deserialize_legacy_js_date() {
        let json = r#"{
            "id": "abc",
            "text": "Call mom",
            "description": "",
            "completed": false,
            "dateAndTime": "Mon Oct 19 2026 10:00:00 GMT+0200 (Central European Summer Time)"
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(
            task.date_and_time,
            Some(Utc.with_ymd_and_hms(2026, 10, 19, 8, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_deserialize_tolerates_bad_date_and_missing_fields() {
        let json = r#"{"id": "abc", "text": "Call mom", "dateAndTime": "someday"}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert!(task.date_and_time.is_none());
        assert!(task.description.is_empty());
        assert!(!task.completed);

        let json = r#"{"id": "abc", "text": "Call mom", "dateAndTime": null}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert!(task.date_and_time.is_none());
    }

    #[test]
    fn test_deserialize_non_string_date_as_absent() {
        for date in ["1760860800000", "true", r#"{"seconds": 5}"#, "[1, 2]"] {
            let json = format!(r#"{{"id": "abc", "text": "Call mom", "dateAndTime": {}}}"#, date);
            let task: Task = serde_json::from_str(&json).unwrap();
            assert!(task.date_and_time.is_none(), "expected absent date for {}", date);
            assert_eq!(task.text, "Call mom");
        }
    }

    #[test]
    fn test_lenient_parse_rfc3339_offset() {
        let parsed = lenient_date::parse("2026-10-19T10:00:00+02:00");
        assert_eq!(
            parsed,
            Some(Utc.with_ymd_and_hms(2026, 10, 19, 8, 0, 0).unwrap())
        );
        assert_eq!(lenient_date::parse("  "), None);
    }
}
