//! To-do records: the persisted entity, the outward DTO and the caller inputs.

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// Partition keys above this size are rejected by the table.
pub const MAX_ID_BYTES: usize = 2048;

/// Persisted form. Serialized field names match the table attributes
/// (`Id`, `Title`, `Description`, `Completed`, `CreatedAt`, `UpdatedAt`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TodoItem {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TodoItem {
    /// A fresh, not yet completed item whose timestamps are both `now`.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            completed: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite the mutable fields. `id` and `created_at` are left alone.
    pub fn apply(&mut self, update: &UpdateTodoItem, now: DateTime<Utc>) {
        self.title = update.title.clone();
        self.description = update.description.clone();
        self.completed = update.completed;
        self.updated_at = next_timestamp(self.updated_at, now);
    }
}

/// `now`, unless the clock has not moved past `previous`; then one microsecond after it.
pub fn next_timestamp(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}

/// RFC 3339 in UTC with as many fractional digits as needed.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, ModelError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|_| ModelError::InvalidTimestamp(raw.to_string()))
}

pub fn validate_id(id: &str) -> Result<(), ModelError> {
    if id.trim().is_empty() {
        return Err(ModelError::Validation("id required".into()));
    }
    if id.len() > MAX_ID_BYTES {
        return Err(ModelError::Validation(format!("id longer than {MAX_ID_BYTES} bytes")));
    }
    Ok(())
}

/// Read-facing projection of a [`TodoItem`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "graphql", derive(async_graphql::SimpleObject))]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: String,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Arguments of `createTodo`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CreateTodoItem {
    pub title: String,
    pub description: String,
}

/// Arguments of `updateTodo`. Replaces every mutable field of the referenced item.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UpdateTodoItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub completed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn new_item_is_open_with_equal_timestamps() {
        let item = TodoItem::new("1", "Title", "Desc", at(100));
        assert!(!item.completed);
        assert_eq!(item.created_at, item.updated_at);
    }

    #[test]
    fn apply_keeps_identity_and_creation_time() {
        let mut item = TodoItem::new("1", "Old", "Old Desc", at(100));
        let update = UpdateTodoItem { id: "1".into(), title: "New".into(), description: "New Desc".into(), completed: true };
        item.apply(&update, at(200));
        assert_eq!(item.id, "1");
        assert_eq!(item.created_at, at(100));
        assert_eq!(item.updated_at, at(200));
        assert_eq!(item.title, "New");
        assert!(item.completed);
    }

    #[test]
    fn updated_at_moves_forward_when_clock_stalls() {
        let previous = at(500);
        assert!(next_timestamp(previous, previous) > previous);
        assert!(next_timestamp(previous, at(400)) > previous);
        assert_eq!(next_timestamp(previous, at(600)), at(600));
    }

    #[test]
    fn entity_uses_table_attribute_names() {
        let item = TodoItem::new("abc", "T", "D", at(0));
        let json = serde_json::to_value(&item).unwrap();
        for key in ["Id", "Title", "Description", "Completed", "CreatedAt", "UpdatedAt"] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
    }

    #[test]
    fn dto_uses_camel_case() {
        let dto = Todo { id: "1".into(), title: "T".into(), description: "D".into(), completed: false, created_at: at(0), updated_at: at(0) };
        let json = serde_json::to_value(&dto).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
    }

    #[test]
    fn timestamps_survive_formatting() {
        let ts = Utc::now();
        assert_eq!(parse_timestamp(&format_timestamp(&ts)).unwrap(), ts);
        assert!(matches!(parse_timestamp("yesterday"), Err(ModelError::InvalidTimestamp(_))));
    }

    #[test]
    fn id_validation() {
        assert!(validate_id("abc").is_ok());
        assert!(validate_id("  ").is_err());
        assert!(validate_id(&"x".repeat(MAX_ID_BYTES + 1)).is_err());
    }
}
