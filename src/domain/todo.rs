use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Key the completion flag is serialized under.
pub const COMPLETED_KEY: &str = "completed";

/// Substrings that mark a request key as carrying the completion flag.
const COMPLETION_KEY_HINTS: [&str; 3] = ["complete", "status", "done"];

/// Server-assigned identifier. Clients treat it as opaque, so lookups accept
/// any string and unknown values simply match nothing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct TodoId(pub String);

impl TodoId {
    pub fn generate() -> Self { Self(Uuid::new_v4().to_string()) }

    pub fn as_str(&self) -> &str { &self.0 }
}

impl Default for TodoId {
    fn default() -> Self { Self::generate() }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

/// Due date of a todo, kept as the exact text the client sent.
///
/// The text must read as a calendar day or an RFC 3339 instant; the parsed
/// value is only used for that check, so `2024-01-01T09:30:00.000Z` comes
/// back with its milliseconds and `2024-1-1` without padding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DueDate {
    raw: String,
    value: DueValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueValue {
    Date(NaiveDate),
    DateTime(DateTime<Utc>),
}

impl DueDate {
    pub fn as_str(&self) -> &str { &self.raw }

    pub fn value(&self) -> DueValue { self.value }
}

impl From<NaiveDate> for DueDate {
    fn from(day: NaiveDate) -> Self {
        Self { raw: day.format("%Y-%m-%d").to_string(), value: DueValue::Date(day) }
    }
}

impl FromStr for DueDate {
    type Err = PayloadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let value = match NaiveDate::parse_from_str(text, "%Y-%m-%d") {
            Ok(day) => DueValue::Date(day),
            Err(_) => DateTime::parse_from_rfc3339(text)
                .map(|at| DueValue::DateTime(at.with_timezone(&Utc)))
                .map_err(|_| PayloadError::InvalidDueDate(s.to_string()))?,
        };
        Ok(Self { raw: s.to_string(), value })
    }
}

impl fmt::Display for DueDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.raw) }
}

impl Serialize for DueDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for DueDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: TodoId,
    pub description: String,
    pub completed: bool,
    pub due_date: DueDate,
}

/// Body of a create or full-replacement update.
///
/// Built from the raw JSON object so the completion flag can arrive under any
/// key that looks like one (`completed`, `isDone`, `status`, ...). Identifier
/// keys such as `id` or `_id` are ignored; ids come from the store only.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct TodoPayload {
    pub description: String,
    pub completed: bool,
    pub due_date: DueDate,
}

impl TodoPayload {
    pub fn into_todo(self, id: TodoId) -> Todo {
        Todo { id, description: self.description, completed: self.completed, due_date: self.due_date }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PayloadError {
    #[error("missing field `{0}`")]
    Missing(&'static str),
    #[error("field `{0}` has the wrong type")]
    WrongType(&'static str),
    #[error("invalid due date `{0}`, expected YYYY-MM-DD or RFC 3339")]
    InvalidDueDate(String),
}

impl TryFrom<Map<String, Value>> for TodoPayload {
    type Error = PayloadError;

    fn try_from(body: Map<String, Value>) -> Result<Self, Self::Error> {
        let description = match body.get("description") {
            Some(Value::String(text)) => text.clone(),
            Some(_) => return Err(PayloadError::WrongType("description")),
            None => return Err(PayloadError::Missing("description")),
        };
        let due_date = match body.get("dueDate") {
            Some(Value::String(raw)) => raw.parse()?,
            Some(_) => return Err(PayloadError::WrongType("dueDate")),
            None => return Err(PayloadError::Missing("dueDate")),
        };
        Ok(Self { description, completed: completion_flag(&body)?, due_date })
    }
}

pub fn is_completion_key(key: &str) -> bool {
    let key = key.to_ascii_lowercase();
    COMPLETION_KEY_HINTS.iter().any(|hint| key.contains(hint))
}

// The canonical key wins; otherwise the first boolean under a completion-like
// key. Absent means not completed.
fn completion_flag(body: &Map<String, Value>) -> Result<bool, PayloadError> {
    if let Some(value) = body.get(COMPLETED_KEY) {
        return value.as_bool().ok_or(PayloadError::WrongType(COMPLETED_KEY));
    }
    Ok(body
        .iter()
        .filter(|(key, _)| is_completion_key(key))
        .find_map(|(_, value)| value.as_bool())
        .unwrap_or(false))
}
