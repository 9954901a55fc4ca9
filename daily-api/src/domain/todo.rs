use serde::{Deserialize, Serialize};
use time::Date;

use super::{CategoryId, TodoId};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TodoStatus {
    #[default]
    Pending,
    InProgress,
    Done,
}

impl TodoStatus {
    pub const ALL: [TodoStatus; 3] = [Self::Pending, Self::InProgress, Self::Done];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Done => "done",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In progress",
            Self::Done => "Done",
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Status a todo moves to when its completion checkbox is flipped.
    ///
    /// Only `Done` goes back to `Pending`; every other status becomes `Done`.
    pub fn toggled(self) -> Self {
        match self {
            Self::Done => Self::Pending,
            Self::Pending | Self::InProgress => Self::Done,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TodoPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl TodoPriority {
    pub const ALL: [TodoPriority; 3] = [Self::Low, Self::Medium, Self::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

/// A todo as returned by `GET /todos`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: TodoStatus,
    pub priority: TodoPriority,
    #[serde(default, with = "iso_date::option")]
    pub due_date: Option<Date>,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    /// Denormalized by the backend; absent on older servers.
    #[serde(default)]
    pub category_name: Option<String>,
}

impl Todo {
    /// Full-replacement body carrying this todo's current fields.
    pub fn to_payload(&self) -> TodoPayload {
        TodoPayload {
            title: self.title.clone(),
            description: self.description.clone(),
            status: self.status,
            priority: self.priority,
            due_date: self.due_date,
            category_id: self.category_id,
        }
    }
}

/// Body for `POST /todos` and `PUT /todos/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TodoPayload {
    pub title: String,
    pub description: Option<String>,
    pub status: TodoStatus,
    pub priority: TodoPriority,
    #[serde(with = "iso_date::option")]
    pub due_date: Option<Date>,
    pub category_id: Option<CategoryId>,
}

impl TodoPayload {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            status: TodoStatus::default(),
            priority: TodoPriority::default(),
            due_date: None,
            category_id: None,
        }
    }
}

/// Body for `PATCH /todos/{id}`. Only the fields that are set get sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TodoPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TodoStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TodoPriority>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "iso_date::option"
    )]
    pub due_date: Option<Date>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
}

impl TodoPatch {
    pub fn status(status: TodoStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

#[derive(Debug, Serialize)]
pub struct NaturalLanguageTodo<'a> {
    pub text: &'a str,
}

/// `YYYY-MM-DD` dates. Parsing also accepts a full timestamp and keeps only the date part.
pub mod iso_date {
    use serde::{de, Deserialize, Deserializer, Serializer};
    use time::{macros::format_description, Date};

    pub fn parse(raw: &str) -> Result<Date, time::error::Parse> {
        let format = format_description!("[year]-[month]-[day]");
        let raw = raw.trim();
        let head = raw.get(..10).unwrap_or(raw);
        Date::parse(head, &format)
    }

    pub fn format(date: &Date) -> String {
        let format = format_description!("[year]-[month]-[day]");
        // A date-only description cannot fail on a `Date`; `Display` is the same layout.
        date.format(&format).unwrap_or_else(|_| date.to_string())
    }

    pub mod option {
        use super::*;

        pub fn serialize<S: Serializer>(
            value: &Option<Date>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(date) => serializer.serialize_some(&super::format(date)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<Date>, D::Error> {
            let raw = Option::<String>::deserialize(deserializer)?;
            match raw.as_deref().map(str::trim) {
                None | Some("") => Ok(None),
                Some(value) => super::parse(value).map(Some).map_err(de::Error::custom),
            }
        }
    }
}
