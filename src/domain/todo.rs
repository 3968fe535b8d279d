use serde::{Deserialize, Serialize};

/// Longest `content` accepted, in characters. Matches the `VARCHAR(50)` column.
pub const MAX_CONTENT_LEN: usize = 50;

/// SQLite rowid of a todo.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct TodoId(pub i64);

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{}", self.0) }
}

/// Stored and serialized as its integer code.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "i64", into = "i64")]
pub enum Priority {
    #[default]
    Normal,
    Low,
    High,
}

impl Priority {
    pub fn label(self) -> &'static str {
        match self { Priority::Normal => "Normal", Priority::Low => "Low", Priority::High => "High" }
    }
}

impl From<Priority> for i64 {
    fn from(p: Priority) -> Self {
        match p { Priority::Normal => 0, Priority::Low => 1, Priority::High => 2 }
    }
}

impl TryFrom<i64> for Priority {
    type Error = String;

    fn try_from(v: i64) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(Priority::Normal),
            1 => Ok(Priority::Low),
            2 => Ok(Priority::High),
            other => Err(format!("invalid priority {other}, expected 0, 1 or 2")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: TodoId,
    pub priority: Priority,
    pub content: String,
    pub completed: bool,
}

impl Todo {
    /// Overwrites every field present in `input`; `id` never changes.
    pub fn apply(&mut self, input: UpdateTodo) {
        if let Some(p) = input.priority { self.priority = p; }
        if let Some(c) = input.content { self.content = c; }
        if let Some(c) = input.completed { self.completed = c; }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTodo {
    pub content: String,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub completed: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTodo {
    pub content: Option<String>,
    pub priority: Option<Priority>,
    pub completed: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContentError {
    #[error("Content should NOT be empty")]
    Empty,
    #[error("Content length should NOT be more than 50 characters")]
    TooLong,
}

pub fn validate_content(content: &str) -> Result<(), ContentError> {
    if content.is_empty() { return Err(ContentError::Empty); }
    if content.chars().count() > MAX_CONTENT_LEN { return Err(ContentError::TooLong); }
    Ok(())
}
