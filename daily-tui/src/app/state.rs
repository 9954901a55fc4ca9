use daily_api::TodoId;
use std::time::{Duration, Instant};

use super::todo_form::TodoForm;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Daily,
    Okr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
}

/// Transient status line. Success banners expire; error banners stay until replaced.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusBanner {
    pub message: String,
    pub kind: BannerKind,
    pub expires_at: Option<Instant>,
}

impl StatusBanner {
    pub fn success(message: impl Into<String>, ttl: Duration) -> Self {
        Self {
            message: message.into(),
            kind: BannerKind::Success,
            expires_at: Some(Instant::now() + ttl),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: BannerKind::Error,
            expires_at: None,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }
}

/// One line of the flattened OKR list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OkrRow {
    Objective {
        objective_id: String,
    },
    KeyResult {
        objective_id: String,
        kr_id: String,
    },
}

impl OkrRow {
    pub fn objective_id(&self) -> &str {
        match self {
            Self::Objective { objective_id } | Self::KeyResult { objective_id, .. } => {
                objective_id
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeleteTarget {
    Todo { id: TodoId, title: String },
    Objective { id: String, title: String },
}

impl DeleteTarget {
    pub fn prompt(&self) -> &'static str {
        match self {
            Self::Todo { .. } => " Delete this todo? ",
            Self::Objective { .. } => " Delete objective and all its key results? ",
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Todo { title, .. } | Self::Objective { title, .. } => title,
        }
    }
}

/// Modal dialog currently on top of the view.
#[derive(Debug, Clone, PartialEq)]
pub enum Dialog {
    TodoForm(TodoForm),
    NewCategory(TextInput),
    NaturalLanguage(TextInput),
    /// `objective_id` is set when renaming.
    ObjectiveForm {
        objective_id: Option<String>,
        title: TextInput,
    },
    KeyResultForm {
        objective_id: String,
        content: TextInput,
    },
    ConfirmDelete(DeleteTarget),
}

/// A text input with mid-string cursor support.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextInput {
    pub value: String,
    pub cursor: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_str(s: &str) -> Self {
        Self {
            value: s.to_string(),
            cursor: s.len(),
        }
    }

    pub fn insert(&mut self, c: char) {
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let new_cursor = self.prev_boundary(self.cursor);
        self.value.drain(new_cursor..self.cursor);
        self.cursor = new_cursor;
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.prev_boundary(self.cursor);
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.value.len() {
            self.cursor = self.next_boundary(self.cursor);
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.value.len();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Returns the string split at the cursor: (before, after).
    pub fn split_at_cursor(&self) -> (&str, &str) {
        (&self.value[..self.cursor], &self.value[self.cursor..])
    }

    fn prev_boundary(&self, pos: usize) -> usize {
        let mut p = pos - 1;
        while !self.value.is_char_boundary(p) {
            p -= 1;
        }
        p
    }

    fn next_boundary(&self, pos: usize) -> usize {
        let mut p = pos + 1;
        while p < self.value.len() && !self.value.is_char_boundary(p) {
            p += 1;
        }
        p
    }
}
