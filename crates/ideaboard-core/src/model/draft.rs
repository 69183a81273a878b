//! User-entered idea fields, validated before they reach the store.

use chrono::NaiveDate;

use super::idea::{Category, Status, UNASSIGNED, dedup_tags};
use crate::error::{IdeaError, Result};

/// Editable fields of an idea.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdeaDraft {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub status: Status,
    pub tags: Vec<String>,
    pub assigned_to: Option<String>,
    pub due_date: Option<NaiveDate>,
}

impl IdeaDraft {
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>, category: Category) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            category,
            status: Status::New,
            tags: Vec::new(),
            assigned_to: None,
            due_date: None,
        }
    }

    /// Trim text fields and reject blank title or description.
    pub fn validate(mut self) -> Result<Self> {
        self.title = self.title.trim().to_string();
        self.description = self.description.trim().to_string();
        if self.title.is_empty() {
            return Err(IdeaError::Validation("title must not be blank".into()));
        }
        if self.description.is_empty() {
            return Err(IdeaError::Validation("description must not be blank".into()));
        }
        self.tags = dedup_tags(self.tags.into_iter().map(|t| t.trim().to_string()));
        self.assigned_to = self
            .assigned_to
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty());
        Ok(self)
    }

    /// Assignee as stored, with the sentinel for nobody.
    #[must_use]
    pub fn assignee_or_sentinel(&self) -> String {
        self.assigned_to
            .clone()
            .unwrap_or_else(|| UNASSIGNED.to_string())
    }
}

/// Split a comma-separated tag list.
#[must_use]
pub fn parse_tag_list(raw: &str) -> Vec<String> {
    dedup_tags(raw.split(',').map(|t| t.trim().to_string()))
}
