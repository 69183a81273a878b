use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Assignee sentinel for ideas nobody has picked up.
pub const UNASSIGNED: &str = "Unassigned";

/// Author recorded for imported ideas that carry no author.
pub const IMPORTED_AUTHOR: &str = "Initial Import";

/// The fixed set of idea categories (the board's tabs).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Feature,
    #[serde(rename = "UI")]
    Ui,
    Backend,
    Process,
    Other,
}

impl Category {
    pub const ALL: [Self; 5] = [
        Self::Feature,
        Self::Ui,
        Self::Backend,
        Self::Process,
        Self::Other,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Feature => "Feature",
            Self::Ui => "UI",
            Self::Backend => "Backend",
            Self::Process => "Process",
            Self::Other => "Other",
        }
    }
}

/// Review lifecycle of an idea. Any status may follow any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Status {
    New,
    #[serde(rename = "Under Review")]
    UnderReview,
    Planned,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
    Declined,
}

impl Default for Status {
    fn default() -> Self {
        Self::New
    }
}

impl Status {
    pub const ALL: [Self; 6] = [
        Self::New,
        Self::UnderReview,
        Self::Planned,
        Self::InProgress,
        Self::Completed,
        Self::Declined,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "New",
            Self::UnderReview => "Under Review",
            Self::Planned => "Planned",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Declined => "Declined",
        }
    }
}

/// A remark left on an idea. Never edited once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub text: String,
    pub author: String,
    pub timestamp: DateTime<Utc>,
}

/// A proposal on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Idea {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub status: Status,
    pub tags: Vec<String>,
    pub votes: u32,
    pub author: String,
    pub assigned_to: String,
    pub due_date: Option<NaiveDate>,
    pub comments: Vec<Comment>,
}

impl Idea {
    /// Fresh opaque identifier.
    #[must_use]
    pub fn new_id() -> String {
        uuid::Uuid::new_v4().simple().to_string()
    }

    /// Short display form of the id.
    #[must_use]
    pub fn short_id(&self) -> &str {
        self.id.get(..8).unwrap_or(&self.id)
    }

    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    #[must_use]
    pub fn is_assigned(&self) -> bool {
        self.assigned_to != UNASSIGNED
    }

    /// Comments oldest first, whatever order they were stored in.
    #[must_use]
    pub fn comments_chronological(&self) -> Vec<&Comment> {
        let mut comments: Vec<&Comment> = self.comments.iter().collect();
        comments.sort_by_key(|c| c.timestamp);
        comments
    }
}

/// Collapse duplicate tags, keeping the first occurrence.
pub(crate) fn dedup_tags(tags: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for tag in tags {
        if !tag.is_empty() && !out.contains(&tag) {
            out.push(tag);
        }
    }
    out
}

/// Error returned when parsing an enum value from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEnumError {
    pub expected: &'static str,
    pub got: String,
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: '{}'", self.expected, self.got)
    }
}

impl std::error::Error for ParseEnumError {}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn normalize(input: &str) -> String {
    input
        .trim()
        .chars()
        .map(|c| if c == '-' || c == '_' { ' ' } else { c })
        .collect::<String>()
        .to_lowercase()
}

impl FromStr for Category {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize(s);
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().to_lowercase() == normalized)
            .ok_or_else(|| ParseEnumError {
                expected: "category",
                got: s.to_string(),
            })
    }
}

impl FromStr for Status {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize(s);
        Self::ALL
            .into_iter()
            .find(|st| st.as_str().to_lowercase() == normalized)
            .ok_or_else(|| ParseEnumError {
                expected: "status",
                got: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn idea_with_comments(comments: Vec<Comment>) -> Idea {
        Idea {
            id: "abcdef0123456789".to_string(),
            title: "Dark Mode".to_string(),
            description: String::new(),
            category: Category::Ui,
            status: Status::New,
            tags: vec![],
            votes: 0,
            author: "alice".to_string(),
            assigned_to: UNASSIGNED.to_string(),
            due_date: None,
            comments,
        }
    }

    #[test]
    fn enum_json_uses_display_strings() {
        assert_eq!(serde_json::to_string(&Category::Ui).unwrap(), "\"UI\"");
        assert_eq!(
            serde_json::to_string(&Status::InProgress).unwrap(),
            "\"In Progress\""
        );
        assert_eq!(
            serde_json::from_str::<Status>("\"Under Review\"").unwrap(),
            Status::UnderReview
        );
    }

    #[test]
    fn display_parse_roundtrips() {
        for value in Category::ALL {
            assert_eq!(Category::from_str(&value.to_string()).unwrap(), value);
        }
        for value in Status::ALL {
            assert_eq!(Status::from_str(&value.to_string()).unwrap(), value);
        }
    }

    #[test]
    fn parse_is_forgiving_about_case_and_separators() {
        assert_eq!(Category::from_str("ui").unwrap(), Category::Ui);
        assert_eq!(Status::from_str("in-progress").unwrap(), Status::InProgress);
        assert_eq!(Status::from_str("UNDER_REVIEW").unwrap(), Status::UnderReview);
    }

    #[test]
    fn parse_rejects_unknown_values() {
        assert!(Category::from_str("marketing").is_err());
        assert!(Status::from_str("shipped").is_err());
    }

    #[test]
    fn idea_json_uses_camel_case_fields() {
        let idea = idea_with_comments(vec![]);
        let json = serde_json::to_value(&idea).unwrap();
        assert_eq!(json["assignedTo"], "Unassigned");
        assert!(json["dueDate"].is_null());
        assert_eq!(json["category"], "UI");
    }

    #[test]
    fn comments_are_displayed_oldest_first() {
        let later = Comment {
            text: "second".into(),
            author: "bob".into(),
            timestamp: Utc.with_ymd_and_hms(2025, 3, 2, 9, 0, 0).unwrap(),
        };
        let earlier = Comment {
            text: "first".into(),
            author: "carol".into(),
            timestamp: Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap(),
        };
        let idea = idea_with_comments(vec![later, earlier]);
        let texts: Vec<&str> = idea
            .comments_chronological()
            .iter()
            .map(|c| c.text.as_str())
            .collect();
        assert_eq!(texts, ["first", "second"]);
        assert_eq!(idea.comments[0].text, "second");
    }

    #[test]
    fn short_id_truncates() {
        let idea = idea_with_comments(vec![]);
        assert_eq!(idea.short_id(), "abcdef01");
    }

    #[test]
    fn dedup_tags_keeps_first_occurrence() {
        let tags = dedup_tags(["a", "b", "a", "", "c"].map(String::from));
        assert_eq!(tags, ["a", "b", "c"]);
    }
}
