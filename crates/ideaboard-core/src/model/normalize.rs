//! Lenient conversion of stored or imported JSON into [`Idea`] records.
//!
//! Both the persisted blob and import files are external input, so every
//! field falls back to a default instead of rejecting the record. Only
//! elements that are not JSON objects are dropped.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::{Map, Value};
use tracing::warn;

use super::idea::{
    Category, Comment, IMPORTED_AUTHOR, Idea, Status, UNASSIGNED, dedup_tags,
};

/// Result of normalizing a whole array.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Normalized {
    pub ideas: Vec<Idea>,
    /// Records that had no usable id, or a duplicate one, and got a fresh id.
    pub assigned_ids: usize,
}

/// Normalize a whole array, keeping ids unique.
#[must_use]
pub fn normalize_all(values: &[Value]) -> Vec<Idea> {
    normalize_records(values).ideas
}

/// Like [`normalize_all`], also counting the ids it had to generate. A
/// caller holding the source blob must persist the result when the count
/// is non-zero, or the next load generates different ids.
#[must_use]
pub fn normalize_records(values: &[Value]) -> Normalized {
    let mut seen = HashSet::new();
    let mut out = Normalized {
        ideas: Vec::with_capacity(values.len()),
        assigned_ids: 0,
    };
    for (index, value) in values.iter().enumerate() {
        let Some(mut idea) = normalize_idea(value) else {
            warn!(index, "skipping idea record that is not a JSON object");
            continue;
        };
        let had_id = value
            .as_object()
            .and_then(|obj| non_empty_str(obj, "id"))
            .is_some();
        if !had_id {
            out.assigned_ids += 1;
        }
        if !seen.insert(idea.id.clone()) {
            let fresh = Idea::new_id();
            warn!(index, duplicate = %idea.id, "reassigning duplicate idea id");
            idea.id = fresh;
            seen.insert(idea.id.clone());
            out.assigned_ids += 1;
        }
        out.ideas.push(idea);
    }
    out
}

/// Normalize one record; `None` when it is not an object.
#[must_use]
pub fn normalize_idea(value: &Value) -> Option<Idea> {
    let obj = value.as_object()?;

    let id = non_empty_str(obj, "id").map_or_else(Idea::new_id, str::to_string);
    let tags = obj
        .get("tags")
        .and_then(Value::as_array)
        .map(|tags| {
            dedup_tags(
                tags.iter()
                    .filter_map(Value::as_str)
                    .map(|t| t.trim().to_string()),
            )
        })
        .unwrap_or_default();
    let comments = obj
        .get("comments")
        .and_then(Value::as_array)
        .map(|list| list.iter().filter_map(normalize_comment).collect())
        .unwrap_or_default();

    Some(Idea {
        id,
        title: str_field(obj, "title").unwrap_or_default().to_string(),
        description: str_field(obj, "description").unwrap_or_default().to_string(),
        category: str_field(obj, "category")
            .and_then(|c| c.parse().ok())
            .unwrap_or(Category::Other),
        status: str_field(obj, "status")
            .and_then(|s| s.parse().ok())
            .unwrap_or_default(),
        tags,
        votes: obj.get("votes").map_or(0, vote_count),
        author: non_empty_str(obj, "author")
            .unwrap_or(IMPORTED_AUTHOR)
            .to_string(),
        assigned_to: non_empty_str(obj, "assignedTo")
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .unwrap_or(UNASSIGNED)
            .to_string(),
        due_date: str_field(obj, "dueDate").and_then(parse_due_date),
        comments,
    })
}

/// Accepts `YYYY-MM-DD`, or any RFC 3339 timestamp (its date part).
#[must_use]
pub fn parse_due_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|ts| ts.date_naive())
}

fn normalize_comment(value: &Value) -> Option<Comment> {
    let obj = value.as_object()?;
    let text = non_empty_str(obj, "text")?.to_string();
    let timestamp = str_field(obj, "timestamp")
        .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())?
        .with_timezone(&Utc);
    Some(Comment {
        text,
        author: non_empty_str(obj, "author")
            .unwrap_or(IMPORTED_AUTHOR)
            .to_string(),
        timestamp,
    })
}

fn vote_count(value: &Value) -> u32 {
    if let Some(n) = value.as_u64() {
        return u32::try_from(n).unwrap_or(u32::MAX);
    }
    if let Some(f) = value.as_f64()
        && f.is_finite()
        && f > 0.0
    {
        return truncate_votes(f);
    }
    value
        .as_str()
        .and_then(|s| s.trim().parse::<u32>().ok())
        .unwrap_or(0)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn truncate_votes(f: f64) -> u32 {
    f.min(f64::from(u32::MAX)) as u32
}

fn str_field<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    obj.get(key).and_then(Value::as_str)
}

fn non_empty_str<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    str_field(obj, key).filter(|s| !s.trim().is_empty())
}
