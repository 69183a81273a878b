//! Board-wide summaries: the tag filter inventory and the dashboard.
//!
//! Both read the whole store and ignore the current filters.

use chrono::NaiveDate;
use serde::Serialize;

use crate::model::{Category, Idea, Status};

/// A tag offered as a filter, with how many ideas carry it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagChip {
    pub tag: String,
    pub count: usize,
    pub active: bool,
}

/// Every tag in first-seen order across the store.
#[must_use]
pub fn tag_inventory(ideas: &[Idea], active: Option<&str>) -> Vec<TagChip> {
    let mut chips: Vec<TagChip> = Vec::new();
    for tag in ideas.iter().flat_map(|i| i.tags.iter()) {
        match chips.iter_mut().find(|c| &c.tag == tag) {
            Some(chip) => chip.count += 1,
            None => chips.push(TagChip {
                tag: tag.clone(),
                count: 1,
                active: active == Some(tag.as_str()),
            }),
        }
    }
    chips
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Count<T> {
    pub value: T,
    pub count: usize,
}

/// The most-voted idea.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopIdea {
    pub id: String,
    pub title: String,
    pub votes: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    pub total_ideas: usize,
    pub total_votes: u64,
    pub total_comments: usize,
    pub by_status: Vec<Count<Status>>,
    pub by_category: Vec<Count<Category>>,
    pub unassigned: usize,
    /// Due before `today` and not completed or declined.
    pub overdue: usize,
    pub top_idea: Option<TopIdea>,
}

impl Dashboard {
    #[must_use]
    pub fn compute(ideas: &[Idea], today: NaiveDate) -> Self {
        let by_status = Status::ALL
            .into_iter()
            .map(|value| Count {
                value,
                count: ideas.iter().filter(|i| i.status == value).count(),
            })
            .collect();
        let by_category = Category::ALL
            .into_iter()
            .map(|value| Count {
                value,
                count: ideas.iter().filter(|i| i.category == value).count(),
            })
            .collect();

        // first idea wins ties, matching the votes sort
        let top_idea = ideas
            .iter()
            .fold(None::<&Idea>, |best, idea| match best {
                Some(b) if b.votes >= idea.votes => Some(b),
                _ => Some(idea),
            })
            .map(|i| TopIdea {
                id: i.id.clone(),
                title: i.title.clone(),
                votes: i.votes,
            });

        Self {
            total_ideas: ideas.len(),
            total_votes: ideas.iter().map(|i| u64::from(i.votes)).sum(),
            total_comments: ideas.iter().map(|i| i.comments.len()).sum(),
            by_status,
            by_category,
            unassigned: ideas.iter().filter(|i| !i.is_assigned()).count(),
            overdue: ideas
                .iter()
                .filter(|i| !matches!(i.status, Status::Completed | Status::Declined))
                .filter(|i| i.due_date.is_some_and(|d| d < today))
                .count(),
            top_idea,
        }
    }
}
