//! From stored ideas to a display-ready listing.
//!
//! [`render`] is pure: sort the whole collection, keep the ideas the view
//! admits, then either return them flat or grouped into due-month sections.
//! Painting the result is the caller's job.
//!
//! [`Board::apply`] is the entry point used after every view change. It
//! encodes the view for the link first, then renders, and adds the tag
//! inventory for the filter chips.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::filter::matches;
use crate::model::Idea;
use crate::session::Identity;
use crate::sort::sort_ideas;
use crate::stats::{TagChip, tag_inventory};
use crate::store::IdeaStore;
use crate::view::{ViewState, codec};

/// Heading of the timeline section for ideas without a due date.
pub const NO_DUE_DATE: &str = "No Due Date";

/// One titled group in the timeline view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineSection<'a> {
    pub heading: String,
    pub ideas: Vec<&'a Idea>,
}

/// What to show, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "entries", rename_all = "lowercase")]
pub enum DisplayList<'a> {
    Flat(Vec<&'a Idea>),
    Timeline(Vec<TimelineSection<'a>>),
}

impl<'a> DisplayList<'a> {
    /// Every displayed idea in display order, sections flattened.
    #[must_use]
    pub fn ideas(&self) -> Vec<&'a Idea> {
        match self {
            Self::Flat(ideas) => ideas.clone(),
            Self::Timeline(sections) => sections
                .iter()
                .flat_map(|s| s.ideas.iter().copied())
                .collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Flat(ideas) => ideas.len(),
            Self::Timeline(sections) => sections.iter().map(|s| s.ideas.len()).sum(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Timeline heading for a due date: abbreviated month and year.
#[must_use]
pub fn timeline_heading(due: Option<NaiveDate>) -> String {
    due.map_or_else(|| NO_DUE_DATE.to_string(), |d| d.format("%b %Y").to_string())
}

/// Sort, filter, then group or flatten.
#[must_use]
pub fn render<'a>(ideas: &'a [Idea], state: &ViewState, current_user: &str) -> DisplayList<'a> {
    let mut ordered: Vec<&Idea> = ideas.iter().collect();
    sort_ideas(&mut ordered, state.sort);
    ordered.retain(|idea| matches(idea, state, current_user));

    if state.timeline {
        DisplayList::Timeline(group_by_due_month(ordered))
    } else {
        DisplayList::Flat(ordered)
    }
}

/// Group in encounter order; a section sits where its first idea sits.
fn group_by_due_month(ideas: Vec<&Idea>) -> Vec<TimelineSection<'_>> {
    let mut sections: Vec<TimelineSection<'_>> = Vec::new();
    for idea in ideas {
        let heading = timeline_heading(idea.due_date);
        match sections.iter_mut().find(|s| s.heading == heading) {
            Some(section) => section.ideas.push(idea),
            None => sections.push(TimelineSection {
                heading,
                ideas: vec![idea],
            }),
        }
    }
    sections
}

/// A rendered board: the link for the view plus what to paint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rendered<'a> {
    /// Encoded view state (no leading `?`).
    pub query: String,
    pub list: DisplayList<'a>,
    pub tags: Vec<TagChip>,
}

/// Read-only view over the store for one identity.
#[derive(Debug, Clone, Copy)]
pub struct Board<'a> {
    store: &'a IdeaStore,
    identity: &'a Identity,
}

impl<'a> Board<'a> {
    #[must_use]
    pub const fn new(store: &'a IdeaStore, identity: &'a Identity) -> Self {
        Self { store, identity }
    }

    /// Encode the view, then render it.
    #[must_use]
    pub fn apply(&self, state: &ViewState) -> Rendered<'a> {
        let query = codec::encode(state);
        let list = render(self.store.ideas(), state, self.identity.name());
        debug!(
            query = %query,
            shown = list.len(),
            total = self.store.len(),
            timeline = state.timeline,
            "rendered board"
        );
        Rendered {
            query,
            list,
            tags: tag_inventory(self.store.ideas(), state.tag.as_deref()),
        }
    }
}
