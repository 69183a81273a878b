//! Listing order.
//!
//! Every ordering is a stable sort, so ties keep their previous relative
//! order and re-rendering unchanged data gives the same sequence.

use std::cmp::Ordering;

use crate::model::Idea;
use crate::view::SortKey;

/// Compare two ideas under `key`. [`SortKey::Default`] treats all ideas as
/// equal, which a stable sort turns into "keep store order".
#[must_use]
pub fn compare(a: &Idea, b: &Idea, key: SortKey) -> Ordering {
    match key {
        SortKey::Default => Ordering::Equal,
        SortKey::Title => caseless(&a.title, &b.title),
        SortKey::Category => caseless(a.category.as_str(), b.category.as_str()),
        SortKey::Votes => b.votes.cmp(&a.votes),
        // `None` after every date
        SortKey::DueDate => match (a.due_date, b.due_date) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
    }
}

/// Stable in-place sort.
pub fn sort_ideas(ideas: &mut [&Idea], key: SortKey) {
    if key == SortKey::Default {
        return;
    }
    ideas.sort_by(|a, b| compare(a, b, key));
}

fn caseless(a: &str, b: &str) -> Ordering {
    a.to_uppercase().cmp(&b.to_uppercase())
}
