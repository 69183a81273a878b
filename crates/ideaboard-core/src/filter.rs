//! Which ideas a view admits.

use crate::markup::strip_markup;
use crate::model::Idea;
use crate::view::ViewState;

/// True when `idea` passes every filter in `state`.
///
/// The checks are independent and combined with AND: search text, category
/// tab, status, tag, and assignment to `current_user`.
#[must_use]
pub fn matches(idea: &Idea, state: &ViewState, current_user: &str) -> bool {
    matches_search(idea, &state.search)
        && state.category.admits(&idea.category)
        && state.status.admits(&idea.status)
        && state.tag.as_deref().is_none_or(|tag| idea.has_tag(tag))
        && (!state.assigned_to_me || idea.assigned_to == current_user)
}

/// Case-insensitive substring match on the title, or on the description's
/// visible text. An empty term matches everything.
#[must_use]
pub fn matches_search(idea: &Idea, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    idea.title.to_lowercase().contains(&needle)
        || strip_markup(&idea.description)
            .to_lowercase()
            .contains(&needle)
}

/// Keep the admitted ideas, preserving their order.
pub fn filter_ideas<'a>(
    ideas: impl IntoIterator<Item = &'a Idea>,
    state: &ViewState,
    current_user: &str,
) -> Vec<&'a Idea> {
    ideas
        .into_iter()
        .filter(|idea| matches(idea, state, current_user))
        .collect()
}
