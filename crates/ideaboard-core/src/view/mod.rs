//! The filter, sort and display configuration behind every listing.
//!
//! A [`ViewState`] is built from a query string on startup (see [`codec`]),
//! changed by user actions through the methods below, and re-encoded after
//! every change. The methods carry the board's interaction rules: picking a
//! category tab and "assigned to me" exclude each other.

pub mod codec;

use std::{fmt, str::FromStr};

use crate::error::{IdeaError, Result};
use crate::model::{Category, ParseEnumError, Status};
use crate::session::Identity;

/// Ordering applied before filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortKey {
    /// Store order (creation order).
    #[default]
    Default,
    Title,
    Category,
    /// Most votes first.
    Votes,
    /// Earliest due date first; undated ideas last.
    DueDate,
}

impl SortKey {
    pub const ALL: [Self; 5] = [
        Self::Default,
        Self::Title,
        Self::Category,
        Self::Votes,
        Self::DueDate,
    ];

    /// Wire name, as used in the `sort` query parameter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Title => "title",
            Self::Category => "category",
            Self::Votes => "votes",
            Self::DueDate => "dueDate",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "default" => Ok(Self::Default),
            "title" => Ok(Self::Title),
            "category" => Ok(Self::Category),
            "votes" => Ok(Self::Votes),
            "duedate" | "due-date" | "due_date" | "due" => Ok(Self::DueDate),
            _ => Err(ParseEnumError {
                expected: "sort key",
                got: s.to_string(),
            }),
        }
    }
}

/// Either every value of `T`, or exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Choice<T> {
    All,
    Only(T),
}

impl<T> Default for Choice<T> {
    fn default() -> Self {
        Self::All
    }
}

impl<T: PartialEq> Choice<T> {
    #[must_use]
    pub fn admits(&self, value: &T) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == value,
        }
    }

    #[must_use]
    pub const fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl<T: fmt::Display> fmt::Display for Choice<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL),
            Self::Only(value) => fmt::Display::fmt(value, f),
        }
    }
}

impl<T: FromStr<Err = ParseEnumError>> FromStr for Choice<T> {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case(ALL) {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Only)
        }
    }
}

/// Label for the unfiltered choice.
pub const ALL: &str = "All";

pub type CategoryFilter = Choice<Category>;
pub type StatusFilter = Choice<Status>;

/// Everything that decides what a listing shows.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ViewState {
    /// Free text, matched case-insensitively. Empty means no search.
    pub search: String,
    pub category: CategoryFilter,
    pub status: StatusFilter,
    pub sort: SortKey,
    /// At most one tag filter.
    pub tag: Option<String>,
    /// Only ideas assigned to the current user.
    pub assigned_to_me: bool,
    /// Group by due month instead of a flat list. Not part of the query
    /// string; it lasts for the session only.
    pub timeline: bool,
}

impl ViewState {
    pub fn set_search(&mut self, term: &str) {
        self.search = term.trim().to_string();
    }

    /// Choose a category tab. Clears the assigned-to-me filter.
    pub fn select_category(&mut self, category: CategoryFilter) {
        self.category = category;
        self.assigned_to_me = false;
    }

    /// Turn the assigned-to-me filter on or off.
    ///
    /// Guests cannot enable it. Enabling resets the category tab to
    /// [`Choice::All`].
    pub fn set_assigned_to_me(&mut self, on: bool, identity: &Identity) -> Result<()> {
        if on {
            if !identity.is_signed_in() {
                return Err(IdeaError::PermissionDenied(
                    "sign in to filter by \"Assigned To Me\"".into(),
                ));
            }
            self.category = Choice::All;
        }
        self.assigned_to_me = on;
        Ok(())
    }

    pub fn toggle_assigned_to_me(&mut self, identity: &Identity) -> Result<()> {
        self.set_assigned_to_me(!self.assigned_to_me, identity)
    }

    pub fn set_status(&mut self, status: StatusFilter) {
        self.status = status;
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
    }

    /// Clicking the active tag clears it; any other tag replaces it.
    pub fn toggle_tag(&mut self, tag: &str) {
        if tag.is_empty() || self.tag.as_deref() == Some(tag) {
            self.tag = None;
        } else {
            self.tag = Some(tag.to_string());
        }
    }

    pub fn clear_tag(&mut self) {
        self.tag = None;
    }

    pub fn toggle_timeline(&mut self) {
        self.timeline = !self.timeline;
    }

    /// True when no filter narrows the listing.
    #[must_use]
    pub fn is_unfiltered(&self) -> bool {
        self.search.is_empty()
            && self.category.is_all()
            && self.status.is_all()
            && self.tag.is_none()
            && !self.assigned_to_me
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> Identity {
        Identity::User("Alice".into())
    }

    #[test]
    fn sort_key_parse_roundtrip() {
        for key in SortKey::ALL {
            assert_eq!(key.as_str().parse::<SortKey>().unwrap(), key);
        }
        assert_eq!("due-date".parse::<SortKey>().unwrap(), SortKey::DueDate);
        assert!("popularity".parse::<SortKey>().is_err());
    }

    #[test]
    fn choice_parses_all_and_values() {
        assert_eq!("All".parse::<CategoryFilter>().unwrap(), Choice::All);
        assert_eq!("all".parse::<StatusFilter>().unwrap(), Choice::All);
        assert_eq!(
            "In Progress".parse::<StatusFilter>().unwrap(),
            Choice::Only(Status::InProgress)
        );
        assert!("Nope".parse::<CategoryFilter>().is_err());
        assert_eq!(Choice::Only(Category::Ui).to_string(), "UI");
        assert_eq!(CategoryFilter::All.to_string(), "All");
    }

    #[test]
    fn selecting_category_clears_assigned_to_me() {
        let mut state = ViewState::default();
        state.set_assigned_to_me(true, &alice()).unwrap();
        state.select_category(Choice::Only(Category::Backend));
        assert!(!state.assigned_to_me);
        assert_eq!(state.category, Choice::Only(Category::Backend));
    }

    #[test]
    fn enabling_assigned_to_me_resets_category() {
        let mut state = ViewState::default();
        state.select_category(Choice::Only(Category::Ui));
        state.toggle_assigned_to_me(&alice()).unwrap();
        assert!(state.assigned_to_me);
        assert!(state.category.is_all());

        state.toggle_assigned_to_me(&alice()).unwrap();
        assert!(!state.assigned_to_me);
    }

    #[test]
    fn guests_cannot_enable_assigned_to_me() {
        let mut state = ViewState::default();
        state.select_category(Choice::Only(Category::Ui));
        let err = state.set_assigned_to_me(true, &Identity::Guest).unwrap_err();
        assert!(matches!(err, IdeaError::PermissionDenied(_)));
        assert!(!state.assigned_to_me);
        assert_eq!(state.category, Choice::Only(Category::Ui));
        // turning it off is always allowed
        state.set_assigned_to_me(false, &Identity::Guest).unwrap();
    }

    #[test]
    fn tag_toggles() {
        let mut state = ViewState::default();
        state.toggle_tag("ux");
        assert_eq!(state.tag.as_deref(), Some("ux"));
        state.toggle_tag("api");
        assert_eq!(state.tag.as_deref(), Some("api"));
        state.toggle_tag("api");
        assert!(state.tag.is_none());
    }

    #[test]
    fn search_is_trimmed() {
        let mut state = ViewState::default();
        state.set_search("  dark mode ");
        assert_eq!(state.search, "dark mode");
        assert!(!state.is_unfiltered());
    }
}
