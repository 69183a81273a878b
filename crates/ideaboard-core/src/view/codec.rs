//! Query-string encoding of [`ViewState`].
//!
//! Parameters, in the order they are written:
//!
//! | param      | value                     | omitted when |
//! |------------|---------------------------|--------------|
//! | `search`   | free text                 | empty        |
//! | `category` | category display name     | `All`        |
//! | `sort`     | `title`, `votes`, ...     | `default`    |
//! | `status`   | status display name       | `All`        |
//! | `tag`      | tag text                  | no tag       |
//! | `assigned` | `true`                    | off          |
//!
//! `timeline` is session-local and never written. Decoding is total: an
//! unknown or garbage value resets only its own field, unknown parameters
//! are ignored, and the first of a repeated parameter wins.

use url::form_urlencoded;

use super::{Choice, SortKey, ViewState};

pub const PARAM_SEARCH: &str = "search";
pub const PARAM_CATEGORY: &str = "category";
pub const PARAM_SORT: &str = "sort";
pub const PARAM_STATUS: &str = "status";
pub const PARAM_TAG: &str = "tag";
pub const PARAM_ASSIGNED: &str = "assigned";

/// Encode the non-default fields as `application/x-www-form-urlencoded`,
/// without a leading `?`. The default state encodes to `""`.
#[must_use]
pub fn encode(state: &ViewState) -> String {
    let mut out = form_urlencoded::Serializer::new(String::new());
    if !state.search.is_empty() {
        out.append_pair(PARAM_SEARCH, &state.search);
    }
    if let Choice::Only(category) = state.category {
        out.append_pair(PARAM_CATEGORY, category.as_str());
    }
    if state.sort != SortKey::Default {
        out.append_pair(PARAM_SORT, state.sort.as_str());
    }
    if let Choice::Only(status) = state.status {
        out.append_pair(PARAM_STATUS, status.as_str());
    }
    if let Some(tag) = state.tag.as_deref().filter(|t| !t.is_empty()) {
        out.append_pair(PARAM_TAG, tag);
    }
    if state.assigned_to_me {
        out.append_pair(PARAM_ASSIGNED, "true");
    }
    out.finish()
}

/// Decode a query string (with or without a leading `?`). Never fails.
#[must_use]
pub fn decode(query: &str) -> ViewState {
    let query = query.trim();
    let query = query.strip_prefix('?').unwrap_or(query);

    let mut search = None;
    let mut category = None;
    let mut sort = None;
    let mut status = None;
    let mut tag = None;
    let mut assigned = None;

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        let slot = match key.as_ref() {
            PARAM_SEARCH => &mut search,
            PARAM_CATEGORY => &mut category,
            PARAM_SORT => &mut sort,
            PARAM_STATUS => &mut status,
            PARAM_TAG => &mut tag,
            PARAM_ASSIGNED => &mut assigned,
            _ => continue,
        };
        if slot.is_none() {
            *slot = Some(value.into_owned());
        }
    }

    ViewState {
        search: search.unwrap_or_default(),
        category: category
            .and_then(|c| c.parse().ok())
            .unwrap_or_default(),
        sort: sort.and_then(|s| s.parse().ok()).unwrap_or_default(),
        status: status.and_then(|s| s.parse().ok()).unwrap_or_default(),
        tag: tag.filter(|t| !t.is_empty()),
        assigned_to_me: assigned.as_deref() == Some("true"),
        timeline: false,
    }
}

/// Render as a shareable link suffix: `"?..."`, or `""` for the default view.
#[must_use]
pub fn to_link(state: &ViewState) -> String {
    let query = encode(state);
    if query.is_empty() {
        query
    } else {
        format!("?{query}")
    }
}
