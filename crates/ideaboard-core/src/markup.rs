//! Plain-text views of rich-text descriptions.
//!
//! Descriptions are opaque formatted text written by an editor widget. The
//! board only ever needs their visible text: for search matching and for
//! list snippets.

use std::sync::OnceLock;

use regex::Regex;

static TAG_RE: OnceLock<Regex> = OnceLock::new();

fn tag_re() -> &'static Regex {
    TAG_RE.get_or_init(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"))
}

const ENTITIES: [(&str, &str); 6] = [
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&nbsp;", " "),
    // last, so "&amp;lt;" decodes to "&lt;" rather than "<"
    ("&amp;", "&"),
];

/// Remove markup tags and decode common character entities.
#[must_use]
pub fn strip_markup(html: &str) -> String {
    let mut text = tag_re().replace_all(html, "").into_owned();
    for (entity, replacement) in ENTITIES {
        if text.contains(entity) {
            text = text.replace(entity, replacement);
        }
    }
    text
}

/// Visible text cut to at most `max_chars` characters, with a trailing
/// ellipsis when anything was cut.
#[must_use]
pub fn snippet(html: &str, max_chars: usize) -> String {
    let text = strip_markup(html);
    let text = text.trim();
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", text[..cut].trim_end()),
        None => text.to_string(),
    }
}
