//! `ib list`: the board listing.
//!
//! The view starts from `--view` (a query string such as one printed by a
//! previous `ib list`) and each flag is then applied as a view change, in
//! the order category, assigned, status, tag, search, sort, timeline.
//! The resulting view is printed as `view: ?...` so it can be reused.

use crate::context::BoardContext;
use crate::output::{OutputMode, fail, pretty_rule, pretty_section, render_mode};
use clap::Args;
use ideaboard_core::config::DisplayConfig;
use ideaboard_core::markup::snippet;
use ideaboard_core::pipeline::{Board, DisplayList, Rendered};
use ideaboard_core::view::codec::{decode, to_link};
use ideaboard_core::view::{CategoryFilter, StatusFilter};
use ideaboard_core::{Idea, Identity, SortKey, ViewState};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Start from a saved view, e.g. "?sort=votes&tag=ux".
    #[arg(long, value_name = "QUERY")]
    pub view: Option<String>,

    /// Case-insensitive text in the title or description.
    #[arg(long)]
    pub search: Option<String>,

    /// Category tab ("All" for every category). Clears --mine.
    #[arg(long, conflicts_with = "mine")]
    pub category: Option<CategoryFilter>,

    /// Only ideas assigned to you. Requires `ib login`.
    #[arg(long)]
    pub mine: bool,

    /// Status filter ("All" for every status).
    #[arg(long)]
    pub status: Option<StatusFilter>,

    /// Toggle a tag filter; naming the active tag clears it.
    #[arg(long, conflicts_with = "no_tag")]
    pub tag: Option<String>,

    /// Drop any tag filter carried by --view.
    #[arg(long)]
    pub no_tag: bool,

    /// default, title, category, votes, or dueDate.
    #[arg(long)]
    pub sort: Option<SortKey>,

    /// Group by due month.
    #[arg(long)]
    pub timeline: bool,
}

impl ListArgs {
    /// Build the view state these arguments describe.
    pub fn view_state(&self, identity: &Identity) -> ideaboard_core::Result<ViewState> {
        let mut state = self.view.as_deref().map(decode).unwrap_or_default();
        if let Some(category) = self.category {
            state.select_category(category);
        }
        if self.mine {
            state.set_assigned_to_me(true, identity)?;
        }
        if let Some(status) = self.status {
            state.set_status(status);
        }
        if self.no_tag {
            state.clear_tag();
        } else if let Some(tag) = &self.tag {
            state.toggle_tag(tag.trim());
        }
        if let Some(search) = &self.search {
            state.set_search(search);
        }
        if let Some(sort) = self.sort {
            state.set_sort(sort);
        }
        if self.timeline {
            state.toggle_timeline();
        }
        Ok(state)
    }
}

#[derive(Debug, Serialize)]
struct ListOutput<'a> {
    /// Shareable link form of the view (`?...`, empty for the default view).
    view: String,
    shown: usize,
    total: usize,
    #[serde(flatten)]
    rendered: Rendered<'a>,
    #[serde(skip)]
    display: &'a DisplayConfig,
}

pub fn run_list(args: &ListArgs, output: OutputMode, project_root: &Path) -> anyhow::Result<()> {
    let ctx = BoardContext::open(project_root).map_err(|e| fail(output, e))?;
    let identity = ctx.identity();
    let store = ctx.load_store();

    let state = args.view_state(&identity).map_err(|e| fail(output, e))?;
    let rendered = Board::new(&store, &identity).apply(&state);

    let payload = ListOutput {
        view: to_link(&state),
        shown: rendered.list.len(),
        total: store.len(),
        rendered,
        display: &ctx.config.display,
    };
    render_mode(
        output,
        &payload,
        |p, w| render_list_text(p, w),
        |p, w| render_list_human(p, w),
    )
}

fn view_line(link: &str) -> String {
    if link.is_empty() {
        "view: (default)".to_string()
    } else {
        format!("view: {link}")
    }
}

fn text_row(w: &mut dyn Write, idea: &Idea) -> std::io::Result<()> {
    writeln!(
        w,
        "{}\t{}\t{}\t{}\t{}",
        idea.short_id(),
        idea.votes,
        idea.status,
        idea.category,
        idea.title
    )
}

fn render_list_text(list: &ListOutput<'_>, w: &mut dyn Write) -> std::io::Result<()> {
    match &list.rendered.list {
        DisplayList::Flat(ideas) => {
            for idea in ideas {
                text_row(w, idea)?;
            }
        }
        DisplayList::Timeline(sections) => {
            for section in sections {
                writeln!(w, "# {}", section.heading)?;
                for idea in &section.ideas {
                    text_row(w, idea)?;
                }
            }
        }
    }
    writeln!(w, "{}", view_line(&list.view))
}

fn render_list_human(list: &ListOutput<'_>, w: &mut dyn Write) -> std::io::Result<()> {
    if !list.rendered.tags.is_empty() {
        let chips: Vec<String> = list
            .rendered
            .tags
            .iter()
            .map(|c| {
                if c.active {
                    format!("[{} ({})]", c.tag, c.count)
                } else {
                    format!("{} ({})", c.tag, c.count)
                }
            })
            .collect();
        writeln!(w, "tags: {}", chips.join("  "))?;
        writeln!(w)?;
    }

    if list.rendered.list.is_empty() {
        writeln!(w, "No ideas match this view.")?;
    } else {
        match &list.rendered.list {
            DisplayList::Flat(ideas) => {
                pretty_section(w, &format!("Ideas ({} of {})", list.shown, list.total))?;
                for idea in ideas {
                    render_card(w, idea, list.display)?;
                }
            }
            DisplayList::Timeline(sections) => {
                for section in sections {
                    pretty_section(w, &format!("{} ({})", section.heading, section.ideas.len()))?;
                    for idea in &section.ideas {
                        render_card(w, idea, list.display)?;
                    }
                    writeln!(w)?;
                }
            }
        }
    }
    pretty_rule(w)?;
    writeln!(w, "{}", view_line(&list.view))
}

fn render_card(w: &mut dyn Write, idea: &Idea, display: &DisplayConfig) -> std::io::Result<()> {
    writeln!(w, "{}  {}  ▲{}", idea.short_id(), idea.title, idea.votes)?;
    let body = snippet(&idea.description, display.snippet_chars);
    if !body.is_empty() {
        writeln!(w, "    {body}")?;
    }

    let mut meta = vec![idea.category.to_string(), idea.status.to_string()];
    if idea.is_assigned() {
        meta.push(format!("@{}", idea.assigned_to));
    }
    if let Some(due) = idea.due_date {
        meta.push(format!("due {}", display.format_date(due)));
    }
    if !idea.comments.is_empty() {
        meta.push(format!("{} comment(s)", idea.comments.len()));
    }
    if !idea.tags.is_empty() {
        meta.push(format!("#{}", idea.tags.join(" #")));
    }
    writeln!(w, "    {}", meta.join(" · "))
}
