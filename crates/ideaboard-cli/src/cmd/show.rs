//! `ib show`: full details of one idea, comments oldest first.

use crate::context::BoardContext;
use crate::output::{OutputMode, fail, pretty_kv, pretty_rule, pretty_section, render_mode};
use clap::Args;
use ideaboard_core::config::DisplayConfig;
use ideaboard_core::markup::strip_markup;
use ideaboard_core::{Comment, Idea, IdeaError};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Idea ID (a unique prefix is enough).
    pub id: String,
}

#[derive(Debug, Serialize)]
struct ShowIdea<'a> {
    #[serde(flatten)]
    idea: &'a Idea,
    /// Description with markup removed.
    #[serde(rename = "plainDescription")]
    plain_description: String,
    #[serde(skip)]
    display: &'a DisplayConfig,
    #[serde(skip)]
    comments_oldest_first: Vec<&'a Comment>,
}

pub fn run_show(args: &ShowArgs, output: OutputMode, project_root: &Path) -> anyhow::Result<()> {
    let ctx = BoardContext::open(project_root).map_err(|e| fail(output, e))?;
    let store = ctx.load_store();

    let id = store.resolve_id(&args.id).map_err(|e| fail(output, e))?;
    let idea = store
        .get(&id)
        .ok_or_else(|| fail(output, IdeaError::IdeaNotFound(id.clone())))?;

    let show = ShowIdea {
        idea,
        plain_description: strip_markup(&idea.description),
        display: &ctx.config.display,
        comments_oldest_first: idea.comments_chronological(),
    };
    render_mode(
        output,
        &show,
        |s, w| render_show_text(s, w),
        |s, w| render_show_human(s, w),
    )
}

fn render_show_human(show: &ShowIdea<'_>, w: &mut dyn Write) -> std::io::Result<()> {
    let idea = show.idea;
    pretty_section(w, &format!("Idea {}", idea.id))?;
    writeln!(w, "{}", idea.title)?;
    pretty_rule(w)?;
    pretty_kv(w, "category", idea.category.as_str())?;
    pretty_kv(w, "status", idea.status.as_str())?;
    pretty_kv(w, "votes", idea.votes.to_string())?;
    pretty_kv(w, "author", &idea.author)?;
    pretty_kv(w, "assigned", &idea.assigned_to)?;
    if let Some(due) = idea.due_date {
        pretty_kv(w, "due", show.display.format_date(due))?;
    }
    if !idea.tags.is_empty() {
        pretty_kv(w, "tags", idea.tags.join(", "))?;
    }

    if !show.plain_description.is_empty() {
        writeln!(w)?;
        pretty_section(w, "Description")?;
        for line in show.plain_description.lines() {
            writeln!(w, "{line}")?;
        }
    }

    if !show.comments_oldest_first.is_empty() {
        writeln!(w)?;
        pretty_section(w, &format!("Comments ({})", show.comments_oldest_first.len()))?;
        for (i, comment) in show.comments_oldest_first.iter().enumerate() {
            if i > 0 {
                writeln!(w)?;
            }
            writeln!(
                w,
                "[{}] {}: {}",
                show.display.format_time(comment.timestamp),
                comment.author,
                comment.text
            )?;
        }
    }
    Ok(())
}

fn render_show_text(show: &ShowIdea<'_>, w: &mut dyn Write) -> std::io::Result<()> {
    let idea = show.idea;
    writeln!(w, "Idea {}", idea.id)?;
    writeln!(w, "title:       {}", idea.title)?;
    writeln!(w, "category:    {}", idea.category)?;
    writeln!(w, "status:      {}", idea.status)?;
    writeln!(w, "votes:       {}", idea.votes)?;
    writeln!(w, "author:      {}", idea.author)?;
    writeln!(w, "assigned:    {}", idea.assigned_to)?;
    if let Some(due) = idea.due_date {
        writeln!(w, "due:         {}", due.format("%Y-%m-%d"))?;
    }
    if !idea.tags.is_empty() {
        writeln!(w, "tags:        {}", idea.tags.join(", "))?;
    }
    if !show.plain_description.is_empty() {
        writeln!(w, "description: {}", show.plain_description)?;
    }
    for comment in &show.comments_oldest_first {
        writeln!(
            w,
            "comment:     {}\t{}\t{}",
            comment.timestamp.to_rfc3339(),
            comment.author,
            comment.text
        )?;
    }
    Ok(())
}
