//! `ib stats`: board dashboard.

use crate::context::BoardContext;
use crate::output::{OutputMode, fail, pretty_kv, pretty_section, render_mode};
use chrono::Local;
use ideaboard_core::stats::Dashboard;
use std::io::Write;
use std::path::Path;

pub fn run_stats(output: OutputMode, project_root: &Path) -> anyhow::Result<()> {
    let ctx = BoardContext::open(project_root).map_err(|e| fail(output, e))?;
    let store = ctx.load_store();
    let dashboard = Dashboard::compute(store.ideas(), Local::now().date_naive());

    render_mode(
        output,
        &dashboard,
        |d, w| render_stats_text(d, w),
        |d, w| render_stats_human(d, w),
    )
}

fn render_stats_human(d: &Dashboard, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "Board")?;
    pretty_kv(w, "ideas", d.total_ideas.to_string())?;
    pretty_kv(w, "votes", d.total_votes.to_string())?;
    pretty_kv(w, "comments", d.total_comments.to_string())?;
    pretty_kv(w, "unassigned", d.unassigned.to_string())?;
    pretty_kv(w, "overdue", d.overdue.to_string())?;
    if let Some(top) = &d.top_idea {
        pretty_kv(w, "top idea", format!("{} (▲{})", top.title, top.votes))?;
    }

    writeln!(w)?;
    pretty_section(w, "By status")?;
    for entry in &d.by_status {
        pretty_kv(w, entry.value.as_str(), entry.count.to_string())?;
    }

    writeln!(w)?;
    pretty_section(w, "By category")?;
    for entry in &d.by_category {
        pretty_kv(w, entry.value.as_str(), entry.count.to_string())?;
    }
    Ok(())
}

fn render_stats_text(d: &Dashboard, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "ideas\t{}", d.total_ideas)?;
    writeln!(w, "votes\t{}", d.total_votes)?;
    writeln!(w, "comments\t{}", d.total_comments)?;
    writeln!(w, "unassigned\t{}", d.unassigned)?;
    writeln!(w, "overdue\t{}", d.overdue)?;
    for entry in &d.by_status {
        writeln!(w, "status:{}\t{}", entry.value, entry.count)?;
    }
    for entry in &d.by_category {
        writeln!(w, "category:{}\t{}", entry.value, entry.count)?;
    }
    Ok(())
}
