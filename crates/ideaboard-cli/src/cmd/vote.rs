use crate::context::BoardContext;
use crate::output::{OutputMode, fail, render};
use clap::Args;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

#[derive(Args, Debug)]
pub struct VoteArgs {
    /// Idea ID (a unique prefix is enough).
    pub id: String,
}

#[derive(Debug, Serialize)]
struct VoteOutput {
    id: String,
    title: String,
    votes: u32,
}

/// Upvote an idea. Guests may vote; there is no per-user limit.
pub fn run_vote(args: &VoteArgs, output: OutputMode, project_root: &Path) -> anyhow::Result<()> {
    let ctx = BoardContext::open(project_root).map_err(|e| fail(output, e))?;
    let mut store = ctx.load_store();

    let id = store.resolve_id(&args.id).map_err(|e| fail(output, e))?;
    let votes = store.upvote(&id).map_err(|e| fail(output, e))?;
    ctx.save_store(&store).map_err(|e| fail(output, e))?;
    let title = store.get(&id).map(|i| i.title.clone()).unwrap_or_default();

    render(output, &VoteOutput { id, title, votes }, |v, w| {
        writeln!(w, "✓ {} now has {} vote(s)", v.title, v.votes)
    })
}
