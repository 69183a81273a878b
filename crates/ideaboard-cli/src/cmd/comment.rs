use crate::context::BoardContext;
use crate::output::{OutputMode, fail, render};
use chrono::Utc;
use clap::Args;
use ideaboard_core::Comment;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tracing::info;

#[derive(Args, Debug)]
pub struct CommentArgs {
    /// Idea ID (a unique prefix is enough).
    pub id: String,

    /// Comment text.
    pub text: String,
}

#[derive(Debug, Serialize)]
struct CommentOutput {
    id: String,
    comment: Comment,
}

/// Append a comment. Requires a signed-in identity.
pub fn run_comment(
    args: &CommentArgs,
    output: OutputMode,
    project_root: &Path,
) -> anyhow::Result<()> {
    let ctx = BoardContext::open(project_root).map_err(|e| fail(output, e))?;
    let identity = ctx.identity();
    let mut store = ctx.load_store();

    let id = store.resolve_id(&args.id).map_err(|e| fail(output, e))?;
    let comment = store
        .add_comment(&id, &args.text, &identity, Utc::now())
        .map_err(|e| fail(output, e))?
        .clone();
    ctx.save_store(&store).map_err(|e| fail(output, e))?;
    info!(id = %id, author = %comment.author, "comment added");

    render(output, &CommentOutput { id, comment }, |c, w| {
        writeln!(w, "✓ {} commented: {}", c.comment.author, c.comment.text)
    })
}
