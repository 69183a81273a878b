//! `ib delete`: remove an idea you authored.

use crate::context::BoardContext;
use crate::output::{CliError, OutputMode, fail, render, render_error};
use clap::Args;
use serde::Serialize;
use std::io::{IsTerminal, Write};
use std::path::Path;
use tracing::{debug, info};

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Idea ID (a unique prefix is enough).
    pub id: String,

    /// Skip interactive confirmation prompt.
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Serialize)]
struct DeleteOutput {
    id: String,
    title: String,
    deleted: bool,
}

/// Ask on a terminal. Without one nobody can answer, so the answer is no
/// and callers need their skip flag (`--force`, `--yes`).
pub fn confirm(prompt: &str) -> anyhow::Result<bool> {
    if !std::io::stdin().is_terminal() || !std::io::stdout().is_terminal() {
        debug!(prompt, "no terminal to confirm on; refusing");
        return Ok(false);
    }

    eprint!("{prompt} [y/N] ");
    std::io::stderr().flush()?;

    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    let answer = input.trim().to_ascii_lowercase();
    Ok(answer == "y" || answer == "yes")
}

pub fn run_delete(args: &DeleteArgs, output: OutputMode, project_root: &Path) -> anyhow::Result<()> {
    let ctx = BoardContext::open(project_root).map_err(|e| fail(output, e))?;
    let identity = ctx.identity();
    let mut store = ctx.load_store();

    let id = store.resolve_id(&args.id).map_err(|e| fail(output, e))?;
    let title = store.get(&id).map(|i| i.title.clone()).unwrap_or_default();

    if !args.force && !confirm(&format!("Delete idea \"{title}\"?"))? {
        let msg = format!("deletion of '{id}' cancelled");
        render_error(
            output,
            &CliError::with_details(&msg, "Pass --force to skip the prompt", "cancelled"),
        )?;
        anyhow::bail!(msg);
    }

    let removed = store.remove(&id, &identity).map_err(|e| fail(output, e))?;
    ctx.save_store(&store).map_err(|e| fail(output, e))?;
    info!(id = %removed.id, "idea deleted");

    let result = DeleteOutput {
        id: removed.id,
        title: removed.title,
        deleted: true,
    };
    render(output, &result, |r, w| writeln!(w, "✓ Deleted {}", r.title))
}
