//! `ib import`: replace the whole board from an exported JSON file.
//!
//! The file is parsed and normalized first; a rejected file leaves the
//! board untouched. Replacing needs `--yes` or a confirmed prompt.

use crate::cmd::delete::confirm;
use crate::context::BoardContext;
use crate::output::{CliError, OutputMode, fail, render, render_error};
use anyhow::Context as _;
use clap::Args;
use ideaboard_core::IdeaError;
use ideaboard_core::transfer::parse_import;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Args, Debug)]
pub struct ImportArgs {
    /// JSON file written by `ib export`.
    pub path: PathBuf,

    /// Replace without asking.
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Debug, Serialize)]
struct ImportOutput {
    imported: usize,
    replaced: usize,
}

pub fn run_import(args: &ImportArgs, output: OutputMode, project_root: &Path) -> anyhow::Result<()> {
    let ctx = BoardContext::open(project_root).map_err(|e| fail(output, e))?;
    let text = std::fs::read_to_string(&args.path)
        .with_context(|| format!("Failed to read import file: {}", args.path.display()))?;
    let ideas = parse_import(&text).map_err(|e| fail(output, IdeaError::from(e)))?;

    let mut store = ctx.load_store();
    let replaced = store.len();
    let prompt = format!(
        "Replace {replaced} idea(s) with {} from {}?",
        ideas.len(),
        args.path.display()
    );
    if !args.yes && !confirm(&prompt)? {
        let msg = "import cancelled; board unchanged";
        render_error(
            output,
            &CliError::with_details(msg, "Pass --yes to skip the prompt", "cancelled"),
        )?;
        anyhow::bail!(msg);
    }

    let imported = ideas.len();
    store.replace_all(ideas);
    ctx.save_store(&store).map_err(|e| fail(output, e))?;
    info!(imported, replaced, "imported board");

    render(output, &ImportOutput { imported, replaced }, |r, w| {
        writeln!(w, "✓ Imported {} idea(s), replacing {}", r.imported, r.replaced)
    })
}
