use crate::context::BoardContext;
use crate::output::{OutputMode, fail, render};
use anyhow::Context as _;
use clap::Args;
use ideaboard_core::transfer::{EXPORT_FILE_NAME, export_json};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Destination file; "-" writes to stdout.
    #[arg(short, long, default_value = EXPORT_FILE_NAME)]
    pub output: PathBuf,
}

#[derive(Debug, Serialize)]
struct ExportOutput {
    path: String,
    ideas: usize,
}

/// Write every idea as a pretty JSON array.
pub fn run_export(args: &ExportArgs, output: OutputMode, project_root: &Path) -> anyhow::Result<()> {
    let ctx = BoardContext::open(project_root).map_err(|e| fail(output, e))?;
    let store = ctx.load_store();
    let json = export_json(store.ideas()).map_err(|e| fail(output, e))?;

    if args.output.as_os_str() == "-" {
        let mut out = std::io::stdout().lock();
        writeln!(out, "{json}")?;
        return Ok(());
    }

    std::fs::write(&args.output, format!("{json}\n"))
        .with_context(|| format!("Failed to write export: {}", args.output.display()))?;
    info!(path = %args.output.display(), ideas = store.len(), "exported board");

    let result = ExportOutput {
        path: args.output.display().to_string(),
        ideas: store.len(),
    };
    render(output, &result, |r, w| {
        writeln!(w, "✓ Exported {} idea(s) to {}", r.ideas, r.path)
    })
}
