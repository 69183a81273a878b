use crate::output::{CliError, OutputMode, render, render_error};
use anyhow::{Context as _, Result};
use clap::Args;
use ideaboard_core::config::{self, BOARD_DIR};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Rewrite the default config even if `.ideaboard/` already exists.
    #[arg(long)]
    pub force: bool,
}

const CONFIG_TOML: &str = "[display]\n\
    snippet_chars = 100\n\
    date_format = \"%b %-d, %Y\"\n\
    time_format = \"%b %-d, %Y %H:%M\"\n";

#[derive(Debug, Serialize)]
struct InitOutput {
    root: String,
    config: String,
    store: String,
}

/// Execute `ib init`. Creates the board skeleton:
///
/// ```text
/// .ideaboard/
///   config.toml   (display defaults)
///   store/        (ideas.json, current-user.json)
/// ```
///
/// Existing data in `store/` is never touched, even with `--force`.
pub fn run_init(args: &InitArgs, output: OutputMode, project_root: &Path) -> Result<()> {
    let board_dir = project_root.join(BOARD_DIR);

    if board_dir.exists() && !args.force {
        let msg = format!("{BOARD_DIR}/ already exists in {}", project_root.display());
        render_error(
            output,
            &CliError::with_details(
                &msg,
                "Use `ib init --force` to rewrite the default config",
                "already_initialized",
            ),
        )?;
        anyhow::bail!(msg);
    }

    let store_dir = config::store_dir(project_root);
    std::fs::create_dir_all(&store_dir)
        .with_context(|| format!("Failed to create store directory: {}", store_dir.display()))?;

    let config_path = board_dir.join("config.toml");
    std::fs::write(&config_path, CONFIG_TOML)
        .with_context(|| format!("Failed to write config: {}", config_path.display()))?;

    let result = InitOutput {
        root: project_root.display().to_string(),
        config: config_path.display().to_string(),
        store: store_dir.display().to_string(),
    };
    render(output, &result, |r, w| {
        writeln!(w, "✓ Initialized {BOARD_DIR}/ in {}", r.root)?;
        writeln!(w)?;
        writeln!(w, "Next steps:")?;
        writeln!(w, "  ib login <name>      # sign in to comment and edit")?;
        writeln!(w, "  ib add --title ...   # post the first idea")
    })
}
