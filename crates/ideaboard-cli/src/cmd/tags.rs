use crate::context::BoardContext;
use crate::output::{OutputMode, fail, render};
use ideaboard_core::stats::tag_inventory;
use std::io::Write;
use std::path::Path;

/// Every tag on the board in first-seen order, with usage counts.
pub fn run_tags(output: OutputMode, project_root: &Path) -> anyhow::Result<()> {
    let ctx = BoardContext::open(project_root).map_err(|e| fail(output, e))?;
    let store = ctx.load_store();
    let chips = tag_inventory(store.ideas(), None);

    render(output, &chips, |chips, w| {
        if chips.is_empty() {
            return writeln!(w, "No tags yet.");
        }
        for chip in chips {
            writeln!(w, "{}\t{}", chip.tag, chip.count)?;
        }
        Ok(())
    })
}
