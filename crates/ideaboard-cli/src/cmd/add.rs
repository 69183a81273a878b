use crate::context::BoardContext;
use crate::output::{OutputMode, fail, render};
use chrono::NaiveDate;
use clap::Args;
use ideaboard_core::model::parse_tag_list;
use ideaboard_core::{Category, IdeaDraft, Status};
use std::io::Write;
use std::path::Path;
use tracing::info;

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Short title.
    #[arg(short, long)]
    pub title: String,

    /// Body text; simple HTML markup is kept and stripped for display.
    #[arg(short, long)]
    pub description: String,

    /// Feature, UI, Backend, Process, or Other.
    #[arg(short, long, default_value = "Other")]
    pub category: Category,

    #[arg(short, long, default_value = "New")]
    pub status: Status,

    /// Comma-separated tags, e.g. "ux, mobile".
    #[arg(long, default_value = "")]
    pub tags: String,

    /// Display name of the assignee.
    #[arg(long)]
    pub assign: Option<String>,

    /// Due date as YYYY-MM-DD.
    #[arg(long)]
    pub due: Option<NaiveDate>,
}

impl AddArgs {
    fn to_draft(&self) -> IdeaDraft {
        IdeaDraft {
            status: self.status,
            tags: parse_tag_list(&self.tags),
            assigned_to: self.assign.clone(),
            due_date: self.due,
            ..IdeaDraft::new(&self.title, &self.description, self.category)
        }
    }
}

pub fn run_add(args: &AddArgs, output: OutputMode, project_root: &Path) -> anyhow::Result<()> {
    let ctx = BoardContext::open(project_root).map_err(|e| fail(output, e))?;
    let identity = ctx.identity();
    let mut store = ctx.load_store();

    let idea = store
        .add(args.to_draft(), &identity)
        .map_err(|e| fail(output, e))?
        .clone();
    ctx.save_store(&store).map_err(|e| fail(output, e))?;
    info!(id = %idea.id, author = %idea.author, "idea added");

    render(output, &idea, |idea, w| {
        writeln!(w, "✓ Added {} {}", idea.short_id(), idea.title)
    })
}
