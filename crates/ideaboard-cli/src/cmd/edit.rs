//! `ib edit`: change fields of an idea you authored.
//!
//! Only the flags given are changed; everything else keeps its value.

use crate::context::BoardContext;
use crate::output::{OutputMode, fail, render};
use chrono::NaiveDate;
use clap::Args;
use ideaboard_core::model::parse_tag_list;
use ideaboard_core::{Category, Idea, IdeaDraft, IdeaError, Status};
use std::io::Write;
use std::path::Path;
use tracing::info;

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Idea ID (a unique prefix is enough).
    pub id: String,

    #[arg(short, long)]
    pub title: Option<String>,

    #[arg(short, long)]
    pub description: Option<String>,

    #[arg(short, long)]
    pub category: Option<Category>,

    #[arg(short, long)]
    pub status: Option<Status>,

    /// Replace all tags with this comma-separated list ("" clears them).
    #[arg(long)]
    pub tags: Option<String>,

    #[arg(long, conflicts_with = "unassign")]
    pub assign: Option<String>,

    #[arg(long)]
    pub unassign: bool,

    #[arg(long, conflicts_with = "no_due")]
    pub due: Option<NaiveDate>,

    /// Remove the due date.
    #[arg(long)]
    pub no_due: bool,
}

impl EditArgs {
    /// Current field values with the requested changes applied.
    fn apply_to(&self, idea: &Idea) -> IdeaDraft {
        let assigned_to = if self.unassign {
            None
        } else if let Some(name) = &self.assign {
            Some(name.clone())
        } else {
            idea.is_assigned().then(|| idea.assigned_to.clone())
        };
        let due_date = if self.no_due { None } else { self.due.or(idea.due_date) };

        IdeaDraft {
            title: self.title.clone().unwrap_or_else(|| idea.title.clone()),
            description: self
                .description
                .clone()
                .unwrap_or_else(|| idea.description.clone()),
            category: self.category.unwrap_or(idea.category),
            status: self.status.unwrap_or(idea.status),
            tags: self
                .tags
                .as_deref()
                .map_or_else(|| idea.tags.clone(), parse_tag_list),
            assigned_to,
            due_date,
        }
    }
}

pub fn run_edit(args: &EditArgs, output: OutputMode, project_root: &Path) -> anyhow::Result<()> {
    let ctx = BoardContext::open(project_root).map_err(|e| fail(output, e))?;
    let identity = ctx.identity();
    let mut store = ctx.load_store();

    let id = store.resolve_id(&args.id).map_err(|e| fail(output, e))?;
    let draft = match store.get(&id) {
        Some(idea) => args.apply_to(idea),
        None => return Err(fail(output, IdeaError::IdeaNotFound(id))),
    };
    let idea = store
        .update(&id, draft, &identity)
        .map_err(|e| fail(output, e))?
        .clone();
    ctx.save_store(&store).map_err(|e| fail(output, e))?;
    info!(id = %idea.id, "idea edited");

    render(output, &idea, |idea, w| {
        writeln!(w, "✓ Updated {} {}", idea.short_id(), idea.title)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Wrapper {
        #[command(flatten)]
        args: EditArgs,
    }

    fn idea() -> Idea {
        Idea {
            id: "abc".into(),
            title: "Dark Mode".into(),
            description: "night".into(),
            category: Category::Ui,
            status: Status::New,
            tags: vec!["ux".into()],
            votes: 2,
            author: "Alice".into(),
            assigned_to: "Bob".into(),
            due_date: NaiveDate::from_ymd_opt(2025, 3, 1),
            comments: Vec::new(),
        }
    }

    #[test]
    fn untouched_fields_keep_their_values() {
        let w = Wrapper::parse_from(["test", "abc", "--status", "planned"]);
        let draft = w.args.apply_to(&idea());
        assert_eq!(draft.title, "Dark Mode");
        assert_eq!(draft.status, Status::Planned);
        assert_eq!(draft.tags, ["ux"]);
        assert_eq!(draft.assigned_to.as_deref(), Some("Bob"));
        assert_eq!(draft.due_date, NaiveDate::from_ymd_opt(2025, 3, 1));
    }

    #[test]
    fn clearing_flags_remove_values() {
        let w = Wrapper::parse_from(["test", "abc", "--unassign", "--no-due", "--tags", ""]);
        let draft = w.args.apply_to(&idea());
        assert!(draft.assigned_to.is_none());
        assert!(draft.due_date.is_none());
        assert!(draft.tags.is_empty());
    }

    #[test]
    fn assign_and_unassign_conflict() {
        assert!(Wrapper::try_parse_from(["test", "abc", "--assign", "x", "--unassign"]).is_err());
    }
}
