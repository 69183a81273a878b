#![forbid(unsafe_code)]

mod cmd;
mod context;
mod output;

use clap::{CommandFactory, Parser, Subcommand};
use output::OutputMode;
use std::env;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "ib: a shared board for proposing, voting on, and triaging ideas",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Only log errors.
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Setup",
        about = "Initialize an idea board",
        long_about = "Create .ideaboard/ with a default config in the current directory.",
        after_help = "EXAMPLES:\n    # Initialize a board here\n    ib init\n\n    # Rewrite the default config\n    ib init --force"
    )]
    Init(cmd::init::InitArgs),

    #[command(
        next_help_heading = "Session",
        about = "Sign in with a display name",
        after_help = "EXAMPLES:\n    # Sign in\n    ib login Alice\n\n    # Act as someone else for one command\n    IDEABOARD_USER=Bob ib comment abc \"+1\""
    )]
    Login(cmd::session::LoginArgs),

    #[command(next_help_heading = "Session", about = "Sign out and browse as Guest")]
    Logout,

    #[command(next_help_heading = "Session", about = "Show the acting identity")]
    Whoami,

    #[command(
        next_help_heading = "Ideas",
        about = "Post a new idea",
        after_help = "EXAMPLES:\n    # Post an idea\n    ib add -t \"Dark Mode\" -d \"A night theme\" -c UI --tags ux,theme\n\n    # With an assignee and due date\n    ib add -t \"API v2\" -d \"Rework\" -c Backend --assign Bob --due 2025-03-31"
    )]
    Add(cmd::add::AddArgs),

    #[command(
        next_help_heading = "Ideas",
        about = "Edit an idea you posted",
        after_help = "EXAMPLES:\n    # Move an idea along\n    ib edit abc --status \"In Progress\"\n\n    # Clear the due date\n    ib edit abc --no-due"
    )]
    Edit(cmd::edit::EditArgs),

    #[command(
        next_help_heading = "Ideas",
        about = "Delete an idea you posted",
        after_help = "EXAMPLES:\n    # Delete without a prompt\n    ib delete abc --force"
    )]
    Delete(cmd::delete::DeleteArgs),

    #[command(next_help_heading = "Ideas", about = "Upvote an idea")]
    Vote(cmd::vote::VoteArgs),

    #[command(
        next_help_heading = "Ideas",
        about = "Comment on an idea",
        after_help = "EXAMPLES:\n    # Comment (requires ib login)\n    ib comment abc \"Love this\""
    )]
    Comment(cmd::comment::CommentArgs),

    #[command(
        next_help_heading = "Read",
        about = "Show one idea",
        after_help = "EXAMPLES:\n    # Use a short prefix when unique\n    ib show abc\n\n    # Emit machine-readable output\n    ib show abc --json"
    )]
    Show(cmd::show::ShowArgs),

    #[command(
        next_help_heading = "Read",
        about = "List ideas",
        long_about = "List ideas through a view: search, category, status, tag, assignment, sort, and timeline grouping. The view is printed as a query string that --view accepts.",
        after_help = "EXAMPLES:\n    # Most voted first\n    ib list --sort votes\n\n    # Reopen a printed view and narrow it\n    ib list --view \"?sort=votes&category=UI\" --tag ux\n\n    # Your ideas, grouped by due month\n    ib list --mine --timeline"
    )]
    List(cmd::list::ListArgs),

    #[command(next_help_heading = "Read", about = "List tags with usage counts")]
    Tags,

    #[command(next_help_heading = "Read", about = "Board dashboard")]
    Stats,

    #[command(
        next_help_heading = "Transfer",
        about = "Export all ideas as JSON",
        after_help = "EXAMPLES:\n    # Write idea_board_data.json\n    ib export\n\n    # Print to stdout\n    ib export -o -"
    )]
    Export(cmd::export::ExportArgs),

    #[command(
        next_help_heading = "Transfer",
        about = "Replace all ideas from a JSON export",
        after_help = "EXAMPLES:\n    # Replace the board without a prompt\n    ib import idea_board_data.json --yes"
    )]
    Import(cmd::import::ImportArgs),

    #[command(
        next_help_heading = "Setup",
        about = "Generate shell completion scripts",
        after_help = "EXAMPLES:\n    # Generate bash completions\n    ib completions bash"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

/// Directives used when `IDEABOARD_LOG` is unset. Events from this binary
/// have target `ib::…`, the library's `ideaboard_core::…`.
const fn default_directives(verbose: bool, quiet: bool) -> &'static str {
    if verbose {
        "ib=debug,ideaboard_core=debug,info"
    } else if quiet {
        "error"
    } else {
        "ib=info,ideaboard_core=info,warn"
    }
}

fn init_tracing(verbose: bool, quiet: bool) {
    let verbose = verbose || env::var("DEBUG").is_ok();
    let filter = EnvFilter::try_from_env("IDEABOARD_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose, quiet)));

    let format = env::var("IDEABOARD_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let project_root = env::current_dir()?;
    let output: OutputMode = output::resolve_output_mode(cli.json);

    match cli.command {
        Commands::Init(ref args) => cmd::init::run_init(args, output, &project_root),
        Commands::Login(ref args) => cmd::session::run_login(args, output, &project_root),
        Commands::Logout => cmd::session::run_logout(output, &project_root),
        Commands::Whoami => cmd::session::run_whoami(output, &project_root),
        Commands::Add(ref args) => cmd::add::run_add(args, output, &project_root),
        Commands::Edit(ref args) => cmd::edit::run_edit(args, output, &project_root),
        Commands::Delete(ref args) => cmd::delete::run_delete(args, output, &project_root),
        Commands::Vote(ref args) => cmd::vote::run_vote(args, output, &project_root),
        Commands::Comment(ref args) => cmd::comment::run_comment(args, output, &project_root),
        Commands::Show(ref args) => cmd::show::run_show(args, output, &project_root),
        Commands::List(ref args) => cmd::list::run_list(args, output, &project_root),
        Commands::Tags => cmd::tags::run_tags(output, &project_root),
        Commands::Stats => cmd::stats::run_stats(output, &project_root),
        Commands::Export(ref args) => cmd::export::run_export(args, output, &project_root),
        Commands::Import(ref args) => cmd::import::run_import(args, output, &project_root),
        Commands::Completions(ref args) => {
            let mut command = Cli::command();
            cmd::completions::run_completions(args.shell, &mut command)
        }
    }
}
