//! roundup - list open GitLab merge requests that need your review

mod cli;

use clap::{Args, Parser, Subcommand};
use cli::{ListOptions, PersistMode, run_init, run_list};
use mr_roundup::selection::{InclusionFlags, Overrides, ScopeFlags};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "roundup")]
#[command(about = "Round up open GitLab merge requests across a group and its projects")]
#[command(version)]
struct Cli {
    /// Path to the configuration file
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List open merge requests
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Create the configuration directory and a sample configuration
    Init,
}

#[derive(Args)]
#[allow(clippy::struct_excessive_bools)]
struct ListArgs {
    /// Include merge requests you already approved
    #[arg(short, long)]
    approved: bool,

    /// Open each merge request in the browser
    #[arg(short, long)]
    browser: bool,

    /// Include draft merge requests
    #[arg(short, long)]
    draft: bool,

    /// Only search the group usernames
    #[arg(short, long)]
    group: bool,

    /// Only search the per-project usernames
    #[arg(short, long)]
    projects: bool,

    /// Include merge requests that are ready to merge
    #[arg(short, long)]
    ready: bool,

    /// Group id or path, replacing the configured one
    #[arg(short = 'i', long, value_name = "ID")]
    group_id: Option<String>,

    /// Your GitLab user id, replacing the configured one
    #[arg(short, long, value_name = "USER_ID")]
    me: Option<u64>,

    /// Access token, replacing the configured one
    #[arg(short = 't', long, value_name = "TOKEN")]
    access_token: Option<String>,

    /// Comma-separated usernames, replacing every configured list
    #[arg(short, long, value_name = "CSV")]
    users: Option<String>,

    /// Save overridden values to the configuration without asking
    #[arg(short, long, conflicts_with = "no_persist")]
    yes: bool,

    /// Never offer to save overridden values
    #[arg(long)]
    no_persist: bool,
}

impl ListArgs {
    fn into_options(self) -> ListOptions {
        let persist = if self.yes {
            PersistMode::Always
        } else if self.no_persist {
            PersistMode::Never
        } else {
            PersistMode::Ask
        };

        ListOptions {
            overrides: Overrides {
                access_token: self.access_token,
                group_id: self.group_id,
                me: self.me,
                usernames: self.users,
            },
            scopes: ScopeFlags {
                group: self.group,
                projects: self.projects,
            },
            include: InclusionFlags {
                drafts: self.draft,
                approved: self.approved,
                ready: self.ready,
            },
            open_browser: self.browser,
            persist,
        }
    }
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::List(args) => {
            run_list(cli.config.as_deref(), args.into_options()).await?;
        }
        Commands::Init => {
            run_init(cli.config.as_deref())?;
        }
    }

    Ok(())
}
