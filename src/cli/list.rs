//! List command - print open merge requests worth reviewing

use crate::cli::CliProgress;
use crate::cli::context::CommandContext;
use crate::cli::style::{Stylize, link};
use anstream::{eprintln, println};
use dialoguer::Confirm;
use mr_roundup::browser::open_merge_requests;
use mr_roundup::collect::collect_merge_requests;
use mr_roundup::config::update_config_field;
use mr_roundup::error::{Error, Result};
use mr_roundup::report::write_report;
use mr_roundup::selection::{InclusionFlags, Overrides, ScopeFlags, SelectionCriteria};
use mr_roundup::types::MergeRequest;
use std::io::IsTerminal;
use std::path::Path;
use tracing::debug;

/// What to do with overrides that differ from the configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PersistMode {
    /// Ask for each field
    #[default]
    Ask,
    /// Save without asking
    Always,
    /// Never save
    Never,
}

/// Options for the list command
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    /// Values replacing the configured ones for this run
    pub overrides: Overrides,
    /// Active author scopes
    pub scopes: ScopeFlags,
    /// Disabled exclusions
    pub include: InclusionFlags,
    /// Open each merge request in the browser
    pub open_browser: bool,
    /// Whether overrides are written back
    pub persist: PersistMode,
}

/// Run the list command
#[allow(clippy::future_not_send)]
pub async fn run_list(config_path: Option<&Path>, options: ListOptions) -> Result<()> {
    let ctx = CommandContext::new(config_path, &options.overrides)?;
    let criteria = SelectionCriteria::new(&ctx.settings, options.scopes, options.include);

    let progress = CliProgress::spinner();
    let result =
        collect_merge_requests(ctx.platform.as_ref(), &ctx.config, &criteria, &progress).await;
    progress.finish();
    let mrs = result?;

    print_merge_requests(&mrs)?;

    if options.open_browser {
        let failures = open_merge_requests(&mrs);
        if !failures.is_empty() {
            eprintln!(
                "{}",
                format!("Could not open {} merge request(s) in the browser", failures.len())
                    .warn()
            );
        }
    }

    persist_overrides(&ctx, options.persist)
}

fn print_merge_requests(mrs: &[MergeRequest]) -> Result<()> {
    if mrs.is_empty() {
        eprintln!("{}", "No open merge requests need your attention.".muted());
        return Ok(());
    }

    let stdout = std::io::stdout();
    if !stdout.is_terminal() {
        write_report(&mut stdout.lock(), mrs)?;
        return Ok(());
    }

    for mr in mrs {
        println!(
            "{}: {}",
            format!("@{}", mr.author.username).emphasis(),
            link(&mr.web_url, &mr.web_url)
        );
    }
    Ok(())
}

fn persist_overrides(ctx: &CommandContext, mode: PersistMode) -> Result<()> {
    if mode == PersistMode::Never {
        return Ok(());
    }
    if mode == PersistMode::Ask && !std::io::stdin().is_terminal() {
        debug!("stdin is not a terminal; not offering to save overrides");
        return Ok(());
    }

    for update in ctx.settings.pending_updates() {
        let keep = match mode {
            PersistMode::Always => true,
            PersistMode::Never => false,
            PersistMode::Ask => Confirm::new()
                .with_prompt(format!(
                    "Do you want to use the same {} in the future?",
                    update.field.label()
                ))
                .default(false)
                .interact()
                .map_err(|e| Error::Internal(format!("Failed to read confirmation: {e}")))?,
        };
        if keep {
            update_config_field(&ctx.config_path, &update)?;
            eprintln!(
                "{} Saved {} to {}",
                crate::cli::style::check(),
                update.field.label().emphasis(),
                ctx.config_path.display().muted()
            );
        }
    }
    Ok(())
}
