//! Command implementations for the `roundup` binary

mod context;
mod init;
mod list;
pub mod style;

pub use init::run_init;
pub use list::{ListOptions, PersistMode, run_list};

use async_trait::async_trait;
use indicatif::ProgressBar;
use mr_roundup::collect::{FetchProgress, FetchStep};
use std::time::Duration;
use style::{Stylize, check, spinner_style};

/// Spinner on stderr that follows the fetch steps
pub struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    /// Start a spinner; hidden when stderr is not a terminal
    pub fn spinner() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(spinner_style());
        spinner.enable_steady_tick(Duration::from_millis(80));
        Self { spinner }
    }

    /// Remove the spinner line
    pub fn finish(&self) {
        self.spinner.finish_and_clear();
    }
}

#[async_trait]
impl FetchProgress for CliProgress {
    async fn on_step_started(&self, step: &FetchStep) {
        self.spinner.set_message(format!("Fetching {step}..."));
    }

    async fn on_step_finished(&self, step: &FetchStep, count: usize) {
        self.spinner
            .println(format!("{} {step}: {}", check(), count.accent()));
    }
}
