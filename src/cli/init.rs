//! Init command - create the configuration home

use crate::cli::style::{Stylize, check};
use anstream::println;
use mr_roundup::config::{default_config_path, init_config};
use mr_roundup::error::Result;
use std::path::Path;

/// Run the init command
pub fn run_init(config_path: Option<&Path>) -> Result<()> {
    let config_path = match config_path {
        Some(path) => path.to_path_buf(),
        None => default_config_path()?,
    };

    let outcome = init_config(&config_path)?;

    if outcome.created_home {
        if let Some(home) = config_path.parent() {
            println!("{} Created {}", check(), home.display().accent());
        }
    }
    if outcome.created_config {
        println!(
            "{} Wrote sample configuration to {}",
            check(),
            outcome.config_path.display().accent()
        );
        println!(
            "{}",
            "Fill in group_id, me and usernames before running 'roundup list'.".muted()
        );
    } else {
        println!(
            "{}",
            format!(
                "Configuration already exists at {}",
                outcome.config_path.display()
            )
            .muted()
        );
    }
    Ok(())
}
