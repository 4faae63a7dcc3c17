//! Opening merge requests in the system browser.
//!
//! Failures here never abort a run: each one is logged and returned so the
//! caller can mention it.

use crate::error::{Error, Result};
use crate::types::MergeRequest;
use std::process::{Command, Stdio};
use tracing::{debug, warn};

/// Program and leading arguments used to open a URL on this platform
const fn opener() -> (&'static str, &'static [&'static str]) {
    if cfg!(target_os = "macos") {
        ("open", &[])
    } else if cfg!(target_os = "windows") {
        ("cmd", &["/c", "start", ""])
    } else {
        ("xdg-open", &[])
    }
}

/// Open a single URL
///
/// The opener is launched and left running; only a failure to start it is
/// reported.
pub fn open_url(url: &str) -> Result<()> {
    let (program, args) = opener();
    launch(program, args, url)
}

// The opener is never waited on; it may outlive the call
#[allow(clippy::zombie_processes)]
fn launch(program: &str, args: &[&str], url: &str) -> Result<()> {
    if url.trim().is_empty() {
        return Err(Error::BrowserOpen {
            url: url.to_string(),
            message: "empty URL".to_string(),
        });
    }

    debug!(program, url, "opening in browser");

    Command::new(program)
        .args(args)
        .arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| Error::BrowserOpen {
            url: url.to_string(),
            message: format!("failed to run {program}: {e}"),
        })?;

    Ok(())
}

/// Open every merge request, continuing past failures
///
/// Returns the errors encountered, one per merge request that failed.
pub fn open_merge_requests(mrs: &[MergeRequest]) -> Vec<Error> {
    let mut failures = Vec::new();
    for mr in mrs {
        if let Err(e) = open_url(&mr.web_url) {
            warn!(url = %mr.web_url, error = %e, "could not open merge request");
            failures.push(e);
        }
    }
    failures
}
