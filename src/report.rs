//! Plain-text report of collected merge requests
//!
//! One line per merge request: `@author: url`. The CLI adds color and
//! hyperlinks on top of this; the plain form is what gets piped.

use crate::types::MergeRequest;
use std::io::Write;

/// Format a single report line
pub fn format_line(mr: &MergeRequest) -> String {
    format!("@{}: {}", mr.author.username, mr.web_url)
}

/// Write one line per merge request, in result order
pub fn write_report<W: Write>(out: &mut W, mrs: &[MergeRequest]) -> std::io::Result<()> {
    for mr in mrs {
        writeln!(out, "{}", format_line(mr))?;
    }
    Ok(())
}
