//! mr-roundup - round up open GitLab merge requests
//!
//! This library gathers open merge requests from a GitLab group and its
//! projects, collapses duplicates, and filters out the ones that do not need
//! the viewer's attention (drafts, already approved, ready to merge).
//!
//! # Architecture
//!
//! - [`config`] - the on-disk configuration and its persistence
//! - [`selection`] - resolving caller overrides against the configuration
//! - [`platform`] - the merge request query service (GitLab)
//! - [`collect`] - planning, fetching, deduplicating and filtering
//! - [`report`] / [`browser`] - presenting the final set
//!
//! All I/O is async and state is passed explicitly (no globals).

pub mod auth;
pub mod browser;
pub mod collect;
pub mod config;
pub mod error;
pub mod platform;
pub mod report;
pub mod selection;
pub mod types;

pub use error::{Error, Result};
pub use types::*;
