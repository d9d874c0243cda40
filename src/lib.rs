#![deny(clippy::unwrap_used)]

mod board;
pub mod cli;
mod entry;
mod makefile;

pub use board::*;
pub use entry::*;
pub use makefile::*;

use itertools::Itertools;
use std::{ffi::OsStr, path::PathBuf, sync::Arc};

/// Where device nodes live unless `--dir` says otherwise.
pub const DEFAULT_DEVICE_DIR: &str = "/dev";

/// Matches the call-out devices USB serial adapters and USB modems get on macOS.
pub const DEFAULT_BOARD_REGEX: &str = r"cu\.usb(serial|modem)";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid board pattern '{pattern}'")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("failed to read {}", .dir.display())]
    ReadDir {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no device matching '{pattern}' found in {}", .dir.display())]
    NoMatch { pattern: String, dir: PathBuf },
    #[error(
        "more than one device matching '{pattern}' found in {}:\n  {}",
        .dir.display(),
        candidate_lines(.candidates)
    )]
    MultipleMatches {
        pattern: String,
        dir: PathBuf,
        candidates: Vec<Arc<OsStr>>,
    },
    #[error("invalid makefile template")]
    Template(#[from] TemplateError),
    #[error("failed to write output")]
    Write(#[from] std::io::Error),
}

fn candidate_lines(candidates: &[Arc<OsStr>]) -> String {
    candidates
        .iter()
        .map(|name| name.to_string_lossy())
        .join("\n  ")
}
