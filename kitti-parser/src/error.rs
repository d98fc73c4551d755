use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("no scan files found for sequence {sequence:02} under {}", .root.display())]
    EmptySequence { root: PathBuf, sequence: u32 },

    #[error("scan file name {0:?} is not a numeric index")]
    BadScanFileName(PathBuf),

    #[error("scan file {}: byte length {len} is not a multiple of 16", .path.display())]
    TruncatedScan { path: PathBuf, len: u64 },

    #[error("pose line {line}: expected 12 or 13 fields, found {count}")]
    MalformedPoseLine { line: usize, count: usize },

    #[error("pose line {line}: field {field:?} is not numeric")]
    MalformedPoseField { line: usize, field: String },

    #[error("pose line {line}: explicit frame index {value} is not an integer")]
    BadFrameIndex { line: usize, value: f64 },

    #[error("timestamp line {line}: {text:?} does not match the fixed layout")]
    MalformedTimestamp { line: usize, text: String },

    #[error("failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
