//! On-demand source and build snapshots.
//!
//! # Data Flow
//! ```text
//! GET /download?type=source|build
//!     → http/download.rs (validate type, name the download)
//!     → Archiver::archive(kind)
//!         TarArchiver: [build step] → tar into ArchiveJob temp file
//!                      → read bytes → temp file removed
//!     → application/gzip response
//! ```
//!
//! # Design Decisions
//! - `Archiver` is a trait so handlers never depend on an OS tool
//! - Temp files are owned by `ArchiveJob`; dropping it removes the file,
//!   so every exit path cleans up
//! - No subprocess timeout; the download route sits outside the request
//!   timeout layer

pub mod job;
pub mod tar;

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use thiserror::Error;

pub use job::ArchiveJob;
pub use tar::TarArchiver;

/// What to snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnapshotKind {
    /// The project tree minus dependencies, build output and VCS metadata.
    Source,
    /// The output of the web export build.
    Build,
}

impl SnapshotKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SnapshotKind::Source => "source",
            SnapshotKind::Build => "build",
        }
    }
}

impl fmt::Display for SnapshotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SnapshotKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "source" => Ok(SnapshotKind::Source),
            "build" => Ok(SnapshotKind::Build),
            other => Err(format!("Invalid type '{}'. Use 'source' or 'build'", other)),
        }
    }
}

/// Errors from building an archive.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A subprocess ran but exited unsuccessfully.
    #[error("{step} failed ({status}): {stderr}")]
    CommandFailed {
        step: &'static str,
        status: String,
        stderr: String,
    },

    /// A subprocess could not be started at all.
    #[error("{step} could not be started: {source}")]
    Spawn {
        step: &'static str,
        #[source]
        source: std::io::Error,
    },
}

/// Produces a gzip-compressed tar snapshot.
#[async_trait]
pub trait Archiver: Send + Sync {
    async fn archive(&self, kind: SnapshotKind) -> Result<Bytes, ArchiveError>;
}

/// Download filename: `{project}-{kind}-{YYYYMMDD-HHMMSS}.tar.gz` in UTC.
pub fn archive_filename(project: &str, kind: SnapshotKind, at: DateTime<Utc>) -> String {
    format!("{}-{}-{}.tar.gz", project, kind, at.format("%Y%m%d-%H%M%S"))
}
