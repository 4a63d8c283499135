use crate::helpers::{BAD_DATA_DIR, BRONZE_DIR, LANDING_DIR};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

/// The three well-known directories a run works against.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum DirectoryRole {
    Landing,
    Bronze,
    BadData,
}

impl DirectoryRole {
    /// Validation order.
    pub const ALL: [DirectoryRole; 3] = [Self::Landing, Self::Bronze, Self::BadData];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Landing => LANDING_DIR,
            Self::Bronze => BRONZE_DIR,
            Self::BadData => BAD_DATA_DIR,
        }
    }

    /// Label used in per-file log lines.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Landing => "Landing",
            Self::Bronze => "Bronze",
            Self::BadData => "Bad Data",
        }
    }
}

impl std::fmt::Display for DirectoryRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Resolved locations of landing, bronze and bad_data.
#[derive(Debug, Clone)]
pub struct IngestLayout {
    pub landing: PathBuf,
    pub bronze: PathBuf,
    pub bad_data: PathBuf,
}

impl IngestLayout {
    pub fn new(landing: PathBuf, bronze: PathBuf, bad_data: PathBuf) -> Self {
        Self {
            landing,
            bronze,
            bad_data,
        }
    }

    /// Well-known directory names resolved under `base`.
    pub fn from_base(base: &Path) -> Self {
        Self::new(
            base.join(LANDING_DIR),
            base.join(BRONZE_DIR),
            base.join(BAD_DATA_DIR),
        )
    }

    pub fn path_for(&self, role: DirectoryRole) -> &Path {
        match role {
            DirectoryRole::Landing => &self.landing,
            DirectoryRole::Bronze => &self.bronze,
            DirectoryRole::BadData => &self.bad_data,
        }
    }
}

/// A regular file seen in landing at enumeration time.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FileEntry {
    pub path: PathBuf,
    pub name: String,
}

impl FileEntry {
    pub fn new(path: PathBuf, name: impl Into<String>) -> Self {
        Self {
            path,
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Classification {
    /// Non-empty file, bound for bronze.
    Processed,
    /// Zero-byte file, bound for bad_data.
    Rejected,
}

impl Classification {
    pub fn destination(self) -> DirectoryRole {
        match self {
            Self::Processed => DirectoryRole::Bronze,
            Self::Rejected => DirectoryRole::BadData,
        }
    }
}

/// How a file reached its destination.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum MoveStrategy {
    Renamed,
    Copied,
}

/// Result of handling one landing file. Failures never escape the loop.
#[derive(Debug, Clone)]
pub enum FileOutcome {
    Processed {
        name: String,
        size_bytes: u64,
        strategy: MoveStrategy,
    },
    Rejected {
        name: String,
        strategy: MoveStrategy,
    },
    Failed {
        name: String,
        reason: String,
    },
}

impl FileOutcome {
    pub fn name(&self) -> &str {
        match self {
            Self::Processed { name, .. }
            | Self::Rejected { name, .. }
            | Self::Failed { name, .. } => name,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Counters for one run. Created fresh each run, never persisted.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub processed: usize,
    pub rejected: usize,
    pub errors: usize,
    /// Regular files in the enumeration snapshot.
    pub total_in_landing: usize,
    /// Non-file entries left alone during enumeration.
    pub skipped: usize,
    /// Regular files still in landing after the loop; `None` if that query failed.
    pub remaining_in_landing: Option<usize>,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl RunSummary {
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            processed: 0,
            rejected: 0,
            errors: 0,
            total_in_landing: 0,
            skipped: 0,
            remaining_in_landing: None,
            started_at,
            finished_at: None,
        }
    }

    pub fn record(&mut self, outcome: &FileOutcome) {
        match outcome {
            FileOutcome::Processed { .. } => self.processed += 1,
            FileOutcome::Rejected { .. } => self.rejected += 1,
            FileOutcome::Failed { .. } => self.errors += 1,
        }
    }

    pub fn elapsed(&self) -> std::time::Duration {
        self.finished_at
            .and_then(|end| (end - self.started_at).to_std().ok())
            .unwrap_or_default()
    }

    pub fn exit_status(&self) -> ExitStatusLike {
        if self.errors > 0 {
            ExitStatusLike::Warning
        } else {
            ExitStatusLike::Ok
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ExitStatusLike {
    Ok,
    Warning,
    Error,
}

impl ExitStatusLike {
    pub fn as_code(self) -> u8 {
        match self {
            Self::Ok => 0,
            Self::Warning => 2,
            Self::Error => 1,
        }
    }
}
