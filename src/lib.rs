//! Classifies files dropped into `landing/` by content size: non-empty files
//! move to `bronze/`, zero-byte files to `bad_data/`.
//!
//! A run is a single synchronous pass. Per-file failures are counted and
//! logged but never stop the pass; a missing directory aborts it before any
//! file is touched.

pub mod errors;
pub mod fs;
pub mod helpers;
pub mod models;
pub mod report;
pub mod runner;

pub use errors::{IngestError, Result};
pub use fs::{relocate, FileSystem, RealFileSystem};
pub use helpers::{
    format_duration,
    print_size,
    sanitize_user_path,
    BAD_DATA_DIR,
    BRONZE_DIR,
    LANDING_DIR,
};
pub use models::{
    Classification,
    DirectoryRole,
    ExitStatusLike,
    FileEntry,
    FileOutcome,
    IngestLayout,
    MoveStrategy,
    RunSummary,
};
pub use report::{init_logging, Reporter, TracingReporter};
pub use runner::{classify, Runner, Snapshot};

/// Re-export a small stable API surface for callers.
pub mod prelude {
    pub use crate::{
        errors::{IngestError, Result},
        fs::{FileSystem, RealFileSystem},
        models::*,
        report::{Reporter, TracingReporter},
        runner::{classify, Runner},
    };
}
