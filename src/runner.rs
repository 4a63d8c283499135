//! The classifier runner: validate directories, snapshot landing, move each
//! file by size, then summarize.

use crate::errors::{IngestError, Result};
use crate::fs::{relocate, FileSystem};
use crate::helpers::{file_name_of, sanitize_user_path};
use crate::models::{
    Classification, DirectoryRole, FileEntry, FileOutcome, IngestLayout, RunSummary,
};
use crate::report::Reporter;
use chrono::{DateTime, Utc};
use std::io;
use std::path::PathBuf;

/// Landing contents captured once at the start of a run.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    /// Regular files, sorted by path.
    pub files: Vec<FileEntry>,
    /// Directories, symlinks and anything else left in place.
    pub skipped: Vec<PathBuf>,
}

/// Maps a byte size to its destination class.
pub fn classify(size_bytes: u64) -> Classification {
    if size_bytes > 0 {
        Classification::Processed
    } else {
        Classification::Rejected
    }
}

pub struct Runner<F, R> {
    layout: IngestLayout,
    fs: F,
    reporter: R,
}

impl<F: FileSystem, R: Reporter> Runner<F, R> {
    pub fn new(layout: IngestLayout, fs: F, reporter: R) -> Self {
        Self {
            layout,
            fs,
            reporter,
        }
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    /// Checks landing, bronze and bad_data in that order; stops at the first problem.
    pub fn validate_directories(&self) -> Result<()> {
        for role in DirectoryRole::ALL {
            let path = self.layout.path_for(role);
            match self.fs.metadata(path) {
                Ok(meta) if meta.is_dir() => {}
                Ok(_) => return Err(IngestError::NotADirectory(role, path.to_path_buf())),
                Err(err)
                    if err
                        .io_source()
                        .is_some_and(|source| source.kind() == io::ErrorKind::NotFound) =>
                {
                    return Err(IngestError::MissingDirectory(role, path.to_path_buf()));
                }
                Err(err) => return Err(err),
            }
        }
        Ok(())
    }

    /// Lists landing once. Entries that cannot be inspected count as non-files.
    pub fn enumerate_landing(&self) -> Result<Snapshot> {
        let mut paths = self.fs.list_dir(&self.layout.landing)?;
        paths.sort();

        let mut snapshot = Snapshot::default();
        for path in paths {
            let is_file = self
                .fs
                .symlink_metadata(&path)
                .map(|meta| meta.is_file())
                .unwrap_or(false);
            match file_name_of(&path) {
                Some(name) if is_file => snapshot.files.push(FileEntry::new(path, name)),
                _ => snapshot.skipped.push(path),
            }
        }
        Ok(snapshot)
    }

    /// Classifies and moves one file. Every failure is folded into the outcome.
    pub fn process_entry(&self, entry: &FileEntry) -> FileOutcome {
        match self.move_entry(entry) {
            Ok(outcome) => outcome,
            Err(err) => FileOutcome::Failed {
                name: entry.name.clone(),
                reason: err.to_string(),
            },
        }
    }

    fn move_entry(&self, entry: &FileEntry) -> Result<FileOutcome> {
        let size_bytes = self.fs.symlink_metadata(&entry.path)?.len();
        let class = classify(size_bytes);
        let file_name = entry
            .path
            .file_name()
            .ok_or_else(|| IngestError::invalid_path(sanitize_user_path(&entry.path)))?;
        let destination = self.layout.path_for(class.destination()).join(file_name);

        let strategy = relocate(&self.fs, &entry.path, &destination)?;
        tracing::debug!(
            "{} -> {} ({:?})",
            sanitize_user_path(&entry.path),
            sanitize_user_path(&destination),
            strategy
        );

        Ok(match class {
            Classification::Processed => FileOutcome::Processed {
                name: entry.name.clone(),
                size_bytes,
                strategy,
            },
            Classification::Rejected => FileOutcome::Rejected {
                name: entry.name.clone(),
                strategy,
            },
        })
    }

    /// Regular files currently in landing. Queried separately from the snapshot.
    pub fn remaining_in_landing(&self) -> Result<usize> {
        let remaining = self
            .fs
            .list_dir(&self.layout.landing)?
            .iter()
            .filter(|path| {
                self.fs
                    .symlink_metadata(path)
                    .map(|meta| meta.is_file())
                    .unwrap_or(false)
            })
            .count();
        Ok(remaining)
    }

    /// Performs one full run. `Err` means the run was aborted before any move.
    pub fn run(&mut self) -> Result<RunSummary> {
        let mut summary = RunSummary::new(self.now());
        self.reporter.run_started(&self.layout);

        let snapshot = match self
            .validate_directories()
            .and_then(|()| self.enumerate_landing())
        {
            Ok(snapshot) => snapshot,
            Err(err) => {
                self.reporter.run_aborted(&err);
                return Err(err);
            }
        };

        for path in &snapshot.skipped {
            self.reporter.entry_skipped(path);
        }
        summary.skipped = snapshot.skipped.len();
        summary.total_in_landing = snapshot.files.len();

        for entry in &snapshot.files {
            let outcome = self.process_entry(entry);
            self.reporter.file_outcome(&outcome);
            summary.record(&outcome);
        }
        summary.finished_at = Some(self.now());

        let remaining = self.remaining_in_landing();
        summary.remaining_in_landing = remaining.as_ref().ok().copied();

        self.reporter.summary(&summary);
        match remaining {
            Ok(count) => self.reporter.landing_status(count),
            Err(err) => self.reporter.landing_check_failed(&err),
        }
        self.reporter.run_finished(&summary);

        Ok(summary)
    }

    fn now(&self) -> DateTime<Utc> {
        DateTime::<Utc>::from(self.fs.now())
    }
}
