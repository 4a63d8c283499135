//! Run reporting. The runner emits events through [`Reporter`]; the binary
//! renders them as line-oriented log output with [`TracingReporter`].

use crate::errors::IngestError;
use crate::helpers::{format_duration, print_size, rule, sanitize_user_path};
use crate::models::{DirectoryRole, FileOutcome, IngestLayout, RunSummary};
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Fixed log filter. The environment is never consulted.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Installs a message-only stdout subscriber. Safe to call more than once.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(DEFAULT_LOG_FILTER))
        .with_writer(std::io::stdout)
        .with_ansi(false)
        .with_target(false)
        .with_level(false)
        .without_time()
        .try_init();
}

/// Receives the events of a single run, in order.
pub trait Reporter {
    fn run_started(&mut self, layout: &IngestLayout);

    /// The precondition check failed; nothing will be moved.
    fn run_aborted(&mut self, error: &IngestError);

    fn entry_skipped(&mut self, path: &Path);

    fn file_outcome(&mut self, outcome: &FileOutcome);

    fn summary(&mut self, summary: &RunSummary);

    fn landing_status(&mut self, remaining: usize);

    fn landing_check_failed(&mut self, error: &IngestError);

    fn run_finished(&mut self, summary: &RunSummary);
}

/// Renders run events through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn run_started(&mut self, layout: &IngestLayout) {
        tracing::info!("Starting Bronze Ingestor Pipeline...");
        tracing::info!("{}", rule());
        for role in DirectoryRole::ALL {
            tracing::debug!("{}: {}", role, sanitize_user_path(layout.path_for(role)));
        }
    }

    fn run_aborted(&mut self, error: &IngestError) {
        tracing::error!("Error: {error}");
    }

    fn entry_skipped(&mut self, path: &Path) {
        tracing::debug!("Skipping non-file entry {}", sanitize_user_path(path));
    }

    fn file_outcome(&mut self, outcome: &FileOutcome) {
        match outcome {
            FileOutcome::Processed {
                name, size_bytes, ..
            } => tracing::info!(
                "Processed: {name} ({}) -> {}",
                print_size(*size_bytes),
                DirectoryRole::Bronze.label()
            ),
            FileOutcome::Rejected { name, .. } => {
                tracing::info!("Rejected: {name} -> {}", DirectoryRole::BadData.label())
            }
            FileOutcome::Failed { name, reason } => {
                tracing::error!("Error processing {name}: {reason}")
            }
        }
    }

    fn summary(&mut self, summary: &RunSummary) {
        tracing::info!("");
        tracing::info!("{}", rule());
        tracing::info!("PROCESSING SUMMARY:");
        tracing::info!("Files processed (Bronze): {}", summary.processed);
        tracing::info!("Files rejected (Bad Data): {}", summary.rejected);
        tracing::info!("Errors: {}", summary.errors);
        tracing::info!("Total files in landing: {}", summary.total_in_landing);
        if summary.skipped > 0 {
            tracing::debug!("Non-file entries skipped: {}", summary.skipped);
        }
        tracing::info!("Elapsed: {}", format_duration(summary.elapsed()));
        tracing::info!("{}", rule());
    }

    fn landing_status(&mut self, remaining: usize) {
        if remaining == 0 {
            tracing::info!("✓ Landing directory is empty");
        } else {
            tracing::warn!("⚠ {remaining} file(s) still in landing");
        }
    }

    fn landing_check_failed(&mut self, error: &IngestError) {
        tracing::warn!("⚠ Could not re-check landing: {error}");
    }

    fn run_finished(&mut self, _summary: &RunSummary) {
        tracing::info!("");
        tracing::info!("Process completed!");
    }
}
