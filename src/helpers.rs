//! Shared utility helpers for naming, display and log formatting.

use chrono::{DateTime, Utc};
use std::path::Path;
use std::time::Duration;

/// Inbound staging directory name.
pub const LANDING_DIR: &str = "landing";

/// Destination for non-empty files.
pub const BRONZE_DIR: &str = "bronze";

/// Destination for zero-byte files.
pub const BAD_DATA_DIR: &str = "bad_data";

/// Prefix of in-flight copies written during a cross-device move.
pub const STAGING_PREFIX: &str = ".ingest-";

/// Timestamp format embedded in staging names.
pub const STAGING_TIME_FORMAT: &str = "%Y%m%dT%H%M%S%.f";

/// Width of the `=` rules framing the summary block.
pub const RULE_WIDTH: usize = 50;

/// Returns a user-safe, trimmed path string that can be used in logs and messages.
pub fn sanitize_user_path(path: &Path) -> String {
    path.display().to_string().trim().to_string()
}

/// Final path component as a string, lossily converted.
pub fn file_name_of(path: &Path) -> Option<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
}

/// Hidden, per-process name for a copy staged inside the destination directory.
pub fn build_staging_name(file_name: &str, at: DateTime<Utc>) -> String {
    format!(
        "{STAGING_PREFIX}{file_name}.{}.{}.tmp",
        std::process::id(),
        at.format(STAGING_TIME_FORMAT)
    )
}

pub fn is_staging_name(file_name: &str) -> bool {
    file_name.starts_with(STAGING_PREFIX) && file_name.ends_with(".tmp")
}

pub fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// Human readable size rendering.
pub fn print_size(bytes: u64) -> String {
    const SUFFIXES: [&str; 5] = ["B", "K", "M", "G", "T"];
    let mut value = bytes as f64;
    let mut idx = 0usize;

    while value >= 1024.0 && idx < SUFFIXES.len() - 1 {
        value /= 1024.0;
        idx += 1;
    }

    if idx == 0 {
        format!("{:.0} {}", value, SUFFIXES[idx])
    } else {
        format!("{:.1} {}", value, SUFFIXES[idx])
    }
}

pub fn format_duration(duration: Duration) -> String {
    let millis = duration.as_millis();
    let secs = duration.as_secs();
    let mins = secs / 60;
    let hours = mins / 60;

    if hours > 0 {
        format!("{hours}h {:02}:{:02}", mins % 60, secs % 60)
    } else if mins > 0 {
        format!("{mins}m {:02}s", secs % 60)
    } else if secs > 0 {
        format!("{}.{:03}s", secs, millis % 1000)
    } else {
        format!("{millis}ms")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn sizes_render_with_binary_units() {
        assert_eq!(print_size(0), "0 B");
        assert_eq!(print_size(10), "10 B");
        assert_eq!(print_size(1536), "1.5 K");
        assert_eq!(print_size(5 * 1024 * 1024), "5.0 M");
    }

    #[test]
    fn durations_pick_the_largest_unit() {
        assert_eq!(format_duration(Duration::from_millis(42)), "42ms");
        assert_eq!(format_duration(Duration::from_millis(2_500)), "2.500s");
        assert_eq!(format_duration(Duration::from_secs(125)), "2m 05s");
        assert_eq!(format_duration(Duration::from_secs(3_725)), "1h 02:05");
    }

    #[test]
    fn staging_names_are_hidden_and_recognizable() {
        let at = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        let name = build_staging_name("a.csv", at);
        assert!(name.starts_with(".ingest-a.csv."));
        assert!(name.contains("20260102T030405"));
        assert!(is_staging_name(&name));
        assert!(!is_staging_name("a.csv"));
    }

    #[test]
    fn rule_has_fixed_width() {
        assert_eq!(rule().len(), RULE_WIDTH);
    }
}
