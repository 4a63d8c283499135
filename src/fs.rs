use crate::errors::IngestError;
use crate::helpers::{build_staging_name, file_name_of, sanitize_user_path};
use crate::models::MoveStrategy;
use chrono::{DateTime, Utc};
use std::fs::{self, Metadata};
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Filesystem abstraction boundary for the runner.
///
/// Keeping this trait narrow makes it easy to inject failures in tests
/// without touching real permissions.
pub trait FileSystem: Send + Sync {
    /// Returns the current time in wall-clock format.
    fn now(&self) -> SystemTime;

    /// Returns true when path exists (symlink-aware).
    fn exists(&self, path: &Path) -> bool;

    /// Reads file metadata.
    fn metadata(&self, path: &Path) -> crate::Result<Metadata>;

    /// Reads symlink metadata.
    fn symlink_metadata(&self, path: &Path) -> crate::Result<Metadata>;

    /// Copies file contents, returning the number of bytes written.
    fn copy(&self, from: &Path, to: &Path) -> crate::Result<u64>;

    /// Removes a file.
    fn remove_file(&self, path: &Path) -> crate::Result<()>;

    /// Renames/moves a path.
    fn rename(&self, from: &Path, to: &Path) -> crate::Result<()>;

    /// Lists directory children as concrete paths.
    fn list_dir(&self, path: &Path) -> crate::Result<Vec<PathBuf>>;
}

/// Default filesystem implementation backed by `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }

    fn exists(&self, path: &Path) -> bool {
        fs::symlink_metadata(path).is_ok()
    }

    fn metadata(&self, path: &Path) -> crate::Result<Metadata> {
        fs::metadata(path).map_err(|err| IngestError::io(path, err))
    }

    fn symlink_metadata(&self, path: &Path) -> crate::Result<Metadata> {
        fs::symlink_metadata(path).map_err(|err| IngestError::io(path, err))
    }

    fn copy(&self, from: &Path, to: &Path) -> crate::Result<u64> {
        fs::copy(from, to).map_err(|err| IngestError::io(from, err))
    }

    fn remove_file(&self, path: &Path) -> crate::Result<()> {
        fs::remove_file(path).map_err(|err| IngestError::io(path, err))
    }

    fn rename(&self, from: &Path, to: &Path) -> crate::Result<()> {
        fs::rename(from, to).map_err(|err| IngestError::io(from, err))
    }

    fn list_dir(&self, path: &Path) -> crate::Result<Vec<PathBuf>> {
        fs::read_dir(path)
            .map_err(|err| IngestError::io(path, err))?
            .map(|entry| entry.map(|v| v.path()))
            .collect::<Result<Vec<PathBuf>, io::Error>>()
            .map_err(|err| IngestError::io(path, err))
    }
}

/// Moves `from` to `to` without ever overwriting an existing entry.
///
/// Uses a plain rename when possible. When source and destination live on
/// different filesystems the file is copied to a hidden staging name inside
/// the destination directory, renamed into place, and only then removed from
/// the source. On failure the file is left only at `from`; when a leftover
/// copy cannot be removed the error is [`IngestError::CleanupFailed`].
pub fn relocate<F>(fs: &F, from: &Path, to: &Path) -> crate::Result<MoveStrategy>
where
    F: FileSystem + ?Sized,
{
    if fs.exists(to) {
        return Err(IngestError::DestinationExists(to.to_path_buf()));
    }

    match fs.rename(from, to) {
        Ok(()) => Ok(MoveStrategy::Renamed),
        Err(err) if err.io_source().is_some_and(is_cross_device) => {
            copy_then_swap(fs, from, to)?;
            Ok(MoveStrategy::Copied)
        }
        Err(err) => Err(err),
    }
}

fn copy_then_swap<F>(fs: &F, from: &Path, to: &Path) -> crate::Result<()>
where
    F: FileSystem + ?Sized,
{
    let dir = to
        .parent()
        .ok_or_else(|| IngestError::invalid_path(sanitize_user_path(to)))?;
    let name =
        file_name_of(to).ok_or_else(|| IngestError::invalid_path(sanitize_user_path(to)))?;
    let staging = dir.join(build_staging_name(&name, DateTime::<Utc>::from(fs.now())));

    if let Err(err) = fs.copy(from, &staging) {
        return Err(discard(fs, &staging, err));
    }

    // The destination may have appeared while the copy was running.
    if fs.exists(to) {
        let err = IngestError::DestinationExists(to.to_path_buf());
        return Err(discard(fs, &staging, err));
    }

    if let Err(err) = fs.rename(&staging, to) {
        return Err(discard(fs, &staging, err));
    }

    if let Err(err) = fs.remove_file(from) {
        return Err(discard(fs, to, err));
    }

    Ok(())
}

/// Removes a copy left by a failed move. If the copy cannot be removed the
/// returned error names it alongside the original cause.
fn discard<F>(fs: &F, leftover: &Path, cause: IngestError) -> IngestError
where
    F: FileSystem + ?Sized,
{
    match fs.remove_file(leftover) {
        Ok(()) => cause,
        Err(err)
            if err
                .io_source()
                .is_some_and(|source| source.kind() == io::ErrorKind::NotFound) =>
        {
            cause
        }
        Err(rollback) => IngestError::CleanupFailed {
            cause: Box::new(cause),
            left_behind: leftover.to_path_buf(),
            rollback: Box::new(rollback),
        },
    }
}

#[cfg(unix)]
fn is_cross_device(err: &io::Error) -> bool {
    err.raw_os_error() == Some(libc::EXDEV)
}

#[cfg(windows)]
fn is_cross_device(err: &io::Error) -> bool {
    // ERROR_NOT_SAME_DEVICE
    err.raw_os_error() == Some(17)
}

#[cfg(not(any(unix, windows)))]
fn is_cross_device(_err: &io::Error) -> bool {
    false
}
