//! # Project Files
//!
//! Reading and writing `.est` project files:
//! - **Atomic saves**: write `.est.tmp`, fsync, then rename over the target
//! - **File locking**: an OS lock plus a `.est.lock` file naming the holder,
//!   so a project on a shared drive is edited by one person at a time
//! - **Version validation**: files from an incompatible schema are refused
//!
//! ## Example
//!
//! ```rust,no_run
//! use estimate_core::file_io::{load_project, save_project, FileLock};
//! use estimate_core::project::EstimateProject;
//! use std::path::Path;
//!
//! let path = Path::new("site-07.est");
//! let lock = FileLock::acquire(path, "r.mehta")?;
//!
//! let project = EstimateProject::new("R. Mehta", "SITE-07", "Green Homes");
//! save_project(&project, path)?;
//! let reloaded = load_project(path)?;
//! assert_eq!(reloaded.meta.site_id, "SITE-07");
//!
//! drop(lock);
//! # Ok::<(), estimate_core::errors::CalcError>(())
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::errors::{CalcError, CalcResult};
use crate::project::{EstimateProject, SCHEMA_VERSION};

/// Extension of project files
pub const PROJECT_EXTENSION: &str = "est";

/// Locks older than this are taken over regardless of the holder
const STALE_LOCK_AGE_HOURS: i64 = 24;

fn file_err<'a>(operation: &'static str, path: &'a Path) -> impl FnOnce(std::io::Error) -> CalcError + 'a {
    move |e| CalcError::file_error(operation, path.display().to_string(), e.to_string())
}

// ============================================================================
// Locking
// ============================================================================

/// Holder of a project lock, stored as JSON in the `.est.lock` file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LockInfo {
    /// User name or email
    pub user_id: String,
    pub machine: String,
    pub pid: u32,
    pub locked_at: DateTime<Utc>,
}

impl LockInfo {
    /// Lock info for the current process
    pub fn new(user_id: impl Into<String>) -> Self {
        LockInfo {
            user_id: user_id.into(),
            machine: hostname().unwrap_or_else(|| "unknown".to_string()),
            pid: std::process::id(),
            locked_at: Utc::now(),
        }
    }

    /// True when the holder is gone: a dead process on this machine, or a
    /// lock older than 24 hours
    pub fn is_stale(&self) -> bool {
        if hostname().as_deref() == Some(self.machine.as_str()) && !process_alive(self.pid) {
            return true;
        }
        Utc::now() - self.locked_at > Duration::hours(STALE_LOCK_AGE_HOURS)
    }
}

fn hostname() -> Option<String> {
    #[cfg(windows)]
    {
        std::env::var("COMPUTERNAME").ok()
    }
    #[cfg(not(windows))]
    {
        std::env::var("HOSTNAME").ok().or_else(|| std::env::var("HOST").ok())
    }
}

#[cfg(unix)]
fn process_alive(pid: u32) -> bool {
    Path::new(&format!("/proc/{}", pid)).exists()
}

#[cfg(windows)]
fn process_alive(pid: u32) -> bool {
    std::process::Command::new("tasklist")
        .args(["/FI", &format!("PID eq {}", pid), "/NH"])
        .output()
        .map(|out| String::from_utf8_lossy(&out.stdout).contains(&pid.to_string()))
        .unwrap_or(true)
}

#[cfg(not(any(unix, windows)))]
fn process_alive(_pid: u32) -> bool {
    true
}

/// Exclusive lock on a project file, released on drop.
///
/// Holds an OS-level lock (fs2) on the lock file, and writes a [`LockInfo`]
/// into it so other users can see who has the project open.
#[derive(Debug)]
pub struct FileLock {
    project_path: PathBuf,
    lock_path: PathBuf,
    _lock_file: File,
    pub info: LockInfo,
}

impl FileLock {
    /// Acquire the lock on `path` for `user_id`.
    ///
    /// A stale lock is taken over. A live lock held by anyone else gives
    /// `CalcError::FileLocked`.
    pub fn acquire(path: &Path, user_id: impl Into<String>) -> CalcResult<Self> {
        let lock_path = lock_path_for(path);
        let info = LockInfo::new(user_id);

        if let Some(existing) = read_lock_info(&lock_path) {
            if !existing.is_stale() {
                return Err(CalcError::file_locked(
                    path.display().to_string(),
                    format!("{} ({})", existing.user_id, existing.machine),
                    existing.locked_at.to_rfc3339(),
                ));
            }
            warn!(
                path = %path.display(),
                holder = %existing.user_id,
                locked_at = %existing.locked_at,
                "taking over stale project lock"
            );
        }

        let mut lock_file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(&lock_path)
            .map_err(file_err("create lock", &lock_path))?;

        lock_file
            .try_lock_exclusive()
            .map_err(|_| CalcError::file_locked(path.display().to_string(), "another process", "unknown"))?;

        let json = serde_json::to_string_pretty(&info)?;
        lock_file
            .write_all(json.as_bytes())
            .map_err(file_err("write lock", &lock_path))?;
        lock_file.sync_all().map_err(file_err("sync lock", &lock_path))?;

        debug!(path = %path.display(), user = %info.user_id, "acquired project lock");
        Ok(FileLock {
            project_path: path.to_path_buf(),
            lock_path,
            _lock_file: lock_file,
            info,
        })
    }

    /// Current live holder of the lock on `path`, if any
    pub fn check(path: &Path) -> Option<LockInfo> {
        read_lock_info(&lock_path_for(path)).filter(|info| !info.is_stale())
    }

    pub fn project_path(&self) -> &Path {
        &self.project_path
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.lock_path);
    }
}

/// `site.est` -> `site.est.lock`
fn lock_path_for(project_path: &Path) -> PathBuf {
    let extension = project_path
        .extension()
        .map(|e| format!("{}.lock", e.to_string_lossy()))
        .unwrap_or_else(|| "lock".to_string());
    project_path.with_extension(extension)
}

/// Lock info from a lock file; unreadable or malformed files count as no lock
fn read_lock_info(lock_path: &Path) -> Option<LockInfo> {
    let contents = fs::read_to_string(lock_path).ok()?;
    serde_json::from_str(&contents).ok()
}

// ============================================================================
// Save / Load
// ============================================================================

/// Save a project with atomic write semantics.
///
/// The JSON is written to `<path>.tmp` (e.g. `site.est.tmp`), synced to
/// disk and renamed over `path`, so an interrupted save never leaves a
/// truncated project behind.
pub fn save_project(project: &EstimateProject, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(project)?;

    let tmp_path = tmp_path_for(path);
    let mut tmp_file = File::create(&tmp_path).map_err(file_err("create temp file", &tmp_path))?;
    tmp_file
        .write_all(json.as_bytes())
        .map_err(file_err("write temp file", &tmp_path))?;
    tmp_file.sync_all().map_err(file_err("sync temp file", &tmp_path))?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    info!(path = %path.display(), items = project.item_count(), "saved project");
    Ok(())
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let extension = path
        .extension()
        .map(|e| format!("{}.tmp", e.to_string_lossy()))
        .unwrap_or_else(|| "tmp".to_string());
    path.with_extension(extension)
}

/// Load a project and check its schema version.
///
/// # Errors
///
/// * `CalcError::FileError` - the file cannot be read
/// * `CalcError::SerializationError` - the file is not a valid project
/// * `CalcError::VersionMismatch` - the file's schema is incompatible
pub fn load_project(path: &Path) -> CalcResult<EstimateProject> {
    let contents = fs::read_to_string(path).map_err(file_err("read", path))?;

    let project: EstimateProject = serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
        reason: format!("Invalid project file {}: {}", path.display(), e),
    })?;
    validate_version(&project.meta.version)?;

    info!(path = %path.display(), items = project.item_count(), "loaded project");
    Ok(project)
}

/// Load a project plus the live lock on it, if someone else holds one.
///
/// A `Some` lock means the project should be opened read-only.
pub fn load_project_with_lock_check(path: &Path) -> CalcResult<(EstimateProject, Option<LockInfo>)> {
    let project = load_project(path)?;
    Ok((project, FileLock::check(path)))
}

/// The major version must match; on 0.x a newer minor is refused too.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let parse = |v: &str| -> Option<(u32, u32)> {
        let mut parts = v.split('.').map(|p| p.parse::<u32>().ok());
        let major = parts.next()??;
        let minor = parts.next().flatten().unwrap_or(0);
        Some((major, minor))
    };
    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let (file_major, file_minor) = parse(file_version).ok_or_else(mismatch)?;
    let (major, minor) = parse(SCHEMA_VERSION).ok_or_else(mismatch)?;

    if file_major != major || (major == 0 && file_minor > minor) {
        return Err(mismatch());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::SavedCalculation;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    fn project_path(dir: &TempDir) -> PathBuf {
        dir.path().join("site.est")
    }

    #[test]
    fn test_sidecar_paths() {
        let path = Path::new("/projects/site.est");
        assert_eq!(lock_path_for(path), Path::new("/projects/site.est.lock"));
        assert_eq!(tmp_path_for(path), Path::new("/projects/site.est.tmp"));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = project_path(&dir);

        let mut project = EstimateProject::new("R. Mehta", "SITE-07", "Green Homes");
        let id = project.add_calculation(SavedCalculation {
            formula_id: "paver".to_string(),
            label: "Driveway".to_string(),
            inputs: BTreeMap::from([("paverPrice".to_string(), "12".to_string())]),
            saved_at: Utc::now(),
        });
        save_project(&project, &path).unwrap();

        assert!(!tmp_path_for(&path).exists());
        let loaded = load_project(&path).unwrap();
        assert_eq!(loaded.meta.prepared_by, "R. Mehta");
        assert_eq!(loaded.get_calculation(&id).map(|c| c.label.as_str()), Some("Driveway"));
    }

    #[test]
    fn test_load_rejects_garbage_and_newer_schema() {
        let dir = TempDir::new().unwrap();
        let path = project_path(&dir);

        fs::write(&path, "not json").unwrap();
        assert_eq!(load_project(&path).unwrap_err().error_code(), "SERIALIZATION_ERROR");

        let mut project = EstimateProject::default();
        project.meta.version = "0.9.0".to_string();
        fs::write(&path, serde_json::to_string(&project).unwrap()).unwrap();
        assert_eq!(load_project(&path).unwrap_err().error_code(), "VERSION_MISMATCH");

        assert_eq!(load_project(&dir.path().join("missing.est")).unwrap_err().error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_file_error_names_operation_and_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent").join("site.est");

        match save_project(&EstimateProject::default(), &path).unwrap_err() {
            CalcError::FileError { operation, path: reported, .. } => {
                assert_eq!(operation, "create temp file");
                assert!(reported.ends_with("site.est.tmp"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_lock_acquire_and_release() {
        let dir = TempDir::new().unwrap();
        let path = project_path(&dir);

        let lock = FileLock::acquire(&path, "r.mehta").unwrap();
        assert_eq!(lock.project_path(), path.as_path());
        assert!(lock_path_for(&path).exists());
        assert_eq!(FileLock::check(&path).map(|i| i.user_id), Some("r.mehta".to_string()));

        drop(lock);
        assert!(!lock_path_for(&path).exists());
        assert!(FileLock::check(&path).is_none());
    }

    #[test]
    fn test_live_lock_blocks_other_user() {
        let dir = TempDir::new().unwrap();
        let path = project_path(&dir);
        let holder = LockInfo {
            user_id: "site.office".to_string(),
            machine: "other-machine".to_string(),
            pid: 1,
            locked_at: Utc::now(),
        };
        fs::write(lock_path_for(&path), serde_json::to_string(&holder).unwrap()).unwrap();

        let err = FileLock::acquire(&path, "r.mehta").unwrap_err();
        assert_eq!(err.error_code(), "FILE_LOCKED");
        assert!(err.is_recoverable());

        let (_, lock) = {
            save_project(&EstimateProject::default(), &path).unwrap();
            load_project_with_lock_check(&path).unwrap()
        };
        assert_eq!(lock, Some(holder));
    }

    #[test]
    fn test_stale_lock_is_taken_over() {
        let dir = TempDir::new().unwrap();
        let path = project_path(&dir);
        let old = LockInfo {
            user_id: "site.office".to_string(),
            machine: "other-machine".to_string(),
            pid: 1,
            locked_at: Utc::now() - Duration::hours(25),
        };
        assert!(old.is_stale());
        fs::write(lock_path_for(&path), serde_json::to_string(&old).unwrap()).unwrap();

        let lock = FileLock::acquire(&path, "r.mehta").unwrap();
        assert_eq!(lock.info.user_id, "r.mehta");
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.1.7").is_ok());
        assert!(validate_version("0.0.3").is_ok());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("latest").is_err());
    }
}
