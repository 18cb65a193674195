//! # File I/O Module
//!
//! Project file operations:
//! - **Atomic saves**: write to `.spf.tmp`, sync, rename over the target
//! - **File locking**: one editor per proposal on a shared folder
//! - **Version validation**: refuse files from a newer schema
//! - **History**: list the proposals saved in a folder, delete one
//!
//! ## File Format
//!
//! Projects are saved as `.spf` files containing pretty-printed JSON.
//! Lock files sit next to them as `.spf.lock` and record who holds the lock.
//!
//! ## Example
//!
//! ```rust,no_run
//! use solar_core::file_io::{save_project, load_project, FileLock};
//! use solar_core::project::Project;
//! use std::path::Path;
//!
//! let project = Project::new("Maria Souza", "");
//! let path = Path::new("maria.spf");
//!
//! let lock = FileLock::acquire(path, "vendas@empresa.com.br").unwrap();
//! save_project(&project, path).unwrap();
//! drop(lock);
//!
//! let loaded = load_project(path).unwrap();
//! assert_eq!(loaded.meta.id, project.meta.id);
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};

use crate::errors::{SolarError, SolarResult};
use crate::project::{Project, ProjectMetadata, SCHEMA_VERSION};

/// Project file extension
pub const PROJECT_EXTENSION: &str = "spf";

/// Locks older than this are taken over regardless of owner
pub const STALE_LOCK_HOURS: i64 = 24;

/// Contents of a `.spf.lock` file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockInfo {
    /// User identifier (email or username)
    pub user_id: String,
    /// Machine name where lock was acquired
    pub machine: String,
    /// Process ID that holds the lock
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

    /// "user (machine)", as shown to whoever is locked out
    pub fn holder(&self) -> String {
        format!("{} ({})", self.user_id, self.machine)
    }
}

fn hostname() -> Option<String> {
    #[cfg(windows)]
    {
        std::env::var("COMPUTERNAME").ok()
    }
    #[cfg(not(windows))]
    {
        std::env::var("HOSTNAME")
            .ok()
            .or_else(|| std::env::var("HOST").ok())
    }
}

/// Exclusive lock on a project file, released on drop.
///
/// Holds an OS-level lock (fs2) on the lock file and writes [`LockInfo`]
/// into it so other users can see who has the proposal open.
pub struct FileLock {
    project_path: PathBuf,
    lock_path: PathBuf,
    /// Keeps the OS lock alive
    _lock_file: File,
    pub info: LockInfo,
}

impl FileLock {
    /// Acquire an exclusive lock on a project file.
    ///
    /// Fails with [`SolarError::FileLocked`] while another live process
    /// holds it. Stale locks are taken over.
    pub fn acquire(path: &Path, user_id: impl Into<String>) -> SolarResult<Self> {
        let lock_path = lock_path_for(path);
        let info = LockInfo::new(user_id);

        if let Some(existing) = live_lock(&lock_path) {
            return Err(SolarError::file_locked(
                path.display().to_string(),
                existing.holder(),
                existing.locked_at.to_rfc3339(),
            ));
        }

        let mut lock_file = OpenOptions::new()
            .write(true)
            .read(true)
            .create(true)
            .truncate(true)
            .open(&lock_path)
            .map_err(|e| {
                SolarError::file_error("create lock", lock_path.display().to_string(), e.to_string())
            })?;

        lock_file.try_lock_exclusive().map_err(|_| {
            SolarError::file_locked(
                path.display().to_string(),
                "another process".to_string(),
                "unknown".to_string(),
            )
        })?;

        let lock_json = serde_json::to_string_pretty(&info)
            .map_err(|e| SolarError::serialization(e.to_string()))?;

        lock_file.write_all(lock_json.as_bytes()).map_err(|e| {
            SolarError::file_error("write lock", lock_path.display().to_string(), e.to_string())
        })?;

        lock_file.sync_all().map_err(|e| {
            SolarError::file_error("sync lock", lock_path.display().to_string(), e.to_string())
        })?;

        tracing::debug!(path = %path.display(), user = %info.user_id, "acquired project lock");

        Ok(FileLock {
            project_path: path.to_path_buf(),
            lock_path,
            _lock_file: lock_file,
            info,
        })
    }

    /// Who holds the lock on `path`, if anyone (stale locks ignored).
    pub fn check(path: &Path) -> Option<LockInfo> {
        live_lock(&lock_path_for(path))
    }

    pub fn project_path(&self) -> &Path {
        &self.project_path
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.lock_path) {
            tracing::warn!(path = %self.lock_path.display(), error = %e, "could not remove lock file");
        }
    }
}

/// `proposal.spf` -> `proposal.spf.lock`
fn lock_path_for(project_path: &Path) -> PathBuf {
    let mut lock_path = project_path.to_path_buf();
    let extension = lock_path
        .extension()
        .map(|e| format!("{}.lock", e.to_string_lossy()))
        .unwrap_or_else(|| "lock".to_string());
    lock_path.set_extension(extension);
    lock_path
}

/// Lock info from an existing, non-stale lock file.
fn live_lock(lock_path: &Path) -> Option<LockInfo> {
    if !lock_path.exists() {
        return None;
    }
    match read_lock_info(lock_path) {
        Ok(info) if !is_lock_stale(&info) => Some(info),
        Ok(info) => {
            tracing::info!(holder = %info.holder(), "ignoring stale lock");
            None
        }
        Err(e) => {
            tracing::debug!(error = %e, "unreadable lock file");
            None
        }
    }
}

fn read_lock_info(lock_path: &Path) -> SolarResult<LockInfo> {
    let contents = fs::read_to_string(lock_path).map_err(|e| {
        SolarError::file_error("read lock", lock_path.display().to_string(), e.to_string())
    })?;

    serde_json::from_str(&contents).map_err(|e| SolarError::serialization(e.to_string()))
}

/// A lock is stale when its process is gone (same machine) or it is
/// older than [`STALE_LOCK_HOURS`].
fn is_lock_stale(info: &LockInfo) -> bool {
    if let Some(our_machine) = hostname() {
        if info.machine == our_machine {
            #[cfg(unix)]
            {
                if fs::metadata(format!("/proc/{}", info.pid)).is_err() {
                    return true;
                }
            }
        }
    }

    let age = Utc::now() - info.locked_at;
    age.num_hours() > STALE_LOCK_HOURS
}

/// Save a project with atomic write semantics.
///
/// Serializes to `<path>.spf.tmp`, syncs it and renames it over `path`, so
/// an interrupted save never leaves a truncated proposal behind.
pub fn save_project(project: &Project, path: &Path) -> SolarResult<()> {
    let json = serde_json::to_string_pretty(project)
        .map_err(|e| SolarError::serialization(e.to_string()))?;

    let tmp_path = path.with_extension(format!("{}.tmp", PROJECT_EXTENSION));

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        SolarError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(json.as_bytes()).map_err(|e| {
        SolarError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        SolarError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        SolarError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    tracing::info!(path = %path.display(), client = %project.meta.client_name, "saved project");
    Ok(())
}

/// Load a project file.
///
/// # Errors
///
/// * [`SolarError::FileError`] - I/O failure
/// * [`SolarError::SerializationError`] - not a project file
/// * [`SolarError::VersionMismatch`] - written by a newer schema
pub fn load_project(path: &Path) -> SolarResult<Project> {
    let contents = fs::read_to_string(path).map_err(|e| {
        SolarError::file_error("open", path.display().to_string(), e.to_string())
    })?;

    let project: Project = serde_json::from_str(&contents).map_err(|e| {
        SolarError::serialization(format!("Invalid JSON in {}: {}", path.display(), e))
    })?;

    validate_version(&project.meta.version)?;

    tracing::info!(path = %path.display(), client = %project.meta.client_name, "loaded project");
    Ok(project)
}

/// Load a project and report who, if anyone, holds its lock.
pub fn load_project_with_lock_check(path: &Path) -> SolarResult<(Project, Option<LockInfo>)> {
    let project = load_project(path)?;
    let lock_info = FileLock::check(path);
    Ok((project, lock_info))
}

// ============================================================================
// History
// ============================================================================

/// One saved proposal found by [`list_projects`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub path: PathBuf,
    pub meta: ProjectMetadata,
}

/// Saved proposals in `dir`, most recently modified first.
///
/// Only `.spf` files are considered. Files that fail to load are skipped
/// with a warning so one bad file does not hide the rest.
pub fn list_projects(dir: &Path) -> SolarResult<Vec<ProjectEntry>> {
    let entries = fs::read_dir(dir).map_err(|e| {
        SolarError::file_error("list", dir.display().to_string(), e.to_string())
    })?;

    let mut projects = Vec::new();
    for entry in entries {
        let path = match entry {
            Ok(entry) => entry.path(),
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "skipping unreadable entry");
                continue;
            }
        };
        if path.extension().and_then(|ext| ext.to_str()) != Some(PROJECT_EXTENSION) {
            continue;
        }
        match load_project(&path) {
            Ok(project) => projects.push(ProjectEntry { path, meta: project.meta }),
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "skipping project file"),
        }
    }

    projects.sort_by(|a, b| b.meta.modified.cmp(&a.meta.modified));
    Ok(projects)
}

/// Delete a saved proposal. Refused while someone else holds its lock.
pub fn delete_project(path: &Path) -> SolarResult<()> {
    if let Some(lock) = FileLock::check(path) {
        return Err(SolarError::file_locked(
            path.display().to_string(),
            lock.holder(),
            lock.locked_at.to_rfc3339(),
        ));
    }

    fs::remove_file(path).map_err(|e| {
        SolarError::file_error("delete", path.display().to_string(), e.to_string())
    })?;

    tracing::info!(path = %path.display(), "deleted project");
    Ok(())
}

/// Major must match; on 0.x the file's minor may not be newer than ours.
fn validate_version(file_version: &str) -> SolarResult<()> {
    let mismatch = || SolarError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let parse = |v: &str| -> Vec<u32> { v.split('.').filter_map(|p| p.parse().ok()).collect() };
    let file_parts = parse(file_version);
    let current_parts = parse(SCHEMA_VERSION);

    let (Some(&file_major), Some(&current_major)) = (file_parts.first(), current_parts.first()) else {
        return Err(mismatch());
    };

    if file_major != current_major {
        return Err(mismatch());
    }

    if current_major == 0 {
        if let (Some(&file_minor), Some(&current_minor)) = (file_parts.get(1), current_parts.get(1)) {
            if file_minor > current_minor {
                return Err(mismatch());
            }
        }
    }

    Ok(())
}
