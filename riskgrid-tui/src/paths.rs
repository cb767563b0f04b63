//! Platform-specific directory paths.
//!
//! Uses XDG on Linux, standard locations on macOS/Windows.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use directories::ProjectDirs;

const QUALIFIER: &str = "dev";
const ORGANIZATION: &str = "riskgrid";
const APPLICATION: &str = "riskgrid";

const LATEST_LOG: &str = "latest.log";
const ARCHIVE_PREFIX: &str = "riskgrid-";
const KEEP_ARCHIVES: usize = 25;

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Get the cache directory, home of the log files.
///
/// - Linux: `$XDG_CACHE_HOME/riskgrid` or `~/.cache/riskgrid`
/// - macOS: `~/Library/Caches/dev.riskgrid.riskgrid`
/// - Windows: `C:\Users\<User>\AppData\Local\riskgrid\riskgrid\cache`
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Get the config directory.
///
/// - Linux: `$XDG_CONFIG_HOME/riskgrid` or `~/.config/riskgrid`
/// - macOS: `~/Library/Application Support/dev.riskgrid.riskgrid`
/// - Windows: `C:\Users\<User>\AppData\Roaming\riskgrid\riskgrid\config`
pub fn config_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
}

pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.json"))
}

/// Get the path to the latest log file.
pub fn log_file() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join(LATEST_LOG))
}

/// Archive the previous run's log and prune old archives.
///
/// Call this at startup before creating the new log file.
pub fn rotate_logs() -> io::Result<()> {
    match cache_dir() {
        Some(dir) if dir.is_dir() => rotate_in(&dir, KEEP_ARCHIVES),
        _ => Ok(()),
    }
}

/// Rename `latest.log` after the time it was last written, then delete the
/// oldest archives until at most `keep` remain. Other files are left alone.
fn rotate_in(dir: &Path, keep: usize) -> io::Result<()> {
    let latest = dir.join(LATEST_LOG);
    if let Ok(meta) = fs::metadata(&latest) {
        let written: DateTime<Local> = meta
            .modified()
            .map_or_else(|_| Local::now(), DateTime::from);
        fs::rename(&latest, free_archive_path(dir, written))?;
    }

    // Archive names embed a sortable timestamp
    let mut archives = archives_in(dir)?;
    archives.sort();
    let excess = archives.len().saturating_sub(keep);
    for path in &archives[..excess] {
        fs::remove_file(path)?;
    }
    Ok(())
}

fn free_archive_path(dir: &Path, written: DateTime<Local>) -> PathBuf {
    let stamp = written.format("%Y%m%d-%H%M%S");
    let mut path = dir.join(format!("{ARCHIVE_PREFIX}{stamp}.log"));
    let mut n = 1;
    while path.exists() {
        path = dir.join(format!("{ARCHIVE_PREFIX}{stamp}.{n}.log"));
        n += 1;
    }
    path
}

fn archives_in(dir: &Path) -> io::Result<Vec<PathBuf>> {
    Ok(fs::read_dir(dir)?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| is_archive(path))
        .collect())
}

fn is_archive(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with(ARCHIVE_PREFIX) && name.ends_with(".log"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("riskgrid-{name}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn file_names(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .filter_map(Result::ok)
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_rotation_archives_latest_and_prunes_oldest() {
        let dir = scratch_dir("rotate");
        for day in 1..=4 {
            fs::write(dir.join(format!("riskgrid-2020010{day}-000000.log")), "").unwrap();
        }
        fs::write(dir.join("notes.log"), "keep me").unwrap();
        fs::write(dir.join(LATEST_LOG), "last run").unwrap();

        rotate_in(&dir, 3).unwrap();

        let names = file_names(&dir);
        assert!(!names.contains(&LATEST_LOG.to_string()));
        assert!(names.contains(&"notes.log".to_string()));
        // Two oldest pruned, the fresh archive sorts last
        assert!(!names.contains(&"riskgrid-20200101-000000.log".to_string()));
        assert!(!names.contains(&"riskgrid-20200102-000000.log".to_string()));
        assert_eq!(names.iter().filter(|n| is_archive(Path::new(n))).count(), 3);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_archive_names_do_not_collide() {
        let dir = scratch_dir("collide");
        let written = Local::now();
        let first = free_archive_path(&dir, written);
        fs::write(&first, "").unwrap();
        let second = free_archive_path(&dir, written);

        assert_ne!(first, second);
        assert!(is_archive(&second));

        let _ = fs::remove_dir_all(&dir);
    }
}
