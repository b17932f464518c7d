//! Per-run log files.
//!
//! Each run writes `keyselect-<timestamp>.log` into the cache directory.
//! Only the newest [`KEEP_RUNS`] files are kept.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use simplelog::{Config, LevelFilter, WriteLogger};

const PREFIX: &str = "keyselect-";
const KEEP_RUNS: usize = 10;

fn log_dir() -> Option<PathBuf> {
    ProjectDirs::from("dev", "keyselect", "keyselect-demo")
        .map(|dirs| dirs.cache_dir().join("logs"))
}

/// Name of the log file for a run started now. Names sort by start time.
fn run_file_name() -> String {
    format!("{}{}.log", PREFIX, chrono::Local::now().format("%Y%m%dT%H%M%S%.3f"))
}

/// Start logging to a new file for this run.
///
/// Logging stays off if there is no cache directory or it cannot be created.
pub fn init(level: LevelFilter) {
    let Some(dir) = log_dir() else { return };
    if fs::create_dir_all(&dir).is_err() {
        return;
    }
    prune(&dir, KEEP_RUNS - 1);

    if let Ok(file) = File::create(dir.join(run_file_name())) {
        let _ = WriteLogger::init(level, Config::default(), file);
    }
}

/// Delete run logs in `dir` so that at most `keep` remain, oldest first.
fn prune(dir: &Path, keep: usize) {
    let Ok(entries) = fs::read_dir(dir) else { return };
    let mut runs: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with(PREFIX) && name.ends_with(".log"))
        })
        .collect();
    runs.sort();

    let excess = runs.len().saturating_sub(keep);
    for path in &runs[..excess] {
        if let Err(e) = fs::remove_file(path) {
            log::debug!("could not remove old log {}: {}", path.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prune_keeps_newest_runs() {
        let dir = tempfile::tempdir().unwrap();
        for stamp in ["20260101T000000.000", "20260301T000000.000", "20260201T000000.000"] {
            File::create(dir.path().join(format!("{}{}.log", PREFIX, stamp))).unwrap();
        }
        File::create(dir.path().join("notes.txt")).unwrap();

        prune(dir.path(), 2);

        let mut left: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        left.sort();
        assert_eq!(
            left,
            vec![
                "keyselect-20260201T000000.000.log",
                "keyselect-20260301T000000.000.log",
                "notes.txt",
            ]
        );
    }

    #[test]
    fn test_run_file_name_is_prefixed() {
        let name = run_file_name();
        assert!(name.starts_with(PREFIX));
        assert!(name.ends_with(".log"));
    }
}
