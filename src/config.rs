//! Taskfile discovery.

use crate::error::{LauncherError, Result};
use std::path::{Path, PathBuf};

/// File names the task runner itself recognises, in lookup order.
pub const TASKFILE_NAMES: [&str; 4] = ["Taskfile.yml", "taskfile.yml", "Taskfile.yaml", "taskfile.yaml"];

/// Directories searched when no explicit Taskfile is given.
#[derive(Debug, Clone, Default)]
pub struct SearchPaths {
    /// Directory holding the launcher executable (the bundled Taskfile)
    pub bundled: Option<PathBuf>,
    /// The current working directory
    pub working_dir: Option<PathBuf>,
}

impl SearchPaths {
    /// Capture the executable and working directories of this process.
    pub fn from_env() -> Self {
        let bundled = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf));
        let working_dir = std::env::current_dir().ok();
        tracing::trace!(?bundled, ?working_dir, "taskfile search paths");
        Self { bundled, working_dir }
    }

    fn dirs(&self) -> impl Iterator<Item = &Path> {
        self.bundled
            .iter()
            .chain(self.working_dir.iter())
            .map(PathBuf::as_path)
    }
}

/// Find the first Taskfile inside `dir`, recording every candidate tried.
fn find_in_dir(dir: &Path, searched: &mut Vec<PathBuf>) -> Option<PathBuf> {
    for name in TASKFILE_NAMES {
        let candidate = dir.join(name);
        if candidate.is_file() {
            return Some(candidate);
        }
        searched.push(candidate);
    }
    None
}

fn absolute(path: PathBuf) -> PathBuf {
    std::path::absolute(&path).unwrap_or(path)
}

/// Resolve the Taskfile to use, as an absolute path.
///
/// An explicit path wins; when it names a directory the default file names
/// are looked up inside it. Without one, the bundled Taskfile next to the
/// executable is preferred over the one in the working directory.
///
/// The task runner starts in the Taskfile's directory, so a relative path
/// is made absolute against the current working directory here.
pub fn locate(explicit: Option<&Path>, search: &SearchPaths) -> Result<PathBuf> {
    let mut searched = Vec::new();

    if let Some(path) = explicit {
        if path.is_dir() {
            if let Some(found) = find_in_dir(path, &mut searched) {
                return Ok(absolute(found));
            }
        } else if path.exists() {
            return Ok(absolute(path.to_path_buf()));
        } else {
            searched.push(path.to_path_buf());
        }
        return Err(LauncherError::NotFound { searched });
    }

    for dir in search.dirs() {
        if let Some(found) = find_in_dir(dir, &mut searched) {
            return Ok(absolute(found));
        }
    }

    Err(LauncherError::NotFound { searched })
}
