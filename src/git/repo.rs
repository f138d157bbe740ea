use crate::error::{CommitRankError, Result};
use crate::model::DateRange;
use crate::parser::HeaderLayout;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// Produces the raw log text for one repository.
pub trait LogSource: Sync {
    fn name(&self) -> String;

    fn read_log(&self, range: &DateRange, layout: HeaderLayout) -> Result<String>;
}

/// A working tree read through the `git` executable.
#[derive(Debug, Clone)]
pub struct GitRepo {
    path: PathBuf,
}

impl GitRepo {
    /// Repository containing `path` (or the current directory if `None`),
    /// normalised to its top-level working directory.
    pub fn open<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        let path = match path {
            Some(p) => p.as_ref().to_path_buf(),
            None => std::env::current_dir()?,
        };
        if !path.is_dir() {
            return Err(CommitRankError::Git(format!("{} is not a directory", path.display())));
        }
        let toplevel = show_toplevel(&path)?;
        Ok(Self { path: toplevel })
    }

    /// Like [`GitRepo::open`], but `path` itself must be the top-level
    /// working directory. A plain directory nested inside some other
    /// checkout is rejected instead of being read as the outer history.
    pub fn open_root(path: &Path) -> Result<Self> {
        let repo = Self::open(Some(path))?;
        if path.canonicalize()? != repo.path.canonicalize()? {
            return Err(CommitRankError::Git(format!("{} is not a repository root", path.display())));
        }
        Ok(Self { path: path.to_path_buf() })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn log_args(range: &DateRange, layout: HeaderLayout) -> Vec<String> {
        let mut args = vec![
            "log".to_string(),
            "--no-color".to_string(),
            format!("--pretty=format:{}", layout.pretty_format()),
            "--date=short".to_string(),
            "--numstat".to_string(),
        ];
        args.extend(range.git_args());
        args
    }
}

impl LogSource for GitRepo {
    fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.to_string_lossy().to_string())
    }

    fn read_log(&self, range: &DateRange, layout: HeaderLayout) -> Result<String> {
        let args = Self::log_args(range, layout);
        debug!(repo = %self.path.display(), ?args, "running git log");

        let output = Command::new("git")
            .arg("-C")
            .arg(&self.path)
            .args(&args)
            .output()
            .map_err(|e| CommitRankError::Git(format!("cannot run git: {e}")))?;

        if !output.status.success() {
            return Err(CommitRankError::GitCommand {
                repo: self.path.display().to_string(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

fn show_toplevel(path: &Path) -> Result<PathBuf> {
    let output = Command::new("git")
        .arg("-C")
        .arg(path)
        .args(["rev-parse", "--show-toplevel"])
        .output()
        .map_err(|e| CommitRankError::Git(format!("cannot run git: {e}")))?;

    if !output.status.success() {
        return Err(CommitRankError::Git(format!("{} is not a git repository", path.display())));
    }

    let toplevel = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if toplevel.is_empty() {
        return Err(CommitRankError::Git(format!("{} has no working tree", path.display())));
    }
    Ok(PathBuf::from(toplevel))
}
