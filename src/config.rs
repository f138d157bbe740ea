use crate::best::{SelectionPolicy, DEFAULT_TOP_N, DEFAULT_TOP_PERIODS};
use crate::error::{CommitRankError, Result};
use crate::parser::HeaderLayout;
use crate::period::Granularity;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_MONTHS_BACK: u32 = 3;

/// Caller-supplied analysis settings. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Window length used when no explicit since/until is given.
    pub months_back: u32,
    pub top_n: usize,
    /// Highlighted periods listed per best performer.
    pub top_periods: usize,
    pub granularity: Granularity,
    pub selection_policy: SelectionPolicy,
    pub header_layout: HeaderLayout,
    /// Repositories analysed by `batch` when no base directory is given.
    pub repositories: Vec<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            months_back: DEFAULT_MONTHS_BACK,
            top_n: DEFAULT_TOP_N,
            top_periods: DEFAULT_TOP_PERIODS,
            granularity: Granularity::default(),
            selection_policy: SelectionPolicy::default(),
            header_layout: HeaderLayout::default(),
            repositories: Vec::new(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CommitRankError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json(&content)
    }

    /// Defaults when no path is given; a given path must exist.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.top_n == 0 {
            return Err(CommitRankError::Config("top_n must be at least 1".to_string()));
        }
        Ok(())
    }
}
