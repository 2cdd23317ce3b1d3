use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::align::{ScoringPolicy, SearchStrategy};
use crate::consts::{DEFAULT_BLANK_THRESHOLD, DEFAULT_MAX_SEARCH, DEFAULT_REFERENCE_FRAME};
use crate::error::{PerfPanError, Result};

/// Options of one alignment run.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AlignConfig {
    /// Fraction of overlap pixels at or below which a color count marks the
    /// compared region as blank.
    pub blank_threshold: f64,
    /// Index of the fixed comparison frame.
    pub reference_frame: usize,
    /// Ring-search radius bound; -1 selects the exhaustive strategy.
    pub max_search: i32,
    /// Reuse the preceding frame's offset when a search ends on a bound.
    pub copy_on_limit: bool,
    /// Override the scoring convention paired with the strategy.
    pub scoring: Option<ScoringPolicy>,
    /// Offsets to reuse instead of searching.
    pub hint_file: Option<PathBuf>,
    /// Per-frame result log.
    pub log_file: Option<PathBuf>,
    /// Exhaustive-mode score surface dump.
    pub plot_file: Option<PathBuf>,
}

impl Default for AlignConfig {
    fn default() -> Self {
        Self {
            blank_threshold: DEFAULT_BLANK_THRESHOLD,
            reference_frame: DEFAULT_REFERENCE_FRAME,
            max_search: DEFAULT_MAX_SEARCH,
            copy_on_limit: false,
            scoring: None,
            hint_file: None,
            log_file: None,
            plot_file: None,
        }
    }
}

impl AlignConfig {
    pub fn strategy(&self) -> Result<SearchStrategy> {
        SearchStrategy::from_max_search(self.max_search)
    }

    /// The configured scoring override, or the strategy's own convention.
    pub fn scoring_policy(&self) -> Result<ScoringPolicy> {
        Ok(match self.scoring {
            Some(policy) => policy,
            None => self.strategy()?.default_scoring(),
        })
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..1.0).contains(&self.blank_threshold) {
            return Err(PerfPanError::InvalidConfig(format!(
                "blank_threshold must be in [0, 1), got {}",
                self.blank_threshold
            )));
        }
        self.strategy()?;
        Ok(())
    }

    pub fn hint_path(&self) -> Option<&Path> {
        enabled_path(&self.hint_file)
    }

    pub fn log_path(&self) -> Option<&Path> {
        enabled_path(&self.log_file)
    }

    pub fn plot_path(&self) -> Option<&Path> {
        enabled_path(&self.plot_file)
    }
}

/// An empty path means the file is disabled.
fn enabled_path(path: &Option<PathBuf>) -> Option<&Path> {
    path.as_deref().filter(|p| !p.as_os_str().is_empty())
}
