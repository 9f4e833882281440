//! Grader configuration (`lettergrade.toml`)

use std::fs;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{LetterError, Result};
use crate::grade::{GradingParams, GradingPolicy};
use crate::reference::{render_template, DirectorySource, VARIANT_PLACEHOLDER};
use crate::variant::{VariantIndex, VariantSelector};

/// Default config file name, looked up in the working directory
pub const CONFIG_FILE: &str = "lettergrade.toml";

/// Environment variable pointing at a config file
pub const CONFIG_ENV_VAR: &str = "LETTERGRADE_CONFIG";

pub const DEFAULT_NUM_VARIANTS: u32 = 100;
pub const DEFAULT_REFERENCE_DIR: &str = "/var/letters_pregenerated/letters-hse-dl";
pub const DEFAULT_FILE_PATTERN: &str = "letters_{variant}.csv";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraderConfig {
    /// Size of the variant pool
    #[serde(default = "default_num_variants")]
    pub num_variants: u32,

    /// Directory holding one reference CSV per variant
    #[serde(default = "default_reference_dir")]
    pub reference_dir: PathBuf,

    /// Reference file name, `{variant}` is replaced by the index
    #[serde(default = "default_file_pattern")]
    pub file_pattern: String,

    /// Where students can find their variant's picture
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url_template: Option<String>,

    /// Reject submissions that omit reference letters
    #[serde(default = "default_strict_completeness")]
    pub strict_completeness: bool,

    /// Budget used when the caller doesn't pass one
    #[serde(default)]
    pub max_error_budget: u64,

    /// Reward used when the caller doesn't pass one
    #[serde(default)]
    pub reward_points: i64,
}

fn default_num_variants() -> u32 {
    DEFAULT_NUM_VARIANTS
}

fn default_reference_dir() -> PathBuf {
    PathBuf::from(DEFAULT_REFERENCE_DIR)
}

fn default_file_pattern() -> String {
    DEFAULT_FILE_PATTERN.to_string()
}

fn default_strict_completeness() -> bool {
    true
}

impl Default for GraderConfig {
    fn default() -> Self {
        Self {
            num_variants: default_num_variants(),
            reference_dir: default_reference_dir(),
            file_pattern: default_file_pattern(),
            image_url_template: None,
            strict_completeness: default_strict_completeness(),
            max_error_budget: 0,
            reward_points: 0,
        }
    }
}

impl GraderConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| LetterError::io_operation("read config", path.display(), e))?;
        let config: GraderConfig =
            toml::from_str(&content).map_err(|e| LetterError::InvalidConfig {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| LetterError::Other(format!("failed to serialize config: {}", e)))?;
        fs::write(path, content)
            .map_err(|e| LetterError::io_operation("write config", path.display(), e))?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.num_variants == 0 {
            return Err(LetterError::invalid_value("num_variants", 0));
        }
        if !self.file_pattern.contains(VARIANT_PLACEHOLDER) {
            return Err(LetterError::invalid_value(
                "file_pattern (missing {variant})",
                &self.file_pattern,
            ));
        }
        Ok(())
    }

    pub fn selector(&self) -> Result<VariantSelector> {
        NonZeroU32::new(self.num_variants)
            .map(VariantSelector::new)
            .ok_or_else(|| LetterError::invalid_value("num_variants", self.num_variants))
    }

    pub fn directory_source(&self) -> DirectorySource {
        DirectorySource::new(&self.reference_dir, &self.file_pattern)
    }

    pub fn policy(&self) -> GradingPolicy {
        GradingPolicy {
            strict_completeness: self.strict_completeness,
        }
    }

    /// Configured defaults, overridden by whatever the caller supplies
    pub fn params(
        &self,
        max_error_budget: Option<u64>,
        reward_points: Option<i64>,
    ) -> GradingParams {
        GradingParams {
            max_error_budget: max_error_budget.unwrap_or(self.max_error_budget),
            reward_points: reward_points.unwrap_or(self.reward_points),
        }
    }

    pub fn image_url(&self, variant: VariantIndex) -> Option<String> {
        self.image_url_template
            .as_deref()
            .map(|t| render_template(t, variant))
    }
}
