//! Comparison configuration recorded with each folder pair.

use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// How file contents were compared when the tree was built.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum CompareVariant {
    /// Modification time and size.
    #[default]
    TimeAndSize,
    /// Byte-by-byte content.
    Content,
    /// Size only.
    Size,
}

/// Filter that selected the items of a folder pair.
///
/// The tree stores it as-is; evaluating the patterns happens elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Include patterns.
    #[serde(default = "default_include")]
    pub include: Vec<String>,
    /// Exclude patterns.
    #[serde(default)]
    pub exclude: Vec<String>,
    /// Minimum file size in bytes (None = no limit).
    #[serde(default)]
    pub min_size: Option<u64>,
    /// Maximum file size in bytes (None = no limit).
    #[serde(default)]
    pub max_size: Option<u64>,
    /// Only items modified within this many seconds (None = no limit).
    #[serde(default)]
    pub time_span: Option<u64>,
}

fn default_include() -> Vec<String> {
    vec!["*".to_string()]
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            include: default_include(),
            exclude: Vec::new(),
            min_size: None,
            max_size: None,
            time_span: None,
        }
    }
}

impl FilterConfig {
    /// Check if the filter lets everything through.
    pub fn is_null(&self) -> bool {
        self.include.iter().all(|p| p == "*")
            && self.exclude.is_empty()
            && self.min_size.is_none()
            && self.max_size.is_none()
            && self.time_span.is_none()
    }
}

/// Settings the comparison used when it built a folder pair.
#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct CompareConfig {
    /// Content comparison method.
    #[builder(default)]
    #[serde(default)]
    pub variant: CompareVariant,

    /// Tolerated modification time difference in seconds.
    #[builder(default = "2")]
    #[serde(default = "default_time_tolerance")]
    pub file_time_tolerance: u32,

    /// Time shifts (in minutes) to treat as equal, e.g. for DST changes.
    #[builder(default)]
    #[serde(default)]
    pub ignore_time_shift_minutes: Vec<u32>,

    /// Filter used while scanning.
    #[builder(default)]
    #[serde(default)]
    pub filter: FilterConfig,
}

fn default_time_tolerance() -> u32 {
    2
}

/// Largest accepted time shift: one day.
const MAX_TIME_SHIFT_MINUTES: u32 = 24 * 60;

impl CompareConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(ref shifts) = self.ignore_time_shift_minutes {
            if let Some(bad) = shifts.iter().find(|&&m| m == 0 || m > MAX_TIME_SHIFT_MINUTES) {
                return Err(format!(
                    "Ignored time shift must be between 1 and {MAX_TIME_SHIFT_MINUTES} minutes, got {bad}"
                ));
            }
        }
        if let Some(ref filter) = self.filter {
            if let (Some(min), Some(max)) = (filter.min_size, filter.max_size) {
                if min > max {
                    return Err(format!("Filter size range is empty: {min} > {max}"));
                }
            }
        }
        Ok(())
    }
}

impl CompareConfig {
    /// Create a new compare config builder.
    pub fn builder() -> CompareConfigBuilder {
        CompareConfigBuilder::default()
    }

    /// Create a config for the given variant with default settings.
    pub fn new(variant: CompareVariant) -> Self {
        Self {
            variant,
            ..Self::default()
        }
    }
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            variant: CompareVariant::default(),
            file_time_tolerance: default_time_tolerance(),
            ignore_time_shift_minutes: Vec::new(),
            filter: FilterConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = CompareConfig::builder()
            .variant(CompareVariant::Content)
            .file_time_tolerance(5u32)
            .ignore_time_shift_minutes(vec![60u32])
            .build()
            .unwrap();

        assert_eq!(config.variant, CompareVariant::Content);
        assert_eq!(config.file_time_tolerance, 5);
        assert_eq!(config.ignore_time_shift_minutes, vec![60]);
        assert!(config.filter.is_null());
    }

    #[test]
    fn test_config_builder_defaults_match_default() {
        let built = CompareConfig::builder().build().unwrap();
        assert_eq!(built, CompareConfig::default());
    }

    #[test]
    fn test_config_rejects_bad_time_shift() {
        let result = CompareConfig::builder()
            .ignore_time_shift_minutes(vec![0u32])
            .build();
        assert!(result.is_err());

        let result = CompareConfig::builder()
            .ignore_time_shift_minutes(vec![MAX_TIME_SHIFT_MINUTES + 1])
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_config_rejects_empty_size_range() {
        let filter = FilterConfig {
            min_size: Some(10),
            max_size: Some(5),
            ..FilterConfig::default()
        };
        assert!(CompareConfig::builder().filter(filter).build().is_err());
    }

    #[test]
    fn test_filter_is_null() {
        let mut filter = FilterConfig::default();
        assert!(filter.is_null());

        filter.exclude.push("*.tmp".to_string());
        assert!(!filter.is_null());
    }

    #[test]
    fn test_config_serde_defaults() {
        let config: CompareConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, CompareConfig::default());
    }
}
