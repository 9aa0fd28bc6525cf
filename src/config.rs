use crate::errors::{AppError, AppResult};
use crate::models::EntityKind;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Resolved configuration with all values filled in (no Options).
///
/// This struct represents the export defaults and can be deserialized by the
/// TOML loader. All fields have concrete values, making it safe to access
/// directly without unwrapping.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolvedConfig {
    /// Directory (or direct file path) holding the dump files
    pub input_dir: PathBuf,
    /// Directory for the produced CSV tables
    pub csv_dir: PathBuf,
    /// Number of buffered rows per table before a batch is flushed.
    /// This also bounds the peak in-memory DataFrame size.
    pub batch_size: usize,
    /// Whether to gzip-compress the produced CSV files
    pub compress: bool,
    /// Stop after this many entities per kind; 0 means no limit
    pub limit: u64,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("data/dumps"),
            csv_dir: PathBuf::from("data/csv"),
            batch_size: 10_000,
            compress: false,
            limit: 0,
        }
    }
}

/// Configuration that can be loaded from a TOML file.
///
/// Deserializes the required entity list and optional export configuration.
/// The parser rejects unknown keys to catch typos, and validates that
/// batch_size is greater than 0 and every entity alias is known.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResolvedConfigFile {
    /// Entity kinds to export: any of `"artist"`, `"label"`, `"master"`, `"release"`
    pub entities: Vec<String>,
    /// Flattened resolved configuration with export defaults
    #[serde(flatten)]
    pub resolved: ResolvedConfig,
}

impl ResolvedConfigFile {
    /// Loads and validates configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the TOML is malformed, the entity list is
    /// empty or contains an unknown alias, unknown keys are present, or
    /// batch_size is 0.
    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let contents = fs::read_to_string(path)?;
        let config: ResolvedConfigFile = toml::from_str(&contents)
            .map_err(|e| AppError::InvalidInput(format!("Failed to parse config: {e}")))?;

        if config.entities.is_empty() {
            return Err(AppError::InvalidInput(
                "At least one entity kind must be listed".into(),
            ));
        }
        if config.resolved.batch_size == 0 {
            return Err(AppError::InvalidInput(
                "Batch size must be greater than 0".into(),
            ));
        }

        Ok(config)
    }

    /// Resolves the configured entity aliases into kinds, preserving order.
    pub fn entity_kinds(&self) -> AppResult<Vec<EntityKind>> {
        self.entities
            .iter()
            .map(|alias| EntityKind::from_alias(alias))
            .collect()
    }
}
