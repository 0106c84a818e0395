use crate::error::{FacetError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Global date pattern used when no field-specific pattern is configured.
pub const DEFAULT_DATE_FORMAT: &str = "yyyy-MM-dd'T'HH:mm:ss'Z'";
pub const DEFAULT_LOCATION_FIELD: &str = "location";
pub const CONFIG_FILE_NAME: &str = "facets.json";

/// Where date fields get their storage pattern from.
pub trait DateFormatLookup: Send + Sync {
    /// Pattern configured for one field, if any.
    fn date_format(&self, field_key: &str) -> Option<String>;
    /// Global fallback pattern. `None` disables date formatting.
    fn default_date_format(&self) -> Option<String>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FacetConfig {
    pub default_date_format: Option<String>,
    pub field_date_formats: IndexMap<String, String>,
    /// Document field holding the location that distance facets measure.
    pub location_field: String,
}

impl Default for FacetConfig {
    fn default() -> Self {
        FacetConfig {
            default_date_format: Some(DEFAULT_DATE_FORMAT.to_string()),
            field_date_formats: IndexMap::new(),
            location_field: DEFAULT_LOCATION_FIELD.to_string(),
        }
    }
}

impl FacetConfig {
    pub fn with_field_date_format(
        mut self,
        field: impl Into<String>,
        format: impl Into<String>,
    ) -> Self {
        self.field_date_formats.insert(field.into(), format.into());
        self
    }

    /// Load configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: FacetConfig = serde_json::from_str(&content)?;
        if config.location_field.trim().is_empty() {
            return Err(FacetError::Config("locationField must not be empty".to_string()));
        }
        Ok(config)
    }

    /// Load configuration from {dir}/facets.json or fall back to defaults
    /// with environment overrides.
    pub fn load_or_default(dir: &Path) -> Self {
        let path = dir.join(CONFIG_FILE_NAME);

        if path.exists() {
            match Self::load(&path) {
                Ok(config) => {
                    tracing::info!(
                        "Loaded facet config: {} field date format(s), location_field={}",
                        config.field_date_formats.len(),
                        config.location_field
                    );
                    return config;
                }
                Err(e) => {
                    tracing::error!("Failed to load {}: {}, using defaults", path.display(), e);
                }
            }
        }

        Self::from_env()
    }

    /// Defaults with `FACET_DATE_FORMAT` and `FACET_LOCATION_FIELD` applied.
    /// An empty `FACET_DATE_FORMAT` disables date formatting.
    pub fn from_env() -> Self {
        let mut config = FacetConfig::default();

        if let Ok(format) = std::env::var("FACET_DATE_FORMAT") {
            config.default_date_format = if format.is_empty() { None } else { Some(format) };
        }
        if let Ok(field) = std::env::var("FACET_LOCATION_FIELD") {
            if !field.trim().is_empty() {
                config.location_field = field.trim().to_string();
            }
        }

        tracing::debug!(
            "Facet config from env: default_date_format={:?}, location_field={}",
            config.default_date_format,
            config.location_field
        );
        config
    }
}

impl DateFormatLookup for FacetConfig {
    fn date_format(&self, field_key: &str) -> Option<String> {
        self.field_date_formats.get(field_key).cloned()
    }

    fn default_date_format(&self) -> Option<String> {
        self.default_date_format.clone()
    }
}
