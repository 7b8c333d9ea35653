use crate::core::preview::{DEFAULT_DIVISOR, DEFAULT_QUALITY};
use crate::core::ConfigProvider;
use crate::utils::error::{Result, VariantError};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Same ceiling the `image` crate applies by default.
pub const DEFAULT_MAX_ALLOC_MB: u32 = 512;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VariantConfig {
    pub storage: StorageConfig,
    pub preview: PreviewConfig,
    pub decode: DecodeConfig,
    pub naming: NamingConfig,
    pub monitoring: MonitoringConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Originals and copied videos.
    pub cache_dir: String,
    /// Previews.
    pub files_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            cache_dir: "./cache".to_string(),
            files_dir: "./files".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    pub divisor: u32,
    pub quality: u8,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            divisor: DEFAULT_DIVISOR,
            quality: DEFAULT_QUALITY,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeConfig {
    /// Largest decoded pixel buffer accepted, in MiB. Bigger photos fail
    /// with a decode error instead of exhausting memory.
    pub max_alloc_mb: u32,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            max_alloc_mb: DEFAULT_MAX_ALLOC_MB,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    /// Tag every produced file name with a random id.
    pub unique: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

impl VariantConfig {
    /// Defaults when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| VariantError::ConfigError {
            message: format!("cannot read {}: {}", path.as_ref().display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content)?;

        toml::from_str(&processed).map_err(|e| VariantError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables stay
    /// as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| VariantError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.enabled
    }
}

impl ConfigProvider for VariantConfig {
    fn cache_dir(&self) -> &str {
        &self.storage.cache_dir
    }

    fn files_dir(&self) -> &str {
        &self.storage.files_dir
    }

    fn preview_divisor(&self) -> u32 {
        self.preview.divisor
    }

    fn preview_quality(&self) -> u8 {
        self.preview.quality
    }

    fn unique_names(&self) -> bool {
        self.naming.unique
    }

    fn max_decode_bytes(&self) -> u64 {
        u64::from(self.decode.max_alloc_mb) * 1024 * 1024
    }
}

impl Validate for VariantConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("storage.cache_dir", &self.storage.cache_dir)?;
        validation::validate_path("storage.files_dir", &self.storage.files_dir)?;
        validation::validate_positive_number("preview.divisor", self.preview.divisor, 1)?;
        validation::validate_range("preview.quality", self.preview.quality, 1, 100)?;
        validation::validate_positive_number(
            "decode.max_alloc_mb",
            self.decode.max_alloc_mb,
            1,
        )?;
        Ok(())
    }
}
