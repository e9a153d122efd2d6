use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5001";
pub const DEFAULT_ERROR_TIMEOUT_MS: u64 = 5_000;

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub service: ServiceSettings,
    pub display: DisplaySettings,
    pub signature: SignatureSettings,
    pub download: DownloadSettings,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServiceSettings {
    /// Scheme, host and port of the document service; endpoint paths are appended.
    pub base_url: String,
    /// Per-request timeout. Unset means requests may wait indefinitely.
    pub timeout_secs: Option<u64>,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplaySettings {
    pub error_timeout_ms: u64,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            error_timeout_ms: DEFAULT_ERROR_TIMEOUT_MS,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct SignatureSettings {
    pub width: u32,
    pub height: u32,
    pub pen_width: f32,
}

impl Default for SignatureSettings {
    fn default() -> Self {
        Self {
            width: 500,
            height: 200,
            pen_width: 2.5,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct DownloadSettings {
    /// Where filled documents are held for download. Defaults to the system temp dir.
    pub dir: Option<PathBuf>,
}

impl DownloadSettings {
    pub fn resolved_dir(&self) -> PathBuf {
        self.dir.clone().unwrap_or_else(std::env::temp_dir)
    }
}

impl Settings {
    pub fn load(config_path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(config_path)?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let settings: Settings = toml::from_str(raw)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = reqwest::Url::parse(&self.service.base_url).map_err(|e| {
            ConfigError::InvalidBaseUrl {
                url: self.service.base_url.clone(),
                reason: e.to_string(),
            }
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBaseUrl {
                url: self.service.base_url.clone(),
                reason: format!("unsupported scheme `{}`", url.scheme()),
            });
        }
        if self.signature.width == 0 || self.signature.height == 0 {
            return Err(ConfigError::Invalid {
                key: "signature.width/height",
                reason: "surface must be at least 1x1".into(),
            });
        }
        if !(self.signature.pen_width.is_finite() && self.signature.pen_width > 0.0) {
            return Err(ConfigError::Invalid {
                key: "signature.pen_width",
                reason: format!("expected a positive width, got {}", self.signature.pen_width),
            });
        }
        Ok(())
    }

    /// Local settings pointing at `base_url`, otherwise defaults.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            service: ServiceSettings {
                base_url: base_url.into(),
                ..ServiceSettings::default()
            },
            ..Settings::default()
        }
    }
}
