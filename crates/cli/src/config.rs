use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use vigil_aws::{AwsBaseConfig, AwsProviderError};

use crate::OutputFormat;

/// Top-level configuration, loaded from a TOML file.
///
/// Every table is optional; a missing file yields the defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct VigilConfig {
    /// AWS connection settings shared by all AWS backends.
    pub aws: AwsBaseConfig,
    /// Report rendering.
    pub output: OutputConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid configuration in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid configuration in {path}: {source}")]
    Invalid {
        path: PathBuf,
        source: AwsProviderError,
    },
}

impl VigilConfig {
    /// Load from `path`, or return the defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        let config = Self::parse(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })?;
        config.aws.validate().map_err(|source| ConfigError::Invalid {
            path: path.to_owned(),
            source,
        })?;
        Ok(config)
    }

    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Command-line values win over the file.
    pub fn apply_overrides(
        &mut self,
        region: Option<String>,
        profile: Option<String>,
        endpoint_url: Option<String>,
    ) {
        if let Some(region) = region {
            self.aws.region = region;
        }
        if profile.is_some() {
            self.aws.profile = profile;
        }
        if endpoint_url.is_some() {
            self.aws.endpoint_url = endpoint_url;
        }
    }
}
