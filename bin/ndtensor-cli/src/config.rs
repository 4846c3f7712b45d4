// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! CLI configuration loaded from TOML files or left at defaults.
//!
//! # TOML Format
//! ```toml
//! pretty = true
//! default_degree = 1
//! log_filter = "info"
//! precision = 6
//! ```

use std::path::Path;

/// Errors raised while loading or writing the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("configuration error: {0}")]
    Invalid(String),
}

/// Settings shared by every subcommand.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Pretty-print JSON output.
    pub pretty: bool,
    /// Contraction degree used when `--degree` is omitted.
    pub default_degree: usize,
    /// `tracing` filter directive used when no `-v` flag is given.
    pub log_filter: String,
    /// Decimal places shown by `inspect`.
    pub precision: usize,
}

impl CliConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str)
            .map_err(|e| ConfigError::Invalid(format!("TOML parse error: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialises configuration to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Invalid(format!("TOML serialise error: {e}")))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.default_degree == 0 {
            return Err(ConfigError::Invalid(
                "default_degree must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            pretty: false,
            default_degree: 1,
            log_filter: "warn".to_string(),
            precision: 6,
        }
    }
}
