//! Configuration for [`HistoryManager`](crate::HistoryManager).
//!
//! Provides a strongly-typed configuration with serde defaults, a validating
//! builder, and environment variable support.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Retention bound that suits interactive editors.
pub const RECOMMENDED_MAX_STEPS: usize = 200;

/// History configuration settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Number of undo steps kept; `None` keeps everything.
    #[serde(default)]
    pub max_steps: Option<usize>,

    /// Separator texts are split on before diffing.
    ///
    /// The empty string diffs character by character.
    #[serde(default = "default_separator")]
    pub separator: String,
}

impl HistoryConfig {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from environment variables.
    ///
    /// `DIFFTEXT_MAX_STEPS` takes a number or `unbounded`.
    /// `DIFFTEXT_SEPARATOR` takes a literal separator, with `\n` and `\t`
    /// escapes expanded.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidConfiguration`] for unparsable or
    /// invalid values.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration from an arbitrary key lookup, using the same keys
    /// as [`from_env`](Self::from_env).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidConfiguration`] for unparsable or
    /// invalid values.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(val) = lookup("DIFFTEXT_MAX_STEPS") {
            config.max_steps = if val.trim().eq_ignore_ascii_case("unbounded") {
                None
            } else {
                Some(
                    val.trim()
                        .parse()
                        .map_err(|_| ConfigError::InvalidConfiguration {
                            key: "max_steps".to_string(),
                            value: val.clone(),
                        })?,
                )
            };
        }

        if let Some(val) = lookup("DIFFTEXT_SEPARATOR") {
            config.separator = val.replace("\\n", "\n").replace("\\t", "\t");
        }

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidConfiguration`] when `max_steps` is
    /// zero.
    pub fn validate(&self) -> Result<&Self, ConfigError> {
        if self.max_steps == Some(0) {
            return Err(ConfigError::InvalidConfiguration {
                key: "max_steps".to_string(),
                value: "0".to_string(),
            });
        }
        Ok(self)
    }

    /// Returns a builder for creating configuration.
    #[must_use]
    pub fn builder() -> HistoryConfigBuilder {
        HistoryConfigBuilder::default()
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_steps: None,
            separator: default_separator(),
        }
    }
}

/// Builder for constructing [`HistoryConfig`].
#[derive(Debug, Default)]
pub struct HistoryConfigBuilder {
    max_steps: Option<Option<usize>>,
    separator: Option<String>,
}

impl HistoryConfigBuilder {
    /// Bounds the number of undo steps.
    #[must_use]
    pub const fn max_steps(mut self, steps: usize) -> Self {
        self.max_steps = Some(Some(steps));
        self
    }

    /// Keeps every step.
    #[must_use]
    pub const fn unbounded(mut self) -> Self {
        self.max_steps = Some(None);
        self
    }

    /// Sets the separator texts are split on.
    #[must_use]
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = Some(separator.into());
        self
    }

    /// Builds the configuration, validating all values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidConfiguration`] when validation fails.
    pub fn build(self) -> Result<HistoryConfig, ConfigError> {
        let mut config = HistoryConfig::default();

        if let Some(v) = self.max_steps {
            config.max_steps = v;
        }
        if let Some(v) = self.separator {
            config.separator = v;
        }

        config.validate()?;
        Ok(config)
    }
}

fn default_separator() -> String {
    "\n".to_string()
}
