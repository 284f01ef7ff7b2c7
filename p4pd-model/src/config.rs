//! # Generator Configuration
//!
//! Prefixes used for every generated identifier. The program prefix is
//! spliced into C identifiers, so it must itself be a valid identifier.

use std::fmt;

/// Identifier prefixes for one generation run
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GeneratorConfig {
    /// Program name used in API function names
    pub p4_prefix: String,
}

impl GeneratorConfig {
    /// Program prefix used when none is given
    pub const DEFAULT_PREFIX: &'static str = "prog";

    /// Create a new configuration with validation
    pub fn new(p4_prefix: impl Into<String>) -> Result<Self, ConfigError> {
        let config = Self {
            p4_prefix: p4_prefix.into(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Prefix of every generated PD function: `p4_pd_<prefix>_`
    pub fn pd_prefix(&self) -> String {
        format!("p4_pd_{}_", self.p4_prefix)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let first = self
            .p4_prefix
            .chars()
            .next()
            .ok_or(ConfigError::EmptyPrefix)?;
        if first.is_ascii_digit() {
            return Err(ConfigError::LeadingDigit);
        }

        if let Some(bad) = self
            .p4_prefix
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '_'))
        {
            return Err(ConfigError::InvalidCharacter(bad));
        }

        Ok(())
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            p4_prefix: Self::DEFAULT_PREFIX.to_string(),
        }
    }
}

impl fmt::Display for GeneratorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "GeneratorConfig {{ p4_prefix: {}, pd_prefix: {} }}",
            self.p4_prefix,
            self.pd_prefix()
        )
    }
}

/// Configuration error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Prefix must not be empty
    EmptyPrefix,
    /// Prefix must not start with a digit
    LeadingDigit,
    /// Prefix may only contain ASCII letters, digits and '_'
    InvalidCharacter(char),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyPrefix => {
                write!(f, "p4 prefix must not be empty")
            }
            ConfigError::LeadingDigit => {
                write!(f, "p4 prefix must not start with a digit")
            }
            ConfigError::InvalidCharacter(c) => {
                write!(f, "p4 prefix contains invalid character {:?}", c)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
