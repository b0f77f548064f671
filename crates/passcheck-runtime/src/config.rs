//! Runtime configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use passcheck::PassCheckConfig;

/// Default minimum password length enforced by the runtime policy
pub const DEFAULT_POLICY_MIN_LENGTH: usize = 8;

/// Configuration for the password checking runtime.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeConfig {
    /// Leaked-password filter configuration
    pub filter: PassCheckConfig,

    /// Length assertion bounds for candidate passwords
    pub policy_min_length: Option<usize>,
    pub policy_max_length: Option<usize>,

    /// Fail startup when the leaked-password assertion cannot be built
    pub strict: bool,

    /// Log level filter (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            filter: PassCheckConfig::default(),
            policy_min_length: Some(DEFAULT_POLICY_MIN_LENGTH),
            policy_max_length: None,
            strict: false,
            log_level: "info".to_string(),
        }
    }
}

impl RuntimeConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `PASSCHECK_FP_PROBABILITY`: Filter false positive probability (default: 0.001)
    /// - `PASSCHECK_MIN_LENGTH` / `PASSCHECK_MAX_LENGTH`: Word-list entry length bounds
    /// - `PASSCHECK_MAX_ITEMS`: Cap on passwords loaded into the filter
    /// - `PASSCHECK_IGNORE_CASE`: Fold case before insert and lookup (default: false)
    /// - `PASSCHECK_DATA_FILE`: Custom word list (default: bundled list)
    /// - `PASSCHECK_POLICY_MIN_LENGTH`: Minimum candidate length (default: 8, `0` disables)
    /// - `PASSCHECK_POLICY_MAX_LENGTH`: Maximum candidate length (default: disabled)
    /// - `PASSCHECK_STRICT`: Exit if the word list cannot be loaded (default: false)
    /// - `PASSCHECK_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let filter = PassCheckConfig {
            false_positive_probability: parse(&lookup, "PASSCHECK_FP_PROBABILITY")?
                .unwrap_or(defaults.filter.false_positive_probability),
            min_length: parse(&lookup, "PASSCHECK_MIN_LENGTH")?,
            max_length: parse(&lookup, "PASSCHECK_MAX_LENGTH")?,
            max_items: parse(&lookup, "PASSCHECK_MAX_ITEMS")?,
            ignore_case: parse_flag(&lookup, "PASSCHECK_IGNORE_CASE")?.unwrap_or(false),
            password_data_file: lookup("PASSCHECK_DATA_FILE")
                .filter(|path| !path.is_empty())
                .map(PathBuf::from),
        };
        filter
            .validate()
            .context("Invalid leaked password filter configuration")?;

        let policy_min_length = match parse::<usize, _>(&lookup, "PASSCHECK_POLICY_MIN_LENGTH")? {
            Some(0) => None,
            Some(min) => Some(min),
            None => defaults.policy_min_length,
        };

        Ok(Self {
            filter,
            policy_min_length,
            policy_max_length: parse(&lookup, "PASSCHECK_POLICY_MAX_LENGTH")?,
            strict: parse_flag(&lookup, "PASSCHECK_STRICT")?.unwrap_or(defaults.strict),
            log_level: lookup("PASSCHECK_LOG_LEVEL")
                .or_else(|| lookup("RUST_LOG"))
                .unwrap_or(defaults.log_level),
        })
    }
}

fn parse<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => value
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("Invalid value for {}: {:?}", key, value)),
        _ => Ok(None),
    }
}

fn parse_flag<F>(lookup: &F, key: &str) -> Result<Option<bool>>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = lookup(key) else {
        return Ok(None);
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "" => Ok(None),
        "1" | "true" | "yes" | "on" => Ok(Some(true)),
        "0" | "false" | "no" | "off" => Ok(Some(false)),
        _ => bail!("Invalid value for {}: {:?} (expected true or false)", key, value),
    }
}
