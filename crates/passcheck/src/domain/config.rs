//! Word-list filter configuration and validation
//!
//! # Example
//!
//! ```
//! use passcheck::PassCheckConfig;
//!
//! let config = PassCheckConfig {
//!     false_positive_probability: 0.0001,
//!     ignore_case: true,
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default target false positive probability
pub const DEFAULT_FP_PROBABILITY: f64 = 0.001;

/// Configuration for building the leaked-password filter
///
/// An immutable value: build it with a struct literal over `Default`, then
/// hand it to [`crate::NotLeakedAssertion::build`], which validates it.
/// `None` disables a bound or limit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PassCheckConfig {
    /// Target false positive rate for filter sizing, in (0, 1)
    pub false_positive_probability: f64,
    /// Word-list entries shorter than this are never inserted
    pub min_length: Option<usize>,
    /// Word-list entries longer than this are never inserted
    pub max_length: Option<usize>,
    /// Upper bound on the number of passwords inserted into the filter
    pub max_items: Option<u64>,
    /// Fold case before insertion and before every query
    pub ignore_case: bool,
    /// Custom word list; the bundled default list is used when unset
    pub password_data_file: Option<PathBuf>,
}

impl Default for PassCheckConfig {
    fn default() -> Self {
        Self {
            false_positive_probability: DEFAULT_FP_PROBABILITY,
            min_length: None,
            max_length: None,
            max_items: None,
            ignore_case: false,
            password_data_file: None,
        }
    }
}

impl PassCheckConfig {
    /// Validate the configuration
    ///
    /// Invalid values are rejected, never clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = self.false_positive_probability;
        if !(p > 0.0 && p < 1.0) {
            return Err(ConfigError::InvalidProbability { probability: p });
        }

        if self.max_items == Some(0) {
            return Err(ConfigError::InvalidMaxItems);
        }

        if let (Some(min), Some(max)) = (self.min_length, self.max_length) {
            if min > max {
                return Err(ConfigError::LengthBoundsInverted { min, max });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = PassCheckConfig::default();

        assert_eq!(config.false_positive_probability, 0.001);
        assert_eq!(config.max_items, None);
        assert!(!config.ignore_case);
        assert!(config.password_data_file.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_probability_out_of_range() {
        for p in [0.0, -0.1, 1.0, 2.0, f64::NAN] {
            let config = PassCheckConfig {
                false_positive_probability: p,
                ..Default::default()
            };
            assert!(
                matches!(config.validate(), Err(ConfigError::InvalidProbability { .. })),
                "p={} must be rejected",
                p
            );
        }
    }

    #[test]
    fn test_validation_rejects_zero_max_items() {
        let config = PassCheckConfig {
            max_items: Some(0),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidMaxItems)));
    }

    #[test]
    fn test_validation_rejects_inverted_length_bounds() {
        let config = PassCheckConfig {
            min_length: Some(10),
            max_length: Some(4),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::LengthBoundsInverted { min: 10, max: 4 })
        ));
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let config: PassCheckConfig =
            serde_json::from_str(r#"{"ignore_case": true, "max_items": 2}"#).unwrap();

        assert!(config.ignore_case);
        assert_eq!(config.max_items, Some(2));
        assert_eq!(config.false_positive_probability, DEFAULT_FP_PROBABILITY);
    }
}
