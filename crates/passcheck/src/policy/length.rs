//! Minimum and/or maximum password length requirement

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::result::AssertionResult;
use crate::error::ConfigError;

/// Asserts that a password's length lies within inclusive bounds
///
/// Each bound is independently optional; `None` disables it. Lengths are
/// counted in characters. At least one bound must be set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthAssertion {
    min_length: Option<usize>,
    max_length: Option<usize>,
}

impl LengthAssertion {
    /// Create a length assertion
    ///
    /// # Errors
    /// `ConfigError::NoLengthRequirement` if both bounds are `None`,
    /// `ConfigError::LengthBoundsInverted` if `min > max`.
    pub fn new(min_length: Option<usize>, max_length: Option<usize>) -> Result<Self, ConfigError> {
        match (min_length, max_length) {
            (None, None) => return Err(ConfigError::NoLengthRequirement),
            (Some(min), Some(max)) if min > max => {
                return Err(ConfigError::LengthBoundsInverted { min, max })
            }
            _ => {}
        }
        Ok(Self {
            min_length,
            max_length,
        })
    }

    pub fn min_length(&self) -> Option<usize> {
        self.min_length
    }

    pub fn max_length(&self) -> Option<usize> {
        self.max_length
    }

    /// Check the password against the length bounds
    pub fn verify(&self, password: Option<&str>) -> AssertionResult {
        let Some(password) = password.filter(|p| !p.is_empty()) else {
            debug!("Length assertion failed - password is null or empty");
            return AssertionResult::NULL_VALUE;
        };

        let length = password.chars().count();
        if self.min_length.is_some_and(|min| length < min) {
            debug!(length, "Length assertion failed - below minimum length");
            return AssertionResult::INSUFFICIENT_LENGTH;
        }
        if self.max_length.is_some_and(|max| length > max) {
            debug!(length, "Length assertion failed - above maximum length");
            return AssertionResult::EXCESSIVE_LENGTH;
        }
        AssertionResult::SUCCESS
    }
}
