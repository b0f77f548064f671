//! Assertion results

use std::borrow::Cow;
use std::fmt;

use serde::Serialize;

/// Outcome of checking one assertion against one password
///
/// Immutable. The common outcomes are predefined as associated constants,
/// and assertions compare results by value.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct AssertionResult {
    success: bool,
    reason: Cow<'static, str>,
}

impl AssertionResult {
    /// Generic success
    pub const SUCCESS: Self = Self::fixed(true, "Password meets assertion criteria.");

    /// Generic failure for a missing or empty password
    pub const NULL_VALUE: Self = Self::fixed(false, "Supplied password value is null or empty.");

    /// The password is shorter than the minimum length
    pub const INSUFFICIENT_LENGTH: Self =
        Self::fixed(false, "Password does not meet minimum length requirement.");

    /// The password is longer than the maximum length
    pub const EXCESSIVE_LENGTH: Self =
        Self::fixed(false, "Password exceeds the maximum length requirement.");

    /// The password was found in the leaked/common password list
    pub const LEAKED_PASSWORD: Self =
        Self::fixed(false, "Password is too common, or has been leaked.");

    const fn fixed(success: bool, reason: &'static str) -> Self {
        Self {
            success,
            reason: Cow::Borrowed(reason),
        }
    }

    /// A failing result with a custom reason
    pub fn failure(reason: impl Into<Cow<'static, str>>) -> Self {
        Self {
            success: false,
            reason: reason.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl fmt::Display for AssertionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.success { "PASS" } else { "FAIL" };
        write!(f, "{}: {}", status, self.reason)
    }
}
