//! The closed set of policy assertions

use super::length::LengthAssertion;
use super::not_leaked::NotLeakedAssertion;
use super::result::AssertionResult;

/// One password policy assertion
#[derive(Clone, Debug)]
pub enum PolicyAssertion {
    Length(LengthAssertion),
    NotLeaked(NotLeakedAssertion),
}

impl PolicyAssertion {
    /// Check a password against this assertion
    pub fn verify(&self, password: Option<&str>) -> AssertionResult {
        match self {
            Self::Length(assertion) => assertion.verify(password),
            Self::NotLeaked(assertion) => assertion.verify(password),
        }
    }

    /// Whether the password satisfies this assertion
    pub fn holds_for(&self, password: Option<&str>) -> bool {
        self.verify(password).is_success()
    }

    /// Stable kind name, used in logs and reports
    pub fn name(&self) -> &'static str {
        match self {
            Self::Length(_) => "length",
            Self::NotLeaked(_) => "not_leaked",
        }
    }
}

impl From<LengthAssertion> for PolicyAssertion {
    fn from(assertion: LengthAssertion) -> Self {
        Self::Length(assertion)
    }
}

impl From<NotLeakedAssertion> for PolicyAssertion {
    fn from(assertion: NotLeakedAssertion) -> Self {
        Self::NotLeaked(assertion)
    }
}
