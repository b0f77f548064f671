//! Policy layer: assertions and their composition

pub mod assertion;
pub mod length;
pub mod not_leaked;
pub mod password_policy;
pub mod result;

pub use assertion::PolicyAssertion;
pub use length::LengthAssertion;
pub use not_leaked::NotLeakedAssertion;
pub use password_policy::{
    AssertionId, AssertionOutcome, PasswordPolicy, PolicyEvaluation, SIMPLE_MIN_LENGTH,
};
pub use result::AssertionResult;
