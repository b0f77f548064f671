//! Password policy: an ordered set of assertions that must all hold
//!
//! Evaluation never short-circuits, so callers can report every violation
//! at once. A built policy is immutable and can be shared across threads.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use super::assertion::PolicyAssertion;
use super::length::LengthAssertion;
use super::not_leaked::NotLeakedAssertion;
use super::result::AssertionResult;
use crate::domain::PassCheckConfig;
use crate::error::PolicyError;
use crate::metrics::{MetricsRecorder, NoOpMetrics};

/// Minimum length enforced by [`PasswordPolicy::simple`]
pub const SIMPLE_MIN_LENGTH: usize = 8;

/// Position of an assertion within its policy
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct AssertionId(pub usize);

impl fmt::Display for AssertionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Result of one assertion within an evaluation
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AssertionOutcome {
    pub id: AssertionId,
    pub assertion: &'static str,
    pub result: AssertionResult,
}

/// Ordered results of evaluating one password against a policy
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PolicyEvaluation {
    outcomes: Vec<AssertionOutcome>,
}

impl PolicyEvaluation {
    pub fn iter(&self) -> impl Iterator<Item = &AssertionOutcome> {
        self.outcomes.iter()
    }

    /// Result for a specific assertion
    pub fn get(&self, id: AssertionId) -> Option<&AssertionResult> {
        self.outcomes
            .iter()
            .find(|outcome| outcome.id == id)
            .map(|outcome| &outcome.result)
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// True when every assertion passed
    pub fn is_compliant(&self) -> bool {
        self.outcomes.iter().all(|outcome| outcome.result.is_success())
    }

    /// Failed outcomes only, in evaluation order
    pub fn violations(&self) -> PolicyEvaluation {
        PolicyEvaluation {
            outcomes: self
                .outcomes
                .iter()
                .filter(|outcome| !outcome.result.is_success())
                .cloned()
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a PolicyEvaluation {
    type Item = &'a AssertionOutcome;
    type IntoIter = std::slice::Iter<'a, AssertionOutcome>;

    fn into_iter(self) -> Self::IntoIter {
        self.outcomes.iter()
    }
}

/// A set of assertions that must all hold for a password to comply
#[derive(Clone)]
pub struct PasswordPolicy {
    assertions: Vec<PolicyAssertion>,
    recorder: Arc<dyn MetricsRecorder>,
}

impl PasswordPolicy {
    /// Create a policy; assertions are evaluated in the order given
    pub fn new(assertions: Vec<PolicyAssertion>) -> Self {
        Self {
            assertions,
            recorder: Arc::new(NoOpMetrics),
        }
    }

    /// Report evaluations to `recorder`
    pub fn with_recorder(mut self, recorder: Arc<dyn MetricsRecorder>) -> Self {
        self.recorder = recorder;
        self
    }

    /// Minimum length of 8 plus a case-insensitive check against the
    /// bundled common password list at p = 0.001
    pub fn simple() -> Result<Self, PolicyError> {
        let length = LengthAssertion::new(Some(SIMPLE_MIN_LENGTH), None)?;
        let not_leaked = NotLeakedAssertion::build(PassCheckConfig {
            ignore_case: true,
            ..Default::default()
        })?;
        Ok(Self::new(vec![length.into(), not_leaked.into()]))
    }

    pub fn assertions(&self) -> &[PolicyAssertion] {
        &self.assertions
    }

    pub fn assertion(&self, id: AssertionId) -> Option<&PolicyAssertion> {
        self.assertions.get(id.0)
    }

    /// Verify the password against every assertion
    pub fn evaluate(&self, password: Option<&str>) -> PolicyEvaluation {
        let outcomes: Vec<AssertionOutcome> = self
            .assertions
            .iter()
            .enumerate()
            .map(|(index, assertion)| AssertionOutcome {
                id: AssertionId(index),
                assertion: assertion.name(),
                result: assertion.verify(password),
            })
            .collect();
        let evaluation = PolicyEvaluation { outcomes };

        let violations = evaluation.iter().filter(|o| !o.result.is_success()).count();
        debug!(
            assertions = evaluation.len(),
            violations, "Evaluated password against policy"
        );
        self.recorder.record_evaluation(violations);
        evaluation
    }

    /// Failed outcomes of an evaluation, in order
    pub fn violations(results: &PolicyEvaluation) -> PolicyEvaluation {
        results.violations()
    }

    /// Whether the password satisfies every assertion
    pub fn check_compliance(&self, password: Option<&str>) -> bool {
        self.evaluate(password).is_compliant()
    }
}

impl fmt::Debug for PasswordPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordPolicy")
            .field("assertions", &self.assertions)
            .finish_non_exhaustive()
    }
}
