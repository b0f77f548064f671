//! # PassCheck Runtime
//!
//! Reads candidate passwords from stdin, one per line, and writes one JSON
//! record per password to stdout:
//!
//! ```text
//! {"password_index":0,"compliant":false,"violations":[{"assertion":"not_leaked","reason":"..."}]}
//! ```
//!
//! Passwords are never echoed. Logs go to stderr.

mod config;

use anyhow::{Context, Result};
use serde::Serialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use passcheck::{LengthAssertion, NotLeakedAssertion, PasswordPolicy, PolicyAssertion};

use crate::config::RuntimeConfig;

/// One failed assertion in an output record
#[derive(Debug, Serialize)]
struct Violation {
    assertion: &'static str,
    reason: String,
}

/// Output record for one candidate password
#[derive(Debug, Serialize)]
struct CheckRecord {
    password_index: u64,
    compliant: bool,
    violations: Vec<Violation>,
}

/// Assemble the policy; the leaked-password assertion is optional unless strict
fn build_policy(config: &RuntimeConfig) -> Result<PasswordPolicy> {
    let mut assertions: Vec<PolicyAssertion> = Vec::new();

    if config.policy_min_length.is_some() || config.policy_max_length.is_some() {
        let length = LengthAssertion::new(config.policy_min_length, config.policy_max_length)
            .context("Invalid policy length bounds")?;
        assertions.push(length.into());
    }

    match NotLeakedAssertion::build(config.filter.clone()) {
        Ok(not_leaked) => assertions.push(not_leaked.into()),
        Err(e) if config.strict => {
            return Err(e).context("Failed to build leaked password assertion");
        }
        Err(e) => {
            error!(error = %e, "Failed to build leaked password assertion");
            warn!("Continuing without the leaked password assertion");
        }
    }

    Ok(PasswordPolicy::new(assertions))
}

/// Evaluate one candidate; `None` stands for a line that is not valid UTF-8
fn check(policy: &PasswordPolicy, password_index: u64, password: Option<&str>) -> CheckRecord {
    let evaluation = policy.evaluate(password);
    let violations: Vec<Violation> = evaluation
        .violations()
        .iter()
        .map(|outcome| Violation {
            assertion: outcome.assertion,
            reason: outcome.result.reason().to_string(),
        })
        .collect();

    CheckRecord {
        password_index,
        compliant: violations.is_empty(),
        violations,
    }
}

/// Check every line of `input`, writing one JSON record per line to `output`
///
/// Lines that are not valid UTF-8 are evaluated as missing passwords, so
/// they fail every assertion without stopping the run.
async fn run<R, W>(policy: &PasswordPolicy, mut input: R, mut output: W) -> Result<u64>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut line = Vec::new();
    let mut password_index = 0u64;

    loop {
        line.clear();
        let read = input
            .read_until(b'\n', &mut line)
            .await
            .context("Failed to read stdin")?;
        if read == 0 {
            break;
        }

        let bytes = line.strip_suffix(b"\n").unwrap_or(&line[..]);
        let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
        let password = match std::str::from_utf8(bytes) {
            Ok(password) => Some(password),
            Err(_) => {
                warn!(password_index, "Input line is not valid UTF-8");
                None
            }
        };
        let record = check(policy, password_index, password);

        let mut json = serde_json::to_vec(&record)?;
        json.push(b'\n');
        output.write_all(&json).await?;
        password_index += 1;
    }
    output.flush().await?;

    Ok(password_index)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = RuntimeConfig::from_env()?;

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_new(&config.log_level)
                .with_context(|| format!("Invalid log level: {}", config.log_level))?,
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let policy = build_policy(&config)?;
    info!(
        assertions = policy.assertions().len(),
        strict = config.strict,
        "Password policy ready"
    );

    let checked = run(&policy, BufReader::new(tokio::io::stdin()), tokio::io::stdout()).await?;

    info!(checked, "Input exhausted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use passcheck::{AssertionResult, PassCheckConfig};
    use std::path::PathBuf;

    fn missing_list_config(strict: bool) -> RuntimeConfig {
        RuntimeConfig {
            filter: PassCheckConfig {
                password_data_file: Some(PathBuf::from("/nonexistent/passwords.dat")),
                ..Default::default()
            },
            strict,
            ..Default::default()
        }
    }

    #[test]
    fn test_default_policy_has_both_assertions() {
        let policy = build_policy(&RuntimeConfig::default()).unwrap();
        let names: Vec<&str> = policy.assertions().iter().map(|a| a.name()).collect();
        assert_eq!(names, vec!["length", "not_leaked"]);
    }

    #[test]
    fn test_missing_word_list_is_tolerated_when_not_strict() {
        let policy = build_policy(&missing_list_config(false)).unwrap();
        assert_eq!(policy.assertions().len(), 1, "Only the length assertion remains");
    }

    #[test]
    fn test_missing_word_list_fails_when_strict() {
        assert!(build_policy(&missing_list_config(true)).is_err());
    }

    #[test]
    fn test_check_record_lists_violations() {
        let policy = build_policy(&RuntimeConfig::default()).unwrap();

        let record = check(&policy, 3, Some("password"));
        assert_eq!(record.password_index, 3);
        assert!(!record.compliant);
        assert_eq!(record.violations.len(), 1);
        assert_eq!(record.violations[0].assertion, "not_leaked");

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["compliant"], false);
        assert!(json.get("password").is_none(), "Password is never echoed");
    }

    #[test]
    fn test_check_record_compliant() {
        let policy = build_policy(&RuntimeConfig::default()).unwrap();
        let record = check(&policy, 0, Some("unusual-phrase-42"));

        assert!(record.compliant);
        assert!(record.violations.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_utf8_line_does_not_stop_the_run() {
        let policy = build_policy(&RuntimeConfig::default()).unwrap();
        let input: &[u8] = b"password\n\xff\xfe\r\nunusual-phrase-42\n";
        let mut output = Vec::new();

        let checked = run(&policy, input, &mut output).await.unwrap();
        assert_eq!(checked, 3, "Every line is evaluated");

        let records: Vec<serde_json::Value> = output
            .split(|b| *b == b'\n')
            .filter(|line| !line.is_empty())
            .map(|line| serde_json::from_slice(line).unwrap())
            .collect();
        assert_eq!(records.len(), 3);

        assert_eq!(records[1]["password_index"], 1);
        assert_eq!(records[1]["compliant"], false);
        assert!(records[1]["violations"]
            .as_array()
            .unwrap()
            .iter()
            .all(|v| v["reason"] == AssertionResult::NULL_VALUE.reason()));

        assert_eq!(records[2]["password_index"], 2);
        assert_eq!(records[2]["compliant"], true);
    }

    #[tokio::test]
    async fn test_last_line_without_newline_is_checked() {
        let policy = build_policy(&RuntimeConfig::default()).unwrap();
        let input: &[u8] = b"password";
        let mut output = Vec::new();

        assert_eq!(run(&policy, input, &mut output).await.unwrap(), 1);
        let record: serde_json::Value =
            serde_json::from_slice(output.strip_suffix(b"\n").unwrap()).unwrap();
        assert_eq!(record["compliant"], false);
    }
}
