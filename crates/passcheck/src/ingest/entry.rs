//! Word-list record format
//!
//! A line is either a bare password or a tab-delimited record:
//!
//! ```text
//! password[\tdeclared_length[\tfurther metadata...]]
//! ```
//!
//! The declared length, when present and numeric, replaces measuring the
//! password for the length-filter decision.

use std::borrow::Cow;

/// One parsed word-list entry
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordListEntry {
    pub password: String,
    pub declared_length: Option<usize>,
}

impl WordListEntry {
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
            declared_length: None,
        }
    }

    /// Length used by the length filter, in characters
    pub fn length(&self) -> usize {
        self.declared_length
            .unwrap_or_else(|| self.password.chars().count())
    }
}

/// Parse a raw word-list line
///
/// Returns `None` for blank lines.
pub fn parse_line(line: &str) -> Option<WordListEntry> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    if line.is_empty() {
        return None;
    }

    let mut fields = line.split('\t');
    let password = fields.next()?;
    if password.is_empty() {
        return None;
    }
    let declared_length = fields.next().and_then(|f| f.trim().parse::<usize>().ok());

    Some(WordListEntry {
        password: password.to_string(),
        declared_length,
    })
}

/// Apply case folding when enabled
///
/// Must be used identically on the insert path and the query path.
pub fn fold_case(password: &str, ignore_case: bool) -> Cow<'_, str> {
    if ignore_case {
        Cow::Owned(password.to_lowercase())
    } else {
        Cow::Borrowed(password)
    }
}
