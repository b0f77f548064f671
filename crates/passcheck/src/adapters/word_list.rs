//! Word-list sources
//!
//! Every source yields raw text lines; parsing of the tab-delimited record
//! format happens during ingestion.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::domain::PassCheckConfig;
use crate::error::SourceError;
use crate::ports::{LineIter, WordListSource};

/// Default word list distributed with the crate, one password per line
const DEFAULT_WORD_LIST: &str = include_str!("../../data/passwords.dat");

/// Pick the source named by the configuration
///
/// Falls back to the bundled default list when no data file is configured.
pub fn source_for(config: &PassCheckConfig) -> Box<dyn WordListSource> {
    match &config.password_data_file {
        Some(path) => Box::new(FileWordList::new(path)),
        None => Box::new(BundledWordList),
    }
}

/// A UTF-8 encoded word list on disk
#[derive(Clone, Debug)]
pub struct FileWordList {
    path: PathBuf,
}

impl FileWordList {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl WordListSource for FileWordList {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn open(&self) -> Result<LineIter<'_>, SourceError> {
        debug!(path = %self.path.display(), "Opening custom password data file");
        let file = File::open(&self.path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                SourceError::NotFound {
                    path: self.path.clone(),
                }
            } else {
                warn!(path = %self.path.display(), error = %e, "Failed to open password data file");
                SourceError::io(self.describe(), e)
            }
        })?;
        Ok(Box::new(BufReader::new(file).lines()))
    }
}

/// The default word list compiled into the crate
#[derive(Clone, Copy, Debug, Default)]
pub struct BundledWordList;

impl WordListSource for BundledWordList {
    fn describe(&self) -> String {
        "bundled:passwords.dat".to_string()
    }

    fn open(&self) -> Result<LineIter<'_>, SourceError> {
        debug!("Reading password data from the bundled default list");
        Ok(Box::new(DEFAULT_WORD_LIST.lines().map(|line| Ok(line.to_string()))))
    }
}

/// Word-list lines held in memory
#[derive(Clone, Debug, Default)]
pub struct InMemoryWordList {
    lines: Vec<String>,
}

impl InMemoryWordList {
    pub fn new<I, T>(lines: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl WordListSource for InMemoryWordList {
    fn describe(&self) -> String {
        format!("memory:{} lines", self.lines.len())
    }

    fn open(&self) -> Result<LineIter<'_>, SourceError> {
        Ok(Box::new(self.lines.iter().cloned().map(Ok)))
    }
}
