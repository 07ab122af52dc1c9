//! File-backed question bank source.

use std::path::{Path, PathBuf};

use cefrtest_core::error::BankError;
use cefrtest_core::model::QuestionBank;
use cefrtest_core::parser;

use crate::{BankInfo, QuestionSource};

/// Source backed by a TOML bank file or a directory of them.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// All banks reachable from this source's path.
    fn load_all(&self) -> Result<Vec<QuestionBank>, BankError> {
        if self.path.is_dir() {
            parser::load_bank_directory(&self.path).map_err(|e| BankError::Parse {
                path: self.path.clone(),
                message: format!("{e:#}"),
            })
        } else {
            let content =
                std::fs::read_to_string(&self.path).map_err(|e| BankError::Io {
                    path: self.path.clone(),
                    source: e,
                })?;
            let bank =
                parser::parse_bank_str(&content, &self.path).map_err(|e| BankError::Parse {
                    path: self.path.clone(),
                    message: format!("{e:#}"),
                })?;
            Ok(vec![bank])
        }
    }
}

impl QuestionSource for FileSource {
    fn name(&self) -> &str {
        "file"
    }

    fn list(&self) -> Vec<BankInfo> {
        match self.load_all() {
            Ok(banks) => banks.iter().map(BankInfo::of).collect(),
            Err(e) => {
                tracing::warn!("failed to enumerate banks at {}: {e}", self.path.display());
                Vec::new()
            }
        }
    }

    fn load(&self, bank_id: &str) -> Result<QuestionBank, BankError> {
        let banks = self.load_all()?;
        banks
            .into_iter()
            .find(|b| b.id == bank_id)
            .ok_or_else(|| BankError::NotFound {
                id: bank_id.to_string(),
            })
    }
}
