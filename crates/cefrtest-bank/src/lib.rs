//! cefrtest-bank — question bank sources.
//!
//! Implements the `QuestionSource` trait for the embedded starter bank and
//! for TOML files on disk, allowing cefrtest to administer questions from
//! multiple backends.

pub mod builtin;
pub mod config;
pub mod file;
pub mod select;

pub use config::{load_config, CefrtestConfig};
pub use select::{select_questions, SelectionOptions};

use std::path::Path;

use anyhow::Result;

use cefrtest_core::error::BankError;
use cefrtest_core::model::{CefrLevel, QuestionBank};

/// Trait for backends that supply question banks.
pub trait QuestionSource: Send + Sync {
    /// Human-readable source name (e.g. "builtin").
    fn name(&self) -> &str;

    /// Enumerate the banks this source can load.
    fn list(&self) -> Vec<BankInfo>;

    /// Load a bank by id.
    fn load(&self, bank_id: &str) -> Result<QuestionBank, BankError>;
}

/// Summary of an available bank.
#[derive(Debug, Clone)]
pub struct BankInfo {
    /// Bank identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Number of questions in the bank.
    pub question_count: usize,
    /// CEFR levels covered, lowest first.
    pub levels: Vec<CefrLevel>,
}

impl BankInfo {
    /// Summarize a loaded bank.
    pub fn of(bank: &QuestionBank) -> Self {
        Self {
            id: bank.id.clone(),
            name: bank.name.clone(),
            question_count: bank.questions.len(),
            levels: bank.levels(),
        }
    }
}

/// Create a source from a bank spec: the literal `"builtin"` for the
/// embedded starter bank, otherwise a path to a TOML file or a directory of
/// them.
pub fn create_source(spec: &str) -> Result<Box<dyn QuestionSource>> {
    if spec == "builtin" {
        return Ok(Box::new(builtin::BuiltinSource));
    }

    let path = Path::new(spec);
    if path.exists() {
        return Ok(Box::new(file::FileSource::new(path)));
    }

    anyhow::bail!("bank spec '{spec}' is neither \"builtin\" nor an existing path");
}
