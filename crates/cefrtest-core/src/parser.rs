//! TOML question bank parser.
//!
//! Loads question banks from TOML files and directories, and validates them.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{
    Blank, CefrLevel, Passage, Question, QuestionBank, QuestionKind, SkillArea, SubQuestion,
};

/// Intermediate TOML structure for parsing bank files.
#[derive(Debug, Deserialize)]
struct TomlBankFile {
    bank: TomlBankHeader,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlBankHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default = "default_time_limit")]
    time_limit_secs: u64,
}

fn default_time_limit() -> u64 {
    1800
}

/// One `[[questions]]` entry. Type-specific fields are all optional here;
/// the conversion step checks the ones the declared type requires.
#[derive(Debug, Deserialize)]
struct TomlQuestion {
    id: String,
    #[serde(rename = "type")]
    kind: String,
    level: String,
    skill_area: String,
    points: u32,
    #[serde(default)]
    prompt: Option<String>,
    #[serde(default)]
    options: Option<Vec<String>>,
    #[serde(default)]
    correct_answer: Option<usize>,
    #[serde(default)]
    explanation: Option<String>,
    /// A string for fill-blank, a table for reading-comprehension.
    #[serde(default)]
    passage: Option<toml::Value>,
    #[serde(default)]
    blanks: Vec<TomlBlank>,
    #[serde(default)]
    questions: Vec<TomlSubQuestion>,
    #[serde(default)]
    audio_url: Option<String>,
    #[serde(default)]
    transcript: Option<String>,
    #[serde(default)]
    duration_secs: Option<u32>,
    #[serde(default)]
    words: Vec<String>,
    #[serde(default)]
    definitions: Vec<String>,
    #[serde(default)]
    correct_matches: Vec<usize>,
}

#[derive(Debug, Deserialize)]
struct TomlBlank {
    position: usize,
    correct_answers: Vec<String>,
    #[serde(default)]
    options: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct TomlSubQuestion {
    id: String,
    prompt: String,
    options: Vec<String>,
    correct_answer: usize,
}

/// Parse a single TOML file into a `QuestionBank`.
pub fn parse_bank(path: &Path) -> Result<QuestionBank> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read bank file: {}", path.display()))?;

    parse_bank_str(&content, path)
}

/// Parse a TOML string into a `QuestionBank` (useful for testing).
pub fn parse_bank_str(content: &str, source_path: &Path) -> Result<QuestionBank> {
    let parsed: TomlBankFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let questions = parsed
        .questions
        .into_iter()
        .map(convert_question)
        .collect::<Result<Vec<_>>>()?;

    Ok(QuestionBank {
        id: parsed.bank.id,
        name: parsed.bank.name,
        description: parsed.bank.description,
        time_limit_secs: parsed.bank.time_limit_secs,
        questions,
    })
}

fn convert_question(q: TomlQuestion) -> Result<Question> {
    let level: CefrLevel = q
        .level
        .parse()
        .map_err(|e: String| anyhow::anyhow!("question '{}': {e}", q.id))?;
    let skill_area: SkillArea = q
        .skill_area
        .parse()
        .map_err(|e: String| anyhow::anyhow!("question '{}': {e}", q.id))?;

    let kind = match q.kind.as_str() {
        "multiple-choice" => QuestionKind::MultipleChoice {
            prompt: require(q.prompt, &q.id, "prompt")?,
            options: require(q.options, &q.id, "options")?,
            correct_answer: require(q.correct_answer, &q.id, "correct_answer")?,
            explanation: q.explanation,
        },
        "fill-blank" => QuestionKind::FillBlank {
            passage: match require(q.passage, &q.id, "passage")? {
                toml::Value::String(s) => s,
                _ => anyhow::bail!("question '{}': fill-blank passage must be a string", q.id),
            },
            blanks: q
                .blanks
                .into_iter()
                .map(|b| Blank {
                    position: b.position,
                    correct_answers: b.correct_answers,
                    options: b.options,
                })
                .collect(),
        },
        "reading-comprehension" => QuestionKind::ReadingComprehension {
            passage: require(q.passage, &q.id, "passage")?
                .try_into::<Passage>()
                .with_context(|| {
                    format!(
                        "question '{}': reading-comprehension passage must be a table \
                         with title, content, and word_count",
                        q.id
                    )
                })?,
            questions: convert_sub_questions(q.questions),
        },
        "listening-comprehension" => QuestionKind::ListeningComprehension {
            audio_url: require(q.audio_url, &q.id, "audio_url")?,
            transcript: require(q.transcript, &q.id, "transcript")?,
            duration_secs: q.duration_secs.unwrap_or(0),
            questions: convert_sub_questions(q.questions),
        },
        "vocabulary-match" => QuestionKind::VocabularyMatch {
            words: q.words,
            definitions: q.definitions,
            correct_matches: q.correct_matches,
        },
        other => anyhow::bail!("question '{}': unknown question type: {other}", q.id),
    };

    Ok(Question {
        id: q.id,
        level,
        skill_area,
        points: q.points,
        kind,
    })
}

fn require<T>(value: Option<T>, id: &str, field: &str) -> Result<T> {
    value.ok_or_else(|| anyhow::anyhow!("question '{id}': missing field '{field}'"))
}

fn convert_sub_questions(subs: Vec<TomlSubQuestion>) -> Vec<SubQuestion> {
    subs.into_iter()
        .map(|s| SubQuestion {
            id: s.id,
            prompt: s.prompt,
            options: s.options,
            correct_answer: s.correct_answer,
        })
        .collect()
}

/// Recursively load all `.toml` bank files from a directory.
pub fn load_bank_directory(dir: &Path) -> Result<Vec<QuestionBank>> {
    let mut banks = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            banks.extend(load_bank_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_bank(&path) {
                Ok(bank) => banks.push(bank),
                Err(e) => {
                    tracing::warn!("skipping {}: {}", path.display(), e);
                }
            }
        }
    }

    Ok(banks)
}

/// A warning from bank validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question ID (if applicable).
    pub question_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a bank for shapes the scoring engine will silently zero out.
///
/// None of these fail a load; a flagged question simply cannot award the
/// points its author intended.
pub fn validate_bank(bank: &QuestionBank) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if bank.questions.is_empty() {
        warnings.push(ValidationWarning {
            question_id: None,
            message: "bank contains no questions".into(),
        });
    }

    // Check for duplicate question IDs
    let mut seen_ids = std::collections::HashSet::new();
    for question in &bank.questions {
        if !seen_ids.insert(&question.id) {
            warnings.push(ValidationWarning {
                question_id: Some(question.id.clone()),
                message: format!("duplicate question ID: {}", question.id),
            });
        }
    }

    for question in &bank.questions {
        let mut warn = |message: String| {
            warnings.push(ValidationWarning {
                question_id: Some(question.id.clone()),
                message,
            });
        };

        if question.points == 0 {
            warn("points is 0, question cannot contribute to the score".into());
        }

        match &question.kind {
            QuestionKind::MultipleChoice { options, correct_answer, .. } => {
                if options.is_empty() {
                    warn("multiple-choice question has no options".into());
                } else if *correct_answer >= options.len() {
                    warn(format!(
                        "correct_answer {} is out of range for {} options",
                        correct_answer,
                        options.len()
                    ));
                }
            }
            QuestionKind::FillBlank { blanks, .. } => {
                if blanks.is_empty() {
                    warn("fill-blank question has no blanks".into());
                }
                for (i, blank) in blanks.iter().enumerate() {
                    if blank.correct_answers.is_empty() {
                        warn(format!("blank {i} accepts no answers"));
                    }
                }
            }
            QuestionKind::ReadingComprehension { questions, .. }
            | QuestionKind::ListeningComprehension { questions, .. } => {
                if questions.is_empty() {
                    warn("comprehension question has no sub-questions".into());
                }
                for sub in questions {
                    if sub.correct_answer >= sub.options.len() {
                        warn(format!(
                            "sub-question '{}': correct_answer {} is out of range for {} options",
                            sub.id,
                            sub.correct_answer,
                            sub.options.len()
                        ));
                    }
                }
            }
            QuestionKind::VocabularyMatch { words, definitions, correct_matches } => {
                if correct_matches.len() != words.len() {
                    warn(format!(
                        "correct_matches has {} entries for {} words",
                        correct_matches.len(),
                        words.len()
                    ));
                }
                for (i, m) in correct_matches.iter().enumerate() {
                    if *m >= definitions.len() {
                        warn(format!(
                            "match {i} points at definition {m}, but there are only {} definitions",
                            definitions.len()
                        ));
                    }
                }
            }
        }
    }

    warnings
}
