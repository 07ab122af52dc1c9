//! Core data model types for cefrtest.
//!
//! These are the fundamental types the entire cefrtest system uses to
//! represent questions, learner answers, and question banks.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// CEFR proficiency levels, in ascending order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum CefrLevel {
    A1,
    A2,
    B1,
    B2,
    C1,
    C2,
}

impl CefrLevel {
    /// All levels, lowest first.
    pub const ALL: [CefrLevel; 6] = [
        CefrLevel::A1,
        CefrLevel::A2,
        CefrLevel::B1,
        CefrLevel::B2,
        CefrLevel::C1,
        CefrLevel::C2,
    ];

    /// Conventional descriptive label for the level.
    pub fn label(&self) -> &'static str {
        match self {
            CefrLevel::A1 => "Beginner",
            CefrLevel::A2 => "Elementary",
            CefrLevel::B1 => "Intermediate",
            CefrLevel::B2 => "Upper Intermediate",
            CefrLevel::C1 => "Advanced",
            CefrLevel::C2 => "Proficiency",
        }
    }
}

impl fmt::Display for CefrLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CefrLevel::A1 => write!(f, "A1"),
            CefrLevel::A2 => write!(f, "A2"),
            CefrLevel::B1 => write!(f, "B1"),
            CefrLevel::B2 => write!(f, "B2"),
            CefrLevel::C1 => write!(f, "C1"),
            CefrLevel::C2 => write!(f, "C2"),
        }
    }
}

impl FromStr for CefrLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "A1" => Ok(CefrLevel::A1),
            "A2" => Ok(CefrLevel::A2),
            "B1" => Ok(CefrLevel::B1),
            "B2" => Ok(CefrLevel::B2),
            "C1" => Ok(CefrLevel::C1),
            "C2" => Ok(CefrLevel::C2),
            other => Err(format!("unknown CEFR level: {other}")),
        }
    }
}

/// The skill a question measures.
///
/// The declaration order is the fixed iteration order used for skill
/// breakdowns and recommendation tips.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SkillArea {
    Grammar,
    Vocabulary,
    Reading,
    Listening,
    Writing,
}

impl SkillArea {
    /// All skill areas in reporting order.
    pub const ALL: [SkillArea; 5] = [
        SkillArea::Grammar,
        SkillArea::Vocabulary,
        SkillArea::Reading,
        SkillArea::Listening,
        SkillArea::Writing,
    ];
}

impl fmt::Display for SkillArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkillArea::Grammar => write!(f, "grammar"),
            SkillArea::Vocabulary => write!(f, "vocabulary"),
            SkillArea::Reading => write!(f, "reading"),
            SkillArea::Listening => write!(f, "listening"),
            SkillArea::Writing => write!(f, "writing"),
        }
    }
}

impl FromStr for SkillArea {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "grammar" => Ok(SkillArea::Grammar),
            "vocabulary" => Ok(SkillArea::Vocabulary),
            "reading" => Ok(SkillArea::Reading),
            "listening" => Ok(SkillArea::Listening),
            "writing" => Ok(SkillArea::Writing),
            other => Err(format!("unknown skill area: {other}")),
        }
    }
}

/// A single assessment question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// Unique identifier within a bank.
    pub id: String,
    /// The CEFR level this question targets.
    pub level: CefrLevel,
    /// The skill this question measures.
    pub skill_area: SkillArea,
    /// Maximum points this question contributes.
    pub points: u32,
    /// Type-specific content and answer key.
    #[serde(flatten)]
    pub kind: QuestionKind,
}

impl Question {
    /// The wire name of this question's type.
    pub fn type_name(&self) -> &'static str {
        match self.kind {
            QuestionKind::MultipleChoice { .. } => "multiple-choice",
            QuestionKind::FillBlank { .. } => "fill-blank",
            QuestionKind::ReadingComprehension { .. } => "reading-comprehension",
            QuestionKind::ListeningComprehension { .. } => "listening-comprehension",
            QuestionKind::VocabularyMatch { .. } => "vocabulary-match",
        }
    }
}

/// The five supported question variants.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum QuestionKind {
    /// One correct option out of several.
    MultipleChoice {
        prompt: String,
        options: Vec<String>,
        correct_answer: usize,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        explanation: Option<String>,
    },
    /// A passage with one or more blanks to fill in.
    FillBlank {
        passage: String,
        #[serde(default)]
        blanks: Vec<Blank>,
    },
    /// A reading passage with sub-questions scored as a group.
    ReadingComprehension {
        passage: Passage,
        #[serde(default)]
        questions: Vec<SubQuestion>,
    },
    /// An audio clip (with transcript) and sub-questions scored as a group.
    ListeningComprehension {
        audio_url: String,
        transcript: String,
        duration_secs: u32,
        #[serde(default)]
        questions: Vec<SubQuestion>,
    },
    /// Match each word to the index of its definition.
    VocabularyMatch {
        words: Vec<String>,
        definitions: Vec<String>,
        correct_matches: Vec<usize>,
    },
}

/// One blank within a fill-blank passage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Blank {
    /// Character offset of the blank within the passage.
    pub position: usize,
    /// Accepted answers, compared case-insensitively after trimming.
    pub correct_answers: Vec<String>,
    /// Optional word-bank choices shown to the learner.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

/// A reading passage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Passage {
    pub title: String,
    pub content: String,
    pub word_count: u32,
}

/// A sub-question of a comprehension question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubQuestion {
    pub id: String,
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_answer: usize,
}

/// A learner's answer to one question.
///
/// The shape depends on the question type: a single option index for
/// multiple-choice, text entries (by blank order) for fill-blank, and index
/// lists (by sub-question or word order) for comprehension and
/// vocabulary-match. A structurally mismatched answer scores zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    /// A single selected option index.
    Choice(usize),
    /// One selected index per sub-question or word.
    Choices(Vec<usize>),
    /// One text entry per blank.
    Texts(Vec<String>),
}

/// Answers keyed by question id. A missing key means "not attempted".
pub type AnswerMap = HashMap<String, Answer>;

/// A collection of questions administered together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionBank {
    /// Unique identifier for this bank.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Description of what this bank assesses.
    #[serde(default)]
    pub description: String,
    /// Suggested time limit for a full sitting.
    #[serde(default = "default_time_limit")]
    pub time_limit_secs: u64,
    /// The questions in this bank.
    #[serde(default)]
    pub questions: Vec<Question>,
}

fn default_time_limit() -> u64 {
    1800
}

impl QuestionBank {
    /// The sum of `points` across all questions.
    pub fn max_score(&self) -> u32 {
        self.questions.iter().map(|q| q.points).sum()
    }

    /// Distinct CEFR levels covered by this bank, lowest first.
    pub fn levels(&self) -> Vec<CefrLevel> {
        let mut levels: Vec<CefrLevel> = self.questions.iter().map(|q| q.level).collect();
        levels.sort();
        levels.dedup();
        levels
    }
}
