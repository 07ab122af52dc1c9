//! Test-session bookkeeping around the pure scoring engine.
//!
//! A session owns the question snapshot and the answers accumulated while
//! the learner works through them. Completing a session consumes it, so a
//! result is produced exactly once and no answer can be recorded afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{Answer, AnswerMap, Question, QuestionBank};
use crate::results::TestResult;
use crate::scoring;

/// An in-progress sitting of a question bank.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestSession {
    /// Unique session identifier.
    pub id: Uuid,
    /// The bank this session was started from.
    pub bank_id: String,
    /// Snapshot of the questions being administered.
    pub questions: Vec<Question>,
    /// Answers recorded so far, keyed by question id.
    pub answers: AnswerMap,
    /// When the session started.
    pub started_at: DateTime<Utc>,
    /// Suggested time limit; 0 means unlimited.
    pub time_limit_secs: u64,
}

impl TestSession {
    /// Start a session over all questions in a bank.
    pub fn new(bank: &QuestionBank) -> Self {
        Self::with_questions(&bank.id, bank.questions.clone(), bank.time_limit_secs)
    }

    /// Start a session over an explicit question selection.
    pub fn with_questions(bank_id: &str, questions: Vec<Question>, time_limit_secs: u64) -> Self {
        Self {
            id: Uuid::new_v4(),
            bank_id: bank_id.to_string(),
            questions,
            answers: AnswerMap::new(),
            started_at: Utc::now(),
            time_limit_secs,
        }
    }

    /// Record (or replace) the answer to a question.
    ///
    /// Unknown ids are stored anyway and ignored at scoring time; the
    /// mismatch usually means the UI and bank are out of sync, so it is
    /// logged.
    pub fn record_answer(&mut self, question_id: &str, answer: Answer) {
        if !self.questions.iter().any(|q| q.id == question_id) {
            tracing::warn!(question_id, "answer recorded for unknown question id");
        }
        self.answers.insert(question_id.to_string(), answer);
    }

    /// Remove a recorded answer, returning the question to "not attempted".
    pub fn clear_answer(&mut self, question_id: &str) {
        self.answers.remove(question_id);
    }

    /// How many of this session's questions have a recorded answer.
    pub fn answered_count(&self) -> usize {
        self.questions
            .iter()
            .filter(|q| self.answers.contains_key(&q.id))
            .count()
    }

    /// Seconds elapsed since the session started.
    pub fn elapsed_secs(&self) -> u64 {
        (Utc::now() - self.started_at).num_seconds().max(0) as u64
    }

    /// Whether the session has run past its time limit.
    pub fn is_expired(&self) -> bool {
        self.time_limit_secs > 0 && self.elapsed_secs() > self.time_limit_secs
    }

    /// Complete the session, scoring the final answer snapshot.
    ///
    /// Consumes the session: the result is produced exactly once.
    pub fn complete(self) -> TestResult {
        let summary = scoring::calculate_results(&self.questions, &self.answers);
        let completed_at = Utc::now();
        let time_spent_secs = (completed_at - self.started_at).num_seconds().max(0) as u64;

        tracing::info!(
            session_id = %self.id,
            bank_id = %self.bank_id,
            percentage = summary.percentage,
            cefr_level = %summary.cefr_level,
            "session completed"
        );

        TestResult {
            id: Uuid::new_v4(),
            session_id: self.id,
            summary,
            time_spent_secs,
            completed_at,
        }
    }
}
