//! Result record types with JSON persistence.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{CefrLevel, SkillArea};

/// Score accumulated for one skill area.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Points awarded.
    pub score: u32,
    /// Points available.
    pub max_score: u32,
    /// `round(score / max_score * 100)`, or 0 when nothing was available.
    pub percentage: u32,
}

/// The scoring engine's output for one completed sitting.
///
/// Session metadata (ids, timestamps, time spent) is attached by the caller;
/// see [`TestResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultSummary {
    pub total_score: u32,
    pub max_score: u32,
    pub percentage: u32,
    pub cefr_level: CefrLevel,
    /// Per-skill totals. Always contains all five skill areas; skills with
    /// no questions in the sitting report zero throughout.
    pub skill_breakdown: BTreeMap<SkillArea, ScoreBreakdown>,
    pub recommendations: Vec<String>,
}

/// A completed test result. Created exactly once per session and immutable
/// thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    /// Unique result identifier.
    pub id: Uuid,
    /// The session this result was produced from.
    pub session_id: Uuid,
    #[serde(flatten)]
    pub summary: ResultSummary,
    /// Wall-clock seconds between session start and completion.
    pub time_spent_secs: u64,
    /// When the session was completed.
    pub completed_at: DateTime<Utc>,
}

impl TestResult {
    /// Save the result as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize result")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write result to {}", path.display()))?;
        Ok(())
    }

    /// Load a result from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read result from {}", path.display()))?;
        let result: TestResult =
            serde_json::from_str(&content).context("failed to parse result JSON")?;
        Ok(result)
    }
}
