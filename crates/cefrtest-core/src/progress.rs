//! Progress comparison between two test attempts.

use serde::{Deserialize, Serialize};

use crate::model::{CefrLevel, SkillArea};
use crate::results::TestResult;

/// How the overall CEFR level moved between two attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LevelChange {
    Advanced,
    Unchanged,
    Dropped,
}

/// Direction of a per-skill percentage change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improved,
    Unchanged,
    Declined,
}

/// Percentage movement for one skill between two attempts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillProgress {
    pub skill: SkillArea,
    pub baseline_percentage: u32,
    pub current_percentage: u32,
    /// `current - baseline`, in percentage points.
    pub delta: i64,
    pub trend: Trend,
}

/// Result of comparing a current attempt against an earlier baseline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressReport {
    pub baseline_percentage: u32,
    pub current_percentage: u32,
    pub delta: i64,
    pub baseline_level: CefrLevel,
    pub current_level: CefrLevel,
    pub level_change: LevelChange,
    /// Skills scored in at least one of the two attempts.
    pub skills: Vec<SkillProgress>,
}

impl ProgressReport {
    /// Compare two attempts. `threshold` is the number of percentage points
    /// a skill must move before it counts as improved or declined.
    pub fn between(baseline: &TestResult, current: &TestResult, threshold: u32) -> Self {
        let mut skills = Vec::new();

        for skill in SkillArea::ALL {
            let base = baseline.summary.skill_breakdown.get(&skill).copied();
            let curr = current.summary.skill_breakdown.get(&skill).copied();

            // Skills with no questions in either attempt are not comparable.
            let scored = base.is_some_and(|b| b.max_score > 0)
                || curr.is_some_and(|c| c.max_score > 0);
            if !scored {
                continue;
            }

            let baseline_percentage = base.map(|b| b.percentage).unwrap_or(0);
            let current_percentage = curr.map(|c| c.percentage).unwrap_or(0);
            let delta = i64::from(current_percentage) - i64::from(baseline_percentage);

            let trend = if delta > i64::from(threshold) {
                Trend::Improved
            } else if delta < -i64::from(threshold) {
                Trend::Declined
            } else {
                Trend::Unchanged
            };

            skills.push(SkillProgress {
                skill,
                baseline_percentage,
                current_percentage,
                delta,
                trend,
            });
        }

        let level_change = match current.summary.cefr_level.cmp(&baseline.summary.cefr_level) {
            std::cmp::Ordering::Greater => LevelChange::Advanced,
            std::cmp::Ordering::Equal => LevelChange::Unchanged,
            std::cmp::Ordering::Less => LevelChange::Dropped,
        };

        ProgressReport {
            baseline_percentage: baseline.summary.percentage,
            current_percentage: current.summary.percentage,
            delta: i64::from(current.summary.percentage) - i64::from(baseline.summary.percentage),
            baseline_level: baseline.summary.cefr_level,
            current_level: current.summary.cefr_level,
            level_change,
            skills,
        }
    }

    /// Returns true if any compared skill declined.
    pub fn has_declines(&self) -> bool {
        self.skills.iter().any(|s| s.trend == Trend::Declined)
    }

    /// Format the progress report as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!(
            "**Overall:** {}% -> {}% ({:+} pts), {} -> {}\n\n",
            self.baseline_percentage,
            self.current_percentage,
            self.delta,
            self.baseline_level,
            self.current_level,
        ));

        if !self.skills.is_empty() {
            md.push_str("| Skill | Baseline | Current | Delta |\n");
            md.push_str("|-------|----------|---------|-------|\n");
            for s in &self.skills {
                md.push_str(&format!(
                    "| {} | {}% | {}% | {:+} |\n",
                    s.skill, s.baseline_percentage, s.current_percentage, s.delta
                ));
            }
        }

        md
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::{ResultSummary, ScoreBreakdown, TestResult};
    use chrono::Utc;
    use std::collections::BTreeMap;
    use uuid::Uuid;

    fn result_with(percentage: u32, level: CefrLevel, skills: &[(SkillArea, u32, u32)]) -> TestResult {
        let mut skill_breakdown: BTreeMap<SkillArea, ScoreBreakdown> = SkillArea::ALL
            .iter()
            .map(|s| (*s, ScoreBreakdown::default()))
            .collect();
        for (skill, max_score, pct) in skills {
            skill_breakdown.insert(
                *skill,
                ScoreBreakdown {
                    score: max_score * pct / 100,
                    max_score: *max_score,
                    percentage: *pct,
                },
            );
        }
        TestResult {
            id: Uuid::new_v4(),
            session_id: Uuid::new_v4(),
            summary: ResultSummary {
                total_score: percentage,
                max_score: 100,
                percentage,
                cefr_level: level,
                skill_breakdown,
                recommendations: vec![],
            },
            time_spent_secs: 0,
            completed_at: Utc::now(),
        }
    }

    #[test]
    fn detects_improvement_and_level_advance() {
        let baseline = result_with(45, CefrLevel::A2, &[(SkillArea::Grammar, 20, 45)]);
        let current = result_with(70, CefrLevel::B2, &[(SkillArea::Grammar, 20, 70)]);

        let report = ProgressReport::between(&baseline, &current, 5);
        assert_eq!(report.delta, 25);
        assert_eq!(report.level_change, LevelChange::Advanced);
        assert_eq!(report.skills.len(), 1);
        assert_eq!(report.skills[0].trend, Trend::Improved);
    }

    #[test]
    fn within_threshold_is_unchanged() {
        let baseline = result_with(50, CefrLevel::A2, &[(SkillArea::Reading, 10, 50)]);
        let current = result_with(53, CefrLevel::B1, &[(SkillArea::Reading, 10, 53)]);

        let report = ProgressReport::between(&baseline, &current, 5);
        assert_eq!(report.skills[0].trend, Trend::Unchanged);
        assert!(!report.has_declines());
    }

    #[test]
    fn decline_is_symmetric_with_improvement() {
        let baseline = result_with(80, CefrLevel::B2, &[(SkillArea::Listening, 10, 80)]);
        let current = result_with(60, CefrLevel::B1, &[(SkillArea::Listening, 10, 60)]);

        let report = ProgressReport::between(&baseline, &current, 5);
        assert_eq!(report.level_change, LevelChange::Dropped);
        assert_eq!(report.skills[0].trend, Trend::Declined);
        assert!(report.has_declines());
    }

    #[test]
    fn unscored_skills_are_excluded() {
        let baseline = result_with(50, CefrLevel::A2, &[(SkillArea::Grammar, 10, 50)]);
        let current = result_with(50, CefrLevel::A2, &[(SkillArea::Grammar, 10, 50)]);

        let report = ProgressReport::between(&baseline, &current, 5);
        assert_eq!(report.skills.len(), 1);
        assert_eq!(report.skills[0].skill, SkillArea::Grammar);
    }

    #[test]
    fn skill_scored_in_only_one_attempt_is_compared() {
        let baseline = result_with(50, CefrLevel::A2, &[(SkillArea::Grammar, 10, 50)]);
        let current = result_with(
            50,
            CefrLevel::A2,
            &[(SkillArea::Grammar, 10, 40), (SkillArea::Reading, 10, 60)],
        );

        let report = ProgressReport::between(&baseline, &current, 5);
        let reading = report.skills.iter().find(|s| s.skill == SkillArea::Reading);
        assert!(reading.is_some());
        assert_eq!(reading.unwrap().baseline_percentage, 0);
    }

    #[test]
    fn markdown_output() {
        let baseline = result_with(45, CefrLevel::A2, &[(SkillArea::Grammar, 20, 45)]);
        let current = result_with(70, CefrLevel::B2, &[(SkillArea::Grammar, 20, 70)]);

        let md = ProgressReport::between(&baseline, &current, 5).to_markdown();
        assert!(md.contains("A2 -> B2"));
        assert!(md.contains("| grammar | 45% | 70% | +25 |"));
    }
}
