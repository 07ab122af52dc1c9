//! Study recommendation generation.

use std::collections::BTreeMap;

use crate::model::{CefrLevel, SkillArea};
use crate::results::ScoreBreakdown;

/// Skills scoring below this percentage get a study tip.
const SKILL_TIP_THRESHOLD: u32 = 70;

/// Build the ordered recommendation list for a scored sitting: one tip per
/// weak skill (in skill order), then exactly one tip for the computed level.
///
/// Skills with no questions in the sitting are skipped, as is writing, which
/// is not scored yet.
pub fn recommendations(
    skill_breakdown: &BTreeMap<SkillArea, ScoreBreakdown>,
    cefr_level: CefrLevel,
) -> Vec<String> {
    let mut tips = Vec::new();

    for skill in SkillArea::ALL {
        let Some(bucket) = skill_breakdown.get(&skill) else {
            continue;
        };
        if bucket.max_score > 0 && bucket.percentage < SKILL_TIP_THRESHOLD {
            if let Some(tip) = skill_tip(skill) {
                tips.push(tip.to_string());
            }
        }
    }

    tips.push(level_tip(cefr_level).to_string());
    tips
}

fn skill_tip(skill: SkillArea) -> Option<&'static str> {
    match skill {
        SkillArea::Grammar => Some("Focus on grammar fundamentals and sentence structure"),
        SkillArea::Vocabulary => Some("Expand your vocabulary with daily word learning"),
        SkillArea::Reading => Some("Practice reading comprehension with varied texts"),
        SkillArea::Listening => Some("Improve listening skills with native speaker content"),
        // Writing questions are not scored yet.
        SkillArea::Writing => None,
    }
}

fn level_tip(level: CefrLevel) -> &'static str {
    match level {
        CefrLevel::A1 => "Start with basic vocabulary and simple sentence patterns",
        CefrLevel::A2 => "Focus on everyday situations and common expressions",
        CefrLevel::B1 => "Practice expressing opinions and describing experiences",
        CefrLevel::B2 => "Work on complex texts and abstract topics",
        CefrLevel::C1 => "Refine your language for academic and professional contexts",
        CefrLevel::C2 => "Perfect your nuanced understanding and expression",
    }
}
