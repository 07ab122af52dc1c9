//! Question selection for a sitting.
//!
//! Filtering and capping only; presentation order (shuffling) belongs to the
//! rendering layer, so selection stays deterministic.

use cefrtest_core::model::{CefrLevel, Question, QuestionBank, SkillArea};

/// Filters applied when drawing questions from a bank.
#[derive(Debug, Clone, Default)]
pub struct SelectionOptions {
    /// Keep only questions at this level.
    pub level: Option<CefrLevel>,
    /// Keep only questions for this skill.
    pub skill_area: Option<SkillArea>,
    /// Cap the number of questions, in bank order.
    pub count: Option<usize>,
}

/// Select questions from a bank according to the options.
pub fn select_questions(bank: &QuestionBank, options: &SelectionOptions) -> Vec<Question> {
    let mut selected: Vec<Question> = bank
        .questions
        .iter()
        .filter(|q| options.level.is_none_or(|level| q.level == level))
        .filter(|q| options.skill_area.is_none_or(|skill| q.skill_area == skill))
        .cloned()
        .collect();

    if let Some(count) = options.count {
        selected.truncate(count);
    }

    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use cefrtest_core::model::QuestionKind;

    fn bank() -> QuestionBank {
        let question = |id: &str, level: CefrLevel, skill: SkillArea| Question {
            id: id.into(),
            level,
            skill_area: skill,
            points: 5,
            kind: QuestionKind::MultipleChoice {
                prompt: "Pick one".into(),
                options: vec!["a".into(), "b".into()],
                correct_answer: 0,
                explanation: None,
            },
        };
        QuestionBank {
            id: "sel".into(),
            name: "Selection".into(),
            description: String::new(),
            time_limit_secs: 1800,
            questions: vec![
                question("q1", CefrLevel::A1, SkillArea::Grammar),
                question("q2", CefrLevel::B1, SkillArea::Grammar),
                question("q3", CefrLevel::B1, SkillArea::Reading),
                question("q4", CefrLevel::C1, SkillArea::Vocabulary),
            ],
        }
    }

    #[test]
    fn no_options_selects_everything_in_order() {
        let selected = select_questions(&bank(), &SelectionOptions::default());
        let ids: Vec<&str> = selected.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["q1", "q2", "q3", "q4"]);
    }

    #[test]
    fn filter_by_level() {
        let options = SelectionOptions {
            level: Some(CefrLevel::B1),
            ..Default::default()
        };
        let selected = select_questions(&bank(), &options);
        assert_eq!(selected.len(), 2);
        assert!(selected.iter().all(|q| q.level == CefrLevel::B1));
    }

    #[test]
    fn filter_by_skill_and_cap() {
        let options = SelectionOptions {
            skill_area: Some(SkillArea::Grammar),
            count: Some(1),
            ..Default::default()
        };
        let selected = select_questions(&bank(), &options);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].id, "q1");
    }

    #[test]
    fn selection_is_deterministic() {
        let options = SelectionOptions {
            count: Some(3),
            ..Default::default()
        };
        let first = select_questions(&bank(), &options);
        let second = select_questions(&bank(), &options);
        let ids = |qs: &[Question]| qs.iter().map(|q| q.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(&first), ids(&second));
    }
}
