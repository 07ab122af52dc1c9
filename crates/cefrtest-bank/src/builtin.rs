//! The embedded starter bank.
//!
//! A small, deterministic bank covering all five question types, used by
//! `cefrtest init`, the test suite, and anyone who wants to try the tool
//! without authoring content first.

use cefrtest_core::error::BankError;
use cefrtest_core::model::{
    Blank, CefrLevel, Passage, Question, QuestionBank, QuestionKind, SkillArea, SubQuestion,
};

use crate::{BankInfo, QuestionSource};

/// Id of the embedded bank.
pub const BUILTIN_BANK_ID: &str = "starter";

/// Source backed by content compiled into the binary.
pub struct BuiltinSource;

impl QuestionSource for BuiltinSource {
    fn name(&self) -> &str {
        "builtin"
    }

    fn list(&self) -> Vec<BankInfo> {
        vec![BankInfo::of(&starter_bank())]
    }

    fn load(&self, bank_id: &str) -> Result<QuestionBank, BankError> {
        if bank_id == BUILTIN_BANK_ID {
            Ok(starter_bank())
        } else {
            Err(BankError::NotFound {
                id: bank_id.to_string(),
            })
        }
    }
}

/// Build the starter bank.
pub fn starter_bank() -> QuestionBank {
    QuestionBank {
        id: BUILTIN_BANK_ID.into(),
        name: "English Starter Assessment".into(),
        description: "A short mixed assessment covering all question types".into(),
        time_limit_secs: 1800,
        questions: vec![
            Question {
                id: "mc-1".into(),
                level: CefrLevel::A1,
                skill_area: SkillArea::Grammar,
                points: 5,
                kind: QuestionKind::MultipleChoice {
                    prompt: "What _____ your name?".into(),
                    options: vec!["is".into(), "are".into(), "am".into(), "be".into()],
                    correct_answer: 0,
                    explanation: Some(
                        "We use 'is' with singular subjects like 'your name'.".into(),
                    ),
                },
            },
            Question {
                id: "mc-2".into(),
                level: CefrLevel::B1,
                skill_area: SkillArea::Grammar,
                points: 5,
                kind: QuestionKind::MultipleChoice {
                    prompt: "If I _____ you, I would study harder.".into(),
                    options: vec!["am".into(), "was".into(), "were".into(), "be".into()],
                    correct_answer: 2,
                    explanation: Some(
                        "In second conditional, we use 'were' for all persons after 'if'.".into(),
                    ),
                },
            },
            Question {
                id: "fb-1".into(),
                level: CefrLevel::A2,
                skill_area: SkillArea::Grammar,
                points: 10,
                kind: QuestionKind::FillBlank {
                    passage: "Yesterday I _____ to the store and _____ some groceries. \
                              It _____ a beautiful day."
                        .into(),
                    blanks: vec![
                        Blank {
                            position: 12,
                            correct_answers: vec![
                                "went".into(),
                                "walked".into(),
                                "drove".into(),
                            ],
                            options: None,
                        },
                        Blank {
                            position: 35,
                            correct_answers: vec![
                                "bought".into(),
                                "purchased".into(),
                                "got".into(),
                            ],
                            options: None,
                        },
                        Blank {
                            position: 58,
                            correct_answers: vec!["was".into()],
                            options: None,
                        },
                    ],
                },
            },
            Question {
                id: "rc-1".into(),
                level: CefrLevel::B2,
                skill_area: SkillArea::Reading,
                points: 15,
                kind: QuestionKind::ReadingComprehension {
                    passage: Passage {
                        title: "The Future of Remote Work".into(),
                        content: "What started as an emergency measure has evolved into a \
                                  permanent shift for many companies. Remote work, once \
                                  considered a luxury, has become the norm for millions of \
                                  employees worldwide. Studies show that remote workers are \
                                  often more productive than their office-based counterparts, \
                                  but many report feeling isolated and struggle with \
                                  work-life balance when their home becomes their office."
                            .into(),
                        word_count: 63,
                    },
                    questions: vec![
                        SubQuestion {
                            id: "rc-1-q1".into(),
                            prompt: "What was the original reason for the shift to remote work?"
                                .into(),
                            options: vec![
                                "Companies wanted to save money on office space".into(),
                                "It was an emergency measure".into(),
                                "Employees demanded more flexibility".into(),
                                "Technology made it more feasible".into(),
                            ],
                            correct_answer: 1,
                        },
                        SubQuestion {
                            id: "rc-1-q2".into(),
                            prompt: "What challenge of remote work is mentioned?".into(),
                            options: vec![
                                "Decreased productivity".into(),
                                "Higher costs for companies".into(),
                                "Difficulty with work-life balance".into(),
                                "Lack of available technology".into(),
                            ],
                            correct_answer: 2,
                        },
                    ],
                },
            },
            Question {
                id: "lc-1".into(),
                level: CefrLevel::B1,
                skill_area: SkillArea::Listening,
                points: 12,
                kind: QuestionKind::ListeningComprehension {
                    audio_url: "/audio/conversation-restaurant.mp3".into(),
                    transcript: "A: Good evening, do you have a reservation? B: Yes, we have \
                                 a table for two under the name Johnson. A: Perfect, right \
                                 this way please. B: Could we see the menu? A: Of course. Our \
                                 special today is grilled salmon with vegetables."
                        .into(),
                    duration_secs: 45,
                    questions: vec![
                        SubQuestion {
                            id: "lc-1-q1".into(),
                            prompt: "How many people is the reservation for?".into(),
                            options: vec![
                                "One".into(),
                                "Two".into(),
                                "Three".into(),
                                "Four".into(),
                            ],
                            correct_answer: 1,
                        },
                        SubQuestion {
                            id: "lc-1-q2".into(),
                            prompt: "What is the special dish today?".into(),
                            options: vec![
                                "Grilled chicken".into(),
                                "Grilled salmon".into(),
                                "Beef steak".into(),
                                "Vegetarian pasta".into(),
                            ],
                            correct_answer: 1,
                        },
                    ],
                },
            },
            Question {
                id: "vm-1".into(),
                level: CefrLevel::C1,
                skill_area: SkillArea::Vocabulary,
                points: 10,
                kind: QuestionKind::VocabularyMatch {
                    words: vec![
                        "Eloquent".into(),
                        "Meticulous".into(),
                        "Pragmatic".into(),
                        "Resilient".into(),
                        "Versatile".into(),
                    ],
                    definitions: vec![
                        "Able to adapt to many different functions or activities".into(),
                        "Showing great attention to detail".into(),
                        "Dealing with things sensibly and realistically".into(),
                        "Able to recover quickly from difficulties".into(),
                        "Fluent and persuasive in speaking or writing".into(),
                    ],
                    correct_matches: vec![4, 1, 2, 3, 0],
                },
            },
        ],
    }
}
