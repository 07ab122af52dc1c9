//! The `cefrtest init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create cefrtest.toml
    if std::path::Path::new("cefrtest.toml").exists() {
        println!("cefrtest.toml already exists, skipping.");
    } else {
        std::fs::write("cefrtest.toml", SAMPLE_CONFIG)?;
        println!("Created cefrtest.toml");
    }

    // Create example bank
    std::fs::create_dir_all("banks")?;
    let example_path = std::path::Path::new("banks/starter.toml");
    if example_path.exists() {
        println!("banks/starter.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_BANK)?;
        println!("Created banks/starter.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit banks/starter.toml or add your own banks");
    println!("  2. Run: cefrtest validate --bank banks/starter.toml");
    println!("  3. Run: cefrtest score --bank banks/starter.toml --answers answers.json");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# cefrtest configuration

bank_dir = "./banks"
default_bank = "starter"
question_count = 20
output_dir = "./cefrtest-results"
"#;

const EXAMPLE_BANK: &str = r#"[bank]
id = "starter"
name = "Starter Assessment"
description = "A small mixed bank to get started"
time_limit_secs = 900

[[questions]]
id = "mc-1"
type = "multiple-choice"
level = "A1"
skill_area = "grammar"
points = 5
prompt = "What _____ your name?"
options = ["is", "are", "am", "be"]
correct_answer = 0
explanation = "We use 'is' with singular subjects like 'your name'."

[[questions]]
id = "mc-2"
type = "multiple-choice"
level = "B1"
skill_area = "grammar"
points = 5
prompt = "If I _____ you, I would study harder."
options = ["am", "was", "were", "be"]
correct_answer = 2

[[questions]]
id = "fb-1"
type = "fill-blank"
level = "A2"
skill_area = "grammar"
points = 9
passage = "Yesterday I _____ to the store and _____ some groceries. It _____ a beautiful day."

[[questions.blanks]]
position = 12
correct_answers = ["went", "walked", "drove"]

[[questions.blanks]]
position = 35
correct_answers = ["bought", "purchased", "got"]

[[questions.blanks]]
position = 58
correct_answers = ["was"]

[[questions]]
id = "vm-1"
type = "vocabulary-match"
level = "C1"
skill_area = "vocabulary"
points = 10
words = ["Eloquent", "Meticulous", "Pragmatic"]
definitions = [
    "Dealing with things sensibly and realistically",
    "Fluent and persuasive in speaking or writing",
    "Showing great attention to detail",
]
correct_matches = [1, 2, 0]
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn example_bank_parses_clean() {
        let bank =
            cefrtest_core::parser::parse_bank_str(EXAMPLE_BANK, &PathBuf::from("starter.toml"))
                .unwrap();
        assert_eq!(bank.id, "starter");
        assert!(cefrtest_core::parser::validate_bank(&bank).is_empty());
    }

    #[test]
    fn sample_config_parses() {
        let config: cefrtest_bank::CefrtestConfig = toml::from_str(SAMPLE_CONFIG).unwrap();
        assert_eq!(config.default_bank, "starter");
    }
}
