//! The `cefrtest list` command.

use anyhow::Result;

use cefrtest_bank::create_source;

pub fn execute(bank_spec: String, bank_id: Option<String>) -> Result<()> {
    let source = create_source(&bank_spec)?;

    if let Some(id) = bank_id {
        let bank = source.load(&id)?;
        print_questions(&bank);
        return Ok(());
    }

    let infos = source.list();
    if infos.is_empty() {
        println!("No banks found at '{bank_spec}'. Run `cefrtest init` to create one.");
        return Ok(());
    }

    for info in &infos {
        let levels: Vec<String> = info.levels.iter().map(|l| l.to_string()).collect();
        println!(
            "{} — {} ({} questions, levels {})",
            info.id,
            info.name,
            info.question_count,
            levels.join("/"),
        );
    }

    Ok(())
}

fn print_questions(bank: &cefrtest_core::model::QuestionBank) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["ID", "Type", "Level", "Skill", "Points"]);

    for question in &bank.questions {
        table.add_row(vec![
            Cell::new(&question.id),
            Cell::new(question.type_name()),
            Cell::new(question.level),
            Cell::new(question.skill_area),
            Cell::new(question.points),
        ]);
    }

    println!("Bank: {} ({} questions)", bank.name, bank.questions.len());
    println!("{table}");
}
