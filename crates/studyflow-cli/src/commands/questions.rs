//! The `studyflow questions` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use studyflow_core::estimate::{difficulty_multiplier, estimate_homework_minutes, round_up_minutes};
use studyflow_core::homework::detect_questions;

use super::chunk::preview;
use super::{parse_grade, print_json, read_input, OutputFormat};

pub fn execute(input: PathBuf, grade: String, format: OutputFormat) -> Result<()> {
    let grade = parse_grade(&grade)?;
    let text = read_input(&input)?;

    let questions = detect_questions(&text);

    match format {
        OutputFormat::Json => print_json(&questions)?,
        OutputFormat::Table => {
            if questions.is_empty() {
                println!("No questions found.");
                return Ok(());
            }

            let base = grade.base_minutes_per_question() as f64;
            let mut table = Table::new();
            table.set_header(vec!["#", "Difficulty", "Est. min", "Prompt"]);
            for q in &questions {
                let difficulty = q
                    .difficulty
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "-".to_string());
                table.add_row(vec![
                    Cell::new(q.index),
                    Cell::new(difficulty),
                    Cell::new(format!("{:.1}", base * difficulty_multiplier(q.difficulty))),
                    Cell::new(preview(&q.prompt)),
                ]);
            }
            println!("{table}");

            let minutes = round_up_minutes(estimate_homework_minutes(&questions, grade));
            println!(
                "{} questions, about {minutes} min for {}",
                questions.len(),
                grade.display_name()
            );
        }
    }

    Ok(())
}
