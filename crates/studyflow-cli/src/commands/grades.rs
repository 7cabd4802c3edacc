//! The `studyflow grades` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use studyflow_core::GradeLevel;

pub fn execute() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec![
        "Grade",
        "Name",
        "Words/min",
        "Min/question",
        "Chunk words",
    ]);

    for grade in GradeLevel::ALL {
        table.add_row(vec![
            Cell::new(grade),
            Cell::new(grade.display_name()),
            Cell::new(grade.words_per_minute()),
            Cell::new(grade.base_minutes_per_question()),
            Cell::new(grade.target_chunk_words()),
        ]);
    }

    println!("{table}");
    Ok(())
}
