//! The `studyflow chunk` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use studyflow_core::estimate::{estimate_chunks_minutes, DEFAULT_COMPREHENSION_FACTOR};
use studyflow_core::reading::chunk_text;
use studyflow_core::ReadingChunk;

use super::{parse_grade, print_json, read_input, OutputFormat};

const PREVIEW_CHARS: usize = 60;

pub fn execute(
    input: PathBuf,
    grade: String,
    target_words: Option<usize>,
    format: OutputFormat,
) -> Result<()> {
    let grade = parse_grade(&grade)?;
    let text = read_input(&input)?;
    let target = target_words.unwrap_or_else(|| grade.target_chunk_words());

    let chunks = chunk_text(&text, target);

    match format {
        OutputFormat::Json => print_json(&chunks)?,
        OutputFormat::Table => {
            println!("{}", chunk_table(&chunks));
            let words: usize = chunks.iter().map(|c| c.word_count).sum();
            let minutes = estimate_chunks_minutes(&chunks, grade, DEFAULT_COMPREHENSION_FACTOR);
            println!(
                "{} chunks, {words} words, about {minutes} min for {}",
                chunks.len(),
                grade.display_name()
            );
        }
    }

    Ok(())
}

fn chunk_table(chunks: &[ReadingChunk]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["#", "Words", "Est. min", "Preview"]);

    for (i, chunk) in chunks.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(chunk.word_count),
            Cell::new(chunk.est_minutes),
            Cell::new(preview(&chunk.chunk_text)),
        ]);
    }

    table
}

pub(crate) fn preview(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_CHARS) {
        Some((idx, _)) => format!("{}...", text[..idx].trim_end()),
        None => text.to_string(),
    }
}
