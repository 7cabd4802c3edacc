pub mod chunk;
pub mod generate;
pub mod grades;
pub mod init;
pub mod progress;
pub mod questions;

use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;

use studyflow_core::GradeLevel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

pub fn parse_grade(grade: &str) -> Result<GradeLevel> {
    grade
        .parse::<GradeLevel>()
        .context("expected K or G1..G12")
}

pub fn read_input(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("failed to read input: {}", path.display()))
}

pub fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
