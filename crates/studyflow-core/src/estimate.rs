//! Grade-calibrated time estimation for whole tasks.
//!
//! The reading rule here is separate from the flat 150 wpm rule that the
//! segmenter stamps on individual chunks; task-level totals always come from
//! this module.

use serde::{Deserialize, Serialize};

use crate::grade::GradeLevel;
use crate::model::{Breakdown, Difficulty, HomeworkQuestion, ReadingChunk, TaskKind};

/// Comprehension overhead applied on top of raw reading time.
pub const DEFAULT_COMPREHENSION_FACTOR: f64 = 1.15;

/// Minutes to read `word_count` words at the grade's reading speed.
pub fn estimate_reading_minutes(word_count: usize, grade: GradeLevel, comp_factor: f64) -> u32 {
    let wpm = grade.words_per_minute() as f64;
    ((word_count as f64 / wpm) * comp_factor).ceil() as u32
}

/// Reading estimate for a whole chunk sequence, from its total word count.
pub fn estimate_chunks_minutes(chunks: &[ReadingChunk], grade: GradeLevel, comp_factor: f64) -> u32 {
    let words = chunks.iter().map(|c| c.word_count).sum();
    estimate_reading_minutes(words, grade, comp_factor)
}

/// Scale applied to the grade's base minutes per question.
pub fn difficulty_multiplier(difficulty: Option<Difficulty>) -> f64 {
    match difficulty {
        Some(Difficulty::Easy) => 1.0,
        Some(Difficulty::Medium) => 1.3,
        Some(Difficulty::Hard) => 1.6,
        // Unclassified questions count as medium-hard.
        None => 1.2,
    }
}

/// Total homework minutes. Not rounded; display rounding is up to the caller.
pub fn estimate_homework_minutes(questions: &[HomeworkQuestion], grade: GradeLevel) -> f64 {
    let base = grade.base_minutes_per_question() as f64;
    questions
        .iter()
        .map(|q| base * difficulty_multiplier(q.difficulty))
        .sum()
}

/// Round a fractional minute total up to whole minutes.
///
/// Float noise such as `24.000000000000004` is trimmed first so it does not
/// cost an extra minute.
pub fn round_up_minutes(minutes: f64) -> u32 {
    ((minutes * 1e6).round() / 1e6).ceil().max(0.0) as u32
}

/// Task-level summary of a breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskEstimate {
    pub kind: TaskKind,
    pub grade: GradeLevel,
    /// Number of chunks or questions.
    pub units: usize,
    /// Whole minutes, rounded up.
    pub minutes: u32,
}

impl TaskEstimate {
    pub fn for_breakdown(breakdown: &Breakdown, grade: GradeLevel, comp_factor: f64) -> Self {
        let minutes = match breakdown {
            Breakdown::Reading { chunks } => estimate_chunks_minutes(chunks, grade, comp_factor),
            Breakdown::Homework { questions } => {
                round_up_minutes(estimate_homework_minutes(questions, grade))
            }
        };

        Self {
            kind: breakdown.kind(),
            grade,
            units: breakdown.len(),
            minutes,
        }
    }
}
