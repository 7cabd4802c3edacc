//! Core data model types for studyflow.
//!
//! These are the shapes that flow from the segmenter and detector into a
//! task's stored breakdown, and from there into the student-facing views.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::StudyflowError;
use crate::text::word_count;

/// Flat reading speed behind the rough per-chunk estimate.
pub const CHUNK_ESTIMATE_WPM: usize = 150;

/// Minutes assigned to every detected homework question.
pub const DEFAULT_QUESTION_MINUTES: u32 = 3;

/// A contiguous span of reading text sized for one sitting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingChunk {
    /// Optional section heading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
    /// The text to read.
    pub chunk_text: String,
    /// Rough reading time, `ceil(word_count / 150)`.
    pub est_minutes: u32,
    /// Whitespace-delimited tokens in `chunk_text`.
    pub word_count: usize,
}

impl ReadingChunk {
    /// Build a chunk, deriving the word count and estimate from the text.
    pub fn new(heading: Option<String>, chunk_text: impl Into<String>) -> Self {
        let chunk_text = chunk_text.into();
        let word_count = word_count(&chunk_text);
        Self {
            heading,
            chunk_text,
            est_minutes: chunk_minutes(word_count),
            word_count,
        }
    }
}

/// Per-chunk estimate at a flat 150 words per minute.
pub fn chunk_minutes(word_count: usize) -> u32 {
    word_count.div_ceil(CHUNK_ESTIMATE_WPM) as u32
}

/// Homework question difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

/// A single homework question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeworkQuestion {
    /// 1-based number as printed in (or assigned to) the source.
    pub index: u32,
    /// The question text.
    pub prompt: String,
    /// Estimated difficulty; unset means "medium-hard" in time math.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    /// Minutes budgeted for this question.
    pub est_minutes: u32,
}

/// Reading or homework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    Reading,
    Homework,
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskKind::Reading => write!(f, "reading"),
            TaskKind::Homework => write!(f, "homework"),
        }
    }
}

impl FromStr for TaskKind {
    type Err = StudyflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "reading" => Ok(TaskKind::Reading),
            "homework" => Ok(TaskKind::Homework),
            other => Err(StudyflowError::UnknownTaskKind(other.to_string())),
        }
    }
}

/// The generated decomposition attached to a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Breakdown {
    Reading { chunks: Vec<ReadingChunk> },
    Homework { questions: Vec<HomeworkQuestion> },
}

impl Breakdown {
    /// Parse a stored breakdown payload.
    ///
    /// Returns `None` for malformed JSON or a breakdown with no units; stored
    /// breakdowns are not guaranteed to be well formed.
    pub fn parse_lenient(json: &str) -> Option<Breakdown> {
        match serde_json::from_str::<Breakdown>(json) {
            Ok(b) if !b.is_empty() => Some(b),
            Ok(_) => None,
            Err(e) => {
                tracing::debug!(error = %e, "ignoring malformed breakdown");
                None
            }
        }
    }

    pub fn kind(&self) -> TaskKind {
        match self {
            Breakdown::Reading { .. } => TaskKind::Reading,
            Breakdown::Homework { .. } => TaskKind::Homework,
        }
    }

    /// Number of chunks or questions.
    pub fn len(&self) -> usize {
        match self {
            Breakdown::Reading { chunks } => chunks.len(),
            Breakdown::Homework { questions } => questions.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Chunks from a breakdown, or a single placeholder chunk when there are none.
pub fn reading_chunks_or_placeholder(breakdown: Option<&Breakdown>) -> Vec<ReadingChunk> {
    match breakdown {
        Some(Breakdown::Reading { chunks }) if !chunks.is_empty() => chunks.clone(),
        _ => vec![ReadingChunk {
            heading: None,
            chunk_text: "This is a sample reading chunk. The full text appears once the \
                         material has been processed."
                .to_string(),
            est_minutes: 3,
            word_count: 16,
        }],
    }
}

/// Questions from a breakdown, or a short generic set when there are none.
pub fn homework_questions_or_placeholder(breakdown: Option<&Breakdown>) -> Vec<HomeworkQuestion> {
    match breakdown {
        Some(Breakdown::Homework { questions }) if !questions.is_empty() => questions.clone(),
        _ => vec![
            HomeworkQuestion {
                index: 1,
                prompt: "What is the main idea of this passage?".to_string(),
                difficulty: Some(Difficulty::Medium),
                est_minutes: 5,
            },
            HomeworkQuestion {
                index: 2,
                prompt: "Explain the relationship between the two concepts discussed."
                    .to_string(),
                difficulty: Some(Difficulty::Hard),
                est_minutes: 8,
            },
            HomeworkQuestion {
                index: 3,
                prompt: "List three key points from the reading.".to_string(),
                difficulty: Some(Difficulty::Easy),
                est_minutes: 3,
            },
        ],
    }
}

/// A short overview of a material for a given grade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialSummary {
    pub summary: String,
    #[serde(default)]
    pub vocabulary: Vec<String>,
    #[serde(default)]
    pub key_concepts: Vec<String>,
}

/// Study steps and hints for a homework set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyGuide {
    pub steps: Vec<String>,
    #[serde(default)]
    pub hints: Vec<String>,
    pub estimated_minutes: u32,
}
