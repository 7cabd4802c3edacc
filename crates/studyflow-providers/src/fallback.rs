//! The deterministic content generator.

use std::collections::BTreeSet;

use async_trait::async_trait;

use studyflow_core::estimate::{
    estimate_homework_minutes, estimate_reading_minutes, round_up_minutes,
    DEFAULT_COMPREHENSION_FACTOR,
};
use studyflow_core::grade::GradeLevel;
use studyflow_core::homework::detect_questions;
use studyflow_core::model::{HomeworkQuestion, MaterialSummary, ReadingChunk, StudyGuide};
use studyflow_core::reading::chunk_reading_for_grade;
use studyflow_core::text::{split_sentences, word_count};
use studyflow_core::traits::ContentGenerator;

const VOCABULARY_MIN_LETTERS: usize = 8;
const VOCABULARY_LIMIT: usize = 8;
const KEY_CONCEPT_LIMIT: usize = 3;
const KEY_CONCEPT_MAX_CHARS: usize = 80;

const GUIDE_STEPS: [&str; 3] = [
    "Read the question carefully",
    "Think about what you know",
    "Write your answer",
];
const GUIDE_HINTS: [&str; 2] = ["Take your time", "Ask for help if needed"];

/// Runs the core engine. Never fails.
#[derive(Debug, Clone)]
pub struct DeterministicFallback {
    comp_factor: f64,
}

impl DeterministicFallback {
    pub fn new(comp_factor: f64) -> Self {
        Self { comp_factor }
    }
}

impl Default for DeterministicFallback {
    fn default() -> Self {
        Self::new(DEFAULT_COMPREHENSION_FACTOR)
    }
}

/// Distinct long words, lowercased, in order of first appearance.
fn vocabulary(text: &str) -> Vec<String> {
    let mut seen = BTreeSet::new();
    text.split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphabetic()).to_lowercase())
        .filter(|w| w.chars().count() >= VOCABULARY_MIN_LETTERS && w.chars().all(char::is_alphabetic))
        .filter(|w| seen.insert(w.clone()))
        .take(VOCABULARY_LIMIT)
        .collect()
}

/// The opening sentence of each of the first few chunks.
fn key_concepts(chunks: &[ReadingChunk]) -> Vec<String> {
    chunks
        .iter()
        .take(KEY_CONCEPT_LIMIT)
        .filter_map(|chunk| split_sentences(&chunk.chunk_text).into_iter().next())
        .map(|sentence| truncate_chars(sentence.body, KEY_CONCEPT_MAX_CHARS))
        .collect()
}

fn truncate_chars(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", s[..idx].trim_end()),
        None => s.to_string(),
    }
}

#[async_trait]
impl ContentGenerator for DeterministicFallback {
    fn name(&self) -> &str {
        "fallback"
    }

    async fn chunk_reading(
        &self,
        text: &str,
        grade: GradeLevel,
    ) -> anyhow::Result<Vec<ReadingChunk>> {
        Ok(chunk_reading_for_grade(text, grade))
    }

    async fn detect_questions(&self, text: &str) -> anyhow::Result<Vec<HomeworkQuestion>> {
        Ok(detect_questions(text))
    }

    async fn summarize(&self, text: &str, grade: GradeLevel) -> anyhow::Result<MaterialSummary> {
        let words = word_count(text);
        let minutes = estimate_reading_minutes(words, grade, self.comp_factor);
        let summary = format!(
            "This material contains {words} words and covers important topics for {} students. \
             Reading it takes about {minutes} minutes.",
            grade.display_name()
        );
        let chunks = chunk_reading_for_grade(text, grade);

        Ok(MaterialSummary {
            summary,
            vocabulary: vocabulary(text),
            key_concepts: key_concepts(&chunks),
        })
    }

    async fn study_guide(
        &self,
        questions: &[HomeworkQuestion],
        grade: GradeLevel,
    ) -> anyhow::Result<StudyGuide> {
        Ok(StudyGuide {
            steps: GUIDE_STEPS.iter().map(|s| s.to_string()).collect(),
            hints: GUIDE_HINTS.iter().map(|s| s.to_string()).collect(),
            estimated_minutes: round_up_minutes(estimate_homework_minutes(questions, grade)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use studyflow_core::model::Difficulty;

    const PASSAGE: &str = "Photosynthesis happens in chloroplasts. Chlorophyll absorbs sunlight! \
Plants release oxygen during photosynthesis.";

    #[tokio::test]
    async fn chunking_matches_core_engine() {
        let fallback = DeterministicFallback::default();
        let chunks = fallback.chunk_reading(PASSAGE, GradeLevel::G3).await.unwrap();
        assert_eq!(chunks, chunk_reading_for_grade(PASSAGE, GradeLevel::G3));
        assert_eq!(chunks.len(), 1);
    }

    #[tokio::test]
    async fn detection_matches_core_engine() {
        let text = "1. What is the capital of France?\n2. Explain why leaves change color.";
        let questions = DeterministicFallback::default().detect_questions(text).await.unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[1].difficulty, Some(Difficulty::Hard));
    }

    #[tokio::test]
    async fn summary_counts_words_and_collects_vocabulary() {
        let summary = DeterministicFallback::default()
            .summarize(PASSAGE, GradeLevel::K)
            .await
            .unwrap();
        assert!(summary.summary.starts_with(
            "This material contains 12 words and covers important topics for Kindergarten students."
        ));
        assert_eq!(
            summary.vocabulary,
            vec!["photosynthesis", "chloroplasts", "chlorophyll", "sunlight"]
        );
        assert_eq!(summary.key_concepts, vec!["Photosynthesis happens in chloroplasts"]);
    }

    #[tokio::test]
    async fn summary_of_empty_text() {
        let summary = DeterministicFallback::default()
            .summarize("", GradeLevel::G9)
            .await
            .unwrap();
        assert!(summary.summary.contains("0 words"));
        assert!(summary.vocabulary.is_empty());
        assert!(summary.key_concepts.is_empty());
    }

    #[tokio::test]
    async fn guide_uses_grade_estimate() {
        let questions = vec![
            HomeworkQuestion {
                index: 1,
                prompt: "Explain the water cycle.".into(),
                difficulty: Some(Difficulty::Hard),
                est_minutes: 3,
            };
            5
        ];
        let guide = DeterministicFallback::default()
            .study_guide(&questions, GradeLevel::G5)
            .await
            .unwrap();
        assert_eq!(guide.steps.len(), 3);
        assert_eq!(guide.hints.len(), 2);
        assert_eq!(guide.estimated_minutes, 24);
    }

    #[test]
    fn long_concepts_are_truncated() {
        let text = format!("{}.", "word ".repeat(40));
        let chunks = chunk_reading_for_grade(&text, GradeLevel::G10);
        let concepts = key_concepts(&chunks);
        assert!(concepts[0].ends_with("..."));
        assert_eq!(concepts[0].chars().count(), KEY_CONCEPT_MAX_CHARS - 1 + 3);
    }
}
