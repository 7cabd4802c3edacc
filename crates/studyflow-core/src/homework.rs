//! Homework question detection and difficulty classification.
//!
//! Detection first looks for numbered questions (`1. ...`, `1) ...`,
//! `Question 1: ...`). Only when none of those patterns produce a usable
//! question does it fall back to scanning sentences for question marks and
//! question words.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::model::{Difficulty, HomeworkQuestion, DEFAULT_QUESTION_MINUTES};
use crate::text::split_sentences;

/// Prompts shorter than this many characters are treated as noise.
pub const MIN_PROMPT_CHARS: usize = 10;

/// Numbered-question headers, applied in this order.
static QUESTION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?m)^[ \t]*(\d{1,4})(\.)[ \t]*",
        r"(?m)^[ \t]*(\d{1,4})(\))[ \t]*",
        r"(?i)\bquestion[ \t]*(\d{1,4})[ \t]*([:.])[ \t]*",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("question pattern is valid"))
    .collect()
});

static BLANK_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r?\n[ \t]*\r?\n").expect("blank line pattern is valid"));

const QUESTION_MARKERS: [&str; 5] = ["what", "how", "why", "explain", "describe"];

/// A question header found in the text.
#[derive(Debug, Clone, Copy)]
struct Header {
    start: usize,
    end: usize,
    index: u32,
}

/// Detect homework questions in raw text.
///
/// Numbered questions keep their printed index. When several patterns claim
/// the same index, the first pattern's match wins and the survivors are
/// returned in document order. The sentence fallback numbers its questions
/// 1, 2, 3... by position. Text with no questions yields an empty list.
pub fn detect_questions(text: &str) -> Vec<HomeworkQuestion> {
    let questions = detect_numbered(text);
    if !questions.is_empty() {
        tracing::debug!(count = questions.len(), "detected numbered questions");
        return questions;
    }

    let questions = detect_question_sentences(text);
    tracing::debug!(count = questions.len(), "detected question sentences");
    questions
}

fn find_headers(text: &str, pattern: &Regex) -> Vec<Header> {
    pattern
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let punct = caps.get(2)?;
            // "3.14 is pi" is a decimal, not question 3.
            if text[punct.end()..].starts_with(|c: char| c.is_ascii_digit()) {
                return None;
            }
            let index = caps.get(1)?.as_str().parse().ok()?;
            Some(Header {
                start: whole.start(),
                end: whole.end(),
                index,
            })
        })
        .collect()
}

fn detect_numbered(text: &str) -> Vec<HomeworkQuestion> {
    let per_pattern: Vec<Vec<Header>> = QUESTION_PATTERNS
        .iter()
        .map(|p| find_headers(text, p))
        .collect();

    let mut starts: Vec<usize> = per_pattern.iter().flatten().map(|h| h.start).collect();
    starts.sort_unstable();

    let mut seen = HashSet::new();
    let mut found: Vec<(usize, HomeworkQuestion)> = Vec::new();

    for header in per_pattern.iter().flatten() {
        let next_header = starts
            .iter()
            .copied()
            .find(|&s| s >= header.end)
            .unwrap_or(text.len());
        let blank_line = BLANK_LINE
            .find_at(text, header.end)
            .map(|m| m.start())
            .unwrap_or(text.len());
        let end = next_header.min(blank_line);

        let prompt = normalize_whitespace(&text[header.end..end]);
        if prompt.chars().count() < MIN_PROMPT_CHARS {
            continue;
        }
        if !seen.insert(header.index) {
            tracing::debug!(index = header.index, "dropping duplicate question match");
            continue;
        }

        found.push((
            header.start,
            HomeworkQuestion {
                index: header.index,
                difficulty: Some(estimate_difficulty(&prompt)),
                prompt,
                est_minutes: DEFAULT_QUESTION_MINUTES,
            },
        ));
    }

    found.sort_by_key(|(start, _)| *start);
    found.into_iter().map(|(_, q)| q).collect()
}

fn detect_question_sentences(text: &str) -> Vec<HomeworkQuestion> {
    split_sentences(text)
        .into_iter()
        .filter(|s| s.is_question() || has_question_marker(s.body))
        .enumerate()
        .map(|(i, s)| {
            let prompt = normalize_whitespace(&format!("{}{}", s.body, s.terminator));
            HomeworkQuestion {
                index: i as u32 + 1,
                difficulty: Some(estimate_difficulty(&prompt)),
                prompt,
                est_minutes: DEFAULT_QUESTION_MINUTES,
            }
        })
        .collect()
}

fn has_question_marker(sentence: &str) -> bool {
    let lower = sentence.to_lowercase();
    QUESTION_MARKERS.iter().any(|m| lower.contains(m))
}

fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Classify a prompt by keyword. Hard markers are checked before easy ones.
pub fn estimate_difficulty(prompt: &str) -> Difficulty {
    let lower = prompt.to_lowercase();
    let has_any = |markers: &[&str]| markers.iter().any(|m| lower.contains(m));

    if has_any(&["explain", "analyze", "compare"]) {
        Difficulty::Hard
    } else if has_any(&["what is", "define", "list"]) {
        Difficulty::Easy
    } else {
        Difficulty::Medium
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbered_with_periods() {
        let text = "1. What is photosynthesis?\n2. Explain how plants make food.\n3. Name the parts of a leaf.";
        let qs = detect_questions(text);
        assert_eq!(qs.len(), 3);
        assert_eq!(qs[0].index, 1);
        assert_eq!(qs[0].prompt, "What is photosynthesis?");
        assert_eq!(qs[0].difficulty, Some(Difficulty::Easy));
        assert_eq!(qs[1].difficulty, Some(Difficulty::Hard));
        assert_eq!(qs[2].difficulty, Some(Difficulty::Medium));
        assert!(qs.iter().all(|q| q.est_minutes == 3));
    }

    #[test]
    fn numbered_with_parentheses() {
        let text = "1) Define the word habitat.\n2) Compare a frog and a toad.";
        let qs = detect_questions(text);
        assert_eq!(qs.len(), 2);
        assert_eq!(qs[1].index, 2);
        assert_eq!(qs[1].prompt, "Compare a frog and a toad.");
    }

    #[test]
    fn question_label_pattern() {
        let text = "Question 1: Describe the water cycle in detail. Question 2: List three kinds of clouds.";
        let qs = detect_questions(text);
        assert_eq!(qs.len(), 2);
        assert_eq!(qs[0].prompt, "Describe the water cycle in detail.");
        assert_eq!(qs[1].index, 2);
        assert_eq!(qs[1].difficulty, Some(Difficulty::Easy));
    }

    #[test]
    fn prompt_runs_to_blank_line() {
        let text = "1. Read the passage about volcanoes\n   and summarize it in your own words.\n\nTeacher notes: grade by Friday.";
        let qs = detect_questions(text);
        assert_eq!(qs.len(), 1);
        assert_eq!(
            qs[0].prompt,
            "Read the passage about volcanoes and summarize it in your own words."
        );
    }

    #[test]
    fn short_prompts_are_noise() {
        let text = "1. Yes\n2. Explain why leaves change color in autumn.";
        let qs = detect_questions(text);
        assert_eq!(qs.len(), 1);
        assert_eq!(qs[0].index, 2);
    }

    #[test]
    fn ten_character_prompt_is_kept() {
        let qs = detect_questions("1. abcdefghij");
        assert_eq!(qs.len(), 1);
        assert_eq!(qs[0].prompt, "abcdefghij");
    }

    #[test]
    fn indexes_need_not_be_contiguous() {
        let text = "2. Explain erosion in your own words.\n5. What is a delta formed by?";
        let qs = detect_questions(text);
        let indexes: Vec<u32> = qs.iter().map(|q| q.index).collect();
        assert_eq!(indexes, vec![2, 5]);
    }

    #[test]
    fn duplicate_indexes_keep_first_pattern_match() {
        let text = "1. Explain the causes of the Civil War.\n\nQuestion 1: Describe a battle from the war.\nQuestion 2: List two generals from the war.";
        let qs = detect_questions(text);
        let indexes: Vec<u32> = qs.iter().map(|q| q.index).collect();
        assert_eq!(indexes, vec![1, 2]);
        assert_eq!(qs[0].prompt, "Explain the causes of the Civil War.");
    }

    #[test]
    fn decimals_are_not_headers() {
        let text = "3.14 is roughly pi and nothing else matters here";
        assert!(detect_questions(text).is_empty());
    }

    #[test]
    fn prompts_may_start_with_numbers() {
        let text = "1. 12 apples are shared by 4 kids. How many each?\n2) 25 divided by 5 equals what number?\nQuestion 3: 7 times 8 is what number exactly?";
        let qs = detect_questions(text);
        let indexes: Vec<u32> = qs.iter().map(|q| q.index).collect();
        assert_eq!(indexes, vec![1, 2, 3]);
        assert_eq!(qs[0].prompt, "12 apples are shared by 4 kids. How many each?");
        assert_eq!(qs[1].prompt, "25 divided by 5 equals what number?");
        assert_eq!(qs[2].prompt, "7 times 8 is what number exactly?");
    }

    #[test]
    fn question_label_before_a_number() {
        let qs = detect_questions("Question 1: 7 times 8 is what number exactly?");
        assert_eq!(qs.len(), 1);
        assert_eq!(qs[0].index, 1);
        assert_eq!(qs[0].prompt, "7 times 8 is what number exactly?");
    }

    #[test]
    fn fallback_markers_match_inside_words() {
        let qs = detect_questions("Show your working on the board. The sun is hot.");
        assert_eq!(qs.len(), 1);
        assert_eq!(qs[0].index, 1);
        assert_eq!(qs[0].prompt, "Show your working on the board.");
    }

    #[test]
    fn fallback_finds_question_sentences() {
        let text = "The Nile is long. Why does it flood every year? Rivers carry silt. Describe the delta.";
        let qs = detect_questions(text);
        assert_eq!(qs.len(), 2);
        assert_eq!(qs[0].index, 1);
        assert_eq!(qs[0].prompt, "Why does it flood every year?");
        assert_eq!(qs[1].index, 2);
        assert_eq!(qs[1].prompt, "Describe the delta.");
    }

    #[test]
    fn fallback_keeps_question_marks_without_markers() {
        let qs = detect_questions("Is the Moon a planet? It is not.");
        assert_eq!(qs.len(), 1);
        assert_eq!(qs[0].prompt, "Is the Moon a planet?");
        assert_eq!(qs[0].difficulty, Some(Difficulty::Medium));
    }

    #[test]
    fn no_questions_yields_empty() {
        let text = "The cat sat on the mat. The dog slept by the door. Birds sang outside.";
        assert!(detect_questions(text).is_empty());
        assert!(detect_questions("").is_empty());
    }

    #[test]
    fn difficulty_rules() {
        assert_eq!(estimate_difficulty("Explain what is meant by X"), Difficulty::Hard);
        assert_eq!(estimate_difficulty("ANALYZE the poem"), Difficulty::Hard);
        assert_eq!(estimate_difficulty("What is a noun?"), Difficulty::Easy);
        assert_eq!(estimate_difficulty("Define erosion"), Difficulty::Easy);
        assert_eq!(estimate_difficulty("List the planets"), Difficulty::Easy);
        assert_eq!(estimate_difficulty("Draw a map"), Difficulty::Medium);
    }
}
