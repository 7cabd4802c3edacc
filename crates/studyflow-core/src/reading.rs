//! Sentence-aware reading chunk segmentation.

use crate::grade::GradeLevel;
use crate::model::{chunk_minutes, ReadingChunk};
use crate::text::split_sentences;

/// Split text into reading chunks of at most `target_words` words.
///
/// Sentences are never split: a sentence longer than the target becomes a
/// chunk of its own. Each sentence is re-terminated with a period. Text
/// without any words produces no chunks.
pub fn chunk_text(text: &str, target_words: usize) -> Vec<ReadingChunk> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_words = 0;

    for sentence in split_sentences(text) {
        let sentence_words = sentence.word_count();

        if current_words + sentence_words > target_words && !current.is_empty() {
            chunks.push(close_chunk(std::mem::take(&mut current), current_words));
            current_words = 0;
        }

        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(sentence.body);
        current.push('.');
        current_words += sentence_words;
    }

    if !current.is_empty() {
        chunks.push(close_chunk(current, current_words));
    }

    tracing::debug!(
        chunks = chunks.len(),
        target_words,
        "segmented reading text"
    );
    chunks
}

fn close_chunk(chunk_text: String, word_count: usize) -> ReadingChunk {
    ReadingChunk {
        heading: None,
        chunk_text,
        est_minutes: chunk_minutes(word_count),
        word_count,
    }
}

/// Segment text using the chunk size for `grade`.
pub fn chunk_reading_for_grade(text: &str, grade: GradeLevel) -> Vec<ReadingChunk> {
    chunk_text(text, grade.target_chunk_words())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::word_count;

    fn sentence(words: usize, tag: &str) -> String {
        let mut s = (0..words).map(|i| format!("{tag}{i}")).collect::<Vec<_>>().join(" ");
        s.push('.');
        s
    }

    #[test]
    fn groups_sentences_up_to_target() {
        let text = format!("{} {} {}", sentence(4, "a"), sentence(4, "b"), sentence(4, "c"));
        let chunks = chunk_text(&text, 8);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].word_count, 8);
        assert_eq!(chunks[1].word_count, 4);
        assert!(chunks[0].chunk_text.starts_with("a0"));
        assert!(chunks[1].chunk_text.starts_with("c0"));
    }

    #[test]
    fn oversized_sentence_stands_alone() {
        let text = format!("{} {} {}", sentence(2, "a"), sentence(20, "b"), sentence(2, "c"));
        let chunks = chunk_text(&text, 10);
        let counts: Vec<usize> = chunks.iter().map(|c| c.word_count).collect();
        assert_eq!(counts, vec![2, 20, 2]);
    }

    #[test]
    fn chunks_respect_target_unless_single_sentence() {
        let text = (0..40)
            .map(|i| sentence(1 + (i * 7) % 13, &format!("s{i}w")))
            .collect::<Vec<_>>()
            .join(" ");
        let target = 15;
        for chunk in chunk_text(&text, target) {
            let sentences = chunk.chunk_text.matches('.').count();
            assert!(chunk.word_count <= target || sentences == 1, "{chunk:?}");
            assert!(chunk.word_count > 0);
        }
    }

    #[test]
    fn preserves_sentence_order_and_content() {
        let text = "The Sun is a star! Earth orbits the Sun? Mars is red. Jupiter is big";
        let chunks = chunk_text(text, 5);
        let joined = chunks
            .iter()
            .map(|c| c.chunk_text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        assert_eq!(
            joined,
            "The Sun is a star. Earth orbits the Sun. Mars is red. Jupiter is big."
        );
    }

    #[test]
    fn word_count_matches_chunk_text() {
        let text = "One  two\tthree.\n\nFour five!   Six?";
        for chunk in chunk_text(text, 3) {
            assert_eq!(chunk.word_count, word_count(&chunk.chunk_text));
        }
    }

    #[test]
    fn estimate_uses_flat_150_wpm() {
        let text = format!("{} {}", sentence(150, "a"), sentence(1, "b"));
        let chunks = chunk_text(&text, 1000);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].word_count, 151);
        assert_eq!(chunks[0].est_minutes, 2);
    }

    #[test]
    fn empty_input_yields_no_chunks() {
        assert!(chunk_text("", 300).is_empty());
        assert!(chunk_text("  ...  !!! ", 300).is_empty());
    }

    #[test]
    fn grade_entry_point_uses_band_target() {
        let text = (0..60).map(|i| sentence(10, &format!("x{i}_"))).collect::<Vec<_>>().join(" ");
        let primary = chunk_reading_for_grade(&text, GradeLevel::G3);
        let secondary = chunk_reading_for_grade(&text, GradeLevel::G9);
        assert_eq!(primary.len(), 2);
        assert_eq!(primary[0].word_count, 300);
        assert_eq!(secondary.len(), 2);
        assert_eq!(secondary[0].word_count, 500);
        assert_eq!(secondary[1].word_count, 100);
    }
}
