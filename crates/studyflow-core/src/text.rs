//! Sentence and word helpers shared by the segmenter and the question detector.

/// A sentence cut out of raw text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sentence<'a> {
    /// Trimmed sentence body, without its terminal punctuation.
    pub body: &'a str,
    /// The run of terminal punctuation that ended the sentence (`"?"`, `"..."`),
    /// empty when the text ended without one.
    pub terminator: &'a str,
}

impl Sentence<'_> {
    /// Number of whitespace-delimited words in the body.
    pub fn word_count(&self) -> usize {
        word_count(self.body)
    }

    /// Whether the sentence was closed by a question mark.
    pub fn is_question(&self) -> bool {
        self.terminator.contains('?')
    }
}

fn is_terminal(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

/// Split text into sentences on runs of `.`, `!` and `?`.
///
/// Whitespace-only fragments are dropped, so `"Hi!!  . Bye"` yields two
/// sentences.
pub fn split_sentences(text: &str) -> Vec<Sentence<'_>> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if !is_terminal(c) {
            continue;
        }
        let mut end = i + c.len_utf8();
        while let Some(&(j, next)) = chars.peek() {
            if !is_terminal(next) {
                break;
            }
            end = j + next.len_utf8();
            chars.next();
        }
        push_sentence(&mut sentences, &text[start..i], &text[i..end]);
        start = end;
    }

    if start < text.len() {
        push_sentence(&mut sentences, &text[start..], "");
    }

    sentences
}

fn push_sentence<'a>(out: &mut Vec<Sentence<'a>>, body: &'a str, terminator: &'a str) {
    let body = body.trim();
    if !body.is_empty() {
        out.push(Sentence { body, terminator });
    }
}

/// Number of whitespace-delimited tokens.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
