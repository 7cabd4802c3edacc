//! Prompt construction for the remote generator.
//!
//! Every prompt asks for a bare JSON payload in the exact shape the core data
//! model deserializes, so replies go straight through `serde`.

use studyflow_core::grade::GradeLevel;
use studyflow_core::model::HomeworkQuestion;

/// Most characters of material sent with a summary request.
pub const SUMMARY_EXCERPT_CHARS: usize = 2000;

pub const SYSTEM_PROMPT: &str = "You help teachers prepare study material for students. \
Answer with JSON only, no commentary and no markdown outside the JSON.";

pub fn chunking_prompt(text: &str, grade: GradeLevel) -> String {
    format!(
        "Break this text into reading chunks suitable for {grade} students. \
Each chunk should take 2-3 minutes to read and end on a sentence boundary. \
Keep the original wording and order.\n\
Return a JSON array of objects with the fields: \
{{\"heading\": optional string, \"chunkText\": string, \"estMinutes\": integer, \"wordCount\": integer}}.\n\n\
Text:\n{text}",
        grade = grade.display_name(),
    )
}

pub fn question_prompt(text: &str) -> String {
    format!(
        "Find all homework questions in this text, in the order they appear.\n\
Return a JSON array of objects with the fields: \
{{\"index\": integer starting at 1, \"prompt\": string, \"difficulty\": \"easy\" | \"medium\" | \"hard\", \"estMinutes\": integer}}.\n\n\
Text:\n{text}"
    )
}

pub fn summary_prompt(text: &str, grade: GradeLevel) -> String {
    format!(
        "Summarize this educational material for {grade} students.\n\
Return a JSON object with the fields: \
{{\"summary\": 2-3 sentences, \"vocabulary\": 5-10 key words, \"keyConcepts\": 3-5 main concepts}}.\n\n\
Text:\n{excerpt}",
        grade = grade.display_name(),
        excerpt = excerpt(text, SUMMARY_EXCERPT_CHARS),
    )
}

pub fn study_guide_prompt(questions: &[HomeworkQuestion], grade: GradeLevel) -> String {
    let listing: String = questions
        .iter()
        .map(|q| format!("{}. {}\n", q.index, q.prompt))
        .collect();
    format!(
        "Create a study guide for these {grade} homework questions.\n\
Return a JSON object with the fields: \
{{\"steps\": array of strings, \"hints\": array of strings, \"estimatedMinutes\": integer}}.\n\n\
Questions:\n{listing}",
        grade = grade.display_name(),
    )
}

/// The first `max_chars` characters of `text`, never splitting a character.
fn excerpt(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
