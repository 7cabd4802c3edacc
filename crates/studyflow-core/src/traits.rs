//! Core trait definitions for content generation and chat backends.
//!
//! `ContentGenerator` is what task creation calls to produce a breakdown.
//! `ChatModel` is the thin transport a remote generator sits on. Both are
//! implemented in the `studyflow-providers` crate.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::grade::GradeLevel;
use crate::model::{HomeworkQuestion, MaterialSummary, ReadingChunk, StudyGuide};

// ---------------------------------------------------------------------------
// Content generator trait
// ---------------------------------------------------------------------------

/// Produces reading chunks, homework questions, and study aids from text.
///
/// Every implementation returns the same shapes, so consumers cannot tell
/// which one ran.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Short name used in logs (e.g. "remote:openai", "fallback").
    fn name(&self) -> &str;

    /// Split material into reading chunks for a grade.
    async fn chunk_reading(&self, text: &str, grade: GradeLevel)
        -> anyhow::Result<Vec<ReadingChunk>>;

    /// Find homework questions in material.
    async fn detect_questions(&self, text: &str) -> anyhow::Result<Vec<HomeworkQuestion>>;

    /// Summarize material for a grade.
    async fn summarize(&self, text: &str, grade: GradeLevel) -> anyhow::Result<MaterialSummary>;

    /// Steps and hints for working through a homework set.
    async fn study_guide(
        &self,
        questions: &[HomeworkQuestion],
        grade: GradeLevel,
    ) -> anyhow::Result<StudyGuide>;
}

// ---------------------------------------------------------------------------
// Chat model trait
// ---------------------------------------------------------------------------

/// A chat-completion backend.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Human-readable backend name (e.g. "openai").
    fn name(&self) -> &str;

    /// Send one prompt and return the reply.
    async fn complete(&self, request: &CompletionRequest) -> anyhow::Result<CompletionResponse>;
}

/// A single-turn completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Model identifier (e.g. "gpt-4.1-mini").
    pub model: String,
    /// The user prompt.
    pub prompt: String,
    /// Optional system prompt.
    #[serde(default)]
    pub system_prompt: Option<String>,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f64,
}

/// Reply from a chat backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// The raw reply text.
    pub content: String,
    /// Model that actually answered.
    pub model: String,
    /// Token usage.
    pub token_usage: TokenUsage,
    /// Latency in milliseconds.
    pub latency_ms: u64,
}

/// Token accounting for a completion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

// ---------------------------------------------------------------------------
// JSON extraction
// ---------------------------------------------------------------------------

/// Pull a JSON payload out of a chat reply.
///
/// Handles:
/// - ```json``` blocks (the first one wins)
/// - Generic ``` blocks (if no json-tagged block is found)
/// - Raw JSON surrounded by prose (outermost `[...]` or `{...}`)
pub fn extract_json_from_markdown(response: &str) -> String {
    let mut json_block: Option<String> = None;
    let mut generic_block: Option<String> = None;
    let mut in_block = false;
    let mut is_json_block = false;
    let mut is_generic_block = false;
    let mut current_block = String::new();

    for line in response.lines() {
        let trimmed = line.trim();

        if !in_block && trimmed.starts_with("```") {
            in_block = true;
            let lang = trimmed.trim_start_matches('`').trim().to_lowercase();
            is_json_block = lang == "json";
            is_generic_block = lang.is_empty();
            current_block.clear();
            continue;
        }

        if in_block && trimmed == "```" {
            in_block = false;
            if is_json_block && json_block.is_none() {
                json_block = Some(current_block.clone());
            } else if is_generic_block && generic_block.is_none() {
                generic_block = Some(current_block.clone());
            }
            current_block.clear();
            continue;
        }

        if in_block {
            if !current_block.is_empty() {
                current_block.push('\n');
            }
            current_block.push_str(line);
        }
    }

    // Truncated (unclosed) block
    if in_block && !current_block.is_empty() {
        if is_json_block && json_block.is_none() {
            json_block = Some(current_block);
        } else if is_generic_block && generic_block.is_none() {
            generic_block = Some(current_block);
        }
    }

    if let Some(block) = json_block.or(generic_block) {
        return block.trim().to_string();
    }

    outermost_json(response)
        .unwrap_or(response)
        .trim()
        .to_string()
}

fn outermost_json(response: &str) -> Option<&str> {
    let start = response.find(['[', '{'])?;
    let close = if response[start..].starts_with('[') {
        ']'
    } else {
        '}'
    };
    let end = response.rfind(close)?;
    (end > start).then(|| &response[start..=end])
}
