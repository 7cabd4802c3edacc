//! Content generation through a remote chat model.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, instrument};

use studyflow_core::estimate::{estimate_homework_minutes, round_up_minutes};
use studyflow_core::grade::GradeLevel;
use studyflow_core::model::{
    Difficulty, HomeworkQuestion, MaterialSummary, ReadingChunk, StudyGuide,
    DEFAULT_QUESTION_MINUTES,
};
use studyflow_core::traits::{
    extract_json_from_markdown, ChatModel, CompletionRequest, ContentGenerator,
};

use crate::error::ProviderError;
use crate::prompts;

/// A `ContentGenerator` backed by a chat model.
///
/// Replies are validated and normalized before they leave this type: chunk
/// counts and estimates are recomputed from the text, question fields get
/// defaults, and a reply with nothing usable is a `MalformedResponse`.
pub struct RemoteModel {
    chat: Box<dyn ChatModel>,
    name: String,
    model: String,
    temperature: f64,
    max_tokens: u32,
}

impl RemoteModel {
    pub fn new(chat: Box<dyn ChatModel>, model: &str, temperature: f64, max_tokens: u32) -> Self {
        Self {
            name: format!("remote:{}", chat.name()),
            chat,
            model: model.to_string(),
            temperature,
            max_tokens,
        }
    }

    async fn ask<T: DeserializeOwned>(&self, prompt: String) -> anyhow::Result<T> {
        let request = CompletionRequest {
            model: self.model.clone(),
            prompt,
            system_prompt: Some(prompts::SYSTEM_PROMPT.to_string()),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let response = self.chat.complete(&request).await?;
        debug!(
            backend = self.chat.name(),
            model = %response.model,
            tokens = response.token_usage.total_tokens,
            latency_ms = response.latency_ms,
            "remote reply received"
        );

        let json = extract_json_from_markdown(&response.content);
        serde_json::from_str(&json)
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()).into())
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawChunk {
    #[serde(default)]
    heading: Option<String>,
    #[serde(default)]
    chunk_text: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawQuestion {
    #[serde(default)]
    index: Option<u32>,
    #[serde(default)]
    prompt: String,
    #[serde(default)]
    difficulty: Option<String>,
    #[serde(default)]
    est_minutes: Option<u32>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawGuide {
    #[serde(default)]
    steps: Vec<String>,
    #[serde(default)]
    hints: Vec<String>,
    #[serde(default)]
    estimated_minutes: Option<u32>,
}

fn parse_difficulty(label: &str) -> Option<Difficulty> {
    match label.trim().to_lowercase().as_str() {
        "easy" => Some(Difficulty::Easy),
        "medium" => Some(Difficulty::Medium),
        "hard" => Some(Difficulty::Hard),
        _ => None,
    }
}

fn non_blank(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn normalize_chunks(raw: Vec<RawChunk>) -> Vec<ReadingChunk> {
    raw.into_iter()
        .filter(|c| !c.chunk_text.trim().is_empty())
        .map(|c| {
            let heading = c.heading.map(|h| h.trim().to_string()).filter(|h| !h.is_empty());
            ReadingChunk::new(heading, c.chunk_text.trim())
        })
        .collect()
}

fn normalize_questions(raw: Vec<RawQuestion>) -> Vec<HomeworkQuestion> {
    raw.into_iter()
        .filter(|q| !q.prompt.trim().is_empty())
        .enumerate()
        .map(|(pos, q)| HomeworkQuestion {
            index: q.index.filter(|&i| i >= 1).unwrap_or(pos as u32 + 1),
            prompt: q.prompt.trim().to_string(),
            difficulty: q.difficulty.as_deref().and_then(parse_difficulty),
            est_minutes: q
                .est_minutes
                .filter(|&m| m > 0)
                .unwrap_or(DEFAULT_QUESTION_MINUTES),
        })
        .collect()
}

#[async_trait]
impl ContentGenerator for RemoteModel {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(skip_all, fields(generator = %self.name, grade = %grade))]
    async fn chunk_reading(
        &self,
        text: &str,
        grade: GradeLevel,
    ) -> anyhow::Result<Vec<ReadingChunk>> {
        let raw: Vec<RawChunk> = self.ask(prompts::chunking_prompt(text, grade)).await?;
        let chunks = normalize_chunks(raw);
        if chunks.is_empty() {
            return Err(ProviderError::MalformedResponse("no reading chunks".into()).into());
        }
        Ok(chunks)
    }

    #[instrument(skip_all, fields(generator = %self.name))]
    async fn detect_questions(&self, text: &str) -> anyhow::Result<Vec<HomeworkQuestion>> {
        let raw: Vec<RawQuestion> = self.ask(prompts::question_prompt(text)).await?;
        let questions = normalize_questions(raw);
        if questions.is_empty() {
            return Err(ProviderError::MalformedResponse("no questions".into()).into());
        }
        Ok(questions)
    }

    #[instrument(skip_all, fields(generator = %self.name, grade = %grade))]
    async fn summarize(&self, text: &str, grade: GradeLevel) -> anyhow::Result<MaterialSummary> {
        let raw: MaterialSummary = self.ask(prompts::summary_prompt(text, grade)).await?;
        let summary = raw.summary.trim().to_string();
        if summary.is_empty() {
            return Err(ProviderError::MalformedResponse("empty summary".into()).into());
        }
        Ok(MaterialSummary {
            summary,
            vocabulary: non_blank(raw.vocabulary),
            key_concepts: non_blank(raw.key_concepts),
        })
    }

    #[instrument(skip_all, fields(generator = %self.name, grade = %grade, questions = questions.len()))]
    async fn study_guide(
        &self,
        questions: &[HomeworkQuestion],
        grade: GradeLevel,
    ) -> anyhow::Result<StudyGuide> {
        let raw: RawGuide = self
            .ask(prompts::study_guide_prompt(questions, grade))
            .await?;
        let steps = non_blank(raw.steps);
        if steps.is_empty() {
            return Err(ProviderError::MalformedResponse("no study steps".into()).into());
        }
        let estimated_minutes = raw
            .estimated_minutes
            .filter(|&m| m > 0)
            .unwrap_or_else(|| round_up_minutes(estimate_homework_minutes(questions, grade)));
        Ok(StudyGuide {
            steps,
            hints: non_blank(raw.hints),
            estimated_minutes,
        })
    }
}
