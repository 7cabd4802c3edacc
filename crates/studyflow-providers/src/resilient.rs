//! Primary-then-fallback content generation.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{info, warn};

use studyflow_core::grade::GradeLevel;
use studyflow_core::model::{HomeworkQuestion, MaterialSummary, ReadingChunk, StudyGuide};
use studyflow_core::traits::ContentGenerator;

use crate::error::ProviderError;
use crate::fallback::DeterministicFallback;

/// Tries an optional primary generator and answers from the deterministic
/// fallback whenever it fails, times out, or is absent.
///
/// Primary failures are logged and never returned to the caller.
pub struct ResilientGenerator {
    primary: Option<Box<dyn ContentGenerator>>,
    fallback: DeterministicFallback,
    timeout: Option<Duration>,
}

impl ResilientGenerator {
    pub fn new(primary: Box<dyn ContentGenerator>, fallback: DeterministicFallback) -> Self {
        Self {
            primary: Some(primary),
            fallback,
            timeout: None,
        }
    }

    /// A generator that only ever runs the fallback.
    pub fn fallback_only(fallback: DeterministicFallback) -> Self {
        Self {
            primary: None,
            fallback,
            timeout: None,
        }
    }

    /// Bound each primary call; the fallback itself is never timed out.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn has_primary(&self) -> bool {
        self.primary.is_some()
    }

    /// Run a primary call, returning `None` if it failed or timed out.
    async fn attempt<T, F>(&self, operation: &str, call: F) -> Option<T>
    where
        F: Future<Output = anyhow::Result<T>>,
    {
        let primary = self.primary.as_ref()?.name();

        let result = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, call).await {
                Ok(result) => result,
                Err(_) => {
                    warn!(
                        generator = primary,
                        operation,
                        timeout_ms = limit.as_millis() as u64,
                        "primary generator timed out, using fallback"
                    );
                    return None;
                }
            },
            None => call.await,
        };

        match result {
            Ok(value) => Some(value),
            Err(e) => {
                let permanent = e
                    .downcast_ref::<ProviderError>()
                    .is_some_and(ProviderError::is_permanent);
                warn!(
                    generator = primary,
                    operation,
                    permanent,
                    error = %format!("{e:#}"),
                    "primary generator failed, using fallback"
                );
                None
            }
        }
    }
}

#[async_trait]
impl ContentGenerator for ResilientGenerator {
    fn name(&self) -> &str {
        match &self.primary {
            Some(primary) => primary.name(),
            None => self.fallback.name(),
        }
    }

    async fn chunk_reading(
        &self,
        text: &str,
        grade: GradeLevel,
    ) -> anyhow::Result<Vec<ReadingChunk>> {
        if let Some(primary) = &self.primary {
            if let Some(chunks) = self
                .attempt("chunk_reading", primary.chunk_reading(text, grade))
                .await
            {
                return Ok(chunks);
            }
        }
        info!(%grade, "segmenting with the deterministic engine");
        self.fallback.chunk_reading(text, grade).await
    }

    async fn detect_questions(&self, text: &str) -> anyhow::Result<Vec<HomeworkQuestion>> {
        if let Some(primary) = &self.primary {
            if let Some(questions) = self
                .attempt("detect_questions", primary.detect_questions(text))
                .await
            {
                return Ok(questions);
            }
        }
        info!("detecting questions with the deterministic engine");
        self.fallback.detect_questions(text).await
    }

    async fn summarize(&self, text: &str, grade: GradeLevel) -> anyhow::Result<MaterialSummary> {
        if let Some(primary) = &self.primary {
            if let Some(summary) = self
                .attempt("summarize", primary.summarize(text, grade))
                .await
            {
                return Ok(summary);
            }
        }
        self.fallback.summarize(text, grade).await
    }

    async fn study_guide(
        &self,
        questions: &[HomeworkQuestion],
        grade: GradeLevel,
    ) -> anyhow::Result<StudyGuide> {
        if let Some(primary) = &self.primary {
            if let Some(guide) = self
                .attempt("study_guide", primary.study_guide(questions, grade))
                .await
            {
                return Ok(guide);
            }
        }
        self.fallback.study_guide(questions, grade).await
    }
}
