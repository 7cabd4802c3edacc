//! Commands that go through a content generator: `breakdown`, `summary`, `guide`.

use std::path::PathBuf;

use anyhow::Result;
use tracing::info;

use studyflow_core::estimate::TaskEstimate;
use studyflow_core::traits::ContentGenerator;
use studyflow_core::{Breakdown, TaskKind};
use studyflow_providers::config::load_config_from;
use studyflow_providers::{build_generator, DeterministicFallback, ResilientGenerator, StudyflowConfig};

use super::{parse_grade, print_json, read_input, OutputFormat};

fn generator(config: &StudyflowConfig, offline: bool) -> ResilientGenerator {
    if offline {
        info!("offline mode, using the deterministic engine");
        return ResilientGenerator::fallback_only(DeterministicFallback::new(
            config.comprehension_factor,
        ));
    }
    build_generator(config)
}

pub async fn breakdown(
    input: PathBuf,
    grade: String,
    kind: String,
    offline: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let grade = parse_grade(&grade)?;
    let kind: TaskKind = kind.parse()?;
    let text = read_input(&input)?;
    let config = load_config_from(config_path.as_deref())?;
    let generator = generator(&config, offline);

    let breakdown = match kind {
        TaskKind::Reading => Breakdown::Reading {
            chunks: generator.chunk_reading(&text, grade).await?,
        },
        TaskKind::Homework => Breakdown::Homework {
            questions: generator.detect_questions(&text).await?,
        },
    };

    let estimate = TaskEstimate::for_breakdown(&breakdown, grade, config.comprehension_factor);
    info!(
        %kind,
        %grade,
        units = estimate.units,
        minutes = estimate.minutes,
        generator = generator.name(),
        "breakdown ready"
    );

    print_json(&breakdown)
}

pub async fn summary(
    input: PathBuf,
    grade: String,
    offline: bool,
    config_path: Option<PathBuf>,
    format: OutputFormat,
) -> Result<()> {
    let grade = parse_grade(&grade)?;
    let text = read_input(&input)?;
    let config = load_config_from(config_path.as_deref())?;

    let summary = generator(&config, offline).summarize(&text, grade).await?;

    match format {
        OutputFormat::Json => print_json(&summary)?,
        OutputFormat::Table => {
            println!("{}", summary.summary);
            if !summary.vocabulary.is_empty() {
                println!("\nVocabulary: {}", summary.vocabulary.join(", "));
            }
            if !summary.key_concepts.is_empty() {
                println!("\nKey concepts:");
                for concept in &summary.key_concepts {
                    println!("  - {concept}");
                }
            }
        }
    }

    Ok(())
}

pub async fn guide(
    input: PathBuf,
    grade: String,
    offline: bool,
    config_path: Option<PathBuf>,
    format: OutputFormat,
) -> Result<()> {
    let grade = parse_grade(&grade)?;
    let text = read_input(&input)?;
    let config = load_config_from(config_path.as_deref())?;
    let generator = generator(&config, offline);

    let questions = generator.detect_questions(&text).await?;
    let guide = generator.study_guide(&questions, grade).await?;

    match format {
        OutputFormat::Json => print_json(&guide)?,
        OutputFormat::Table => {
            println!(
                "Study guide for {} questions ({})",
                questions.len(),
                grade.display_name()
            );
            println!("\nSteps:");
            for (i, step) in guide.steps.iter().enumerate() {
                println!("  {}. {step}", i + 1);
            }
            if !guide.hints.is_empty() {
                println!("\nHints:");
                for hint in &guide.hints {
                    println!("  - {hint}");
                }
            }
            println!("\nEstimated time: {} min", guide.estimated_minutes);
        }
    }

    Ok(())
}
