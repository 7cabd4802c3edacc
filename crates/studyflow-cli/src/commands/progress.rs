//! The `studyflow progress` command.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;

use studyflow_core::model::{homework_questions_or_placeholder, reading_chunks_or_placeholder};
use studyflow_core::progress::{
    homework_progress, homework_time_remaining, ProgressUpdate, ReadingCursor,
};
use studyflow_core::{Breakdown, TaskKind};

use super::{print_json, read_input};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProgressReport {
    #[serde(flatten)]
    update: ProgressUpdate,
    remaining_minutes: u32,
}

pub fn execute(
    breakdown_path: PathBuf,
    position: usize,
    furthest: Option<usize>,
    kind: Option<String>,
    started_at: Option<String>,
) -> Result<()> {
    let raw = read_input(&breakdown_path)?;
    let breakdown = Breakdown::parse_lenient(&raw);

    let kind = match (&breakdown, kind) {
        (Some(b), _) => b.kind(),
        (None, Some(k)) => k.parse::<TaskKind>()?,
        (None, None) => TaskKind::Reading,
    };
    if breakdown.is_none() {
        warn!(%kind, path = %breakdown_path.display(), "no usable breakdown, using placeholder");
    }

    let started_at = started_at
        .map(|s| {
            DateTime::parse_from_rfc3339(&s)
                .map(|t| t.with_timezone(&Utc))
                .with_context(|| format!("invalid --started-at timestamp: {s}"))
        })
        .transpose()?;

    let (progress, remaining_minutes) = match kind {
        TaskKind::Reading => {
            let chunks = reading_chunks_or_placeholder(breakdown.as_ref());
            let cursor = reading_cursor(position, furthest, chunks.len())?;
            (cursor.progress(chunks.len()), cursor.time_remaining(&chunks))
        }
        TaskKind::Homework => {
            let questions = homework_questions_or_placeholder(breakdown.as_ref());
            (
                homework_progress(position, questions.len()),
                homework_time_remaining(position, &questions),
            )
        }
    };

    print_json(&ProgressReport {
        update: ProgressUpdate::from_progress(progress, started_at, Utc::now()),
        remaining_minutes,
    })
}

/// Place a cursor at `position`, having already reached `furthest`.
fn reading_cursor(
    position: usize,
    furthest: Option<usize>,
    total: usize,
) -> Result<ReadingCursor> {
    let mut cursor = ReadingCursor::new();
    for target in [furthest.unwrap_or(position).max(position), position] {
        if !cursor.jump_to(target, total) {
            bail!("chunk {target} is out of range for {total} chunks");
        }
    }
    Ok(cursor)
}
