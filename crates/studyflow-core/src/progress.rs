//! Progress and remaining-time math for a student working through a task.
//!
//! All functions are total: empty sequences and out-of-range positions give
//! 0, and percentages are clamped to 0..=100.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{HomeworkQuestion, ReadingChunk};

fn percent(numerator: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let pct = (numerator as f64 / total as f64 * 100.0).round();
    pct.clamp(0.0, 100.0) as u8
}

/// Percent complete while reading the chunk at zero-based `current_chunk`.
pub fn reading_progress(current_chunk: usize, total_chunks: usize) -> u8 {
    percent(current_chunk.saturating_add(1), total_chunks)
}

/// Percent of homework questions completed.
pub fn homework_progress(completed: usize, total: usize) -> u8 {
    percent(completed, total)
}

/// Minutes left, counting the chunk currently being read.
pub fn reading_time_remaining(current_chunk: usize, chunks: &[ReadingChunk]) -> u32 {
    chunks
        .get(current_chunk..)
        .unwrap_or_default()
        .iter()
        .map(|c| c.est_minutes)
        .sum()
}

/// Minutes left for the questions after the first `completed`.
pub fn homework_time_remaining(completed: usize, questions: &[HomeworkQuestion]) -> u32 {
    questions
        .get(completed..)
        .unwrap_or_default()
        .iter()
        .map(|q| q.est_minutes)
        .sum()
}

/// Position within a chunk sequence.
///
/// Students may page backward to review; completion always reflects the
/// furthest chunk reached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingCursor {
    current: usize,
    furthest: usize,
}

impl ReadingCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn furthest(&self) -> usize {
        self.furthest
    }

    /// Move to the next chunk. Returns `false` at the last chunk.
    pub fn advance(&mut self, total: usize) -> bool {
        if self.current + 1 >= total {
            return false;
        }
        self.jump_to(self.current + 1, total)
    }

    /// Move to the previous chunk. Returns `false` at the first chunk.
    pub fn back(&mut self) -> bool {
        if self.current == 0 {
            return false;
        }
        self.current -= 1;
        true
    }

    /// Jump to a position. Out-of-range positions are ignored.
    pub fn jump_to(&mut self, position: usize, total: usize) -> bool {
        if position >= total {
            return false;
        }
        self.current = position;
        self.furthest = self.furthest.max(position);
        true
    }

    pub fn progress(&self, total: usize) -> u8 {
        if total == 0 {
            return 0;
        }
        reading_progress(self.furthest, total)
    }

    pub fn time_remaining(&self, chunks: &[ReadingChunk]) -> u32 {
        reading_time_remaining(self.current, chunks)
    }
}

/// Set of completed question positions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeworkChecklist {
    completed: BTreeSet<usize>,
}

impl HomeworkChecklist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the question at `position` done or not done.
    pub fn set_completed(&mut self, position: usize, done: bool) {
        if done {
            self.completed.insert(position);
        } else {
            self.completed.remove(&position);
        }
    }

    pub fn is_completed(&self, position: usize) -> bool {
        self.completed.contains(&position)
    }

    /// Completed questions among the first `total`.
    pub fn completed_count(&self, total: usize) -> usize {
        self.completed.range(..total).count()
    }

    pub fn progress(&self, total: usize) -> u8 {
        homework_progress(self.completed_count(total), total)
    }

    /// Every question done. An empty set of questions is never complete.
    pub fn is_complete(&self, total: usize) -> bool {
        total > 0 && self.completed_count(total) == total
    }

    /// Minutes left for questions not yet marked done.
    pub fn time_remaining(&self, questions: &[HomeworkQuestion]) -> u32 {
        questions
            .iter()
            .enumerate()
            .filter(|(i, _)| !self.is_completed(*i))
            .map(|(_, q)| q.est_minutes)
            .sum()
    }
}

/// Assignment status as stored by the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    NotStarted,
    InProgress,
    Completed,
}

/// Body of a progress update for an assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressUpdate {
    pub progress: u8,
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl ProgressUpdate {
    /// Build an update for `progress`, stamping completion at `now` when it hits 100.
    pub fn from_progress(
        progress: u8,
        started_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Self {
        let progress = progress.min(100);
        let (status, completed_at) = if progress == 100 {
            (TaskStatus::Completed, Some(now))
        } else {
            (TaskStatus::InProgress, None)
        };

        Self {
            progress,
            status,
            started_at: started_at.or(Some(now)),
            completed_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn chunks(minutes: &[u32]) -> Vec<ReadingChunk> {
        minutes
            .iter()
            .map(|&m| ReadingChunk {
                heading: None,
                chunk_text: "text".into(),
                est_minutes: m,
                word_count: 1,
            })
            .collect()
    }

    fn questions(minutes: &[u32]) -> Vec<HomeworkQuestion> {
        minutes
            .iter()
            .enumerate()
            .map(|(i, &m)| HomeworkQuestion {
                index: i as u32 + 1,
                prompt: "prompt text here".into(),
                difficulty: None,
                est_minutes: m,
            })
            .collect()
    }

    #[test]
    fn reading_progress_values() {
        assert_eq!(reading_progress(0, 1), 100);
        assert_eq!(reading_progress(0, 4), 25);
        assert_eq!(reading_progress(1, 3), 67);
        assert_eq!(reading_progress(9, 3), 100);
    }

    #[test]
    fn reading_progress_is_monotonic() {
        let total = 17;
        let values: Vec<u8> = (0..total).map(|n| reading_progress(n, total)).collect();
        assert!(values.windows(2).all(|w| w[0] < w[1]), "{values:?}");
        assert_eq!(values.last(), Some(&100));
    }

    #[test]
    fn homework_progress_values() {
        assert_eq!(homework_progress(0, 5), 0);
        assert_eq!(homework_progress(5, 5), 100);
        assert_eq!(homework_progress(1, 3), 33);
    }

    #[test]
    fn zero_totals_are_zero() {
        assert_eq!(reading_progress(0, 0), 0);
        assert_eq!(reading_progress(usize::MAX, 0), 0);
        assert_eq!(homework_progress(3, 0), 0);
        assert_eq!(reading_time_remaining(0, &[]), 0);
        assert_eq!(homework_time_remaining(0, &[]), 0);
    }

    #[test]
    fn remaining_includes_current_chunk() {
        let c = chunks(&[2, 3, 4]);
        assert_eq!(reading_time_remaining(0, &c), 9);
        assert_eq!(reading_time_remaining(2, &c), 4);
        assert_eq!(reading_time_remaining(3, &c), 0);
        assert_eq!(reading_time_remaining(99, &c), 0);
    }

    #[test]
    fn homework_remaining_skips_completed_prefix() {
        let q = questions(&[5, 8, 3]);
        assert_eq!(homework_time_remaining(0, &q), 16);
        assert_eq!(homework_time_remaining(1, &q), 11);
        assert_eq!(homework_time_remaining(3, &q), 0);
        assert_eq!(homework_time_remaining(10, &q), 0);
    }

    #[test]
    fn cursor_tracks_furthest_position() {
        let c = chunks(&[1, 1, 1, 1]);
        let mut cursor = ReadingCursor::new();
        assert_eq!(cursor.progress(c.len()), 25);
        assert!(cursor.advance(c.len()));
        assert!(cursor.advance(c.len()));
        assert!(cursor.back());
        assert_eq!(cursor.current(), 1);
        assert_eq!(cursor.furthest(), 2);
        assert_eq!(cursor.progress(c.len()), 75);
        assert_eq!(cursor.time_remaining(&c), 3);
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let mut cursor = ReadingCursor::new();
        assert!(!cursor.back());
        assert!(!cursor.advance(1));
        assert!(!cursor.jump_to(5, 3));
        assert!(cursor.jump_to(2, 3));
        assert!(!cursor.advance(3));
        assert_eq!(cursor.progress(3), 100);
        assert_eq!(ReadingCursor::new().progress(0), 0);
    }

    #[test]
    fn checklist_counts_cardinality() {
        let q = questions(&[5, 8, 3]);
        let mut list = HomeworkChecklist::new();
        list.set_completed(2, true);
        list.set_completed(0, true);
        assert_eq!(list.progress(q.len()), 67);
        assert_eq!(list.time_remaining(&q), 8);
        assert!(!list.is_complete(q.len()));

        list.set_completed(0, false);
        list.set_completed(1, true);
        list.set_completed(0, true);
        assert!(list.is_complete(q.len()));
        assert_eq!(list.progress(q.len()), 100);
        assert!(!HomeworkChecklist::new().is_complete(0));
    }

    #[test]
    fn checklist_ignores_positions_past_total() {
        let mut list = HomeworkChecklist::new();
        list.set_completed(7, true);
        assert_eq!(list.completed_count(3), 0);
        assert_eq!(list.progress(3), 0);
    }

    #[test]
    fn progress_update_status() {
        let started = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap();

        let update = ProgressUpdate::from_progress(50, Some(started), now);
        assert_eq!(update.status, TaskStatus::InProgress);
        assert_eq!(update.started_at, Some(started));
        assert_eq!(update.completed_at, None);

        let update = ProgressUpdate::from_progress(100, None, now);
        assert_eq!(update.status, TaskStatus::Completed);
        assert_eq!(update.started_at, Some(now));
        assert_eq!(update.completed_at, Some(now));
    }

    #[test]
    fn progress_update_json() {
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap();
        let update = ProgressUpdate::from_progress(100, Some(now), now);
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json["progress"], 100);
        assert_eq!(json["status"], "COMPLETED");
        assert_eq!(json["completedAt"], "2025-03-01T09:30:00Z");
    }
}
