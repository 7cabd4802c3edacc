//! studyflow-core: Reading segmentation, question detection, and time estimation.
//!
//! This crate holds the deterministic engine behind studyflow: grade tables,
//! the chunk segmenter, the homework question detector, the time estimators,
//! and the progress math consumed as a student works through a task. The
//! content-generation traits that remote backends implement live here too.

pub mod error;
pub mod estimate;
pub mod grade;
pub mod homework;
pub mod material;
pub mod model;
pub mod progress;
pub mod reading;
pub mod text;
pub mod traits;

pub use error::{StudyflowError, UploadError};
pub use grade::GradeLevel;
pub use model::{Breakdown, Difficulty, HomeworkQuestion, ReadingChunk, TaskKind};
