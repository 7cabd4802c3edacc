//! Grade-calibrated lookup tables.
//!
//! Every numeric band in studyflow (reading speed, per-question time, chunk
//! size) is keyed off the student's grade. Bands are resolved with an explicit
//! `match` per grade, never by position.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::StudyflowError;

/// A school grade, kindergarten through grade 12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GradeLevel {
    K,
    G1,
    G2,
    G3,
    G4,
    G5,
    G6,
    G7,
    G8,
    G9,
    G10,
    G11,
    G12,
}

/// Coarse grade bands that drive reading speed and per-question time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Band {
    /// K–G2
    Early,
    /// G3–G5
    Upper,
    /// G6–G8
    Middle,
    /// G9–G12
    High,
}

impl GradeLevel {
    /// All grades in ascending order.
    pub const ALL: [GradeLevel; 13] = [
        GradeLevel::K,
        GradeLevel::G1,
        GradeLevel::G2,
        GradeLevel::G3,
        GradeLevel::G4,
        GradeLevel::G5,
        GradeLevel::G6,
        GradeLevel::G7,
        GradeLevel::G8,
        GradeLevel::G9,
        GradeLevel::G10,
        GradeLevel::G11,
        GradeLevel::G12,
    ];

    /// Numeric grade: 0 for kindergarten, otherwise the grade number.
    pub fn ordinal(self) -> u8 {
        match self {
            GradeLevel::K => 0,
            GradeLevel::G1 => 1,
            GradeLevel::G2 => 2,
            GradeLevel::G3 => 3,
            GradeLevel::G4 => 4,
            GradeLevel::G5 => 5,
            GradeLevel::G6 => 6,
            GradeLevel::G7 => 7,
            GradeLevel::G8 => 8,
            GradeLevel::G9 => 9,
            GradeLevel::G10 => 10,
            GradeLevel::G11 => 11,
            GradeLevel::G12 => 12,
        }
    }

    /// Inverse of [`GradeLevel::ordinal`].
    pub fn from_ordinal(n: u8) -> Result<Self, StudyflowError> {
        GradeLevel::ALL
            .into_iter()
            .find(|g| g.ordinal() == n)
            .ok_or_else(|| StudyflowError::InvalidGrade(n.to_string()))
    }

    fn band(self) -> Band {
        match self {
            GradeLevel::K | GradeLevel::G1 | GradeLevel::G2 => Band::Early,
            GradeLevel::G3 | GradeLevel::G4 | GradeLevel::G5 => Band::Upper,
            GradeLevel::G6 | GradeLevel::G7 | GradeLevel::G8 => Band::Middle,
            GradeLevel::G9 | GradeLevel::G10 | GradeLevel::G11 | GradeLevel::G12 => Band::High,
        }
    }

    /// Assumed silent reading speed in words per minute.
    ///
    /// Values are midpoints of typical ranges: 90-110, 130-150, 160-170, 180-200.
    pub fn words_per_minute(self) -> u32 {
        match self.band() {
            Band::Early => 100,
            Band::Upper => 140,
            Band::Middle => 165,
            Band::High => 190,
        }
    }

    /// Baseline minutes for one homework question before difficulty scaling.
    pub fn base_minutes_per_question(self) -> u32 {
        match self.band() {
            Band::Early => 2,
            Band::Upper => 3,
            Band::Middle => 4,
            Band::High => 5,
        }
    }

    /// K through grade 5.
    pub fn is_primary(self) -> bool {
        matches!(self.band(), Band::Early | Band::Upper)
    }

    /// Target words per reading chunk: 300 for primary, 500 for secondary.
    pub fn target_chunk_words(self) -> usize {
        if self.is_primary() {
            300
        } else {
            500
        }
    }

    /// Human-readable name, e.g. "Kindergarten" or "Grade 7".
    pub fn display_name(self) -> String {
        match self {
            GradeLevel::K => "Kindergarten".to_string(),
            other => format!("Grade {}", other.ordinal()),
        }
    }
}

impl fmt::Display for GradeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GradeLevel::K => write!(f, "K"),
            other => write!(f, "G{}", other.ordinal()),
        }
    }
}

impl FromStr for GradeLevel {
    type Err = StudyflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        match normalized.as_str() {
            "k" | "kindergarten" => return Ok(GradeLevel::K),
            _ => {}
        }

        let digits = normalized
            .strip_prefix("grade")
            .or_else(|| normalized.strip_prefix('g'))
            .unwrap_or(&normalized)
            .trim();

        // Kindergarten is only spelled out, never "G0".
        match digits.parse::<u8>() {
            Ok(n) if n >= 1 => GradeLevel::from_ordinal(n)
                .map_err(|_| StudyflowError::InvalidGrade(s.to_string())),
            _ => Err(StudyflowError::InvalidGrade(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn words_per_minute_bands() {
        assert_eq!(GradeLevel::K.words_per_minute(), 100);
        assert_eq!(GradeLevel::G2.words_per_minute(), 100);
        assert_eq!(GradeLevel::G3.words_per_minute(), 140);
        assert_eq!(GradeLevel::G5.words_per_minute(), 140);
        assert_eq!(GradeLevel::G6.words_per_minute(), 165);
        assert_eq!(GradeLevel::G8.words_per_minute(), 165);
        assert_eq!(GradeLevel::G9.words_per_minute(), 190);
        assert_eq!(GradeLevel::G12.words_per_minute(), 190);
    }

    #[test]
    fn bands_cover_every_grade_once() {
        let expected_wpm = [100, 100, 100, 140, 140, 140, 165, 165, 165, 190, 190, 190, 190];
        let expected_base = [2, 2, 2, 3, 3, 3, 4, 4, 4, 5, 5, 5, 5];
        for (i, grade) in GradeLevel::ALL.into_iter().enumerate() {
            assert_eq!(grade.ordinal() as usize, i);
            assert_eq!(grade.words_per_minute(), expected_wpm[i], "{grade}");
            assert_eq!(grade.base_minutes_per_question(), expected_base[i], "{grade}");
        }
    }

    #[test]
    fn chunk_targets_split_at_grade_six() {
        assert_eq!(GradeLevel::K.target_chunk_words(), 300);
        assert_eq!(GradeLevel::G5.target_chunk_words(), 300);
        assert_eq!(GradeLevel::G6.target_chunk_words(), 500);
        assert_eq!(GradeLevel::G12.target_chunk_words(), 500);
        assert!(GradeLevel::G5.is_primary());
        assert!(!GradeLevel::G6.is_primary());
    }

    #[test]
    fn display_names() {
        assert_eq!(GradeLevel::K.display_name(), "Kindergarten");
        assert_eq!(GradeLevel::G1.display_name(), "Grade 1");
        assert_eq!(GradeLevel::G12.display_name(), "Grade 12");
        assert_eq!(GradeLevel::G10.to_string(), "G10");
        assert_eq!(GradeLevel::K.to_string(), "K");
    }

    #[test]
    fn parse_grades() {
        assert_eq!("K".parse::<GradeLevel>().unwrap(), GradeLevel::K);
        assert_eq!("kindergarten".parse::<GradeLevel>().unwrap(), GradeLevel::K);
        assert_eq!("G5".parse::<GradeLevel>().unwrap(), GradeLevel::G5);
        assert_eq!("g11".parse::<GradeLevel>().unwrap(), GradeLevel::G11);
        assert_eq!("7".parse::<GradeLevel>().unwrap(), GradeLevel::G7);
        assert_eq!("Grade 3".parse::<GradeLevel>().unwrap(), GradeLevel::G3);
    }

    #[test]
    fn invalid_grades_fail_fast() {
        for bad in ["G13", "G0", "13", "", "first", "G-1"] {
            let err = bad.parse::<GradeLevel>().unwrap_err();
            assert!(matches!(err, StudyflowError::InvalidGrade(_)), "{bad}");
        }
        assert!(GradeLevel::from_ordinal(13).is_err());
        let msg = GradeLevel::from_ordinal(42).unwrap_err().to_string();
        assert_eq!(msg, "invalid grade: 42");
    }

    #[test]
    fn serde_uses_variant_names() {
        let json = serde_json::to_string(&GradeLevel::G10).unwrap();
        assert_eq!(json, "\"G10\"");
        let grade: GradeLevel = serde_json::from_str("\"K\"").unwrap();
        assert_eq!(grade, GradeLevel::K);
        assert!(serde_json::from_str::<GradeLevel>("\"G13\"").is_err());
    }
}
