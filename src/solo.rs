//! Single-player scoring: timed questions with a speed bonus

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SoloScoring {
    pub base_points: u32,
    /// Points per second remaining
    pub time_bonus_factor: u32,
    pub max_time_per_question: u32,
}

impl Default for SoloScoring {
    fn default() -> Self {
        Self {
            base_points: 100,
            time_bonus_factor: 10,
            max_time_per_question: 15,
        }
    }
}

impl SoloScoring {
    /// Points for one answer; wrong answers score nothing
    pub fn question_score(&self, is_correct: bool, time_remaining_secs: f64) -> u32 {
        if !is_correct {
            return 0;
        }

        let remaining = if time_remaining_secs.is_nan() {
            0.0
        } else {
            time_remaining_secs.clamp(0.0, f64::from(self.max_time_per_question))
        };

        self.base_points
            .saturating_add((remaining * f64::from(self.time_bonus_factor)).floor() as u32)
    }

    pub fn max_possible_score(&self, question_count: u32) -> u32 {
        let per_question = self.max_time_per_question.saturating_mul(self.time_bonus_factor);
        question_count.saturating_mul(self.base_points.saturating_add(per_question))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PerformanceRating {
    Excellent,
    Great,
    Good,
    Fair,
    NeedsImprovement,
}

impl PerformanceRating {
    pub fn from_score(score: u32, max_possible_score: u32) -> Self {
        if max_possible_score == 0 {
            return Self::NeedsImprovement;
        }

        let percentage = f64::from(score) / f64::from(max_possible_score) * 100.0;
        match percentage {
            p if p >= 90.0 => Self::Excellent,
            p if p >= 75.0 => Self::Great,
            p if p >= 60.0 => Self::Good,
            p if p >= 45.0 => Self::Fair,
            _ => Self::NeedsImprovement,
        }
    }

    pub fn feedback(&self) -> &'static str {
        match self {
            Self::Excellent => "Outstanding! Your medical knowledge is exceptional!",
            Self::Great => "Very good! You have a strong grasp of medical concepts.",
            Self::Good => "Good job! Your medical knowledge is solid.",
            Self::Fair => "Nice effort! Keep studying to improve your medical knowledge.",
            Self::NeedsImprovement => "Keep practicing! Medical knowledge takes time to build.",
        }
    }
}

impl fmt::Display for PerformanceRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Excellent => "Excellent",
            Self::Great => "Great",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::NeedsImprovement => "Needs Improvement",
        };
        f.write_str(label)
    }
}
