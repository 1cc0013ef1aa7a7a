use serde::{Deserialize, Serialize};
use validator::Validate;

/// One graded answer.
///
/// Numeric fields are signed so that out-of-range values coming over the wire
/// reach the engine and get rejected with a precise error instead of a
/// generic deserialization failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionOutcome {
    pub correctness_percent: i32,
    pub difficulty: i32,
    #[serde(default)]
    pub hints_used: u32,
    #[serde(default)]
    pub current_streak_days: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct XpAwardResponse {
    pub xp_awarded: u64,
    pub passed: bool,
}

#[derive(Debug, Deserialize, Validate)]
pub struct DifficultyRequest {
    /// Oldest first
    #[validate(length(max = 100, message = "At most 100 recent outcomes are accepted"))]
    pub recent: Vec<SubmissionOutcome>,
    pub current_difficulty: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifficultyAdjustment {
    Increased,
    Decreased,
    Unchanged,
    InsufficientData,
}

impl DifficultyAdjustment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Increased => "increased",
            Self::Decreased => "decreased",
            Self::Unchanged => "unchanged",
            Self::InsufficientData => "insufficient_data",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyRecommendation {
    pub recommended_difficulty: i32,
    pub current_difficulty: i32,
    pub adjustment: DifficultyAdjustment,
    /// Share of passing outcomes in the window, 0.0..=100.0
    pub accuracy_percent: Option<f64>,
    pub outcomes_considered: usize,
}
