use crate::errors::ProgressionError;
use crate::models::submission::{DifficultyAdjustment, DifficultyRecommendation, SubmissionOutcome};

use super::xp_calculator::{validate_correctness, validate_difficulty, MAX_DIFFICULTY, MIN_DIFFICULTY};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DifficultyRules {
    /// Outcomes needed before any adjustment is made
    pub window: usize,
    pub pass_threshold_percent: i32,
    /// Accuracy strictly above this raises difficulty
    pub increase_above_percent: u32,
    /// Accuracy strictly below this lowers difficulty
    pub decrease_below_percent: u32,
}

impl Default for DifficultyRules {
    fn default() -> Self {
        Self {
            window: 10,
            pass_threshold_percent: 50,
            increase_above_percent: 80,
            decrease_below_percent: 40,
        }
    }
}

/// Recommends the next challenge difficulty from recent outcomes (oldest first).
///
/// Below `window` outcomes the current difficulty is kept. Otherwise only the
/// most recent `window` outcomes count.
pub fn recommend_difficulty(
    recent: &[SubmissionOutcome],
    current_difficulty: i32,
    rules: &DifficultyRules,
) -> Result<DifficultyRecommendation, ProgressionError> {
    validate_difficulty(current_difficulty)?;
    for outcome in recent {
        validate_correctness(outcome.correctness_percent)?;
    }

    if rules.window == 0 || recent.len() < rules.window {
        return Ok(DifficultyRecommendation {
            recommended_difficulty: current_difficulty,
            current_difficulty,
            adjustment: DifficultyAdjustment::InsufficientData,
            accuracy_percent: None,
            outcomes_considered: recent.len(),
        });
    }

    let considered = &recent[recent.len() - rules.window..];
    let passed = considered
        .iter()
        .filter(|o| o.correctness_percent >= rules.pass_threshold_percent)
        .count() as u64;
    let total = considered.len() as u64;

    // Compare passed/total against thresholds without floating point
    let (recommended, adjustment) = if passed * 100 > u64::from(rules.increase_above_percent) * total {
        ((current_difficulty + 1).min(MAX_DIFFICULTY), DifficultyAdjustment::Increased)
    } else if passed * 100 < u64::from(rules.decrease_below_percent) * total {
        ((current_difficulty - 1).max(MIN_DIFFICULTY), DifficultyAdjustment::Decreased)
    } else {
        (current_difficulty, DifficultyAdjustment::Unchanged)
    };

    // Clamped at the ends of the range
    let adjustment = if recommended == current_difficulty {
        DifficultyAdjustment::Unchanged
    } else {
        adjustment
    };

    Ok(DifficultyRecommendation {
        recommended_difficulty: recommended,
        current_difficulty,
        adjustment,
        accuracy_percent: Some(passed as f64 * 100.0 / total as f64),
        outcomes_considered: considered.len(),
    })
}
