use crate::errors::ProgressionError;
use crate::models::submission::SubmissionOutcome;

pub const MIN_DIFFICULTY: i32 = 1;
pub const MAX_DIFFICULTY: i32 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XpRules {
    pub base_xp_by_difficulty: [u32; 5],
    pub pass_threshold_percent: i32,
    pub hint_penalty_percent: u32,
    pub streak_bonus_threshold_days: u32,
    pub streak_bonus_percent: u32,
}

impl Default for XpRules {
    fn default() -> Self {
        Self {
            base_xp_by_difficulty: [10, 20, 30, 40, 50],
            pass_threshold_percent: 50,
            hint_penalty_percent: 10,
            streak_bonus_threshold_days: 7,
            streak_bonus_percent: 10,
        }
    }
}

impl XpRules {
    pub fn passes(&self, correctness_percent: i32) -> bool {
        correctness_percent >= self.pass_threshold_percent
    }
}

pub fn validate_correctness(correctness_percent: i32) -> Result<(), ProgressionError> {
    if (0..=100).contains(&correctness_percent) {
        Ok(())
    } else {
        Err(ProgressionError::CorrectnessOutOfRange(correctness_percent))
    }
}

pub fn validate_difficulty(difficulty: i32) -> Result<(), ProgressionError> {
    if (MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&difficulty) {
        Ok(())
    } else {
        Err(ProgressionError::DifficultyOutOfRange(difficulty))
    }
}

/// XP earned for one submission.
///
/// base(difficulty) x correctness x hint factor x streak factor, with each
/// factor kept as a percentage numerator and a single half-up rounding at
/// the end.
pub fn calculate_xp(outcome: &SubmissionOutcome, rules: &XpRules) -> Result<u64, ProgressionError> {
    validate_correctness(outcome.correctness_percent)?;
    validate_difficulty(outcome.difficulty)?;

    if !rules.passes(outcome.correctness_percent) {
        return Ok(0);
    }

    // difficulty is within 1..=5 here
    let base = u64::from(rules.base_xp_by_difficulty[(outcome.difficulty - 1) as usize]);
    let correctness = outcome.correctness_percent as u64;

    let hint_percent = u64::from(
        100u32.saturating_sub(outcome.hints_used.saturating_mul(rules.hint_penalty_percent)),
    );

    let streak_percent = if outcome.current_streak_days >= rules.streak_bonus_threshold_days {
        100 + u64::from(rules.streak_bonus_percent)
    } else {
        100
    };

    const DENOMINATOR: u64 = 100 * 100 * 100;
    let numerator = base * correctness * hint_percent * streak_percent;

    Ok((numerator + DENOMINATOR / 2) / DENOMINATOR)
}
