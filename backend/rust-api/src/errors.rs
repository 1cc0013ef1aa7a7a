use chrono::NaiveDate;
use thiserror::Error;

/// Invalid input handed to the progression engine.
///
/// The engine never clamps or guesses: every out-of-range value is refused
/// with the constraint it violated so the caller can surface the upstream bug.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProgressionError {
    #[error("correctness_percent must be within 0..=100, got {0}")]
    CorrectnessOutOfRange(i32),

    #[error("difficulty must be within 1..=5, got {0}")]
    DifficultyOutOfRange(i32),

    #[error("total_xp must not be negative, got {0}")]
    NegativeTotalXp(i64),

    #[error("activity date {activity} precedes last recorded activity {last}")]
    OutOfOrderActivity {
        last: NaiveDate,
        activity: NaiveDate,
    },
}

impl ProgressionError {
    /// Name of the input field whose constraint was violated.
    pub fn constraint(&self) -> &'static str {
        match self {
            Self::CorrectnessOutOfRange(_) => "correctness_percent",
            Self::DifficultyOutOfRange(_) => "difficulty",
            Self::NegativeTotalXp(_) => "total_xp",
            Self::OutOfOrderActivity { .. } => "activity_date",
        }
    }
}

/// Problems with the configured rules, detected once at start-up.
#[derive(Debug, Error)]
pub enum RulesError {
    #[error("level table is empty")]
    EmptyLevelTable,

    #[error("level table must start at (0, 1), got ({min_xp}, {level})")]
    LevelTableStart { min_xp: u64, level: u32 },

    #[error("level table must be strictly increasing: ({prev_min_xp}, {prev_level}) then ({min_xp}, {level})")]
    LevelTableNotIncreasing {
        prev_min_xp: u64,
        prev_level: u32,
        min_xp: u64,
        level: u32,
    },

    #[error("base XP must strictly increase with difficulty: {0:?}")]
    BaseXpNotIncreasing([u32; 5]),

    #[error("invalid progression settings: {0}")]
    InvalidSettings(#[from] validator::ValidationErrors),
}
