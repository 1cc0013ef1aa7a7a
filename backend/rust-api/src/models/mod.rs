pub mod level;
pub mod progress;
pub mod streak;
pub mod submission;

pub use level::{LevelProgress, LevelThreshold};
pub use progress::{ProgressionUpdate, SubmissionRequest, TrackProgress};
pub use streak::{StreakState, StreakStatus, StreakTransition, StreakUpdate};
pub use submission::{DifficultyAdjustment, DifficultyRecommendation, SubmissionOutcome};
