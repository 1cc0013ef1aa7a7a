use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::level::LevelProgress;
use super::streak::{StreakState, StreakStatus, StreakUpdate};
use super::submission::SubmissionOutcome;

/// Per-track stats. `level` is a cached projection of `total_xp` and is
/// recomputed on every update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackProgress {
    pub total_xp: u64,
    pub level: u32,
    #[serde(default)]
    pub challenges_completed: u32,
    #[serde(default)]
    pub challenges_correct: u32,
}

impl Default for TrackProgress {
    fn default() -> Self {
        Self {
            total_xp: 0,
            level: 1,
            challenges_completed: 0,
            challenges_correct: 0,
        }
    }
}

impl TrackProgress {
    /// Percentage of passed challenges, one decimal place.
    pub fn accuracy_percent(&self) -> f64 {
        accuracy_percent(self.challenges_correct, self.challenges_completed)
    }
}

pub(crate) fn accuracy_percent(correct: u32, completed: u32) -> f64 {
    if completed == 0 {
        return 0.0;
    }
    (f64::from(correct) / f64::from(completed) * 1000.0).round() / 10.0
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionRequest {
    pub outcome: SubmissionOutcome,
    #[serde(default)]
    pub progress: TrackProgress,
    #[serde(default)]
    pub streak: StreakState,
    pub activity_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressionUpdate {
    pub xp_awarded: u64,
    pub passed: bool,
    pub progress: TrackProgress,
    pub level_progress: LevelProgress,
    pub leveled_up: bool,
    pub streak: StreakUpdate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackInput {
    pub track: String,
    #[serde(default)]
    pub progress: TrackProgress,
}

#[derive(Debug, Deserialize, Validate)]
pub struct OverviewRequest {
    #[validate(length(max = 50, message = "At most 50 tracks are accepted"))]
    pub tracks: Vec<TrackInput>,
    #[serde(default)]
    pub streak: StreakState,
    pub today: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackOverview {
    pub track: String,
    pub level: u32,
    pub total_xp: u64,
    pub level_progress: LevelProgress,
    pub challenges_completed: u32,
    pub challenges_correct: u32,
    pub accuracy_percent: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressOverview {
    pub total_xp: u64,
    pub overall_level: u32,
    pub total_challenges_completed: u32,
    pub total_challenges_correct: u32,
    pub overall_accuracy_percent: f64,
    pub streak: StreakStatus,
    pub tracks: Vec<TrackOverview>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub date: NaiveDate,
    #[serde(default)]
    pub xp_earned: u64,
    #[serde(default)]
    pub correct: bool,
}

#[derive(Debug, Deserialize, Validate)]
pub struct WeeklyRequest {
    #[validate(length(max = 1000, message = "At most 1000 activity records are accepted"))]
    pub activity: Vec<ActivityRecord>,
    pub today: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayActivity {
    pub date: NaiveDate,
    pub challenges_done: u32,
    pub xp_earned: u64,
    pub correct: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyTotals {
    pub total_challenges: u32,
    pub total_xp: u64,
    pub active_days: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklySummary {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub days: Vec<DayActivity>,
    pub summary: WeeklyTotals,
}
