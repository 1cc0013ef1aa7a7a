use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakState {
    pub current_streak_days: u32,
    pub longest_streak_days: u32,
    pub last_activity_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakTransition {
    /// No earlier activity on record
    Started,
    /// Activity already counted for this date
    AlreadyCounted,
    /// Consecutive day
    Continued,
    /// Gap of two or more days
    Reset,
}

impl StreakTransition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Started => "started",
            Self::AlreadyCounted => "already_counted",
            Self::Continued => "continued",
            Self::Reset => "reset",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakUpdate {
    pub state: StreakState,
    pub transition: StreakTransition,
    /// Set when this update moved the streak onto a milestone
    pub milestone_reached: Option<u32>,
    pub next_milestone: Option<u32>,
    pub motivational_message: String,
}

/// Streak as seen on a given day, without mutating it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakStatus {
    pub current_streak_days: u32,
    pub longest_streak_days: u32,
    pub last_activity_date: Option<NaiveDate>,
    pub is_active_today: bool,
    pub next_milestone: Option<u32>,
    pub motivational_message: String,
}

#[derive(Debug, Deserialize)]
pub struct RecordActivityRequest {
    #[serde(default)]
    pub streak: StreakState,
    pub activity_date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct StreakStatusRequest {
    #[serde(default)]
    pub streak: StreakState,
    pub today: NaiveDate,
}
