use chrono::NaiveDate;

use crate::errors::ProgressionError;
use crate::models::streak::{StreakState, StreakStatus, StreakTransition, StreakUpdate};
use crate::utils::time::days_between;

/// Streak lengths that count as a milestone when reached.
pub const STREAK_MILESTONES: [u32; 5] = [3, 7, 14, 30, 100];

// (min days, message), ascending
const MOTIVATIONAL_MESSAGES: [(u32, &str); 11] = [
    (0, "No streak yet. Solve one challenge today to get going."),
    (1, "Day one is in the bag. Come back tomorrow."),
    (2, "Two days running. Consistency beats intensity."),
    (3, "Three days in a row, the habit is forming."),
    (5, "Five days straight. Keep the chain alive."),
    (7, "A full week without a break."),
    (14, "Two weeks of daily practice."),
    (21, "Three weeks. Practice is part of the routine now."),
    (30, "A month of daily challenges."),
    (50, "Fifty days. That is serious dedication."),
    (100, "One hundred days. Legendary."),
];

/// Message for the highest threshold the streak meets.
pub fn motivational_message(streak_days: u32) -> &'static str {
    MOTIVATIONAL_MESSAGES
        .iter()
        .rev()
        .find(|(threshold, _)| streak_days >= *threshold)
        .map(|(_, msg)| *msg)
        .unwrap_or(MOTIVATIONAL_MESSAGES[0].1)
}

/// Lowest milestone not reached yet.
pub fn next_milestone(streak_days: u32) -> Option<u32> {
    STREAK_MILESTONES.iter().copied().find(|&m| m > streak_days)
}

fn classify(previous: &StreakState, activity_date: NaiveDate) -> Result<StreakTransition, ProgressionError> {
    let Some(last) = previous.last_activity_date else {
        return Ok(StreakTransition::Started);
    };

    match days_between(last, activity_date) {
        delta if delta < 0 => Err(ProgressionError::OutOfOrderActivity {
            last,
            activity: activity_date,
        }),
        0 => Ok(StreakTransition::AlreadyCounted),
        1 => Ok(StreakTransition::Continued),
        _ => Ok(StreakTransition::Reset),
    }
}

fn apply(previous: &StreakState, activity_date: NaiveDate, transition: StreakTransition) -> StreakState {
    let current = match transition {
        StreakTransition::AlreadyCounted => return previous.clone(),
        StreakTransition::Continued => previous.current_streak_days.saturating_add(1),
        StreakTransition::Started | StreakTransition::Reset => 1,
    };

    StreakState {
        current_streak_days: current,
        longest_streak_days: previous.longest_streak_days.max(current),
        last_activity_date: Some(activity_date),
    }
}

/// New streak state after activity on `activity_date`.
///
/// Same-day calls return the input unchanged; dates earlier than the last
/// recorded activity are refused.
pub fn update_streak(previous: &StreakState, activity_date: NaiveDate) -> Result<StreakState, ProgressionError> {
    let transition = classify(previous, activity_date)?;
    Ok(apply(previous, activity_date, transition))
}

/// Like [`update_streak`] but also reports how the streak moved.
pub fn record_activity(previous: &StreakState, activity_date: NaiveDate) -> Result<StreakUpdate, ProgressionError> {
    let transition = classify(previous, activity_date)?;
    let state = apply(previous, activity_date, transition);

    let advanced = matches!(transition, StreakTransition::Started | StreakTransition::Continued);
    let milestone_reached = STREAK_MILESTONES
        .iter()
        .copied()
        .find(|&m| advanced && m == state.current_streak_days);

    if let Some(milestone) = milestone_reached {
        tracing::info!("Streak milestone reached: {} days", milestone);
    }

    Ok(StreakUpdate {
        next_milestone: next_milestone(state.current_streak_days),
        motivational_message: motivational_message(state.current_streak_days).to_string(),
        state,
        transition,
        milestone_reached,
    })
}

/// Effective streak as of `today` without recording activity.
///
/// A streak whose last activity is older than yesterday has lapsed and reads
/// as zero even though the stored state still carries the old count.
pub fn streak_status(state: &StreakState, today: NaiveDate) -> Result<StreakStatus, ProgressionError> {
    let (current, is_active_today) = match state.last_activity_date {
        None => (0, false),
        Some(last) => match days_between(last, today) {
            delta if delta < 0 => {
                return Err(ProgressionError::OutOfOrderActivity {
                    last,
                    activity: today,
                })
            }
            0 => (state.current_streak_days, true),
            1 => (state.current_streak_days, false),
            _ => (0, false),
        },
    };

    Ok(StreakStatus {
        current_streak_days: current,
        longest_streak_days: state.longest_streak_days.max(current),
        last_activity_date: state.last_activity_date,
        is_active_today,
        next_milestone: next_milestone(current),
        motivational_message: motivational_message(current).to_string(),
    })
}
