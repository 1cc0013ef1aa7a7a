use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Arc;

use crate::errors::ProgressionError;
use crate::metrics::{
    DIFFICULTY_RECOMMENDATIONS_TOTAL, LEVEL_UPS_TOTAL, PROGRESSION_REJECTIONS_TOTAL,
    STREAK_UPDATES_TOTAL, SUBMISSIONS_EVALUATED_TOTAL, XP_AWARDED_TOTAL,
};
use crate::models::level::LevelProgress;
use crate::models::progress::{
    accuracy_percent, ActivityRecord, DayActivity, ProgressOverview, ProgressionUpdate,
    SubmissionRequest, TrackInput, TrackOverview, TrackProgress, WeeklySummary, WeeklyTotals,
};
use crate::models::streak::{StreakState, StreakStatus, StreakUpdate};
use crate::models::submission::{DifficultyRecommendation, SubmissionOutcome};
use crate::utils::time::trailing_days;

use super::difficulty_selector::recommend_difficulty;
use super::level_resolver::resolve_level;
use super::rules::ProgressionRules;
use super::streak_service::{record_activity, streak_status};
use super::xp_calculator::calculate_xp;

const WEEK_DAYS: u64 = 7;

pub struct ProgressionService {
    rules: Arc<ProgressionRules>,
}

impl ProgressionService {
    pub fn new(rules: Arc<ProgressionRules>) -> Self {
        Self { rules }
    }

    pub fn award_xp(&self, outcome: &SubmissionOutcome) -> Result<(u64, bool), ProgressionError> {
        let xp = calculate_xp(outcome, &self.rules.xp).inspect_err(record_rejection)?;
        Ok((xp, self.rules.xp.passes(outcome.correctness_percent)))
    }

    pub fn resolve_level(&self, total_xp: i64) -> Result<LevelProgress, ProgressionError> {
        resolve_level(total_xp, &self.rules.levels).inspect_err(record_rejection)
    }

    pub fn record_activity(
        &self,
        streak: &StreakState,
        activity_date: NaiveDate,
    ) -> Result<StreakUpdate, ProgressionError> {
        let update = record_activity(streak, activity_date).inspect_err(record_rejection)?;
        STREAK_UPDATES_TOTAL
            .with_label_values(&[update.transition.as_str()])
            .inc();
        Ok(update)
    }

    pub fn streak_status(&self, streak: &StreakState, today: NaiveDate) -> Result<StreakStatus, ProgressionError> {
        streak_status(streak, today).inspect_err(record_rejection)
    }

    pub fn recommend_difficulty(
        &self,
        recent: &[SubmissionOutcome],
        current_difficulty: i32,
    ) -> Result<DifficultyRecommendation, ProgressionError> {
        let recommendation = recommend_difficulty(recent, current_difficulty, &self.rules.difficulty)
            .inspect_err(record_rejection)?;

        tracing::debug!(
            "Difficulty recommendation: current={}, recommended={}, adjustment={}",
            current_difficulty,
            recommendation.recommended_difficulty,
            recommendation.adjustment.as_str()
        );
        DIFFICULTY_RECOMMENDATIONS_TOTAL
            .with_label_values(&[recommendation.adjustment.as_str()])
            .inc();

        Ok(recommendation)
    }

    /// Applies one graded submission to a track's progress and the user's streak.
    ///
    /// The streak bonus is taken from `req.streak` as of `activity_date` (a
    /// lapsed streak counts as zero); `outcome.current_streak_days` is ignored.
    pub fn evaluate_submission(&self, req: &SubmissionRequest) -> Result<ProgressionUpdate, ProgressionError> {
        tracing::info!(
            "Evaluating submission: difficulty={}, correctness={}, hints={}, date={}",
            req.outcome.difficulty,
            req.outcome.correctness_percent,
            req.outcome.hints_used,
            req.activity_date
        );

        let streak_days = streak_status(&req.streak, req.activity_date)
            .inspect_err(record_rejection)?
            .current_streak_days;
        let outcome = SubmissionOutcome {
            current_streak_days: streak_days,
            ..req.outcome
        };
        let (xp_awarded, passed) = self.award_xp(&outcome)?;
        let streak = self.record_activity(&req.streak, req.activity_date)?;

        let previous_level = self.rules.levels.level_for(req.progress.total_xp);
        let total_xp = req.progress.total_xp.saturating_add(xp_awarded);
        let level_progress = self.rules.levels.progress_for(total_xp);
        let leveled_up = level_progress.level > previous_level;

        let progress = TrackProgress {
            total_xp,
            level: level_progress.level,
            challenges_completed: req.progress.challenges_completed.saturating_add(1),
            challenges_correct: req.progress.challenges_correct.saturating_add(u32::from(passed)),
        };

        SUBMISSIONS_EVALUATED_TOTAL
            .with_label_values(&[if passed { "true" } else { "false" }])
            .inc();
        XP_AWARDED_TOTAL.inc_by(xp_awarded);
        if leveled_up {
            LEVEL_UPS_TOTAL.inc();
            tracing::info!("Level up: {} -> {}", previous_level, level_progress.level);
        }

        tracing::info!(
            "Submission evaluated: xp_awarded={}, total_xp={}, level={}, streak={}",
            xp_awarded,
            progress.total_xp,
            progress.level,
            streak.state.current_streak_days
        );

        Ok(ProgressionUpdate {
            xp_awarded,
            passed,
            progress,
            level_progress,
            leveled_up,
            streak,
        })
    }

    /// Totals across tracks plus the streak as of `today`.
    pub fn overview(
        &self,
        tracks: &[TrackInput],
        streak: &StreakState,
        today: NaiveDate,
    ) -> Result<ProgressOverview, ProgressionError> {
        let streak = self.streak_status(streak, today)?;

        let mut total_xp: u64 = 0;
        let mut total_completed: u32 = 0;
        let mut total_correct: u32 = 0;

        let tracks: Vec<TrackOverview> = tracks
            .iter()
            .map(|input| {
                let progress = &input.progress;
                total_xp = total_xp.saturating_add(progress.total_xp);
                total_completed = total_completed.saturating_add(progress.challenges_completed);
                total_correct = total_correct.saturating_add(progress.challenges_correct);

                let level_progress = self.rules.levels.progress_for(progress.total_xp);
                TrackOverview {
                    track: input.track.clone(),
                    level: level_progress.level,
                    total_xp: progress.total_xp,
                    level_progress,
                    challenges_completed: progress.challenges_completed,
                    challenges_correct: progress.challenges_correct,
                    accuracy_percent: progress.accuracy_percent(),
                }
            })
            .collect();

        Ok(ProgressOverview {
            total_xp,
            overall_level: self.rules.levels.level_for(total_xp),
            total_challenges_completed: total_completed,
            total_challenges_correct: total_correct,
            overall_accuracy_percent: accuracy_percent(total_correct, total_completed),
            streak,
            tracks,
        })
    }

    /// Day-by-day activity for the seven days ending on `today`.
    pub fn weekly_summary(&self, activity: &[ActivityRecord], today: NaiveDate) -> WeeklySummary {
        let days = trailing_days(today, WEEK_DAYS);
        let mut by_day: HashMap<NaiveDate, DayActivity> = days
            .iter()
            .map(|&date| {
                (
                    date,
                    DayActivity {
                        date,
                        challenges_done: 0,
                        xp_earned: 0,
                        correct: 0,
                    },
                )
            })
            .collect();

        for record in activity {
            // Outside the window
            let Some(day) = by_day.get_mut(&record.date) else {
                continue;
            };
            day.challenges_done = day.challenges_done.saturating_add(1);
            day.xp_earned = day.xp_earned.saturating_add(record.xp_earned);
            day.correct = day.correct.saturating_add(u32::from(record.correct));
        }

        let days: Vec<DayActivity> = days
            .iter()
            .filter_map(|date| by_day.remove(date))
            .collect();

        let summary = WeeklyTotals {
            total_challenges: days.iter().map(|d| d.challenges_done).fold(0, u32::saturating_add),
            total_xp: days.iter().map(|d| d.xp_earned).fold(0, u64::saturating_add),
            active_days: days.iter().filter(|d| d.challenges_done > 0).count() as u32,
        };

        WeeklySummary {
            from: days.first().map(|d| d.date).unwrap_or(today),
            to: today,
            days,
            summary,
        }
    }
}

fn record_rejection(err: &ProgressionError) {
    tracing::warn!("Rejected progression input: {}", err);
    PROGRESSION_REJECTIONS_TOTAL
        .with_label_values(&[err.constraint()])
        .inc();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProgressionSettings;
    use crate::models::streak::StreakTransition;

    fn service() -> ProgressionService {
        let rules = ProgressionRules::from_settings(&ProgressionSettings::default()).unwrap();
        ProgressionService::new(Arc::new(rules))
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn submission(correctness: i32, difficulty: i32, progress: TrackProgress, streak: StreakState, day: NaiveDate) -> SubmissionRequest {
        SubmissionRequest {
            outcome: SubmissionOutcome {
                correctness_percent: correctness,
                difficulty,
                hints_used: 0,
                current_streak_days: streak.current_streak_days,
            },
            progress,
            streak,
            activity_date: day,
        }
    }

    #[test]
    fn test_first_submission_from_empty_state() {
        let update = service()
            .evaluate_submission(&submission(
                100,
                3,
                TrackProgress::default(),
                StreakState::default(),
                date(2024, 1, 1),
            ))
            .unwrap();

        assert_eq!(update.xp_awarded, 30);
        assert!(update.passed);
        assert_eq!(update.progress.total_xp, 30);
        assert_eq!(update.progress.level, 1);
        assert_eq!(update.progress.challenges_completed, 1);
        assert_eq!(update.progress.challenges_correct, 1);
        assert!(!update.leveled_up);
        assert_eq!(update.streak.transition, StreakTransition::Started);
        assert_eq!(update.streak.state.current_streak_days, 1);
    }

    #[test]
    fn test_submission_crossing_threshold_levels_up() {
        let progress = TrackProgress {
            total_xp: 80,
            level: 1,
            challenges_completed: 4,
            challenges_correct: 4,
        };
        let update = service()
            .evaluate_submission(&submission(100, 3, progress, StreakState::default(), date(2024, 1, 1)))
            .unwrap();

        assert_eq!(update.progress.total_xp, 110);
        assert_eq!(update.progress.level, 2);
        assert!(update.leveled_up);
        assert_eq!(update.level_progress.xp_into_level, 10);
        assert_eq!(update.level_progress.xp_to_next_level, Some(190));
    }

    #[test]
    fn test_stale_cached_level_is_recomputed() {
        let progress = TrackProgress {
            total_xp: 350,
            level: 1,
            challenges_completed: 10,
            challenges_correct: 8,
        };
        let update = service()
            .evaluate_submission(&submission(20, 2, progress, StreakState::default(), date(2024, 1, 1)))
            .unwrap();

        assert_eq!(update.xp_awarded, 0);
        assert!(!update.passed);
        assert_eq!(update.progress.level, 3);
        assert!(!update.leveled_up);
        assert_eq!(update.progress.challenges_completed, 11);
        assert_eq!(update.progress.challenges_correct, 8);
    }

    #[test]
    fn test_invalid_outcome_changes_nothing() {
        let result = service().evaluate_submission(&submission(
            130,
            3,
            TrackProgress::default(),
            StreakState::default(),
            date(2024, 1, 1),
        ));
        assert_eq!(result.unwrap_err(), ProgressionError::CorrectnessOutOfRange(130));
    }

    #[test]
    fn test_out_of_order_date_rejected() {
        let streak = StreakState {
            current_streak_days: 2,
            longest_streak_days: 2,
            last_activity_date: Some(date(2024, 1, 10)),
        };
        let result = service().evaluate_submission(&submission(
            90,
            2,
            TrackProgress::default(),
            streak,
            date(2024, 1, 9),
        ));
        assert!(matches!(result, Err(ProgressionError::OutOfOrderActivity { .. })));
    }

    #[test]
    fn test_streak_bonus_follows_stored_streak() {
        let streak = StreakState {
            current_streak_days: 7,
            longest_streak_days: 7,
            last_activity_date: Some(date(2024, 1, 7)),
        };
        let mut req = submission(100, 4, TrackProgress::default(), streak, date(2024, 1, 8));
        req.outcome.current_streak_days = 0;

        let update = service().evaluate_submission(&req).unwrap();
        assert_eq!(update.xp_awarded, 44);
        assert_eq!(update.streak.state.current_streak_days, 8);
    }

    #[test]
    fn test_lapsed_streak_earns_no_bonus() {
        let streak = StreakState {
            current_streak_days: 30,
            longest_streak_days: 30,
            last_activity_date: Some(date(2024, 1, 1)),
        };
        // Outcome still claims the old streak
        let req = submission(100, 4, TrackProgress::default(), streak, date(2024, 2, 1));

        let update = service().evaluate_submission(&req).unwrap();
        assert_eq!(update.xp_awarded, 40);
        assert_eq!(update.streak.transition, StreakTransition::Reset);
    }

    #[test]
    fn test_overview_totals() {
        let tracks = vec![
            TrackInput {
                track: "python".to_string(),
                progress: TrackProgress {
                    total_xp: 250,
                    level: 2,
                    challenges_completed: 10,
                    challenges_correct: 7,
                },
            },
            TrackInput {
                track: "rust".to_string(),
                progress: TrackProgress {
                    total_xp: 100,
                    level: 2,
                    challenges_completed: 2,
                    challenges_correct: 1,
                },
            },
        ];
        let streak = StreakState {
            current_streak_days: 4,
            longest_streak_days: 6,
            last_activity_date: Some(date(2024, 5, 1)),
        };

        let overview = service().overview(&tracks, &streak, date(2024, 5, 1)).unwrap();
        assert_eq!(overview.total_xp, 350);
        assert_eq!(overview.overall_level, 3);
        assert_eq!(overview.total_challenges_completed, 12);
        assert_eq!(overview.total_challenges_correct, 8);
        assert_eq!(overview.overall_accuracy_percent, 66.7);
        assert_eq!(overview.tracks[0].accuracy_percent, 70.0);
        assert_eq!(overview.tracks[1].level_progress.xp_into_level, 0);
        assert!(overview.streak.is_active_today);
        assert_eq!(overview.streak.current_streak_days, 4);
    }

    #[test]
    fn test_weekly_summary_zero_fills_and_ignores_outside_window() {
        let today = date(2024, 3, 7);
        let activity = vec![
            ActivityRecord { date: date(2024, 3, 7), xp_earned: 30, correct: true },
            ActivityRecord { date: date(2024, 3, 7), xp_earned: 0, correct: false },
            ActivityRecord { date: date(2024, 3, 1), xp_earned: 20, correct: true },
            ActivityRecord { date: date(2024, 2, 29), xp_earned: 99, correct: true },
            ActivityRecord { date: date(2024, 3, 8), xp_earned: 99, correct: true },
        ];

        let weekly = service().weekly_summary(&activity, today);
        assert_eq!(weekly.from, date(2024, 3, 1));
        assert_eq!(weekly.to, today);
        assert_eq!(weekly.days.len(), 7);
        assert_eq!(weekly.days[0].challenges_done, 1);
        assert_eq!(weekly.days[6].challenges_done, 2);
        assert_eq!(weekly.days[6].correct, 1);
        assert_eq!(weekly.days[3].challenges_done, 0);
        assert_eq!(
            weekly.summary,
            WeeklyTotals {
                total_challenges: 3,
                total_xp: 50,
                active_days: 2,
            }
        );
    }

    #[test]
    fn test_weekly_totals_saturate() {
        let today = date(2024, 3, 7);
        let activity = vec![
            ActivityRecord { date: today, xp_earned: u64::MAX, correct: true },
            ActivityRecord { date: date(2024, 3, 6), xp_earned: 1, correct: true },
        ];

        let weekly = service().weekly_summary(&activity, today);
        assert_eq!(weekly.days[6].xp_earned, u64::MAX);
        assert_eq!(weekly.summary.total_xp, u64::MAX);
        assert_eq!(weekly.summary.total_challenges, 2);
    }
}
