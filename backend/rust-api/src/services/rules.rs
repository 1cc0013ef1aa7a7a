use validator::Validate;

use crate::config::ProgressionSettings;
use crate::errors::RulesError;

use super::difficulty_selector::DifficultyRules;
use super::level_resolver::LevelTable;
use super::xp_calculator::XpRules;

/// Every rule the engine applies, validated once and then shared read-only.
#[derive(Debug, Clone)]
pub struct ProgressionRules {
    pub levels: LevelTable,
    pub xp: XpRules,
    pub difficulty: DifficultyRules,
}

impl ProgressionRules {
    pub fn from_settings(settings: &ProgressionSettings) -> Result<Self, RulesError> {
        settings.validate()?;

        let base = settings.base_xp_by_difficulty;
        if base.windows(2).any(|pair| pair[1] <= pair[0]) {
            return Err(RulesError::BaseXpNotIncreasing(base));
        }

        let levels = LevelTable::new(settings.levels.clone())?;

        Ok(Self {
            levels,
            xp: XpRules {
                base_xp_by_difficulty: base,
                pass_threshold_percent: settings.pass_threshold_percent,
                hint_penalty_percent: settings.hint_penalty_percent,
                streak_bonus_threshold_days: settings.streak_bonus_threshold_days,
                streak_bonus_percent: settings.streak_bonus_percent,
            },
            difficulty: DifficultyRules {
                window: settings.difficulty_window,
                pass_threshold_percent: settings.pass_threshold_percent,
                increase_above_percent: settings.increase_above_percent,
                decrease_below_percent: settings.decrease_below_percent,
            },
        })
    }
}
