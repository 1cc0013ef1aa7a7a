use std::sync::Arc;

use crate::config::Config;
use rules::ProgressionRules;

pub struct AppState {
    pub config: Config,
    pub rules: Arc<ProgressionRules>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let rules = ProgressionRules::from_settings(&config.progression)
            .map_err(|e| anyhow::anyhow!("Invalid progression rules: {}", e))?;

        tracing::info!(
            "Progression rules loaded: {} levels, pass threshold {}%, difficulty window {}",
            rules.levels.thresholds().len(),
            rules.xp.pass_threshold_percent,
            rules.difficulty.window
        );

        Ok(Self {
            config,
            rules: Arc::new(rules),
        })
    }
}

pub mod difficulty_selector;
pub mod level_resolver;
pub mod progression_service;
pub mod rules;
pub mod streak_service;
pub mod xp_calculator;
