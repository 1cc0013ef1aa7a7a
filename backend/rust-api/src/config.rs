use serde::Deserialize;
use std::env;
use validator::{Validate, ValidationError};

use crate::models::level::{LevelThreshold, DEFAULT_LEVEL_THRESHOLDS};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub bind_addr: String,
    pub metrics_auth: String,
    pub progression: ProgressionSettings,
}

/// Tunable progression rules. Every field has a default so a partial
/// `[progression]` table only overrides what it names.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(default)]
#[validate(schema(function = "validate_difficulty_band"))]
pub struct ProgressionSettings {
    #[validate(range(min = 0, max = 100, message = "Pass threshold must be between 0 and 100"))]
    pub pass_threshold_percent: i32,

    /// Base XP for difficulty 1..=5
    pub base_xp_by_difficulty: [u32; 5],

    #[validate(range(max = 100, message = "Hint penalty must be at most 100%"))]
    pub hint_penalty_percent: u32,

    pub streak_bonus_threshold_days: u32,

    #[validate(range(max = 1000, message = "Streak bonus must be at most 1000%"))]
    pub streak_bonus_percent: u32,

    #[validate(range(min = 1, max = 100, message = "Difficulty window must be between 1 and 100"))]
    pub difficulty_window: usize,

    #[validate(range(max = 100))]
    pub increase_above_percent: u32,

    #[validate(range(max = 100))]
    pub decrease_below_percent: u32,

    pub levels: Vec<LevelThreshold>,
}

impl Default for ProgressionSettings {
    fn default() -> Self {
        Self {
            pass_threshold_percent: 50,
            base_xp_by_difficulty: [10, 20, 30, 40, 50],
            hint_penalty_percent: 10,
            streak_bonus_threshold_days: 7,
            streak_bonus_percent: 10,
            difficulty_window: 10,
            increase_above_percent: 80,
            decrease_below_percent: 40,
            levels: DEFAULT_LEVEL_THRESHOLDS
                .iter()
                .map(|&(min_xp, level)| LevelThreshold { min_xp, level })
                .collect(),
        }
    }
}

fn validate_difficulty_band(settings: &ProgressionSettings) -> Result<(), ValidationError> {
    if settings.decrease_below_percent >= settings.increase_above_percent {
        let mut err = ValidationError::new("difficulty_band");
        err.message = Some("decrease_below_percent must be lower than increase_above_percent".into());
        return Err(err);
    }
    Ok(())
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        // Load environment variables from root .env file (two levels up)
        // Try root .env first, then fallback to local .env
        let skip_root_env = env::var("SKIP_ROOT_ENV").is_ok();
        if skip_root_env {
            dotenvy::dotenv().ok();
        } else if dotenvy::from_path("../../.env").is_err() {
            dotenvy::dotenv().ok();
        }

        // Determine environment (defaults to dev)
        let env = env::var("APP_ENV").unwrap_or_else(|_| "dev".to_string());

        // Build configuration from config/*.toml + ENV overrides
        let settings = config::Config::builder()
            .add_source(config::File::with_name(&format!("config/{}", env)).required(false))
            // Override with environment variables (prefix: APP_)
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let bind_addr = settings
            .get_string("server.bind_addr")
            .or_else(|_| env::var("BIND_ADDR"))
            .unwrap_or_else(|_| "0.0.0.0:8081".to_string());

        let metrics_auth = match settings
            .get_string("metrics.auth")
            .or_else(|_| env::var("METRICS_AUTH"))
        {
            Ok(value) => value,
            Err(_) if env == "prod" => {
                return Err(config::ConfigError::Message(
                    "METRICS_AUTH must be set in production".to_string(),
                ));
            }
            Err(_) => {
                eprintln!("WARNING: Using default METRICS_AUTH (dev mode only!)");
                "admin:changeme".to_string()
            }
        };

        let progression = match settings.get::<ProgressionSettings>("progression") {
            Ok(progression) => progression,
            Err(config::ConfigError::NotFound(_)) => ProgressionSettings::default(),
            Err(e) => return Err(e),
        };

        Ok(Config {
            bind_addr,
            metrics_auth,
            progression,
        })
    }
}
