use crate::errors::{ProgressionError, RulesError};
use crate::models::level::{LevelProgress, LevelThreshold};

/// Validated, immutable level table.
///
/// Thresholds start at `(0, 1)` and strictly increase in both XP and level,
/// so every non-negative XP value maps to exactly one level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelTable {
    thresholds: Vec<LevelThreshold>,
}

impl LevelTable {
    pub fn new(thresholds: Vec<LevelThreshold>) -> Result<Self, RulesError> {
        let first = thresholds.first().ok_or(RulesError::EmptyLevelTable)?;
        if first.min_xp != 0 || first.level != 1 {
            return Err(RulesError::LevelTableStart {
                min_xp: first.min_xp,
                level: first.level,
            });
        }

        for pair in thresholds.windows(2) {
            let (prev, next) = (pair[0], pair[1]);
            if next.min_xp <= prev.min_xp || next.level <= prev.level {
                return Err(RulesError::LevelTableNotIncreasing {
                    prev_min_xp: prev.min_xp,
                    prev_level: prev.level,
                    min_xp: next.min_xp,
                    level: next.level,
                });
            }
        }

        Ok(Self { thresholds })
    }

    pub fn thresholds(&self) -> &[LevelThreshold] {
        &self.thresholds
    }

    pub fn max_level(&self) -> u32 {
        // Non-empty by construction
        self.thresholds.last().map(|t| t.level).unwrap_or(1)
    }

    /// Level for an XP total. Thresholds are inclusive lower bounds.
    pub fn level_for(&self, total_xp: u64) -> u32 {
        self.thresholds[self.index_for(total_xp)].level
    }

    pub fn progress_for(&self, total_xp: u64) -> LevelProgress {
        let idx = self.index_for(total_xp);
        let current = self.thresholds[idx];
        let next = self.thresholds.get(idx + 1);

        LevelProgress {
            level: current.level,
            total_xp,
            xp_into_level: total_xp - current.min_xp,
            xp_to_next_level: next.map(|n| n.min_xp - total_xp),
            xp_for_next_level: next.map(|n| n.min_xp - current.min_xp),
            is_max_level: next.is_none(),
        }
    }

    fn index_for(&self, total_xp: u64) -> usize {
        // First threshold is 0, so at least one entry always matches
        self.thresholds
            .partition_point(|t| t.min_xp <= total_xp)
            .saturating_sub(1)
    }
}

/// Resolves a signed XP total, refusing negative values.
pub fn resolve_level(total_xp: i64, table: &LevelTable) -> Result<LevelProgress, ProgressionError> {
    let total_xp = u64::try_from(total_xp).map_err(|_| ProgressionError::NegativeTotalXp(total_xp))?;
    Ok(table.progress_for(total_xp))
}
