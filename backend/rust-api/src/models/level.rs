use serde::{Deserialize, Serialize};

/// (min_xp, level) pairs used when no level table is configured.
pub const DEFAULT_LEVEL_THRESHOLDS: [(u64, u32); 10] = [
    (0, 1),
    (100, 2),
    (300, 3),
    (600, 4),
    (1000, 5),
    (1500, 6),
    (2100, 7),
    (2800, 8),
    (3600, 9),
    (4500, 10),
];

/// Inclusive lower bound of a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelThreshold {
    pub min_xp: u64,
    pub level: u32,
}

/// Where a total XP value sits inside the level table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelProgress {
    pub level: u32,
    pub total_xp: u64,
    pub xp_into_level: u64,
    /// XP still missing to reach the next level; `None` at max level
    pub xp_to_next_level: Option<u64>,
    /// Width of the current level band; `None` at max level
    pub xp_for_next_level: Option<u64>,
    pub is_max_level: bool,
}

#[derive(Debug, Deserialize)]
pub struct ResolveLevelRequest {
    pub total_xp: i64,
}

#[derive(Debug, Serialize)]
pub struct LevelTableResponse {
    pub levels: Vec<LevelThreshold>,
    pub max_level: u32,
}
