//! Progression engine: content catalog, player state and its persistence, the
//! rules engine, and the quest/skill/combat views presentation code drives.

pub mod achievement;
pub mod backends;
pub mod clock;
pub mod combat;
pub mod content;
pub mod engine;
pub mod errors;
pub mod progress;
pub mod quest;
pub mod seed_loader;
pub mod skill_tree;
pub mod storage;
pub mod types;

pub use achievement::{achievement_list, check_achievements, format_achievement_list, AchievementStatus};
pub use backends::{JsonFileBackend, MemoryBackend, SaveBackend, SledBackend};
pub use clock::{Clock, FixedClock, SystemClock};
pub use combat::{format_boss_info, format_distraction, BossInfo, Combat, BOSS_HP};
pub use content::{
    AchievementCondition, AchievementDefinition, Catalog, ClassDefinition, QuestDefinition,
    SkillDefinition, SkillEffect, StatBoost, Zone,
};
pub use engine::{evaluate_boss, RulesEngine};
pub use errors::GameError;
pub use progress::{
    daily_summary, format_daily_summary, format_status, format_world_map, world_map, DailySummary,
    ZoneStatus, ZoneView,
};
pub use quest::{format_quest_list, QuestBoard, QuestEntry};
pub use seed_loader::{load_catalog_from_json, parse_catalog};
pub use skill_tree::{format_skill_tree, SkillNode, SkillTree};
pub use storage::{load_state, StateStore};
pub use types::*;
