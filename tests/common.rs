//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use std::rc::Rc;

use chrono::NaiveDate;
use reallife_rpg::game::{
    Catalog, Category, ClassDefinition, FixedClock, MemoryBackend, QuestDefinition, RulesEngine,
    SaveBackend, SkillDefinition, SkillEffect, StatId, StateStore, Zone,
};

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// Small catalog whose numbers make thresholds easy to hit exactly.
pub fn fixture_catalog() -> Catalog {
    Catalog {
        classes: vec![
            ClassDefinition::new("plain", "Plain", StatId::Discipline),
            ClassDefinition::new("half", "Half", StatId::Focus).with_distraction_multiplier(0.5),
            ClassDefinition::new("sixty", "Sixty", StatId::Focus).with_distraction_multiplier(0.6),
        ],
        quests: vec![
            QuestDefinition::new("read", "Read", 30, Category::Study).with_boost(StatId::Intelligence, 2),
            QuestDefinition::new("code", "Code", 40, Category::Coding).with_boost(StatId::Intelligence, 3),
            QuestDefinition::new("run", "Run", 20, Category::Workout).with_boost(StatId::Strength, 5),
        ],
        skills: vec![SkillDefinition::new(
            "ironDiscipline",
            "Iron Discipline",
            1,
            SkillEffect::MinorLossImmunity { threshold: 5 },
        )],
        zones: vec![Zone::new("start", "Start", 1), Zone::new("next", "Next", 2)],
        achievements: Vec::new(),
        monster_names: vec!["Doomscroll".to_string()],
        motivational: vec!["Keep going.".to_string()],
    }
}

/// Engine on a fixed clock over `backend`, seeded for a reproducible board.
pub fn engine_with(
    catalog: Catalog,
    backend: impl SaveBackend + 'static,
    today: NaiveDate,
) -> (RulesEngine, Rc<FixedClock>) {
    let clock = Rc::new(FixedClock::new(today));
    let engine = RulesEngine::new(catalog, StateStore::open(backend))
        .with_clock(clock.clone())
        .with_seed(2024);
    (engine, clock)
}

pub fn standard_engine() -> (RulesEngine, Rc<FixedClock>, MemoryBackend) {
    let backend = MemoryBackend::new();
    let (engine, clock) = engine_with(Catalog::standard(), backend.clone(), day(2026, 10, 18));
    (engine, clock, backend)
}
