//! End-to-end checks of the progression rules against in-memory saves.
mod common;

use common::{day, engine_with, fixture_catalog, standard_engine};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use reallife_rpg::game::{
    BossOutcome, Catalog, Category, DistractionOutcome, MemoryBackend, StatId, XpGain,
};

fn seeded_save(json: &str) -> MemoryBackend {
    MemoryBackend::with_contents(json)
}

#[test]
fn test_xp_never_reaches_threshold_after_grants() {
    let (mut engine, _, _) = standard_engine();
    let mut rng = StdRng::seed_from_u64(99);
    let mut last_total = 0;

    for i in 0..500 {
        let amount = rng.gen_range(0..=1_000);
        let category = Category::ALL[i % Category::ALL.len()];
        engine.add_xp(amount, category);

        let state = engine.state();
        assert!(state.xp < state.xp_to_next, "grant {} broke xp invariant", i);
        assert_eq!(state.xp_to_next, state.level * 100);
        assert!(state.total_xp >= last_total);
        last_total = state.total_xp;
        for stat in StatId::ALL {
            assert!(state.stats.get(stat) <= 100);
        }
    }
}

#[test]
fn test_leveling_consumes_overflow() {
    let (mut engine, _, _) = standard_engine();
    let gain = engine.add_xp(350, Category::Study);
    assert_eq!(
        gain,
        XpGain {
            xp_gained: 350,
            leveled_up: true
        }
    );
    let state = engine.state();
    assert_eq!(state.level, 3);
    assert_eq!(state.xp, 50);
    assert_eq!(state.xp_to_next, 300);
    assert_eq!(state.skill_points, 2);

    let (mut engine, _, _) = standard_engine();
    engine.add_xp(250, Category::Study);
    let state = engine.state();
    assert_eq!((state.level, state.xp, state.xp_to_next), (2, 150, 200));
    assert_eq!(state.skill_points, 1);
}

#[test]
fn test_quest_completion_is_idempotent_per_day() {
    let (mut engine, _, _) = standard_engine();
    engine.begin_session();
    let quest_id = engine.state().today_quests[2].clone();

    assert!(engine.complete_quest(&quest_id).is_some());
    let snapshot = engine.state().clone();
    assert_eq!(engine.complete_quest(&quest_id), None);
    assert_eq!(engine.state(), &snapshot);
}

#[test]
fn test_modify_stat_clamps() {
    let (mut engine, _, _) = standard_engine();
    assert_eq!(engine.modify_stat(StatId::Energy, -1000), 0);
    assert_eq!(engine.state().stats.energy, 0);
    assert_eq!(engine.modify_stat(StatId::Strength, 1000), 100);
}

#[test]
fn test_iron_discipline_zeroes_loss_of_five() {
    let backend = seeded_save(r#"{"created":true,"character_class":"half","skill_points":1}"#);
    let (mut engine, _) = engine_with(fixture_catalog(), backend, day(2026, 10, 18));
    assert_eq!(engine.surrender_losses(), (5, 3));
    assert!(engine.unlock_skill("ironDiscipline"));

    let outcome = engine.fight_distraction(false);
    assert_eq!(
        outcome,
        DistractionOutcome::Surrendered {
            energy_loss: 0,
            focus_loss: 3
        }
    );
    assert_eq!(engine.state().stats.energy, 80);
    assert_eq!(engine.state().day_stats.distraction_loss, 0);
}

#[test]
fn test_iron_discipline_ignores_loss_of_six() {
    let backend = seeded_save(r#"{"created":true,"character_class":"sixty","skill_points":1}"#);
    let (mut engine, _) = engine_with(fixture_catalog(), backend, day(2026, 10, 18));
    assert!(engine.unlock_skill("ironDiscipline"));

    let outcome = engine.fight_distraction(false);
    assert_eq!(
        outcome,
        DistractionOutcome::Surrendered {
            energy_loss: 6,
            focus_loss: 3
        }
    );
    assert_eq!(engine.state().stats.energy, 74);
    assert_eq!(engine.state().day_stats.distraction_loss, 6);
}

#[test]
fn test_boss_failure_scenario() {
    let backend = seeded_save(
        r#"{"created":true,"level":10,
            "stats":{"energy":80,"intelligence":30,"strength":10,"focus":20,"discipline":15}}"#,
    );
    let (mut engine, _) = engine_with(Catalog::standard(), backend, day(2026, 10, 18));

    let outcome = engine.attempt_boss();
    assert_eq!(
        outcome,
        BossOutcome {
            success: false,
            preparation: 65,
            threshold: 110
        }
    );
    assert_eq!(engine.state().stats.energy, 60);
    assert!(!engine.state().boss_defeated);
}

#[test]
fn test_boss_victory_scenario() {
    let backend = seeded_save(
        r#"{"created":true,
            "stats":{"energy":80,"intelligence":50,"strength":10,"focus":40,"discipline":30}}"#,
    );
    let (mut engine, _) = engine_with(Catalog::standard(), backend.clone(), day(2026, 10, 18));

    let outcome = engine.attempt_boss();
    assert_eq!(
        outcome,
        BossOutcome {
            success: true,
            preparation: 120,
            threshold: 65
        }
    );
    let state = engine.state();
    assert!(state.boss_defeated);
    assert_eq!(state.total_xp, 200);
    assert_eq!((state.level, state.xp), (2, 100));
    assert_eq!(state.stats.intelligence, 65);
    assert_eq!(state.stats.discipline, 35);
    assert!(backend.contents().unwrap().contains("\"boss_defeated\":true"));
}

#[test]
fn test_daily_quests_are_distinct_and_capped() {
    let (mut engine, _, _) = standard_engine();
    for _ in 0..20 {
        engine.generate_daily_quests();
        let mut ids = engine.state().today_quests.clone();
        assert_eq!(ids.len(), 5);
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 5);
    }

    let (mut small, _) = engine_with(fixture_catalog(), MemoryBackend::new(), day(2026, 10, 18));
    small.generate_daily_quests();
    let mut ids = small.state().today_quests.clone();
    ids.sort();
    assert_eq!(ids, vec!["code", "read", "run"]);
}

#[test]
fn test_unlock_skill_rejections_leave_state_alone() {
    let (mut engine, _, _) = standard_engine();
    let before = engine.state().clone();
    assert!(!engine.unlock_skill("focusShield"));
    assert!(!engine.unlock_skill("nope"));
    assert_eq!(engine.state(), &before);
}

#[test]
fn test_achievements_accumulate_in_earning_order() {
    let (mut engine, _, _) = standard_engine();
    for _ in 0..5 {
        engine.fight_distraction(true);
    }
    engine.add_xp(100, Category::Workout);
    assert_eq!(engine.state().achievements, vec!["distractSlayer", "xp100"]);
    assert!(engine.check_achievements().is_empty());
}
