//! Quest board, skill tree and combat views driving a real engine.
mod common;

use common::{day, engine_with, fixture_catalog, standard_engine};
use reallife_rpg::game::{
    evaluate_boss, format_boss_info, Combat, MemoryBackend, QuestBoard, SkillTree, StatId,
};

#[test]
fn test_quest_board_lists_today_in_board_order() {
    let (mut engine, _) = engine_with(fixture_catalog(), MemoryBackend::new(), day(2026, 10, 18));
    engine.create_character("Ada", "plain").unwrap();
    engine.begin_session();
    let board_ids = engine.state().today_quests.clone();

    let mut board = QuestBoard::new(&mut engine);
    let listed: Vec<String> = board
        .today_quests()
        .into_iter()
        .map(|entry| entry.definition.id)
        .collect();
    assert_eq!(listed, board_ids);

    let gain = board.complete_quest("code").expect("code is on the board");
    assert_eq!(gain.xp_gained, 40);
    assert_eq!(board.completed_count(), 1);
    assert_eq!(board.total_count(), 3);
    assert!(board.complete_quest("code").is_none());

    board.complete_quest("read");
    board.complete_quest("run");
    assert!(board.all_complete());
}

#[test]
fn test_skill_tree_affordability_follows_points() {
    let (mut engine, _, _) = standard_engine();
    let mut tree = SkillTree::new(&mut engine);
    assert_eq!(tree.available_points(), 0);
    assert!(tree.skills().iter().all(|node| !node.can_afford && !node.unlocked));
    assert!(!tree.unlock("studyMastery"));

    engine.add_xp(300, reallife_rpg::game::Category::Study);
    let mut tree = SkillTree::new(&mut engine);
    assert_eq!(tree.available_points(), 2);
    assert!(tree.unlock("codingGenius"));
    let nodes = tree.skills();
    let genius = nodes
        .iter()
        .find(|node| node.definition.id == "codingGenius")
        .unwrap();
    assert!(genius.unlocked);
    assert_eq!(tree.available_points(), 0);
}

#[test]
fn test_combat_preview_agrees_with_attack() {
    let (mut engine, _, _) = standard_engine();
    engine.modify_stat(StatId::Intelligence, 40);
    engine.modify_stat(StatId::Discipline, 10);

    let info = Combat::new(&mut engine).boss_info();
    let expected = evaluate_boss(engine.state());
    assert_eq!(info.preparation, 80);
    assert_eq!(info.threshold, 65);
    assert!(info.ready);
    assert_eq!(info.player_power, 100);
    assert_eq!(info.ready, expected.success);

    let outcome = Combat::new(&mut engine).attack_boss().expect("boss still standing");
    assert!(outcome.success);
    assert!(engine.state().boss_defeated);
}

#[test]
fn test_second_boss_attack_grants_nothing() {
    let (mut engine, _, _) = standard_engine();
    engine.modify_stat(StatId::Intelligence, 40);
    engine.modify_stat(StatId::Discipline, 10);

    let mut combat = Combat::new(&mut engine);
    assert!(combat.attack_boss().is_some());
    assert!(combat.boss_info().defeated);
    let total_xp = engine.state().total_xp;
    assert_eq!(total_xp, 200);

    let mut combat = Combat::new(&mut engine);
    assert!(combat.attack_boss().is_none());
    assert!(format_boss_info(&combat.boss_info()).contains("Boss Already Defeated!"));
    assert_eq!(engine.state().total_xp, total_xp);
}

#[test]
fn test_combat_power_is_a_rounded_percentage() {
    let (mut engine, _, _) = standard_engine();
    // 10 + 10 + 10 = 30 against 65
    let info = Combat::new(&mut engine).boss_info();
    assert_eq!(info.player_power, 46);
    assert!(!info.ready);
}

#[test]
fn test_monster_names_come_from_the_catalog() {
    let (mut engine, _) = engine_with(fixture_catalog(), MemoryBackend::new(), day(2026, 10, 18));
    let mut combat = Combat::new(&mut engine);
    for _ in 0..10 {
        assert_eq!(combat.random_monster(), Some("Doomscroll"));
    }
    assert!(combat.flee().is_victory());
    assert!(!combat.surrender().is_victory());
}
