//! Quest board view over the rules engine.
//!
//! Joins today's quest ids against the catalog and the completion set, and
//! forwards completions to the engine.

use crate::game::content::QuestDefinition;
use crate::game::engine::RulesEngine;
use crate::game::types::XpGain;

/// One row of today's board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestEntry {
    pub definition: QuestDefinition,
    pub completed: bool,
}

pub struct QuestBoard<'a> {
    engine: &'a mut RulesEngine,
}

impl<'a> QuestBoard<'a> {
    pub fn new(engine: &'a mut RulesEngine) -> Self {
        Self { engine }
    }

    /// Today's quests in board order. Ids the catalog no longer knows are skipped.
    pub fn today_quests(&self) -> Vec<QuestEntry> {
        let state = self.engine.state();
        state
            .today_quests
            .iter()
            .filter_map(|id| self.engine.catalog().quest(id))
            .map(|definition| QuestEntry {
                definition: definition.clone(),
                completed: state.is_completed_today(&definition.id),
            })
            .collect()
    }

    pub fn complete_quest(&mut self, quest_id: &str) -> Option<XpGain> {
        self.engine.complete_quest(quest_id)
    }

    pub fn completed_count(&self) -> usize {
        self.today_quests().iter().filter(|q| q.completed).count()
    }

    pub fn total_count(&self) -> usize {
        self.today_quests().len()
    }

    /// True once every quest on a non-empty board is done.
    pub fn all_complete(&self) -> bool {
        let quests = self.today_quests();
        !quests.is_empty() && quests.iter().all(|q| q.completed)
    }
}

/// Render the board, one numbered line per quest.
pub fn format_quest_list(entries: &[QuestEntry]) -> String {
    if entries.is_empty() {
        return "No quests today.".to_string();
    }
    let done = entries.iter().filter(|q| q.completed).count();
    let mut output = format!("=== TODAY'S QUESTS ({}/{}) ===\n", done, entries.len());
    for (idx, entry) in entries.iter().enumerate() {
        let status = if entry.completed { "✓" } else { " " };
        output.push_str(&format!(
            "{}. [{}] {} (+{} XP, {}) [{}]\n",
            idx + 1,
            status,
            entry.definition.text,
            entry.definition.xp,
            entry.definition.category.label(),
            entry.definition.id
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::backends::MemoryBackend;
    use crate::game::content::Catalog;
    use crate::game::storage::StateStore;

    fn engine() -> RulesEngine {
        RulesEngine::new(Catalog::standard(), StateStore::open(MemoryBackend::new())).with_seed(11)
    }

    #[test]
    fn board_tracks_completion() {
        let mut engine = engine();
        engine.generate_daily_quests();
        let mut board = QuestBoard::new(&mut engine);
        assert_eq!(board.total_count(), 5);
        assert_eq!(board.completed_count(), 0);
        assert!(!board.all_complete());

        let ids: Vec<String> = board
            .today_quests()
            .iter()
            .map(|q| q.definition.id.clone())
            .collect();
        assert!(board.complete_quest(&ids[1]).is_some());
        let entries = board.today_quests();
        assert!(entries[1].completed);
        assert!(!entries[0].completed);

        for id in &ids {
            board.complete_quest(id);
        }
        assert!(board.all_complete());
        assert!(format_quest_list(&board.today_quests()).contains("(5/5)"));
    }

    #[test]
    fn empty_board_is_not_complete() {
        let mut engine = engine();
        let board = QuestBoard::new(&mut engine);
        assert!(!board.all_complete());
        assert_eq!(format_quest_list(&board.today_quests()), "No quests today.");
    }
}
