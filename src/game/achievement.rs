//! Achievement evaluation.
//!
//! Conditions are monotonic over player state, so checking is idempotent: an
//! earned id is appended once, in the order it first became true, and never removed.

use log::info;

use crate::game::content::{AchievementCondition, AchievementDefinition, Catalog};
use crate::game::types::PlayerState;

/// Whether `condition` currently holds for `state`.
pub fn condition_met(catalog: &Catalog, state: &PlayerState, condition: &AchievementCondition) -> bool {
    match *condition {
        AchievementCondition::TotalXp { amount } => state.total_xp >= amount,
        AchievementCondition::DistractionsDefeated { count } => state.distractions_defeated >= count,
        AchievementCondition::CategoryQuestsCompleted { category, count } => {
            let done = state
                .completed_quests
                .iter()
                .filter_map(|id| catalog.quest(id))
                .filter(|q| q.category == category)
                .count();
            done >= count as usize
        }
        AchievementCondition::LevelReached { level } => state.level >= level,
        AchievementCondition::StudyStreak { days } => state.study_streak >= days,
    }
}

/// Append every newly satisfied achievement to `state.achievements`. Returns
/// the ids earned by this call.
pub fn check_achievements(catalog: &Catalog, state: &mut PlayerState) -> Vec<String> {
    let mut earned = Vec::new();
    for def in &catalog.achievements {
        if state.has_achievement(&def.id) {
            continue;
        }
        if condition_met(catalog, state, &def.condition) {
            info!("achievement earned: {}", def.id);
            state.achievements.push(def.id.clone());
            earned.push(def.id.clone());
        }
    }
    earned
}

/// One row of the achievement list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AchievementStatus<'a> {
    pub definition: &'a AchievementDefinition,
    pub earned: bool,
}

/// Every catalog achievement with its earned flag, in catalog order.
pub fn achievement_list<'a>(catalog: &'a Catalog, state: &PlayerState) -> Vec<AchievementStatus<'a>> {
    catalog
        .achievements
        .iter()
        .map(|definition| AchievementStatus {
            definition,
            earned: state.has_achievement(&definition.id),
        })
        .collect()
}

pub fn format_achievement_list(list: &[AchievementStatus<'_>]) -> String {
    if list.is_empty() {
        return "No achievements defined.".to_string();
    }
    let earned = list.iter().filter(|a| a.earned).count();
    let mut out = format!("Achievements ({}/{})\n", earned, list.len());
    for entry in list {
        let mark = if entry.earned { "[x]" } else { "[ ]" };
        out.push_str(&format!(
            "{} {} {}\n",
            mark, entry.definition.icon, entry.definition.text
        ));
    }
    out
}
