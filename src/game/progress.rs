//! Read-only progress views: the world map, the daily summary and the
//! character status sheet.

use crate::game::content::{Catalog, Zone};
use crate::game::types::{Category, PlayerState, StatId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneStatus {
    /// Passed through on the way to the current zone.
    Cleared,
    Current,
    Locked,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneView<'a> {
    pub zone: &'a Zone,
    pub status: ZoneStatus,
    /// Level requirement met.
    pub reached: bool,
}

pub fn world_map<'a>(catalog: &'a Catalog, state: &PlayerState) -> Vec<ZoneView<'a>> {
    catalog
        .zones
        .iter()
        .enumerate()
        .map(|(idx, zone)| {
            let status = if idx < state.current_zone {
                ZoneStatus::Cleared
            } else if idx == state.current_zone {
                ZoneStatus::Current
            } else {
                ZoneStatus::Locked
            };
            ZoneView {
                zone,
                status,
                reached: state.level >= zone.level_req,
            }
        })
        .collect()
}

pub fn format_world_map(views: &[ZoneView<'_>]) -> String {
    let mut output = String::from("=== WORLD MAP ===\n");
    for view in views {
        let tag = match view.status {
            ZoneStatus::Cleared => "cleared",
            ZoneStatus::Current => "you are here",
            ZoneStatus::Locked => "locked",
        };
        output.push_str(&format!(
            "{} {} (Lv{}) - {}\n",
            view.zone.icon, view.zone.name, view.zone.level_req, tag
        ));
    }
    output
}

/// Today's tallies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailySummary {
    pub per_category: Vec<(Category, u32)>,
    pub distraction_loss: u32,
    pub total_xp: u32,
    pub quests_completed: usize,
    pub quests_total: usize,
}

pub fn daily_summary(state: &PlayerState) -> DailySummary {
    DailySummary {
        per_category: Category::ALL
            .iter()
            .map(|c| (*c, state.day_stats.xp_for(*c)))
            .collect(),
        distraction_loss: state.day_stats.distraction_loss,
        total_xp: state.day_stats.total_xp(),
        quests_completed: state.today_completed.len(),
        quests_total: state.today_quests.len(),
    }
}

pub fn format_daily_summary(summary: &DailySummary) -> String {
    let mut output = String::from("=== TODAY ===\n");
    for (category, xp) in &summary.per_category {
        output.push_str(&format!("{}: {} XP\n", category.label(), xp));
    }
    output.push_str(&format!(
        "Distractions: -{} energy\nTotal: {} XP\nQuests: {}/{}\n",
        summary.distraction_loss, summary.total_xp, summary.quests_completed, summary.quests_total
    ));
    output
}

/// Character sheet: name, class, level bar and stats.
pub fn format_status(catalog: &Catalog, state: &PlayerState) -> String {
    if state.is_new_player() {
        return "No hero yet. Create one first.".to_string();
    }
    let class = state
        .character_class
        .as_deref()
        .and_then(|id| catalog.class(id));
    let class_label = class
        .map(|c| format!("{} {}", c.icon, c.name))
        .unwrap_or_else(|| "Adventurer".to_string());
    let zone = catalog
        .zones
        .get(state.current_zone)
        .map(|z| z.name.as_str())
        .unwrap_or("Unknown lands");

    let mut output = format!("=== {} the {} ===\n", state.name, class_label);
    output.push_str(&format!(
        "Level {} | XP {}/{} ({:.0}%) | Skill points {}\n",
        state.level,
        state.xp,
        state.xp_to_next,
        state.xp_progress(),
        state.skill_points
    ));
    output.push_str(&format!("Zone: {}\n", zone));
    for stat in StatId::ALL {
        output.push_str(&format!("{:<13}{:>3}\n", stat.label(), state.stats.get(stat)));
    }
    output.push_str(&format!(
        "Total XP {} | Distractions defeated {} | Study streak {}\n",
        state.total_xp, state.distractions_defeated, state.study_streak
    ));
    if state.boss_defeated {
        output.push_str("Boss defeated!\n");
    }
    output
}
