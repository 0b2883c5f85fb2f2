use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const SAVE_SCHEMA_VERSION: u8 = 1;

/// Lower and upper bound of every character stat.
pub const STAT_MIN: u32 = 0;
pub const STAT_MAX: u32 = 100;

/// `xp_to_next` is always `level * XP_PER_LEVEL`.
pub const XP_PER_LEVEL: u32 = 100;

/// Highest level a loaded save keeps; anything above is treated as corrupt.
pub const MAX_LEVEL: u32 = 10_000;

/// Size of the daily quest board.
pub const DAILY_QUEST_COUNT: usize = 5;

// ============================================================================
// Stats and Categories
// ============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum StatId {
    Energy,
    Intelligence,
    Strength,
    Focus,
    Discipline,
}

impl StatId {
    pub const ALL: [StatId; 5] = [
        StatId::Energy,
        StatId::Intelligence,
        StatId::Strength,
        StatId::Focus,
        StatId::Discipline,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            StatId::Energy => "Energy",
            StatId::Intelligence => "Intelligence",
            StatId::Strength => "Strength",
            StatId::Focus => "Focus",
            StatId::Discipline => "Discipline",
        }
    }
}

/// Activity category a quest (and the XP it grants) belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Study,
    Coding,
    Workout,
    Focus,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Study,
        Category::Coding,
        Category::Workout,
        Category::Focus,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Study => "Study",
            Category::Coding => "Coding",
            Category::Workout => "Workout",
            Category::Focus => "Focus",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Stats {
    pub energy: u32,
    pub intelligence: u32,
    pub strength: u32,
    pub focus: u32,
    pub discipline: u32,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            energy: 80,
            intelligence: 10,
            strength: 10,
            focus: 10,
            discipline: 10,
        }
    }
}

impl Stats {
    pub fn get(&self, stat: StatId) -> u32 {
        match stat {
            StatId::Energy => self.energy,
            StatId::Intelligence => self.intelligence,
            StatId::Strength => self.strength,
            StatId::Focus => self.focus,
            StatId::Discipline => self.discipline,
        }
    }

    fn slot_mut(&mut self, stat: StatId) -> &mut u32 {
        match stat {
            StatId::Energy => &mut self.energy,
            StatId::Intelligence => &mut self.intelligence,
            StatId::Strength => &mut self.strength,
            StatId::Focus => &mut self.focus,
            StatId::Discipline => &mut self.discipline,
        }
    }

    /// Add `delta` to a stat and clamp the result into `[STAT_MIN, STAT_MAX]`.
    /// Returns the new value.
    pub fn apply(&mut self, stat: StatId, delta: i32) -> u32 {
        let slot = self.slot_mut(stat);
        let next = (*slot as i64 + delta as i64).clamp(STAT_MIN as i64, STAT_MAX as i64);
        *slot = next as u32;
        *slot
    }

    /// Sum of the three stats a boss challenge is measured against.
    pub fn preparation(&self) -> u32 {
        self.intelligence + self.focus + self.discipline
    }

    fn clamp_all(&mut self) -> bool {
        let mut changed = false;
        for stat in StatId::ALL {
            let slot = self.slot_mut(stat);
            if *slot > STAT_MAX {
                *slot = STAT_MAX;
                changed = true;
            }
        }
        changed
    }
}

/// Per-day tallies shown on the daily summary; zeroed on day rollover.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DayStats {
    pub study: u32,
    pub coding: u32,
    pub workout: u32,
    pub focus: u32,
    pub distraction_loss: u32,
}

impl DayStats {
    pub fn xp_for(&self, category: Category) -> u32 {
        match category {
            Category::Study => self.study,
            Category::Coding => self.coding,
            Category::Workout => self.workout,
            Category::Focus => self.focus,
        }
    }

    pub fn record_xp(&mut self, category: Category, amount: u32) {
        let slot = match category {
            Category::Study => &mut self.study,
            Category::Coding => &mut self.coding,
            Category::Workout => &mut self.workout,
            Category::Focus => &mut self.focus,
        };
        *slot = slot.saturating_add(amount);
    }

    /// XP earned today across all categories (distraction loss is energy, not XP).
    pub fn total_xp(&self) -> u32 {
        Category::ALL.iter().map(|c| self.xp_for(*c)).sum()
    }
}

// ============================================================================
// Player State
// ============================================================================

/// The single save record. Every field falls back to the template value when a
/// save is missing it, so older saves keep loading as fields are added.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlayerState {
    pub name: String,
    pub character_class: Option<String>,
    pub created: bool,
    pub level: u32,
    pub xp: u32,
    pub xp_to_next: u32,
    pub skill_points: u32,
    pub stats: Stats,
    pub unlocked_skills: Vec<String>,
    /// Lifetime completion history, one entry per completion.
    pub completed_quests: Vec<String>,
    pub today_quests: Vec<String>,
    pub today_completed: Vec<String>,
    /// Earned achievement ids in the order they were earned.
    pub achievements: Vec<String>,
    pub current_zone: usize,
    pub day_stats: DayStats,
    pub total_xp: u32,
    pub distractions_defeated: u32,
    pub study_streak: u32,
    pub last_study_date: Option<NaiveDate>,
    pub last_play_date: Option<NaiveDate>,
    pub boss_defeated: bool,
    pub schema_version: u8,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            name: String::new(),
            character_class: None,
            created: false,
            level: 1,
            xp: 0,
            xp_to_next: XP_PER_LEVEL,
            skill_points: 0,
            stats: Stats::default(),
            unlocked_skills: Vec::new(),
            completed_quests: Vec::new(),
            today_quests: Vec::new(),
            today_completed: Vec::new(),
            achievements: Vec::new(),
            current_zone: 0,
            day_stats: DayStats::default(),
            total_xp: 0,
            distractions_defeated: 0,
            study_streak: 0,
            last_study_date: None,
            last_play_date: None,
            boss_defeated: false,
            schema_version: SAVE_SCHEMA_VERSION,
        }
    }
}

impl PlayerState {
    pub fn is_new_player(&self) -> bool {
        !self.created
    }

    pub fn has_skill(&self, skill_id: &str) -> bool {
        self.unlocked_skills.iter().any(|s| s == skill_id)
    }

    pub fn has_achievement(&self, achievement_id: &str) -> bool {
        self.achievements.iter().any(|a| a == achievement_id)
    }

    pub fn is_completed_today(&self, quest_id: &str) -> bool {
        self.today_completed.iter().any(|q| q == quest_id)
    }

    pub fn is_on_today_board(&self, quest_id: &str) -> bool {
        self.today_quests.iter().any(|q| q == quest_id)
    }

    /// Progress through the current level as a percentage in `[0, 100)`.
    pub fn xp_progress(&self) -> f64 {
        if self.xp_to_next == 0 {
            return 0.0;
        }
        self.xp as f64 / self.xp_to_next as f64 * 100.0
    }

    /// Restore the structural invariants a hand-edited or partially merged save
    /// may have broken. Returns true when anything was changed.
    pub fn repair(&mut self) -> bool {
        let before = self.clone();

        self.level = self.level.clamp(1, MAX_LEVEL);
        self.xp_to_next = self.level.saturating_mul(XP_PER_LEVEL);
        self.stats.clamp_all();

        dedup_in_order(&mut self.unlocked_skills);
        dedup_in_order(&mut self.achievements);
        dedup_in_order(&mut self.today_quests);
        self.today_quests.truncate(DAILY_QUEST_COUNT);
        dedup_in_order(&mut self.today_completed);
        let board = self.today_quests.clone();
        self.today_completed.retain(|q| board.contains(q));
        self.schema_version = SAVE_SCHEMA_VERSION;

        *self != before
    }
}

fn dedup_in_order(ids: &mut Vec<String>) {
    let mut seen = HashSet::new();
    ids.retain(|id| seen.insert(id.clone()));
}

// ============================================================================
// Operation Results
// ============================================================================

/// Outcome of granting XP.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XpGain {
    /// XP actually credited after class and skill multipliers.
    pub xp_gained: u32,
    pub leveled_up: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistractionOutcome {
    Resisted { discipline_gain: u32 },
    Surrendered { energy_loss: u32, focus_loss: u32 },
}

impl DistractionOutcome {
    pub fn is_victory(&self) -> bool {
        matches!(self, DistractionOutcome::Resisted { .. })
    }
}

/// Inputs and result of a boss comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BossOutcome {
    pub success: bool,
    pub preparation: u32,
    pub threshold: u32,
}
