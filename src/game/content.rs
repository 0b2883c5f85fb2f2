//! Static game content: classes, the quest pool, skills, zones and achievements.
//!
//! The engine never reaches for a global table; it is handed a [`Catalog`] at
//! construction. [`Catalog::standard`] is the shipped content, tests build small
//! fixture catalogs, and [`crate::game::seed_loader`] reads overrides from JSON.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::game::errors::GameError;
use crate::game::types::{Category, StatId};

// ============================================================================
// Definitions
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassDefinition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub quote: String,
    /// Human-readable description of the class perk.
    #[serde(default)]
    pub bonus: String,
    /// Stat raised by [`CLASS_BONUS_AMOUNT`] once, at character creation.
    pub bonus_stat: StatId,
    #[serde(default)]
    pub xp_multipliers: BTreeMap<Category, f64>,
    /// Scales energy and focus lost when surrendering to a distraction.
    #[serde(default)]
    pub distraction_multiplier: Option<f64>,
}

pub const CLASS_BONUS_AMOUNT: i32 = 5;

impl ClassDefinition {
    pub fn new(id: &str, name: &str, bonus_stat: StatId) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            icon: String::new(),
            quote: String::new(),
            bonus: String::new(),
            bonus_stat,
            xp_multipliers: BTreeMap::new(),
            distraction_multiplier: None,
        }
    }

    pub fn with_flavor(mut self, icon: &str, quote: &str, bonus: &str) -> Self {
        self.icon = icon.to_string();
        self.quote = quote.to_string();
        self.bonus = bonus.to_string();
        self
    }

    pub fn with_xp_multiplier(mut self, category: Category, factor: f64) -> Self {
        self.xp_multipliers.insert(category, factor);
        self
    }

    pub fn with_distraction_multiplier(mut self, factor: f64) -> Self {
        self.distraction_multiplier = Some(factor);
        self
    }

    pub fn xp_multiplier(&self, category: Category) -> Option<f64> {
        self.xp_multipliers.get(&category).copied()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatBoost {
    pub stat: StatId,
    pub amount: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuestDefinition {
    pub id: String,
    pub text: String,
    /// Base XP before class and skill multipliers.
    pub xp: u32,
    pub category: Category,
    #[serde(default)]
    pub stat_boosts: Vec<StatBoost>,
}

impl QuestDefinition {
    pub fn new(id: &str, text: &str, xp: u32, category: Category) -> Self {
        Self {
            id: id.to_string(),
            text: text.to_string(),
            xp,
            category,
            stat_boosts: Vec::new(),
        }
    }

    pub fn with_boost(mut self, stat: StatId, amount: i32) -> Self {
        self.stat_boosts.push(StatBoost { stat, amount });
        self
    }
}

/// Passive modifier granted by an unlocked skill.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkillEffect {
    /// Scales XP earned in one category.
    XpMultiplier { category: Category, factor: f64 },
    /// Scales both energy and focus lost to a distraction.
    DistractionMitigation { factor: f64 },
    /// Cancels the energy loss of a distraction entirely when it is at most
    /// `threshold` after every other mitigation. All or nothing.
    MinorLossImmunity { threshold: u32 },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SkillDefinition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    pub cost: u32,
    pub effect: SkillEffect,
}

impl SkillDefinition {
    pub fn new(id: &str, name: &str, cost: u32, effect: SkillEffect) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            icon: String::new(),
            cost,
            effect,
        }
    }

    pub fn with_flavor(mut self, icon: &str, description: &str) -> Self {
        self.icon = icon.to_string();
        self.description = description.to_string();
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Zone {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    pub level_req: u32,
}

impl Zone {
    pub fn new(id: &str, name: &str, level_req: u32) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            icon: String::new(),
            level_req,
        }
    }

    pub fn with_flavor(mut self, icon: &str, description: &str) -> Self {
        self.icon = icon.to_string();
        self.description = description.to_string();
        self
    }
}

/// Monotonic predicate over player state; once true it stays true.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AchievementCondition {
    TotalXp { amount: u32 },
    DistractionsDefeated { count: u32 },
    CategoryQuestsCompleted { category: Category, count: u32 },
    LevelReached { level: u32 },
    StudyStreak { days: u32 },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AchievementDefinition {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub icon: String,
    pub condition: AchievementCondition,
}

impl AchievementDefinition {
    pub fn new(id: &str, text: &str, icon: &str, condition: AchievementCondition) -> Self {
        Self {
            id: id.to_string(),
            text: text.to_string(),
            icon: icon.to_string(),
            condition,
        }
    }
}

// ============================================================================
// Catalog
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Catalog {
    pub classes: Vec<ClassDefinition>,
    pub quests: Vec<QuestDefinition>,
    pub skills: Vec<SkillDefinition>,
    /// Sorted ascending by `level_req`.
    pub zones: Vec<Zone>,
    #[serde(default)]
    pub achievements: Vec<AchievementDefinition>,
    #[serde(default)]
    pub monster_names: Vec<String>,
    #[serde(default)]
    pub motivational: Vec<String>,
}

impl Catalog {
    pub fn class(&self, id: &str) -> Option<&ClassDefinition> {
        self.classes.iter().find(|c| c.id == id)
    }

    pub fn quest(&self, id: &str) -> Option<&QuestDefinition> {
        self.quests.iter().find(|q| q.id == id)
    }

    pub fn skill(&self, id: &str) -> Option<&SkillDefinition> {
        self.skills.iter().find(|s| s.id == id)
    }

    pub fn achievement(&self, id: &str) -> Option<&AchievementDefinition> {
        self.achievements.iter().find(|a| a.id == id)
    }

    /// Index of the highest zone whose requirement is met at `level`, or `None`
    /// if even the first zone is out of reach.
    pub fn zone_index_for_level(&self, level: u32) -> Option<usize> {
        self.zones.iter().rposition(|z| level >= z.level_req)
    }

    /// Check the structural assumptions the engine relies on.
    pub fn validate(&self) -> Result<(), GameError> {
        if self.classes.is_empty() {
            return Err(GameError::InvalidCatalog("no classes defined".to_string()));
        }
        if self.quests.is_empty() {
            return Err(GameError::InvalidCatalog("quest pool is empty".to_string()));
        }
        if self.zones.is_empty() {
            return Err(GameError::InvalidCatalog("no zones defined".to_string()));
        }
        if self
            .zones
            .windows(2)
            .any(|pair| pair[0].level_req > pair[1].level_req)
        {
            return Err(GameError::InvalidCatalog(
                "zones must be sorted by level requirement".to_string(),
            ));
        }

        for class in &self.classes {
            for factor in class.xp_multipliers.values() {
                check_factor("class", &class.id, *factor)?;
            }
            if let Some(factor) = class.distraction_multiplier {
                check_factor("class", &class.id, factor)?;
            }
        }
        for skill in &self.skills {
            match skill.effect {
                SkillEffect::XpMultiplier { factor, .. }
                | SkillEffect::DistractionMitigation { factor } => {
                    check_factor("skill", &skill.id, factor)?
                }
                SkillEffect::MinorLossImmunity { .. } => {}
            }
        }

        check_unique("class", self.classes.iter().map(|c| c.id.as_str()))?;
        check_unique("quest", self.quests.iter().map(|q| q.id.as_str()))?;
        check_unique("skill", self.skills.iter().map(|s| s.id.as_str()))?;
        check_unique("zone", self.zones.iter().map(|z| z.id.as_str()))?;
        check_unique(
            "achievement",
            self.achievements.iter().map(|a| a.id.as_str()),
        )?;
        Ok(())
    }

    /// The content the application ships with.
    pub fn standard() -> Self {
        use Category::*;
        use StatId::*;

        let classes = vec![
            ClassDefinition::new("scholar", "Scholar", Intelligence)
                .with_flavor("📚", "Knowledge is your weapon.", "+20% XP from study sessions.")
                .with_xp_multiplier(Study, 1.2),
            ClassDefinition::new("coder", "Coder", Intelligence)
                .with_flavor("💻", "You build worlds with logic.", "+30% XP from coding tasks.")
                .with_xp_multiplier(Coding, 1.3),
            ClassDefinition::new("warrior", "Warrior", Strength)
                .with_flavor("💪", "Strength through discipline.", "+30% XP from workouts.")
                .with_xp_multiplier(Workout, 1.3),
            ClassDefinition::new("monk", "Monk", StatId::Focus)
                .with_flavor("🧘", "Focus is power.", "Reduced distraction penalties.")
                .with_distraction_multiplier(0.5),
        ];

        let quests = vec![
            QuestDefinition::new("study60", "Study for 60 minutes", 60, Study)
                .with_boost(Intelligence, 5),
            QuestDefinition::new("codeChallenge", "Complete one coding challenge", 40, Coding)
                .with_boost(Intelligence, 3),
            QuestDefinition::new("read15", "Read 15 pages", 30, Study)
                .with_boost(Intelligence, 2)
                .with_boost(StatId::Focus, 1),
            QuestDefinition::new("exercise30", "Exercise for 30 minutes", 20, Workout)
                .with_boost(Strength, 5)
                .with_boost(Energy, 3),
            QuestDefinition::new("noDistract2h", "Avoid distractions for 2 hours", 50, Category::Focus)
                .with_boost(StatId::Focus, 4)
                .with_boost(Discipline, 3),
            QuestDefinition::new("meditate15", "Meditate for 15 minutes", 25, Category::Focus)
                .with_boost(StatId::Focus, 3)
                .with_boost(Discipline, 2),
            QuestDefinition::new("journal", "Write in your journal", 20, Study)
                .with_boost(Intelligence, 1)
                .with_boost(StatId::Focus, 2),
            QuestDefinition::new("codeProject", "Work on a project for 45 minutes", 50, Coding)
                .with_boost(Intelligence, 4),
            QuestDefinition::new("pushups50", "Do 50 push-ups", 15, Workout)
                .with_boost(Strength, 3),
            QuestDefinition::new("earlyWake", "Wake up before 7 AM", 30, Category::Focus)
                .with_boost(Discipline, 4)
                .with_boost(Energy, 2),
        ];

        let skills = vec![
            SkillDefinition::new(
                "studyMastery",
                "Study Mastery",
                1,
                SkillEffect::XpMultiplier {
                    category: Study,
                    factor: 1.1,
                },
            )
            .with_flavor("📖", "Increases study XP by 10%."),
            SkillDefinition::new(
                "focusShield",
                "Focus Shield",
                1,
                SkillEffect::DistractionMitigation { factor: 0.7 },
            )
            .with_flavor("🛡️", "Reduces distraction damage."),
            SkillDefinition::new(
                "ironDiscipline",
                "Iron Discipline",
                2,
                SkillEffect::MinorLossImmunity { threshold: 5 },
            )
            .with_flavor("⚔️", "Energy does not drop for minor distractions."),
            SkillDefinition::new(
                "codingGenius",
                "Coding Genius",
                2,
                SkillEffect::XpMultiplier {
                    category: Coding,
                    factor: 1.15,
                },
            )
            .with_flavor("🧬", "Increases coding XP by 15%."),
        ];

        let zones = vec![
            Zone::new("beginner", "Beginner Village", 1).with_flavor("🏠", "Every hero begins here."),
            Zone::new("focus", "Focus Forest", 3).with_flavor("🌳", "Only disciplined minds survive."),
            Zone::new("discipline", "Discipline Desert", 6)
                .with_flavor("🏜️", "The grind tests your endurance."),
            Zone::new("mastery", "Mastery Mountain", 10).with_flavor("⛰️", "Few reach this peak."),
            Zone::new("legend", "Legend Kingdom", 15)
                .with_flavor("👑", "You are no longer a beginner."),
        ];

        let achievements = vec![
            AchievementDefinition::new(
                "streak7",
                "7-Day Study Streak Unlocked!",
                "🔥",
                AchievementCondition::StudyStreak { days: 7 },
            ),
            AchievementDefinition::new(
                "codingWarrior",
                "Coding Warrior Achievement Earned!",
                "⚔️",
                AchievementCondition::CategoryQuestsCompleted {
                    category: Coding,
                    count: 5,
                },
            ),
            AchievementDefinition::new(
                "distractSlayer",
                "Distraction Slayer Badge!",
                "🛡️",
                AchievementCondition::DistractionsDefeated { count: 5 },
            ),
            AchievementDefinition::new(
                "xp100",
                "100 XP Milestone Reached!",
                "⭐",
                AchievementCondition::TotalXp { amount: 100 },
            ),
            AchievementDefinition::new(
                "legend",
                "Legend Rank Achieved!",
                "👑",
                AchievementCondition::LevelReached { level: 15 },
            ),
        ];

        let monster_names = [
            "Scroll Demon",
            "Tab Hydra",
            "Notification Wraith",
            "Procrastination Golem",
            "Binge-Watch Specter",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        let motivational = [
            "Small actions build great legends.",
            "Grind now, shine later.",
            "Discipline beats motivation.",
            "Level up or stay average.",
            "You are building your future.",
            "The grind is the glory.",
            "Champions are built in silence.",
            "Your future self is watching.",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        Catalog {
            classes,
            quests,
            skills,
            zones,
            achievements,
            monster_names,
            motivational,
        }
    }
}

/// Multipliers feed a float-to-integer cast, so they must be finite and
/// non-negative.
fn check_factor(kind: &str, id: &str, factor: f64) -> Result<(), GameError> {
    if factor.is_finite() && factor >= 0.0 {
        Ok(())
    } else {
        Err(GameError::InvalidCatalog(format!(
            "{} {} has invalid multiplier {}",
            kind, id, factor
        )))
    }
}

fn check_unique<'a>(kind: &str, ids: impl Iterator<Item = &'a str>) -> Result<(), GameError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(GameError::InvalidCatalog(format!(
                "duplicate {} id: {}",
                kind, id
            )));
        }
    }
    Ok(())
}
