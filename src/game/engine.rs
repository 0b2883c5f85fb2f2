//! The progression rules engine.
//!
//! Every public mutating operation validates first, mutates the owned state,
//! then persists exactly once through the [`StateStore`] (which notifies
//! listeners). Internal steps such as XP grants inside a quest completion work
//! on the state directly so a single user action yields a single save.

use chrono::NaiveDate;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::game::achievement;
use crate::game::clock::{is_next_day, Clock, SystemClock};
use crate::game::content::{Catalog, SkillEffect, CLASS_BONUS_AMOUNT};
use crate::game::errors::GameError;
use crate::game::storage::StateStore;
use crate::game::types::{
    BossOutcome, Category, DayStats, DistractionOutcome, PlayerState, StatId, XpGain,
    DAILY_QUEST_COUNT, XP_PER_LEVEL,
};
use crate::validation::{escape_for_log, validate_hero_name, NameRules};

// ============================================================================
// Tuning
// ============================================================================

pub const LEVEL_UP_INTELLIGENCE: i32 = 5;
pub const LEVEL_UP_FOCUS: i32 = 3;

pub const RESIST_DISCIPLINE_GAIN: u32 = 3;
pub const RESIST_FOCUS_GAIN: u32 = 1;
pub const SURRENDER_ENERGY_LOSS: u32 = 10;
pub const SURRENDER_FOCUS_LOSS: u32 = 5;

pub const BOSS_BASE_THRESHOLD: u32 = 60;
pub const BOSS_THRESHOLD_PER_LEVEL: u32 = 5;
pub const BOSS_XP_REWARD: u32 = 200;
pub const BOSS_INTELLIGENCE_REWARD: i32 = 10;
pub const BOSS_DISCIPLINE_REWARD: i32 = 5;
pub const BOSS_ENERGY_PENALTY: i32 = 20;

pub const NEW_DAY_ENERGY: i32 = 30;

/// Multiply and round half away from zero.
pub(crate) fn scale(value: u32, factor: f64) -> u32 {
    (value as f64 * factor).round() as u32
}

/// Boss comparison for the given state. Shared by [`RulesEngine::attempt_boss`]
/// and the read-only combat view so both always agree.
pub fn evaluate_boss(state: &PlayerState) -> BossOutcome {
    let preparation = state.stats.preparation();
    let threshold = BOSS_BASE_THRESHOLD
        .saturating_add(state.level.saturating_mul(BOSS_THRESHOLD_PER_LEVEL));
    BossOutcome {
        success: preparation >= threshold,
        preparation,
        threshold,
    }
}

pub struct RulesEngine {
    store: StateStore,
    catalog: Catalog,
    clock: Box<dyn Clock>,
    rng: StdRng,
}

impl RulesEngine {
    /// Engine over `store` using the host's local date and an entropy-seeded RNG.
    /// The loaded zone is realigned with the loaded level; nothing is saved.
    pub fn new(catalog: Catalog, store: StateStore) -> Self {
        let mut engine = Self {
            store,
            catalog,
            clock: Box::new(SystemClock),
            rng: StdRng::from_entropy(),
        };
        engine.update_zone();
        engine
    }

    pub fn with_clock<C: Clock + 'static>(mut self, clock: C) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Deterministic quest rotation and flavor picks.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn state(&self) -> &PlayerState {
        self.store.state()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&PlayerState) + 'static,
    {
        self.store.subscribe(listener);
    }

    pub fn reset(&mut self) {
        info!("resetting progress");
        self.store.reset();
    }

    // ------------------------------------------------------------------------
    // Character
    // ------------------------------------------------------------------------

    pub fn create_character(&mut self, name: &str, class_id: &str) -> Result<(), GameError> {
        let name = validate_hero_name(name, &NameRules::default())?;
        let bonus_stat = self
            .catalog
            .class(class_id)
            .map(|c| c.bonus_stat)
            .ok_or_else(|| GameError::UnknownClass(class_id.to_string()))?;
        let today = self.clock.today();

        let state = self.store.state_mut();
        state.name = name;
        state.character_class = Some(class_id.to_string());
        state.created = true;
        state.last_play_date = Some(today);
        state.stats.apply(bonus_stat, CLASS_BONUS_AMOUNT);
        info!(
            "character created: {} ({})",
            escape_for_log(&state.name),
            class_id
        );
        self.store.persist();
        Ok(())
    }

    /// Start of a play session: roll the day over if needed and make sure a
    /// quest board exists. Returns whether a new day began.
    pub fn begin_session(&mut self) -> bool {
        let new_day = self.check_new_day();
        if self.store.state().today_quests.is_empty() {
            self.generate_daily_quests();
        }
        new_day
    }

    // ------------------------------------------------------------------------
    // XP and stats
    // ------------------------------------------------------------------------

    pub fn add_xp(&mut self, amount: u32, category: Category) -> XpGain {
        let gain = self.grant_xp(amount, category);
        self.store.persist();
        gain
    }

    /// Add `delta` to a stat, clamped to the stat range. Returns the new value.
    pub fn modify_stat(&mut self, stat: StatId, delta: i32) -> u32 {
        let value = self.store.state_mut().stats.apply(stat, delta);
        debug!("stat {} {:+} -> {}", stat.label(), delta, value);
        self.store.persist();
        value
    }

    fn multiplied_xp(&self, amount: u32, category: Category) -> u32 {
        let state = self.store.state();
        let mut xp = amount;

        let class_factor = state
            .character_class
            .as_deref()
            .and_then(|id| self.catalog.class(id))
            .and_then(|class| class.xp_multiplier(category));
        if let Some(factor) = class_factor {
            xp = scale(xp, factor);
        }

        for skill in &self.catalog.skills {
            if !state.has_skill(&skill.id) {
                continue;
            }
            if let SkillEffect::XpMultiplier {
                category: boosted,
                factor,
            } = skill.effect
            {
                if boosted == category {
                    xp = scale(xp, factor);
                }
            }
        }
        xp
    }

    /// XP pipeline without the final save.
    fn grant_xp(&mut self, amount: u32, category: Category) -> XpGain {
        let gained = self.multiplied_xp(amount, category);
        let today = self.clock.today();

        let state = self.store.state_mut();
        state.xp = state.xp.saturating_add(gained);
        state.total_xp = state.total_xp.saturating_add(gained);
        state.day_stats.record_xp(category, gained);
        if category == Category::Study && gained > 0 {
            record_study_day(state, today);
        }

        let mut leveled_up = false;
        while state.xp >= state.xp_to_next {
            state.xp -= state.xp_to_next;
            state.level = state.level.saturating_add(1);
            state.xp_to_next = state.level.saturating_mul(XP_PER_LEVEL);
            state.skill_points = state.skill_points.saturating_add(1);
            state.stats.apply(StatId::Intelligence, LEVEL_UP_INTELLIGENCE);
            state.stats.apply(StatId::Focus, LEVEL_UP_FOCUS);
            leveled_up = true;
        }
        if leveled_up {
            info!("level up: now level {}", state.level);
        }
        debug!(
            "granted {} {} xp (base {}), xp {}/{}",
            gained,
            category.label(),
            amount,
            state.xp,
            state.xp_to_next
        );

        self.update_zone();
        achievement::check_achievements(&self.catalog, self.store.state_mut());
        XpGain {
            xp_gained: gained,
            leveled_up,
        }
    }

    // ------------------------------------------------------------------------
    // Quests
    // ------------------------------------------------------------------------

    /// Credit a quest on today's board. `None` when it is unknown, not on the
    /// board, or already completed today.
    pub fn complete_quest(&mut self, quest_id: &str) -> Option<XpGain> {
        let state = self.store.state();
        if state.is_completed_today(quest_id) {
            debug!("quest {} already completed today", quest_id);
            return None;
        }
        let Some(quest) = self.catalog.quest(quest_id).cloned() else {
            debug!("unknown quest {}", quest_id);
            return None;
        };
        if !state.is_on_today_board(quest_id) {
            debug!("quest {} is not on today's board", quest_id);
            return None;
        }

        let state = self.store.state_mut();
        state.today_completed.push(quest.id.clone());
        state.completed_quests.push(quest.id.clone());
        for boost in &quest.stat_boosts {
            state.stats.apply(boost.stat, boost.amount);
        }
        let gain = self.grant_xp(quest.xp, quest.category);
        info!("quest {} completed for {} xp", quest.id, gain.xp_gained);
        self.store.persist();
        Some(gain)
    }

    pub fn generate_daily_quests(&mut self) {
        self.roll_daily_quests();
        self.store.persist();
    }

    fn roll_daily_quests(&mut self) {
        let mut ids: Vec<String> = self.catalog.quests.iter().map(|q| q.id.clone()).collect();
        ids.shuffle(&mut self.rng);
        ids.truncate(DAILY_QUEST_COUNT);
        debug!("daily quests: {}", ids.join(", "));

        let state = self.store.state_mut();
        state.today_quests = ids;
        state.today_completed.clear();
    }

    // ------------------------------------------------------------------------
    // Distractions and bosses
    // ------------------------------------------------------------------------

    pub fn fight_distraction(&mut self, resisted: bool) -> DistractionOutcome {
        let outcome = if resisted {
            let state = self.store.state_mut();
            state
                .stats
                .apply(StatId::Discipline, RESIST_DISCIPLINE_GAIN as i32);
            state.stats.apply(StatId::Focus, RESIST_FOCUS_GAIN as i32);
            state.distractions_defeated = state.distractions_defeated.saturating_add(1);
            achievement::check_achievements(&self.catalog, state);
            DistractionOutcome::Resisted {
                discipline_gain: RESIST_DISCIPLINE_GAIN,
            }
        } else {
            let (energy_loss, focus_loss) = self.surrender_losses();
            let state = self.store.state_mut();
            state.stats.apply(StatId::Energy, -(energy_loss as i32));
            state.stats.apply(StatId::Focus, -(focus_loss as i32));
            state.day_stats.distraction_loss =
                state.day_stats.distraction_loss.saturating_add(energy_loss);
            DistractionOutcome::Surrendered {
                energy_loss,
                focus_loss,
            }
        };
        debug!("distraction resolved: {:?}", outcome);
        self.store.persist();
        outcome
    }

    /// Energy and focus lost on surrender after class and skill mitigation.
    pub fn surrender_losses(&self) -> (u32, u32) {
        let state = self.store.state();
        let mut energy = SURRENDER_ENERGY_LOSS;
        let mut focus = SURRENDER_FOCUS_LOSS;

        let class_factor = state
            .character_class
            .as_deref()
            .and_then(|id| self.catalog.class(id))
            .and_then(|class| class.distraction_multiplier);
        if let Some(factor) = class_factor {
            energy = scale(energy, factor);
            focus = scale(focus, factor);
        }

        let effects: Vec<SkillEffect> = self
            .catalog
            .skills
            .iter()
            .filter(|skill| state.has_skill(&skill.id))
            .map(|skill| skill.effect)
            .collect();
        for effect in &effects {
            if let SkillEffect::DistractionMitigation { factor } = *effect {
                energy = scale(energy, factor);
                focus = scale(focus, factor);
            }
        }
        // all or nothing, judged after every other mitigation
        let immune = effects.iter().any(|effect| match *effect {
            SkillEffect::MinorLossImmunity { threshold } => energy <= threshold,
            _ => false,
        });
        if immune {
            energy = 0;
        }
        (energy, focus)
    }

    pub fn attempt_boss(&mut self) -> BossOutcome {
        let outcome = evaluate_boss(self.store.state());
        if outcome.success {
            self.store.state_mut().boss_defeated = true;
            self.grant_xp(BOSS_XP_REWARD, Category::Study);
            let stats = &mut self.store.state_mut().stats;
            stats.apply(StatId::Intelligence, BOSS_INTELLIGENCE_REWARD);
            stats.apply(StatId::Discipline, BOSS_DISCIPLINE_REWARD);
            info!(
                "boss defeated ({} vs {})",
                outcome.preparation, outcome.threshold
            );
        } else {
            self.store
                .state_mut()
                .stats
                .apply(StatId::Energy, -BOSS_ENERGY_PENALTY);
            info!(
                "boss attempt failed ({} vs {})",
                outcome.preparation, outcome.threshold
            );
        }
        self.store.persist();
        outcome
    }

    // ------------------------------------------------------------------------
    // Skills, zones, achievements
    // ------------------------------------------------------------------------

    pub fn unlock_skill(&mut self, skill_id: &str) -> bool {
        let Some(cost) = self.catalog.skill(skill_id).map(|s| s.cost) else {
            debug!("unknown skill {}", skill_id);
            return false;
        };
        let state = self.store.state_mut();
        if state.has_skill(skill_id) {
            debug!("skill {} already unlocked", skill_id);
            return false;
        }
        if state.skill_points < cost {
            debug!(
                "skill {} costs {}, only {} points available",
                skill_id, cost, state.skill_points
            );
            return false;
        }
        state.skill_points -= cost;
        state.unlocked_skills.push(skill_id.to_string());
        info!("skill unlocked: {}", skill_id);
        self.store.persist();
        true
    }

    /// Move to the highest zone the current level reaches. Does not persist;
    /// callers save as part of their own operation. When no zone qualifies the
    /// current zone is left alone.
    pub fn update_zone(&mut self) -> usize {
        let state = self.store.state_mut();
        if let Some(index) = self.catalog.zone_index_for_level(state.level) {
            if index != state.current_zone {
                info!("entered zone {}", self.catalog.zones[index].id);
                state.current_zone = index;
            }
        }
        state.current_zone
    }

    /// Award any newly satisfied achievements, saving only when one was earned.
    pub fn check_achievements(&mut self) -> Vec<String> {
        let earned = achievement::check_achievements(&self.catalog, self.store.state_mut());
        if !earned.is_empty() {
            self.store.persist();
        }
        earned
    }

    // ------------------------------------------------------------------------
    // Days
    // ------------------------------------------------------------------------

    /// Roll over to today's date if the last play date differs. Returns true
    /// when a rollover happened.
    pub fn check_new_day(&mut self) -> bool {
        let today = self.clock.today();
        if self.store.state().last_play_date == Some(today) {
            return false;
        }

        let state = self.store.state_mut();
        state.day_stats = DayStats::default();
        state.stats.apply(StatId::Energy, NEW_DAY_ENERGY);
        state.last_play_date = Some(today);
        self.roll_daily_quests();
        info!("new day {}, quest board refreshed", today);
        self.store.persist();
        true
    }

    // ------------------------------------------------------------------------
    // Flavor
    // ------------------------------------------------------------------------

    pub fn motivational_line(&mut self) -> Option<&str> {
        self.catalog
            .motivational
            .choose(&mut self.rng)
            .map(String::as_str)
    }

    pub fn random_monster(&mut self) -> Option<&str> {
        self.catalog
            .monster_names
            .choose(&mut self.rng)
            .map(String::as_str)
    }
}

fn record_study_day(state: &mut PlayerState, today: NaiveDate) {
    state.study_streak = match state.last_study_date {
        Some(last) if last == today => state.study_streak.max(1),
        Some(last) if is_next_day(last, today) => state.study_streak.saturating_add(1),
        _ => 1,
    };
    state.last_study_date = Some(today);
}
