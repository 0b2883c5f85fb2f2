//! Combat view: boss readiness for display plus the distraction and boss
//! commands.

use crate::game::engine::{evaluate_boss, RulesEngine};
use crate::game::types::{BossOutcome, DistractionOutcome};

/// Boss health shown before an attack; the fight itself is one comparison.
pub const BOSS_HP: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BossInfo {
    pub preparation: u32,
    pub threshold: u32,
    pub ready: bool,
    pub boss_hp: u32,
    /// Preparation as a share of the threshold, capped at 100.
    pub player_power: u32,
    pub defeated: bool,
}

pub struct Combat<'a> {
    engine: &'a mut RulesEngine,
}

impl<'a> Combat<'a> {
    pub fn new(engine: &'a mut RulesEngine) -> Self {
        Self { engine }
    }

    /// Read-only preview computed with the same formula as the real attempt.
    pub fn boss_info(&self) -> BossInfo {
        let outcome = evaluate_boss(self.engine.state());
        let power = if outcome.threshold == 0 {
            100
        } else {
            (outcome.preparation as f64 / outcome.threshold as f64 * 100.0).round() as u32
        };
        BossInfo {
            preparation: outcome.preparation,
            threshold: outcome.threshold,
            ready: outcome.success,
            boss_hp: BOSS_HP,
            player_power: power.min(100),
            defeated: self.engine.state().boss_defeated,
        }
    }

    /// Fight the boss. `None` once it has been defeated; the engine itself
    /// does not gate repeat attempts.
    pub fn attack_boss(&mut self) -> Option<BossOutcome> {
        if self.engine.state().boss_defeated {
            return None;
        }
        Some(self.engine.attempt_boss())
    }

    /// Resist the distraction.
    pub fn flee(&mut self) -> DistractionOutcome {
        self.engine.fight_distraction(true)
    }

    pub fn surrender(&mut self) -> DistractionOutcome {
        self.engine.fight_distraction(false)
    }

    pub fn random_monster(&mut self) -> Option<&str> {
        self.engine.random_monster()
    }
}

pub fn format_boss_info(info: &BossInfo) -> String {
    if info.defeated {
        return "=== BOSS ===\nBoss Already Defeated!\n".to_string();
    }
    let verdict = if info.ready {
        "You are ready."
    } else {
        "Train more before you strike."
    };
    format!(
        "=== BOSS ===\nBoss HP: {}\nYour power: {}%\nPreparation {} / {} needed\n{}\n",
        info.boss_hp, info.player_power, info.preparation, info.threshold, verdict
    )
}

pub fn format_distraction(monster: &str, outcome: &DistractionOutcome) -> String {
    match outcome {
        DistractionOutcome::Resisted { discipline_gain } => format!(
            "You resisted the {}! +{} discipline",
            monster, discipline_gain
        ),
        DistractionOutcome::Surrendered {
            energy_loss,
            focus_loss,
        } => format!(
            "The {} got you. -{} energy, -{} focus",
            monster, energy_loss, focus_loss
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::backends::MemoryBackend;
    use crate::game::content::Catalog;
    use crate::game::storage::StateStore;
    use crate::game::types::StatId;

    fn engine() -> RulesEngine {
        RulesEngine::new(Catalog::standard(), StateStore::open(MemoryBackend::new())).with_seed(3)
    }

    #[test]
    fn boss_info_matches_attempt() {
        let mut engine = engine();
        let info = Combat::new(&mut engine).boss_info();
        // 10 + 10 + 10 against 60 + 5
        assert_eq!((info.preparation, info.threshold, info.ready), (30, 65, false));
        assert_eq!(info.player_power, 46);
        assert_eq!(info.boss_hp, 100);

        let before = engine.state().clone();
        assert!(!info.defeated);
        let outcome = Combat::new(&mut engine).attack_boss().expect("boss still standing");
        assert_eq!(outcome.preparation, info.preparation);
        assert_eq!(outcome.threshold, info.threshold);
        assert_eq!(outcome.success, info.ready);
        assert_eq!(engine.state().stats.energy, before.stats.energy - 20);
    }

    #[test]
    fn power_caps_at_one_hundred() {
        let mut engine = engine();
        engine.modify_stat(StatId::Intelligence, 90);
        engine.modify_stat(StatId::Focus, 90);
        let info = Combat::new(&mut engine).boss_info();
        assert!(info.ready);
        assert_eq!(info.player_power, 100);
        assert!(format_boss_info(&info).contains("You are ready."));
    }

    #[test]
    fn defeated_boss_cannot_be_farmed() {
        let mut engine = engine();
        engine.modify_stat(StatId::Intelligence, 90);
        engine.modify_stat(StatId::Focus, 90);
        let first = Combat::new(&mut engine).attack_boss().expect("first fight");
        assert!(first.success);
        let after_win = engine.state().clone();

        let mut combat = Combat::new(&mut engine);
        assert!(combat.attack_boss().is_none());
        let info = combat.boss_info();
        assert!(info.defeated);
        assert_eq!(format_boss_info(&info), "=== BOSS ===\nBoss Already Defeated!\n");
        assert_eq!(engine.state(), &after_win);
    }

    #[test]
    fn flee_and_surrender_delegate() {
        let mut engine = engine();
        let mut combat = Combat::new(&mut engine);
        let monster = combat.random_monster().map(str::to_string).unwrap();
        assert!(Catalog::standard().monster_names.contains(&monster));

        assert!(combat.flee().is_victory());
        let outcome = combat.surrender();
        assert!(!outcome.is_victory());
        assert_eq!(
            format_distraction(&monster, &outcome),
            format!("The {} got you. -10 energy, -5 focus", monster)
        );
        assert_eq!(engine.state().distractions_defeated, 1);
    }
}
