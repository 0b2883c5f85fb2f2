//! # reallife-rpg - progression engine for real-life quests
//!
//! Finish real-world tasks ("quests") in study, coding, workout and focus
//! categories to earn XP, level up a hero, unlock skills, and take on a boss
//! gated by your accumulated stats.
//!
//! ## Features
//!
//! - **Rules Engine**: XP multipliers, multi-level overflow, clamped stats, daily quest rotation, distraction and boss resolution.
//! - **Injected Content**: the engine takes a [`game::Catalog`]; ship the built-in one or load JSON overrides.
//! - **Deterministic Testing**: seedable RNG and a swappable [`game::Clock`] for day rollover.
//! - **Best-Effort Persistence**: JSON file (locked, atomic rename), sled or in-memory saves; partial saves merge onto defaults.
//! - **Observers**: listeners are notified in registration order after every save or reset.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use reallife_rpg::game::{Catalog, Category, JsonFileBackend, RulesEngine, StateStore};
//!
//! fn main() -> anyhow::Result<()> {
//!     let store = StateStore::open(JsonFileBackend::in_dir("./data"));
//!     let mut engine = RulesEngine::new(Catalog::standard(), store);
//!
//!     if engine.state().is_new_player() {
//!         engine.create_character("Ada", "coder")?;
//!     }
//!     engine.begin_session();
//!
//!     let gain = engine.add_xp(40, Category::Coding);
//!     println!("+{} XP, level {}", gain.xp_gained, engine.state().level);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`game`] - Catalog, player state, persistence, rules engine and facades
//! - [`config`] - TOML configuration for the binary
//! - [`validation`] - Hero name validation and log-safe escaping
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  Presentation   │ ← CLI (src/main.rs) or any host UI
//! └─────────────────┘
//!          │
//! ┌─────────────────┐
//! │    Facades      │ ← QuestBoard, SkillTree, Combat
//! └─────────────────┘
//!          │
//! ┌─────────────────┐
//! │  Rules Engine   │ ← mutate, then save once
//! └─────────────────┘
//!          │
//! ┌─────────────────┐
//! │   StateStore    │ ← backend + listeners
//! └─────────────────┘
//! ```

pub mod config;
pub mod game;
pub mod validation;
