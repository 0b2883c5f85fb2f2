//! Binary entrypoint for the reallife-rpg CLI.
//!
//! Commands:
//! - `init` - write a starter `config.toml`
//! - `create <name> <class>` - create the hero
//! - `status`, `quests`, `skills`, `map`, `summary`, `achievements` - read-only views
//! - `complete <quest>`, `unlock <skill>` - progress actions
//! - `resist`, `surrender` - resolve a distraction
//! - `boss [--attack]` - preview or fight the boss
//! - `reset --yes` - wipe the save
//!
//! Every command after `create` starts a session first, so the day rolls over
//! and a quest board exists before anything else happens.
use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use log::{info, warn};

use reallife_rpg::config::Config;
use reallife_rpg::game::{
    achievement_list, daily_summary, format_achievement_list, format_boss_info,
    format_daily_summary, format_distraction, format_quest_list, format_skill_tree, format_status,
    format_world_map, world_map, Combat, QuestBoard, RulesEngine, SkillTree, StateStore,
};

#[derive(Parser)]
#[command(name = "reallife-rpg")]
#[command(about = "Turn real-life study, coding and workouts into RPG progress")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration file
    Init,
    /// Create your hero
    Create {
        name: String,
        /// Class id (scholar, coder, warrior, monk)
        class: String,
    },
    /// Show the character sheet
    Status,
    /// Show today's quest board
    Quests,
    /// Complete a quest from today's board
    Complete { quest: String },
    /// Resist a distraction
    Resist,
    /// Give in to a distraction
    Surrender,
    /// Show boss readiness, or fight it
    Boss {
        #[arg(long)]
        attack: bool,
    },
    /// Show the skill tree
    Skills,
    /// Spend skill points on a skill
    Unlock { skill: String },
    /// Show the world map
    Map,
    /// Show today's totals
    Summary,
    /// List achievements
    Achievements,
    /// Erase all progress
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::Init = cli.command {
        init_logging(&None, cli.verbose);
        Config::create_default(&cli.config)?;
        println!("Wrote default configuration to {}", cli.config);
        return Ok(());
    }

    let config = match Config::load(&cli.config) {
        Ok(config) => Some(config),
        Err(e) => {
            init_logging(&None, cli.verbose);
            warn!("{}; using defaults", e);
            None
        }
    };
    if config.is_some() {
        init_logging(&config, cli.verbose);
    }
    let config = config.unwrap_or_default();

    let catalog = config.load_catalog()?;
    let store = StateStore::open_boxed(config.open_backend()?);
    let mut engine = RulesEngine::new(catalog, store);
    if let Some(seed) = config.game.seed {
        engine = engine.with_seed(seed);
    }

    match cli.command {
        Commands::Init => {}
        Commands::Create { name, class } => {
            if !engine.state().is_new_player() {
                bail!("A hero already exists. Use `reset --yes` to start over.");
            }
            engine.create_character(&name, &class)?;
            engine.begin_session();
            info!("New hero created");
            print!("{}", format_status(engine.catalog(), engine.state()));
            if let Some(line) = engine.motivational_line() {
                println!("\n{}", line);
            }
        }
        Commands::Reset { yes } => {
            if !yes {
                bail!("Refusing to reset without --yes");
            }
            engine.reset();
            println!("Progress erased.");
        }
        command => {
            if engine.state().is_new_player() {
                bail!("No hero yet. Run `reallife-rpg create <name> <class>` first.");
            }
            if engine.begin_session() {
                println!("A new day dawns. Energy restored, fresh quests await.\n");
            }
            run_command(&mut engine, command);
        }
    }

    Ok(())
}

fn run_command(engine: &mut RulesEngine, command: Commands) {
    match command {
        Commands::Status => {
            print!("{}", format_status(engine.catalog(), engine.state()));
            if let Some(line) = engine.motivational_line() {
                println!("\n{}", line);
            }
        }
        Commands::Quests => {
            let board = QuestBoard::new(engine);
            print!("{}", format_quest_list(&board.today_quests()));
        }
        Commands::Complete { quest } => {
            let mut board = QuestBoard::new(engine);
            match board.complete_quest(&quest) {
                Some(gain) => {
                    println!("Quest complete! +{} XP", gain.xp_gained);
                    if board.all_complete() {
                        println!("Every quest on today's board is done.");
                    }
                    if gain.leveled_up {
                        println!("LEVEL UP! You are now level {}.", engine.state().level);
                    }
                }
                None => println!(
                    "Cannot complete '{}': not on today's board or already done.",
                    quest
                ),
            }
        }
        Commands::Resist => resolve_distraction(engine, true),
        Commands::Surrender => resolve_distraction(engine, false),
        Commands::Boss { attack } => {
            let mut combat = Combat::new(engine);
            print!("{}", format_boss_info(&combat.boss_info()));
            if attack {
                match combat.attack_boss() {
                    Some(outcome) if outcome.success => println!(
                        "Victory! The boss falls. +200 XP, +10 intelligence, +5 discipline"
                    ),
                    Some(_) => println!("Defeated. -20 energy. Come back stronger."),
                    None => {}
                }
            }
        }
        Commands::Skills => {
            let tree = SkillTree::new(engine);
            print!("{}", format_skill_tree(&tree.skills(), tree.available_points()));
        }
        Commands::Unlock { skill } => {
            let mut tree = SkillTree::new(engine);
            if tree.unlock(&skill) {
                println!("Unlocked {}. {} points left.", skill, tree.available_points());
            } else {
                println!(
                    "Cannot unlock '{}': unknown, already owned, or not enough points.",
                    skill
                );
            }
        }
        Commands::Map => {
            print!("{}", format_world_map(&world_map(engine.catalog(), engine.state())));
        }
        Commands::Summary => {
            print!("{}", format_daily_summary(&daily_summary(engine.state())));
        }
        Commands::Achievements => {
            print!(
                "{}",
                format_achievement_list(&achievement_list(engine.catalog(), engine.state()))
            );
        }
        Commands::Init | Commands::Create { .. } | Commands::Reset { .. } => {}
    }
}

fn resolve_distraction(engine: &mut RulesEngine, resisted: bool) {
    let mut combat = Combat::new(engine);
    let monster = combat
        .random_monster()
        .unwrap_or("Distraction")
        .to_string();
    let outcome = if resisted {
        combat.flee()
    } else {
        combat.surrender()
    };
    println!("{}", format_distraction(&monster, &outcome));
}

fn init_logging(config: &Option<Config>, verbosity: u8) {
    use std::io::Write;
    let mut builder = env_logger::Builder::new();
    // -v flags win over the configured level
    let configured = config
        .as_ref()
        .and_then(|c| c.logging.level.parse::<log::LevelFilter>().ok())
        .unwrap_or(log::LevelFilter::Warn);
    let base_level = match verbosity {
        0 => configured,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(base_level);

    let log_file = config
        .as_ref()
        .and_then(|c| c.logging.file.as_ref())
        .and_then(|file| {
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(file)
                .ok()
        });

    if let Some(f) = log_file {
        let write_mutex = std::sync::Arc::new(std::sync::Mutex::new(f));
        // Console copy only when a terminal is attached
        let is_tty = atty::is(atty::Stream::Stdout);
        builder.format(move |fmt, record| {
            let ts = chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%:z");
            let line = format!("{} [{}] {}", ts, record.level(), record.args());
            if let Ok(mut guard) = write_mutex.lock() {
                let _ = writeln!(guard, "{}", line);
            }
            if is_tty {
                writeln!(fmt, "{}", line)
            } else {
                Ok(())
            }
        });
    } else {
        builder.format(|fmt, record| {
            let ts = chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%:z");
            writeln!(fmt, "{} [{}] {}", ts, record.level(), record.args())
        });
    }
    let _ = builder.try_init();
}
