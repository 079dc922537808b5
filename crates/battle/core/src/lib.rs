//! Deterministic combat rules and battle state shared across consumers.
//!
//! `battle-core` defines the canonical simulation (stat blocks, damage math,
//! energy economy, turn selection, victory) and exposes pure APIs reused by
//! the runtime and by offline tools. All state mutation flows through
//! [`engine::BattleEngine`], and supporting crates depend on the types
//! re-exported here.
pub mod combat;
pub mod config;
pub mod engine;
pub mod rng;
pub mod roster;
pub mod state;
pub mod stats;

pub use combat::{apply_damage, basic_attack_damage, skill_damage};
pub use config::BattleConfig;
pub use engine::{ActionKind, BattleEngine, FinishError, HitOutcome};
pub use rng::{PcgRng, RngOracle, compute_seed};
pub use roster::{RosterEntry, RosterError};
pub use state::{
    ActionState, BattlePhase, BattleState, BoardColumn, CombatantId, CombatantRecord, TeamId,
};
pub use stats::{CombatantStats, SkillDelivery, SkillSpec, SkillTargeting};
