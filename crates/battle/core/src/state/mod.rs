//! Mutable battle state: combatant records and the battle container.

mod battle;
mod combatant;

pub use battle::{BattlePhase, BattleState};
pub use combatant::{ActionState, BoardColumn, CombatantId, CombatantRecord, HpChange, TeamId};
