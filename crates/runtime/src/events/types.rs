//! Event types for different topics.
//!
//! These are the only outputs the simulation emits; how a consumer renders
//! them (UI bars, damage popups, logs) is its own concern.

use serde::{Deserialize, Serialize};

use battle_core::{ActionKind, CombatantId, TeamId};

use crate::oracle::BattleRewards;

/// Events related to turn scheduling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TurnEvent {
    /// A new round began; every eligible combatant will act at most once.
    RoundStarted { round: u32 },
    /// A combatant's action slot started.
    ActionStarted {
        actor: CombatantId,
        action: ActionKind,
    },
}

/// Events related to one combatant's mutable state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CombatantEvent {
    /// HP moved from `old_hp` to `new_hp` (damage or heal).
    HpChanged {
        id: CombatantId,
        old_hp: u32,
        new_hp: u32,
    },
    /// Energy changed to `energy` (gain or skill reset).
    EnergyChanged { id: CombatantId, energy: i32 },
    /// The combatant died. Emitted exactly once per combatant.
    Died { id: CombatantId },
}

/// Terminal battle events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BattleEvent {
    /// The battle produced its result. Emitted exactly once.
    Ended {
        winner: TeamId,
        rewards: BattleRewards,
    },
}
