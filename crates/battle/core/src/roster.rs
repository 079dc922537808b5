//! Roster input validated at battle start.
//!
//! Rosters arrive already hydrated (stats, skill, board position) from an
//! external loading collaborator; this module only checks the data is usable
//! before any combat state is built.

use crate::state::{BoardColumn, TeamId};
use crate::stats::CombatantStats;

/// One fighter as supplied by the roster collaborator.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RosterEntry {
    pub name: String,
    pub column: BoardColumn,
    pub row: u8,
    pub stats: CombatantStats,
}

impl RosterEntry {
    pub fn new(name: impl Into<String>, stats: CombatantStats) -> Self {
        Self {
            name: name.into(),
            column: BoardColumn::default(),
            row: 0,
            stats,
        }
    }

    pub fn deployed_at(mut self, column: BoardColumn, row: u8) -> Self {
        self.column = column;
        self.row = row;
        self
    }
}

/// Errors detected while validating rosters. All fail fast: no battle starts.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RosterError {
    #[error("team {team} has no members")]
    EmptyTeam { team: TeamId },

    #[error("combatant {name:?} has max_hp of 0")]
    InvalidMaxHp { name: String },
}
