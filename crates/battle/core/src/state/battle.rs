//! The battle container: two rosters, the round counter, and the terminal
//! phase.

use crate::roster::{RosterEntry, RosterError};
use crate::state::{CombatantId, CombatantRecord, TeamId};

/// Terminal status of a battle. Set exactly once.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattlePhase {
    InProgress,
    Ended { winner: TeamId },
}

/// Authoritative state for one battle.
///
/// Only [`crate::engine::BattleEngine`] mutates this; presentation
/// collaborators observe it read-only.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleState {
    teams: [Vec<CombatantRecord>; 2],
    /// Current round number. Starts at 0; the first round is 1.
    pub(crate) round: u32,
    pub(crate) phase: BattlePhase,
    /// Base seed for deterministic target selection.
    pub(crate) seed: u64,
    /// Random-draw sequence number, incremented per draw.
    pub(crate) nonce: u64,
}

impl BattleState {
    /// Build battle state from two hydrated rosters.
    ///
    /// Fails fast on an empty team or a zero `max_hp`; no combat state is
    /// created in that case. Combatant ids are assigned sequentially, team A
    /// first, preserving roster order.
    pub fn new(
        team_a: Vec<RosterEntry>,
        team_b: Vec<RosterEntry>,
        seed: u64,
    ) -> Result<Self, RosterError> {
        if team_a.is_empty() {
            return Err(RosterError::EmptyTeam { team: TeamId::A });
        }
        if team_b.is_empty() {
            return Err(RosterError::EmptyTeam { team: TeamId::B });
        }
        for entry in team_a.iter().chain(team_b.iter()) {
            if entry.stats.max_hp == 0 {
                return Err(RosterError::InvalidMaxHp {
                    name: entry.name.clone(),
                });
            }
        }

        let mut next_id = 0u32;
        let mut build = |team: TeamId, entries: Vec<RosterEntry>| {
            entries
                .into_iter()
                .map(|entry| {
                    let id = CombatantId(next_id);
                    next_id += 1;
                    CombatantRecord::new(id, team, entry.name, entry.column, entry.row, entry.stats)
                })
                .collect::<Vec<_>>()
        };
        let team_a = build(TeamId::A, team_a);
        let team_b = build(TeamId::B, team_b);

        Ok(Self {
            teams: [team_a, team_b],
            round: 0,
            phase: BattlePhase::InProgress,
            seed,
            nonce: 0,
        })
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    pub fn is_ended(&self) -> bool {
        matches!(self.phase, BattlePhase::Ended { .. })
    }

    /// Winning team once the battle has ended. Stable across re-queries.
    pub fn winner(&self) -> Option<TeamId> {
        match self.phase {
            BattlePhase::InProgress => None,
            BattlePhase::Ended { winner } => Some(winner),
        }
    }

    pub fn team(&self, team: TeamId) -> &[CombatantRecord] {
        &self.teams[team.index()]
    }

    pub fn combatants(&self) -> impl Iterator<Item = &CombatantRecord> {
        self.teams.iter().flatten()
    }

    pub fn combatant(&self, id: CombatantId) -> Option<&CombatantRecord> {
        self.combatants().find(|c| c.id == id)
    }

    pub(crate) fn combatant_mut(&mut self, id: CombatantId) -> Option<&mut CombatantRecord> {
        self.teams.iter_mut().flatten().find(|c| c.id == id)
    }

    pub fn alive_count(&self, team: TeamId) -> usize {
        self.team(team).iter().filter(|c| c.is_alive()).count()
    }

    /// Ids of the alive members of `team`, in roster order.
    pub fn alive_ids(&self, team: TeamId) -> Vec<CombatantId> {
        self.team(team)
            .iter()
            .filter(|c| c.is_alive())
            .map(|c| c.id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::CombatantStats;

    fn entry(name: &str) -> RosterEntry {
        RosterEntry::new(name, CombatantStats::basic(50, 10, 5))
    }

    #[test]
    fn rejects_empty_teams() {
        assert_eq!(
            BattleState::new(vec![], vec![entry("Borin")], 0).unwrap_err(),
            RosterError::EmptyTeam { team: TeamId::A }
        );
        assert_eq!(
            BattleState::new(vec![entry("Ares")], vec![], 0).unwrap_err(),
            RosterError::EmptyTeam { team: TeamId::B }
        );
    }

    #[test]
    fn rejects_zero_max_hp() {
        let bad = RosterEntry::new("Ghost", CombatantStats::basic(0, 10, 5));
        let err = BattleState::new(vec![entry("Ares")], vec![bad], 0).unwrap_err();
        assert_eq!(
            err,
            RosterError::InvalidMaxHp {
                name: "Ghost".into()
            }
        );
    }

    #[test]
    fn ids_are_sequential_across_teams() {
        let state = BattleState::new(
            vec![entry("Ares"), entry("Borin")],
            vec![entry("Cera")],
            0,
        )
        .unwrap();
        let ids: Vec<u32> = state.combatants().map(|c| c.id.0).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert_eq!(state.combatant(CombatantId(2)).unwrap().team, TeamId::B);
    }
}
