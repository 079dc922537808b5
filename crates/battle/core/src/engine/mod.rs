//! All battle state mutation flows through [`BattleEngine`].
//!
//! The engine wraps `&mut BattleState` and enforces the invariants the rest
//! of the system relies on: HP bounds, irreversible death, the energy floor,
//! once-per-round acting, and the one-shot terminal transition. It is fully
//! synchronous; pacing, fan-out, and presentation waits live in the runtime.

mod turns;

use crate::config::BattleConfig;
use crate::rng::{RngOracle, compute_seed};
use crate::state::{ActionState, BattlePhase, BattleState, CombatantId, HpChange, TeamId};

/// What a combatant will do with its turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionKind {
    BasicAttack,
    Skill,
}

/// Result of one hit landing on one target, for observers to publish.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HitOutcome {
    pub target: CombatantId,
    pub old_hp: u32,
    pub new_hp: u32,
    pub lethal: bool,
    /// Target's energy after the survivor gain, when it survived.
    pub energy: Option<i32>,
}

/// Error from reporting a battle result twice.
///
/// A second terminal transition is a logic bug upstream, so it surfaces as an
/// error instead of being swallowed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("battle already finished (winner: team {winner})")]
pub struct FinishError {
    pub winner: TeamId,
}

/// Mutating facade over [`BattleState`].
pub struct BattleEngine<'a> {
    state: &'a mut BattleState,
    config: &'a BattleConfig,
}

impl<'a> BattleEngine<'a> {
    pub fn new(state: &'a mut BattleState, config: &'a BattleConfig) -> Self {
        Self { state, config }
    }

    pub fn state(&self) -> &BattleState {
        self.state
    }

    /// Decide the action for `id`: the skill when energy has reached the cap
    /// and a skill is equipped, the basic attack otherwise.
    pub fn choose_action(&self, id: CombatantId) -> ActionKind {
        match self.state.combatant(id) {
            Some(c) if c.skill_ready(self.config) => ActionKind::Skill,
            _ => ActionKind::BasicAttack,
        }
    }

    /// Alive members of the team opposing `actor`, in roster order.
    pub fn alive_enemies(&self, actor: CombatantId) -> Vec<CombatantId> {
        match self.state.combatant(actor) {
            Some(c) => self.state.alive_ids(c.team.opponent()),
            None => Vec::new(),
        }
    }

    /// Pick a uniformly random alive enemy of `actor`.
    ///
    /// Consumes one draw from the deterministic sequence; `None` when no
    /// enemy is alive.
    pub fn select_target(&mut self, actor: CombatantId, rng: &dyn RngOracle) -> Option<CombatantId> {
        let enemies = self.alive_enemies(actor);
        let seed = compute_seed(self.state.seed, self.state.nonce, actor.0, 0);
        self.state.nonce += 1;
        let index = rng.pick_index(seed, enemies.len())?;
        Some(enemies[index])
    }

    /// Move a living combatant through its action lifecycle.
    ///
    /// `Dead` is terminal: transitions on a dead combatant are ignored, and
    /// `Dead` is only ever entered through [`Self::apply_hit`].
    pub fn set_action_state(&mut self, id: CombatantId, next: ActionState) {
        if next == ActionState::Dead {
            return;
        }
        if let Some(c) = self.state.combatant_mut(id)
            && c.is_alive()
        {
            c.action_state = next;
        }
    }

    /// Land a hit of `amount` damage on `target`.
    ///
    /// Subtracts HP (floor 0), grants the survivor energy gain only when the
    /// hit was not lethal, and marks death exactly once. Returns `None` when
    /// the target is dead or missing, or when the battle has already ended —
    /// no mutation happens in those cases.
    pub fn apply_hit(&mut self, target: CombatantId, amount: u32) -> Option<HitOutcome> {
        if self.state.is_ended() {
            return None;
        }
        let gain = self.config.energy_gain_per_event;
        let record = self.state.combatant_mut(target)?;
        let HpChange {
            old_hp,
            new_hp,
            lethal,
        } = record.apply_damage(amount)?;

        let energy = if lethal {
            None
        } else {
            record.action_state = ActionState::ResolvingHit;
            record.gain_energy(gain)
        };

        Some(HitOutcome {
            target,
            old_hp,
            new_hp,
            lethal,
            energy,
        })
    }

    /// Return a combatant to `Idle` once its hit reaction has completed.
    pub fn settle_hit(&mut self, target: CombatantId) {
        if let Some(c) = self.state.combatant_mut(target)
            && c.is_alive()
            && c.action_state == ActionState::ResolvingHit
        {
            c.action_state = ActionState::Idle;
        }
    }

    /// Grant the per-event energy gain to `id` (basic attack completion).
    /// Returns the new energy, or `None` when dead or missing.
    pub fn grant_event_energy(&mut self, id: CombatantId) -> Option<i32> {
        let gain = self.config.energy_gain_per_event;
        self.state.combatant_mut(id)?.gain_energy(gain)
    }

    /// Reset `id`'s energy to exactly 0 (skill completion, every branch).
    pub fn reset_energy(&mut self, id: CombatantId) -> Option<i32> {
        Some(self.state.combatant_mut(id)?.reset_energy())
    }

    /// Check the victory condition.
    ///
    /// Team A is checked first, so a resolution that empties both teams at
    /// once awards team B. Deterministic by construction.
    pub fn victory_check(&self) -> Option<TeamId> {
        if self.state.alive_count(TeamId::A) == 0 {
            Some(TeamId::B)
        } else if self.state.alive_count(TeamId::B) == 0 {
            Some(TeamId::A)
        } else {
            None
        }
    }

    /// One-shot terminal transition. A second call is an error, never a
    /// silent overwrite.
    pub fn finish(&mut self, winner: TeamId) -> Result<(), FinishError> {
        match self.state.phase {
            BattlePhase::Ended { winner } => Err(FinishError { winner }),
            BattlePhase::InProgress => {
                self.state.phase = BattlePhase::Ended { winner };
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::RosterEntry;
    use crate::stats::{CombatantStats, SkillDelivery, SkillSpec};

    fn two_sided(stats_a: CombatantStats, stats_b: CombatantStats) -> BattleState {
        BattleState::new(
            vec![RosterEntry::new("Ares", stats_a)],
            vec![RosterEntry::new("Borin", stats_b)],
            0,
        )
        .unwrap()
    }

    #[test]
    fn chooses_skill_only_when_ready_and_equipped() {
        let config = BattleConfig::default();
        let skill = SkillSpec::single(2.0, SkillDelivery::Meteor);

        let mut state = two_sided(
            CombatantStats::basic(50, 10, 5)
                .with_energy(100)
                .with_skill(skill),
            CombatantStats::basic(50, 10, 5).with_energy(150),
        );
        let engine = BattleEngine::new(&mut state, &config);
        // Ready and equipped.
        assert_eq!(engine.choose_action(CombatantId(0)), ActionKind::Skill);
        // Ready but no skill equipped.
        assert_eq!(engine.choose_action(CombatantId(1)), ActionKind::BasicAttack);
    }

    #[test]
    fn survivor_gains_energy_but_lethal_hit_grants_none() {
        let config = BattleConfig::default();
        let mut state = two_sided(
            CombatantStats::basic(50, 30, 10),
            CombatantStats::basic(50, 30, 5),
        );
        let mut engine = BattleEngine::new(&mut state, &config);

        let outcome = engine.apply_hit(CombatantId(1), 30).unwrap();
        assert_eq!((outcome.old_hp, outcome.new_hp), (50, 20));
        assert!(!outcome.lethal);
        assert_eq!(outcome.energy, Some(25));

        let outcome = engine.apply_hit(CombatantId(1), 30).unwrap();
        assert_eq!(outcome.new_hp, 0);
        assert!(outcome.lethal);
        assert_eq!(outcome.energy, None);

        // Dead target: further hits are a no-op.
        assert!(engine.apply_hit(CombatantId(1), 30).is_none());
    }

    #[test]
    fn no_hit_applies_after_the_battle_ended() {
        let config = BattleConfig::default();
        let mut state = two_sided(
            CombatantStats::basic(50, 30, 10),
            CombatantStats::basic(50, 30, 5),
        );
        let mut engine = BattleEngine::new(&mut state, &config);
        engine.finish(TeamId::A).unwrap();
        assert!(engine.apply_hit(CombatantId(1), 30).is_none());
    }

    #[test]
    fn finish_is_one_shot() {
        let config = BattleConfig::default();
        let mut state = two_sided(
            CombatantStats::basic(50, 30, 10),
            CombatantStats::basic(50, 30, 5),
        );
        let mut engine = BattleEngine::new(&mut state, &config);
        engine.finish(TeamId::A).unwrap();
        assert_eq!(
            engine.finish(TeamId::B),
            Err(FinishError { winner: TeamId::A })
        );
        // The stored winner never changes.
        assert_eq!(engine.state().winner(), Some(TeamId::A));
    }

    #[test]
    fn simultaneous_elimination_awards_team_b() {
        let config = BattleConfig::default();
        let mut state = two_sided(
            CombatantStats::basic(10, 1, 1),
            CombatantStats::basic(10, 1, 1),
        );
        let mut engine = BattleEngine::new(&mut state, &config);
        engine.apply_hit(CombatantId(0), 10).unwrap();
        engine.apply_hit(CombatantId(1), 10).unwrap();
        assert_eq!(engine.victory_check(), Some(TeamId::B));
    }

    #[test]
    fn target_selection_is_deterministic_and_skips_dead() {
        let config = BattleConfig::default();
        let mut state = BattleState::new(
            vec![RosterEntry::new("Ares", CombatantStats::basic(50, 10, 5))],
            vec![
                RosterEntry::new("Borin", CombatantStats::basic(50, 10, 5)),
                RosterEntry::new("Cera", CombatantStats::basic(50, 10, 5)),
            ],
            7,
        )
        .unwrap();
        let rng = crate::rng::PcgRng;

        let mut replay = state.clone();
        let mut engine = BattleEngine::new(&mut state, &config);
        let picks: Vec<_> = (0..8)
            .map(|_| engine.select_target(CombatantId(0), &rng).unwrap())
            .collect();
        // Kill Borin; only Cera remains targetable.
        engine.apply_hit(CombatantId(1), 50).unwrap();
        assert_eq!(
            engine.select_target(CombatantId(0), &rng),
            Some(CombatantId(2))
        );

        let mut replay_engine = BattleEngine::new(&mut replay, &config);
        let replayed: Vec<_> = (0..8)
            .map(|_| replay_engine.select_target(CombatantId(0), &rng).unwrap())
            .collect();
        assert_eq!(picks, replayed);
    }
}
