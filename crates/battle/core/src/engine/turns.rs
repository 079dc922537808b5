use crate::state::CombatantId;

use super::BattleEngine;

/// Turn scheduling methods for BattleEngine.
impl<'a> BattleEngine<'a> {
    /// Begin the next round. Returns the new round number.
    pub fn begin_round(&mut self) -> u32 {
        self.state.round += 1;
        self.state.round
    }

    /// Selects the next eligible actor for the current round.
    ///
    /// Eligible: alive, on either team, and `last_acted_round < round`.
    /// Highest speed acts first; speed ties break by ascending name, so the
    /// order within a round is fully deterministic. `None` ends the round.
    pub fn select_next_actor(&self) -> Option<CombatantId> {
        let round = self.state.round;
        self.state
            .combatants()
            .filter(|c| c.is_alive() && c.last_acted_round < round)
            .max_by(|a, b| {
                a.stats
                    .speed
                    .cmp(&b.stats.speed)
                    .then_with(|| b.name.cmp(&a.name))
            })
            .map(|c| c.id)
    }

    /// Claim the current round's action slot for `id`.
    ///
    /// Returns false (and changes nothing) for a dead or missing combatant;
    /// the scheduler simply skips such actors.
    pub fn begin_turn(&mut self, id: CombatantId) -> bool {
        let round = self.state.round;
        match self.state.combatant_mut(id) {
            Some(c) if c.is_alive() => {
                c.is_acting = true;
                c.last_acted_round = round;
                true
            }
            _ => false,
        }
    }

    /// Mark `id`'s action complete and return it to idle if it survived.
    pub fn end_turn(&mut self, id: CombatantId) {
        if let Some(c) = self.state.combatant_mut(id) {
            c.is_acting = false;
            if c.is_alive() {
                c.action_state = crate::state::ActionState::Idle;
            }
        }
    }
}
