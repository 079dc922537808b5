//! Per-combatant mutable state.

use std::fmt;

use crate::config::BattleConfig;
use crate::stats::CombatantStats;

/// Unique identifier for a combatant within one battle.
///
/// Assigned sequentially at battle start (team A first, then team B) and
/// never reused for the lifetime of the battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantId(pub u32);

impl fmt::Display for CombatantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One of the two sides of a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TeamId {
    A,
    B,
}

impl TeamId {
    pub fn opponent(self) -> TeamId {
        match self {
            TeamId::A => TeamId::B,
            TeamId::B => TeamId::A,
        }
    }

    /// Numeric id (0 for team A, 1 for team B), matching roster wire data.
    pub fn index(self) -> usize {
        match self {
            TeamId::A => 0,
            TeamId::B => 1,
        }
    }
}

/// Board column a combatant was deployed in.
///
/// Carried for presentation; combat math ignores it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BoardColumn {
    Front,
    #[default]
    Mid,
    Back,
}

/// Lifecycle state of a combatant's current action.
///
/// `Moving` and `Casting` exist to serialize the actor while presentation
/// collaborators play out the corresponding cues; they carry no combat math.
/// `Dead` is terminal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionState {
    #[default]
    Idle,
    Moving,
    Casting,
    ResolvingHit,
    Dead,
}

/// Result of applying a damage delta to a combatant's HP.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HpChange {
    pub old_hp: u32,
    pub new_hp: u32,
    /// True exactly when this change reduced HP to 0 on a living combatant.
    pub lethal: bool,
}

/// Mutable combat record for one fighter, created at battle start from
/// roster data and discarded when the battle ends.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantRecord {
    pub id: CombatantId,
    pub name: String,
    pub team: TeamId,
    pub column: BoardColumn,
    pub row: u8,
    pub stats: CombatantStats,
    current_hp: u32,
    energy: i32,
    is_alive: bool,
    pub(crate) action_state: ActionState,
    /// Last round this combatant acted in. A combatant is eligible while
    /// `last_acted_round < round`.
    pub(crate) last_acted_round: u32,
    pub(crate) is_acting: bool,
}

impl CombatantRecord {
    pub(crate) fn new(
        id: CombatantId,
        team: TeamId,
        name: String,
        column: BoardColumn,
        row: u8,
        stats: CombatantStats,
    ) -> Self {
        let current_hp = stats.max_hp;
        let energy = stats.initial_energy.max(0);
        Self {
            id,
            name,
            team,
            column,
            row,
            stats,
            current_hp,
            energy,
            is_alive: true,
            action_state: ActionState::Idle,
            last_acted_round: 0,
            is_acting: false,
        }
    }

    pub fn hp(&self) -> u32 {
        self.current_hp
    }

    pub fn max_hp(&self) -> u32 {
        self.stats.max_hp
    }

    pub fn energy(&self) -> i32 {
        self.energy
    }

    pub fn is_alive(&self) -> bool {
        self.is_alive
    }

    pub fn action_state(&self) -> ActionState {
        self.action_state
    }

    pub fn last_acted_round(&self) -> u32 {
        self.last_acted_round
    }

    pub fn is_acting(&self) -> bool {
        self.is_acting
    }

    /// True when energy has reached the cap and a skill is equipped.
    pub fn skill_ready(&self, config: &BattleConfig) -> bool {
        self.stats.skill.is_some() && crate::combat::is_skill_ready(self.energy, config.energy_cap)
    }

    /// Subtract damage from HP with a floor of 0. Overkill is discarded.
    ///
    /// Marks the combatant dead exactly when HP reaches 0; the transition is
    /// irreversible. Dead combatants ignore further damage.
    pub(crate) fn apply_damage(&mut self, amount: u32) -> Option<HpChange> {
        if !self.is_alive {
            return None;
        }
        let old_hp = self.current_hp;
        let new_hp = crate::combat::apply_damage(old_hp, amount);
        self.current_hp = new_hp;
        let lethal = new_hp == 0;
        if lethal {
            self.is_alive = false;
            self.action_state = ActionState::Dead;
        }
        Some(HpChange {
            old_hp,
            new_hp,
            lethal,
        })
    }

    /// Restore HP, clamped to `max_hp`. Dead combatants cannot be healed.
    ///
    /// Heal/lifesteal-style effects are the only sanctioned way HP may
    /// increase; no current attack path triggers one, but the upper clamp
    /// lives here so any such effect inherits it.
    pub(crate) fn heal(&mut self, amount: u32) -> Option<HpChange> {
        if !self.is_alive {
            return None;
        }
        let old_hp = self.current_hp;
        let new_hp = old_hp.saturating_add(amount).min(self.stats.max_hp);
        self.current_hp = new_hp;
        Some(HpChange {
            old_hp,
            new_hp,
            lethal: false,
        })
    }

    /// Add energy with a floor of 0 and no ceiling. No-op when dead.
    /// Returns the new value.
    pub(crate) fn gain_energy(&mut self, amount: i32) -> Option<i32> {
        if !self.is_alive {
            return None;
        }
        self.energy = crate::combat::gain_energy(self.energy, amount);
        Some(self.energy)
    }

    /// Reset energy to exactly 0 (skill completion, all branches).
    pub(crate) fn reset_energy(&mut self) -> i32 {
        self.energy = 0;
        self.energy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(max_hp: u32) -> CombatantRecord {
        CombatantRecord::new(
            CombatantId(0),
            TeamId::A,
            "Ares".into(),
            BoardColumn::Front,
            1,
            CombatantStats::basic(max_hp, 10, 5),
        )
    }

    #[test]
    fn damage_floors_at_zero_and_kills_once() {
        let mut r = record(30);
        let change = r.apply_damage(50).unwrap();
        assert_eq!(change.old_hp, 30);
        assert_eq!(change.new_hp, 0);
        assert!(change.lethal);
        assert!(!r.is_alive());
        assert_eq!(r.action_state(), ActionState::Dead);

        // Dead combatants ignore further damage and healing.
        assert_eq!(r.apply_damage(10), None);
        assert_eq!(r.heal(10), None);
        assert!(!r.is_alive());
    }

    #[test]
    fn heal_clamps_to_max() {
        let mut r = record(30);
        r.apply_damage(10).unwrap();
        let change = r.heal(100).unwrap();
        assert_eq!(change.new_hp, 30);
    }

    #[test]
    fn energy_floor_no_ceiling() {
        let mut r = record(30);
        assert_eq!(r.gain_energy(-50), Some(0));
        assert_eq!(r.gain_energy(125), Some(125));
        assert_eq!(r.gain_energy(25), Some(150));
        assert_eq!(r.reset_energy(), 0);
    }

    #[test]
    fn initial_energy_comes_from_stats() {
        let r = CombatantRecord::new(
            CombatantId(1),
            TeamId::B,
            "Borin".into(),
            BoardColumn::Mid,
            2,
            CombatantStats::basic(10, 1, 1).with_energy(50),
        );
        assert_eq!(r.energy(), 50);
    }
}
