//! Static combat attributes for one fighter.
//!
//! A stat block is hydrated by an external roster loader and never mutated
//! once a battle starts; mutable combat state lives on
//! [`crate::state::CombatantRecord`].

/// Static stat block for one combatant.
///
/// Defensive and secondary fields (`*_defense`, `accuracy`, `dodge`, crit,
/// `life_steal`, `block_chance`, `counter_chance`) are carried in roster data
/// but not consulted by the attack path: basic attacks apply the attacker's
/// raw physical damage with no mitigation roll.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantStats {
    pub max_hp: u32,
    pub physical_damage: u32,
    pub magic_damage: u32,
    pub pure_damage: u32,
    pub physical_defense: u32,
    pub magic_defense: u32,
    pub pure_defense: u32,
    /// Turn-order key: within a round, higher speed acts first.
    pub speed: u32,
    pub accuracy: f32,
    pub dodge: f32,
    pub crit_chance: f32,
    pub crit_damage: f32,
    pub life_steal: f32,
    pub block_chance: f32,
    pub counter_chance: f32,
    /// Starting energy for this combatant.
    pub initial_energy: i32,
    /// Optional special skill, usable once energy reaches the cap.
    pub skill: Option<SkillSpec>,
}

impl CombatantStats {
    /// Minimal stat block for the common case: HP, attack, speed.
    /// Everything else defaults to zero / empty.
    pub fn basic(max_hp: u32, physical_damage: u32, speed: u32) -> Self {
        Self {
            max_hp,
            physical_damage,
            magic_damage: 0,
            pure_damage: 0,
            physical_defense: 0,
            magic_defense: 0,
            pure_defense: 0,
            speed,
            accuracy: 0.0,
            dodge: 0.0,
            crit_chance: 0.0,
            crit_damage: 0.0,
            life_steal: 0.0,
            block_chance: 0.0,
            counter_chance: 0.0,
            initial_energy: 0,
            skill: None,
        }
    }

    pub fn with_energy(mut self, initial_energy: i32) -> Self {
        self.initial_energy = initial_energy;
        self
    }

    pub fn with_skill(mut self, skill: SkillSpec) -> Self {
        self.skill = Some(skill);
        self
    }
}

/// Special skill definition.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillSpec {
    /// Multiplier applied to the caster's physical damage.
    pub damage_multiplier: f32,
    pub targeting: SkillTargeting,
    /// How the effect is presented in flight. Irrelevant to the simulation,
    /// forwarded to presentation collaborators.
    pub delivery: SkillDelivery,
}

impl SkillSpec {
    pub fn single(damage_multiplier: f32, delivery: SkillDelivery) -> Self {
        Self {
            damage_multiplier,
            targeting: SkillTargeting::SingleTarget,
            delivery,
        }
    }

    pub fn area(damage_multiplier: f32, delivery: SkillDelivery) -> Self {
        Self {
            damage_multiplier,
            targeting: SkillTargeting::AllEnemies,
            delivery,
        }
    }

    pub fn is_area(&self) -> bool {
        self.targeting == SkillTargeting::AllEnemies
    }
}

/// Who a skill resolves against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillTargeting {
    /// One uniformly random alive enemy.
    SingleTarget,
    /// Every currently-alive enemy, resolved simultaneously.
    AllEnemies,
}

/// Presentation-only delivery style for a skill effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillDelivery {
    /// Effect falls from above the target.
    Meteor,
    /// Effect flies from the caster to the target.
    Projectile,
}
