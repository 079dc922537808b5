//! Damage calculation and application.

use crate::config::BattleConfig;
use crate::stats::{CombatantStats, SkillSpec};

/// Damage dealt by a basic attack.
///
/// The attacker's raw physical damage, flat. No defense subtraction,
/// accuracy/dodge roll, crit, block, or counter is applied on this path even
/// though the stat block carries those fields.
pub fn basic_attack_damage(attacker: &CombatantStats) -> u32 {
    attacker.physical_damage
}

/// Damage dealt by a skill, including the energy-overflow bonus.
///
/// # Formula
///
/// ```text
/// base     = physical_damage × damage_multiplier
/// overflow = physical_damage × overflow_damage_fraction
///            × (max(energy − energy_cap, 0) / overflow_step)
/// result   = round(base + overflow)
/// ```
///
/// The overflow ratio is real-valued, so partial steps scale fractionally.
/// Rounding is half-away-from-zero.
pub fn skill_damage(
    attacker: &CombatantStats,
    skill: &SkillSpec,
    energy: i32,
    config: &BattleConfig,
) -> u32 {
    let physical = attacker.physical_damage as f64;
    let base = physical * skill.damage_multiplier as f64;

    let overflow = crate::combat::overflow_energy(energy, config.energy_cap);
    let overflow_multiplier = overflow as f64 / config.overflow_step as f64;
    let overflow_bonus = physical * config.overflow_damage_fraction as f64 * overflow_multiplier;

    // f64::round is half-away-from-zero; damage is never negative.
    (base + overflow_bonus).round() as u32
}

/// Apply damage to current HP. Floor of 0, overkill discarded.
pub fn apply_damage(current_hp: u32, damage: u32) -> u32 {
    current_hp.saturating_sub(damage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::SkillDelivery;

    fn attacker(physical_damage: u32) -> CombatantStats {
        CombatantStats::basic(100, physical_damage, 10)
    }

    #[test]
    fn basic_attack_is_flat_physical_damage() {
        assert_eq!(basic_attack_damage(&attacker(30)), 30);
    }

    #[test]
    fn skill_damage_with_overflow() {
        // physical 100, multiplier 2.0, energy 150:
        // base 200, overflow (150-100)/25 = 2.0 steps -> 100 × 0.25 × 2 = 50
        let config = BattleConfig::default();
        let skill = SkillSpec::single(2.0, SkillDelivery::Meteor);
        assert_eq!(skill_damage(&attacker(100), &skill, 150, &config), 250);
    }

    #[test]
    fn no_overflow_bonus_at_or_below_cap() {
        let config = BattleConfig::default();
        let skill = SkillSpec::single(2.0, SkillDelivery::Projectile);
        assert_eq!(skill_damage(&attacker(100), &skill, 100, &config), 200);
        assert_eq!(skill_damage(&attacker(100), &skill, 40, &config), 200);
    }

    #[test]
    fn overflow_scales_fractionally() {
        // 110 energy is 0.4 of a step: 100 × 0.25 × 0.4 = 10
        let config = BattleConfig::default();
        let skill = SkillSpec::single(2.0, SkillDelivery::Meteor);
        assert_eq!(skill_damage(&attacker(100), &skill, 110, &config), 210);
    }

    #[test]
    fn rounds_half_away_from_zero() {
        // 5 × 1.5 = 7.5 -> 8
        let config = BattleConfig::default();
        let skill = SkillSpec::single(1.5, SkillDelivery::Projectile);
        assert_eq!(skill_damage(&attacker(5), &skill, 0, &config), 8);
    }

    #[test]
    fn apply_damage_floors_at_zero() {
        assert_eq!(apply_damage(50, 30), 20);
        assert_eq!(apply_damage(20, 30), 0);
    }
}
