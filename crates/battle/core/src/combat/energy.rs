//! Energy economy rules.
//!
//! Energy grows from combat events (landing a basic attack, surviving a hit)
//! and is floor-clamped at 0 with no ceiling. The nominal cap is a readiness
//! threshold only: accumulation past it is kept and converted into bonus
//! skill damage, never into extra actions.

/// Add `amount` (may be negative) to `current`, clamping at 0. No ceiling.
pub fn gain_energy(current: i32, amount: i32) -> i32 {
    (current.saturating_add(amount)).max(0)
}

/// Skill readiness: energy has reached the cap.
pub fn is_skill_ready(current: i32, cap: i32) -> bool {
    current >= cap
}

/// Energy accumulated beyond the cap, consumed only as bonus skill damage.
pub fn overflow_energy(current: i32, cap: i32) -> i32 {
    (current - cap).max(0)
}
