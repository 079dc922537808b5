/// Battle configuration constants and tunable parameters.
///
/// Every balance value the simulation consumes lives here so consumers can
/// override it explicitly instead of relying on buried literals.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleConfig {
    /// Energy granted for landing a basic attack and for surviving a hit.
    pub energy_gain_per_event: i32,
    /// Energy threshold at which an equipped skill becomes usable.
    ///
    /// This is a readiness threshold, not a ceiling: energy keeps
    /// accumulating past it and the surplus scales skill damage.
    pub energy_cap: i32,
    /// Energy above the cap required for each overflow damage step.
    pub overflow_step: i32,
    /// Fraction of physical damage added per full overflow step.
    pub overflow_damage_fraction: f32,
}

impl BattleConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_ENERGY_GAIN_PER_EVENT: i32 = 25;
    pub const DEFAULT_ENERGY_CAP: i32 = 100;
    pub const DEFAULT_OVERFLOW_STEP: i32 = 25;
    pub const DEFAULT_OVERFLOW_DAMAGE_FRACTION: f32 = 0.25;

    pub fn new() -> Self {
        Self {
            energy_gain_per_event: Self::DEFAULT_ENERGY_GAIN_PER_EVENT,
            energy_cap: Self::DEFAULT_ENERGY_CAP,
            overflow_step: Self::DEFAULT_OVERFLOW_STEP,
            overflow_damage_fraction: Self::DEFAULT_OVERFLOW_DAMAGE_FRACTION,
        }
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}
