//! Pure combat math: damage resolution and the energy economy.

mod damage;
mod energy;

pub use damage::{apply_damage, basic_attack_damage, skill_damage};
pub use energy::{gain_energy, is_skill_ready, overflow_energy};
