//! Topic-based event routing for presentation consumers.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{BattleEvent, CombatantEvent, TurnEvent};
