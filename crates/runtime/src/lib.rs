//! Async orchestration for the deterministic battle simulation.
//!
//! This crate owns the authoritative [`battle_core::BattleState`], drives the
//! turn scheduler to a terminal result, and notifies presentation
//! collaborators along the way. Consumers build a [`BattleSession`], subscribe
//! to events, and call [`BattleSession::run`].
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the battle controller and builder
//! - [`events`] provides a topic-based event bus for flexible event routing
//! - [`driver`] is the seam to animation/presentation collaborators
//! - [`oracle`] supplies terminal rewards from an external collaborator
//! - `actions` keeps per-turn execution internal to the crate
pub mod driver;
pub mod error;
pub mod events;
pub mod oracle;
pub mod session;

mod actions;

pub use driver::{AnimationCue, NoopDriver, PresentationDriver};
pub use error::{Result, SessionError};
pub use events::{BattleEvent, CombatantEvent, Event, EventBus, Topic, TurnEvent};
pub use oracle::{BattleRewards, FixedRewards, ItemReward, RewardOracle};
pub use session::{BattleReport, BattleSession, BattleSessionBuilder, SessionConfig};
