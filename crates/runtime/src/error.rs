//! Unified error types surfaced by the session API.
//!
//! Roster problems fail fast before any combat state exists; everything that
//! can go wrong mid-battle (stale references, lost animation signals) is
//! handled by skip-and-continue inside the scheduler and never surfaces here.

use thiserror::Error;

pub use battle_core::RosterError;

pub type Result<T> = std::result::Result<T, SessionError>;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Roster(#[from] RosterError),

    /// The battle already produced a result; the session will not restart.
    #[error("battle already finished")]
    AlreadyFinished,

    #[error("hit resolution task failed")]
    HitTaskJoin(#[source] tokio::task::JoinError),
}
