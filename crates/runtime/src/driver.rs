//! Seam between the simulation and presentation collaborators.
//!
//! The scheduler tells the driver what is about to be shown and awaits its
//! completion. Every await is bounded by the session's animation timeout: a
//! lost completion signal delays the battle, it never stalls it, and the
//! fallback never re-applies an effect.

use std::time::Duration;

use async_trait::async_trait;
use battle_core::{CombatantId, SkillDelivery};
use tracing::warn;

/// A presentation step the simulation waits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationCue {
    /// Actor closes distance to its target before a basic attack.
    MoveToTarget {
        actor: CombatantId,
        target: CombatantId,
    },
    /// Actor swings its basic attack.
    Attack { actor: CombatantId },
    /// Caster winds up its skill.
    CastWindup { actor: CombatantId },
    /// Skill effect travels to one target.
    SkillDelivery {
        actor: CombatantId,
        target: CombatantId,
        delivery: SkillDelivery,
    },
    /// Target reacts to a landed hit.
    HitReaction { target: CombatantId },
    /// A combatant's death presentation.
    Death { id: CombatantId },
}

/// Plays presentation cues and signals their completion by returning.
///
/// Implementations must not mutate combat state; they only observe ids and
/// render. A headless consumer uses [`NoopDriver`].
#[async_trait]
pub trait PresentationDriver: Send + Sync {
    async fn play(&self, cue: AnimationCue);
}

/// Driver that completes every cue immediately. Used for headless
/// simulation and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDriver;

#[async_trait]
impl PresentationDriver for NoopDriver {
    async fn play(&self, _cue: AnimationCue) {}
}

/// Await a cue with the session's bounded timeout.
///
/// On timeout the scheduler proceeds; the occurrence is logged for
/// diagnostics.
pub(crate) async fn play_bounded(
    driver: &dyn PresentationDriver,
    cue: AnimationCue,
    timeout: Duration,
) {
    if tokio::time::timeout(timeout, driver.play(cue)).await.is_err() {
        warn!(
            target: "battle_runtime::driver",
            cue = ?cue,
            timeout_ms = timeout.as_millis() as u64,
            "Animation completion signal lost, proceeding via timeout fallback"
        );
    }
}
