//! High-level battle controller.
//!
//! [`BattleSession`] owns the authoritative state, drives the turn scheduler
//! from start to a terminal result, and exposes a builder-based API plus the
//! event bus for presentation consumers.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info};

use battle_core::{
    BattleConfig, BattleEngine, BattleState, CombatantId, PcgRng, RosterEntry, TeamId,
};

use crate::driver::{NoopDriver, PresentationDriver};
use crate::error::{Result, SessionError};
use crate::events::{Event, EventBus, TurnEvent};
use crate::oracle::{BattleRewards, FixedRewards, RewardOracle};

/// Session configuration shared across the controller and turn execution.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub battle: BattleConfig,
    /// Base seed for deterministic target selection (replay support).
    pub seed: u64,
    /// Presentation pacing between actions. Zero for headless simulation.
    pub inter_action_delay: Duration,
    /// Upper bound on any single awaited presentation cue.
    pub animation_timeout: Duration,
    pub event_buffer_size: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            battle: BattleConfig::default(),
            seed: 0,
            inter_action_delay: Duration::from_millis(500),
            animation_timeout: Duration::from_secs(1),
            event_buffer_size: 100,
        }
    }
}

impl SessionConfig {
    /// Configuration for headless simulation: no pacing delays.
    pub fn headless(seed: u64) -> Self {
        Self {
            seed,
            inter_action_delay: Duration::ZERO,
            ..Self::default()
        }
    }
}

/// Terminal result reported exactly once per session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleReport {
    pub winner: TeamId,
    pub rewards: BattleRewards,
    /// Number of rounds the battle ran.
    pub rounds: u32,
}

/// State and collaborators shared with per-turn execution tasks.
pub(crate) struct Shared {
    pub(crate) state: Mutex<BattleState>,
    pub(crate) config: SessionConfig,
    pub(crate) events: EventBus,
    pub(crate) driver: Arc<dyn PresentationDriver>,
    pub(crate) rng: PcgRng,
    /// Per-combatant reaction locks: HP/energy mutations on one combatant
    /// are strictly serialized, a second incoming hit waits for the first
    /// reaction to fully complete.
    pub(crate) reactions: HashMap<CombatantId, Arc<Mutex<()>>>,
}

/// Builder for [`BattleSession`] with flexible configuration.
pub struct BattleSessionBuilder {
    team_a: Vec<RosterEntry>,
    team_b: Vec<RosterEntry>,
    config: SessionConfig,
    driver: Arc<dyn PresentationDriver>,
    rewards: Box<dyn RewardOracle>,
}

impl BattleSessionBuilder {
    fn new() -> Self {
        Self {
            team_a: Vec::new(),
            team_b: Vec::new(),
            config: SessionConfig::default(),
            driver: Arc::new(NoopDriver),
            rewards: Box::new(FixedRewards::default()),
        }
    }

    pub fn team_a(mut self, roster: Vec<RosterEntry>) -> Self {
        self.team_a = roster;
        self
    }

    pub fn team_b(mut self, roster: Vec<RosterEntry>) -> Self {
        self.team_b = roster;
        self
    }

    pub fn config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn driver(mut self, driver: impl PresentationDriver + 'static) -> Self {
        self.driver = Arc::new(driver);
        self
    }

    pub fn rewards(mut self, oracle: impl RewardOracle + 'static) -> Self {
        self.rewards = Box::new(oracle);
        self
    }

    /// Validate rosters and assemble the session. Fails fast on a bad
    /// roster; no battle state is created in that case.
    pub fn build(self) -> Result<BattleSession> {
        let state = BattleState::new(self.team_a, self.team_b, self.config.seed)?;
        let reactions = state
            .combatants()
            .map(|c| (c.id, Arc::new(Mutex::new(()))))
            .collect();
        let events = EventBus::with_capacity(self.config.event_buffer_size);

        Ok(BattleSession {
            shared: Arc::new(Shared {
                state: Mutex::new(state),
                config: self.config,
                events,
                driver: self.driver,
                rng: PcgRng,
                reactions,
            }),
            rewards: self.rewards,
            report: None,
        })
    }
}

/// Battle controller: owns both rosters, runs the scheduler once, and
/// reports the terminal result.
pub struct BattleSession {
    shared: Arc<Shared>,
    rewards: Box<dyn RewardOracle>,
    report: Option<BattleReport>,
}

impl BattleSession {
    pub fn builder() -> BattleSessionBuilder {
        BattleSessionBuilder::new()
    }

    /// Event bus for presentation consumers. Subscribe before [`Self::run`]
    /// to observe the battle from the first round.
    pub fn events(&self) -> &EventBus {
        &self.shared.events
    }

    /// Read-only snapshot of the current battle state.
    pub async fn snapshot(&self) -> BattleState {
        self.shared.state.lock().await.clone()
    }

    /// The terminal result, if the battle has finished. Stable across
    /// re-queries.
    pub fn report(&self) -> Option<&BattleReport> {
        self.report.as_ref()
    }

    #[cfg(test)]
    pub(crate) fn shared(&self) -> &Arc<Shared> {
        &self.shared
    }

    /// Drive the battle from start to its terminal result.
    ///
    /// Runs rounds until one team has no alive members, executing one action
    /// at a time and re-checking victory after each. The session is
    /// single-shot: a second call returns [`SessionError::AlreadyFinished`]
    /// without touching state.
    pub async fn run(&mut self) -> Result<BattleReport> {
        if self.report.is_some() {
            return Err(SessionError::AlreadyFinished);
        }

        let winner = 'battle: loop {
            if let Some(winner) = self.victory_check().await {
                break 'battle winner;
            }

            let round = {
                let mut state = self.shared.state.lock().await;
                BattleEngine::new(&mut state, &self.shared.config.battle).begin_round()
            };
            self.shared
                .events
                .publish(Event::Turn(TurnEvent::RoundStarted { round }));
            debug!(target: "battle_runtime::scheduler", round, "Round started");

            loop {
                let actor = {
                    let mut state = self.shared.state.lock().await;
                    BattleEngine::new(&mut state, &self.shared.config.battle).select_next_actor()
                };
                let Some(actor) = actor else {
                    // Everyone eligible has acted; the round ends.
                    break;
                };

                crate::actions::execute_turn(&self.shared, actor).await?;

                if let Some(winner) = self.victory_check().await {
                    break 'battle winner;
                }

                let delay = self.shared.config.inter_action_delay;
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
            }
        };

        self.finalize(winner).await
    }

    async fn victory_check(&self) -> Option<TeamId> {
        let mut state = self.shared.state.lock().await;
        BattleEngine::new(&mut state, &self.shared.config.battle).victory_check()
    }

    /// One-shot terminal transition: record the winner, fetch rewards, and
    /// publish the final event. No state mutation can happen afterwards.
    async fn finalize(&mut self, winner: TeamId) -> Result<BattleReport> {
        let rounds = {
            let mut state = self.shared.state.lock().await;
            let mut engine = BattleEngine::new(&mut state, &self.shared.config.battle);
            engine
                .finish(winner)
                .map_err(|_| SessionError::AlreadyFinished)?;
            engine.state().round()
        };

        let rewards = self.rewards.rewards(winner);
        self.shared
            .events
            .publish(Event::Battle(crate::events::BattleEvent::Ended {
                winner,
                rewards: rewards.clone(),
            }));
        info!(
            target: "battle_runtime::scheduler",
            winner = %winner,
            rounds,
            "Battle ended"
        );

        let report = BattleReport {
            winner,
            rewards,
            rounds,
        };
        self.report = Some(report.clone());
        Ok(report)
    }
}
