//! Reward data supplied by an external progression collaborator.
//!
//! The simulation only decides who won; what the winner is paid is someone
//! else's table. The oracle is consulted exactly once, at the terminal
//! transition.

use serde::{Deserialize, Serialize};

use battle_core::TeamId;

/// One item granted as part of a battle reward.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemReward {
    pub item_id: String,
    pub quantity: u32,
}

/// Rewards reported alongside the battle result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleRewards {
    pub experience: u32,
    pub gold: u32,
    pub items: Vec<ItemReward>,
}

/// External source of terminal rewards.
pub trait RewardOracle: Send + Sync {
    fn rewards(&self, winner: TeamId) -> BattleRewards;
}

/// Fixed reward table: team A (the player side) earns the configured
/// victory rewards, a team B win pays nothing.
#[derive(Debug, Clone)]
pub struct FixedRewards {
    pub victory: BattleRewards,
}

impl FixedRewards {
    pub fn new(experience: u32, gold: u32) -> Self {
        Self {
            victory: BattleRewards {
                experience,
                gold,
                items: Vec::new(),
            },
        }
    }
}

impl Default for FixedRewards {
    fn default() -> Self {
        Self::new(100, 50)
    }
}

impl RewardOracle for FixedRewards {
    fn rewards(&self, winner: TeamId) -> BattleRewards {
        match winner {
            TeamId::A => self.victory.clone(),
            TeamId::B => BattleRewards::default(),
        }
    }
}
