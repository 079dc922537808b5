//! Per-turn action execution: the combatant action state machine.
//!
//! A turn runs to completion once started: the actor moves through
//! `Idle → Moving/Casting → hit resolution → Idle`, yielding at presentation
//! waypoints. Stale actors and targets are skipped, never fatal. Area skills
//! fan out one hit task per target; every task is joined before the turn is
//! considered finished.

use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::debug;

use battle_core::{
    ActionKind, ActionState, BattleEngine, CombatantId, basic_attack_damage, skill_damage,
};

use crate::driver::{AnimationCue, play_bounded};
use crate::error::{Result, SessionError};
use crate::events::{CombatantEvent, Event, TurnEvent};
use crate::session::Shared;

/// Execute one combatant's turn to completion.
pub(crate) async fn execute_turn(shared: &Arc<Shared>, actor: CombatantId) -> Result<()> {
    let kind = {
        let mut state = shared.state.lock().await;
        let mut engine = BattleEngine::new(&mut state, &shared.config.battle);
        if !engine.begin_turn(actor) {
            debug!(target: "battle_runtime::scheduler", %actor, "Stale or dead actor, skipping turn");
            return Ok(());
        }
        engine.choose_action(actor)
    };

    shared.events.publish(Event::Turn(TurnEvent::ActionStarted {
        actor,
        action: kind,
    }));

    let result = match kind {
        ActionKind::BasicAttack => basic_attack(shared, actor).await,
        ActionKind::Skill => cast_skill(shared, actor).await,
    };

    {
        let mut state = shared.state.lock().await;
        BattleEngine::new(&mut state, &shared.config.battle).end_turn(actor);
    }
    result
}

/// Basic attack: close in on one random enemy, land the hit, gain energy.
async fn basic_attack(shared: &Arc<Shared>, actor: CombatantId) -> Result<()> {
    let (target, damage) = {
        let mut state = shared.state.lock().await;
        let mut engine = BattleEngine::new(&mut state, &shared.config.battle);
        let Some(target) = engine.select_target(actor, &shared.rng) else {
            // No alive enemy; the turn is a no-op.
            return Ok(());
        };
        let damage = match engine.state().combatant(actor) {
            Some(record) => basic_attack_damage(&record.stats),
            None => return Ok(()),
        };
        engine.set_action_state(actor, ActionState::Moving);
        (target, damage)
    };

    let timeout = shared.config.animation_timeout;
    play_bounded(
        &*shared.driver,
        AnimationCue::MoveToTarget { actor, target },
        timeout,
    )
    .await;
    play_bounded(&*shared.driver, AnimationCue::Attack { actor }, timeout).await;

    resolve_hit(shared, target, damage).await;

    // Landing the attack grants the actor its energy gain.
    let mut state = shared.state.lock().await;
    let mut engine = BattleEngine::new(&mut state, &shared.config.battle);
    if let Some(energy) = engine.grant_event_energy(actor) {
        shared
            .events
            .publish(Event::Combatant(CombatantEvent::EnergyChanged {
                id: actor,
                energy,
            }));
    }
    engine.set_action_state(actor, ActionState::Idle);
    Ok(())
}

/// Special skill: windup, then resolve against one random enemy or, for an
/// area skill, all alive enemies simultaneously. Energy resets to exactly 0
/// on completion in every branch, including "no valid targets".
async fn cast_skill(shared: &Arc<Shared>, actor: CombatantId) -> Result<()> {
    let skill = {
        let mut state = shared.state.lock().await;
        let mut engine = BattleEngine::new(&mut state, &shared.config.battle);
        let Some(skill) = engine
            .state()
            .combatant(actor)
            .and_then(|record| record.stats.skill.clone())
        else {
            return Ok(());
        };
        engine.set_action_state(actor, ActionState::Casting);
        skill
    };

    let timeout = shared.config.animation_timeout;
    play_bounded(&*shared.driver, AnimationCue::CastWindup { actor }, timeout).await;

    // Damage uses the energy accumulated at cast time, including overflow
    // past the cap; reset happens only after resolution.
    let (targets, damage) = {
        let mut state = shared.state.lock().await;
        let mut engine = BattleEngine::new(&mut state, &shared.config.battle);
        let damage = match engine.state().combatant(actor) {
            Some(record) => skill_damage(&record.stats, &skill, record.energy(), &shared.config.battle),
            None => return Ok(()),
        };
        let targets = if skill.is_area() {
            engine.alive_enemies(actor)
        } else {
            engine.select_target(actor, &shared.rng).into_iter().collect()
        };
        (targets, damage)
    };

    if targets.is_empty() {
        debug!(target: "battle_runtime::scheduler", %actor, "Skill found no alive target");
        return finish_skill(shared, actor).await;
    }

    // One hit task per target, all launched at once and all joined before
    // the turn completes.
    let mut hits = JoinSet::new();
    for target in targets {
        let shared = Arc::clone(shared);
        let delivery = skill.delivery;
        hits.spawn(async move {
            play_bounded(
                &*shared.driver,
                AnimationCue::SkillDelivery {
                    actor,
                    target,
                    delivery,
                },
                shared.config.animation_timeout,
            )
            .await;
            resolve_hit(&shared, target, damage).await;
        });
    }
    while let Some(joined) = hits.join_next().await {
        joined.map_err(SessionError::HitTaskJoin)?;
    }

    finish_skill(shared, actor).await
}

/// Skill completion: unconditional energy reset and return to idle.
async fn finish_skill(shared: &Arc<Shared>, actor: CombatantId) -> Result<()> {
    let mut state = shared.state.lock().await;
    let mut engine = BattleEngine::new(&mut state, &shared.config.battle);
    if let Some(energy) = engine.reset_energy(actor) {
        shared
            .events
            .publish(Event::Combatant(CombatantEvent::EnergyChanged {
                id: actor,
                energy,
            }));
    }
    engine.set_action_state(actor, ActionState::Idle);
    Ok(())
}

/// Land one hit on one target and play out its reaction.
///
/// The per-target reaction lock serializes concurrent hits: a second hit's
/// HP subtraction and notifications are deferred until the prior reaction
/// has fully completed. After the battle result is finalized no hit applies.
async fn resolve_hit(shared: &Shared, target: CombatantId, damage: u32) {
    let Some(reaction) = shared.reactions.get(&target) else {
        return;
    };
    let _reaction = reaction.lock().await;

    let outcome = {
        let mut state = shared.state.lock().await;
        let mut engine = BattleEngine::new(&mut state, &shared.config.battle);
        match engine.apply_hit(target, damage) {
            Some(outcome) => outcome,
            None => {
                // Dead or stale target, or the battle already ended: the
                // rest of the effect is a no-op.
                debug!(target: "battle_runtime::scheduler", %target, "Hit discarded");
                return;
            }
        }
    };

    shared
        .events
        .publish(Event::Combatant(CombatantEvent::HpChanged {
            id: target,
            old_hp: outcome.old_hp,
            new_hp: outcome.new_hp,
        }));
    if let Some(energy) = outcome.energy {
        shared
            .events
            .publish(Event::Combatant(CombatantEvent::EnergyChanged {
                id: target,
                energy,
            }));
    }
    if outcome.lethal {
        shared
            .events
            .publish(Event::Combatant(CombatantEvent::Died { id: target }));
    }

    let timeout = shared.config.animation_timeout;
    play_bounded(&*shared.driver, AnimationCue::HitReaction { target }, timeout).await;

    if outcome.lethal {
        play_bounded(&*shared.driver, AnimationCue::Death { id: target }, timeout).await;
    } else {
        let mut state = shared.state.lock().await;
        BattleEngine::new(&mut state, &shared.config.battle).settle_hit(target);
    }
}
