use battle_core::{CombatantId, CombatantStats, RosterEntry, TeamId};
use battle_runtime::{BattleSession, Event, SessionConfig, Topic, TurnEvent};

fn fighter(name: &str, hp: u32, attack: u32, speed: u32) -> RosterEntry {
    RosterEntry::new(name, CombatantStats::basic(hp, attack, speed))
}

fn drain_turns(rx: &mut tokio::sync::broadcast::Receiver<Event>) -> Vec<TurnEvent> {
    let mut events = Vec::new();
    while let Ok(Event::Turn(event)) = rx.try_recv() {
        events.push(event);
    }
    events
}

#[tokio::test]
async fn equal_speed_breaks_ties_by_ascending_name() {
    // Both attackers share speed 10; "Ares" must be scheduled before "Borin".
    let mut session = BattleSession::builder()
        .team_a(vec![fighter("Borin", 50, 30, 10), fighter("Ares", 50, 30, 10)])
        .team_b(vec![fighter("Cera", 60, 1, 5)])
        .config(SessionConfig::headless(10))
        .build()
        .unwrap();

    let mut rx = session.events().subscribe(Topic::Turn);
    let report = session.run().await.unwrap();
    assert_eq!(report.winner, TeamId::A);
    assert_eq!(report.rounds, 1);

    let actors: Vec<_> = drain_turns(&mut rx)
        .into_iter()
        .filter_map(|e| match e {
            TurnEvent::ActionStarted { actor, .. } => Some(actor),
            _ => None,
        })
        .collect();
    // Roster order is Borin (0), Ares (1); scheduling order is by name.
    assert_eq!(actors, vec![CombatantId(1), CombatantId(0)]);
}

#[tokio::test]
async fn rounds_run_in_descending_speed_across_both_teams() {
    let mut session = BattleSession::builder()
        .team_a(vec![fighter("Cera", 100, 30, 4), fighter("Ares", 100, 30, 9)])
        .team_b(vec![fighter("Dorn", 100, 30, 7), fighter("Borin", 100, 30, 2)])
        .config(SessionConfig::headless(11))
        .build()
        .unwrap();

    let mut rx = session.events().subscribe(Topic::Turn);
    session.run().await.unwrap();

    let events = drain_turns(&mut rx);
    let first_round: Vec<_> = events
        .iter()
        .skip(1)
        .take_while(|e| !matches!(e, TurnEvent::RoundStarted { .. }))
        .filter_map(|e| match e {
            TurnEvent::ActionStarted { actor, .. } => Some(*actor),
            _ => None,
        })
        .collect();
    // Ares 9, Dorn 7, Cera 4, Borin 2.
    assert_eq!(
        first_round,
        vec![CombatantId(1), CombatantId(2), CombatantId(0), CombatantId(3)]
    );

    // Nobody acts twice within any round.
    let mut seen: Vec<CombatantId> = Vec::new();
    for event in &events {
        match event {
            TurnEvent::RoundStarted { .. } => seen.clear(),
            TurnEvent::ActionStarted { actor, .. } => {
                assert!(!seen.contains(actor), "{actor} acted twice in one round");
                seen.push(*actor);
            }
        }
    }
}

#[tokio::test]
async fn replays_are_deterministic_for_the_same_seed() {
    let build = || {
        BattleSession::builder()
            .team_a(vec![fighter("Ares", 90, 20, 8), fighter("Borin", 90, 20, 5)])
            .team_b(vec![fighter("Cera", 90, 20, 7), fighter("Dorn", 90, 20, 3)])
            .config(SessionConfig::headless(42))
            .build()
            .unwrap()
    };

    let mut first = build();
    let mut second = build();
    let report_a = first.run().await.unwrap();
    let report_b = second.run().await.unwrap();

    assert_eq!(report_a, report_b);
    assert_eq!(first.snapshot().await, second.snapshot().await);
}
