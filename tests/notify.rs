//! Notifications are emitted after commits, never for rejected operations.

mod common;

use common::{roster_with, service_with, win};
use knockout_tournament_web::{
    BracketEvent, BracketService, ChannelSink, LogSink, MemoryStore, NotificationSink,
};
use std::sync::Arc;

#[test]
fn lifecycle_events_in_order() {
    let (service, sink, ids) = service_with(&["Ann", "Ben", "Cat", "Dan"]);
    let created = service.create_tournament("Notified", &ids).unwrap();
    let t = created.tournament.id;
    assert!(matches!(
        sink.taken().as_slice(),
        [BracketEvent::TournamentCreated { tournament_id, .. }] if *tournament_id == t
    ));

    let m1 = &created.matches[0];
    win(&service, t, m1, m1.competitor_a, 1, 0);
    assert!(sink.taken().is_empty());

    let m2 = &created.matches[1];
    let advanced = win(&service, t, m2, m2.competitor_a, 1, 0);
    assert!(matches!(
        sink.taken().as_slice(),
        [BracketEvent::RoundAdvanced { round_num: 2, matches, .. }] if matches.len() == 1
    ));

    let final_match = &advanced.new_matches[0];
    win(&service, t, final_match, final_match.competitor_b, 3, 2);
    let events = sink.taken();
    assert_eq!(
        events,
        vec![BracketEvent::TournamentCompleted {
            tournament_id: t,
            winner: final_match.competitor_b,
            runner_up: Some(final_match.competitor_a),
        }]
    );
}

#[test]
fn rejected_operations_are_silent() {
    let (service, sink, ids) = service_with(&["Ann", "Ben", "Cat"]);
    assert!(service.create_tournament("Three", &ids).is_err());
    let created = service.create_tournament("Two", &ids[..2]).unwrap();
    sink.taken();

    let m = &created.matches[0];
    assert!(service
        .report_match_result(created.tournament.id, m.id, 2, 2)
        .is_err());
    assert!(sink.taken().is_empty());
}

#[tokio::test]
async fn channel_sink_delivers_without_blocking() {
    let (sink, mut events) = ChannelSink::new();
    let event = BracketEvent::TournamentCreated {
        tournament_id: uuid::Uuid::new_v4(),
        name: "Queued".into(),
        competitors: Vec::new(),
    };
    sink.notify(event.clone());
    assert_eq!(events.recv().await, Some(event));

    drop(events);
    // Consumer gone: the event is dropped and logged, not an error for the caller.
    sink.notify(BracketEvent::TournamentCreated {
        tournament_id: uuid::Uuid::new_v4(),
        name: "Lost".into(),
        competitors: Vec::new(),
    });
}

#[test]
fn log_sink_serves_a_whole_tournament() {
    let (roster, ids) = roster_with(&["Ann", "Ben"]);
    let service = BracketService::new(MemoryStore::new(), roster, Arc::new(LogSink));
    let created = service.create_tournament("Logged", &ids).unwrap();
    let m = &created.matches[0];

    let outcome = win(&service, created.tournament.id, m, m.competitor_a, 2, 1);
    assert!(outcome.tournament_complete);
    let champion = service.champion(created.tournament.id).unwrap();
    assert_eq!(champion.winner.id, m.competitor_a);
}
