//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use knockout_tournament_web::{
    BracketEvent, BracketMatch, BracketService, CompetitorId, MemoryStore, NotificationSink,
    ReportOutcome, Roster, TournamentId,
};
use std::sync::{Arc, Mutex};

/// Keeps every event it receives.
#[derive(Default)]
pub struct RecordingSink {
    pub events: Mutex<Vec<BracketEvent>>,
}

impl RecordingSink {
    pub fn taken(&self) -> Vec<BracketEvent> {
        std::mem::take(&mut *self.events.lock().unwrap())
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&self, event: BracketEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// Roster with one competitor per name, ids in the same order.
pub fn roster_with(names: &[&str]) -> (Arc<Roster>, Vec<CompetitorId>) {
    let roster = Roster::new();
    let ids = names
        .iter()
        .map(|name| roster.register(name, None).unwrap().id)
        .collect();
    (Arc::new(roster), ids)
}

pub fn service_with(
    names: &[&str],
) -> (BracketService<MemoryStore>, Arc<RecordingSink>, Vec<CompetitorId>) {
    let (roster, ids) = roster_with(names);
    let sink = Arc::new(RecordingSink::default());
    let service = BracketService::new(MemoryStore::new(), roster, sink.clone());
    (service, sink, ids)
}

/// Names like P0, P1, ...
pub fn names(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("P{i}")).collect()
}

/// Report `m` so that `winner` wins `high`-`low`, whichever side they are on.
pub fn win(
    service: &BracketService<MemoryStore>,
    tournament_id: TournamentId,
    m: &BracketMatch,
    winner: CompetitorId,
    high: u32,
    low: u32,
) -> ReportOutcome {
    let (score_a, score_b) = if m.competitor_a == winner {
        (high, low)
    } else {
        assert_eq!(m.competitor_b, winner, "winner must play in the match");
        (low, high)
    };
    service
        .report_match_result(tournament_id, m.id, score_a, score_b)
        .unwrap()
}

/// Report every pending match of the current round with competitor_a winning 1-0.
pub fn play_round(
    service: &BracketService<MemoryStore>,
    tournament_id: TournamentId,
) -> ReportOutcome {
    let matches = service.current_matches(tournament_id).unwrap();
    assert!(!matches.is_empty(), "round has no pending matches");
    let mut last = None;
    for m in &matches {
        last = Some(win(service, tournament_id, m, m.competitor_a, 1, 0));
    }
    last.unwrap()
}
