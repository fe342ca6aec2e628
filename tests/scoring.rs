//! Reporting results: precondition order, ties, double reports, winner selection.

mod common;

use common::roster_with;
use knockout_tournament_web::{
    create_tournament, record_and_progress, report_result, BracketMatch, CreatedTournament,
    Lookup, MatchStatus, MemoryStore, RecordStore, TournamentError,
};
use knockout_tournament_web::models::NewMatch;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded(n: usize) -> (MemoryStore, CreatedTournament) {
    let names: Vec<String> = common::names(n);
    let names: Vec<&str> = names.iter().map(String::as_str).collect();
    let (roster, ids) = roster_with(&names);
    let store = MemoryStore::new();
    let mut rng = StdRng::seed_from_u64(1);
    let created = store
        .transaction(|tx| create_tournament(tx, roster.as_ref(), "Cup", &ids, &mut rng))
        .unwrap();
    (store, created)
}

fn report(
    store: &MemoryStore,
    m: &BracketMatch,
    a: u32,
    b: u32,
) -> Result<BracketMatch, TournamentError> {
    store
        .transaction(|tx| report_result(tx, m.id, a, b))
        .map(|(reported, _)| reported)
}

fn stored(store: &MemoryStore, m: &BracketMatch) -> BracketMatch {
    store.read(|r| r.bracket_match(m.id)).unwrap().unwrap()
}

#[test]
fn higher_score_wins_on_either_side() {
    let (store, created) = seeded(4);
    let first = &created.matches[0];
    let second = &created.matches[1];

    let a_wins = report(&store, first, 3, 1).unwrap();
    assert_eq!(a_wins.status, MatchStatus::Completed);
    assert_eq!(a_wins.winner, Some(first.competitor_a));
    assert_eq!(a_wins.loser, Some(first.competitor_b));
    assert_eq!((a_wins.score_a, a_wins.score_b), (Some(3), Some(1)));
    assert!(a_wins.completed_at.is_some());

    let b_wins = report(&store, second, 0, 2).unwrap();
    assert_eq!(b_wins.winner, Some(second.competitor_b));
    assert_eq!(b_wins.loser, Some(second.competitor_a));
    assert_eq!(stored(&store, second), b_wins);
}

#[test]
fn unknown_match_is_not_found() {
    let (store, _) = seeded(2);
    let err = store
        .transaction(|tx| report_result(tx, 999, 1, 0))
        .unwrap_err();
    assert!(matches!(err, TournamentError::NotFound(Lookup::Match(999))));
}

#[test]
fn second_report_is_rejected_and_first_result_kept() {
    let (store, created) = seeded(4);
    let m = &created.matches[0];
    let first = report(&store, m, 3, 1).unwrap();

    let err = report(&store, m, 0, 5).unwrap_err();
    assert!(matches!(err, TournamentError::AlreadyCompleted(id) if id == m.id));
    assert_eq!(stored(&store, m), first);
}

#[test]
fn match_outside_current_round_is_wrong_round() {
    let (store, created) = seeded(4);
    let tournament = &created.tournament;
    let stray = store
        .transaction(|tx| -> Result<_, TournamentError> {
            Ok(tx.insert_match(NewMatch {
                tournament_id: tournament.id,
                round_num: 2,
                competitor_a: created.matches[0].competitor_a,
                competitor_b: created.matches[1].competitor_a,
            }))
        })
        .unwrap();

    let err = report(&store, &stray, 2, 1).unwrap_err();
    assert!(matches!(
        err,
        TournamentError::WrongRound {
            current: 1,
            requested: 2
        }
    ));
    assert!(stored(&store, &stray).is_pending());
}

#[test]
fn finished_tournament_has_no_active_round() {
    let (store, created) = seeded(2);
    let final_match = &created.matches[0];
    store
        .transaction(|tx| {
            record_and_progress(tx, final_match.id, 1, 0, &mut StdRng::seed_from_u64(2))
        })
        .unwrap();
    let stray = store
        .transaction(|tx| -> Result<_, TournamentError> {
            Ok(tx.insert_match(NewMatch {
                tournament_id: created.tournament.id,
                round_num: 1,
                competitor_a: final_match.competitor_a,
                competitor_b: final_match.competitor_b,
            }))
        })
        .unwrap();

    let err = report(&store, &stray, 1, 0).unwrap_err();
    assert!(matches!(err, TournamentError::NoActiveTournament(id) if id == created.tournament.id));
}

#[test]
fn completed_check_precedes_tie_check() {
    let (store, created) = seeded(4);
    let m = &created.matches[0];
    report(&store, m, 1, 0).unwrap();
    assert!(matches!(
        report(&store, m, 2, 2),
        Err(TournamentError::AlreadyCompleted(_))
    ));
}

proptest! {
    #[test]
    fn tied_scores_are_rejected_and_leave_match_unchanged(score in any::<u32>()) {
        let (store, created) = seeded(4);
        let m = &created.matches[0];
        let err = report(&store, m, score, score).unwrap_err();
        prop_assert!(matches!(err, TournamentError::TiedScoreRejected));
        prop_assert_eq!(&stored(&store, m), m);
    }
}
