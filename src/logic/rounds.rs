//! Round tracker: creating a round's fixtures, detecting completion, closing the round.

use crate::logic::pairing::PairingResult;
use crate::models::{
    BracketMatch, NewMatch, NewRound, RoundStatus, TournamentError, TournamentId,
};
use crate::store::{RecordReader, RecordWriter, StoreError};
use serde::Serialize;

/// Completion counts for one round.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct RoundSummary {
    pub round_num: u32,
    pub total: usize,
    pub pending: usize,
}

impl RoundSummary {
    pub fn is_complete(&self) -> bool {
        self.pending == 0
    }
}

pub fn round_summary<R: RecordReader + ?Sized>(
    records: &R,
    tournament_id: TournamentId,
    round_num: u32,
) -> RoundSummary {
    let matches = records.matches_in_round(tournament_id, round_num);
    RoundSummary {
        round_num,
        total: matches.len(),
        pending: matches.iter().filter(|m| m.is_pending()).count(),
    }
}

/// True iff no match of the round is still pending (vacuously true for an empty round).
pub fn check_round_completion<R: RecordReader + ?Sized>(
    records: &R,
    tournament_id: TournamentId,
    round_num: u32,
) -> bool {
    round_summary(records, tournament_id, round_num).is_complete()
}

/// Create one pending match per pair and the round record that counts them.
pub fn open_round<W: RecordWriter + ?Sized>(
    tx: &mut W,
    tournament_id: TournamentId,
    pairing: &PairingResult,
) -> Vec<BracketMatch> {
    let created: Vec<BracketMatch> = pairing
        .pairs
        .iter()
        .map(|pair| {
            tx.insert_match(NewMatch {
                tournament_id,
                round_num: pairing.round_num,
                competitor_a: pair.first,
                competitor_b: pair.second,
            })
        })
        .collect();
    tx.insert_round(NewRound {
        tournament_id,
        round_num: pairing.round_num,
        matches_in_round: created.len(),
    });
    created
}

/// Mark the round record completed.
pub fn close_round<W: RecordWriter + ?Sized>(
    tx: &mut W,
    tournament_id: TournamentId,
    round_num: u32,
) -> Result<(), TournamentError> {
    let mut round = tx.round(tournament_id, round_num).ok_or_else(|| {
        StoreError::Missing(format!("round {round_num} of tournament {tournament_id}"))
    })?;
    round.status = RoundStatus::Completed;
    tx.update_round(&round)?;
    Ok(())
}
