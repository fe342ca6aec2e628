//! Match lifecycle: validating and applying a reported score.

use crate::models::{BracketMatch, Lookup, MatchId, Tournament, TournamentError, TournamentId};
use crate::store::{RecordReader, RecordWriter};

/// Look up a match that must belong to `tournament_id`.
pub fn match_in_tournament<R: RecordReader + ?Sized>(
    records: &R,
    tournament_id: TournamentId,
    match_id: MatchId,
) -> Result<BracketMatch, TournamentError> {
    let found = records
        .bracket_match(match_id)
        .ok_or(TournamentError::NotFound(Lookup::Match(match_id)))?;
    if found.tournament_id != tournament_id {
        return Err(TournamentError::MatchNotInTournament {
            match_id,
            tournament_id,
        });
    }
    Ok(found)
}

/// Record the final score of a pending match in its tournament's current round.
///
/// Checks, first failure wins: match exists, match still pending, tournament ongoing,
/// match in the current round, scores differ. On success the match is completed with the
/// higher scorer as winner; on failure nothing is written. Returns the updated match and
/// its tournament as read in this transaction.
pub fn report_result<W: RecordWriter + ?Sized>(
    tx: &mut W,
    match_id: MatchId,
    score_a: u32,
    score_b: u32,
) -> Result<(BracketMatch, Tournament), TournamentError> {
    let mut reported = tx
        .bracket_match(match_id)
        .ok_or(TournamentError::NotFound(Lookup::Match(match_id)))?;
    if !reported.is_pending() {
        return Err(TournamentError::AlreadyCompleted(match_id));
    }
    let tournament = tx
        .tournament(reported.tournament_id)
        .filter(Tournament::is_ongoing)
        .ok_or(TournamentError::NoActiveTournament(reported.tournament_id))?;
    if reported.round_num != tournament.current_round {
        return Err(TournamentError::WrongRound {
            current: tournament.current_round,
            requested: reported.round_num,
        });
    }

    reported.record_result(score_a, score_b)?;
    tx.update_match(&reported)?;
    log::debug!(
        "Match {} of tournament {} recorded {}-{}",
        reported.id,
        tournament.id,
        score_a,
        score_b
    );
    Ok((reported, tournament))
}
