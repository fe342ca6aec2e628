//! Tournament state machine: round completion, advancement, and the terminal transition.
//!
//! `ongoing(1) -> ongoing(2) -> ... -> ongoing(total_rounds) -> completed(winner)`.
//! Each step runs inside the caller's transaction, so a failure anywhere leaves the previous
//! state intact.

use crate::logic::pairing::generate_pairs;
use crate::logic::rounds::{close_round, open_round, round_summary};
use crate::logic::scoring::report_result;
use crate::models::{
    BracketMatch, CompetitorId, Lookup, MatchId, Tournament, TournamentError, TournamentId,
};
use crate::store::RecordWriter;
use rand::Rng;
use serde::Serialize;

/// Result of trying to move a tournament forward.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Advancement {
    /// Current round still has pending matches. Not an error.
    RoundPending { round_num: u32, pending: usize },
    /// Survivors were paired into a new round.
    RoundAdvanced {
        round_num: u32,
        matches: Vec<BracketMatch>,
    },
    /// Final round decided; tournament completed.
    Completed {
        winner: CompetitorId,
        final_match: BracketMatch,
    },
}

/// Response to a reported result.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ReportOutcome {
    #[serde(rename = "match")]
    pub reported: BracketMatch,
    pub tournament_complete: bool,
    pub winner: Option<CompetitorId>,
    pub round_advanced: Option<u32>,
    pub new_matches: Vec<BracketMatch>,
    /// Matches still pending in the reported match's round.
    pub pending_in_round: usize,
}

impl ReportOutcome {
    fn new(reported: BracketMatch, advancement: Advancement) -> Self {
        let mut outcome = Self {
            reported,
            tournament_complete: false,
            winner: None,
            round_advanced: None,
            new_matches: Vec::new(),
            pending_in_round: 0,
        };
        match advancement {
            Advancement::RoundPending { pending, .. } => outcome.pending_in_round = pending,
            Advancement::RoundAdvanced { round_num, matches } => {
                outcome.round_advanced = Some(round_num);
                outcome.new_matches = matches;
            }
            Advancement::Completed { winner, .. } => {
                outcome.tournament_complete = true;
                outcome.winner = Some(winner);
            }
        }
        outcome
    }
}

/// Apply a score and run the completion check and advancement as one logical operation.
pub fn record_and_progress<W, R>(
    tx: &mut W,
    match_id: MatchId,
    score_a: u32,
    score_b: u32,
    rng: &mut R,
) -> Result<ReportOutcome, TournamentError>
where
    W: RecordWriter + ?Sized,
    R: Rng + ?Sized,
{
    let (reported, tournament) = report_result(tx, match_id, score_a, score_b)?;
    let advancement = advance(tx, tournament.id, rng)?;
    Ok(ReportOutcome::new(reported, advancement))
}

/// Advance the tournament if its current round is complete.
///
/// Non-final round: close it, collect winners in match-id order, reshuffle them into the
/// next round. Final round: crown the winner.
pub fn advance<W, R>(
    tx: &mut W,
    tournament_id: TournamentId,
    rng: &mut R,
) -> Result<Advancement, TournamentError>
where
    W: RecordWriter + ?Sized,
    R: Rng + ?Sized,
{
    let mut tournament = tx
        .tournament(tournament_id)
        .ok_or(TournamentError::NotFound(Lookup::Tournament(tournament_id)))?;
    if !tournament.is_ongoing() {
        return Err(TournamentError::NoActiveTournament(tournament_id));
    }

    let finished_round = tournament.current_round;
    let summary = round_summary(tx, tournament_id, finished_round);
    if !summary.is_complete() {
        return Ok(Advancement::RoundPending {
            round_num: finished_round,
            pending: summary.pending,
        });
    }

    if tournament.is_final_round() {
        let final_match = complete_tournament(tx, &mut tournament)?;
        let winner = tournament
            .winner
            .ok_or(TournamentError::InconsistentFinalState(tournament_id))?;
        return Ok(Advancement::Completed {
            winner,
            final_match,
        });
    }

    let survivors = tx
        .matches_in_round(tournament_id, finished_round)
        .iter()
        .map(|m| m.winner)
        .collect::<Option<Vec<CompetitorId>>>()
        .ok_or(TournamentError::InconsistentFinalState(tournament_id))?;

    close_round(tx, tournament_id, finished_round)?;
    tournament.current_round += 1;
    tx.update_tournament(&tournament)?;

    let pairing = generate_pairs(&survivors, tournament.current_round, rng)?;
    let matches = open_round(tx, tournament_id, &pairing);
    log::info!(
        "Tournament {} advanced to round {}/{} with {} match(es)",
        tournament.name,
        tournament.current_round,
        tournament.total_rounds,
        matches.len()
    );
    Ok(Advancement::RoundAdvanced {
        round_num: tournament.current_round,
        matches,
    })
}

/// Terminal transition: take the winner of the decided final match, mark the tournament
/// completed and close the final round. Returns the final match.
pub fn complete_tournament<W: RecordWriter + ?Sized>(
    tx: &mut W,
    tournament: &mut Tournament,
) -> Result<BracketMatch, TournamentError> {
    let final_match = tx
        .matches_in_round(tournament.id, tournament.total_rounds)
        .into_iter()
        .find(BracketMatch::is_completed)
        .ok_or(TournamentError::InconsistentFinalState(tournament.id))?;
    let Some(winner) = final_match.winner else {
        log::error!(
            "Final match {} of tournament {} completed without a winner",
            final_match.id,
            tournament.id
        );
        return Err(TournamentError::InconsistentFinalState(tournament.id));
    };

    tournament.crown(winner);
    tx.update_tournament(tournament)?;
    close_round(tx, tournament.id, tournament.total_rounds)?;
    log::info!("Tournament {} completed, winner {}", tournament.name, winner);
    Ok(final_match)
}
