//! Request-boundary operations. Store, directory and notifier are injected at construction;
//! every mutation runs in one store transaction and notifications go out after commit.

use crate::directory::Roster;
use crate::logic::{
    compute_standings, create_tournament, match_in_tournament, record_and_progress,
    round_summary, CreatedTournament, ReportOutcome, Standing,
};
use crate::models::{
    BracketMatch, Competitor, CompetitorId, ErrorKind, GameRound, Lookup, MatchId, Tournament,
    TournamentError, TournamentId, TournamentStatus,
};
use crate::notify::{BracketEvent, NotificationSink};
use crate::store::RecordStore;
use serde::Serialize;
use std::sync::Arc;

/// One round of the bracket with its matches in id order.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct BracketRound {
    pub round: GameRound,
    pub matches: Vec<BracketMatch>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Bracket {
    pub tournament: Tournament,
    pub rounds: Vec<BracketRound>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct StandingsReport {
    pub tournament_id: TournamentId,
    pub status: TournamentStatus,
    pub current_round: u32,
    pub total_rounds: u32,
    pub standings: Vec<Standing>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ChampionSummary {
    pub tournament_id: TournamentId,
    pub winner: Competitor,
    pub runner_up: Option<Competitor>,
    pub final_match: BracketMatch,
}

pub struct BracketService<S> {
    store: S,
    roster: Arc<Roster>,
    notifier: Arc<dyn NotificationSink>,
}

fn unknown(id: TournamentId) -> TournamentError {
    TournamentError::NotFound(Lookup::Tournament(id))
}

/// Log a rejected operation; broken invariants are logged loudly.
fn observe(operation: &str, err: TournamentError) -> TournamentError {
    match err.kind() {
        ErrorKind::Consistency => log::error!("{} failed: {}", operation, err),
        ErrorKind::Validation | ErrorKind::State => log::debug!("{} rejected: {}", operation, err),
    }
    err
}

impl<S: RecordStore> BracketService<S> {
    pub fn new(store: S, roster: Arc<Roster>, notifier: Arc<dyn NotificationSink>) -> Self {
        Self {
            store,
            roster,
            notifier,
        }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// CreateTournament: validate, create, and seed round 1 atomically.
    pub fn create_tournament(
        &self,
        name: &str,
        competitors: &[CompetitorId],
    ) -> Result<CreatedTournament, TournamentError> {
        let mut rng = rand::thread_rng();
        let roster = self.roster.as_ref();
        let created = self
            .store
            .transaction(|tx| create_tournament(tx, roster, name, competitors, &mut rng))
            .map_err(|e| observe("create tournament", e))?;
        self.notifier.notify(BracketEvent::TournamentCreated {
            tournament_id: created.tournament.id,
            name: created.tournament.name.clone(),
            competitors: competitors.to_vec(),
        });
        Ok(created)
    }

    /// ReportMatchResult: score the match, then check the round and advance or finish the
    /// tournament, all in one transaction.
    pub fn report_match_result(
        &self,
        tournament_id: TournamentId,
        match_id: MatchId,
        score_a: u32,
        score_b: u32,
    ) -> Result<ReportOutcome, TournamentError> {
        let mut rng = rand::thread_rng();
        let outcome = self
            .store
            .transaction(|tx| {
                match_in_tournament(&*tx, tournament_id, match_id)?;
                record_and_progress(tx, match_id, score_a, score_b, &mut rng)
            })
            .map_err(|e| observe("report match result", e))?;

        if let Some(round_num) = outcome.round_advanced {
            self.notifier.notify(BracketEvent::RoundAdvanced {
                tournament_id,
                round_num,
                matches: outcome.new_matches.clone(),
            });
        }
        if let Some(winner) = outcome.winner {
            self.notifier.notify(BracketEvent::TournamentCompleted {
                tournament_id,
                winner,
                runner_up: outcome.reported.loser,
            });
        }
        Ok(outcome)
    }

    pub fn list_tournaments(&self) -> Result<Vec<Tournament>, TournamentError> {
        Ok(self.store.read(|records| records.tournaments())?)
    }

    pub fn tournament(&self, id: TournamentId) -> Result<Tournament, TournamentError> {
        self.store
            .read(|records| records.tournament(id))?
            .ok_or_else(|| unknown(id))
    }

    /// GetBracket: every match grouped by round.
    pub fn bracket(&self, id: TournamentId) -> Result<Bracket, TournamentError> {
        self.store.read(|records| -> Result<_, TournamentError> {
            let tournament = records.tournament(id).ok_or_else(|| unknown(id))?;
            let matches = records.matches(id);
            let rounds = records
                .rounds(id)
                .into_iter()
                .map(|round| BracketRound {
                    matches: matches
                        .iter()
                        .filter(|m| m.round_num == round.round_num)
                        .cloned()
                        .collect(),
                    round,
                })
                .collect();
            Ok(Bracket { tournament, rounds })
        })?
    }

    /// Pending fixtures of the current round (empty once completed).
    pub fn current_matches(&self, id: TournamentId) -> Result<Vec<BracketMatch>, TournamentError> {
        self.store.read(|records| -> Result<_, TournamentError> {
            let tournament = records.tournament(id).ok_or_else(|| unknown(id))?;
            if !tournament.is_ongoing() {
                return Ok(Vec::new());
            }
            let pending: Vec<BracketMatch> = records
                .matches_in_round(id, tournament.current_round)
                .into_iter()
                .filter(BracketMatch::is_pending)
                .collect();
            let summary = round_summary(records, id, tournament.current_round);
            log::debug!(
                "Tournament {} round {}: {}/{} pending",
                tournament.name,
                summary.round_num,
                summary.pending,
                summary.total
            );
            Ok(pending)
        })?
    }

    /// GetStandings.
    pub fn standings(&self, id: TournamentId) -> Result<StandingsReport, TournamentError> {
        let roster = self.roster.as_ref();
        self.store.read(|records| -> Result<_, TournamentError> {
            let tournament = records.tournament(id).ok_or_else(|| unknown(id))?;
            let standings = compute_standings(&tournament, &records.matches(id), roster);
            Ok(StandingsReport {
                tournament_id: id,
                status: tournament.status,
                current_round: tournament.current_round,
                total_rounds: tournament.total_rounds,
                standings,
            })
        })?
    }

    /// Winner, runner-up and final match of a completed tournament.
    pub fn champion(&self, id: TournamentId) -> Result<ChampionSummary, TournamentError> {
        let (tournament, final_match) = self.store.read(|records| -> Result<_, TournamentError> {
            let tournament = records.tournament(id).ok_or_else(|| unknown(id))?;
            let Some(winner) = tournament.winner else {
                return Err(TournamentError::TournamentNotCompleted(id));
            };
            let final_match = records
                .matches_in_round(id, tournament.total_rounds)
                .into_iter()
                .find(|m| m.winner == Some(winner))
                .ok_or(TournamentError::InconsistentFinalState(id))?;
            Ok((tournament, final_match))
        })??;

        let lookup = |competitor: CompetitorId| {
            self.roster
                .get(competitor)
                .ok_or(TournamentError::NotFound(Lookup::Competitor(competitor)))
        };
        let winner = tournament
            .winner
            .ok_or(TournamentError::TournamentNotCompleted(id))
            .and_then(lookup)?;
        let runner_up = final_match.loser.map(lookup).transpose()?;
        Ok(ChampionSummary {
            tournament_id: id,
            winner,
            runner_up,
            final_match,
        })
    }
}
