//! Tournament record, TournamentStatus and the error type shared by all bracket operations.

use crate::models::competitor::CompetitorId;
use crate::models::game::MatchId;
use crate::store::StoreError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Which record a `NotFound` refers to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Lookup {
    Tournament(TournamentId),
    Match(MatchId),
    Competitor(CompetitorId),
}

impl fmt::Display for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lookup::Tournament(id) => write!(f, "tournament {id}"),
            Lookup::Match(id) => write!(f, "match {id}"),
            Lookup::Competitor(id) => write!(f, "competitor {id}"),
        }
    }
}

/// Coarse classification of [`TournamentError`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// Bad input shape. Never retried; nothing was mutated.
    Validation,
    /// The request does not fit the current bracket state; re-fetch before retrying.
    State,
    /// A broken invariant inside the core.
    Consistency,
}

/// Errors that can occur during tournament operations.
#[derive(Debug, thiserror::Error)]
pub enum TournamentError {
    #[error("Tournament name must not be empty")]
    InvalidName,
    #[error("A tournament needs at least one competitor")]
    EmptyRoster,
    #[error("Number of competitors must be a power of two (got {0})")]
    NotPowerOfTwo(usize),
    #[error("A tournament named {0:?} already exists")]
    DuplicateName(String),
    #[error("Competitor {0} appears more than once in the roster")]
    DuplicateCompetitor(CompetitorId),
    #[error("Cannot pair an odd number of competitors ({0})")]
    InvalidBracketSize(usize),
    #[error("Not found: {0}")]
    NotFound(Lookup),
    #[error("Match {match_id} does not belong to tournament {tournament_id}")]
    MatchNotInTournament {
        match_id: MatchId,
        tournament_id: TournamentId,
    },
    #[error("Match {0} already completed")]
    AlreadyCompleted(MatchId),
    #[error("Tournament {0} is not ongoing")]
    NoActiveTournament(TournamentId),
    #[error("Can only update matches in round {current} (match is in round {requested})")]
    WrongRound { current: u32, requested: u32 },
    #[error("Match cannot end in a tie")]
    TiedScoreRejected,
    #[error("Tournament {0} is not completed yet")]
    TournamentNotCompleted(TournamentId),
    #[error("Final round of tournament {0} has no decided match")]
    InconsistentFinalState(TournamentId),
    #[error("Record store error: {0}")]
    Store(#[from] StoreError),
}

impl TournamentError {
    pub fn kind(&self) -> ErrorKind {
        use TournamentError::*;
        match self {
            InvalidName
            | EmptyRoster
            | NotPowerOfTwo(_)
            | DuplicateName(_)
            | DuplicateCompetitor(_)
            | InvalidBracketSize(_)
            | TiedScoreRejected => ErrorKind::Validation,
            NotFound(_)
            | MatchNotInTournament { .. }
            | AlreadyCompleted(_)
            | NoActiveTournament(_)
            | WrongRound { .. }
            | TournamentNotCompleted(_) => ErrorKind::State,
            InconsistentFinalState(_) | Store(_) => ErrorKind::Consistency,
        }
    }
}

/// Overall progress of a tournament.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentStatus {
    #[default]
    Ongoing,
    Completed,
}

/// Tournament progress. `winner` is set exactly when `status` is `Completed`, and
/// `1 <= current_round <= total_rounds` holds throughout.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub status: TournamentStatus,
    pub number_of_competitors: usize,
    /// 1-indexed.
    pub current_round: u32,
    /// log2(number_of_competitors).
    pub total_rounds: u32,
    pub winner: Option<CompetitorId>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Tournament {
    /// Create an ongoing tournament at round 1. `number_of_competitors` must already be a
    /// validated power of two.
    pub fn new(name: impl Into<String>, number_of_competitors: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            status: TournamentStatus::Ongoing,
            number_of_competitors,
            current_round: 1,
            total_rounds: number_of_competitors.trailing_zeros(),
            winner: None,
            created_at: Utc::now(),
            completed_at: None,
        }
    }

    pub fn is_ongoing(&self) -> bool {
        self.status == TournamentStatus::Ongoing
    }

    pub fn is_final_round(&self) -> bool {
        self.current_round >= self.total_rounds
    }

    /// Terminal transition.
    pub fn crown(&mut self, winner: CompetitorId) {
        self.winner = Some(winner);
        self.status = TournamentStatus::Completed;
        self.completed_at = Some(Utc::now());
    }
}
