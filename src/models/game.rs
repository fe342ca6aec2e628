//! Match record: two competitors, their scores, and a pending/completed lifecycle.

use crate::models::competitor::CompetitorId;
use crate::models::tournament::{TournamentError, TournamentId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Store-assigned match id. Ascending in creation order.
pub type MatchId = u64;

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    Pending,
    Completed,
}

/// A single bracket match (fixture until completed).
///
/// Completed matches always carry both scores, a winner and a loser; the only mutation a
/// match ever sees is [`BracketMatch::record_result`].
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BracketMatch {
    pub id: MatchId,
    pub tournament_id: TournamentId,
    pub round_num: u32,
    pub competitor_a: CompetitorId,
    pub competitor_b: CompetitorId,
    /// None until reported.
    pub score_a: Option<u32>,
    pub score_b: Option<u32>,
    pub winner: Option<CompetitorId>,
    pub loser: Option<CompetitorId>,
    pub status: MatchStatus,
    pub completed_at: Option<DateTime<Utc>>,
}

/// A match that has not been assigned an id yet.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NewMatch {
    pub tournament_id: TournamentId,
    pub round_num: u32,
    pub competitor_a: CompetitorId,
    pub competitor_b: CompetitorId,
}

impl NewMatch {
    /// Materialise as a pending match with the given id.
    pub fn into_match(self, id: MatchId) -> BracketMatch {
        BracketMatch {
            id,
            tournament_id: self.tournament_id,
            round_num: self.round_num,
            competitor_a: self.competitor_a,
            competitor_b: self.competitor_b,
            score_a: None,
            score_b: None,
            winner: None,
            loser: None,
            status: MatchStatus::Pending,
            completed_at: None,
        }
    }
}

impl BracketMatch {
    pub fn is_pending(&self) -> bool {
        self.status == MatchStatus::Pending
    }

    pub fn is_completed(&self) -> bool {
        self.status == MatchStatus::Completed
    }

    /// True if `competitor` plays in this match.
    pub fn involves(&self, competitor: CompetitorId) -> bool {
        self.competitor_a == competitor || self.competitor_b == competitor
    }

    /// Apply the final score: higher score wins. Rejects a second report and ties, leaving
    /// the match untouched in both cases.
    pub fn record_result(&mut self, score_a: u32, score_b: u32) -> Result<(), TournamentError> {
        if self.is_completed() {
            return Err(TournamentError::AlreadyCompleted(self.id));
        }
        let (winner, loser) = match score_a.cmp(&score_b) {
            std::cmp::Ordering::Greater => (self.competitor_a, self.competitor_b),
            std::cmp::Ordering::Less => (self.competitor_b, self.competitor_a),
            std::cmp::Ordering::Equal => return Err(TournamentError::TiedScoreRejected),
        };
        self.score_a = Some(score_a);
        self.score_b = Some(score_b);
        self.winner = Some(winner);
        self.loser = Some(loser);
        self.status = MatchStatus::Completed;
        self.completed_at = Some(Utc::now());
        Ok(())
    }
}
