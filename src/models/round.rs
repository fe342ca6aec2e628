//! Round record: one elimination stage of one tournament.

use crate::models::tournament::TournamentId;
use serde::{Deserialize, Serialize};

/// Store-assigned round id.
pub type RoundId = u64;

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundStatus {
    #[default]
    Ongoing,
    Completed,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameRound {
    pub id: RoundId,
    pub tournament_id: TournamentId,
    pub round_num: u32,
    pub matches_in_round: usize,
    pub status: RoundStatus,
}

/// A round that has not been assigned an id yet.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NewRound {
    pub tournament_id: TournamentId,
    pub round_num: u32,
    pub matches_in_round: usize,
}

impl NewRound {
    pub fn into_round(self, id: RoundId) -> GameRound {
        GameRound {
            id,
            tournament_id: self.tournament_id,
            round_num: self.round_num,
            matches_in_round: self.matches_in_round,
            status: RoundStatus::Ongoing,
        }
    }
}

impl GameRound {
    pub fn is_completed(&self) -> bool {
        self.status == RoundStatus::Completed
    }
}
