//! Data structures for the bracket: competitors, matches, rounds, tournament state.

mod competitor;
mod game;
mod round;
mod tournament;

pub use competitor::{Competitor, CompetitorId};
pub use game::{BracketMatch, MatchId, MatchStatus, NewMatch};
pub use round::{GameRound, NewRound, RoundId, RoundStatus};
pub use tournament::{
    ErrorKind, Lookup, Tournament, TournamentError, TournamentId, TournamentStatus,
};
