//! Bracket business logic: pairing, scoring, round tracking, progression, standings.

mod pairing;
mod progression;
mod rounds;
mod scoring;
mod setup;
mod standings;

pub use pairing::{generate_pairs, Pairing, PairingResult};
pub use progression::{
    advance, complete_tournament, record_and_progress, Advancement, ReportOutcome,
};
pub use rounds::{check_round_completion, close_round, open_round, round_summary, RoundSummary};
pub use scoring::{match_in_tournament, report_result};
pub use setup::{create_tournament, CreatedTournament};
pub use standings::{compute_standings, Standing};
