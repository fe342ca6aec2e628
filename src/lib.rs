//! Single-elimination tournament manager: library with models, bracket logic and the web API.

pub mod api;
pub mod config;
pub mod directory;
pub mod logic;
pub mod models;
pub mod notify;
pub mod service;
pub mod store;

pub use config::{ConfigError, ServerConfig};
pub use directory::{CompetitorDirectory, Roster, RosterError};
pub use logic::{
    advance, check_round_completion, close_round, complete_tournament, compute_standings,
    create_tournament, generate_pairs, match_in_tournament, open_round, record_and_progress,
    report_result, round_summary, Advancement, CreatedTournament, Pairing, PairingResult,
    ReportOutcome, RoundSummary, Standing,
};
pub use models::{
    BracketMatch, Competitor, CompetitorId, ErrorKind, GameRound, Lookup, MatchId, MatchStatus,
    RoundId, RoundStatus, Tournament, TournamentError, TournamentId, TournamentStatus,
};
pub use notify::{BracketEvent, ChannelSink, LogSink, NotificationSink};
pub use service::{Bracket, BracketRound, BracketService, ChampionSummary, StandingsReport};
pub use store::{MemoryStore, RecordReader, RecordStore, RecordWriter, StoreError};
