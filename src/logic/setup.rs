//! Setup: validate the roster, create the tournament and seed round 1.

use crate::directory::CompetitorDirectory;
use crate::logic::pairing::generate_pairs;
use crate::logic::rounds::open_round;
use crate::models::{BracketMatch, CompetitorId, Lookup, Tournament, TournamentError};
use crate::store::RecordWriter;
use rand::Rng;
use serde::Serialize;
use std::collections::HashSet;

/// A freshly created tournament with its round 1 fixtures.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct CreatedTournament {
    pub tournament: Tournament,
    pub matches: Vec<BracketMatch>,
}

/// Create an ongoing tournament at round 1 and pair `competitors` into its first round.
///
/// The roster must be non-empty, a power of two, free of repeats and known to the
/// directory; the (trimmed, case-insensitive) name must be unused.
pub fn create_tournament<W, D, R>(
    tx: &mut W,
    directory: &D,
    name: &str,
    competitors: &[CompetitorId],
    rng: &mut R,
) -> Result<CreatedTournament, TournamentError>
where
    W: RecordWriter + ?Sized,
    D: CompetitorDirectory + ?Sized,
    R: Rng + ?Sized,
{
    let name = name.trim();
    if name.is_empty() {
        return Err(TournamentError::InvalidName);
    }
    if competitors.is_empty() {
        return Err(TournamentError::EmptyRoster);
    }
    // A single competitor is 2^0 but cannot form a bracket.
    if competitors.len() < 2 || !competitors.len().is_power_of_two() {
        return Err(TournamentError::NotPowerOfTwo(competitors.len()));
    }
    let mut seen = HashSet::with_capacity(competitors.len());
    for &id in competitors {
        if !seen.insert(id) {
            return Err(TournamentError::DuplicateCompetitor(id));
        }
        if directory.lookup(id).is_none() {
            return Err(TournamentError::NotFound(Lookup::Competitor(id)));
        }
    }
    if tx.tournament_named(name).is_some() {
        return Err(TournamentError::DuplicateName(name.to_string()));
    }

    let tournament = Tournament::new(name, competitors.len());
    tx.insert_tournament(tournament.clone())?;
    let pairing = generate_pairs(competitors, tournament.current_round, rng)?;
    let matches = open_round(tx, tournament.id, &pairing);
    log::info!(
        "Created tournament {} ({} competitors, {} rounds)",
        tournament.name,
        tournament.number_of_competitors,
        tournament.total_rounds
    );
    Ok(CreatedTournament {
        tournament,
        matches,
    })
}
