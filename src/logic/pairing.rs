//! Pairing generator: shuffle a round's competitors and split them into consecutive pairs.

use crate::models::{CompetitorId, TournamentError};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// One fixture: (first, second) in shuffled order.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Pairing {
    pub first: CompetitorId,
    pub second: CompetitorId,
}

/// Pairs for one round, in shuffled order.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PairingResult {
    pub round_num: u32,
    pub pairs: Vec<Pairing>,
}

/// Uniformly shuffle `competitors` and pair them as (c0, c1), (c2, c3), ...
///
/// Every round is reshuffled independently; there is no seeding against earlier rounds.
/// Fails with `InvalidBracketSize` on an odd count.
pub fn generate_pairs<R: Rng + ?Sized>(
    competitors: &[CompetitorId],
    round_num: u32,
    rng: &mut R,
) -> Result<PairingResult, TournamentError> {
    if competitors.len() % 2 != 0 {
        return Err(TournamentError::InvalidBracketSize(competitors.len()));
    }
    let mut shuffled = competitors.to_vec();
    shuffled.shuffle(rng);

    let pairs = shuffled
        .chunks_exact(2)
        .map(|chunk| Pairing {
            first: chunk[0],
            second: chunk[1],
        })
        .collect();
    Ok(PairingResult { round_num, pairs })
}
