//! Standings: a read-only ranking derived from completed matches.

use crate::directory::CompetitorDirectory;
use crate::models::{BracketMatch, CompetitorId, Tournament, TournamentStatus};
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::HashMap;

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Standing {
    /// 1-based position after sorting.
    pub rank: usize,
    pub competitor: CompetitorId,
    pub name: String,
    pub wins: u32,
    pub losses: u32,
    /// Highest round the competitor played a decided match in.
    pub rounds_reached: u32,
    pub is_champion: bool,
}

/// Rank everyone who played a completed match by (rounds_reached desc, wins desc).
///
/// Equal keys keep iteration order: rounds descending, match id ascending, winner before
/// loser. The ranking is therefore not unique among competitors knocked out in the same
/// round.
pub fn compute_standings<D: CompetitorDirectory + ?Sized>(
    tournament: &Tournament,
    matches: &[BracketMatch],
    directory: &D,
) -> Vec<Standing> {
    let mut completed: Vec<&BracketMatch> = matches
        .iter()
        .filter(|m| m.tournament_id == tournament.id && m.is_completed())
        .collect();
    completed.sort_by_key(|m| (Reverse(m.round_num), m.id));

    let champion = match tournament.status {
        TournamentStatus::Completed => tournament.winner,
        TournamentStatus::Ongoing => None,
    };

    let mut table: Vec<Standing> = Vec::new();
    let mut index: HashMap<CompetitorId, usize> = HashMap::new();
    for m in completed {
        for (competitor, won) in [(m.winner, true), (m.loser, false)] {
            let Some(id) = competitor else { continue };
            let slot = *index.entry(id).or_insert_with(|| {
                table.push(Standing {
                    rank: 0,
                    competitor: id,
                    name: directory
                        .lookup(id)
                        .map(|c| c.name)
                        .unwrap_or_else(|| format!("Competitor {id}")),
                    wins: 0,
                    losses: 0,
                    rounds_reached: m.round_num,
                    is_champion: champion == Some(id),
                });
                table.len() - 1
            });
            let standing = &mut table[slot];
            standing.rounds_reached = standing.rounds_reached.max(m.round_num);
            if won {
                standing.wins += 1;
            } else {
                standing.losses += 1;
            }
        }
    }

    table.sort_by_key(|s| (Reverse(s.rounds_reached), Reverse(s.wins)));
    for (i, standing) in table.iter_mut().enumerate() {
        standing.rank = i + 1;
    }
    table
}
