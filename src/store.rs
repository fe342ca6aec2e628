//! Transactional record store for tournaments, rounds and matches.
//!
//! Core operations never touch storage directly: they receive a [`RecordReader`] or a
//! [`RecordWriter`] handle and work on plain records. [`MemoryStore`] runs every
//! transaction under one exclusive lock and stages writes, so a transaction that returns
//! an error leaves no trace and two transactions never interleave.

use crate::models::{
    BracketMatch, GameRound, MatchId, NewMatch, NewRound, RoundId, Tournament, TournamentId,
};
use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record store lock poisoned")]
    Poisoned,
    #[error("{0} already exists")]
    Conflict(String),
    #[error("{0} does not exist")]
    Missing(String),
}

/// Read access to stored records. All list queries return records in ascending id order
/// (tournaments: creation order).
pub trait RecordReader {
    fn tournament(&self, id: TournamentId) -> Option<Tournament>;

    fn tournaments(&self) -> Vec<Tournament>;

    fn bracket_match(&self, id: MatchId) -> Option<BracketMatch>;

    /// Every match of a tournament, all rounds.
    fn matches(&self, tournament_id: TournamentId) -> Vec<BracketMatch>;

    fn rounds(&self, tournament_id: TournamentId) -> Vec<GameRound>;

    /// Case-insensitive lookup by name.
    fn tournament_named(&self, name: &str) -> Option<Tournament> {
        self.tournaments()
            .into_iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
    }

    fn matches_in_round(&self, tournament_id: TournamentId, round_num: u32) -> Vec<BracketMatch> {
        self.matches(tournament_id)
            .into_iter()
            .filter(|m| m.round_num == round_num)
            .collect()
    }

    fn round(&self, tournament_id: TournamentId, round_num: u32) -> Option<GameRound> {
        self.rounds(tournament_id)
            .into_iter()
            .find(|r| r.round_num == round_num)
    }
}

/// Write access inside a transaction. Records are only ever added or updated.
pub trait RecordWriter: RecordReader {
    fn insert_tournament(&mut self, tournament: Tournament) -> Result<(), StoreError>;

    fn update_tournament(&mut self, tournament: &Tournament) -> Result<(), StoreError>;

    /// Assigns the next match id.
    fn insert_match(&mut self, new: NewMatch) -> BracketMatch;

    fn update_match(&mut self, bracket_match: &BracketMatch) -> Result<(), StoreError>;

    /// Assigns the next round id.
    fn insert_round(&mut self, new: NewRound) -> GameRound;

    fn update_round(&mut self, round: &GameRound) -> Result<(), StoreError>;
}

/// A store that can run reads and atomic multi-record transactions.
pub trait RecordStore: Send + Sync {
    fn read<T>(&self, f: impl FnOnce(&dyn RecordReader) -> T) -> Result<T, StoreError>;

    /// Run `f` as one unit: its writes become visible together when it returns `Ok`, and
    /// are discarded when it returns `Err`.
    fn transaction<T, E>(
        &self,
        f: impl FnOnce(&mut dyn RecordWriter) -> Result<T, E>,
    ) -> Result<T, E>
    where
        E: From<StoreError>;
}

#[derive(Clone, Debug, Default)]
struct Tables {
    tournaments: HashMap<TournamentId, Tournament>,
    rounds: BTreeMap<RoundId, GameRound>,
    matches: BTreeMap<MatchId, BracketMatch>,
    last_match_id: MatchId,
    last_round_id: RoundId,
}

impl Tables {
    /// Empty write set that continues this table's id sequences.
    fn staging(&self) -> Self {
        Self {
            last_match_id: self.last_match_id,
            last_round_id: self.last_round_id,
            ..Self::default()
        }
    }

    fn apply(&mut self, staged: Tables) {
        self.tournaments.extend(staged.tournaments);
        self.rounds.extend(staged.rounds);
        self.matches.extend(staged.matches);
        self.last_match_id = staged.last_match_id;
        self.last_round_id = staged.last_round_id;
    }
}

fn by_creation(mut tournaments: Vec<Tournament>) -> Vec<Tournament> {
    tournaments.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.name.cmp(&b.name)));
    tournaments
}

impl RecordReader for Tables {
    fn tournament(&self, id: TournamentId) -> Option<Tournament> {
        self.tournaments.get(&id).cloned()
    }

    fn tournaments(&self) -> Vec<Tournament> {
        by_creation(self.tournaments.values().cloned().collect())
    }

    fn bracket_match(&self, id: MatchId) -> Option<BracketMatch> {
        self.matches.get(&id).cloned()
    }

    fn matches(&self, tournament_id: TournamentId) -> Vec<BracketMatch> {
        self.matches
            .values()
            .filter(|m| m.tournament_id == tournament_id)
            .cloned()
            .collect()
    }

    fn rounds(&self, tournament_id: TournamentId) -> Vec<GameRound> {
        self.rounds
            .values()
            .filter(|r| r.tournament_id == tournament_id)
            .cloned()
            .collect()
    }
}

/// Staged view over committed tables: reads see staged records first.
struct Transaction<'a> {
    base: &'a Tables,
    staged: Tables,
}

/// Committed records overlaid with staged ones, in key order.
fn overlay<K: Ord + Copy, V: Clone>(
    base: &BTreeMap<K, V>,
    staged: &BTreeMap<K, V>,
    keep: impl Fn(&V) -> bool,
) -> Vec<V> {
    let mut merged: BTreeMap<K, &V> = base
        .iter()
        .filter(|(_, v)| keep(v))
        .map(|(k, v)| (*k, v))
        .collect();
    merged.extend(staged.iter().filter(|(_, v)| keep(v)).map(|(k, v)| (*k, v)));
    merged.into_values().cloned().collect()
}

impl RecordReader for Transaction<'_> {
    fn tournament(&self, id: TournamentId) -> Option<Tournament> {
        self.staged
            .tournaments
            .get(&id)
            .or_else(|| self.base.tournaments.get(&id))
            .cloned()
    }

    fn tournaments(&self) -> Vec<Tournament> {
        let mut all = self.base.tournaments.clone();
        all.extend(self.staged.tournaments.clone());
        by_creation(all.into_values().collect())
    }

    fn bracket_match(&self, id: MatchId) -> Option<BracketMatch> {
        self.staged
            .matches
            .get(&id)
            .or_else(|| self.base.matches.get(&id))
            .cloned()
    }

    fn matches(&self, tournament_id: TournamentId) -> Vec<BracketMatch> {
        overlay(&self.base.matches, &self.staged.matches, |m| {
            m.tournament_id == tournament_id
        })
    }

    fn rounds(&self, tournament_id: TournamentId) -> Vec<GameRound> {
        overlay(&self.base.rounds, &self.staged.rounds, |r| {
            r.tournament_id == tournament_id
        })
    }
}

impl RecordWriter for Transaction<'_> {
    fn insert_tournament(&mut self, tournament: Tournament) -> Result<(), StoreError> {
        if self.tournament(tournament.id).is_some() {
            return Err(StoreError::Conflict(format!("tournament {}", tournament.id)));
        }
        self.staged.tournaments.insert(tournament.id, tournament);
        Ok(())
    }

    fn update_tournament(&mut self, tournament: &Tournament) -> Result<(), StoreError> {
        if self.tournament(tournament.id).is_none() {
            return Err(StoreError::Missing(format!("tournament {}", tournament.id)));
        }
        self.staged
            .tournaments
            .insert(tournament.id, tournament.clone());
        Ok(())
    }

    fn insert_match(&mut self, new: NewMatch) -> BracketMatch {
        self.staged.last_match_id += 1;
        let created = new.into_match(self.staged.last_match_id);
        self.staged.matches.insert(created.id, created.clone());
        created
    }

    fn update_match(&mut self, bracket_match: &BracketMatch) -> Result<(), StoreError> {
        if self.bracket_match(bracket_match.id).is_none() {
            return Err(StoreError::Missing(format!("match {}", bracket_match.id)));
        }
        self.staged
            .matches
            .insert(bracket_match.id, bracket_match.clone());
        Ok(())
    }

    fn insert_round(&mut self, new: NewRound) -> GameRound {
        self.staged.last_round_id += 1;
        let created = new.into_round(self.staged.last_round_id);
        self.staged.rounds.insert(created.id, created.clone());
        created
    }

    fn update_round(&mut self, round: &GameRound) -> Result<(), StoreError> {
        if !self.rounds(round.tournament_id).iter().any(|r| r.id == round.id) {
            return Err(StoreError::Missing(format!("round {}", round.id)));
        }
        self.staged.rounds.insert(round.id, round.clone());
        Ok(())
    }
}

/// In-process record store. Every transaction holds the exclusive lock from first read to
/// commit, so check-then-write sequences (round completion, name uniqueness) cannot race.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryStore {
    fn read<T>(&self, f: impl FnOnce(&dyn RecordReader) -> T) -> Result<T, StoreError> {
        let tables = self.tables.read().map_err(|_| StoreError::Poisoned)?;
        Ok(f(&*tables))
    }

    fn transaction<T, E>(
        &self,
        f: impl FnOnce(&mut dyn RecordWriter) -> Result<T, E>,
    ) -> Result<T, E>
    where
        E: From<StoreError>,
    {
        let mut tables = self.tables.write().map_err(|_| StoreError::Poisoned)?;
        let (output, staged) = {
            let mut tx = Transaction {
                base: &tables,
                staged: tables.staging(),
            };
            let output = f(&mut tx)?;
            (output, tx.staged)
        };
        tables.apply(staged);
        Ok(output)
    }
}
