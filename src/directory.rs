//! Competitor directory: who can be entered into a tournament, and their display names.

use crate::models::{Competitor, CompetitorId};
use serde::Deserialize;
use std::io::Read;
use std::sync::RwLock;

#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("Competitor name must not be empty")]
    EmptyName,
    #[error("A competitor named {0:?} already exists")]
    DuplicateName(String),
    #[error("Invalid roster CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("roster lock poisoned")]
    Poisoned,
}

/// Name lookup by id, as consumed by the bracket core.
pub trait CompetitorDirectory: Send + Sync {
    fn lookup(&self, id: CompetitorId) -> Option<Competitor>;
}

#[derive(Debug, Deserialize)]
struct RosterRow {
    name: String,
    #[serde(default)]
    email: Option<String>,
}

/// In-memory competitor directory. Names are unique, case-insensitive.
#[derive(Debug, Default)]
pub struct Roster {
    competitors: RwLock<Vec<Competitor>>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a competitor (name is trimmed; blank email is treated as none).
    pub fn register(
        &self,
        name: &str,
        email: Option<String>,
    ) -> Result<Competitor, RosterError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RosterError::EmptyName);
        }
        let email = email
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty());
        let mut competitors = self.competitors.write().map_err(|_| RosterError::Poisoned)?;
        if competitors.iter().any(|c| c.name.eq_ignore_ascii_case(name)) {
            return Err(RosterError::DuplicateName(name.to_string()));
        }
        let competitor = Competitor::new(name, email);
        competitors.push(competitor.clone());
        Ok(competitor)
    }

    /// Register every row of a `name,email` CSV (with header), in file order. Stops at the
    /// first invalid or duplicate row; rows before it stay registered.
    pub fn import_csv<R: Read>(&self, reader: R) -> Result<Vec<Competitor>, RosterError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);
        let mut added = Vec::new();
        for row in csv_reader.deserialize::<RosterRow>() {
            let row = row?;
            added.push(self.register(&row.name, row.email)?);
        }
        log::info!("Imported {} competitor(s) from CSV", added.len());
        Ok(added)
    }

    /// All competitors in registration order.
    pub fn list(&self) -> Result<Vec<Competitor>, RosterError> {
        let competitors = self.competitors.read().map_err(|_| RosterError::Poisoned)?;
        Ok(competitors.clone())
    }

    /// Lookup by id. A poisoned roster is logged and reads as unknown.
    pub fn get(&self, id: CompetitorId) -> Option<Competitor> {
        match self.competitors.read() {
            Ok(competitors) => competitors.iter().find(|c| c.id == id).cloned(),
            Err(_) => {
                log::error!("Roster lock poisoned, cannot look up competitor {}", id);
                None
            }
        }
    }
}

impl CompetitorDirectory for Roster {
    fn lookup(&self, id: CompetitorId) -> Option<Competitor> {
        self.get(id)
    }
}
