//! Competitor record owned by the competitor directory.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a competitor (used in matches and lookups).
pub type CompetitorId = Uuid;

/// A registered participant. The bracket only needs the id; name and email are for display
/// and notifications.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Competitor {
    pub id: CompetitorId,
    pub name: String,
    pub email: Option<String>,
}

impl Competitor {
    /// Create a new competitor with a fresh id.
    pub fn new(name: impl Into<String>, email: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email,
        }
    }
}
