//! Fire-and-forget notifications about bracket progress.
//!
//! Sinks are invoked after a transaction commits and must never block the caller.

use crate::models::{BracketMatch, CompetitorId, TournamentId};
use serde::Serialize;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum BracketEvent {
    TournamentCreated {
        tournament_id: TournamentId,
        name: String,
        competitors: Vec<CompetitorId>,
    },
    RoundAdvanced {
        tournament_id: TournamentId,
        round_num: u32,
        matches: Vec<BracketMatch>,
    },
    TournamentCompleted {
        tournament_id: TournamentId,
        winner: CompetitorId,
        runner_up: Option<CompetitorId>,
    },
}

pub trait NotificationSink: Send + Sync {
    fn notify(&self, event: BracketEvent);
}

/// Writes every event to the log.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl NotificationSink for LogSink {
    fn notify(&self, event: BracketEvent) {
        log::info!("Bracket event: {:?}", event);
    }
}

/// Hands events to a background consumer over an unbounded channel.
#[derive(Clone, Debug)]
pub struct ChannelSink {
    sender: UnboundedSender<BracketEvent>,
}

impl ChannelSink {
    pub fn new() -> (Self, UnboundedReceiver<BracketEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl NotificationSink for ChannelSink {
    fn notify(&self, event: BracketEvent) {
        if let Err(e) = self.sender.send(event) {
            log::warn!("Dropping bracket event, consumer is gone: {:?}", e.0);
        }
    }
}
