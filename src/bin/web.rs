//! Single binary web server: REST API for single-elimination tournaments.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default so the app is reachable via DNS on a VPS.
//! Override with env: HOST, PORT, LOG_FILTER, ROSTER_CSV (see `ServerConfig`).

use actix_web::{web::Data, App, HttpServer};
use knockout_tournament_web::{
    api, BracketEvent, BracketService, ChannelSink, MemoryStore, Roster, ServerConfig,
};
use std::fs::File;
use std::sync::Arc;

/// Delivers bracket events off the request path. Mail delivery is not wired up; each
/// recipient with an email address is logged instead.
async fn deliver_notifications(
    roster: Arc<Roster>,
    mut events: tokio::sync::mpsc::UnboundedReceiver<BracketEvent>,
) {
    while let Some(event) = events.recv().await {
        match &event {
            BracketEvent::TournamentCompleted {
                winner, runner_up, ..
            } => {
                for id in std::iter::once(*winner).chain(*runner_up) {
                    if let Some(email) = roster.get(id).and_then(|c| c.email) {
                        log::info!("Notify {}: tournament finished", email);
                    }
                }
            }
            BracketEvent::RoundAdvanced { matches, .. } => {
                for m in matches {
                    for id in [m.competitor_a, m.competitor_b] {
                        if let Some(email) = roster.get(id).and_then(|c| c.email) {
                            log::info!("Notify {}: new fixture in round {}", email, m.round_num);
                        }
                    }
                }
            }
            BracketEvent::TournamentCreated { name, .. } => {
                log::info!("Tournament {} is open", name);
            }
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = ServerConfig::from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    env_logger::init_from_env(env_logger::Env::new().default_filter_or(config.log_filter.as_str()));

    let roster = Arc::new(Roster::new());
    if let Some(path) = &config.roster_csv {
        let file = File::open(path)?;
        roster
            .import_csv(file)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    }

    let (sink, events) = ChannelSink::new();
    actix_web::rt::spawn(deliver_notifications(roster.clone(), events));

    let state = Data::new(BracketService::new(MemoryStore::new(), roster, Arc::new(sink)));

    let bind = (config.host.as_str(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    HttpServer::new(move || App::new().app_data(state.clone()).configure(api::configure))
        .bind(bind)?
        .run()
        .await
}
