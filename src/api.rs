//! REST routes. Thin: each handler maps one request to one service operation.

use crate::directory::RosterError;
use crate::models::{CompetitorId, ErrorKind, MatchId, TournamentError, TournamentId};
use crate::service::BracketService;
use crate::store::MemoryStore;
use actix_web::{
    get, post,
    web::{self, Data, Json, Path},
    HttpResponse, Responder,
};
use serde::Deserialize;

/// Shared service handle for all handlers.
pub type AppState = Data<BracketService<MemoryStore>>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct RegisterCompetitorBody {
    name: String,
    #[serde(default)]
    email: Option<String>,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    name: String,
    competitor_ids: Vec<CompetitorId>,
}

#[derive(Deserialize)]
struct ReportScoreBody {
    score_a: u32,
    score_b: u32,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Path segments: tournament id and match id (e.g. /api/tournaments/{id}/matches/{match_id})
#[derive(Deserialize)]
struct TournamentMatchPath {
    id: TournamentId,
    match_id: MatchId,
}

fn error_body(message: String) -> serde_json::Value {
    serde_json::json!({ "error": message })
}

fn tournament_error(e: TournamentError) -> HttpResponse {
    let body = error_body(e.to_string());
    if matches!(e, TournamentError::NotFound(_)) {
        return HttpResponse::NotFound().json(body);
    }
    match e.kind() {
        ErrorKind::Validation => HttpResponse::BadRequest().json(body),
        ErrorKind::State => HttpResponse::Conflict().json(body),
        ErrorKind::Consistency => HttpResponse::InternalServerError().json(body),
    }
}

fn roster_error(e: RosterError) -> HttpResponse {
    match e {
        RosterError::Poisoned => HttpResponse::InternalServerError().body("lock error"),
        other => HttpResponse::BadRequest().json(error_body(other.to_string())),
    }
}

fn respond<T: serde::Serialize>(result: Result<T, TournamentError>) -> HttpResponse {
    match result {
        Ok(value) => HttpResponse::Ok().json(value),
        Err(e) => tournament_error(e),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "knockout-tournament-web",
    })
}

/// List registered competitors.
#[get("/api/competitors")]
async fn api_list_competitors(state: AppState) -> HttpResponse {
    match state.roster().list() {
        Ok(competitors) => HttpResponse::Ok().json(competitors),
        Err(e) => roster_error(e),
    }
}

/// Register one competitor (names are unique, case-insensitive).
#[post("/api/competitors")]
async fn api_register_competitor(
    state: AppState,
    body: Json<RegisterCompetitorBody>,
) -> HttpResponse {
    let body = body.into_inner();
    match state.roster().register(&body.name, body.email) {
        Ok(competitor) => HttpResponse::Ok().json(competitor),
        Err(e) => roster_error(e),
    }
}

/// Register competitors from a `name,email` CSV body.
#[post("/api/competitors/import")]
async fn api_import_competitors(state: AppState, body: String) -> HttpResponse {
    match state.roster().import_csv(body.as_bytes()) {
        Ok(added) => HttpResponse::Ok().json(added),
        Err(e) => roster_error(e),
    }
}

#[get("/api/tournaments")]
async fn api_list_tournaments(state: AppState) -> HttpResponse {
    respond(state.list_tournaments())
}

/// Create a tournament and its round 1 fixtures.
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: Json<CreateTournamentBody>) -> HttpResponse {
    respond(state.create_tournament(&body.name, &body.competitor_ids))
}

#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    respond(state.tournament(path.id))
}

/// All matches grouped by round.
#[get("/api/tournaments/{id}/bracket")]
async fn api_get_bracket(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    respond(state.bracket(path.id))
}

/// Pending matches of the current round.
#[get("/api/tournaments/{id}/matches/current")]
async fn api_current_matches(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    respond(state.current_matches(path.id))
}

/// Report a final score; may advance the round or complete the tournament.
#[post("/api/tournaments/{id}/matches/{match_id}/score")]
async fn api_report_score(
    state: AppState,
    path: Path<TournamentMatchPath>,
    body: Json<ReportScoreBody>,
) -> HttpResponse {
    respond(state.report_match_result(path.id, path.match_id, body.score_a, body.score_b))
}

#[get("/api/tournaments/{id}/standings")]
async fn api_get_standings(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    respond(state.standings(path.id))
}

/// Winner and runner-up (409 while the tournament is ongoing).
#[get("/api/tournaments/{id}/champion")]
async fn api_get_champion(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    respond(state.champion(path.id))
}

/// Register every route on an app or scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(api_health)
        .service(api_list_competitors)
        .service(api_import_competitors)
        .service(api_register_competitor)
        .service(api_list_tournaments)
        .service(api_create_tournament)
        .service(api_get_tournament)
        .service(api_get_bracket)
        .service(api_current_matches)
        .service(api_report_score)
        .service(api_get_standings)
        .service(api_get_champion);
}
