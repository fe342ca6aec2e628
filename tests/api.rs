//! HTTP surface: routes, JSON bodies and status mapping.

mod common;

use actix_web::{test, web::Data, App};
use common::service_with;
use knockout_tournament_web::{api, BracketMatch, Competitor, Tournament};
use serde_json::{json, Value};

macro_rules! app {
    ($service:expr) => {
        test::init_service(
            App::new()
                .app_data(Data::new($service))
                .configure(api::configure),
        )
        .await
    };
}

#[actix_web::test]
async fn health() {
    let (service, _, _) = service_with(&[]);
    let app = app!(service);
    let req = test::TestRequest::get().uri("/api/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["ok"], json!(true));
}

#[actix_web::test]
async fn register_import_and_list_competitors() {
    let (service, _, _) = service_with(&[]);
    let app = app!(service);

    let req = test::TestRequest::post()
        .uri("/api/competitors")
        .set_json(json!({ "name": "Ann", "email": "ann@example.com" }))
        .to_request();
    let ann: Competitor = test::call_and_read_body_json(&app, req).await;
    assert_eq!(ann.name, "Ann");

    let req = test::TestRequest::post()
        .uri("/api/competitors")
        .set_json(json!({ "name": "ann" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 400);

    let req = test::TestRequest::post()
        .uri("/api/competitors/import")
        .set_payload("name,email\nBen,\nCat,cat@example.com\n")
        .to_request();
    let added: Vec<Competitor> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(added.len(), 2);

    let req = test::TestRequest::get().uri("/api/competitors").to_request();
    let all: Vec<Competitor> = test::call_and_read_body_json(&app, req).await;
    let names: Vec<_> = all.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Ann", "Ben", "Cat"]);
}

#[actix_web::test]
async fn play_a_two_player_final_over_http() {
    let (service, _, ids) = service_with(&["Ann", "Ben"]);
    let app = app!(service);

    let req = test::TestRequest::post()
        .uri("/api/tournaments")
        .set_json(json!({ "name": "Web Cup", "competitor_ids": ids }))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let tournament: Tournament = serde_json::from_value(created["tournament"].clone()).unwrap();
    let matches: Vec<BracketMatch> = serde_json::from_value(created["matches"].clone()).unwrap();
    assert_eq!(tournament.total_rounds, 1);
    assert_eq!(matches.len(), 1);
    let t = tournament.id;
    let m = &matches[0];

    let req = test::TestRequest::get()
        .uri(&format!("/api/tournaments/{t}/champion"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 409);

    let score_uri = format!("/api/tournaments/{t}/matches/{}/score", m.id);
    let req = test::TestRequest::post()
        .uri(&score_uri)
        .set_json(json!({ "score_a": 2, "score_b": 2 }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 400);

    let req = test::TestRequest::post()
        .uri(&score_uri)
        .set_json(json!({ "score_a": 1, "score_b": 3 }))
        .to_request();
    let outcome: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(outcome["tournament_complete"], json!(true));
    assert_eq!(outcome["match"]["winner"], json!(m.competitor_b));

    let req = test::TestRequest::post()
        .uri(&score_uri)
        .set_json(json!({ "score_a": 5, "score_b": 0 }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 409);

    let req = test::TestRequest::get()
        .uri(&format!("/api/tournaments/{t}/champion"))
        .to_request();
    let champion: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(champion["winner"]["id"], json!(m.competitor_b));
    assert_eq!(champion["runner_up"]["id"], json!(m.competitor_a));

    let req = test::TestRequest::get()
        .uri(&format!("/api/tournaments/{t}/standings"))
        .to_request();
    let report: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(report["standings"][0]["competitor"], json!(m.competitor_b));
    assert_eq!(report["standings"][0]["is_champion"], json!(true));

    let req = test::TestRequest::get()
        .uri(&format!("/api/tournaments/{t}/matches/current"))
        .to_request();
    let current: Vec<BracketMatch> = test::call_and_read_body_json(&app, req).await;
    assert!(current.is_empty());
}

#[actix_web::test]
async fn status_codes_for_rejected_requests() {
    let (service, _, ids) = service_with(&["Ann", "Ben", "Cat"]);
    let app = app!(service);

    let req = test::TestRequest::post()
        .uri("/api/tournaments")
        .set_json(json!({ "name": "Three", "competitor_ids": ids }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 400);

    let unknown = uuid::Uuid::new_v4();
    for uri in [
        format!("/api/tournaments/{unknown}"),
        format!("/api/tournaments/{unknown}/bracket"),
        format!("/api/tournaments/{unknown}/standings"),
    ] {
        let req = test::TestRequest::get().uri(&uri).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 404, "{uri}");
    }

    let req = test::TestRequest::post()
        .uri(&format!("/api/tournaments/{unknown}/matches/1/score"))
        .set_json(json!({ "score_a": 1, "score_b": 0 }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 404);
}
