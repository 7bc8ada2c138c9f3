//! Scheduled checkout endpoint: shared-secret auth and convergence.

use actix_web::http::Method;
use actix_web::test;
use backend::domain::RoleScope;
use backend::inbound::http::stays::CRON_TOKEN_HEADER;
use serde_json::{Value, json};

mod support;

#[actix_rt::test]
async fn overdue_stays_are_closed_by_the_scheduler() {
    let backend = support::test_backend();
    support::seed_staff(&backend, "admin", "pw", RoleScope::Admin).await;
    let app = test::init_service(support::test_app(backend.http.clone())).await;
    let token = support::login(&app, "admin", "pw").await;

    let (_, room_type) = support::send_json(
        &app,
        Method::POST,
        "/api/v1/room-types",
        &token,
        json!({ "name": "Twin", "description": null }),
    )
    .await;
    let type_id = room_type["id"].as_str().expect("type id").to_owned();
    let (_, room) = support::send_json(
        &app,
        Method::POST,
        "/api/v1/rooms",
        &token,
        json!({ "number": "512", "roomTypeId": type_id }),
    )
    .await;
    let room_id = room["id"].as_str().expect("room id").to_owned();
    let (status, _) = support::send(
        &app,
        Method::POST,
        &format!("/api/v1/rooms/{room_id}/select"),
        &token,
    )
    .await;
    assert_eq!(status, 200);

    // A stay whose expected checkout has long passed.
    let (status, checked_in) = support::send_json(
        &app,
        Method::POST,
        &format!("/api/v1/rooms/{room_id}/check-in"),
        &token,
        json!({ "guestName": "Late Sleeper", "expectedCheckout": "2020-01-01" }),
    )
    .await;
    assert_eq!(status, 201);
    let stay_id = checked_in["stay"]["id"].as_str().expect("stay id").to_owned();

    // The scheduler secret gates the endpoint.
    let missing = test::TestRequest::post()
        .uri("/api/v1/stays/auto-checkout")
        .to_request();
    let res = test::call_service(&app, missing).await;
    assert_eq!(res.status().as_u16(), 401);

    let wrong = test::TestRequest::post()
        .uri("/api/v1/stays/auto-checkout")
        .insert_header((CRON_TOKEN_HEADER, "not-the-secret"))
        .to_request();
    let res = test::call_service(&app, wrong).await;
    assert_eq!(res.status().as_u16(), 401);

    let run = test::TestRequest::post()
        .uri("/api/v1/stays/auto-checkout")
        .insert_header((CRON_TOKEN_HEADER, support::CRON_TOKEN))
        .to_request();
    let res = test::call_service(&app, run).await;
    assert_eq!(res.status().as_u16(), 200);
    let report: Value = test::read_body_json(res).await;
    let closed = report["closed"].as_array().expect("closed list");
    assert_eq!(closed.len(), 1);
    assert_eq!(closed[0].as_str(), Some(stay_id.as_str()));
    assert_eq!(report["failed"].as_array().expect("failed list").len(), 0);

    // Side effects: stay closed, room released.
    let (status, stay) =
        support::send(&app, Method::GET, &format!("/api/v1/stays/{stay_id}"), &token).await;
    assert_eq!(status, 200);
    assert_eq!(stay["status"], "checked_out");

    let (status, room) =
        support::send(&app, Method::GET, &format!("/api/v1/rooms/{room_id}"), &token).await;
    assert_eq!(status, 200);
    assert_eq!(room["status"], "available");

    // A second run finds nothing left to close.
    let rerun = test::TestRequest::post()
        .uri("/api/v1/stays/auto-checkout")
        .insert_header((CRON_TOKEN_HEADER, support::CRON_TOKEN))
        .to_request();
    let res = test::call_service(&app, rerun).await;
    assert_eq!(res.status().as_u16(), 200);
    let report: Value = test::read_body_json(res).await;
    assert_eq!(report["closed"].as_array().expect("closed list").len(), 0);
}

#[actix_rt::test]
async fn stay_listing_filters_by_status() {
    let backend = support::test_backend();
    support::seed_staff(&backend, "admin", "pw", RoleScope::Admin).await;
    let app = test::init_service(support::test_app(backend.http.clone())).await;
    let token = support::login(&app, "admin", "pw").await;

    let (_, room_type) = support::send_json(
        &app,
        Method::POST,
        "/api/v1/room-types",
        &token,
        json!({ "name": "King", "description": null }),
    )
    .await;
    let type_id = room_type["id"].as_str().expect("type id").to_owned();

    for number in ["601", "602"] {
        let (_, room) = support::send_json(
            &app,
            Method::POST,
            "/api/v1/rooms",
            &token,
            json!({ "number": number, "roomTypeId": type_id }),
        )
        .await;
        let room_id = room["id"].as_str().expect("room id").to_owned();
        let (status, _) = support::send(
            &app,
            Method::POST,
            &format!("/api/v1/rooms/{room_id}/select"),
            &token,
        )
        .await;
        assert_eq!(status, 200);
        let (status, _) = support::send_json(
            &app,
            Method::POST,
            &format!("/api/v1/rooms/{room_id}/check-in"),
            &token,
            json!({ "guestName": "Guest Fixture", "expectedCheckout": "2026-09-07" }),
        )
        .await;
        assert_eq!(status, 201);
    }

    // Close one stay by checking its room out.
    let (_, rooms) = support::send(&app, Method::GET, "/api/v1/rooms", &token).await;
    let first_room_id = rooms.as_array().expect("rooms")[0]["id"]
        .as_str()
        .expect("room id")
        .to_owned();
    let (status, _) = support::send(
        &app,
        Method::POST,
        &format!("/api/v1/rooms/{first_room_id}/check-out"),
        &token,
    )
    .await;
    assert_eq!(status, 200);

    let (status, active) =
        support::send(&app, Method::GET, "/api/v1/stays?status=active", &token).await;
    assert_eq!(status, 200);
    assert_eq!(active.as_array().expect("stays").len(), 1);

    let (status, closed) =
        support::send(&app, Method::GET, "/api/v1/stays?status=checked_out", &token).await;
    assert_eq!(status, 200);
    assert_eq!(closed.as_array().expect("stays").len(), 1);

    let (status, all) = support::send(&app, Method::GET, "/api/v1/stays", &token).await;
    assert_eq!(status, 200);
    assert_eq!(all.as_array().expect("stays").len(), 2);
}
