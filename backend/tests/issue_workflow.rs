//! Issue ticketing over the HTTP API: reporting, workflow, and routing.

use actix_web::http::Method;
use actix_web::test;
use backend::domain::RoleScope;
use serde_json::json;

mod support;

struct Seeded {
    token: String,
    department_id: String,
}

/// Log an admin in and create a department to route issues to.
async fn seed_department<S, B>(app: &S, backend: &support::TestBackend) -> Seeded
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse<B>,
            Error = actix_web::Error,
        >,
    B: actix_web::body::MessageBody,
    B::Error: std::fmt::Debug,
{
    support::seed_staff(backend, "admin", "pw", RoleScope::Admin).await;
    let token = support::login(app, "admin", "pw").await;
    let (status, dept) = support::send_json(
        app,
        Method::POST,
        "/api/v1/departments",
        &token,
        json!({ "name": "Maintenance", "description": "Repairs" }),
    )
    .await;
    assert_eq!(status, 201);
    let department_id = dept["id"].as_str().expect("department id").to_owned();
    Seeded {
        token,
        department_id,
    }
}

#[actix_rt::test]
async fn issue_moves_through_the_workflow() {
    let backend = support::test_backend();
    let app = test::init_service(support::test_app(backend.http.clone())).await;
    let seeded = seed_department(&app, &backend).await;

    let (status, issue) = support::send_json(
        &app,
        Method::POST,
        "/api/v1/issues",
        &seeded.token,
        json!({
            "title": "Broken air conditioning",
            "description": "Unit rattles and blows warm air",
            "departmentId": seeded.department_id,
            "priority": "high",
        }),
    )
    .await;
    assert_eq!(status, 201);
    assert_eq!(issue["status"], "open");
    assert_eq!(issue["priority"], "high");
    assert!(issue["reference"].is_string());
    let issue_id = issue["id"].as_str().expect("issue id").to_owned();

    // Resolving straight from open is not a legal transition.
    let (status, body) = support::send_json(
        &app,
        Method::POST,
        &format!("/api/v1/issues/{issue_id}/status"),
        &seeded.token,
        json!({ "status": "resolved", "remarks": "done" }),
    )
    .await;
    assert_eq!(status, 400, "unexpected body: {body}");

    let (status, in_progress) = support::send_json(
        &app,
        Method::POST,
        &format!("/api/v1/issues/{issue_id}/status"),
        &seeded.token,
        json!({ "status": "in_progress" }),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(in_progress["status"], "in_progress");

    // Remarks are mandatory when resolving.
    let (status, _) = support::send_json(
        &app,
        Method::POST,
        &format!("/api/v1/issues/{issue_id}/status"),
        &seeded.token,
        json!({ "status": "resolved" }),
    )
    .await;
    assert_eq!(status, 400);

    let (status, resolved) = support::send_json(
        &app,
        Method::POST,
        &format!("/api/v1/issues/{issue_id}/status"),
        &seeded.token,
        json!({ "status": "resolved", "remarks": "Compressor replaced" }),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(resolved["status"], "resolved");
    assert_eq!(resolved["resolutionRemarks"], "Compressor replaced");

    // Reopening keeps the audit trail.
    let (status, reopened) = support::send_json(
        &app,
        Method::POST,
        &format!("/api/v1/issues/{issue_id}/status"),
        &seeded.token,
        json!({ "status": "in_progress" }),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(reopened["resolutionRemarks"], "Compressor replaced");
}

#[actix_rt::test]
async fn guests_report_and_see_only_their_own_issues() {
    let backend = support::test_backend();
    let app = test::init_service(support::test_app(backend.http.clone())).await;
    let seeded = seed_department(&app, &backend).await;

    // Provision two occupied rooms through the regular flow.
    let (_, room_type) = support::send_json(
        &app,
        Method::POST,
        "/api/v1/room-types",
        &seeded.token,
        json!({ "name": "Standard", "description": null }),
    )
    .await;
    let type_id = room_type["id"].as_str().expect("type id").to_owned();

    let mut guest_tokens = Vec::new();
    for number in ["410", "411"] {
        let (_, room) = support::send_json(
            &app,
            Method::POST,
            "/api/v1/rooms",
            &seeded.token,
            json!({ "number": number, "roomTypeId": type_id }),
        )
        .await;
        let room_id = room["id"].as_str().expect("room id").to_owned();
        let (status, _) = support::send(
            &app,
            Method::POST,
            &format!("/api/v1/rooms/{room_id}/select"),
            &seeded.token,
        )
        .await;
        assert_eq!(status, 200);
        let (status, checked_in) = support::send_json(
            &app,
            Method::POST,
            &format!("/api/v1/rooms/{room_id}/check-in"),
            &seeded.token,
            json!({ "guestName": "Guest Fixture", "expectedCheckout": "2026-09-05" }),
        )
        .await;
        assert_eq!(status, 201);
        let username = checked_in["guestUsername"].as_str().expect("username");
        let password = checked_in["guestPassword"].as_str().expect("password");
        guest_tokens.push(support::guest_login(&app, number, username, password).await);
    }

    // First guest reports without naming a room; it is pinned to their own.
    let (status, issue) = support::send_json(
        &app,
        Method::POST,
        "/api/v1/issues",
        &guest_tokens[0],
        json!({
            "title": "No hot water",
            "description": "Shower stays cold",
            "departmentId": seeded.department_id,
        }),
    )
    .await;
    assert_eq!(status, 201);
    assert_eq!(issue["reporter"]["kind"], "guest");
    assert!(issue["roomId"].is_string());
    let issue_id = issue["id"].as_str().expect("issue id").to_owned();

    // The other guest sees neither the listing entry nor the record.
    let (status, listed) =
        support::send(&app, Method::GET, "/api/v1/issues", &guest_tokens[1]).await;
    assert_eq!(status, 200);
    assert_eq!(listed.as_array().expect("issue list").len(), 0);

    let (status, _) = support::send(
        &app,
        Method::GET,
        &format!("/api/v1/issues/{issue_id}"),
        &guest_tokens[1],
    )
    .await;
    assert_eq!(status, 404);

    // Staff see everything.
    let (status, listed) = support::send(&app, Method::GET, "/api/v1/issues", &seeded.token).await;
    assert_eq!(status, 200);
    assert_eq!(listed.as_array().expect("issue list").len(), 1);
}

#[actix_rt::test]
async fn rerouting_requires_a_managerial_scope() {
    let backend = support::test_backend();
    let app = test::init_service(support::test_app(backend.http.clone())).await;
    let seeded = seed_department(&app, &backend).await;
    support::seed_staff(&backend, "worker", "pw", RoleScope::Staff).await;
    let worker_token = support::login(&app, "worker", "pw").await;

    let (_, housekeeping) = support::send_json(
        &app,
        Method::POST,
        "/api/v1/departments",
        &seeded.token,
        json!({ "name": "Housekeeping", "description": null }),
    )
    .await;
    let housekeeping_id = housekeeping["id"].as_str().expect("department id");

    let (status, issue) = support::send_json(
        &app,
        Method::POST,
        "/api/v1/issues",
        &worker_token,
        json!({
            "title": "Stained carpet in the lobby",
            "description": "Coffee spill near the front desk",
            "departmentId": seeded.department_id,
        }),
    )
    .await;
    assert_eq!(status, 201);
    let issue_id = issue["id"].as_str().expect("issue id").to_owned();

    // Plain staff can work the issue but not reroute it.
    let (status, _) = support::send_json(
        &app,
        Method::POST,
        &format!("/api/v1/issues/{issue_id}/status"),
        &worker_token,
        json!({ "status": "in_progress" }),
    )
    .await;
    assert_eq!(status, 200);

    let (status, body) = support::send_json(
        &app,
        Method::POST,
        &format!("/api/v1/issues/{issue_id}/department"),
        &worker_token,
        json!({ "departmentId": housekeeping_id }),
    )
    .await;
    assert_eq!(status, 403, "unexpected body: {body}");

    let (status, rerouted) = support::send_json(
        &app,
        Method::POST,
        &format!("/api/v1/issues/{issue_id}/department"),
        &seeded.token,
        json!({ "departmentId": housekeeping_id }),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(rerouted["departmentId"].as_str(), Some(housekeeping_id));
}
