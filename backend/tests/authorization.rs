//! Authorization boundaries: scopes, admin-only surfaces, and public routes.

use actix_web::http::Method;
use actix_web::test;
use backend::domain::RoleScope;
use serde_json::json;

mod support;

#[actix_rt::test]
async fn requests_without_a_valid_token_are_rejected() {
    let backend = support::test_backend();
    let app = test::init_service(support::test_app(backend.http.clone())).await;

    let bare = test::TestRequest::get().uri("/api/v1/rooms").to_request();
    let res = test::call_service(&app, bare).await;
    assert_eq!(res.status().as_u16(), 401);

    let garbage = test::TestRequest::get()
        .uri("/api/v1/rooms")
        .insert_header(("Authorization", "Bearer not-a-token"))
        .to_request();
    let res = test::call_service(&app, garbage).await;
    assert_eq!(res.status().as_u16(), 401);

    let wrong_scheme = test::TestRequest::get()
        .uri("/api/v1/rooms")
        .insert_header(("Authorization", "Basic YWxhZGRpbg=="))
        .to_request();
    let res = test::call_service(&app, wrong_scheme).await;
    assert_eq!(res.status().as_u16(), 401);

    // Probes stay reachable without credentials.
    let live = test::TestRequest::get().uri("/health/live").to_request();
    let res = test::call_service(&app, live).await;
    assert!(res.status().is_success());
}

#[actix_rt::test]
async fn scopes_gate_the_operational_surfaces() {
    let backend = support::test_backend();
    support::seed_staff(&backend, "worker", "pw", RoleScope::Staff).await;
    support::seed_staff(&backend, "desk", "pw", RoleScope::FrontDesk).await;
    let app = test::init_service(support::test_app(backend.http.clone())).await;

    let worker = support::login(&app, "worker", "pw").await;
    let desk = support::login(&app, "desk", "pw").await;

    // Plain staff cannot touch rooms or stays.
    let (status, body) = support::send_json(
        &app,
        Method::POST,
        "/api/v1/rooms",
        &worker,
        json!({ "number": "700", "roomTypeId": "00000000-0000-0000-0000-000000000000" }),
    )
    .await;
    assert_eq!(status, 403, "unexpected body: {body}");
    assert_eq!(body["code"], "forbidden");

    let (status, _) = support::send(&app, Method::GET, "/api/v1/stays", &worker).await;
    assert_eq!(status, 403);

    // Front desk can read stays but not administer departments or roles.
    let (status, _) = support::send(&app, Method::GET, "/api/v1/stays", &desk).await;
    assert_eq!(status, 200);

    let (status, _) = support::send_json(
        &app,
        Method::POST,
        "/api/v1/departments",
        &desk,
        json!({ "name": "Spa", "description": null }),
    )
    .await;
    assert_eq!(status, 403);

    let (status, _) = support::send_json(
        &app,
        Method::POST,
        "/api/v1/roles",
        &desk,
        json!({ "name": "night-auditor", "scope": "staff" }),
    )
    .await;
    assert_eq!(status, 403);
}

#[actix_rt::test]
async fn role_assignment_enforces_single_holder() {
    let backend = support::test_backend();
    let admin_id = support::seed_staff(&backend, "admin", "pw", RoleScope::Admin).await;
    let worker_id = support::seed_staff(&backend, "worker", "pw", RoleScope::Staff).await;
    let app = test::init_service(support::test_app(backend.http.clone())).await;
    let token = support::login(&app, "admin", "pw").await;

    let (status, role) = support::send_json(
        &app,
        Method::POST,
        "/api/v1/roles",
        &token,
        json!({ "name": "duty-manager", "scope": "manager" }),
    )
    .await;
    assert_eq!(status, 201);
    let role_id = role["id"].as_str().expect("role id").to_owned();

    let (status, _) = support::send_json(
        &app,
        Method::PUT,
        &format!("/api/v1/roles/{role_id}/assignment"),
        &token,
        json!({ "staffId": worker_id }),
    )
    .await;
    assert_eq!(status, 204);

    // Assigning the same role again to the same holder is a no-op.
    let (status, _) = support::send_json(
        &app,
        Method::PUT,
        &format!("/api/v1/roles/{role_id}/assignment"),
        &token,
        json!({ "staffId": worker_id }),
    )
    .await;
    assert_eq!(status, 204);

    // A second holder is a conflict while the first keeps the role.
    let (status, body) = support::send_json(
        &app,
        Method::PUT,
        &format!("/api/v1/roles/{role_id}/assignment"),
        &token,
        json!({ "staffId": admin_id }),
    )
    .await;
    assert_eq!(status, 409);
    assert_eq!(body["code"], "conflict");

    // Deleting a held role is refused until it is withdrawn.
    let (status, body) = support::send(
        &app,
        Method::DELETE,
        &format!("/api/v1/roles/{role_id}"),
        &token,
    )
    .await;
    assert_eq!(status, 409);
    assert_eq!(body["details"]["staffId"].as_str(), Some(worker_id.to_string().as_str()));

    let (status, _) = support::send_json(
        &app,
        Method::PUT,
        &format!("/api/v1/roles/{role_id}/assignment"),
        &token,
        json!({ "staffId": null }),
    )
    .await;
    assert_eq!(status, 204);

    let (status, _) = support::send(
        &app,
        Method::DELETE,
        &format!("/api/v1/roles/{role_id}"),
        &token,
    )
    .await;
    assert_eq!(status, 204);
}

#[actix_rt::test]
async fn property_branding_is_public_to_read_and_admin_to_write() {
    let backend = support::test_backend();
    support::seed_staff(&backend, "admin", "pw", RoleScope::Admin).await;
    support::seed_staff(&backend, "manager", "pw", RoleScope::Manager).await;
    let app = test::init_service(support::test_app(backend.http.clone())).await;

    // Unset branding reads as missing, without credentials.
    let req = test::TestRequest::get().uri("/api/v1/property").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status().as_u16(), 404);

    let manager = support::login(&app, "manager", "pw").await;
    let (status, _) = support::send_json(
        &app,
        Method::PUT,
        "/api/v1/property",
        &manager,
        json!({ "name": "Seaside Grand" }),
    )
    .await;
    assert_eq!(status, 403);

    let admin = support::login(&app, "admin", "pw").await;
    let (status, updated) = support::send_json(
        &app,
        Method::PUT,
        "/api/v1/property",
        &admin,
        json!({
            "name": "Seaside Grand",
            "contactEmail": "reception@seaside.example",
        }),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(updated["name"], "Seaside Grand");

    let req = test::TestRequest::get().uri("/api/v1/property").to_request();
    let res = test::call_service(&app, req).await;
    assert!(res.status().is_success());
    let body: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(body["name"], "Seaside Grand");
    assert_eq!(body["contactEmail"], "reception@seaside.example");
}

#[actix_rt::test]
async fn duplicate_department_names_conflict() {
    let backend = support::test_backend();
    support::seed_staff(&backend, "admin", "pw", RoleScope::Admin).await;
    let app = test::init_service(support::test_app(backend.http.clone())).await;
    let token = support::login(&app, "admin", "pw").await;

    let (status, _) = support::send_json(
        &app,
        Method::POST,
        "/api/v1/departments",
        &token,
        json!({ "name": "Housekeeping", "description": null }),
    )
    .await;
    assert_eq!(status, 201);

    let (status, body) = support::send_json(
        &app,
        Method::POST,
        "/api/v1/departments",
        &token,
        json!({ "name": "Housekeeping", "description": "again" }),
    )
    .await;
    assert_eq!(status, 409);
    assert_eq!(body["details"]["name"], "Housekeeping");
}
