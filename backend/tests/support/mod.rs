//! Shared fixtures for the HTTP integration tests.
//!
//! The full API is mounted over in-memory adapters with the real JWT
//! token service, so routing, extraction, and authorization checks run
//! end to end without a database.
#![allow(dead_code)]

use std::sync::Arc;

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::Method;
use actix_web::{App, Error, test, web};
use serde_json::{Value, json};
use uuid::Uuid;

use backend::Trace;
use backend::domain::ports::{RoleRepository, StaffRepository};
use backend::domain::{
    AuthService, AutoCheckoutService, IssueService, Role, RoleScope, RoomService, Staff,
};
use backend::inbound::http::health::HealthState;
use backend::inbound::http::{configure_api, state::HttpState};
use backend::outbound::security::JwtTokenService;
use backend::test_support::{
    InMemoryDepartmentRepository, InMemoryGuestRepository, InMemoryIssueRepository,
    InMemoryPropertyRepository, InMemoryRoleRepository, InMemoryRoomRepository,
    InMemoryStaffRepository, InMemoryStayRepository, PlainPasswordHasher,
};

/// Scheduler secret wired into the state under test.
pub const CRON_TOKEN: &str = "scheduler-secret";

const JWT_SECRET: &[u8] = b"integration-test-secret";

/// Wired dependency bundle plus direct handles for seeding fixtures.
pub struct TestBackend {
    pub http: HttpState,
    pub staff: Arc<InMemoryStaffRepository>,
    pub roles: Arc<InMemoryRoleRepository>,
    pub guests: Arc<InMemoryGuestRepository>,
    pub rooms: Arc<InMemoryRoomRepository>,
    pub stays: Arc<InMemoryStayRepository>,
}

/// Build the API state over fresh in-memory adapters.
pub fn test_backend() -> TestBackend {
    let staff = Arc::new(InMemoryStaffRepository::default());
    let guests = Arc::new(InMemoryGuestRepository::default());
    let rooms = Arc::new(InMemoryRoomRepository::default());
    let stays = Arc::new(InMemoryStayRepository::default());
    let issues = Arc::new(InMemoryIssueRepository::default());
    let departments = Arc::new(InMemoryDepartmentRepository::default());
    let roles = Arc::new(InMemoryRoleRepository::default());
    let property = Arc::new(InMemoryPropertyRepository::default());

    let hasher = Arc::new(PlainPasswordHasher);
    let tokens = Arc::new(JwtTokenService::new(JWT_SECRET, "hotel-backend", 3600));

    let auth = Arc::new(AuthService::new(
        staff.clone(),
        guests.clone(),
        rooms.clone(),
        roles.clone(),
        hasher.clone(),
        tokens,
    ));
    let room_service = Arc::new(RoomService::new(
        rooms.clone(),
        stays.clone(),
        guests.clone(),
        hasher,
    ));
    let issue_service = Arc::new(IssueService::new(issues.clone(), departments.clone()));
    let auto_checkout = Arc::new(AutoCheckoutService::new(
        stays.clone(),
        guests.clone(),
        rooms.clone(),
    ));

    let http = HttpState {
        auth,
        rooms: room_service,
        issues: issue_service,
        auto_checkout,
        stays: stays.clone(),
        departments,
        roles: roles.clone(),
        staff: staff.clone(),
        issue_records: issues,
        property,
        cron_token: CRON_TOKEN.to_owned(),
    };

    TestBackend {
        http,
        staff,
        roles,
        guests,
        rooms,
        stays,
    }
}

/// Build the application under test with the given dependency bundle.
pub fn test_app(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = Error,
        InitError = (),
    >,
> {
    let health = HealthState::new();
    health.mark_ready();
    App::new()
        .app_data(web::Data::new(state))
        .app_data(web::Data::new(health))
        .wrap(Trace)
        .configure(configure_api)
}

/// Seed an active staff account holding a fresh role with the given scope.
pub async fn seed_staff(
    backend: &TestBackend,
    username: &str,
    password: &str,
    scope: RoleScope,
) -> Uuid {
    let role = Role::new(format!("{username}-role"), scope);
    backend.roles.create(&role).await.expect("seed role");
    let staff = Staff::new(username, password, "Integration Fixture").with_role(role.id);
    backend.staff.create(&staff).await.expect("seed staff");
    staff.id
}

/// Log a staff member in and return the bearer token.
pub async fn login<S, B>(app: &S, username: &str, password: &str) -> String
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
    B::Error: std::fmt::Debug,
{
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "username": username, "password": password }))
        .to_request();
    let res = test::call_service(app, req).await;
    assert!(res.status().is_success(), "login failed: {}", res.status());
    let body: Value = test::read_body_json(res).await;
    body["token"].as_str().expect("token field").to_owned()
}

/// Log a guest in via room number and return the bearer token.
pub async fn guest_login<S, B>(
    app: &S,
    room_number: &str,
    username: &str,
    password: &str,
) -> String
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
    B::Error: std::fmt::Debug,
{
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/guest-login")
        .set_json(json!({
            "roomNumber": room_number,
            "username": username,
            "password": password,
        }))
        .to_request();
    let res = test::call_service(app, req).await;
    assert!(
        res.status().is_success(),
        "guest login failed: {}",
        res.status()
    );
    let body: Value = test::read_body_json(res).await;
    body["token"].as_str().expect("token field").to_owned()
}

/// Request builder pre-loaded with a bearer token.
pub fn authed(method: Method, uri: &str, token: &str) -> test::TestRequest {
    test::TestRequest::default()
        .method(method)
        .uri(uri)
        .insert_header(("Authorization", format!("Bearer {token}")))
}

/// Fire a JSON request with a bearer token and return status plus body.
pub async fn send_json<S, B>(
    app: &S,
    method: Method,
    uri: &str,
    token: &str,
    body: Value,
) -> (u16, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
    B::Error: std::fmt::Debug,
{
    let req = authed(method, uri, token).set_json(body).to_request();
    let res = test::call_service(app, req).await;
    let status = res.status().as_u16();
    let bytes = test::read_body(res).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, body)
}

/// Fire a bodyless request with a bearer token and return status plus body.
pub async fn send<S, B>(app: &S, method: Method, uri: &str, token: &str) -> (u16, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
    B::Error: std::fmt::Debug,
{
    let req = authed(method, uri, token).to_request();
    let res = test::call_service(app, req).await;
    let status = res.status().as_u16();
    let bytes = test::read_body(res).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, body)
}
