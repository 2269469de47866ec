//! Transport tests against an in-process mock of the HRIS API.

use std::sync::Arc;

use actix_web::http::header::{AUTHORIZATION, CONTENT_TYPE};
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use chrono::NaiveDate;
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::{Value, json};
use uuid::Uuid;

use hris_client::auth::handlers;
use hris_client::capture::CapturedPhoto;
use hris_client::forms::clock::{ClockForm, ClockKind};
use hris_client::http::HttpTransport;
use hris_client::model::employee::{BankDetails, CreateEmployee, EmploymentType};
use hris_client::models::Claims;
use hris_client::screens::attendance::AttendanceScreen;
use hris_client::screens::employee::EmployeeScreen;
use hris_client::view::{MemoryNotifier, SearchDebouncer, Toast};
use hris_client::{ApiClient, ClientError, Config};

const PASSWORD: &str = "correct horse";

struct MockApi {
    token: String,
    employee_id: Uuid,
}

fn issue_token(role: &str, employee_id: Uuid) -> String {
    let claims = Claims {
        sub: "dewi@example.com".into(),
        exp: 4_102_444_800,
        role: role.into(),
        user_id: Some(Uuid::new_v4()),
        employee_id: Some(employee_id),
        company_id: None,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"only-the-server-knows"),
    )
    .expect("encode token")
}

fn authorized(req: &HttpRequest, api: &MockApi) -> bool {
    req.headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {}", api.token))
}

async fn login(api: web::Data<MockApi>, body: web::Json<Value>) -> HttpResponse {
    if body["password"] == PASSWORD {
        HttpResponse::Ok().json(json!({
            "data": { "access_token": api.token, "token_type": "Bearer" }
        }))
    } else {
        HttpResponse::Unauthorized().json(json!({ "error": "Invalid credentials" }))
    }
}

async fn today(req: HttpRequest, api: web::Data<MockApi>) -> HttpResponse {
    if !authorized(&req, &api) {
        return HttpResponse::Unauthorized().json(json!({ "message": "Unauthenticated." }));
    }
    HttpResponse::Ok().json(json!({ "data": null }))
}

async fn attendance_list(req: HttpRequest, api: web::Data<MockApi>) -> HttpResponse {
    if !authorized(&req, &api) {
        return HttpResponse::Unauthorized().finish();
    }
    HttpResponse::Ok().json(json!({
        "data": [],
        "meta": { "current_page": 1, "per_page": 10, "total": 0, "last_page": 1 }
    }))
}

async fn clock_in(req: HttpRequest, api: web::Data<MockApi>, body: web::Bytes) -> HttpResponse {
    if !authorized(&req, &api) {
        return HttpResponse::Unauthorized().finish();
    }
    let is_multipart = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("multipart/form-data"));
    let text = String::from_utf8_lossy(&body);
    if !is_multipart
        || !text.contains("name=\"latitude\"")
        || !text.contains("-6.2")
        || !text.contains("filename=\"selfie.jpg\"")
    {
        return HttpResponse::BadRequest().json(json!({ "message": "Malformed clock-in" }));
    }
    HttpResponse::Created().json(json!({
        "data": {
            "id": Uuid::new_v4(),
            "employee_id": api.employee_id,
            "date": "2026-03-02",
            "clock_in_time": "2026-03-02T01:05:00Z",
            "clock_out_time": null,
            "status": "late",
            "late_minutes": 5
        }
    }))
}

async fn approve(req: HttpRequest, api: web::Data<MockApi>) -> HttpResponse {
    if !authorized(&req, &api) {
        return HttpResponse::Unauthorized().finish();
    }
    HttpResponse::BadGateway()
        .content_type("text/html")
        .body("<html>bad gateway</html>")
}

async fn create_employee(req: HttpRequest, api: web::Data<MockApi>) -> HttpResponse {
    if !authorized(&req, &api) {
        return HttpResponse::Unauthorized().finish();
    }
    HttpResponse::UnprocessableEntity().json(json!({
        "errors": { "email": ["The email has already been taken."] }
    }))
}

/// Start the mock API on a free port and return its configuration.
async fn spawn_api(role: &str) -> (Config, String) {
    let employee_id = Uuid::new_v4();
    let token = issue_token(role, employee_id);
    let state = web::Data::new(MockApi {
        token: token.clone(),
        employee_id,
    });

    let server = HttpServer::new(move || {
        App::new().app_data(state.clone()).service(
            web::scope("/api/v1")
                .route("/auth/login", web::post().to(login))
                .route("/attendance", web::get().to(attendance_list))
                .route("/attendance/today", web::get().to(today))
                .route("/attendance/clock-in", web::post().to(clock_in))
                .route("/attendance/{id}/approve", web::post().to(approve))
                .route("/employees", web::post().to(create_employee)),
        )
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .expect("bind mock api");
    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());

    let url = format!("http://{addr}");
    let config = Config::from_lookup(|key| match key {
        "HRIS_API_URL" => Some(url.clone()),
        "HRIS_TIMEOUT_SECS" => Some("5".to_string()),
        _ => None,
    })
    .expect("config");
    (config, token)
}

fn anonymous(config: &Config) -> ApiClient {
    let transport =
        HttpTransport::new(config.base_url(), config.request_timeout).expect("transport");
    ApiClient::new(Arc::new(transport))
}

#[actix_web::test]
async fn login_yields_a_session_and_bearer_is_sent() {
    let (config, token) = spawn_api("employee").await;
    let client = anonymous(&config);

    let session = handlers::login(&client, " dewi@example.com ", PASSWORD)
        .await
        .expect("login");
    assert_eq!(session.token(), token);
    assert_eq!(session.username, "dewi@example.com");

    let client = client.with_session(session);
    let today = hris_client::api::attendance::today(&client).await.expect("today");
    assert!(today.is_none());
}

#[actix_web::test]
async fn wrong_password_uses_the_auth_error_shape() {
    let (config, _) = spawn_api("employee").await;
    let err = handlers::login(&anonymous(&config), "dewi@example.com", "nope")
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized(ref m) if m == "Invalid credentials"));
}

#[actix_web::test]
async fn clock_in_uploads_coordinates_and_photo() {
    let (config, token) = spawn_api("employee").await;
    let client = anonymous(&config).with_session(
        hris_client::auth::session::Session::from_token(token).expect("session"),
    );
    let notifier = MemoryNotifier::new();
    let mut screen = AttendanceScreen::new(client, Arc::new(notifier.clone()));

    let mut form = ClockForm::new(ClockKind::In);
    form.location = Some(hris_client::model::geo::GeoPoint::new(-6.2, 106.8));
    form.set_photo(CapturedPhoto {
        file_name: "selfie.jpg".into(),
        mime: "image/jpeg".into(),
        bytes: vec![0xFF, 0xD8, 0xFF, 0xE0],
    });

    let record = screen.submit_clock(&form).await.expect("clock in");
    assert_eq!(record.late_minutes, 5);
    assert_eq!(
        notifier.last(),
        Some(Toast::Success("Clocked in successfully".into()))
    );
}

#[actix_web::test]
async fn unrecognised_error_body_gets_the_generic_toast() {
    let (config, token) = spawn_api("hr").await;
    let client = anonymous(&config).with_session(
        hris_client::auth::session::Session::from_token(token).expect("session"),
    );
    let notifier = MemoryNotifier::new();
    let mut screen = AttendanceScreen::new(client, Arc::new(notifier.clone()));

    let id = Uuid::new_v4();
    let err = screen.approve(id).await.unwrap_err();
    assert!(matches!(err, ClientError::Http { status: 502 }));
    assert_eq!(
        notifier.last(),
        Some(Toast::Error("Failed to approve attendance".into()))
    );
    assert!(!screen.is_busy(id));
}

#[actix_web::test]
async fn field_errors_reach_the_toast() {
    let (config, token) = spawn_api("admin").await;
    let client = anonymous(&config).with_session(
        hris_client::auth::session::Session::from_token(token).expect("session"),
    );
    let notifier = MemoryNotifier::new();
    let mut screen = EmployeeScreen::new(
        client,
        Arc::new(notifier.clone()),
        SearchDebouncer::new(config.search_debounce),
    )
    .expect("admin may manage employees");

    let payload = CreateEmployee {
        employee_code: "EMP-042".into(),
        full_name: "Rina Wijaya".into(),
        email: "rina@example.com".into(),
        phone: None,
        position_id: None,
        branch_id: None,
        grade_id: None,
        employment_type: EmploymentType::Contract,
        join_date: NaiveDate::from_ymd_opt(2026, 1, 5).expect("date"),
        bank: BankDetails::default(),
    };
    let err = screen.create(&payload).await.unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 422, .. }));
    assert_eq!(
        notifier.last(),
        Some(Toast::Error("The email has already been taken.".into()))
    );
}
