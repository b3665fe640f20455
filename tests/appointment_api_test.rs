mod common;

use axum::http::{Method, StatusCode};
use chrono::Duration;
use serde_json::{json, Value};

use common::TestApp;

async fn book(app: &TestApp, service_id: i64, customer: &str, mobile: &str, date: &str) -> Value {
    let (status, body) = app
        .request_json(
            Method::POST,
            "/api/appointments",
            Some(json!({
                "customerName": customer,
                "mobile": mobile,
                "appointmentDate": date,
                "appointmentTime": "14:30:00",
                "serviceId": service_id,
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "book appointment: {body}");
    body
}

#[tokio::test]
async fn creation_always_starts_pending() {
    let app = TestApp::new().await;
    let service_id = app.create_service("Haircut & Styling", true).await;

    // A caller-supplied status must be ignored.
    let (status, body) = app
        .request_json(
            Method::POST,
            "/api/appointments",
            Some(json!({
                "customerName": "Priya Shah",
                "mobile": "5551230001",
                "appointmentDate": "2024-06-12",
                "appointmentTime": "10:00:00",
                "serviceId": service_id,
                "status": "CONFIRMED",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], json!("PENDING"));
    assert_eq!(body["createdAt"], json!("2024-06-10T09:00:00"));
    assert_eq!(body["updatedAt"], json!("2024-06-10T09:00:00"));
    assert_eq!(body["service"]["name"], json!("Haircut & Styling"));
}

#[tokio::test]
async fn creation_with_unknown_service_is_a_bad_request() {
    let app = TestApp::new().await;

    let (status, _) = app
        .request_json(
            Method::POST,
            "/api/appointments",
            Some(json!({
                "customerName": "Priya Shah",
                "mobile": "5551230001",
                "appointmentDate": "2024-06-12",
                "appointmentTime": "10:00:00",
                "serviceId": 4242,
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn creation_without_service_is_a_bad_request() {
    let app = TestApp::new().await;

    let (status, body) = app
        .request_json(
            Method::POST,
            "/api/appointments",
            Some(json!({
                "customerName": "Priya Shah",
                "mobile": "5551230001",
                "appointmentDate": "2024-06-12",
                "appointmentTime": "10:00:00",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("Service is required"));
}

#[tokio::test]
async fn date_queries_cover_exact_range_today_and_upcoming() {
    let app = TestApp::new().await;
    let service_id = app.create_service("Beard Trim", true).await;

    // Clock starts at 2024-06-10; the upcoming window ends 2024-07-10.
    book(&app, service_id, "Today", "5550000001", "2024-06-10").await;
    book(&app, service_id, "Soon", "5550000002", "2024-06-15").await;
    book(&app, service_id, "Edge", "5550000003", "2024-07-10").await;
    book(&app, service_id, "Late", "5550000004", "2024-07-11").await;

    let (status, by_date) = app
        .request_json(Method::GET, "/api/appointments/date/2024-06-15", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let by_date = by_date.as_array().unwrap();
    assert_eq!(by_date.len(), 1);
    assert_eq!(by_date[0]["customerName"], json!("Soon"));

    let (_, in_range) = app
        .request_json(
            Method::GET,
            "/api/appointments/date-range?startDate=2024-06-10&endDate=2024-06-15",
            None,
        )
        .await;
    // Both endpoints of the range are inclusive.
    assert_eq!(in_range.as_array().unwrap().len(), 2);

    let (_, today) = app
        .request_json(Method::GET, "/api/appointments/today", None)
        .await;
    let today = today.as_array().unwrap();
    assert_eq!(today.len(), 1);
    assert_eq!(today[0]["customerName"], json!("Today"));

    let (_, upcoming) = app
        .request_json(Method::GET, "/api/appointments/upcoming", None)
        .await;
    let names: Vec<&str> = upcoming
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["customerName"].as_str().unwrap())
        .collect();
    assert_eq!(names.len(), 3);
    assert!(names.contains(&"Today"));
    assert!(names.contains(&"Soon"));
    assert!(names.contains(&"Edge"));
    assert!(!names.contains(&"Late"));
}

#[tokio::test]
async fn status_and_mobile_queries_filter() {
    let app = TestApp::new().await;
    let service_id = app.create_service("Full Color", true).await;

    let first = book(&app, service_id, "Asha", "5551112222", "2024-06-12").await;
    book(&app, service_id, "Ben", "5553334444", "2024-06-12").await;

    let first_id = first["id"].as_i64().unwrap();
    let (status, _) = app
        .request_json(
            Method::PATCH,
            &format!("/api/appointments/{first_id}/status?status=CONFIRMED"),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, confirmed) = app
        .request_json(Method::GET, "/api/appointments/status/CONFIRMED", None)
        .await;
    let confirmed = confirmed.as_array().unwrap();
    assert_eq!(confirmed.len(), 1);
    assert_eq!(confirmed[0]["customerName"], json!("Asha"));

    let (_, pending) = app
        .request_json(Method::GET, "/api/appointments/status/PENDING", None)
        .await;
    assert_eq!(pending.as_array().unwrap().len(), 1);

    let (_, by_mobile) = app
        .request_json(Method::GET, "/api/appointments/mobile/5553334444", None)
        .await;
    let by_mobile = by_mobile.as_array().unwrap();
    assert_eq!(by_mobile.len(), 1);
    assert_eq!(by_mobile[0]["customerName"], json!("Ben"));
}

#[tokio::test]
async fn update_rewrites_fields_but_never_status() {
    let app = TestApp::new().await;
    let service_id = app.create_service("Facial Treatment", true).await;

    let created = book(&app, service_id, "Asha", "5551112222", "2024-06-12").await;
    let id = created["id"].as_i64().unwrap();

    app.request_json(
        Method::PATCH,
        &format!("/api/appointments/{id}/status?status=CONFIRMED"),
        None,
    )
    .await;

    app.clock.advance(Duration::hours(1));

    let (status, body) = app
        .request_json(
            Method::PUT,
            &format!("/api/appointments/{id}"),
            Some(json!({
                "customerName": "Asha Kapoor",
                "mobile": "5551112222",
                "appointmentDate": "2024-06-13",
                "appointmentTime": "16:00:00",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["customerName"], json!("Asha Kapoor"));
    assert_eq!(body["appointmentDate"], json!("2024-06-13"));
    // Plain updates leave the lifecycle alone and refresh updatedAt only.
    assert_eq!(body["status"], json!("CONFIRMED"));
    assert_eq!(body["createdAt"], json!("2024-06-10T09:00:00"));
    assert_eq!(body["updatedAt"], json!("2024-06-10T10:00:00"));
}

#[tokio::test]
async fn update_with_unknown_service_fails_and_persists_nothing() {
    let app = TestApp::new().await;
    let service_id = app.create_service("Haircut & Styling", true).await;

    let created = book(&app, service_id, "Asha", "5551112222", "2024-06-12").await;
    let id = created["id"].as_i64().unwrap();

    let (status, _) = app
        .request_json(
            Method::PUT,
            &format!("/api/appointments/{id}"),
            Some(json!({
                "customerName": "Changed Name",
                "mobile": "5559998888",
                "appointmentDate": "2024-06-20",
                "appointmentTime": "11:00:00",
                "serviceId": 4242,
            })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, unchanged) = app
        .request_json(Method::GET, &format!("/api/appointments/{id}"), None)
        .await;
    assert_eq!(unchanged["customerName"], json!("Asha"));
    assert_eq!(unchanged["mobile"], json!("5551112222"));
    assert_eq!(unchanged["appointmentDate"], json!("2024-06-12"));
}

#[tokio::test]
async fn status_transitions_are_unconstrained() {
    let app = TestApp::new().await;
    let service_id = app.create_service("Beard Trim", true).await;

    let created = book(&app, service_id, "Ben", "5553334444", "2024-06-12").await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) = app
        .request_json(
            Method::PATCH,
            &format!("/api/appointments/{id}/status?status=CANCELLED"),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("CANCELLED"));

    // Backwards transitions are allowed by design.
    let (status, body) = app
        .request_json(
            Method::PATCH,
            &format!("/api/appointments/{id}/status?status=PENDING"),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("PENDING"));
}

#[tokio::test]
async fn missing_appointments_yield_not_found() {
    let app = TestApp::new().await;

    let (status, _) = app
        .request_json(Method::GET, "/api/appointments/999", None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .request_json(
            Method::PATCH,
            "/api/appointments/999/status?status=CONFIRMED",
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_removes_the_appointment() {
    let app = TestApp::new().await;
    let service_id = app.create_service("Full Color", true).await;

    let created = book(&app, service_id, "Asha", "5551112222", "2024-06-12").await;
    let id = created["id"].as_i64().unwrap();

    let response = app
        .request(Method::DELETE, &format!("/api/appointments/{id}"), None)
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let (status, _) = app
        .request_json(Method::GET, &format!("/api/appointments/{id}"), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
