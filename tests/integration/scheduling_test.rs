//! Integration tests for booking, cancellation, and the conflict rules.

use http::StatusCode;

use crate::helpers::TestApp;

async fn checkup_event(app: &TestApp) -> String {
    // 2025-01-06 09:00–10:00 UTC, 30-minute sessions: slots 09:00 and 09:30.
    app.create_event(
        "Checkup",
        "2025-01-06T09:00:00+00:00",
        "2025-01-06T10:00:00+00:00",
        30,
    )
    .await
    .id()
}

#[tokio::test]
async fn booking_a_free_slot_succeeds() {
    let app = TestApp::new().await;
    let event_id = checkup_event(&app).await;
    let token = app.token("S-1-5-21-1001");

    let response = app.book(&token, &event_id, "2025-01-06T09:00:00+00:00").await;

    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    assert_eq!(response.body["slot_at"], "2025-01-06T09:00:00Z");
    assert_eq!(response.body["status"], "active");
}

#[tokio::test]
async fn second_user_on_the_same_slot_is_rejected() {
    let app = TestApp::new().await;
    let event_id = checkup_event(&app).await;

    let first = app
        .book(&app.token("U1"), &event_id, "2025-01-06T09:00:00+00:00")
        .await;
    assert_eq!(first.status, StatusCode::CREATED);

    let second = app
        .book(&app.token("U2"), &event_id, "2025-01-06T09:00:00+00:00")
        .await;
    assert_eq!(second.status, StatusCode::BAD_REQUEST);
    assert_eq!(second.error_code(), Some("SLOT_CONFLICT"));
}

#[tokio::test]
async fn one_booking_per_user_per_event() {
    let app = TestApp::new().await;
    let event_id = checkup_event(&app).await;
    let token = app.token("U1");

    let first = app.book(&token, &event_id, "2025-01-06T09:00:00+00:00").await;
    assert_eq!(first.status, StatusCode::CREATED);

    let second = app.book(&token, &event_id, "2025-01-06T09:30:00+00:00").await;
    assert_eq!(second.status, StatusCode::BAD_REQUEST);
    assert_eq!(second.error_code(), Some("DUPLICATE_BOOKING"));
}

#[tokio::test]
async fn same_start_date_across_events_is_rejected() {
    let app = TestApp::new().await;
    let e1 = checkup_event(&app).await;
    let e2 = app
        .create_event(
            "Second opinion",
            "2025-01-06T13:00:00+00:00",
            "2025-01-06T14:00:00+00:00",
            30,
        )
        .await
        .id();

    let token = app.token("U1");
    let first = app.book(&token, &e1, "2025-01-06T09:00:00+00:00").await;
    assert_eq!(first.status, StatusCode::CREATED);

    let second = app.book(&token, &e2, "2025-01-06T13:00:00+00:00").await;
    assert_eq!(second.status, StatusCode::BAD_REQUEST);
    assert_eq!(second.error_code(), Some("SAME_DAY_CONFLICT"));
}

#[tokio::test]
async fn off_boundary_request_snaps_to_the_nearest_slot() {
    let app = TestApp::new().await;
    let event_id = checkup_event(&app).await;

    let response = app
        .book(&app.token("U1"), &event_id, "2025-01-06T09:07:00+00:00")
        .await;

    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    assert_eq!(response.body["slot_at"], "2025-01-06T09:00:00Z");
}

#[tokio::test]
async fn slot_outside_the_event_window_is_rejected() {
    let app = TestApp::new().await;
    let event_id = checkup_event(&app).await;

    let response = app
        .book(&app.token("U1"), &event_id, "2025-01-06T11:00:00+00:00")
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), Some("SLOT_OUT_OF_RANGE"));
}

#[tokio::test]
async fn slot_overlapping_the_break_window_is_rejected() {
    let app = TestApp::new().await;
    let created = app
        .create_event(
            "With break",
            "2025-01-06T08:00:00+00:00",
            "2025-01-06T12:00:00+00:00",
            30,
        )
        .await;
    let event_id = created.id();

    let updated = app
        .request(
            "PUT",
            &format!("/event/{event_id}"),
            Some(serde_json::json!({
                "title": "With break",
                "location": "Room 1",
                "duration_minutes": 30,
                "starts_at": "2025-01-06T08:00:00+00:00",
                "ends_at": "2025-01-06T12:00:00+00:00",
                "break_start": "2025-01-06T10:00:00+00:00",
                "break_end": "2025-01-06T10:30:00+00:00",
            })),
            None,
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);

    let response = app
        .book(&app.token("U1"), &event_id, "2025-01-06T10:00:00+00:00")
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), Some("INVALID_SLOT"));
}

#[tokio::test]
async fn booking_an_unknown_event_is_not_found() {
    let app = TestApp::new().await;

    let response = app
        .book(
            &app.token("U1"),
            &uuid::Uuid::new_v4().to_string(),
            "2025-01-06T09:00:00+00:00",
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.error_code(), Some("EVENT_NOT_FOUND"));
}

#[tokio::test]
async fn booking_requires_a_bearer_token() {
    let app = TestApp::new().await;
    let event_id = checkup_event(&app).await;

    let response = app
        .request(
            "POST",
            "/schedule-event",
            Some(serde_json::json!({
                "event_id": event_id,
                "slot_at": "2025-01-06T09:00:00+00:00",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn listing_reservations_returns_the_users_bookings() {
    let app = TestApp::new().await;
    let event_id = checkup_event(&app).await;
    let token = app.token("U1");

    app.book(&token, &event_id, "2025-01-06T09:30:00+00:00").await;

    let response = app
        .request("GET", "/schedule-event/U1", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let items = response.body.as_array().expect("array body");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["slot_at"], "2025-01-06T09:30:00Z");
}

#[tokio::test]
async fn cancel_frees_the_slot_for_rebooking() {
    let app = TestApp::new().await;
    let event_id = checkup_event(&app).await;
    let token = app.token("U1");

    let booked = app.book(&token, &event_id, "2025-01-06T09:00:00+00:00").await;
    assert_eq!(booked.status, StatusCode::CREATED);

    let cancelled = app
        .request(
            "DELETE",
            &format!("/schedule-event/{event_id}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(cancelled.status, StatusCode::OK);

    // Another user can now take the slot, and the canceller may rebook.
    let retaken = app
        .book(&app.token("U2"), &event_id, "2025-01-06T09:00:00+00:00")
        .await;
    assert_eq!(retaken.status, StatusCode::CREATED, "{:?}", retaken.body);
}

#[tokio::test]
async fn the_same_user_can_rebook_their_cancelled_slot() {
    let app = TestApp::new().await;
    let event_id = checkup_event(&app).await;
    let token = app.token("U1");

    let booked = app.book(&token, &event_id, "2025-01-06T09:00:00+00:00").await;
    assert_eq!(booked.status, StatusCode::CREATED);

    let cancelled = app
        .request(
            "DELETE",
            &format!("/schedule-event/{event_id}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(cancelled.status, StatusCode::OK);

    // The hard delete must clear the duplicate and same-day checks, not
    // just free the slot.
    let rebooked = app.book(&token, &event_id, "2025-01-06T09:00:00+00:00").await;
    assert_eq!(rebooked.status, StatusCode::CREATED, "{:?}", rebooked.body);
    assert_eq!(rebooked.body["slot_at"], "2025-01-06T09:00:00Z");
}

#[tokio::test]
async fn cancelling_without_a_reservation_is_a_bad_request() {
    let app = TestApp::new().await;
    let event_id = checkup_event(&app).await;

    let response = app
        .request(
            "DELETE",
            &format!("/schedule-event/{event_id}"),
            None,
            Some(&app.token("U1")),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), Some("SCHEDULE_NOT_FOUND"));
}

#[tokio::test]
async fn admin_cancel_is_idempotent_and_admin_only() {
    let app = TestApp::new().await;
    let event_id = checkup_event(&app).await;

    let booked = app
        .book(&app.token("S-1-5-21-1001"), &event_id, "2025-01-06T09:00:00+00:00")
        .await;
    let reservation_id = booked.id();

    let path = format!("/schedule-event/admin-cancel/{reservation_id}");

    let forbidden = app
        .request("DELETE", &path, None, Some(&app.token("U2")))
        .await;
    assert_eq!(forbidden.status, StatusCode::FORBIDDEN);

    let admin = app.admin_token("ADMIN");
    let first = app.request("DELETE", &path, None, Some(&admin)).await;
    assert_eq!(first.status, StatusCode::OK);

    // Retrying the same cancellation stays successful.
    let second = app.request("DELETE", &path, None, Some(&admin)).await;
    assert_eq!(second.status, StatusCode::OK);
}

#[tokio::test]
async fn concurrent_bookings_for_one_slot_admit_exactly_one() {
    let app = TestApp::new().await;
    let event_id = checkup_event(&app).await;

    let mut handles = Vec::new();
    for i in 0..5 {
        let router = app.router.clone();
        let token = app.token(&format!("RACER-{i}"));
        let event_id = event_id.clone();
        handles.push(tokio::spawn(async move {
            use tower::ServiceExt;

            let body = serde_json::json!({
                "event_id": event_id,
                "slot_at": "2025-01-06T09:30:00+00:00",
            });
            let req = http::Request::builder()
                .method("POST")
                .uri("/schedule-event")
                .header("Content-Type", "application/json")
                .header("Authorization", format!("Bearer {token}"))
                .body(axum::body::Body::from(body.to_string()))
                .unwrap();
            router.oneshot(req).await.unwrap().status()
        }));
    }

    let mut created = 0;
    let mut rejected = 0;
    for handle in handles {
        match handle.await.unwrap() {
            StatusCode::CREATED => created += 1,
            StatusCode::BAD_REQUEST => rejected += 1,
            other => panic!("unexpected status {other}"),
        }
    }

    assert_eq!(created, 1);
    assert_eq!(rejected, 4);
}
