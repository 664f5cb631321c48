//! Integration tests for the event catalog endpoints.

use http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn create_event_derives_slot_count_from_window() {
    let app = TestApp::new().await;

    // One-hour window with 30-minute sessions holds two slots.
    let response = app
        .create_event(
            "Checkup",
            "2025-01-06T09:00:00+00:00",
            "2025-01-06T10:00:00+00:00",
            30,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    assert_eq!(response.body["available_slots"], 2);
    assert_eq!(response.body["title"], "Checkup");
}

#[tokio::test]
async fn create_event_with_equal_bounds_is_rejected_and_writes_nothing() {
    let app = TestApp::new().await;

    let response = app
        .create_event(
            "Degenerate",
            "2025-01-06T09:00:00+00:00",
            "2025-01-06T09:00:00+00:00",
            30,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), Some("INVALID_TIMING"));

    let list = app.request("GET", "/event", None, None).await;
    assert_eq!(list.status, StatusCode::OK);
    assert_eq!(list.body.as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn create_event_with_blank_title_is_rejected() {
    let app = TestApp::new().await;

    let response = app
        .create_event(
            "   ",
            "2025-01-06T09:00:00+00:00",
            "2025-01-06T10:00:00+00:00",
            30,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), Some("INVALID_EVENT"));
}

#[tokio::test]
async fn empty_catalog_lists_as_empty_array() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/event", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, serde_json::json!([]));
}

#[tokio::test]
async fn update_event_revalidates_and_accepts_break_window() {
    let app = TestApp::new().await;

    let created = app
        .create_event(
            "Vaccination",
            "2025-01-06T08:00:00+00:00",
            "2025-01-06T12:00:00+00:00",
            30,
        )
        .await;
    let id = created.id();

    let response = app
        .request(
            "PUT",
            &format!("/event/{id}"),
            Some(serde_json::json!({
                "title": "Vaccination",
                "location": "Room 3",
                "duration_minutes": 30,
                "starts_at": "2025-01-06T08:00:00+00:00",
                "ends_at": "2025-01-06T12:00:00+00:00",
                "break_start": "2025-01-06T10:00:00+00:00",
                "break_end": "2025-01-06T10:30:00+00:00",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["location"], "Room 3");
    assert_eq!(response.body["break_start"], "2025-01-06T10:00:00Z");
}

#[tokio::test]
async fn update_unknown_event_is_not_found() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "PUT",
            &format!("/event/{}", uuid::Uuid::new_v4()),
            Some(serde_json::json!({
                "title": "Ghost",
                "location": "Nowhere",
                "duration_minutes": 30,
                "starts_at": "2025-01-06T08:00:00+00:00",
                "ends_at": "2025-01-06T12:00:00+00:00",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_an_event_cascades_its_reservations() {
    let app = TestApp::new().await;

    let created = app
        .create_event(
            "Checkup",
            "2025-01-06T09:00:00+00:00",
            "2025-01-06T10:00:00+00:00",
            30,
        )
        .await;
    let id = created.id();

    let token = app.token("S-1-5-21-1001");
    let booked = app.book(&token, &id, "2025-01-06T09:00:00+00:00").await;
    assert_eq!(booked.status, StatusCode::CREATED, "{:?}", booked.body);

    let deleted = app.request("DELETE", &format!("/event/{id}"), None, None).await;
    assert_eq!(deleted.status, StatusCode::OK);

    let remaining: i64 = sqlx::query_scalar("SELECT count(*) FROM reservations")
        .fetch_one(&app.db_pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0);
}

#[tokio::test]
async fn interest_list_enforces_uniqueness_and_capacity() {
    let app = TestApp::new().await;

    let created = app
        .create_event(
            "Popular",
            "2025-01-06T09:00:00+00:00",
            "2025-01-06T10:00:00+00:00",
            30,
        )
        .await;
    let id = created.id();
    let path = format!("/event/{id}/interest");

    let u1 = app.token("S-1-5-21-1001");
    let first = app.request("POST", &path, None, Some(&u1)).await;
    assert_eq!(first.status, StatusCode::CREATED, "{:?}", first.body);

    let again = app.request("POST", &path, None, Some(&u1)).await;
    assert_eq!(again.status, StatusCode::BAD_REQUEST);
    assert_eq!(again.error_code(), Some("DUPLICATE_INTEREST"));

    // Test config caps the list at two entries.
    let u2 = app.token("S-1-5-21-1002");
    let second = app.request("POST", &path, None, Some(&u2)).await;
    assert_eq!(second.status, StatusCode::CREATED);

    let u3 = app.token("S-1-5-21-1003");
    let third = app.request("POST", &path, None, Some(&u3)).await;
    assert_eq!(third.status, StatusCode::BAD_REQUEST);
    assert_eq!(third.error_code(), Some("CAPACITY_EXCEEDED"));
}

#[tokio::test]
async fn concurrent_interest_registrations_respect_the_ceiling() {
    let app = TestApp::new().await;

    let created = app
        .create_event(
            "Oversubscribed",
            "2025-01-06T09:00:00+00:00",
            "2025-01-06T10:00:00+00:00",
            30,
        )
        .await;
    let id = created.id();

    // Test config caps the list at two entries; five users race for them.
    let mut handles = Vec::new();
    for i in 0..5 {
        let router = app.router.clone();
        let token = app.token(&format!("KEEN-{i}"));
        let path = format!("/event/{id}/interest");
        handles.push(tokio::spawn(async move {
            use tower::ServiceExt;

            let req = http::Request::builder()
                .method("POST")
                .uri(path)
                .header("Content-Type", "application/json")
                .header("Authorization", format!("Bearer {token}"))
                .body(axum::body::Body::empty())
                .unwrap();
            router.oneshot(req).await.unwrap().status()
        }));
    }

    let mut admitted = 0;
    let mut rejected = 0;
    for handle in handles {
        match handle.await.unwrap() {
            http::StatusCode::CREATED => admitted += 1,
            http::StatusCode::BAD_REQUEST => rejected += 1,
            other => panic!("unexpected status {other}"),
        }
    }

    assert_eq!(admitted, 2);
    assert_eq!(rejected, 3);

    let count: i64 = sqlx::query_scalar("SELECT count(*) FROM interest_entries")
        .fetch_one(&app.db_pool)
        .await
        .unwrap();
    assert_eq!(count, 2);
}

#[tokio::test]
async fn interest_requires_authentication() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            &format!("/event/{}/interest", uuid::Uuid::new_v4()),
            None,
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
