//! API integration tests against a running gateway (or server)
//!
//! Run with: `SHAREIT_TEST_URL=http://localhost:8080 cargo test --test api_tests -- --ignored`

use chrono::{Duration, Local, NaiveDateTime};
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

const DEFAULT_BASE_URL: &str = "http://localhost:8080";
const USER_HEADER: &str = "X-Sharer-User-Id";

fn base_url() -> String {
    std::env::var("SHAREIT_TEST_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

fn stamp(at: NaiveDateTime) -> String {
    at.format("%Y-%m-%dT%H:%M:%S").to_string()
}

/// Emails must be unique across runs
fn unique_email(name: &str) -> String {
    format!(
        "{}.{}@example.com",
        name,
        Local::now().timestamp_nanos_opt().unwrap_or_default()
    )
}

async fn create_user(client: &Client, name: &str) -> i64 {
    let response = client
        .post(format!("{}/users", base_url()))
        .json(&json!({"name": name, "email": unique_email(name)}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    body["id"].as_i64().expect("No id in response")
}

async fn create_item(client: &Client, owner_id: i64, available: bool) -> i64 {
    let response = client
        .post(format!("{}/items", base_url()))
        .header(USER_HEADER, owner_id)
        .json(&json!({"name": "Drill", "description": "Cordless drill", "available": available}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    body["id"].as_i64().expect("No id in response")
}

async fn book(client: &Client, booker_id: i64, item_id: i64, start: NaiveDateTime, end: NaiveDateTime) -> reqwest::Response {
    client
        .post(format!("{}/bookings", base_url()))
        .header(USER_HEADER, booker_id)
        .json(&json!({"itemId": item_id, "start": stamp(start), "end": stamp(end)}))
        .send()
        .await
        .expect("Failed to send request")
}

async fn booking_id(response: reqwest::Response) -> i64 {
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    body["id"].as_i64().expect("No id in response")
}

async fn decide(client: &Client, owner_id: i64, booking_id: i64, approved: bool) -> reqwest::Response {
    client
        .patch(format!("{}/bookings/{}?approved={}", base_url(), booking_id, approved))
        .header(USER_HEADER, owner_id)
        .send()
        .await
        .expect("Failed to send request")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", base_url()))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_duplicate_email_conflicts() {
    let client = Client::new();
    let email = unique_email("dup");

    let first = client
        .post(format!("{}/users", base_url()))
        .json(&json!({"name": "First", "email": email}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(first.status(), StatusCode::OK);
    let first_id = first.json::<Value>().await.unwrap()["id"].as_i64().unwrap();

    let second = client
        .post(format!("{}/users", base_url()))
        .json(&json!({"name": "Second", "email": email}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(second.status(), StatusCode::CONFLICT);

    // Updating to one's own email is not a conflict
    let own = client
        .patch(format!("{}/users/{}", base_url(), first_id))
        .json(&json!({"email": email}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(own.status(), StatusCode::OK);

    let other_id = create_user(&client, "other").await;
    let taken = client
        .patch(format!("{}/users/{}", base_url(), other_id))
        .json(&json!({"email": email}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(taken.status(), StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore]
async fn test_delete_then_fetch_is_not_found() {
    let client = Client::new();
    let user_id = create_user(&client, "gone").await;

    let deleted = client
        .delete(format!("{}/users/{}", base_url(), user_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(deleted.status(), StatusCode::OK);

    let fetched = client
        .get(format!("{}/users/{}", base_url(), user_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(fetched.status(), StatusCode::NOT_FOUND);

    let body: Value = fetched.json().await.expect("Failed to parse response");
    assert_eq!(body["title"], "Not found");
}

#[tokio::test]
#[ignore]
async fn test_booking_unavailable_item_fails() {
    let client = Client::new();
    let owner = create_user(&client, "owner").await;
    let booker = create_user(&client, "booker").await;
    let item = create_item(&client, owner, false).await;

    let start = now() + Duration::days(1);
    let response = book(&client, booker, item, start, start + Duration::days(1)).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
#[ignore]
async fn test_booking_lifecycle() {
    let client = Client::new();
    let owner = create_user(&client, "owner").await;
    let booker = create_user(&client, "booker").await;
    let item = create_item(&client, owner, true).await;

    let start = now() + Duration::days(1);
    let approved = booking_id(book(&client, booker, item, start, start + Duration::days(1)).await).await;
    let rejected = booking_id(book(&client, booker, item, start, start + Duration::days(2)).await).await;

    // Only the owner decides
    let response = decide(&client, booker, approved, true).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = decide(&client, owner, approved, true).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "APPROVED");

    let response = decide(&client, owner, rejected, false).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "REJECTED");

    // Decisions are final
    let response = decide(&client, owner, approved, false).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    // A non-owner is refused even once decided
    let response = decide(&client, booker, rejected, true).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore]
async fn test_state_filters_partition_by_time() {
    let client = Client::new();
    let owner = create_user(&client, "owner").await;
    let booker = create_user(&client, "booker").await;
    let item = create_item(&client, owner, true).await;
    let now = now();

    let past = booking_id(book(&client, booker, item, now - Duration::days(3), now - Duration::days(2)).await).await;
    let current = booking_id(book(&client, booker, item, now - Duration::hours(1), now + Duration::days(1)).await).await;
    let future = booking_id(book(&client, booker, item, now + Duration::days(2), now + Duration::days(3)).await).await;

    for (state, expected) in [
        ("PAST", vec![past]),
        ("CURRENT", vec![current]),
        ("FUTURE", vec![future]),
        ("WAITING", vec![future, current, past]),
        ("REJECTED", vec![]),
        ("ALL", vec![past, current, future]),
    ] {
        let response = client
            .get(format!("{}/bookings?state={}", base_url(), state))
            .header(USER_HEADER, booker)
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), StatusCode::OK);

        let body: Value = response.json().await.unwrap();
        let ids: Vec<i64> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|b| b["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, expected, "state {}", state);
    }

    let response = client
        .get(format!("{}/bookings/owner?state=FUTURE", base_url()))
        .header(USER_HEADER, owner)
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.unwrap();
    assert_eq!(body.as_array().map(Vec::len), Some(1));

    let response = client
        .get(format!("{}/bookings?state=UNSUPPORTED_STATUS", base_url()))
        .header(USER_HEADER, booker)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore]
async fn test_comment_requires_finished_booking() {
    let client = Client::new();
    let owner = create_user(&client, "owner").await;
    let booker = create_user(&client, "booker").await;
    let item = create_item(&client, owner, true).await;

    let comment = |author: i64| {
        client
            .post(format!("{}/items/{}/comment", base_url(), item))
            .header(USER_HEADER, author)
            .json(&json!({"text": "Worked fine"}))
            .send()
    };

    let response = comment(booker).await.expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let now = now();
    booking_id(book(&client, booker, item, now - Duration::days(2), now - Duration::days(1)).await).await;

    let response = comment(booker).await.expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let created: Value = response.json().await.unwrap();
    assert_eq!(created["authorName"], "booker");

    let response = client
        .get(format!("{}/items/{}", base_url(), item))
        .header(USER_HEADER, owner)
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["comments"][0]["id"], created["id"]);
}

#[tokio::test]
#[ignore]
async fn test_request_lists_answering_items() {
    let client = Client::new();
    let requestor = create_user(&client, "requestor").await;
    let owner = create_user(&client, "owner").await;

    let response = client
        .post(format!("{}/requests", base_url()))
        .header(USER_HEADER, requestor)
        .json(&json!({"description": "Need a ladder"}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let request_id = response.json::<Value>().await.unwrap()["id"].as_i64().unwrap();

    let response = client
        .post(format!("{}/items", base_url()))
        .header(USER_HEADER, owner)
        .json(&json!({
            "name": "Ladder", "description": "Three metres", "available": true, "requestId": request_id
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);

    let response = client
        .get(format!("{}/requests/{}", base_url(), request_id))
        .header(USER_HEADER, owner)
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["items"][0]["name"], "Ladder");

    // The owner sees the request among other users' requests, the requestor does not
    let response = client
        .get(format!("{}/requests/all", base_url()))
        .header(USER_HEADER, requestor)
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.unwrap();
    assert!(body
        .as_array()
        .unwrap()
        .iter()
        .all(|r| r["id"].as_i64() != Some(request_id)));
}
