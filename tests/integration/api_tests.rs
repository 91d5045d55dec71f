//! API integration tests
//!
//! Run against a live server seeded with the default admin account:
//! cargo test -- --ignored

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Helper to get an authenticated admin token
async fn get_auth_token(client: &Client) -> String {
    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "username": "admin",
            "password": "frontdesk-admin"
        }))
        .send()
        .await
        .expect("Failed to send login request");

    let body: Value = response.json().await.expect("Failed to parse login response");
    body["token"].as_str().expect("No token in response").to_string()
}

/// Register a kiosk visitor at the seeded default location
async fn register_visitor(client: &Client, name: &str) -> Value {
    let location: Value = client
        .get(format!("{}/locations/by-slug/main-office", BASE_URL))
        .send()
        .await
        .expect("Failed to fetch location")
        .json()
        .await
        .expect("Failed to parse location");

    let response = client
        .post(format!("{}/visitors", BASE_URL))
        .json(&json!({
            "location_id": location["id"],
            "full_name": name,
            "phone_number": "5550100",
            "purpose_of_visit": "Interview",
            "whom_to_meet": "Nobody In Particular",
            "scheduled_time": "2026-09-01T10:00:00Z"
        }))
        .send()
        .await
        .expect("Failed to register visitor");

    assert_eq!(response.status(), 201);
    response.json().await.expect("Failed to parse visitor")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_login() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "username": "admin",
            "password": "frontdesk-admin"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["token"].is_string());
    assert_eq!(body["user"]["username"], "admin");
    assert_eq!(body["user"]["role"], "admin");
}

#[tokio::test]
#[ignore]
async fn test_login_invalid_credentials() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "username": "admin",
            "password": "wrong"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_get_current_user() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .get(format!("{}/auth/me", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["username"], "admin");
    assert!(body["permissions"].is_array());
}

#[tokio::test]
#[ignore]
async fn test_kiosk_registration_starts_awaiting_approval() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let visitor = register_visitor(&client, "Jane Doe").await;
    assert_eq!(visitor["status"], "awaiting_approval");
    assert!(visitor["approved_by"].is_null());

    // Cleanup
    let _ = client
        .delete(format!("{}/visitors/{}", BASE_URL, visitor["id"]))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await;
}

#[tokio::test]
#[ignore]
async fn test_check_in_rejected_before_approval() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let visitor = register_visitor(&client, "Early Arrival").await;

    let response = client
        .post(format!("{}/visitors/{}/checkin", BASE_URL, visitor["id"]))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 409);

    let _ = client
        .delete(format!("{}/visitors/{}", BASE_URL, visitor["id"]))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await;
}

#[tokio::test]
#[ignore]
async fn test_full_visit_lifecycle() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let visitor = register_visitor(&client, "Walkthrough Visitor").await;
    let id = visitor["id"].as_i64().expect("No visitor ID");

    // Approve via the dashboard path
    let response = client
        .put(format!("{}/visitors/{}/status", BASE_URL, id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "status": "approved" }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "approved");
    // The seeded admin account's display name, not a username or null
    assert_eq!(body["approved_by"], "Administrator");
    assert!(body["approved_at"].is_string());

    // Check in
    let response = client
        .post(format!("{}/visitors/{}/checkin", BASE_URL, id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "checked_in");
    assert!(body["check_in_time"].is_string());

    // Checking in twice is a conflict
    let response = client
        .post(format!("{}/visitors/{}/checkin", BASE_URL, id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);

    // Check out
    let response = client
        .post(format!("{}/visitors/{}/checkout", BASE_URL, id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "checked_out");
    assert!(body["check_out_time"].is_string());

    // Cleanup
    let response = client
        .delete(format!("{}/visitors/{}", BASE_URL, id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);
}

#[tokio::test]
#[ignore]
async fn test_approve_with_garbage_token() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let visitor = register_visitor(&client, "Token Target").await;

    let response = client
        .get(format!(
            "{}/visitors/{}/approve?token=not-a-real-token",
            BASE_URL, visitor["id"]
        ))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);

    let _ = client
        .delete(format!("{}/visitors/{}", BASE_URL, visitor["id"]))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await;
}

#[tokio::test]
#[ignore]
async fn test_list_visitors() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .get(format!("{}/visitors", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body.is_array());
}

#[tokio::test]
#[ignore]
async fn test_get_stats() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .get(format!("{}/visitors/stats", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["total"].is_number());
    assert!(body["awaiting_approval"].is_number());
    assert!(body["approval_rate"].is_number());
}

#[tokio::test]
#[ignore]
async fn test_kiosk_endpoints_need_no_auth() {
    let client = Client::new();

    let response = client
        .get(format!("{}/locations/by-slug/main-office", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let location_id = body["id"].as_i64().expect("No location ID");

    let response = client
        .get(format!("{}/staff/public?location_id={}", BASE_URL, location_id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let response = client
        .get(format!("{}/custom-fields", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
}

#[tokio::test]
#[ignore]
async fn test_unauthorized_access() {
    let client = Client::new();

    let response = client
        .get(format!("{}/visitors", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_seed_produces_no_duplicates() {
    // The seed runs on every server start; each default is guarded by an
    // existence check, so however many times the server has restarted
    // there must be exactly one of each seeded row.
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let roles: Value = client
        .get(format!("{}/roles", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    for name in ["admin", "staff", "reception"] {
        let matching = roles
            .as_array()
            .expect("Roles should be an array")
            .iter()
            .filter(|role| role["name"] == name)
            .count();
        assert_eq!(matching, 1, "expected exactly one '{}' role", name);
    }

    let users: Value = client
        .get(format!("{}/users", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    let admins = users
        .as_array()
        .expect("Users should be an array")
        .iter()
        .filter(|user| user["username"] == "admin")
        .count();
    assert_eq!(admins, 1);

    let locations: Value = client
        .get(format!("{}/locations", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    let seeded = locations
        .as_array()
        .expect("Locations should be an array")
        .iter()
        .filter(|location| location["registration_slug"] == "main-office")
        .count();
    assert_eq!(seeded, 1);
}

#[tokio::test]
#[ignore]
async fn test_registration_captures_custom_field_values() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    // Define a field, register with a value for it, read it back
    let field: Value = client
        .post(format!("{}/custom-fields", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "name": "badge_color",
            "label": "Badge color",
            "field_type": "text"
        }))
        .send()
        .await
        .expect("Failed to create custom field")
        .json()
        .await
        .expect("Failed to parse custom field");

    let location: Value = client
        .get(format!("{}/locations/by-slug/main-office", BASE_URL))
        .send()
        .await
        .expect("Failed to fetch location")
        .json()
        .await
        .expect("Failed to parse location");

    let response = client
        .post(format!("{}/visitors", BASE_URL))
        .json(&json!({
            "location_id": location["id"],
            "full_name": "Badge Wearer",
            "phone_number": "5550199",
            "purpose_of_visit": "Delivery",
            "whom_to_meet": "Nobody In Particular",
            "scheduled_time": "2026-09-01T10:00:00Z",
            "custom_fields": { "badge_color": "green" }
        }))
        .send()
        .await
        .expect("Failed to register visitor");
    assert_eq!(response.status(), 201);

    let visitor: Value = response.json().await.expect("Failed to parse visitor");

    let details: Value = client
        .get(format!("{}/visitors/{}", BASE_URL, visitor["id"]))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to fetch visitor")
        .json()
        .await
        .expect("Failed to parse details");

    assert_eq!(details["custom_fields"]["badge_color"], "green");

    // Cleanup
    let _ = client
        .delete(format!("{}/visitors/{}", BASE_URL, visitor["id"]))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await;
    let _ = client
        .delete(format!("{}/custom-fields/{}", BASE_URL, field["id"]))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await;
}

#[tokio::test]
#[ignore]
async fn test_role_update_replaces_permission_sets() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let role: Value = client
        .post(format!("{}/roles", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "name": "integration-auditor",
            "permissions": ["visitors.read"],
            "routes": ["/dashboard"]
        }))
        .send()
        .await
        .expect("Failed to create role")
        .json()
        .await
        .expect("Failed to parse role");

    let response = client
        .put(format!("{}/roles/{}", BASE_URL, role["id"]))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "description": "Read-only audit access",
            "permissions": ["visitors.read", "visitors.stats"]
        }))
        .send()
        .await
        .expect("Failed to update role");
    assert!(response.status().is_success());

    // The response must reflect the replaced permission set and the
    // untouched route set
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["description"], "Read-only audit access");
    assert_eq!(
        body["permissions"],
        json!(["visitors.read", "visitors.stats"])
    );
    assert_eq!(body["routes"], json!(["/dashboard"]));

    let response = client
        .delete(format!("{}/roles/{}", BASE_URL, role["id"]))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);
}

#[tokio::test]
#[ignore]
async fn test_create_and_delete_location() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .post(format!("{}/locations", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "name": "Integration Test Annex"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    let location_id = body["id"].as_i64().expect("No location ID");
    assert!(body["registration_slug"]
        .as_str()
        .expect("No slug")
        .starts_with("integration-test-annex"));

    let response = client
        .delete(format!("{}/locations/{}", BASE_URL, location_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);
}
