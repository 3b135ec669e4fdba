//! Leadform API Integration Tests
//!
//! End-to-end tests against a running service and database. Start the
//! service locally (with a scratch PostgreSQL) before removing the ignores.

use serde_json::json;

/// Test configuration
pub struct TestConfig {
    pub api_url: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:3001".to_string(),
        }
    }
}

#[tokio::test]
#[ignore] // Requires running service
async fn test_health_endpoint() {
    let config = TestConfig::default();
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/health", config.api_url))
        .send()
        .await
        .unwrap();

    assert!(response.status().is_success());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["service"], "leadform-api");
}

/// Test: full submission lifecycle from intake to deletion
#[tokio::test]
#[ignore] // Requires running service and database
async fn test_submission_lifecycle() {
    let config = TestConfig::default();
    let client = reqwest::Client::new();

    // Step 1: submit the form
    let response = client
        .post(format!("{}/api/send-email", config.api_url))
        .json(&json!({
            "name": "통합테스트",
            "affiliation": "QA",
            "position": "팀장",
            "phone": "010-0000-0000",
            "email": "qa@example.com",
            "items_summary": "A업체 - [보장분석] 일반 (서울/인천/경기) (수량: 1, 금액: 80,000원)",
            "total": "80,000",
            "items": [{
                "db_type": "A",
                "product_name": "A업체 - 보장분석 (서울/인천/경기)",
                "region": "서울/인천/경기",
                "quantity": 1,
                "unit_price": 80000,
                "total_price": 80000
            }]
        }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let body: serde_json::Value = response.json().await.unwrap();
    let id = body["submission_id"].as_str().unwrap().to_string();

    // Step 2: it shows up in the admin list
    let response = client
        .get(format!("{}/api/submissions?search=통합테스트", config.api_url))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["total"].as_u64().unwrap() >= 1);

    // Step 3: confirm it
    let response = client
        .patch(format!("{}/api/submissions/{}/status", config.api_url, id))
        .json(&json!({"status": "confirmed"}))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    // Step 4: it appears in the aggregation for the current month
    let response = client
        .get(format!("{}/api/submissions/aggregation", config.api_url))
        .send()
        .await
        .unwrap();
    let report: serde_json::Value = response.json().await.unwrap();
    assert!(report["summary"]["totalQuantity"].as_i64().unwrap() >= 1);

    // Step 5: delete it again
    let response = client
        .delete(format!("{}/api/submissions/{}", config.api_url, id))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
}

/// Test: invalid status values are rejected with a client error
#[tokio::test]
#[ignore] // Requires running service
async fn test_invalid_status_is_rejected() {
    let config = TestConfig::default();
    let client = reqwest::Client::new();

    let response = client
        .patch(format!(
            "{}/api/submissions/00000000-0000-0000-0000-000000000000/status",
            config.api_url
        ))
        .json(&json!({"status": "cancelled"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

/// Test: bulk delete without ids is a client error
#[tokio::test]
#[ignore] // Requires running service
async fn test_bulk_delete_requires_ids() {
    let config = TestConfig::default();
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/submissions/bulk-delete", config.api_url))
        .json(&json!({"ids": []}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
}

/// Test: garbage aggregation bounds are a client error
#[tokio::test]
#[ignore] // Requires running service
async fn test_aggregation_rejects_bad_bounds() {
    let config = TestConfig::default();
    let client = reqwest::Client::new();

    let response = client
        .get(format!(
            "{}/api/submissions/aggregation?start=last-tuesday",
            config.api_url
        ))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
}
