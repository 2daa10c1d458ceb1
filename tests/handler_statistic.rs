mod common;

use serde_json::{Value, json};

#[tokio::test]
async fn test_statistic_fresh_code() {
    let server = common::create_test_server(common::create_test_state());

    let encoded = server
        .post("/api/encode")
        .json(&json!({ "originalUrl": "https://example.com" }))
        .await
        .json::<Value>();
    let code = encoded["shortUrl"].as_str().unwrap();

    let response = server.get(&format!("/api/statistic/{}", code)).await;

    response.assert_status_ok();

    let json = response.json::<Value>();
    assert_eq!(json["shortUrl"], code);
    assert_eq!(json["visits"], 0);
    assert_eq!(json["createdAt"], encoded["createdAt"]);
}

#[tokio::test]
async fn test_statistic_does_not_count_as_visit() {
    let server = common::create_test_server(common::create_test_state());
    let code = common::encode(&server, "https://example.com").await;

    for _ in 0..2 {
        server
            .get(&format!("/api/statistic/{}", code))
            .await
            .assert_status_ok();
    }

    let json = server
        .get(&format!("/api/statistic/{}", code))
        .await
        .json::<Value>();
    assert_eq!(json["visits"], 0);
}

#[tokio::test]
async fn test_statistic_unknown_code() {
    let server = common::create_test_server(common::create_test_state());

    let response = server.get("/api/statistic/Unknown1").await;

    response.assert_status_not_found();
    assert_eq!(response.json::<Value>()["message"], "Short URL not found");
}

#[tokio::test]
async fn test_statistic_accepts_full_short_link() {
    let server = common::create_test_server(common::create_test_state());
    let code = common::encode(&server, "https://example.com").await;

    server
        .post("/api/decode")
        .json(&json!({ "shortUrl": code }))
        .await
        .assert_status_ok();

    // http://localhost:5000/{code}, percent-encoded into one path segment
    let response = server
        .get(&format!("/api/statistic/http%3A%2F%2Flocalhost%3A5000%2F{}", code))
        .await;

    response.assert_status_ok();

    let json = response.json::<Value>();
    assert_eq!(json["shortUrl"], code.as_str());
    assert_eq!(json["visits"], 1);
}
