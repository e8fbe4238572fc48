use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::{response_text, spawn_app};

#[tokio::test]
async fn update_merges_the_patch_and_renames_the_document() {
    let app = spawn_app().await;
    app.create_document(&json!({
        "title": "old",
        "signee": "old",
        "content": { "header": "old", "data": "old" },
    }))
    .await;

    let response = app
        .update_document("old", &json!({ "title": "new", "signee": "new" }))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(!app.document_exists("old"));
    assert_eq!(
        app.stored_json("new").await,
        json!({
            "title": "new",
            "signee": "new",
            "content": { "header": "old", "data": "old" },
        })
    );
}

#[tokio::test]
async fn update_with_an_empty_patch_changes_nothing() {
    let app = spawn_app().await;
    let payload = json!({
        "title": "letter",
        "signee": "ada",
        "content": { "header": "greetings", "data": "hello" },
    });
    app.create_document(&payload).await;

    let response = app.update_document("letter", &json!({})).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(app.stored_json("letter").await, payload);
}

#[tokio::test]
async fn update_with_a_null_content_object_changes_nothing() {
    let app = spawn_app().await;
    let payload = json!({
        "title": "letter",
        "signee": "ada",
        "content": { "header": "greetings", "data": "hello" },
    });
    app.create_document(&payload).await;

    let response = app
        .update_document("letter", &json!({ "content": null }))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(app.stored_json("letter").await, payload);
}

#[tokio::test]
async fn update_patches_content_fields_independently() {
    let app = spawn_app().await;
    app.create_document(&json!({
        "title": "letter",
        "content": { "header": "old", "data": "old" },
    }))
    .await;

    let response = app
        .update_document("letter", &json!({ "content": { "data": "new" } }))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        app.stored_json("letter").await,
        json!({
            "title": "letter",
            "signee": null,
            "content": { "header": "old", "data": "new" },
        })
    );
}

#[tokio::test]
async fn update_of_an_unknown_title_is_rejected() {
    let app = spawn_app().await;

    let response = app.update_document("ghost", &json!({ "signee": "ada" })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response_text(response).await,
        "no document with title \"ghost\" could be found"
    );
}

#[tokio::test]
async fn update_without_a_title_parameter_is_rejected() {
    let app = spawn_app().await;

    let response = app.post("/update", json!({}).to_string()).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response_text(response).await, "no title was provided");
}

#[tokio::test]
async fn update_of_a_malformed_document_is_rejected() {
    let app = spawn_app().await;
    app.seed_raw_document("broken", b"definitely not json")
        .await;

    let response = app.update_document("broken", &json!({ "signee": "ada" })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response_text(response).await,
        "existing document is incorrectly formatted, unable to read"
    );
    // the malformed file is still there untouched; nothing was removed
    assert_eq!(app.stored_bytes("broken").await, b"definitely not json");
}

#[tokio::test]
async fn update_with_a_malformed_body_is_rejected() {
    let app = spawn_app().await;
    let payload = json!({ "title": "letter", "signee": "ada" });
    app.create_document(&payload).await;

    let response = app
        .post("/update?title=letter", "{\"signee\": oops".to_string())
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(!response_text(response).await.is_empty());
    assert_eq!(app.stored_json("letter").await["signee"], "ada");
}
