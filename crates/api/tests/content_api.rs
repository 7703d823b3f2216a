//! HTTP-level integration tests for content CRUD.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router
//! without an actual TCP listener.

mod common;

use axum::http::StatusCode;
use common::{
    admin_token, author_token, body_json, delete, editor_token, get, other_author_token,
    post_json, put_json, AUTHOR_ID,
};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_content_returns_201_with_version_1(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/content",
        &author_token(),
        json!({"title": "Launch post", "body": "Hello"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let data = &json["data"];
    assert!(data["id"].is_number());
    assert_eq!(data["title"], "Launch post");
    assert_eq!(data["status"], "draft");
    assert_eq!(data["author_id"], AUTHOR_ID);
    assert_eq!(data["current_version"]["version_number"], 1);
    assert_eq!(data["current_version"]["change_description"], "Initial version");
    assert_eq!(data["current_version"]["created_by"], AUTHOR_ID);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_content_rejects_blank_title(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/content",
        &author_token(),
        json!({"title": "  ", "body": "x"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_content_rejects_unknown_status(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/content",
        &author_token(),
        json!({"title": "T", "status": "shredded"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Read
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_content_includes_current_version(pool: PgPool) {
    let id = common::create_content(&pool, "Original", "one").await;
    common::edit_content(&pool, id, json!({"body": "two"})).await;

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/content/{id}"), &other_author_token()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["body"], "two");
    assert_eq!(json["data"]["current_version"]["version_number"], 2);
    assert_eq!(json["data"]["current_version"]["body"], "two");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_nonexistent_content_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/content/999999", &author_token()).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_content_respects_limit(pool: PgPool) {
    common::create_content(&pool, "A", "").await;
    common::create_content(&pool, "B", "").await;
    common::create_content(&pool, "C", "").await;

    let app = common::build_test_app(pool.clone());
    let response = get(app, "/api/v1/content", &author_token()).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 3);

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/content?limit=2&offset=0", &author_token()).await;
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 2);
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_body_appends_version(pool: PgPool) {
    let id = common::create_content(&pool, "Post", "draft text").await;

    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        &format!("/api/v1/content/{id}"),
        &author_token(),
        json!({"body": "final text", "change_description": "Polish"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["body"], "final text");
    assert_eq!(json["data"]["current_version"]["version_number"], 2);
    assert_eq!(json["data"]["current_version"]["change_description"], "Polish");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_status_only_update_keeps_version(pool: PgPool) {
    let id = common::create_content(&pool, "Post", "text").await;

    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        &format!("/api/v1/content/{id}"),
        &author_token(),
        json!({"status": "published"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "published");
    assert_eq!(json["data"]["current_version"]["version_number"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_by_non_owner_is_forbidden(pool: PgPool) {
    let id = common::create_content(&pool, "Mine", "text").await;

    let app = common::build_test_app(pool.clone());
    let response = put_json(
        app,
        &format!("/api/v1/content/{id}"),
        &other_author_token(),
        json!({"body": "hijacked"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["code"], "FORBIDDEN");

    // Nothing changed.
    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/content/{id}"), &author_token()).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["body"], "text");
    assert_eq!(json["data"]["current_version"]["version_number"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_editor_may_update_any_content(pool: PgPool) {
    let id = common::create_content(&pool, "Mine", "text").await;

    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        &format!("/api/v1/content/{id}"),
        &editor_token(),
        json!({"title": "Edited"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["title"], "Edited");
    assert_eq!(json["data"]["current_version"]["created_by"], common::EDITOR_ID);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_nonexistent_content_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        "/api/v1/content/999999",
        &admin_token(),
        json!({"body": "x"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_content_returns_204_and_removes_history(pool: PgPool) {
    let id = common::create_content(&pool, "Delete me", "x").await;
    common::edit_content(&pool, id, json!({"body": "y"})).await;

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/v1/content/{id}"), &author_token()).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool.clone());
    let response = get(app, &format!("/api/v1/content/{id}"), &author_token()).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let remaining: (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM content_versions WHERE content_id = $1")
            .bind(id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(remaining.0, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_by_non_owner_is_forbidden(pool: PgPool) {
    let id = common::create_content(&pool, "Keep me", "x").await;

    let app = common::build_test_app(pool);
    let response = delete(app, &format!("/api/v1/content/{id}"), &other_author_token()).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
