//! HTTP-level integration tests for category management.
//!
//! Listing is public; mutation is admin-only; deletion is a soft
//! deactivate that can be reversed through the update endpoint.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, delete_auth, get, post_json, post_json_auth, put_json_auth, session_token,
    staff_token,
};
use quickdesk_db::repositories::CategoryRepo;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn admin_token() -> String {
    staff_token(1, "admin@test.com", "Admin One", "admin")
}

/// Create a category through the API as an admin and return its JSON.
async fn create_category(pool: &PgPool, body: serde_json::Value) -> serde_json::Value {
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, "/api/v1/categories", body, &admin_token()).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

/// Fetch the public category list and return the names in order.
async fn list_names(pool: &PgPool) -> Vec<String> {
    let app = common::build_test_app(pool.clone());
    let response = get(app, "/api/v1/categories").await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap().to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

/// The public list returns active categories in name order.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_is_public_and_name_ordered(pool: PgPool) {
    let inserted = CategoryRepo::seed_defaults(&pool)
        .await
        .expect("seeding should succeed");
    assert_eq!(inserted, 5);

    let names = list_names(&pool).await;
    assert_eq!(
        names,
        [
            "Billing",
            "Bug Report",
            "Feature Request",
            "General Inquiry",
            "Technical Support",
        ]
    );
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

/// Creation is admin-only: anonymous 401, end user and agent 403.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_requires_admin(pool: PgPool) {
    let body = serde_json::json!({ "name": "Networking" });

    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/api/v1/categories", body.clone()).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let user = session_token("user-1");
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, "/api/v1/categories", body.clone(), &user).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let agent = staff_token(2, "agent@test.com", "Agent Two", "agent");
    let app = common::build_test_app(pool);
    let response = post_json_auth(app, "/api/v1/categories", body, &agent).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Admin role required");
}

/// A created category defaults its color and rejects duplicate names
/// with a 409.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_category_defaults_and_duplicates(pool: PgPool) {
    let category = create_category(&pool, serde_json::json!({ "name": "Networking" })).await;
    assert_eq!(category["name"], "Networking");
    assert_eq!(category["color"], "#3B82F6");
    assert_eq!(category["isActive"], true);

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "name": "Networking" });
    let response = post_json_auth(app, "/api/v1/categories", body, &admin_token()).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Category with this name already exists");
}

/// Name and color are validated before anything touches the database.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_category_validation(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/categories",
        serde_json::json!({}),
        &admin_token(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Category name is required");

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "name": "Networking", "color": "blue" });
    let response = post_json_auth(app, "/api/v1/categories", body, &admin_token()).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

/// Partial updates change only the provided fields; unknown ids 404.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_category(pool: PgPool) {
    let category = create_category(
        &pool,
        serde_json::json!({ "name": "Networking", "color": "#10B981" }),
    )
    .await;
    let id = category["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "name": "Network & VPN" });
    let response = put_json_auth(app, &format!("/api/v1/categories/{id}"), body, &admin_token()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Network & VPN");
    assert_eq!(json["data"]["color"], "#10B981");

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "name": "Ghost" });
    let response = put_json_auth(app, "/api/v1/categories/999999", body, &admin_token()).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

/// Deletion deactivates: the category leaves the public list but can be
/// brought back with `isActive: true`.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_is_soft_and_reversible(pool: PgPool) {
    let category = create_category(&pool, serde_json::json!({ "name": "Networking" })).await;
    let id = category["id"].as_i64().unwrap();
    let uri = format!("/api/v1/categories/{id}");

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &uri, &admin_token()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Category deactivated successfully");

    assert!(list_names(&pool).await.is_empty());

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "isActive": true });
    let response = put_json_auth(app, &uri, body, &admin_token()).await;
    assert_eq!(response.status(), StatusCode::OK);

    assert_eq!(list_names(&pool).await, ["Networking"]);

    let app = common::build_test_app(pool);
    let response = delete_auth(app, "/api/v1/categories/999999", &admin_token()).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
