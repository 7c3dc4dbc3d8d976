mod common;

use anyhow::Result;
use axum::http::{Method, StatusCode};
use serde_json::json;

#[tokio::test]
async fn create_get_delete_lifecycle() -> Result<()> {
    let app = common::test_app().await?;
    let token = common::bearer_token(&app).await?;

    // Create
    let response = common::send(
        &app,
        Method::POST,
        "/user",
        Some(&token),
        Some(json!({"name": "Alice"})),
    )
    .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let created = common::body_json(response).await?;
    let id = created["id"].as_i64().expect("generated id");
    assert!(id > 0);
    assert_eq!(created["name"], "Alice");
    assert!(created["createdAt"].is_string());
    assert!(created["updatedAt"].is_string());

    // Read back
    let response = common::send(
        &app,
        Method::GET,
        &format!("/user/{id}"),
        Some(&token),
        None,
    )
    .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let fetched = common::body_json(response).await?;
    assert_eq!(fetched, created);

    // Delete
    let response = common::send(
        &app,
        Method::DELETE,
        &format!("/user/{id}"),
        Some(&token),
        None,
    )
    .await?;
    assert_eq!(response.status(), StatusCode::OK);

    // Gone
    let response = common::send(
        &app,
        Method::GET,
        &format!("/user/{id}"),
        Some(&token),
        None,
    )
    .await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn create_with_empty_name_is_rejected() -> Result<()> {
    let app = common::test_app().await?;
    let token = common::bearer_token(&app).await?;

    let response = common::send(&app, Method::POST, "/user", Some(&token), Some(json!({})))
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let problem = common::body_json(response).await?;
    assert_eq!(problem["title"], "Bad Request");

    // Storage untouched
    let response = common::send(&app, Method::GET, "/users", Some(&token), None).await?;
    let users = common::body_json(response).await?;
    assert_eq!(users.as_array().map(Vec::len), Some(0));
    Ok(())
}

#[tokio::test]
async fn list_returns_created_users() -> Result<()> {
    let app = common::test_app().await?;
    let token = common::bearer_token(&app).await?;

    for name in ["Alice", "Bob"] {
        let response = common::send(
            &app,
            Method::POST,
            "/user",
            Some(&token),
            Some(json!({"name": name})),
        )
        .await?;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = common::send(&app, Method::GET, "/users", Some(&token), None).await?;
    assert_eq!(response.status(), StatusCode::OK);
    let users = common::body_json(response).await?;
    let names: Vec<_> = users
        .as_array()
        .expect("list body")
        .iter()
        .map(|u| u["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names.len(), 2);
    assert!(names.contains(&"Alice".to_string()));
    assert!(names.contains(&"Bob".to_string()));
    Ok(())
}

#[tokio::test]
async fn update_changes_fields() -> Result<()> {
    let app = common::test_app().await?;
    let token = common::bearer_token(&app).await?;

    let response = common::send(
        &app,
        Method::POST,
        "/user",
        Some(&token),
        Some(json!({"name": "Alice"})),
    )
    .await?;
    let created = common::body_json(response).await?;
    let id = created["id"].as_i64().unwrap();

    let response = common::send(
        &app,
        Method::PUT,
        &format!("/user/{id}"),
        Some(&token),
        Some(json!({"id": id, "name": "Alice", "phone": "555-0100"})),
    )
    .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = common::body_json(response).await?;
    assert_eq!(updated["phone"], "555-0100");
    assert_eq!(updated["createdAt"], created["createdAt"]);

    let response = common::send(
        &app,
        Method::GET,
        &format!("/user/{id}"),
        Some(&token),
        None,
    )
    .await?;
    let fetched = common::body_json(response).await?;
    assert_eq!(fetched["phone"], "555-0100");
    Ok(())
}

#[tokio::test]
async fn update_with_mismatched_id_never_touches_storage() -> Result<()> {
    let app = common::test_app().await?;
    let token = common::bearer_token(&app).await?;

    let response = common::send(
        &app,
        Method::POST,
        "/user",
        Some(&token),
        Some(json!({"name": "Alice"})),
    )
    .await?;
    let created = common::body_json(response).await?;
    let id = created["id"].as_i64().unwrap();

    let response = common::send(
        &app,
        Method::PUT,
        &format!("/user/{id}"),
        Some(&token),
        Some(json!({"id": id + 1, "name": "Eve"})),
    )
    .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = common::send(
        &app,
        Method::GET,
        &format!("/user/{id}"),
        Some(&token),
        None,
    )
    .await?;
    let fetched = common::body_json(response).await?;
    assert_eq!(fetched["name"], "Alice");
    Ok(())
}

#[tokio::test]
async fn update_of_unknown_id_is_404() -> Result<()> {
    let app = common::test_app().await?;
    let token = common::bearer_token(&app).await?;

    let response = common::send(
        &app,
        Method::PUT,
        "/user/977",
        Some(&token),
        Some(json!({"id": 977, "name": "Ghost"})),
    )
    .await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn non_numeric_id_is_bad_request() -> Result<()> {
    let app = common::test_app().await?;
    let token = common::bearer_token(&app).await?;

    let response =
        common::send(&app, Method::GET, "/user/abc", Some(&token), None).await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn delete_of_unknown_id_succeeds() -> Result<()> {
    let app = common::test_app().await?;
    let token = common::bearer_token(&app).await?;

    let response =
        common::send(&app, Method::DELETE, "/user/4242", Some(&token), None).await?;
    assert_eq!(response.status(), StatusCode::OK);
    Ok(())
}
