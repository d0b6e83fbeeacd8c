mod common;

use axum::http::StatusCode;
use common::{
    create_test_contact, create_test_detail, create_test_user, generate_unique_email, is_active,
    json_request, send, setup_test_app,
};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

#[sqlx::test(migrations = "./migrations")]
async fn test_admin_creates_user(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let admin = create_test_user(&mut tx, &generate_unique_email(), true).await;
    tx.commit().await.unwrap();

    let email = generate_unique_email();
    let (status, body) = send(
        setup_test_app(pool.clone()),
        json_request(
            "POST",
            "/api/v1/user",
            Some(&admin.token),
            Some(json!({
                "first_name": "Grace",
                "last_name": "Hopper",
                "email": email,
                "password": "password123",
                "is_admin": true
            })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["email"], email);
    assert_eq!(body["is_admin"], true);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_regular_user_cannot_manage_users(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let user = create_test_user(&mut tx, &generate_unique_email(), false).await;
    tx.commit().await.unwrap();

    let (status, body) = send(
        setup_test_app(pool.clone()),
        json_request("GET", "/api/v1/users", Some(&user.token), None),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["context"], "forbidden");

    let (status, _) = send(
        setup_test_app(pool.clone()),
        json_request(
            "GET",
            &format!("/api/v1/user/{}", user.id),
            Some(&user.token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_users_paginates_and_filters(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let admin = create_test_user(&mut tx, &generate_unique_email(), true).await;
    for _ in 0..6 {
        create_test_user(&mut tx, &generate_unique_email(), false).await;
    }
    sqlx::query("UPDATE users SET last_name = 'Zephyr' WHERE id = $1")
        .bind(admin.id)
        .execute(&mut *tx)
        .await
        .unwrap();
    tx.commit().await.unwrap();

    let (status, body) = send(
        setup_test_app(pool.clone()),
        json_request("GET", "/api/v1/users?page=2&limit=5", Some(&admin.token), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 7);
    assert_eq!(body["page"], 2);
    assert_eq!(body["limit"], 5);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let (status, body) = send(
        setup_test_app(pool.clone()),
        json_request("GET", "/api/v1/users?last_name=zeph", Some(&admin.token), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["data"][0]["id"], admin.id.to_string());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_user_not_found(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let admin = create_test_user(&mut tx, &generate_unique_email(), true).await;
    tx.commit().await.unwrap();

    let (status, body) = send(
        setup_test_app(pool.clone()),
        json_request(
            "GET",
            &format!("/api/v1/user/{}", Uuid::new_v4()),
            Some(&admin.token),
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "User not found");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_user_invalid_id(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let admin = create_test_user(&mut tx, &generate_unique_email(), true).await;
    tx.commit().await.unwrap();

    let (status, body) = send(
        setup_test_app(pool.clone()),
        json_request("GET", "/api/v1/user/not-a-uuid", Some(&admin.token), None),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["context"], "path");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_user(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let admin = create_test_user(&mut tx, &generate_unique_email(), true).await;
    let user = create_test_user(&mut tx, &generate_unique_email(), false).await;
    tx.commit().await.unwrap();

    let (status, body) = send(
        setup_test_app(pool.clone()),
        json_request(
            "PUT",
            &format!("/api/v1/user/{}", user.id),
            Some(&admin.token),
            Some(json!({ "first_name": "  Renamed  " })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["first_name"], "Renamed");
    assert_eq!(body["last_name"], "User");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_user_with_empty_body(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let admin = create_test_user(&mut tx, &generate_unique_email(), true).await;
    let user = create_test_user(&mut tx, &generate_unique_email(), false).await;
    tx.commit().await.unwrap();

    let (status, body) = send(
        setup_test_app(pool.clone()),
        json_request(
            "PUT",
            &format!("/api/v1/user/{}", user.id),
            Some(&admin.token),
            Some(json!({})),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["context"], "body");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_user_cannot_deactivate(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let admin = create_test_user(&mut tx, &generate_unique_email(), true).await;
    let user = create_test_user(&mut tx, &generate_unique_email(), false).await;
    let contact = create_test_contact(&mut tx, user.id, "Alan", "Turing").await;
    tx.commit().await.unwrap();

    let (status, body) = send(
        setup_test_app(pool.clone()),
        json_request(
            "PUT",
            &format!("/api/v1/user/{}", user.id),
            Some(&admin.token),
            Some(json!({ "is_active": false })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["context"], "body");

    let (status, body) = send(
        setup_test_app(pool.clone()),
        json_request(
            "PUT",
            &format!("/api/v1/user/{}", user.id),
            Some(&admin.token),
            Some(json!({ "first_name": "Still", "is_active": false })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["first_name"], "Still");
    assert_eq!(body["is_active"], true);
    assert!(is_active(&pool, "users", user.id).await);
    assert!(is_active(&pool, "contacts", contact).await);

    let (status, body) = send(
        setup_test_app(pool.clone()),
        json_request(
            "GET",
            &format!("/api/v1/users/{}/contacts", user.id),
            Some(&user.token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_user_email_taken(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let admin = create_test_user(&mut tx, &generate_unique_email(), true).await;
    let user = create_test_user(&mut tx, &generate_unique_email(), false).await;
    tx.commit().await.unwrap();

    let (status, body) = send(
        setup_test_app(pool.clone()),
        json_request(
            "PUT",
            &format!("/api/v1/user/{}", user.id),
            Some(&admin.token),
            Some(json!({ "email": admin.email })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["context"], "email");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_admin_cannot_delete_self(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let admin = create_test_user(&mut tx, &generate_unique_email(), true).await;
    tx.commit().await.unwrap();

    let (status, body) = send(
        setup_test_app(pool.clone()),
        json_request(
            "DELETE",
            &format!("/api/v1/user/{}", admin.id),
            Some(&admin.token),
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "Admin cannot delete their own account");
    assert!(is_active(&pool, "users", admin.id).await);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_user_cascades(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let admin = create_test_user(&mut tx, &generate_unique_email(), true).await;
    let user = create_test_user(&mut tx, &generate_unique_email(), false).await;
    let contact = create_test_contact(&mut tx, user.id, "Alan", "Turing").await;
    let detail = create_test_detail(&mut tx, contact, user.id, "phone", "+44 1234").await;
    tx.commit().await.unwrap();

    let (status, body) = send(
        setup_test_app(pool.clone()),
        json_request(
            "DELETE",
            &format!("/api/v1/user/{}", user.id),
            Some(&admin.token),
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User deleted successfully");
    assert!(!is_active(&pool, "users", user.id).await);
    assert!(!is_active(&pool, "contacts", contact).await);
    assert!(!is_active(&pool, "contact_details", detail).await);

    let (status, _) = send(
        setup_test_app(pool.clone()),
        json_request(
            "GET",
            &format!("/api/v1/user/{}", user.id),
            Some(&admin.token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_deleted_email_can_sign_up_again(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let admin = create_test_user(&mut tx, &generate_unique_email(), true).await;
    let email = generate_unique_email();
    let user = create_test_user(&mut tx, &email, false).await;
    tx.commit().await.unwrap();

    let (status, _) = send(
        setup_test_app(pool.clone()),
        json_request(
            "DELETE",
            &format!("/api/v1/user/{}", user.id),
            Some(&admin.token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        setup_test_app(pool.clone()),
        json_request(
            "POST",
            "/api/v1/signup",
            None,
            Some(json!({
                "first_name": "Back",
                "last_name": "Again",
                "email": email,
                "password": "password123"
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}
