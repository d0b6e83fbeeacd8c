mod common;

use axum::http::StatusCode;
use common::{
    create_test_contact, create_test_detail, create_test_user, generate_unique_email, is_active,
    json_request, send, setup_test_app,
};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

fn details_uri(user_id: Uuid, contact_id: Uuid) -> String {
    format!("/api/v1/users/{}/contacts/{}/details", user_id, contact_id)
}

#[sqlx::test(migrations = "./migrations")]
async fn test_add_detail(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let user = create_test_user(&mut tx, &generate_unique_email(), false).await;
    let contact = create_test_contact(&mut tx, user.id, "Alan", "Turing").await;
    tx.commit().await.unwrap();

    let (status, body) = send(
        setup_test_app(pool.clone()),
        json_request(
            "POST",
            &details_uri(user.id, contact),
            Some(&user.token),
            Some(json!({ "type": " EMAIL ", "value": " alan@bletchley.test " })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["type"], "email");
    assert_eq!(body["value"], "alan@bletchley.test");
    assert_eq!(body["contact_id"], contact.to_string());
    assert_eq!(body["user_id"], user.id.to_string());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_add_detail_validation(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let user = create_test_user(&mut tx, &generate_unique_email(), false).await;
    let contact = create_test_contact(&mut tx, user.id, "Alan", "Turing").await;
    tx.commit().await.unwrap();

    let (status, body) = send(
        setup_test_app(pool.clone()),
        json_request(
            "POST",
            &details_uri(user.id, contact),
            Some(&user.token),
            Some(json!({ "type": "pager", "value": "1234" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["context"], "type");

    let (status, body) = send(
        setup_test_app(pool.clone()),
        json_request(
            "POST",
            &details_uri(user.id, contact),
            Some(&user.token),
            Some(json!({ "type": "phone", "value": "   " })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["context"], "value");

    let (status, body) = send(
        setup_test_app(pool.clone()),
        json_request(
            "POST",
            &details_uri(user.id, contact),
            Some(&user.token),
            Some(json!({ "value": "1234" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["context"], "type");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_add_detail_to_foreign_contact(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let owner = create_test_user(&mut tx, &generate_unique_email(), false).await;
    let other = create_test_user(&mut tx, &generate_unique_email(), false).await;
    let contact = create_test_contact(&mut tx, owner.id, "Alan", "Turing").await;
    tx.commit().await.unwrap();

    // Another user's path: blocked by the gate.
    let (status, _) = send(
        setup_test_app(pool.clone()),
        json_request(
            "POST",
            &details_uri(owner.id, contact),
            Some(&other.token),
            Some(json!({ "type": "email", "value": "x@y.test" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Own path, foreign contact: not found.
    let (status, body) = send(
        setup_test_app(pool.clone()),
        json_request(
            "POST",
            &details_uri(other.id, contact),
            Some(&other.token),
            Some(json!({ "type": "email", "value": "x@y.test" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Contact not found");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_details_with_filters(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let user = create_test_user(&mut tx, &generate_unique_email(), false).await;
    let contact = create_test_contact(&mut tx, user.id, "Alan", "Turing").await;
    let other_contact = create_test_contact(&mut tx, user.id, "Grace", "Hopper").await;
    create_test_detail(&mut tx, contact, user.id, "email", "alan@bletchley.test").await;
    create_test_detail(&mut tx, contact, user.id, "email", "turing@home.test").await;
    create_test_detail(&mut tx, contact, user.id, "phone", "+44 1234").await;
    create_test_detail(&mut tx, other_contact, user.id, "email", "grace@navy.test").await;
    tx.commit().await.unwrap();

    let uri = details_uri(user.id, contact);

    let (status, body) = send(
        setup_test_app(pool.clone()),
        json_request("GET", &uri, Some(&user.token), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 3);

    let (_, body) = send(
        setup_test_app(pool.clone()),
        json_request("GET", &format!("{}?type=email", uri), Some(&user.token), None),
    )
    .await;
    assert_eq!(body["total"], 2);

    let (_, body) = send(
        setup_test_app(pool.clone()),
        json_request("GET", &format!("{}?value=BLETCHLEY", uri), Some(&user.token), None),
    )
    .await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["data"][0]["value"], "alan@bletchley.test");

    let (status, body) = send(
        setup_test_app(pool.clone()),
        json_request("GET", &format!("{}?type=fax", uri), Some(&user.token), None),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["context"], "type");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_update_delete_detail(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let user = create_test_user(&mut tx, &generate_unique_email(), false).await;
    let contact = create_test_contact(&mut tx, user.id, "Alan", "Turing").await;
    let detail = create_test_detail(&mut tx, contact, user.id, "phone", "+44 1234").await;
    tx.commit().await.unwrap();

    let uri = format!("{}/{}", details_uri(user.id, contact), detail);

    let (status, body) = send(
        setup_test_app(pool.clone()),
        json_request("GET", &uri, Some(&user.token), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["type"], "phone");

    let (status, body) = send(
        setup_test_app(pool.clone()),
        json_request(
            "PUT",
            &uri,
            Some(&user.token),
            Some(json!({ "type": "email", "value": "alan@bletchley.test" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["type"], "email");
    assert_eq!(body["value"], "alan@bletchley.test");

    let (status, body) = send(
        setup_test_app(pool.clone()),
        json_request("DELETE", &uri, Some(&user.token), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Contact detail deleted successfully");
    assert!(!is_active(&pool, "contact_details", detail).await);

    let (status, body) = send(
        setup_test_app(pool.clone()),
        json_request("GET", &uri, Some(&user.token), None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Contact detail not found");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_detail_under_wrong_contact_is_not_found(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let user = create_test_user(&mut tx, &generate_unique_email(), false).await;
    let alan = create_test_contact(&mut tx, user.id, "Alan", "Turing").await;
    let grace = create_test_contact(&mut tx, user.id, "Grace", "Hopper").await;
    let detail = create_test_detail(&mut tx, alan, user.id, "phone", "+44 1234").await;
    tx.commit().await.unwrap();

    let uri = format!("{}/{}", details_uri(user.id, grace), detail);

    let (status, _) = send(
        setup_test_app(pool.clone()),
        json_request("PUT", &uri, Some(&user.token), Some(json!({ "value": "0000" }))),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        setup_test_app(pool.clone()),
        json_request("DELETE", &uri, Some(&user.token), None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(is_active(&pool, "contact_details", detail).await);
}
