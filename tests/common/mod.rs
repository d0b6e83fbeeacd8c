use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use rolodex::router::init_router;
use rolodex::state::AppState;
use rolodex_auth::create_access_token;
use rolodex_config::{CorsConfig, JwtConfig};
use rolodex_core::hash_password;
use sqlx::{PgPool, Postgres, Transaction};
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_PASSWORD: &str = "testpass123";

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "integration-test-secret".to_string(),
        access_token_expiry: 3600,
        issuer: "contact-app".to_string(),
    }
}

pub fn setup_test_app(pool: PgPool) -> Router {
    let state = AppState::new(
        pool,
        test_jwt_config(),
        CorsConfig::parse("http://localhost:3000"),
    );
    init_router(state, None)
}

#[allow(dead_code)]
pub struct TestUser {
    pub id: Uuid,
    pub email: String,
    pub password: String,
    pub token: String,
}

/// Inserts an active user and signs a token for it.
pub async fn create_test_user(
    tx: &mut Transaction<'_, Postgres>,
    email: &str,
    is_admin: bool,
) -> TestUser {
    let hashed = hash_password(TEST_PASSWORD).unwrap();

    let id: Uuid = sqlx::query_scalar(
        r#"
        INSERT INTO users (first_name, last_name, email, password, is_admin)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id
        "#,
    )
    .bind("Test")
    .bind("User")
    .bind(email)
    .bind(&hashed)
    .bind(is_admin)
    .fetch_one(&mut **tx)
    .await
    .unwrap();

    TestUser {
        id,
        email: email.to_string(),
        password: TEST_PASSWORD.to_string(),
        token: create_access_token(id, is_admin, true, &test_jwt_config()).unwrap(),
    }
}

#[allow(dead_code)]
pub async fn create_test_contact(
    tx: &mut Transaction<'_, Postgres>,
    user_id: Uuid,
    first_name: &str,
    last_name: &str,
) -> Uuid {
    sqlx::query_scalar(
        "INSERT INTO contacts (user_id, first_name, last_name) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(user_id)
    .bind(first_name)
    .bind(last_name)
    .fetch_one(&mut **tx)
    .await
    .unwrap()
}

#[allow(dead_code)]
pub async fn create_test_detail(
    tx: &mut Transaction<'_, Postgres>,
    contact_id: Uuid,
    user_id: Uuid,
    detail_type: &str,
    value: &str,
) -> Uuid {
    sqlx::query_scalar(
        r#"
        INSERT INTO contact_details (contact_id, user_id, detail_type, value)
        VALUES ($1, $2, $3, $4)
        RETURNING id
        "#,
    )
    .bind(contact_id)
    .bind(user_id)
    .bind(detail_type)
    .bind(value)
    .fetch_one(&mut **tx)
    .await
    .unwrap()
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

/// Builds a JSON request, with a bearer token when given.
pub fn json_request(
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }

    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Sends the request and decodes the JSON body (`Null` when empty).
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();

    let body = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };

    (status, body)
}

#[allow(dead_code)]
pub async fn is_active(pool: &PgPool, table: &str, id: Uuid) -> bool {
    sqlx::query_scalar(&format!("SELECT is_active FROM {} WHERE id = $1", table))
        .bind(id)
        .fetch_one(pool)
        .await
        .unwrap()
}
