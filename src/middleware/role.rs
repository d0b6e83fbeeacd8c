//! Role gates, applied with `axum::middleware::from_fn_with_state`.
//!
//! Each gate authenticates the caller (reusing claims already attached by
//! [`authenticate`](crate::middleware::auth::authenticate)), evaluates its
//! predicate from `rolodex_auth::gates` and either forwards the request with
//! the claims attached or answers 401/403.

use std::collections::HashMap;

use anyhow::anyhow;
use axum::{
    extract::{FromRequestParts, Path, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use rolodex_auth::gates;
use rolodex_core::AppError;
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Gate {
    Admin,
    Staff,
    User,
}

async fn gate(state: AppState, req: Request, next: Next, kind: Gate) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();
    let user = AuthUser::from_request_parts(&mut parts, &state).await?;

    let verdict = match kind {
        Gate::Admin => gates::check_admin(&user.0),
        Gate::Staff => gates::check_staff(&user.0),
        Gate::User => match path_user_id(&mut parts).await {
            Ok(target) => gates::check_user_access(&user.0, target),
            Err(err) => Err(err),
        },
    };

    if let Err(err) = verdict {
        tracing::warn!(
            user_id = %user.0.sub,
            gate = ?kind,
            path = %parts.uri.path(),
            "Access denied"
        );
        return Err(err);
    }

    parts.extensions.insert(user);
    Ok(next.run(Request::from_parts(parts, body)).await)
}

/// Active administrators only.
pub async fn require_admin(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    gate(state, req, next, Gate::Admin).await
}

/// Any active account.
pub async fn require_staff(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    gate(state, req, next, Gate::Staff).await
}

/// The account named by the `{user_id}` path segment, or an active admin.
pub async fn require_user(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    gate(state, req, next, Gate::User).await
}

async fn path_user_id(parts: &mut Parts) -> Result<Uuid, AppError> {
    let Path(params) = Path::<HashMap<String, String>>::from_request_parts(parts, &())
        .await
        .map_err(|e| AppError::bad_request(anyhow!(e.body_text())).with_context("path"))?;

    let raw = params
        .get("user_id")
        .ok_or_else(|| AppError::internal_error("User gate mounted on a route without {user_id}"))?;

    Uuid::parse_str(raw).map_err(|_| {
        AppError::bad_request(anyhow!("Invalid user id '{}'", raw)).with_context("user_id")
    })
}
