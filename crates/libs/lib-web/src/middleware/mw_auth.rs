//! # Authentication Middleware
//!
//! Validates `Authorization: Bearer` access tokens on protected routes.
//!
//! A token must pass two gates: the signature/expiry check, and a lookup in
//! the token store. The second gate is what makes logout take effect
//! immediately: an invalidated token still carries a valid signature but is
//! no longer honored.
//!
//! On success the decoded `Claims` are injected into request extensions, so
//! handlers extract the caller with `Extension<Claims>`.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::Response,
};
use lib_auth::token::{decode_token, TokenKind};
use lib_core::model::store::TokenRepository;
use tracing::{debug, error, warn};

use crate::server::AppState;

/// Authentication middleware for protected routes.
///
/// # Behavior
///
/// - **Valid access token**: continues to the handler with `Claims` in
///   extensions
/// - **Missing/malformed header, bad signature, expired, wrong kind, or
///   revoked token**: returns `401 Unauthorized`
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let auth_header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            warn!("[AUTH] Missing Authorization header");
            StatusCode::UNAUTHORIZED
        })?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        warn!("[AUTH] Invalid Authorization header format");
        StatusCode::UNAUTHORIZED
    })?;

    let claims = decode_token(token, &state.config.jwt_secret).map_err(|e| {
        warn!("[AUTH] Token validation failed: {}", e);
        StatusCode::UNAUTHORIZED
    })?;

    // A password-reset token is not a session, whatever its signature says.
    if claims.kind != TokenKind::Access {
        warn!("[AUTH] Non-access token presented as bearer credential");
        return Err(StatusCode::UNAUTHORIZED);
    }

    let user_id = claims.subject_id().map_err(|_| StatusCode::UNAUTHORIZED)?;

    let valid = TokenRepository::is_valid(&state.db, user_id, token)
        .await
        .map_err(|e| {
            error!("[AUTH] Token store lookup failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    if !valid {
        warn!("[AUTH] Revoked or unknown token for user {}", user_id);
        return Err(StatusCode::UNAUTHORIZED);
    }

    debug!("[AUTH] Authenticated user {}", user_id);

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
