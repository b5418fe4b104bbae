use axum::Json;
use contracts::shared::ApiEnvelope;
use contracts::system::auth::{LoginRequest, LoginResponse, SessionInfo, SessionResponse};

use crate::shared::error::ApiError;
use crate::shared::extract::ApiJson;
use crate::system::auth::extractor::CurrentSession;
use crate::system::auth::{self, jwt, password, AuthSettings};

/// Check the staff password and issue a session token
pub fn open_session(settings: &AuthSettings, candidate: &str) -> Result<LoginResponse, ApiError> {
    let hash = settings
        .password_hash
        .as_deref()
        .ok_or_else(|| ApiError::config("Staff password is not configured"))?;

    let valid = password::verify_password(candidate, hash)
        .map_err(|e| ApiError::config(e.to_string()))?;
    if !valid {
        return Err(ApiError::Unauthorized("Invalid password".to_string()));
    }

    let (access_token, expires_at) =
        jwt::generate_access_token(&settings.jwt_secret, settings.session_hours)
            .map_err(|e| ApiError::config(format!("{:#}", e)))?;

    Ok(LoginResponse {
        access_token,
        expires_at,
    })
}

/// POST /api/system/auth/login
pub async fn login(
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Json<ApiEnvelope<LoginResponse>>, ApiError> {
    let settings = auth::settings().map_err(|e| ApiError::config(e.to_string()))?;
    let response = open_session(settings, &request.password)?;
    tracing::info!("Staff session opened, expires {}", response.expires_at);
    Ok(Json(ApiEnvelope::ok(response)))
}

/// GET /api/system/auth/me (behind require_auth)
pub async fn me(
    CurrentSession(claims): CurrentSession,
) -> Result<Json<ApiEnvelope<SessionResponse>>, ApiError> {
    Ok(Json(ApiEnvelope::ok(SessionResponse {
        session: SessionInfo::from(&claims),
    })))
}
