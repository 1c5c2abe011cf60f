// src/middleware/auth.rs

use axum::{
    extract::{FromRequestParts, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::{common::error::AppError, config::AppState, models::user::User};

// A identidade vem do gateway (colaborador externo de Identidade), que
// injeta o X-User-Id já autenticado. Este guard só confirma que o
// cabeçalho está bem formado e aponta para um usuário real.
pub async fn identity_guard(
    State(app_state): State<AppState>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, AppError> {
    let header = request
        .headers()
        .get("X-User-Id")
        .and_then(|value| value.to_str().ok());

    let Some(raw) = header else {
        return Err(AppError::InvalidIdentity);
    };

    let user_id = Uuid::parse_str(raw).map_err(|_| AppError::InvalidIdentity)?;

    let user = app_state
        .user_repo
        .find_by_id(user_id)
        .await?
        .ok_or(AppError::InvalidIdentity)?;

    // Insere o usuário nos "extensions" da requisição
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

// Extrator para obter o ator autenticado diretamente nos handlers
pub struct AuthenticatedUser(pub User);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<User>()
            .cloned()
            .map(AuthenticatedUser)
            .ok_or(AppError::InvalidIdentity)
    }
}
