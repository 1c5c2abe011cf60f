// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// O domínio conhece exatamente dois tipos: NotFound e Conflict.
// Os demais são erros de borda (validação, identidade) ou de infraestrutura.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // Entidade referenciada não existe (ou o chamador não pode enxergá-la).
    #[error("{0}")]
    NotFound(String),

    // Violação de unicidade, de estado ou de regra de negócio.
    #[error("{0}")]
    Conflict(String),

    // O gateway não mandou (ou mandou mal) o X-User-Id.
    #[error("Identidade ausente ou inválida")]
    InvalidIdentity,

    // Variante para erros de banco de dados
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "success": false,
                    "message": "One or more fields are invalid",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }

            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::InvalidIdentity => (
                StatusCode::UNAUTHORIZED,
                "Missing or invalid caller identity".to_string(),
            ),

            // Banco e inesperados viram 500; o detalhe fica só no log.
            ref e => {
                tracing::error!("Erro interno do servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({ "success": false, "message": message }));
        (status, body).into_response()
    }
}

impl AppError {
    /// Converte violação de chave única em Conflict com a mensagem dada.
    /// A constraint no banco é a fonte da verdade; a checagem prévia no
    /// serviço existe para a ordem das mensagens.
    pub fn conflict_on_unique(e: sqlx::Error, message: impl Into<String>) -> AppError {
        if let Some(db_err) = e.as_database_error() {
            if db_err.is_unique_violation() {
                return AppError::Conflict(message.into());
            }
        }
        AppError::DatabaseError(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn domain_errors_map_to_404_and_409() {
        assert_eq!(
            status_of(AppError::NotFound("Team with ID x not found".into())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::Conflict(
                "Team with name \"Alpha\" already exists".into()
            )),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn boundary_and_infra_errors_map_to_401_and_500() {
        assert_eq!(status_of(AppError::InvalidIdentity), StatusCode::UNAUTHORIZED);
        assert_eq!(
            status_of(AppError::DatabaseError(sqlx::Error::RowNotFound)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn validation_errors_map_to_400() {
        let mut errors = validator::ValidationErrors::new();
        let mut field_err = validator::ValidationError::new("length");
        field_err.message = Some("Team name must be between 2 and 100 characters".into());
        errors.add("name".into(), field_err);
        assert_eq!(
            status_of(AppError::ValidationError(errors)),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn non_unique_db_errors_stay_database_errors() {
        let err = AppError::conflict_on_unique(sqlx::Error::RowNotFound, "should not apply");
        assert!(matches!(err, AppError::DatabaseError(_)));
    }
}
