//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema
//! y su conversión a respuestas HTTP apropiadas.

use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Entidad referenciada por id desde otra entidad
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferencedEntity {
    OriginLocation,
    DestinyLocation,
    Vehicle,
    Driver,
    Location,
    Device,
}

impl ReferencedEntity {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReferencedEntity::OriginLocation => "origin location",
            ReferencedEntity::DestinyLocation => "destiny location",
            ReferencedEntity::Vehicle => "vehicle",
            ReferencedEntity::Driver => "driver",
            ReferencedEntity::Location => "location",
            ReferencedEntity::Device => "device",
        }
    }
}

impl fmt::Display for ReferencedEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Reference not found: {entity} with id {id} does not exist")]
    ReferenceNotFound { entity: ReferencedEntity, id: i64 },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Persistence error: {context}: {source}")]
    Persistence {
        context: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// Código estable expuesto a los clientes
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::ReferenceNotFound { .. } => "REFERENCE_NOT_FOUND",
            AppError::Conflict(_) => "CONFLICT",
            AppError::Persistence { .. } => "PERSISTENCE_ERROR",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ReferenceNotFound { .. } => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Persistence { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    code: &'static str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();

        if status.is_server_error() {
            tracing::error!(code, error = %self, "❌ Error del servidor");
        } else {
            tracing::warn!(code, error = %self, "Solicitud rechazada");
        }

        let error_response = match self {
            AppError::NotFound(msg) => ErrorResponse {
                error: "Not Found".to_string(),
                message: msg,
                details: None,
                code,
            },

            AppError::ReferenceNotFound { entity, id } => ErrorResponse {
                error: "Reference Not Found".to_string(),
                message: format!("{} with id {} not found", entity, id),
                details: Some(json!({ "entity": entity.as_str(), "id": id })),
                code,
            },

            AppError::Conflict(msg) => ErrorResponse {
                error: "Conflict".to_string(),
                message: msg,
                details: None,
                code,
            },

            AppError::Persistence { context, source } => ErrorResponse {
                error: "Persistence Error".to_string(),
                message: "An error occurred while accessing the database".to_string(),
                details: Some(json!({ "context": context, "sql_error": source.to_string() })),
                code,
            },

            AppError::Validation(e) => ErrorResponse {
                error: "Validation Error".to_string(),
                message: "The provided data is invalid".to_string(),
                details: Some(json!(e)),
                code,
            },

            AppError::BadRequest(msg) => ErrorResponse {
                error: "Bad Request".to_string(),
                message: msg,
                details: None,
                code,
            },
        };

        (status, Json(error_response)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str, id: i64) -> AppError {
    AppError::NotFound(format!("{} with id {} not found", resource, id))
}

/// Función helper para envolver errores de sqlx con contexto
pub fn persistence_error(context: &str) -> impl FnOnce(sqlx::Error) -> AppError + '_ {
    move |source| AppError::Persistence {
        context: context.to_string(),
        source,
    }
}

/// Función helper para crear errores de solicitud incorrecta
pub fn bad_request_error(message: &str) -> AppError {
    AppError::BadRequest(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_not_found_names_entity_and_id() {
        let err = AppError::ReferenceNotFound {
            entity: ReferencedEntity::DestinyLocation,
            id: 42,
        };
        assert_eq!(
            err.to_string(),
            "Reference not found: destiny location with id 42 does not exist"
        );
        assert_eq!(err.code(), "REFERENCE_NOT_FOUND");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(not_found_error("transaction", 1).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::Conflict("busy".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(bad_request_error("bad sort").status_code(), StatusCode::BAD_REQUEST);

        let persistence = persistence_error("saving transaction")(sqlx::Error::PoolTimedOut);
        assert_eq!(persistence.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(persistence.to_string().contains("saving transaction"));
    }

    #[test]
    fn test_into_response_uses_status() {
        let response = AppError::ReferenceNotFound {
            entity: ReferencedEntity::Vehicle,
            id: 7,
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
