use actix_web::{error::BlockingError, http::StatusCode, HttpResponse, ResponseError};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

use crate::protocol::SimpleResponse;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    /// Business-rule refusal or a unique key already taken.
    #[error("{0}")]
    Conflict(String),

    /// Downstream failure worth retrying from the client (pool exhausted,
    /// connection dropped, serialization failure).
    #[error("Serviço temporariamente indisponível, tente novamente")]
    Unavailable(String),

    #[error("Não foi possível concluir a operação")]
    Database(String),
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

impl ServiceError {
    pub fn validation<S: ToString>(msg: S) -> Self {
        ServiceError::Validation(msg.to_string())
    }

    pub fn not_found<S: ToString>(msg: S) -> Self {
        ServiceError::NotFound(msg.to_string())
    }

    pub fn conflict<S: ToString>(msg: S) -> Self {
        ServiceError::Conflict(msg.to_string())
    }

    pub fn is_transient(&self) -> bool {
        matches!(self, ServiceError::Unavailable(_))
    }

    /// Downstream failures are logged with their cause; the client only sees
    /// the generic message.
    pub fn is_downstream(&self) -> bool {
        matches!(self, ServiceError::Unavailable(_) | ServiceError::Database(_))
    }

    pub fn detail(&self) -> String {
        match self {
            ServiceError::Unavailable(detail) | ServiceError::Database(detail) => detail.clone(),
            other => other.to_string(),
        }
    }
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ServiceError::Forbidden(_) => StatusCode::FORBIDDEN,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Conflict(_) => StatusCode::CONFLICT,
            ServiceError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ServiceError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(SimpleResponse::err(self))
    }
}

impl From<DieselError> for ServiceError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => ServiceError::not_found("Registro não encontrado"),
            DieselError::DatabaseError(kind, info) => match kind {
                DatabaseErrorKind::UniqueViolation => {
                    ServiceError::conflict("Registro já existe")
                }
                DatabaseErrorKind::ForeignKeyViolation => {
                    ServiceError::validation("Referência inválida")
                }
                DatabaseErrorKind::UnableToSendCommand | DatabaseErrorKind::SerializationFailure => {
                    ServiceError::Unavailable(info.message().to_string())
                }
                _ => ServiceError::Database(info.message().to_string()),
            },
            other => ServiceError::Database(other.to_string()),
        }
    }
}

impl From<r2d2::Error> for ServiceError {
    fn from(err: r2d2::Error) -> Self {
        ServiceError::Unavailable(format!("DB connection: {}", err))
    }
}

impl From<BlockingError<ServiceError>> for ServiceError {
    fn from(err: BlockingError<ServiceError>) -> Self {
        match err {
            BlockingError::Error(err) => err,
            BlockingError::Canceled => ServiceError::Unavailable("blocking task canceled".into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_error_kind() {
        assert_eq!(
            ServiceError::validation("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServiceError::not_found("x").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(ServiceError::conflict("x").status_code(), StatusCode::CONFLICT);
        assert_eq!(
            ServiceError::Unavailable("pool".into()).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn diesel_not_found_maps_to_not_found() {
        let err: ServiceError = DieselError::NotFound.into();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[test]
    fn rollback_is_permanent() {
        let err: ServiceError = DieselError::RollbackTransaction.into();
        assert!(!err.is_transient());
        assert!(err.is_downstream());
    }

    #[test]
    fn downstream_errors_hide_detail_from_client() {
        let err = ServiceError::Database("Table 'x' doesn't exist".into());
        assert_eq!(err.to_string(), "Não foi possível concluir a operação");
        assert_eq!(err.detail(), "Table 'x' doesn't exist");
    }

    #[test]
    fn canceled_blocking_task_is_transient() {
        let err: ServiceError = BlockingError::<ServiceError>::Canceled.into();
        assert!(err.is_transient());
    }

    #[test]
    fn unique_violation_is_a_conflict() {
        let err: ServiceError = DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new("Duplicate entry 'OS0000000001' for key 'codigo_confirmacao'".to_string()),
        )
        .into();
        assert!(matches!(err, ServiceError::Conflict(_)));
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert!(!err.is_downstream());
    }

    #[test]
    fn lost_connection_is_transient() {
        let err: ServiceError = DieselError::DatabaseError(
            DatabaseErrorKind::UnableToSendCommand,
            Box::new("MySQL server has gone away".to_string()),
        )
        .into();
        assert!(err.is_transient());
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
