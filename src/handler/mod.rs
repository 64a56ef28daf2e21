pub mod clients;
pub mod equipment;
pub mod photos;
pub mod properties;
pub mod reservations;
pub mod reviews;
pub mod views;

use crate::{error::HttpError, service::error::ServiceError};

/// Logs a failed store call and turns it into the HTTP error the caller sees.
pub(crate) fn rejected(entity: &'static str, error: ServiceError) -> HttpError {
    match &error {
        ServiceError::Violation(violation) => tracing::warn!(
            entity,
            kind = violation.kind(),
            field = violation.field(),
            "save rejected: {}",
            violation
        ),
        ServiceError::NotFound { .. } => tracing::debug!(entity, "{}", error),
        ServiceError::Database(err) => tracing::error!(entity, "database error: {}", err),
    }
    error.into()
}
