use chrono::NaiveDate;
use thiserror::Error;

use crate::error::{ErrorMessage, HttpError};

/// Why a save was rejected. Messages are the user-facing (Czech) texts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    #[error("{message}")]
    Required { field: &'static str, message: String },

    #[error("{message}")]
    Format { field: &'static str, message: String },

    #[error("{message}")]
    Uniqueness { field: &'static str, message: String },

    #[error("{message}")]
    Range { field: &'static str, message: String },

    #[error("{message}")]
    Length { field: &'static str, message: String },

    #[error("{message}")]
    Choice { field: &'static str, message: String },

    #[error("Datum začátku pobytu nemůže být zadáno v minulosti")]
    StartInPast { start_date: NaiveDate, today: NaiveDate },

    #[error("Datum konce pobytu musí být pozdější než datum začátku pobytu")]
    NonPositiveDuration { start_date: NaiveDate, end_date: NaiveDate },
}

impl Violation {
    pub fn kind(&self) -> &'static str {
        match self {
            Violation::Required { .. } => "required",
            Violation::Format { .. } => "format",
            Violation::Uniqueness { .. } => "uniqueness",
            Violation::Range { .. } => "range",
            Violation::Length { .. } => "length",
            Violation::Choice { .. } => "choice",
            Violation::StartInPast { .. } | Violation::NonPositiveDuration { .. } => "temporal",
        }
    }

    pub fn field(&self) -> &'static str {
        match self {
            Violation::Required { field, .. }
            | Violation::Format { field, .. }
            | Violation::Uniqueness { field, .. }
            | Violation::Range { field, .. }
            | Violation::Length { field, .. }
            | Violation::Choice { field, .. } => field,
            Violation::StartInPast { .. } => "start_date",
            Violation::NonPositiveDuration { .. } => "end_date",
        }
    }

    pub fn duplicate_email() -> Self {
        Violation::Uniqueness {
            field: "email",
            message: "E-mailová adresa musí být jedinečná".to_string(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    Violation(#[from] Violation),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ServiceError {
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        ServiceError::NotFound { entity, id }
    }
}

impl From<ServiceError> for HttpError {
    fn from(error: ServiceError) -> Self {
        match error {
            ServiceError::Violation(Violation::Uniqueness { .. }) => {
                HttpError::conflict(error.to_string())
            }
            ServiceError::Violation(_) => HttpError::bad_request(error.to_string()),
            ServiceError::NotFound { .. } => HttpError::not_found(error.to_string()),
            ServiceError::Database(_) => HttpError::server_error(ErrorMessage::ServerError.to_string()),
        }
    }
}
