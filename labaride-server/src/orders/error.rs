use shared::error::{AppError, ErrorCode};
use shared::order::InvalidTransition;
use thiserror::Error;

use crate::db::retry::StoreError;

/// Lifecycle errors
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("{message}")]
    Validation { field: &'static str, message: String },

    #[error("User not found: {0}")]
    UserNotFound(i64),

    #[error("Shop not found: {0}")]
    ShopNotFound(i64),

    #[error("Transaction not found: {0}")]
    OrderNotFound(i64),

    #[error(transparent)]
    InvalidTransition(#[from] InvalidTransition),

    #[error("{0}")]
    Forbidden(&'static str),

    #[error("Transaction {0} was modified concurrently")]
    Conflict(i64),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

impl OrderError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        OrderError::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn missing(field: &'static str) -> Self {
        Self::validation(field, format!("Missing {field}"))
    }
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::Validation { field, message } => AppError::validation(field, message),
            OrderError::UserNotFound(id) => {
                AppError::new(ErrorCode::UserNotFound).with_detail("user_id", id)
            }
            OrderError::ShopNotFound(id) => {
                AppError::new(ErrorCode::ShopNotFound).with_detail("shop_id", id)
            }
            OrderError::OrderNotFound(id) => {
                AppError::new(ErrorCode::OrderNotFound).with_detail("transaction_id", id)
            }
            OrderError::InvalidTransition(t) => {
                AppError::invalid_transition(t.from.as_str(), t.to.as_str())
            }
            OrderError::Forbidden(msg) => AppError::forbidden(msg),
            OrderError::Conflict(id) => {
                AppError::new(ErrorCode::OrderConflict).with_detail("transaction_id", id)
            }
            OrderError::Store(StoreError::Timeout) => AppError::new(ErrorCode::UpstreamTimeout),
            OrderError::Store(e @ StoreError::Database(_)) => {
                tracing::error!(error = %e, "Order storage error");
                AppError::new(ErrorCode::DatabaseError)
            }
        }
    }
}
