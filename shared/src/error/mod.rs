//! Unified error system for LabaRide
//!
//! - [`ErrorCode`]: stable numeric codes for every failure a client can see
//! - [`ErrorCategory`]: classification of codes by domain
//! - [`AppError`]: error type carrying code, message and details
//! - [`ApiResponse`]: the JSON envelope every endpoint answers with
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Account errors (users, shops)
//! - 4xxx: Order errors
//! - 5xxx: Catalog errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode, ApiResponse};
//!
//! let err = AppError::new(ErrorCode::OrderNotFound);
//! let err = AppError::validation("delivery_fee", "delivery_fee must be a number");
//! let response = ApiResponse::<()>::error(&err);
//! assert_eq!(response.status, 400);
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult};
