//! User Model

use serde::{Deserialize, Serialize};

/// User profile (never carries the password hash)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    /// `YYYY-MM-DD`
    pub birthdate: Option<String>,
    pub gender: Option<String>,
    pub zone: Option<String>,
    pub street: Option<String>,
    pub barangay: Option<String>,
    pub building: Option<String>,
    pub is_shop_owner: bool,
    pub created_at: i64,
}

/// Signup payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub phone: Option<String>,
    pub zone: Option<String>,
    pub street: Option<String>,
    pub barangay: Option<String>,
    pub building: Option<String>,
    pub gender: Option<String>,
}

/// Login payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Partial profile update; omitted name/email keep their stored values
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// `YYYY-MM-DD` or an ISO datetime whose date part is used
    pub birthdate: Option<String>,
    pub gender: Option<String>,
    pub zone: Option<String>,
    pub street: Option<String>,
    pub barangay: Option<String>,
    pub building: Option<String>,
}

/// Password change payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordUpdate {
    pub current_password: String,
    pub new_password: String,
}
