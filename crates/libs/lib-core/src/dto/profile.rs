//! # Profile Data Transfer Objects
//!
//! Shapes for the authenticated profile endpoints: password change, profile
//! update, account deletion, and the public user view.

use serde::{Deserialize, Serialize};

/// `POST /api/v1/profile/change-password` request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
    pub confirm_new_password: String,
}

/// `PUT /api/v1/profile` request body. The name is required on every
/// update; absent preference lists keep their stored value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: String,
    #[serde(default)]
    pub diet_preferences: Option<Vec<String>>,
    #[serde(default)]
    pub favorite_cuisines: Option<Vec<String>>,
}

/// `DELETE /api/v1/users/account` request body. Deletion requires the
/// caller's password as confirmation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteAccountRequest {
    pub password: String,
}

/// Public view of a user record. Credential material never appears here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub name: String,
    pub email: String,
    pub diet_preferences: Vec<String>,
    pub favorite_cuisines: Vec<String>,
}
