//! # Data Transfer Objects
//!
//! Request and response structures for the HTTP boundary. All DTOs use
//! snake_case field names in JSON (default serde behavior); optional fields
//! are omitted when `None`.

pub mod auth;
pub mod profile;

pub use auth::{
    ErrorResponse, ForgotPasswordRequest, LoginRequest, LoginResponse, MessageResponse,
    RegisterRequest, ResetPasswordRequest, TokenResponse,
};
pub use profile::{ChangePasswordRequest, DeleteAccountRequest, UpdateProfileRequest, UserResponse};
