//! # HTTP Request Handlers
//!
//! Thin transport layer over the service modules. Handlers validate nothing
//! beyond what the services already enforce; they translate typed results
//! into status codes and JSON envelopes.
//!
//! ## Handler Modules
//!
//! - **[`auth`]**: registration, login, logout
//!   - `POST /api/v1/auth/register`
//!   - `POST /api/v1/auth/login`
//!   - `POST /api/v1/auth/logout` (bearer)
//!
//! - **[`users`]**: public user lookup and the password-reset endpoints
//!   - `GET /api/v1/users/{id}`
//!   - `POST /api/v1/users/forgot-password`
//!   - `PATCH /api/v1/users/reset`
//!   - `DELETE /api/v1/users/account` (bearer)
//!
//! - **[`profile`]**: authenticated self-service operations
//!   - `POST /api/v1/profile/change-password` (bearer)
//!   - `PUT /api/v1/profile` (bearer)
//!
//! Protected endpoints extract the caller from `Extension<Claims>`, injected
//! by [`crate::middleware::require_auth`].

pub mod auth;
pub mod profile;
pub mod users;
