//! HTTP middleware and extractors for admin.

pub mod auth;

pub use auth::{CurrentRole, RequireSession};
