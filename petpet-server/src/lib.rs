//! # Pet Your Pet Server
//!
//! REST backend for the Pet Your Pet application. It plays two roles for
//! its clients:
//!
//! - **Pet Directory Service**: list/create/update/delete pets, scoped to
//!   the owner extracted from the bearer token.
//! - **Identity Service**: sign-up, sign-in, sign-out and token
//!   verification, issuing opaque bearer tokens.
//!
//! The server is built on Axum and uses PostgreSQL for persistent storage,
//! behind store traits so an in-memory backend can stand in for tests and
//! local development.

pub mod auth;
pub mod errors;
pub mod infra;
pub mod pets;
pub mod routes;
pub mod store;

#[cfg(test)]
mod tests;

pub use errors::{AppError, AppResult};
pub use infra::app_state::AppState;
pub use infra::config::Config;
