//! Application configuration.
//!
//! Every config struct is loaded once at startup from environment variables
//! and injected through [`crate::state::AppState`]; nothing re-reads the
//! environment per request.
//!
//! - [`cors`]: allowed origins
//! - [`database`]: PostgreSQL connection pool
//! - [`email`]: SMTP settings for store notifications
//! - [`jwt`]: signing secret and per-audience token expiries
//! - [`rate_limit`]: per-IP limiter settings

pub mod cors;
pub mod database;
pub mod email;
pub mod jwt;
pub mod rate_limit;
