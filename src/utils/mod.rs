//! Shared utilities.
//!
//! - [`email`]: SMTP notifications (fire-and-forget at call sites)
//! - [`errors`]: application error type and HTTP conversion
//! - [`jwt`]: session token creation and verification
//! - [`pagination`]: list endpoint pagination
//! - [`password`]: bcrypt hashing and comparison
//! - [`serde`]: query-string deserialization helpers

pub mod email;
pub mod errors;
pub mod jwt;
pub mod pagination;
pub mod password;
pub mod serde;
