//! Request middleware and extractors.
//!
//! Every protected request flows through the same chain: the session
//! verifier ([`auth::AuthUser`]) turns a bearer token into a live
//! [`auth::Principal`], then the role gate ([`role`]) decides whether that
//! principal may reach the handler at all. Resource-level ownership checks
//! run inside the services, after the gate.
//!
//! # Authentication flow
//!
//! 1. Client sends `Authorization: Bearer <token>`
//! 2. [`auth::AuthUser`] verifies the signature and expiry, then reloads the
//!    user record from the database
//! 3. Router layers or extractors from [`role`] check the role and, for
//!    bookseller routes, the current store approval state
//! 4. The handler runs with the attached principal

pub mod auth;
pub mod role;
