//! # Bookmarket API
//!
//! A bookstore-marketplace REST API built with Axum and PostgreSQL. Its core
//! is a role-based authorization layer: three account roles, a bookseller
//! store-approval workflow, JWT sessions verified against the live user
//! record, and per-resource ownership checks.
//!
//! ## Architecture
//!
//! The codebase follows a modular layout:
//!
//! ```text
//! src/
//! ├── cli/              # Admin account creation (CLI only)
//! ├── config/           # Startup configuration (JWT, database, CORS, SMTP, rate limits)
//! ├── middleware/       # Session verifier and role gates
//! ├── modules/          # Feature modules
//! │   ├── auth/        # Registration and login
//! │   ├── users/       # Profiles, soft deletion, admin user management
//! │   ├── booksellers/ # Store approval workflow
//! │   ├── books/       # Catalog with owner-or-admin mutation
//! │   ├── favorites/   # Unique (user, book) pairs
//! │   ├── orders/      # Purchases, readable by owner or admin
//! │   └── stats/       # Seller and admin dashboards
//! └── utils/           # Errors, JWT, password hashing, pagination, email
//! ```
//!
//! Each feature module keeps the same structure: `model.rs` (entities and
//! DTOs), `service.rs` (business logic), `controller.rs` (handlers) and
//! `router.rs`.
//!
//! ## Roles
//!
//! | Role | Access |
//! |------|--------|
//! | Admin | Full access; created via CLI only; 1-hour sessions |
//! | Bookseller | Seller routes once the store is approved |
//! | User | Own profile, favorites and orders |
//!
//! A bookseller registers with a store name and starts in the `pending`
//! state. Until an admin approves the store, the bookseller cannot log in at
//! all; rejection keeps the account visible to its owner but locked out the
//! same way. Approval state is re-read from the database on every request,
//! so an admin decision takes effect immediately without reissuing tokens.
//!
//! ## Sessions
//!
//! Login issues an HS256 JWT (7 days for users and booksellers, 1 hour for
//! admins; admin tokens carry no email claim). The token only locates the
//! account: every request reloads the live record and rejects deactivated
//! accounts, so there is no revocation list to maintain.

pub mod cli;
pub mod config;
pub mod docs;
pub mod logging;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod utils;
pub mod validator;
