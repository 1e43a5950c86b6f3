pub mod auth;
pub mod books;
pub mod booksellers;
pub mod favorites;
pub mod orders;
pub mod stats;
pub mod users;
