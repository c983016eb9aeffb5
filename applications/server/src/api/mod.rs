/// API route modules
pub mod albums;
pub mod health;
pub mod recognize;
pub mod search;
