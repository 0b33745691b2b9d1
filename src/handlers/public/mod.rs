// handlers/public/mod.rs - handlers reachable without a token

pub mod auth;

pub use auth::*;
