//! HTTP route handlers.

pub mod decrypt;
pub mod health;
