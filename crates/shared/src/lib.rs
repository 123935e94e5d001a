//! Shared errors, configuration and token handling for Toronto.
//!
//! This crate provides common types used across all other crates:
//! - Application-wide error types
//! - Configuration management
//! - JWT claims and the token service

pub mod auth;
pub mod config;
pub mod error;
pub mod jwt;

#[cfg(test)]
mod error_tests;
#[cfg(test)]
mod jwt_tests;

pub use auth::{Claims, TokenPair, TokenType};
pub use config::AppConfig;
pub use error::AppError;
pub use jwt::{JwtConfig, JwtError, JwtService, TokenSubject};
