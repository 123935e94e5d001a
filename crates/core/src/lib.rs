//! Core logic for Toronto.
//!
//! This crate contains pure logic with ZERO web or database dependencies.
//!
//! # Modules
//!
//! - `query` - PostgREST-style list query parsing (filters, order, paging)
//! - `locale` - Locale resolution and translation fallback chains
//! - `auth` - Password hashing and user roles
//! - `sitemap` - Sitemap XML rendering
//! - `slug` - URL slug helpers

pub mod auth;
pub mod locale;
pub mod query;
pub mod sitemap;
pub mod slug;
