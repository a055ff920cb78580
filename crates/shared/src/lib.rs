//! Shared types and configuration for Vendra.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Pagination types for list endpoints
//! - Configuration management

pub mod config;
pub mod types;

pub use config::MediaConfig;
pub use types::{CategoryId, Page, PageRequest, ProductId, StoreId};
