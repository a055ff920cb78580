//! Pluggable media storage for product images.
//!
//! Callers depend on the [`MediaStorage`] contract, never on a concrete
//! provider. One adapter exists today (Cloudinary); the factory selects and
//! lazily constructs the process-wide instance from configuration.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     MediaStorage (contract)                      │
//! ├─────────────────────────────────────────────────────────────────┤
//! │ upload(input)        │ delete(id)         │ url(id, opts)       │
//! └─────────────────────────────────────────────────────────────────┘
//!            ▲
//!            │ implements
//!   ┌────────┴──────────┐
//!   │ CloudinaryStorage │  ◄── get_storage() process-wide singleton
//!   └───────────────────┘
//! ```

mod cloudinary;
mod config;
mod error;
mod factory;
mod provider;
mod types;

pub use cloudinary::{CloudinaryCredentials, CloudinaryStorage};
pub use config::UploadPolicy;
pub use error::MediaError;
pub use factory::{build_storage, get_storage, get_storage_with};
pub use provider::MediaStorage;
pub use types::{AssetResult, DeleteOutcome, UploadInput, UrlOptions};
