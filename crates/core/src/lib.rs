//! FurnishMe Core - Shared types library.
//!
//! This crate provides common types used across the FurnishMe components:
//! - `storefront` - Catalog, cart, session and user directory logic
//! - `cli` - Terminal front end driving the storefront
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, and session status

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
