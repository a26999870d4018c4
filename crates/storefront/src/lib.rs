//! `FurnishMe` storefront library.
//!
//! The storefront's cart, mock authentication, catalog filter and carousel,
//! persisted to a string-keyed store after every change. Rendering is left
//! to the embedder: handlers return view-ready replies and [`views`] turns
//! state into plain display structs.
//!
//! # Layout
//!
//! - [`storage`] - Key/value backends (memory, JSON file)
//! - [`store`] - Persisted state containers with change notification
//! - [`models`] - Cart, user, session and receipt types
//! - [`db`] - How each model maps onto storage keys
//! - [`services`] - Cart and auth rules
//! - [`handlers`] - Event dispatch
//! - [`views`] - Display models

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod carousel;
pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod notifications;
pub mod services;
pub mod state;
pub mod storage;
pub mod store;
pub mod views;

pub use config::StorefrontConfig;
pub use error::AppError;
pub use handlers::{Event, Reply, dispatch};
pub use state::AppState;
