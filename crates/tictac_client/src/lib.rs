//! Synchronizing client for remote tic-tac-toe.
//!
//! # Architecture
//!
//! - [`GameApi`]: transport seam; [`HttpGameApi`] speaks the REST API
//! - [`IdentityStore`]: which symbol this client plays and which match it is in
//! - [`SyncClient`]: cache, local pre-check, move submission and polling
//!
//! The server is the only authority. The client never edits a cached board;
//! it replaces the cache with whatever the server last returned.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod api;
mod config;
mod http;
mod identity;
mod sync;

pub use api::{ApiError, GameApi};
pub use config::ClientConfig;
pub use http::HttpGameApi;
pub use identity::{Identity, IdentityStore};
pub use sync::{ClientError, SessionView, SyncClient};
pub use tictac_core::ConfigError;
