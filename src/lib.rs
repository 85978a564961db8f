//! # Portal REST
//!
//! Public portal surface of an API management platform. It exposes published
//! APIs (with their documentation pages, plans, pictures and ratings) and the
//! applications subscribers build against them, over JSON/HTTP.
//!
//! ## Architecture
//!
//! ```text
//! HTTP (axum) → auth middleware → handlers → permission gate / visibility
//!                                     ↓
//!                          portal services (traits)
//!                                     ↓
//!                     mappers → public representations + links
//! ```
//!
//! The backing services are traits in [`services`]; [`services::InMemoryPortal`]
//! implements all of them for local runs and tests.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use portal_rest::api::{build_router, ApiState};
//! use portal_rest::auth::StaticTokenIdentityProvider;
//! use portal_rest::services::InMemoryPortal;
//!
//! let portal = Arc::new(InMemoryPortal::new());
//! let state = ApiState::from_portal(portal, "/portal/environments/DEFAULT");
//! let router = build_router(state, Arc::new(StaticTokenIdentityProvider::new()));
//! # let _ = router;
//! ```

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod observability;
pub mod services;

pub use config::AppConfig;
pub use errors::{Error, Result};
pub use observability::init_observability;

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name from Cargo.toml
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
