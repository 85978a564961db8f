//! # REST API Components
//!
//! The portal's public HTTP surface: routing, handlers, representations and
//! the helpers they share (visibility filtering, links, pagination, cache
//! validators for binary assets).

pub mod access;
pub mod assets;
pub mod docs;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod links;
pub mod mappers;
pub mod pagination;
pub mod routes;
pub mod server;

pub use error::{ApiError, ErrorResponse};
pub use routes::{build_router, build_router_with_config, ApiState};
pub use server::start_api_server;
