//! HTTP server subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, timeout + trace layers)
//!     → proxy::handle (validation, filtering, fetch, relay)
//!     → Send to client
//! ```

pub mod server;

pub use server::{AppState, HttpServer};
