//! Tunescope - Spotify genre-distribution backend.
//!
//! This library implements a backend aggregator for the Spotify Web API:
//! it runs the OAuth 2.0 authorization-code login flow on behalf of a
//! user, then fetches and aggregates that user's saved-track and top-item
//! data into a simplified genre distribution served over a small JSON API.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints (login flow, status, analysis, top items)
//! - `config` - Configuration management and environment variables
//! - `error` - Error taxonomy and HTTP response mapping
//! - `genres` - Genre-to-bucket classification tables
//! - `management` - In-memory OAuth state and session registries
//! - `server` - Router assembly and the serve loop
//! - `spotify` - Spotify Web API client
//! - `types` - Data structures and type definitions

pub mod api;
pub mod config;
pub mod error;
pub mod genres;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;

/// A convenient Result type alias for startup and serve-loop operations
/// that may fail with arbitrary errors.
///
/// Request handlers use the typed [`error::ApiError`] instead; this alias
/// covers the places where a boxed dynamic error is enough.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;
