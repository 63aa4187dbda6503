//! API Module
//!
//! HTTP handlers and routing for the cache and reducer endpoints.
//!
//! # Endpoints
//! - `PUT /set` - Store a JSON value with optional TTL
//! - `GET /get/:key` - Retrieve a live value
//! - `GET /has/:key` - Check for a live value
//! - `DELETE /del/:key` - Delete a key
//! - `POST /clear` - Drop every entry
//! - `POST /sweep` - Evict expired entries now
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check
//! - `POST /services/dedupe` - Collapse a service listing
//! - `POST /leaderboard` - Rank best score per actor

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
