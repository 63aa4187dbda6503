//! Records and request/response models
//!
//! `records` holds the domain types the reducers work on together with the
//! adapters from raw documents; `requests` and `responses` are the HTTP DTOs.

pub mod records;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use records::{
    CategoryRef, RawScore, RawScoreEntry, RawServiceRecord, RawTimestamp, ScoreEntry, ServiceRecord,
};
pub use requests::{LeaderboardRequest, SetRequest};
pub use responses::{
    ClearResponse, DeleteResponse, GetResponse, HasResponse, HealthResponse, SetResponse,
    StatsResponse, SweepResponse,
};
