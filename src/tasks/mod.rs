//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - TTL Sweep: Removes expired cache entries at configured intervals

mod sweep;

pub use sweep::SweepTask;
