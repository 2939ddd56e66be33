//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Expiry purge: removes expired cache entries in bounded batches

mod purge;

pub use purge::spawn_purge_task;
