//! Background Tasks Module
//!
//! Contains background tasks that run periodically for the cache's lifetime.
//!
//! # Tasks
//! - Purge: removes entries past a maximum age at configured intervals

mod purge;

pub use purge::spawn_purge_task;
