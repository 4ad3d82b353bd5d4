//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Cleanup: removes expired cache entries and elapsed rate-limit windows

mod cleanup;

pub use cleanup::spawn_cleanup_task;
