//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Link Sweeper: Removes expired links at the configured interval

mod sweeper;

pub use sweeper::Sweeper;
