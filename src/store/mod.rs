//! Store Module
//!
//! In-memory link storage with lazy and periodic expiration.

mod clock;
mod record;
mod stats;
mod store;


// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub(crate) use store::StoreCore;
pub use record::{format_remaining, LinkRecord};
pub use stats::StoreStats;
pub use store::{LinkStore, LookupMode};
