//! Core time-tracking primitives shared by every Tracky client: the
//! `TimeSpan` domain, duration arithmetic and formatting, the process-wide
//! synchronized tick source, the display elements that render live timers,
//! and the in-memory entry store that holds the single active entry.

pub mod display;
pub mod domain;
pub mod duration;
pub mod store;
pub mod ticker;

pub use display::{CumulativeDisplay, ElapsedDisplay};
pub use domain::*;
pub use store::{EntryStore, StoreError};
pub use ticker::{SyncedTicker, TickSubscription};
