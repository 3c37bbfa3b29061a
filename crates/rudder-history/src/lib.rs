//! # rudder-history
//!
//! History backend abstraction for the rudder router.
//!
//! The router core never talks to a concrete host environment. Instead it
//! drives a [`HistoryDriver`]: an object-safe trait covering the small
//! surface the navigation engine needs (read the current location and hash,
//! write new entries, traverse by delta). A browser host implements the
//! trait over its native history API; [`MemoryHistory`] implements it over
//! an in-process entry stack and is what the test suites use.
//!
//! ## Quick Start
//!
//! ```
//! use rudder_history::{HistoryDriver, MemoryHistory, Mode};
//!
//! let mut history = MemoryHistory::new();
//! history.push("/users/7");
//! history.push("/settings");
//! history.go(-1);
//! assert_eq!(history.location(), "/users/7");
//! assert_eq!(Mode::detect(&history), Mode::History);
//! ```

mod driver;
mod memory;

pub use driver::{HistoryDriver, Mode};
pub use memory::MemoryHistory;
