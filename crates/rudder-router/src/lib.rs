//! # rudder-router
//!
//! A declarative navigation router: registered path templates, parameter
//! and query extraction, and a transition lifecycle with before/after
//! hooks, driven over a pluggable history backend.
//!
//! This crate provides:
//! - Location normalization applied identically to templates and locations
//! - Path templates with `:name` captures, compiled to segment descriptors
//! - An ordered route table queried by first structural match
//! - Async before/after transition hooks, run sequentially
//! - History-API and hash navigation modes behind one driver trait
//! - Anchor-click interception with browser-friendly filter rules
//!
//! ## Quick Start
//!
//! ```
//! use rudder_history::MemoryHistory;
//! use rudder_router::{hook_fn, RouteConfig, Router};
//!
//! # futures::executor::block_on(async {
//! let router = Router::new(Box::new(MemoryHistory::new()));
//! router.add(RouteConfig::new("/")).unwrap();
//! router.add(RouteConfig::new("/users/:id").name("user")).unwrap();
//!
//! router.before_change(hook_fn(|cx| async move {
//!     println!("heading to {}", cx.location);
//!     Ok(())
//! }));
//!
//! router.redirect("/users/42?tab=posts").await;
//! assert_eq!(router.param("id"), Some("42".to_string()));
//! assert_eq!(router.location(), Some("/users/42".to_string()));
//! # });
//! ```
//!
//! ## Path Templates
//!
//! Templates are normalized at registration; any segment starting with `:`
//! captures exactly one path segment, everything else matches literally and
//! case-insensitively. A template never matches a location with a
//! different segment count. Earlier registrations win ties.
//!
//! ## Transition Lifecycle
//!
//! Every navigation attempt runs before-hooks, then commits (optionally
//! writing the history backend and installing the new active route), then
//! runs after-hooks. A failing before-hook abandons the attempt and leaves
//! the active route untouched. Event-driven entry points swallow failures
//! and log a warning; [`Router::try_change`] reports them.
//!
//! ## Host Integration
//!
//! The host environment implements [`rudder_history::HistoryDriver`] and
//! feeds its pop and anchor-click events to [`Router::on_pop_event`] and
//! [`Router::on_link_click`] after a single [`Router::attach_events`]
//! call. [`rudder_history::MemoryHistory`] serves tests and non-browser
//! hosts.

mod error;
mod events;
mod hooks;
mod params;
mod path;
mod route;
mod router;

pub use error::{HookPhase, Result, RouterError};
pub use events::{ClickOutcome, IgnoreReason, LinkEvent};
pub use hooks::{hook_fn, Hook, HookError, HookResult, RouteRef, Transition};
pub use params::{params_for, query_for, QueryValue};
pub use path::{normalize, PathPattern, PatternSegment};
pub use route::{ActiveRoute, Route, RouteConfig, RouteTable};
pub use router::{Router, RouterConfig};

pub use rudder_history::{HistoryDriver, MemoryHistory, Mode};
