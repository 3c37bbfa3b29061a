//! Navigation adapter: imperative traversal and host event entry points.
//!
//! The router never binds to a concrete host. A host's DOM layer (or a
//! test) feeds pop events through [`Router::on_pop_event`] and anchor
//! clicks through [`Router::on_link_click`]; [`Router::attach_events`]
//! registers the router's interest in those events first.

use rudder_history::Mode;
use tracing::debug;
use url::Url;

use crate::path::normalize;
use crate::router::{lock, Router};

/// A click on an anchor element, as observed by the host's DOM layer.
#[derive(Debug, Clone, Default)]
pub struct LinkEvent {
    /// The anchor's resolved `href`.
    pub href: String,
    /// The anchor's `target` attribute, if any.
    pub target: Option<String>,
    /// Meta key held during the click.
    pub meta_key: bool,
    /// Ctrl key held during the click.
    pub ctrl_key: bool,
    /// Shift key held during the click.
    pub shift_key: bool,
    /// Alt key held during the click.
    pub alt_key: bool,
    /// Whether some earlier listener already prevented the default action.
    pub default_prevented: bool,
}

impl LinkEvent {
    /// Creates a plain left-click event on the given href.
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            ..Self::default()
        }
    }

    fn has_modifier(&self) -> bool {
        self.meta_key || self.ctrl_key || self.shift_key || self.alt_key
    }
}

/// Why the click filter declined to intercept an anchor click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// No listeners attached; [`Router::attach_events`] was never called.
    NotAttached,
    /// A modifier key was held; the host browser handles the click.
    ModifierKey,
    /// The href points at a different origin.
    CrossOrigin,
    /// The href only changes the fragment while not in hash mode.
    HashOnlyChange,
    /// The anchor carries a non-empty `target` attribute.
    HasTarget,
    /// An earlier listener already prevented the default action.
    DefaultPrevented,
}

/// Outcome of feeding an anchor click through the interception filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The router took the navigation; the caller must prevent the default.
    Intercepted,
    /// The click was left to the host.
    Ignored(IgnoreReason),
}

impl ClickOutcome {
    /// Whether the router took the navigation.
    #[must_use]
    pub const fn is_intercepted(self) -> bool {
        matches!(self, Self::Intercepted)
    }
}

impl Router {
    /// Navigates to `location`, writing a history entry.
    ///
    /// This is explicit navigation: the link-click filter rules do not
    /// apply, so an off-origin location still drives a transition.
    pub async fn redirect(&self, location: &str) {
        self.change(location, true).await;
    }

    /// Traverses the history by `delta` entries, then handles the
    /// resulting pop event.
    pub async fn go(&self, delta: i64) {
        {
            lock(&self.driver).go(delta);
        }
        self.on_pop_event().await;
    }

    /// Convenience wrapper over [`Router::go`] with a delta of `1`.
    pub async fn forward(&self) {
        self.go(1).await;
    }

    /// Convenience wrapper over [`Router::go`] with a delta of `-1`.
    pub async fn back(&self) {
        self.go(-1).await;
    }

    /// Registers the router's pop and click listeners.
    ///
    /// Not idempotent: attaching twice double-registers, and every pop
    /// event then drives the change handler once per registration. Call
    /// exactly once.
    pub fn attach_events(&self) {
        let mut nav = lock(&self.nav);
        nav.attached += 1;
        debug!(attached = nav.attached, "event listeners attached");
    }

    /// Entry point for the host's pop event (popstate or hashchange).
    ///
    /// Unless the reentrancy flag is set, re-triggers a non-writing change
    /// to the current location, once per attached registration.
    pub async fn on_pop_event(&self) {
        let registrations = {
            let nav = lock(&self.nav);
            if nav.prevent {
                0
            } else {
                nav.attached
            }
        };
        for _ in 0..registrations {
            let location = self.current_location();
            self.change(&location, false).await;
        }
    }

    /// Entry point for the host's anchor click delegation.
    ///
    /// Applies the interception filter; on [`ClickOutcome::Intercepted`]
    /// the navigation has already been taken and the caller must prevent
    /// the browser default.
    pub async fn on_link_click(&self, event: &LinkEvent) -> ClickOutcome {
        if lock(&self.nav).attached == 0 {
            return ClickOutcome::Ignored(IgnoreReason::NotAttached);
        }
        if event.has_modifier() {
            return ClickOutcome::Ignored(IgnoreReason::ModifierKey);
        }
        if self.is_cross_origin(&event.href) {
            return ClickOutcome::Ignored(IgnoreReason::CrossOrigin);
        }
        if self.mode() != Mode::Hash && self.is_hash_only_change(&event.href) {
            return ClickOutcome::Ignored(IgnoreReason::HashOnlyChange);
        }
        if event.target.as_deref().is_some_and(|t| !t.is_empty()) {
            return ClickOutcome::Ignored(IgnoreReason::HasTarget);
        }
        if event.default_prevented {
            return ClickOutcome::Ignored(IgnoreReason::DefaultPrevented);
        }

        // In hash mode the navigable location is the href's fragment.
        let location = if self.mode() == Mode::Hash {
            event
                .href
                .split_once('#')
                .map_or(event.href.as_str(), |(_, fragment)| fragment)
        } else {
            event.href.as_str()
        };
        self.redirect(location).await;
        ClickOutcome::Intercepted
    }

    /// The location the router should consider current: the hash fragment
    /// in hash mode, the driver's path and query otherwise.
    pub(crate) fn current_location(&self) -> String {
        let driver = lock(&self.driver);
        match self.mode() {
            Mode::Hash => {
                let hash = driver.hash();
                if hash.is_empty() {
                    "/".to_string()
                } else {
                    hash
                }
            }
            Mode::History => driver.location(),
        }
    }

    /// An href is cross-origin when it parses as an absolute URL whose
    /// scheme or host differs from the configured origin. Relative hrefs
    /// are always same-origin; absolute hrefs with no configured origin
    /// cannot be verified and are left to the host.
    fn is_cross_origin(&self, href: &str) -> bool {
        let Ok(target) = Url::parse(href) else {
            return false;
        };
        self.origin.as_ref().is_none_or(|origin| {
            target.scheme() != origin.scheme() || target.host_str() != origin.host_str()
        })
    }

    /// Whether `href` points at the current path and query and differs
    /// only by its fragment.
    fn is_hash_only_change(&self, href: &str) -> bool {
        let Some((head, _fragment)) = href.split_once('#') else {
            return false;
        };
        let current = self.current_location();
        normalize(head, self.base(), false) == normalize(&current, self.base(), false)
    }
}
