//! The router context object and its transition engine.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use rudder_history::{HistoryDriver, Mode};

use crate::error::{HookPhase, Result, RouterError};
use crate::hooks::{Hook, RouteRef, Transition};
use crate::params::{params_for, query_for, QueryValue};
use crate::path::normalize;
use crate::route::{ActiveRoute, Route, RouteConfig, RouteTable};

/// Router-wide settings, fixed at construction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouterConfig {
    /// Navigation mode. Default: auto-detected from the driver.
    #[serde(default)]
    pub mode: Option<Mode>,
    /// Prefix stripped from every location before matching. Default: none.
    #[serde(default)]
    pub base: String,
    /// Origin the link-click filter treats as same-origin, e.g.
    /// `https://app.example.com`. Default: none, so absolute hrefs are
    /// never intercepted.
    #[serde(default)]
    pub origin: Option<String>,
}

/// Mutable navigation state, guarded by the router's locks.
#[derive(Debug, Default)]
pub(crate) struct NavState {
    pub(crate) active: Option<ActiveRoute>,
    pub(crate) prevent: bool,
    pub(crate) attached: usize,
}

/// An explicit router context: route table, hooks, navigation state, and
/// the history backend, owned together by one value.
///
/// All mutation goes through `&self`; interior locks keep the pieces
/// consistent and an async gate serializes transitions in arrival order, so
/// a navigation request issued while another one's hooks are still running
/// waits its turn instead of interleaving.
///
/// # Example
///
/// ```
/// use rudder_history::MemoryHistory;
/// use rudder_router::{RouteConfig, Router};
///
/// # futures::executor::block_on(async {
/// let router = Router::new(Box::new(MemoryHistory::new()));
/// router.add(RouteConfig::new("/users/:id")).unwrap();
///
/// router.change("/users/42?active=true", false).await;
/// assert_eq!(router.param("id"), Some("42".to_string()));
/// # });
/// ```
pub struct Router {
    pub(crate) table: Mutex<RouteTable>,
    before: Mutex<Vec<Arc<dyn Hook>>>,
    after: Mutex<Vec<Arc<dyn Hook>>>,
    pub(crate) nav: Mutex<NavState>,
    pub(crate) driver: Mutex<Box<dyn HistoryDriver>>,
    gate: futures::lock::Mutex<()>,
    mode: Mode,
    base: String,
    pub(crate) origin: Option<Url>,
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("mode", &self.mode)
            .field("base", &self.base)
            .field("origin", &self.origin)
            .finish_non_exhaustive()
    }
}

/// Locks a guard, recovering the data from a poisoned lock.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Router {
    /// Creates a router with default configuration: mode auto-detected from
    /// the driver, no base prefix, no origin.
    #[must_use]
    pub fn new(driver: Box<dyn HistoryDriver>) -> Self {
        let mode = Mode::detect(driver.as_ref());
        Self::build(driver, mode, String::new(), None)
    }

    /// Creates a router from an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidOrigin`] when `config.origin` is not a
    /// parseable absolute URL.
    pub fn with_config(driver: Box<dyn HistoryDriver>, config: RouterConfig) -> Result<Self> {
        let origin = config
            .origin
            .map(|raw| Url::parse(&raw).map_err(|_| RouterError::InvalidOrigin(raw)))
            .transpose()?;
        let mode = config
            .mode
            .unwrap_or_else(|| Mode::detect(driver.as_ref()));
        Ok(Self::build(driver, mode, config.base, origin))
    }

    fn build(
        driver: Box<dyn HistoryDriver>,
        mode: Mode,
        base: String,
        origin: Option<Url>,
    ) -> Self {
        debug!(%mode, %base, "router created");
        Self {
            table: Mutex::new(RouteTable::new(base.clone())),
            before: Mutex::new(Vec::new()),
            after: Mutex::new(Vec::new()),
            nav: Mutex::new(NavState::default()),
            driver: Mutex::new(driver),
            gate: futures::lock::Mutex::new(()),
            mode,
            base,
            origin,
        }
    }

    /// Registers a route. Insertion order is the match-priority order.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidTemplate`] when the definition fails
    /// validation.
    pub fn add(&self, config: RouteConfig) -> Result<()> {
        lock(&self.table).register(config)
    }

    /// Appends a hook run before every commit. Hooks are never removed.
    pub fn before_change(&self, hook: impl Hook + 'static) {
        lock(&self.before).push(Arc::new(hook));
    }

    /// Appends a hook run after every commit. Hooks are never removed.
    pub fn after_change(&self, hook: impl Hook + 'static) {
        lock(&self.after).push(Arc::new(hook));
    }

    /// The navigation mode this router runs in.
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The base prefix stripped from every location.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Drives one navigation attempt, swallowing failures.
    ///
    /// This is the fire-and-forget entry point used by event-driven callers
    /// (pop events, link clicks): any pipeline error is logged as a warning
    /// and never propagates. Use [`Router::try_change`] to observe the
    /// outcome.
    pub async fn change(&self, location: &str, replace: bool) {
        if let Err(error) = self.try_change(location, replace).await {
            warn!(location, %error, "navigation aborted");
        }
    }

    /// Drives one navigation attempt: before-hooks, commit, after-hooks.
    ///
    /// `replace` marks a transition that writes the new location to the
    /// history backend; pop-event-driven transitions leave it unset since
    /// the backend already moved.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::HookFailed`] when a hook fails (the active
    /// route is left unchanged if a before-hook failed) and
    /// [`RouterError::Decode`] when the location's parameters or query fail
    /// to decode. In both cases the remaining hooks of the failing phase do
    /// not run.
    pub async fn try_change(&self, location: &str, replace: bool) -> Result<()> {
        let _serialized = self.gate.lock().await;

        // Query kept: extraction needs it after the match.
        let location = normalize(location, &self.base, false);
        debug!(%location, replace, "transition started");

        let (transition, matched) = {
            let table = lock(&self.table);
            let matched = table.find(&location).cloned();
            let next = matched.as_ref().map(route_ref);
            let previous = lock(&self.nav).active.as_ref().map(active_ref);
            (
                Transition {
                    previous,
                    next,
                    location: location.clone(),
                    replace,
                },
                matched,
            )
        };

        self.run_hooks(HookPhase::Before, &transition).await?;
        self.commit(&transition, matched)?;
        // The source ran its after loop around the commit twice; that is
        // treated as unintended duplication, so after-hooks run exactly
        // once, post-commit.
        self.run_hooks(HookPhase::After, &transition).await?;
        Ok(())
    }

    /// Commit phase: write history if asked, then install the new active
    /// route (or clear it when nothing matched).
    fn commit(&self, transition: &Transition, matched: Option<Route>) -> Result<()> {
        if transition.replace {
            lock(&self.nav).prevent = true;
            {
                let mut driver = lock(&self.driver);
                match self.mode {
                    Mode::History => driver.push(&transition.location),
                    Mode::Hash => driver.set_hash(&transition.location),
                }
            }
            lock(&self.nav).prevent = false;
        }

        match matched {
            None => {
                // No match is a valid terminal state, not an error.
                lock(&self.nav).active = None;
                debug!(location = %transition.location, "no route matched");
            }
            Some(route) => {
                let query = query_for(&transition.location)?;
                let params = params_for(&transition.location, route.pattern(), &self.base)?;
                let active = ActiveRoute::new(
                    route.path().to_string(),
                    route.name().map(str::to_string),
                    params,
                    query,
                );
                debug!(path = route.path(), "route activated");
                lock(&self.nav).active = Some(active);
            }
        }
        Ok(())
    }

    async fn run_hooks(&self, phase: HookPhase, cx: &Transition) -> Result<()> {
        let hooks: Vec<Arc<dyn Hook>> = match phase {
            HookPhase::Before => lock(&self.before).clone(),
            HookPhase::After => lock(&self.after).clone(),
        };
        for hook in hooks {
            hook.call(cx)
                .await
                .map_err(|error| RouterError::HookFailed {
                    phase,
                    message: error.to_string(),
                })?;
        }
        Ok(())
    }

    /// Returns a snapshot of the active route, or `None` when no registered
    /// route matches the current location.
    #[must_use]
    pub fn active(&self) -> Option<ActiveRoute> {
        lock(&self.nav).active.clone()
    }

    /// Returns one decoded parameter of the active route.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<String> {
        lock(&self.nav)
            .active
            .as_ref()
            .and_then(|active| active.param(name).map(str::to_string))
    }

    /// Returns the active route's full parameter mapping (empty when no
    /// route is active).
    #[must_use]
    pub fn params(&self) -> HashMap<String, String> {
        lock(&self.nav)
            .active
            .as_ref()
            .map(|active| active.params().clone())
            .unwrap_or_default()
    }

    /// Returns one query value of the active route.
    #[must_use]
    pub fn query(&self, name: &str) -> Option<QueryValue> {
        lock(&self.nav)
            .active
            .as_ref()
            .and_then(|active| active.query(name).cloned())
    }

    /// Returns the active route's full query mapping (empty when no route
    /// is active).
    #[must_use]
    pub fn query_map(&self) -> HashMap<String, QueryValue> {
        lock(&self.nav)
            .active
            .as_ref()
            .map(|active| active.query_map().clone())
            .unwrap_or_default()
    }

    /// Returns the active route's template with parameter values
    /// substituted, or `None` when no route is active.
    #[must_use]
    pub fn location(&self) -> Option<String> {
        lock(&self.nav)
            .active
            .as_ref()
            .map(ActiveRoute::location)
    }

    /// Builds a concrete path for the named route from the given
    /// parameters. Returns `None` for an unknown name or missing values.
    #[must_use]
    pub fn url_for(&self, name: &str, params: &HashMap<String, String>) -> Option<String> {
        lock(&self.table)
            .by_name(name)
            .and_then(|route| route.pattern().reverse(params))
    }
}

fn route_ref(route: &Route) -> RouteRef {
    RouteRef {
        path: route.path().to_string(),
        name: route.name().map(str::to_string),
    }
}

fn active_ref(active: &ActiveRoute) -> RouteRef {
    RouteRef {
        path: active.path().to_string(),
        name: active.name().map(str::to_string),
    }
}
