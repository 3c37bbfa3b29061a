//! Transition hooks.

use std::future::Future;

use futures::future::BoxFuture;

/// Error type a hook may fail with.
pub type HookError = Box<dyn std::error::Error + Send + Sync>;

/// Outcome of a single hook invocation.
pub type HookResult = std::result::Result<(), HookError>;

/// Cheap summary of a registered route, carried by [`Transition`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRef {
    /// The route's canonical template.
    pub path: String,
    /// The route's name, if any.
    pub name: Option<String>,
}

/// Context for one navigation attempt, passed to every hook.
///
/// `previous` is the route that was active when the attempt started; `next`
/// is the match result for the target location (`None` when nothing
/// matches); `replace` says whether this transition writes a history entry.
#[derive(Debug, Clone)]
pub struct Transition {
    /// Route active before the attempt.
    pub previous: Option<RouteRef>,
    /// Match result for the target location.
    pub next: Option<RouteRef>,
    /// Normalized target location, query included.
    pub location: String,
    /// Whether this transition writes to history.
    pub replace: bool,
}

/// A before- or after-navigation hook.
///
/// Hooks run sequentially in registration order and may suspend; a slow hook
/// delays every later hook and the commit. A failing before-hook aborts the
/// whole attempt.
///
/// Closures are usually more convenient than hand-written impls; see
/// [`hook_fn`].
pub trait Hook: Send + Sync {
    /// Runs the hook against the in-flight transition.
    fn call<'a>(&'a self, cx: &'a Transition) -> BoxFuture<'a, HookResult>;
}

struct FnHook<F>(F);

impl<F, Fut> Hook for FnHook<F>
where
    F: Fn(Transition) -> Fut + Send + Sync,
    Fut: Future<Output = HookResult> + Send + 'static,
{
    fn call<'a>(&'a self, cx: &'a Transition) -> BoxFuture<'a, HookResult> {
        Box::pin((self.0)(cx.clone()))
    }
}

/// Wraps an async closure as a [`Hook`].
///
/// # Example
///
/// ```
/// use rudder_router::hook_fn;
///
/// let hook = hook_fn(|cx| async move {
///     println!("navigating to {}", cx.location);
///     Ok(())
/// });
/// # let _ = hook;
/// ```
pub fn hook_fn<F, Fut>(f: F) -> impl Hook
where
    F: Fn(Transition) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HookResult> + Send + 'static,
{
    FnHook(f)
}
