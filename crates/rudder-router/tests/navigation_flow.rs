//! End-to-end navigation scenarios over an in-memory history.
//!
//! These tests drive the public surface the way a host would: register
//! routes, attach events, then mix imperative navigation, history
//! traversal, and intercepted link clicks.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use rudder_history::MemoryHistory;
use rudder_router::{hook_fn, LinkEvent, QueryValue, RouteConfig, Router, RouterConfig};

fn app_router() -> Router {
    let config = RouterConfig {
        origin: Some("https://app.example.com".to_string()),
        ..RouterConfig::default()
    };
    let router = Router::with_config(Box::new(MemoryHistory::new()), config).unwrap();
    router.add(RouteConfig::new("/").name("home")).unwrap();
    router
        .add(RouteConfig::new("/users/:id").name("user"))
        .unwrap();
    router
        .add(RouteConfig::new("/users/:id/posts/:post").name("post"))
        .unwrap();
    router.attach_events();
    router
}

#[tokio::test]
async fn test_browsing_session() {
    let router = app_router();

    router.redirect("/users/17?tab=posts").await;
    assert_eq!(router.param("id"), Some("17".to_string()));
    assert_eq!(
        router.query("tab"),
        Some(QueryValue::Value("posts".to_string()))
    );

    let outcome = router
        .on_link_click(&LinkEvent::new("https://app.example.com/users/17/posts/4"))
        .await;
    assert!(outcome.is_intercepted());
    let active = router.active().unwrap();
    assert_eq!(active.name(), Some("post"));
    assert_eq!(active.param("post"), Some("4"));

    router.back().await;
    assert_eq!(router.location(), Some("/users/17".to_string()));
    router.forward().await;
    assert_eq!(router.param("post"), Some("4".to_string()));
}

#[tokio::test]
async fn test_hooks_observe_every_committed_transition() {
    let router = app_router();
    let log: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));

    let sink = Arc::clone(&log);
    router.after_change(hook_fn(move |cx| {
        let sink = Arc::clone(&sink);
        async move {
            let target = cx.next.as_ref().map_or("(none)", |next| next.path.as_str());
            sink.lock().unwrap().push(target.to_string());
            Ok(())
        }
    }));

    router.redirect("/users/1").await;
    router.redirect("/lost/and/found").await;
    router.redirect("/users/2").await;

    assert_eq!(
        *log.lock().unwrap(),
        ["/users/:id", "(none)", "/users/:id"]
    );
    // The unmatched location cleared the active route along the way.
    assert_eq!(router.param("id"), Some("2".to_string()));
}

#[tokio::test]
async fn test_guard_hook_blocks_navigation() {
    let router = app_router();
    router.redirect("/users/1").await;

    router.before_change(hook_fn(|cx| async move {
        if cx.next.as_ref().is_some_and(|next| next.path.contains("posts")) {
            return Err("posts are closed".into());
        }
        Ok(())
    }));

    router.redirect("/users/1/posts/9").await;
    // The guard aborted the attempt; the active route is unchanged.
    assert_eq!(router.location(), Some("/users/1".to_string()));

    router.redirect("/users/2").await;
    assert_eq!(router.location(), Some("/users/2".to_string()));
}

#[tokio::test]
async fn test_route_table_loaded_from_config() {
    let raw = r#"[
        {"path": "/"},
        {"path": "/articles/:slug", "name": "article", "meta": {"section": "news"}}
    ]"#;
    let configs: Vec<RouteConfig> = serde_json::from_str(raw).unwrap();

    let router = Router::new(Box::new(MemoryHistory::new()));
    for config in configs {
        router.add(config).unwrap();
    }

    router.change("/articles/launch-day", false).await;
    assert_eq!(router.param("slug"), Some("launch-day".to_string()));

    let params: HashMap<String, String> = [("slug".to_string(), "next".to_string())]
        .into_iter()
        .collect();
    assert_eq!(
        router.url_for("article", &params),
        Some("/articles/next".to_string())
    );
}
