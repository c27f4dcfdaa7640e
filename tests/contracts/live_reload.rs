//! Live reload contracts: a real watcher driving a real cache

use std::sync::{Arc, Mutex};

use serde_json::json;

use viewcache::{CacheEvent, ViewCacheConfig, ViewRuntime};

use crate::common::*;

fn runtime(env: &TestEnv) -> ViewRuntime {
    ViewRuntime::with_defaults(&ViewCacheConfig::new(env.root.path()))
}

fn render(runtime: &ViewRuntime, view: &str) -> Option<String> {
    let view = runtime.cache().get(view).ok()?;
    view.render(&json!({"Name": "Ada"})).ok()
}

/// CONTRACT: Editing a resident view is picked up without a restart.
#[test]
fn contract_edit_refreshes_resident_view() {
    let env = TestEnv::new().with_view("views/hello.tpl", HELLO_VIEW);
    let runtime = runtime(&env);
    assert!(runtime.is_watching());
    assert_eq!(
        render(&runtime, "views/hello.tpl").as_deref(),
        Some("<p>Hello, Ada!</p>\n")
    );

    env.write_view("views/hello.tpl", HELLO_VIEW_V2);

    assert!(wait_until(WATCH_TIMEOUT, || {
        render(&runtime, "views/hello.tpl").as_deref() == Some("<h1>Hello, Ada!</h1>\n")
    }));
    runtime.shutdown();
}

/// CONTRACT: A broken edit keeps serving the last good view, and fixing
/// the file recovers.
#[test]
fn contract_broken_edit_keeps_last_good_view() {
    let env = TestEnv::new().with_view("views/hello.tpl", HELLO_VIEW);
    let runtime = runtime(&env);
    let events: Arc<Mutex<Vec<CacheEvent>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();
    runtime
        .cache()
        .set_observer(move |event| sink.lock().unwrap().push(event.clone()));
    let good = runtime.cache().get("views/hello.tpl").unwrap();

    env.write_view("views/hello.tpl", BROKEN_VIEW);
    assert!(wait_until(WATCH_TIMEOUT, || {
        events
            .lock()
            .unwrap()
            .iter()
            .any(|e| matches!(e, CacheEvent::RefreshFailed { .. }))
    }));
    assert!(Arc::ptr_eq(
        &runtime.cache().get("views/hello.tpl").unwrap(),
        &good
    ));

    env.write_view("views/hello.tpl", HELLO_VIEW_V2);
    assert!(wait_until(WATCH_TIMEOUT, || {
        render(&runtime, "views/hello.tpl").as_deref() == Some("<h1>Hello, Ada!</h1>\n")
    }));
    runtime.shutdown();
}

/// CONTRACT: Files that are not resident, or do not carry the view suffix,
/// never populate the cache.
#[test]
fn contract_unrelated_changes_do_not_populate_cache() {
    let env = TestEnv::new().with_view("views/hello.tpl", HELLO_VIEW);
    let runtime = runtime(&env);
    let events: Arc<Mutex<Vec<CacheEvent>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();
    runtime
        .cache()
        .set_observer(move |event| sink.lock().unwrap().push(event.clone()));

    env.write_view("views/other.tpl", DYNAMIC_VIEW);
    env.write_view("views/notes.txt", "not a view");

    let other_key = env.key("views/other.tpl");
    assert!(wait_until(WATCH_TIMEOUT, || {
        events
            .lock()
            .unwrap()
            .iter()
            .any(|e| e.key() == Some(other_key.as_str()))
    }));

    assert!(runtime.cache().is_empty());
    assert!(events
        .lock()
        .unwrap()
        .iter()
        .all(|e| matches!(e, CacheEvent::InvalidationIgnored { .. })));
    runtime.shutdown();
}

/// CONTRACT: A deleted view keeps being served from memory.
#[test]
fn contract_deleted_view_still_served() {
    let env = TestEnv::new().with_view("views/hello.tpl", HELLO_VIEW);
    let runtime = runtime(&env);
    let view = runtime.cache().get("views/hello.tpl").unwrap();

    env.remove_view("views/hello.tpl");
    std::thread::sleep(std::time::Duration::from_millis(300));

    assert!(Arc::ptr_eq(
        &runtime.cache().get("views/hello.tpl").unwrap(),
        &view
    ));
    runtime.shutdown();
}

/// CONTRACT: A root that cannot be watched degrades to a plain cache.
#[test]
fn contract_unwatchable_root_still_serves_views() {
    let env = TestEnv::new();
    let config = ViewCacheConfig::new(env.path("missing"));

    let runtime = ViewRuntime::with_defaults(&config);

    assert!(!runtime.is_watching());
    assert!(runtime.watch_error().is_some());
    assert!(runtime.cache().get("a.tpl").unwrap_err().is_not_found());
}
