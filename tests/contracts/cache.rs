//! View cache contracts over the real filesystem loader

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use serde_json::json;

use viewcache::domain::ports::LoadResult;
use viewcache::{
    DirectiveCompiler, Invalidate, LocalViewLoader, ModelType, ViewCache, ViewCacheConfig,
    ViewCacheError, ViewLoader,
};

use crate::common::*;

fn local_cache(env: &TestEnv) -> ViewCache {
    let config = ViewCacheConfig::new(env.root.path()).with_watch(false);
    ViewCache::new(
        &config,
        LocalViewLoader::with_root(env.root.path()),
        DirectiveCompiler::new(),
    )
}

/// Loader wrapper counting reads
fn counting_cache(env: &TestEnv) -> (Arc<ViewCache>, Arc<AtomicUsize>) {
    let config = ViewCacheConfig::new(env.root.path()).with_watch(false);
    let inner = LocalViewLoader::with_root(env.root.path());
    let loads = Arc::new(AtomicUsize::new(0));
    let counter = loads.clone();
    let loader = move |path: &str| -> LoadResult<String> {
        counter.fetch_add(1, Ordering::SeqCst);
        thread::sleep(std::time::Duration::from_millis(10));
        inner.load(path)
    };
    let cache = ViewCache::new(&config, loader, DirectiveCompiler::new());
    (Arc::new(cache), loads)
}

/// CONTRACT: Equivalent spellings of a path are one cache entry.
mod normalization {
    use super::*;

    #[test]
    fn contract_equivalent_paths_share_one_view() {
        let env = TestEnv::new().with_view("Views/Home/Index.tpl", HELLO_VIEW);
        let cache = local_cache(&env);

        let a = cache.get("Views/Home/Index.tpl").unwrap();
        let b = cache.get("/views/home/index.tpl").unwrap();
        let c = cache.get("\\VIEWS\\HOME\\INDEX.TPL").unwrap();

        assert!(Arc::ptr_eq(&a, &b));
        assert!(Arc::ptr_eq(&a, &c));
        assert_eq!(cache.len(), 1);
        assert_eq!(a.key(), env.key("views/home/index.tpl"));
    }

    #[test]
    fn contract_resolved_key_is_accepted_as_input() {
        let env = TestEnv::new().with_view("a.tpl", DYNAMIC_VIEW);
        let cache = local_cache(&env);

        let key = cache.resolve_path("a.tpl");
        let view = cache.get(&key).unwrap();

        assert_eq!(view.key(), key);
        assert_eq!(cache.resolve_path(&key), key);
    }
}

/// CONTRACT: A view is compiled once, and only failures are retried.
mod memoization {
    use super::*;

    #[test]
    fn contract_concurrent_first_access_loads_once() {
        let env = TestEnv::new().with_view("hello.tpl", HELLO_VIEW);
        let (cache, loads) = counting_cache(&env);
        let barrier = Arc::new(Barrier::new(16));

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let cache = cache.clone();
                let barrier = barrier.clone();
                thread::spawn(move || {
                    barrier.wait();
                    cache.get("hello.tpl").unwrap()
                })
            })
            .collect();
        let views: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(loads.load(Ordering::SeqCst), 1);
        assert!(views.iter().all(|v| Arc::ptr_eq(v, &views[0])));
    }

    #[test]
    fn contract_failures_are_not_cached() {
        let env = TestEnv::new().with_view("hello.tpl", BROKEN_VIEW);
        let cache = local_cache(&env);

        let err = cache.get("hello.tpl").unwrap_err();
        assert!(matches!(err, ViewCacheError::Compile { .. }));
        assert!(cache.is_empty());

        env.write_view("hello.tpl", HELLO_VIEW);
        let view = cache.get("hello.tpl").unwrap();
        assert_eq!(view.model_type(), &ModelType::named("Greeting"));
    }

    #[test]
    fn contract_missing_view_is_not_found() {
        let env = TestEnv::new();
        let cache = local_cache(&env);

        let err = cache.get("nope.tpl").unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(err.key(), Some(env.key("nope.tpl").as_str()));
    }
}

/// CONTRACT: Invalidation refreshes resident views only, and a failed
/// refresh keeps the previous view.
mod invalidation {
    use super::*;

    #[test]
    fn contract_invalidate_non_resident_does_not_load() {
        let env = TestEnv::new().with_view("hello.tpl", HELLO_VIEW);
        let (cache, loads) = counting_cache(&env);

        cache.invalidate(&env.key("hello.tpl"));

        assert_eq!(loads.load(Ordering::SeqCst), 0);
        assert!(cache.is_empty());
    }

    #[test]
    fn contract_invalidate_picks_up_new_content() {
        let env = TestEnv::new().with_view("hello.tpl", HELLO_VIEW);
        let cache = local_cache(&env);
        let before = cache.get("hello.tpl").unwrap();

        env.write_view("hello.tpl", HELLO_VIEW_V2);
        cache.invalidate(before.key());
        let after = cache.get("hello.tpl").unwrap();

        assert!(!after.same_artifact(&before));
        assert_eq!(
            after.render(&json!({"Name": "Ada"})).unwrap(),
            "<h1>Hello, Ada!</h1>\n"
        );
    }

    #[test]
    fn contract_failed_refresh_keeps_previous_view() {
        let env = TestEnv::new().with_view("hello.tpl", HELLO_VIEW);
        let cache = local_cache(&env);
        let before = cache.get("hello.tpl").unwrap();

        env.write_view("hello.tpl", BROKEN_VIEW);
        cache.invalidate(before.key());
        assert!(Arc::ptr_eq(&cache.get("hello.tpl").unwrap(), &before));

        env.remove_view("hello.tpl");
        cache.invalidate(before.key());
        assert!(Arc::ptr_eq(&cache.get("hello.tpl").unwrap(), &before));

        assert_eq!(cache.stats().refresh_failures, 2);
    }
}
