use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};

use viewcache::config::ViewCacheConfig;
use viewcache::{CacheEvent, ViewRuntime};

use super::local_cache;

pub fn cmd_watch(config: &ViewCacheConfig, views: &[String], json: bool) -> Result<()> {
    let config = config.clone().with_watch(true);

    let cache = local_cache(&config);
    cache.set_observer(move |event| {
        if json {
            println!("{}", event.to_json());
        } else {
            let line = format!("[{}] {}", timestamp(), describe(event));
            match event {
                CacheEvent::RefreshFailed { .. } | CacheEvent::WatchUnavailable { .. } => {
                    eprintln!("{line}")
                }
                _ => println!("{line}"),
            }
        }
    });

    // Set up Ctrl+C handler
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = running.clone();
    ctrlc::set_handler(move || {
        running_clone.store(false, Ordering::SeqCst);
    })
    .context("Error setting Ctrl+C handler")?;

    let runtime = ViewRuntime::from_cache(&config, cache);

    for view_path in views {
        if let Err(err) = runtime.cache().get(view_path) {
            eprintln!("✗ {}: {}", runtime.cache().resolve_path(view_path), err);
        }
    }

    while running.load(Ordering::SeqCst) {
        thread::sleep(Duration::from_millis(100));
    }

    runtime.shutdown();
    Ok(())
}

fn describe(event: &CacheEvent) -> String {
    match event {
        CacheEvent::ViewCompiled {
            key, model_type, ..
        } => format!("compiled {key} (model: {model_type})"),
        CacheEvent::ViewRefreshed {
            key, generation, ..
        } => format!("refreshed {key} (generation {generation})"),
        CacheEvent::RefreshFailed { key, message } => {
            format!("refresh failed for {key}, keeping previous version: {message}")
        }
        CacheEvent::InvalidationIgnored { key } => format!("not cached, ignored {key}"),
        CacheEvent::WatchStarted { root, suffix } => format!("watching {root} for *{suffix}"),
        CacheEvent::WatchUnavailable { root, message } => {
            format!("cannot watch {root}: {message}")
        }
    }
}

fn timestamp() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| {
            let secs = d.as_secs() % 86_400;
            format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
        })
        .unwrap_or_else(|_| "00:00:00".to_string())
}
