use anyhow::{bail, Result};

use viewcache::config::ViewCacheConfig;

use super::local_cache;

pub fn cmd_check(config: &ViewCacheConfig, views: &[String]) -> Result<()> {
    let cache = local_cache(config);
    let mut failed = 0;

    for view_path in views {
        match cache.get(view_path) {
            Ok(view) => println!(
                "✓ {}  model: {}  {}",
                view.key(),
                view.model_type(),
                view.fingerprint().short()
            ),
            Err(err) => {
                failed += 1;
                println!("✗ {}: {}", cache.resolve_path(view_path), err);
            }
        }
    }

    if failed > 0 {
        bail!("{failed} of {} views failed to compile", views.len());
    }
    Ok(())
}
