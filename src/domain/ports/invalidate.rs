//! Invalidate port - where change notifications are delivered
//!
//! The watcher adapter only knows this trait, so tests can observe routed
//! keys without a real cache behind them.

/// Receives "this key may be stale" signals
pub trait Invalidate: Send + Sync {
    /// Handle a possibly-stale normalized path. Must not fail.
    fn invalidate(&self, key: &str);
}

impl<F> Invalidate for F
where
    F: Fn(&str) + Send + Sync,
{
    fn invalidate(&self, key: &str) {
        self(key)
    }
}
