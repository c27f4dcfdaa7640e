//! Per-key single-flight gates
//!
//! Each key being loaded gets its own mutex. Callers for the same key queue
//! on it; callers for other keys never touch it. A gate is dropped from the
//! table once the last holder leaves, so keys that fail to load (arbitrary
//! user paths, typically) do not accumulate.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

type Gate = Arc<Mutex<()>>;

#[derive(Debug, Default)]
pub(crate) struct SingleFlight {
    gates: Mutex<HashMap<String, Gate>>,
}

impl SingleFlight {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Run `work` while holding the gate for `key`
    pub(crate) fn run<T>(&self, key: &str, work: impl FnOnce() -> T) -> T {
        let ticket = self.ticket(key);
        let _held = ticket.gate.lock().unwrap_or_else(PoisonError::into_inner);
        work()
    }

    /// Number of gates currently allocated
    pub(crate) fn in_flight(&self) -> usize {
        self.table().len()
    }

    fn ticket<'a>(&'a self, key: &'a str) -> Ticket<'a> {
        let gate = self
            .table()
            .entry(key.to_string())
            .or_default()
            .clone();
        Ticket {
            flights: self,
            key,
            gate,
        }
    }

    fn table(&self) -> MutexGuard<'_, HashMap<String, Gate>> {
        self.gates.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A caller's claim on a gate; releases the table slot on drop
struct Ticket<'a> {
    flights: &'a SingleFlight,
    key: &'a str,
    gate: Gate,
}

impl Drop for Ticket<'_> {
    fn drop(&mut self) {
        let mut table = self.flights.table();
        // Clones are only handed out under the table lock, so the count is
        // stable here: the table's copy plus ours means nobody else waits.
        let last_holder = table
            .get(self.key)
            .is_some_and(|gate| Arc::ptr_eq(gate, &self.gate) && Arc::strong_count(gate) == 2);
        if last_holder {
            table.remove(self.key);
        }
    }
}
