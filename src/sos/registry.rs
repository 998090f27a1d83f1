//! Registry of open SOS requests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::task::JoinHandle;

use crate::sos::request::SosRequest;

/// One registered request plus its concurrency state.
///
/// `state` is the only fine-grained lock in the subsystem: it serializes the
/// read-modify-propagate sequences of join, leave and teardown for this
/// request. The teardown timer slot holds at most one live task.
pub struct ActiveSos {
    pub state: tokio::sync::Mutex<SosRequest>,
    teardown_timer: Mutex<Option<JoinHandle<()>>>,
}

impl ActiveSos {
    fn new(request: SosRequest) -> Self {
        Self {
            state: tokio::sync::Mutex::new(request),
            teardown_timer: Mutex::new(None),
        }
    }

    /// Cancels a pending teardown timer, if any.
    ///
    /// Safe to call when no timer exists or when the timer already fired; an
    /// abort that lands after the timer task started tearing down is covered
    /// by teardown's own occupancy re-check and the periodic sweep.
    pub fn cancel_teardown_timer(&self) {
        if let Some(handle) = self.teardown_timer.lock().unwrap().take() {
            handle.abort();
        }
    }

    /// Arms the teardown timer unless a live one already exists.
    ///
    /// The spawn closure is only invoked while holding the slot lock, so two
    /// concurrent leave events can never both schedule a timer.
    ///
    /// # Returns
    /// - `true` - The timer was armed
    /// - `false` - A live timer already existed
    pub fn arm_teardown_timer(&self, spawn: impl FnOnce() -> JoinHandle<()>) -> bool {
        let mut slot = self.teardown_timer.lock().unwrap();

        match slot.as_ref() {
            Some(handle) if !handle.is_finished() => false,
            _ => {
                *slot = Some(spawn());
                true
            }
        }
    }
}

/// Map of reserved channel id -> open request.
///
/// Inserts and removes are atomic with respect to lookups; an event handler
/// either sees a fully initialized request or none at all. Teardown is the
/// only remover.
pub struct SosRegistry {
    requests: Mutex<HashMap<u64, Arc<ActiveSos>>>,
}

impl SosRegistry {
    pub fn new() -> Self {
        Self {
            requests: Mutex::new(HashMap::new()),
        }
    }

    /// Registers a fully initialized request.
    pub fn insert(&self, request: SosRequest) -> Arc<ActiveSos> {
        let channel_id = request.channel_id;
        let active = Arc::new(ActiveSos::new(request));

        self.requests
            .lock()
            .unwrap()
            .insert(channel_id, active.clone());

        active
    }

    pub fn get(&self, channel_id: u64) -> Option<Arc<ActiveSos>> {
        self.requests.lock().unwrap().get(&channel_id).cloned()
    }

    /// Removes a request from the registry.
    ///
    /// # Returns
    /// - `Some(ActiveSos)` - The removed request; the caller owns teardown
    /// - `None` - Already removed; someone else completed teardown
    pub fn remove(&self, channel_id: u64) -> Option<Arc<ActiveSos>> {
        self.requests.lock().unwrap().remove(&channel_id)
    }

    /// Snapshot of all currently open requests.
    pub fn snapshot(&self) -> Vec<Arc<ActiveSos>> {
        self.requests.lock().unwrap().values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for SosRegistry {
    fn default() -> Self {
        Self::new()
    }
}
