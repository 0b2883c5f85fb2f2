//! Ownership of the single `PlayerState` and its trip to and from a backend.
//!
//! Persistence is best-effort: a failed write is logged and the in-memory state
//! stays authoritative. Loading never fails; missing, corrupt or partial saves
//! are merged field by field onto the default template.

use log::{debug, warn};
use serde_json::{Map, Value};

use crate::game::backends::SaveBackend;
use crate::game::types::PlayerState;

/// Callback invoked after every save and reset with the fresh state.
pub type Listener = Box<dyn FnMut(&PlayerState)>;

pub struct StateStore {
    backend: Box<dyn SaveBackend>,
    state: PlayerState,
    listeners: Vec<Listener>,
}

impl StateStore {
    /// Wrap a backend and load whatever it currently holds.
    pub fn open<B: SaveBackend + 'static>(backend: B) -> Self {
        Self::open_boxed(Box::new(backend))
    }

    pub fn open_boxed(backend: Box<dyn SaveBackend>) -> Self {
        let state = load_state(backend.as_ref());
        Self {
            backend,
            state,
            listeners: Vec::new(),
        }
    }

    /// Re-read the backend, replacing the in-memory state. Listeners are not
    /// notified since nothing was saved.
    pub fn load(&mut self) -> &PlayerState {
        self.state = load_state(self.backend.as_ref());
        &self.state
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub(crate) fn state_mut(&mut self) -> &mut PlayerState {
        &mut self.state
    }

    /// Replace the state wholesale, persist it and notify listeners.
    pub fn save(&mut self, state: PlayerState) {
        self.state = state;
        self.persist();
    }

    /// Persist the current state and notify listeners.
    pub fn persist(&mut self) {
        match serde_json::to_string(&self.state) {
            Ok(raw) => {
                if let Err(e) = self.backend.write_raw(&raw) {
                    warn!("failed to persist save: {}", e);
                }
            }
            Err(e) => warn!("failed to serialize save: {}", e),
        }
        self.notify();
    }

    /// Back to the template, wiping persisted data.
    pub fn reset(&mut self) {
        self.state = PlayerState::default();
        if let Err(e) = self.backend.clear() {
            warn!("failed to clear save: {}", e);
        }
        self.notify();
    }

    /// Register a callback for every subsequent save and reset. Callbacks run
    /// in registration order.
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&PlayerState) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn notify(&mut self) {
        for listener in self.listeners.iter_mut() {
            listener(&self.state);
        }
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Read and merge a save from `backend`. Unreadable data yields the template.
pub fn load_state(backend: &dyn SaveBackend) -> PlayerState {
    let raw = match backend.read_raw() {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!("no save found, starting from template");
            return PlayerState::default();
        }
        Err(e) => {
            warn!("failed to read save, starting from template: {}", e);
            return PlayerState::default();
        }
    };

    let mut state = merge_saved(&raw);
    if state.repair() {
        warn!("save contained inconsistent progression data; repaired");
    }
    state
}

/// Overlay each persisted field onto the template, keeping a field only when
/// the result still deserializes. Unknown keys are dropped.
fn merge_saved(raw: &str) -> PlayerState {
    let saved = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => map,
        Ok(_) => {
            warn!("save is not a JSON object, starting from template");
            return PlayerState::default();
        }
        Err(e) => {
            warn!("save is corrupt, starting from template: {}", e);
            return PlayerState::default();
        }
    };

    let mut merged = match serde_json::to_value(PlayerState::default()) {
        Ok(Value::Object(map)) => map,
        _ => return PlayerState::default(),
    };

    for (key, value) in saved {
        if !merged.contains_key(&key) {
            debug!("ignoring unknown save field {}", key);
            continue;
        }
        let previous = merged.insert(key.clone(), value);
        if decode(&merged).is_none() {
            warn!("save field {} is invalid, using default", key);
            if let Some(previous) = previous {
                merged.insert(key, previous);
            }
        }
    }

    decode(&merged).unwrap_or_default()
}

fn decode(map: &Map<String, Value>) -> Option<PlayerState> {
    serde_json::from_value(Value::Object(map.clone())).ok()
}
