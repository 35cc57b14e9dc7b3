//! Loading and saving the state through a [`Storage`] slot.
//!
//! Loading never fails. Missing, unreadable, or structurally wrong data
//! logs a warning and yields fresh defaults. Valid data is deep-merged over
//! the defaults so fields added since the save was written get their
//! default values, then the transient subset is reset.

use chrono::Utc;
use nightshift_types::GameState;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::SaveError;
use crate::storage::Storage;

/// Default slot key.
pub const DEFAULT_SLOT: &str = "nightshift";

/// Recursively overlay `saved` onto `base`.
///
/// Objects merge key by key. Anything else in `saved` (scalars, arrays,
/// `null`) replaces what `base` holds.
pub fn deep_merge(base: &mut Value, saved: Value) {
    match (base, saved) {
        (Value::Object(base_map), Value::Object(saved_map)) => {
            for (key, value) in saved_map {
                match base_map.get_mut(&key) {
                    Some(slot) => deep_merge(slot, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

/// Reset everything that must not survive a reload.
///
/// Transient flags and buff timers go back to their defaults (cooldowns are
/// kept). The active event, hazards, scenario, anomalies, and pending
/// notifications are dropped, along with the component-failure flags their
/// event owned. `lastUpdate` is set to `now_ms`.
pub fn sanitize_loaded(state: &mut GameState, now_ms: i64) {
    state.flags.reset_transient();
    state.hf_stats.reset_transient();
    state.active_event = None;
    state.active_hazards.clear();
    state.active_scenario = None;
    state.anomalies.clear();
    state.notification_queue.clear();
    state.flags.active_component_failure = false;
    state.flags.failing_rotable_id = None;
    state.resources.normalize();
    state.last_update = now_ms;
}

fn is_loadable(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|map| map.contains_key("resources") && map.contains_key("inventory"))
}

fn fresh(now_ms: i64) -> GameState {
    GameState {
        last_update: now_ms,
        ..GameState::default()
    }
}

/// Load the state in slot `key` as of `now_ms`.
pub fn load_state_at(storage: &dyn Storage, key: &str, now_ms: i64) -> GameState {
    let raw = match storage.read(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            info!(key, "No save found, starting fresh");
            return fresh(now_ms);
        }
        Err(e) => {
            warn!(key, error = %e, "Could not read save, starting fresh");
            return fresh(now_ms);
        }
    };

    let saved: Value = match serde_json::from_str(&raw) {
        Ok(v) => v,
        Err(e) => {
            warn!(key, error = %e, "Save is not valid JSON, starting fresh");
            return fresh(now_ms);
        }
    };
    if !is_loadable(&saved) {
        warn!(key, "Save is missing resources or inventory, starting fresh");
        return fresh(now_ms);
    }

    let mut merged = match serde_json::to_value(GameState::default()) {
        Ok(v) => v,
        Err(e) => {
            warn!(error = %e, "Could not serialize defaults, starting fresh");
            return fresh(now_ms);
        }
    };
    deep_merge(&mut merged, saved);

    let mut state: GameState = match serde_json::from_value(merged) {
        Ok(s) => s,
        Err(e) => {
            warn!(key, error = %e, "Save does not fit the state shape, starting fresh");
            return fresh(now_ms);
        }
    };
    sanitize_loaded(&mut state, now_ms);
    debug!(key, level = state.resources.level, "Save loaded");
    state
}

/// Load the state in slot `key`, stamped with the current time.
pub fn load_state(storage: &dyn Storage, key: &str) -> GameState {
    load_state_at(storage, key, Utc::now().timestamp_millis())
}

/// Write `state` to slot `key`.
pub fn save_state(storage: &dyn Storage, key: &str, state: &GameState) -> Result<(), SaveError> {
    let json = serde_json::to_string(state)?;
    storage.write(key, &json)?;
    debug!(key, bytes = json.len(), "Save written");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn merge_keeps_defaults_for_missing_fields() {
        let mut base = json!({ "a": 1, "nested": { "x": 1, "y": 2 } });
        deep_merge(&mut base, json!({ "nested": { "y": 5 }, "extra": true }));
        assert_eq!(base, json!({ "a": 1, "nested": { "x": 1, "y": 5 }, "extra": true }));
    }

    #[test]
    fn arrays_replace_rather_than_merge() {
        let mut base = json!({ "list": [1, 2, 3] });
        deep_merge(&mut base, json!({ "list": [9] }));
        assert_eq!(base, json!({ "list": [9] }));
    }
}
