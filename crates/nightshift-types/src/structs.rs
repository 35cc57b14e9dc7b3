//! Record types held inside the [`GameState`](crate::GameState) tree.
//!
//! These are plain data: no behaviour beyond small accessors. The engine
//! crate owns every rule that mutates them.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{EventCategory, LogType, NotificationVariant, ToolId};

// ---------------------------------------------------------------------------
// Rewards and outcomes
// ---------------------------------------------------------------------------

/// A bundle of reward deltas granted by jobs, events, and categorized
/// actions.
///
/// `materials` is paid out as alclad sheet. `suspicion` is a signed delta
/// (some work draws attention, some deflects it).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export, export_to = "bindings/")]
pub struct RewardBundle {
    /// Experience points.
    pub xp: f64,
    /// Currency.
    pub credits: f64,
    /// Alclad sheet.
    pub materials: f64,
    /// Suspicion delta.
    pub suspicion: f64,
}

impl RewardBundle {
    /// Construct a bundle from its four components.
    pub const fn new(xp: f64, credits: f64, materials: f64, suspicion: f64) -> Self {
        Self {
            xp,
            credits,
            materials,
            suspicion,
        }
    }

    /// Multiply every component by `factor`.
    #[must_use]
    pub fn scaled(self, factor: f64) -> Self {
        Self {
            xp: self.xp * factor,
            credits: self.credits * factor,
            materials: self.materials * factor,
            suspicion: self.suspicion * factor,
        }
    }
}

/// Penalty applied when an active event runs out of time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export, export_to = "bindings/")]
pub struct FailureOutcome {
    /// Sanity removed.
    pub sanity_loss: f64,
    /// Suspicion added.
    pub suspicion_gain: f64,
}

// ---------------------------------------------------------------------------
// Rotables and anomalies
// ---------------------------------------------------------------------------

/// A trackable physical part with a condition that degrades over time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export, export_to = "bindings/")]
pub struct Rotable {
    /// Unique id.
    pub id: String,
    /// Display label ("Hydraulic Pump", ...).
    pub label: String,
    /// Manufacturer part number.
    pub part_number: String,
    /// Serial number as stamped on the data plate.
    pub serial_number: String,
    /// Condition in `[0, 100]`.
    pub condition: f64,
    /// Whether the part is fitted to an aircraft.
    pub is_installed: bool,
    /// Whether the part has no valid paperwork trail.
    pub is_untraceable: bool,
    /// Whether the part has been tagged unserviceable.
    pub is_red_tagged: bool,
}

/// A discovered anomaly instance, referencing a static template.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export, export_to = "bindings/")]
pub struct Anomaly {
    /// Unique id.
    pub id: String,
    /// Template id in the engine's anomaly table.
    pub template_id: String,
    /// Epoch milliseconds of discovery.
    #[ts(type = "number")]
    pub discovered_at: i64,
}

// ---------------------------------------------------------------------------
// Jobs and events
// ---------------------------------------------------------------------------

/// The current work card. The engine never lets this stay empty across a
/// tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export, export_to = "bindings/")]
pub struct Job {
    /// Unique id.
    pub id: String,
    /// Card title.
    pub title: String,
    /// Card body text.
    pub description: String,
    /// Remaining time in milliseconds.
    pub time_left: f64,
    /// Initial time in milliseconds.
    pub total_time: f64,
    /// Tool that must be owned and serviceable to sign the card off.
    pub required_tool: Option<ToolId>,
    /// Reward paid on completion.
    pub reward: RewardBundle,
    /// Retrofit cards never turn up anomalies.
    pub is_retrofit: bool,
}

/// The event currently demanding attention.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct ActiveEvent {
    /// Content id (e.g. `AUDIT_NOTICE`).
    pub id: String,
    /// Category the event was spawned under.
    pub category: EventCategory,
    /// Title.
    pub title: String,
    /// Body text.
    #[serde(default)]
    pub description: String,
    /// Remaining time in milliseconds.
    #[serde(default)]
    pub time_left: f64,
    /// Initial time in milliseconds.
    #[serde(default)]
    pub total_time: f64,
    /// Tool required to resolve the event.
    #[serde(default)]
    pub required_tool: Option<ToolId>,
    /// Reward paid on resolution.
    #[serde(default)]
    pub reward: RewardBundle,
    /// Rotable the event is about, for component failures.
    #[serde(default)]
    pub rotable_id: Option<String>,
    /// Explicit penalty on expiry; the category default applies otherwise.
    #[serde(default)]
    pub failure: Option<FailureOutcome>,
}

// ---------------------------------------------------------------------------
// Hazards and scenarios
// ---------------------------------------------------------------------------

/// A timed environmental hazard with continuous drains.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export, export_to = "bindings/")]
pub struct ActiveHazard {
    /// Instance id (`<hazard>-<timestamp>`).
    pub id: String,
    /// Template id in the engine's hazard table.
    pub hazard_id: String,
    /// Display label.
    pub label: String,
    /// Remaining duration in milliseconds.
    pub duration: f64,
    /// Sanity drained per second.
    pub sanity_per_sec: f64,
    /// Health drained per second.
    pub health_per_sec: f64,
}

/// Progress through a multi-step encounter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export, export_to = "bindings/")]
pub struct ScenarioState {
    /// Scenario id.
    pub id: String,
    /// Zero-based stage reached so far.
    pub stage: u32,
    /// Epoch milliseconds the scenario began.
    #[ts(type = "number")]
    pub started_at: i64,
}

// ---------------------------------------------------------------------------
// Logs, notifications, mail
// ---------------------------------------------------------------------------

/// One line in the activity log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct LogEntry {
    /// Unique id.
    pub id: String,
    /// Message text.
    pub text: String,
    /// Styling class.
    #[serde(rename = "type")]
    pub log_type: LogType,
    /// Epoch milliseconds.
    #[ts(type = "number")]
    pub timestamp: i64,
}

/// A toast the UI shows and dismisses on its own timer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Notification {
    /// Stable id; a second notification with the same id replaces the first.
    pub id: String,
    /// Headline.
    pub title: String,
    /// Optional body.
    #[serde(default)]
    pub message: Option<String>,
    /// Styling class.
    pub variant: NotificationVariant,
    /// Display time in milliseconds.
    pub duration: u32,
}

/// Default display time for notifications.
pub const DEFAULT_NOTIFICATION_MS: u32 = 5000;

impl Notification {
    /// Build a notification with the default duration.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        message: Option<String>,
        variant: NotificationVariant,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            message,
            variant,
            duration: DEFAULT_NOTIFICATION_MS,
        }
    }
}

/// An internal e-mail delivered to the assembled PC.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export, export_to = "bindings/")]
pub struct MailMessage {
    /// Unique id.
    pub id: String,
    /// Sender line.
    pub sender: String,
    /// Subject line; mail is deduplicated on this.
    pub subject: String,
    /// Body text.
    pub body: String,
    /// Whether the player opened it.
    pub read: bool,
    /// Epoch milliseconds of delivery.
    #[ts(type = "number")]
    pub received_at: i64,
}

// ---------------------------------------------------------------------------
// Terminals
// ---------------------------------------------------------------------------

/// Persisted state of one of the text terminals. The terminal command
/// reducers live outside the core; the core only carries and persists this.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export, export_to = "bindings/")]
pub struct TerminalState {
    /// Whether the terminal has been logged into.
    pub unlocked: bool,
    /// Current working directory.
    pub cwd: String,
    /// Output lines, oldest first.
    pub history: Vec<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn reward_scaling_multiplies_every_component() {
        let r = RewardBundle::new(10.0, 4.0, 2.0, -1.0).scaled(0.5);
        assert_eq!(r, RewardBundle::new(5.0, 2.0, 1.0, -0.5));
    }

    #[test]
    fn log_entry_uses_type_key() {
        let entry = LogEntry {
            id: "a".to_owned(),
            text: "hello".to_owned(),
            log_type: LogType::Warning,
            timestamp: 7,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json.get("type").and_then(|v| v.as_str()), Some("warning"));
    }

    #[test]
    fn active_event_deserializes_with_minimal_fields() {
        let json = r#"{"id":"X","category":"audit","title":"Audit"}"#;
        let event: ActiveEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.category, EventCategory::Audit);
        assert_eq!(event.time_left, 0.0);
        assert!(event.failure.is_none());
    }
}
