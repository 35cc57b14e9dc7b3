//! Shared type definitions for the Nightshift simulation core.
//!
//! This crate is the single source of truth for the State tree. Every record
//! serializes to the camelCase save-record shape and flows downstream to
//! `TypeScript` via `ts-rs` for the UI layer.
//!
//! # Modules
//!
//! - [`enums`] -- Locations, event categories, tools, log and notification styles
//! - [`structs`] -- Records held inside the tree (jobs, events, rotables, mail, ...)
//! - [`state`] -- The [`GameState`] tree with its clamped writes and log ring buffer

pub mod enums;
pub mod state;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{EventCategory, LocationId, LogType, NotificationVariant, ToolId};
pub use state::{
    Flags, GAUGE_MAX, GameState, HfStats, Inventory, LOG_CAPACITY, Proficiency,
    REQUIRED_SAVE_KEYS, Resources, Stats,
};
pub use structs::{
    ActiveEvent, ActiveHazard, Anomaly, DEFAULT_NOTIFICATION_MS, FailureOutcome, Job, LogEntry,
    MailMessage, Notification, RewardBundle, Rotable, ScenarioState, TerminalState,
};

#[cfg(test)]
mod tests {
    //! `TypeScript` binding generation.

    #[test]
    fn export_bindings() {
        // Files are written to `bindings/` relative to the crate root.
        use ts_rs::TS;

        // Enums
        let _ = crate::enums::LocationId::export_all();
        let _ = crate::enums::EventCategory::export_all();
        let _ = crate::enums::ToolId::export_all();
        let _ = crate::enums::LogType::export_all();
        let _ = crate::enums::NotificationVariant::export_all();

        // Records
        let _ = crate::structs::RewardBundle::export_all();
        let _ = crate::structs::FailureOutcome::export_all();
        let _ = crate::structs::Rotable::export_all();
        let _ = crate::structs::Anomaly::export_all();
        let _ = crate::structs::Job::export_all();
        let _ = crate::structs::ActiveEvent::export_all();
        let _ = crate::structs::ActiveHazard::export_all();
        let _ = crate::structs::ScenarioState::export_all();
        let _ = crate::structs::LogEntry::export_all();
        let _ = crate::structs::Notification::export_all();
        let _ = crate::structs::MailMessage::export_all();
        let _ = crate::structs::TerminalState::export_all();

        // State tree
        let _ = crate::state::Resources::export_all();
        let _ = crate::state::Inventory::export_all();
        let _ = crate::state::Flags::export_all();
        let _ = crate::state::HfStats::export_all();
        let _ = crate::state::Proficiency::export_all();
        let _ = crate::state::Stats::export_all();
        let _ = crate::state::GameState::export_all();
    }
}
