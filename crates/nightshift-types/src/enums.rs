//! Enumeration types shared by the engine, persistence, and UI layers.
//!
//! Every enum here serializes to the lowercase string form the save record
//! and the UI bindings use, and exposes `as_str`/`parse` for the places
//! (action payloads, runner commands) where ids arrive as plain strings.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Locations
// ---------------------------------------------------------------------------

/// A place the player can be standing in while time advances.
///
/// The active location selects the environmental profile applied by the
/// tick processor (noise, fatigue, temperature) and any location-specific
/// passive risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum LocationId {
    /// The main maintenance hangar floor.
    Hangar,
    /// The open apron outside, next to running engines.
    Apron,
    /// The maintenance control office.
    Office,
    /// The break room with the vending machine.
    BreakRoom,
    /// The tool crib and its keeper.
    Toolroom,
    /// The restricted component backshop.
    Backshop,
    /// The records archive in the basement.
    Archive,
}

impl LocationId {
    /// Every location, in display order.
    pub const ALL: [Self; 7] = [
        Self::Hangar,
        Self::Apron,
        Self::Office,
        Self::BreakRoom,
        Self::Toolroom,
        Self::Backshop,
        Self::Archive,
    ];

    /// Return the wire name of the location.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hangar => "hangar",
            Self::Apron => "apron",
            Self::Office => "office",
            Self::BreakRoom => "break_room",
            Self::Toolroom => "toolroom",
            Self::Backshop => "backshop",
            Self::Archive => "archive",
        }
    }

    /// Parse a wire name back into a location.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|loc| loc.as_str() == name)
    }
}

impl core::fmt::Display for LocationId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Event categories
// ---------------------------------------------------------------------------

/// Category handed to the external event-content layer when the engine
/// asks for an event to be spawned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum EventCategory {
    /// Everyday shop-floor trouble.
    Incident,
    /// Quality or regulatory scrutiny.
    Audit,
    /// Someone got hurt, or nearly did.
    Accident,
    /// Something that should not be in the hangar.
    EldritchManifestation,
    /// A tracked rotable has failed; cleared only by repairing it.
    ComponentFailure,
    /// Narrative beat; never expires on its own.
    StoryEvent,
}

impl EventCategory {
    /// Every category, in unlock order.
    pub const ALL: [Self; 6] = [
        Self::Incident,
        Self::StoryEvent,
        Self::ComponentFailure,
        Self::Accident,
        Self::Audit,
        Self::EldritchManifestation,
    ];

    /// Return the wire name of the category.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Incident => "incident",
            Self::Audit => "audit",
            Self::Accident => "accident",
            Self::EldritchManifestation => "eldritch_manifestation",
            Self::ComponentFailure => "component_failure",
            Self::StoryEvent => "story_event",
        }
    }

    /// Parse a wire name back into a category.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|cat| cat.as_str() == name)
    }

    /// Whether an active event of this category counts down and fails on
    /// its own. Story beats wait for the player; component failures wait
    /// for a repair.
    pub const fn expires(self) -> bool {
        !matches!(self, Self::StoryEvent | Self::ComponentFailure)
    }
}

impl core::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tools
// ---------------------------------------------------------------------------

/// A hand tool the player can own. Ownership lives in the inventory; wear
/// lives in `toolConditions`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub enum ToolId {
    /// Click-type torque wrench.
    TorqueWrench,
    /// Inspection borescope (precision).
    Borescope,
    /// Digital multimeter (precision).
    Multimeter,
    /// Pneumatic rivet gun.
    RivetGun,
    /// Eddy-current NDT kit (precision).
    NdtKit,
    /// Safety-wire twisting pliers.
    SafetyWirePliers,
}

impl ToolId {
    /// Every tool.
    pub const ALL: [Self; 6] = [
        Self::TorqueWrench,
        Self::Borescope,
        Self::Multimeter,
        Self::RivetGun,
        Self::NdtKit,
        Self::SafetyWirePliers,
    ];

    /// Tools that lose condition passively while owned.
    pub const PRECISION: [Self; 3] = [Self::Borescope, Self::NdtKit, Self::Multimeter];

    /// Return the wire name of the tool.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TorqueWrench => "torqueWrench",
            Self::Borescope => "borescope",
            Self::Multimeter => "multimeter",
            Self::RivetGun => "rivetGun",
            Self::NdtKit => "ndtKit",
            Self::SafetyWirePliers => "safetyWirePliers",
        }
    }

    /// Human-readable label used in log lines.
    pub const fn label(self) -> &'static str {
        match self {
            Self::TorqueWrench => "torque wrench",
            Self::Borescope => "borescope",
            Self::Multimeter => "multimeter",
            Self::RivetGun => "rivet gun",
            Self::NdtKit => "NDT kit",
            Self::SafetyWirePliers => "safety-wire pliers",
        }
    }

    /// Parse a wire name back into a tool.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.as_str() == name)
    }
}

// ---------------------------------------------------------------------------
// Log and notification styling
// ---------------------------------------------------------------------------

/// Severity/styling class of a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum LogType {
    /// Neutral information.
    Info,
    /// Something went well.
    Success,
    /// Declined action or looming trouble.
    Warning,
    /// Logical failure or bad outcome.
    Error,
    /// Narrative text.
    Story,
}

/// Styling class of a toast notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum NotificationVariant {
    /// Neutral.
    Info,
    /// Positive (level-up and similar).
    Success,
    /// Caution (missing PPE and similar).
    Warning,
    /// Hazard in progress.
    Danger,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_names_round_trip() {
        for loc in LocationId::ALL {
            assert_eq!(LocationId::parse(loc.as_str()), Some(loc));
        }
        assert_eq!(LocationId::parse("roof"), None);
    }

    #[test]
    fn location_serializes_to_wire_name() {
        let json = serde_json::to_string(&LocationId::BreakRoom).unwrap_or_default();
        assert_eq!(json, "\"break_room\"");
    }

    #[test]
    fn category_wire_names_match_serde() {
        for cat in EventCategory::ALL {
            let json = serde_json::to_string(&cat).unwrap_or_default();
            assert_eq!(json, format!("\"{}\"", cat.as_str()));
        }
    }

    #[test]
    fn story_and_component_failure_do_not_expire() {
        assert!(!EventCategory::StoryEvent.expires());
        assert!(!EventCategory::ComponentFailure.expires());
        assert!(EventCategory::Audit.expires());
        assert!(EventCategory::Incident.expires());
    }

    #[test]
    fn tool_wire_names_match_serde() {
        for tool in ToolId::ALL {
            let json = serde_json::to_string(&tool).unwrap_or_default();
            assert_eq!(json, format!("\"{}\"", tool.as_str()));
            assert_eq!(ToolId::parse(tool.as_str()), Some(tool));
        }
    }
}
