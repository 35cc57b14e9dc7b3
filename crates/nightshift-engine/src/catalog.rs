//! Static engine-side content looked up by id.
//!
//! Hazards, anomaly templates, mail templates, the toolroom shop, and the
//! rotable parts the player can turn up on an inspection. Job and event
//! content lives outside the engine and arrives through
//! [`ContentHooks`](crate::context::ContentHooks).

use nightshift_types::{EventCategory, ToolId};

// ---------------------------------------------------------------------------
// Hazards
// ---------------------------------------------------------------------------

/// A rare nested event a hazard may set off while it lasts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HazardSubEvent {
    /// Probability per second.
    pub per_sec: f64,
    /// Category handed to the content layer.
    pub category: EventCategory,
    /// Content id handed to the content layer.
    pub event_id: &'static str,
}

/// Template for a timed environmental hazard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HazardDef {
    /// Stable id.
    pub id: &'static str,
    /// Display label.
    pub label: &'static str,
    /// Lifetime in milliseconds.
    pub duration_ms: f64,
    /// Sanity drained per second.
    pub sanity_per_sec: f64,
    /// Health drained per second.
    pub health_per_sec: f64,
    /// Optional nested event.
    pub sub_event: Option<HazardSubEvent>,
}

/// Content id whose expiry leaves a contamination risk behind.
pub const HYDRAULIC_CONTAMINATION: &str = "HYDRAULIC_CONTAMINATION";

/// Every hazard the tick processor may spawn.
pub static HAZARDS: [HazardDef; 4] = [
    HazardDef {
        id: "fuel_vapour",
        label: "Fuel vapour",
        duration_ms: 30_000.0,
        sanity_per_sec: 0.1,
        health_per_sec: 0.2,
        sub_event: Some(HazardSubEvent {
            per_sec: 0.01,
            category: EventCategory::Accident,
            event_id: "FUEL_VAPOUR_FLASH",
        }),
    },
    HazardDef {
        id: "hydraulic_mist",
        label: "Hydraulic mist",
        duration_ms: 25_000.0,
        sanity_per_sec: 0.05,
        health_per_sec: 0.15,
        sub_event: Some(HazardSubEvent {
            per_sec: 0.01,
            category: EventCategory::Incident,
            event_id: HYDRAULIC_CONTAMINATION,
        }),
    },
    HazardDef {
        id: "static_discharge",
        label: "Static discharge",
        duration_ms: 15_000.0,
        sanity_per_sec: 0.2,
        health_per_sec: 0.1,
        sub_event: None,
    },
    HazardDef {
        id: "cold_snap",
        label: "Cold snap",
        duration_ms: 40_000.0,
        sanity_per_sec: 0.05,
        health_per_sec: 0.05,
        sub_event: None,
    },
];

/// Look up a hazard by id.
pub fn hazard(id: &str) -> Option<&'static HazardDef> {
    HAZARDS.iter().find(|h| h.id == id)
}

// ---------------------------------------------------------------------------
// Anomalies
// ---------------------------------------------------------------------------

/// Template an anomaly instance refers to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnomalyTemplate {
    /// Stable id.
    pub id: &'static str,
    /// Display label.
    pub label: &'static str,
    /// XP on analysis.
    pub xp: f64,
    /// Kardex fragments on analysis.
    pub kardex: f64,
    /// Sanity cost of analysis (blocked by a sanity shield).
    pub sanity_cost: f64,
    /// Chance the analysis leaves the player afraid.
    pub fear_chance: f64,
    /// Optional eldritch event and its chance.
    pub manifestation: Option<(&'static str, f64)>,
}

/// Every anomaly template.
pub static ANOMALIES: [AnomalyTemplate; 4] = [
    AnomalyTemplate {
        id: "warm_rivet",
        label: "A rivet that stays warm",
        xp: 40.0,
        kardex: 1.0,
        sanity_cost: 3.0,
        fear_chance: 0.1,
        manifestation: None,
    },
    AnomalyTemplate {
        id: "wrong_shadow",
        label: "A shadow cast the wrong way",
        xp: 60.0,
        kardex: 1.0,
        sanity_cost: 6.0,
        fear_chance: 0.3,
        manifestation: None,
    },
    AnomalyTemplate {
        id: "logbook_entry",
        label: "A logbook entry in your handwriting, dated tomorrow",
        xp: 80.0,
        kardex: 2.0,
        sanity_cost: 8.0,
        fear_chance: 0.25,
        manifestation: Some(("THE_LOGBOOK_WRITES_BACK", 0.1)),
    },
    AnomalyTemplate {
        id: "breathing_panel",
        label: "An access panel that breathes",
        xp: 120.0,
        kardex: 3.0,
        sanity_cost: 12.0,
        fear_chance: 0.5,
        manifestation: Some(("THE_HULL_EXHALES", 0.2)),
    },
];

/// Look up an anomaly template by id.
pub fn anomaly(id: &str) -> Option<&'static AnomalyTemplate> {
    ANOMALIES.iter().find(|a| a.id == id)
}

// ---------------------------------------------------------------------------
// Rotables
// ---------------------------------------------------------------------------

/// A part an inspection can turn up: `(label, part number)`.
pub static ROTABLE_PARTS: [(&str, &str); 6] = [
    ("Hydraulic Pump", "HP-2210-4"),
    ("Starter Generator", "SG-40-118"),
    ("Fuel Control Unit", "FCU-7731"),
    ("Bleed Air Valve", "BAV-310-2"),
    ("Main Wheel Assembly", "MWA-5508"),
    ("Air Cycle Machine", "ACM-9002-1"),
];

// ---------------------------------------------------------------------------
// Mail
// ---------------------------------------------------------------------------

/// Template for an internal e-mail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MailTemplate {
    /// Sender line.
    pub sender: &'static str,
    /// Subject line; dedup key.
    pub subject: &'static str,
    /// Body text.
    pub body: &'static str,
}

/// Every mail template.
pub static MAIL: [MailTemplate; 5] = [
    MailTemplate {
        sender: "Quality Department",
        subject: "Reminder: FOD walk compliance",
        body: "Foreign object debris was found in bay 3 again. Walk the floor before every shift.",
    },
    MailTemplate {
        sender: "Night Shift Supervisor",
        subject: "Overtime available",
        body: "We are short on the heavy check. Time and a half, no questions.",
    },
    MailTemplate {
        sender: "Stores",
        subject: "Unclaimed part on the quarantine shelf",
        body: "There is a pump on the shelf with no paperwork. It was not there yesterday.",
    },
    MailTemplate {
        sender: "unknown",
        subject: "You signed it",
        body: "You signed the card for the aircraft that never left. We remember.",
    },
    MailTemplate {
        sender: "HR",
        subject: "Wellbeing survey",
        body: "How often do you hear the hangar breathing? Never / Sometimes / Always.",
    },
];

// ---------------------------------------------------------------------------
// Shop
// ---------------------------------------------------------------------------

/// What a shop purchase grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShopEffect {
    /// A tool, delivered at full condition.
    Tool(ToolId),
    /// Ear defenders.
    EarDefenders,
    /// Hi-vis vest.
    HiVisVest,
    /// Respirator.
    Respirator,
    /// A strip of pills.
    Pills(u32),
    /// One PC part.
    PcPart,
}

/// One toolroom shop entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShopItem {
    /// Stable id used in `BUY_ITEM` payloads.
    pub id: &'static str,
    /// Display label.
    pub label: &'static str,
    /// Price in credits.
    pub price: f64,
    /// Grant.
    pub effect: ShopEffect,
}

/// Everything the toolroom sells.
pub static SHOP: [ShopItem; 11] = [
    ShopItem {
        id: "torque_wrench",
        label: "Torque wrench",
        price: 120.0,
        effect: ShopEffect::Tool(ToolId::TorqueWrench),
    },
    ShopItem {
        id: "borescope",
        label: "Borescope",
        price: 300.0,
        effect: ShopEffect::Tool(ToolId::Borescope),
    },
    ShopItem {
        id: "multimeter",
        label: "Multimeter",
        price: 150.0,
        effect: ShopEffect::Tool(ToolId::Multimeter),
    },
    ShopItem {
        id: "rivet_gun",
        label: "Rivet gun",
        price: 200.0,
        effect: ShopEffect::Tool(ToolId::RivetGun),
    },
    ShopItem {
        id: "ndt_kit",
        label: "NDT kit",
        price: 500.0,
        effect: ShopEffect::Tool(ToolId::NdtKit),
    },
    ShopItem {
        id: "safety_wire_pliers",
        label: "Safety-wire pliers",
        price: 60.0,
        effect: ShopEffect::Tool(ToolId::SafetyWirePliers),
    },
    ShopItem {
        id: "ear_defenders",
        label: "Ear defenders",
        price: 40.0,
        effect: ShopEffect::EarDefenders,
    },
    ShopItem {
        id: "hi_vis_vest",
        label: "Hi-vis vest",
        price: 25.0,
        effect: ShopEffect::HiVisVest,
    },
    ShopItem {
        id: "respirator",
        label: "Respirator",
        price: 80.0,
        effect: ShopEffect::Respirator,
    },
    ShopItem {
        id: "pills",
        label: "Pills (strip of 3)",
        price: 30.0,
        effect: ShopEffect::Pills(3),
    },
    ShopItem {
        id: "pc_part",
        label: "Salvaged PC part",
        price: 75.0,
        effect: ShopEffect::PcPart,
    },
];

/// Look up a shop item by id.
pub fn shop_item(id: &str) -> Option<&'static ShopItem> {
    SHOP.iter().find(|i| i.id == id)
}
