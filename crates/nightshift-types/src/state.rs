//! The single State tree produced by the action and tick processors.
//!
//! [`GameState`] is replaced wholesale on every processed action or tick.
//! Bounded gauges (`sanity`, `suspicion`, `focus`, `health`) are only ever
//! written through the clamping helpers on [`Resources`], so every write
//! lands inside `[0, 100]`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::enums::{LogType, ToolId};
use crate::structs::{
    ActiveEvent, ActiveHazard, Anomaly, Job, LogEntry, MailMessage, Notification, Rotable,
    ScenarioState, TerminalState,
};

/// Maximum number of entries kept in the activity log.
pub const LOG_CAPACITY: usize = 50;

/// Upper bound of every clamped gauge.
pub const GAUGE_MAX: f64 = 100.0;

/// Top-level keys every save record and transfer payload must carry.
pub const REQUIRED_SAVE_KEYS: [&str; 17] = [
    "resources",
    "inventory",
    "flags",
    "logs",
    "proficiency",
    "stats",
    "hfStats",
    "rotables",
    "toolConditions",
    "mail",
    "activeJob",
    "activeEvent",
    "activeHazards",
    "vendingPrices",
    "archiveTerminal",
    "maintenanceTerminal",
    "lastUpdate",
];

fn clamp_gauge(value: f64) -> f64 {
    value.clamp(0.0, GAUGE_MAX)
}

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

/// Numeric resource pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export, export_to = "bindings/")]
pub struct Resources {
    /// Sanity gauge in `[0, 100]`.
    pub sanity: f64,
    /// Suspicion gauge in `[0, 100]`.
    pub suspicion: f64,
    /// Focus gauge in `[0, 100]`; the action-gating resource.
    pub focus: f64,
    /// Health gauge in `[0, 100]`.
    pub health: f64,
    /// Player level, at least 1.
    pub level: u32,
    /// Experience toward the next level.
    pub experience: f64,
    /// Currency.
    pub credits: f64,
    /// Alclad sheet (the generic "materials" reward).
    pub alclad: f64,
    /// Loose rivets.
    pub rivets: f64,
    /// Scrap metal, sold at the toolroom.
    pub scrap_metal: f64,
    /// Narrative currency found in old records.
    pub kardex_fragments: f64,
}

impl Default for Resources {
    fn default() -> Self {
        Self {
            sanity: GAUGE_MAX,
            suspicion: 0.0,
            focus: GAUGE_MAX,
            health: GAUGE_MAX,
            level: 1,
            experience: 0.0,
            credits: 50.0,
            alclad: 0.0,
            rivets: 0.0,
            scrap_metal: 0.0,
            kardex_fragments: 0.0,
        }
    }
}

impl Resources {
    /// Add (or with a negative delta, remove) sanity, clamped.
    pub fn add_sanity(&mut self, delta: f64) {
        self.sanity = clamp_gauge(self.sanity + delta);
    }

    /// Add suspicion, clamped.
    pub fn add_suspicion(&mut self, delta: f64) {
        self.suspicion = clamp_gauge(self.suspicion + delta);
    }

    /// Add focus, clamped.
    pub fn add_focus(&mut self, delta: f64) {
        self.focus = clamp_gauge(self.focus + delta);
    }

    /// Add health, clamped.
    pub fn add_health(&mut self, delta: f64) {
        self.health = clamp_gauge(self.health + delta);
    }

    /// Add credits, floored at zero.
    pub fn add_credits(&mut self, delta: f64) {
        self.credits = (self.credits + delta).max(0.0);
    }

    /// Add experience, floored at zero.
    pub fn add_experience(&mut self, delta: f64) {
        self.experience = (self.experience + delta).max(0.0);
    }

    /// Re-clamp every bounded gauge and the level floor.
    pub fn normalize(&mut self) {
        self.sanity = clamp_gauge(self.sanity);
        self.suspicion = clamp_gauge(self.suspicion);
        self.focus = clamp_gauge(self.focus);
        self.health = clamp_gauge(self.health);
        if self.level == 0 {
            self.level = 1;
        }
        self.experience = self.experience.max(0.0);
    }
}

// ---------------------------------------------------------------------------
// Inventory
// ---------------------------------------------------------------------------

/// Ownership flags and small counters.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export, export_to = "bindings/")]
pub struct Inventory {
    /// Owns a torque wrench.
    pub has_torque_wrench: bool,
    /// Owns a borescope.
    pub has_borescope: bool,
    /// Owns a multimeter.
    pub has_multimeter: bool,
    /// Owns a rivet gun.
    pub has_rivet_gun: bool,
    /// Owns an NDT kit.
    pub has_ndt_kit: bool,
    /// Owns safety-wire pliers.
    pub has_safety_wire_pliers: bool,
    /// Owns ear defenders.
    pub has_ear_defenders: bool,
    /// Owns a hi-vis vest.
    pub has_hi_vis_vest: bool,
    /// Owns a respirator.
    pub has_respirator: bool,
    /// Pills on hand.
    pub pills: u32,
    /// Loose PC parts.
    pub pc_parts: u32,
    /// Whether the break-room PC has been assembled.
    pub pc_assembled: bool,
    /// Whether the evidence dossier has been compiled.
    pub has_compiled_dossier: bool,
}

impl Default for Inventory {
    fn default() -> Self {
        Self {
            has_torque_wrench: true,
            has_borescope: false,
            has_multimeter: false,
            has_rivet_gun: false,
            has_ndt_kit: false,
            has_safety_wire_pliers: false,
            has_ear_defenders: false,
            has_hi_vis_vest: false,
            has_respirator: false,
            pills: 0,
            pc_parts: 0,
            pc_assembled: false,
            has_compiled_dossier: false,
        }
    }
}

impl Inventory {
    /// Whether the given tool is owned.
    pub const fn owns_tool(&self, tool: ToolId) -> bool {
        match tool {
            ToolId::TorqueWrench => self.has_torque_wrench,
            ToolId::Borescope => self.has_borescope,
            ToolId::Multimeter => self.has_multimeter,
            ToolId::RivetGun => self.has_rivet_gun,
            ToolId::NdtKit => self.has_ndt_kit,
            ToolId::SafetyWirePliers => self.has_safety_wire_pliers,
        }
    }

    /// Mark the given tool as owned.
    pub const fn grant_tool(&mut self, tool: ToolId) {
        match tool {
            ToolId::TorqueWrench => self.has_torque_wrench = true,
            ToolId::Borescope => self.has_borescope = true,
            ToolId::Multimeter => self.has_multimeter = true,
            ToolId::RivetGun => self.has_rivet_gun = true,
            ToolId::NdtKit => self.has_ndt_kit = true,
            ToolId::SafetyWirePliers => self.has_safety_wire_pliers = true,
        }
    }
}

// ---------------------------------------------------------------------------
// Flags
// ---------------------------------------------------------------------------

/// Narrative and mode flags.
///
/// The block marked transient is force-reset whenever a save is loaded.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export, export_to = "bindings/")]
pub struct Flags {
    /// Has spoken to the janitor at least once.
    pub has_met_the_janitor: bool,
    /// Level milestone: toolroom keys.
    pub toolroom_access: bool,
    /// Level milestone: backshop badge.
    pub backshop_access: bool,
    /// Level milestone: archive door.
    pub archive_access: bool,
    /// Level milestone: maintenance terminal login.
    pub terminal_access: bool,
    /// Night crew passive income is running.
    pub night_crew_active: bool,
    /// Auto-SRF passive income is running.
    pub auto_srf_active: bool,
    /// Transit-check delegation passive income is running.
    pub transit_check_delegation_active: bool,
    /// A component failure is dragging on credits.
    pub active_component_failure: bool,
    /// Rotable tied to the active component failure.
    pub failing_rotable_id: Option<String>,
    /// A hydraulic contamination was left unattended.
    pub contamination_risk: bool,
    /// On a performance-improvement plan (costs ×1.2).
    pub on_pip: bool,
    /// Suspicion 30 threshold has fired.
    pub suspicion_event_30_triggered: bool,
    /// Suspicion 60 threshold has fired.
    pub suspicion_event_60_triggered: bool,
    /// Suspicion 90 threshold has fired.
    pub suspicion_event_90_triggered: bool,
    /// The final report has been filed.
    pub ending_reached: bool,

    // --- transient ---
    /// Fear is active (paired with `fearTimer`).
    pub is_afraid: bool,
    /// Hallucinations drain focus.
    pub is_hallucinating: bool,
    /// The janitor is somewhere nearby.
    pub janitor_present: bool,
    /// Venom energy drink is in effect (paired with `venomSurgeTimer`).
    pub venom_surge_active: bool,
    /// A regulatory loophole is in hand (paired with `foundLoopholeTimer`).
    pub found_loophole: bool,
    /// Overtime schedule compression (paired with `scheduleCompressionTimer`).
    pub schedule_compressed: bool,
}

impl Flags {
    /// Clear every transient flag.
    pub const fn reset_transient(&mut self) {
        self.is_afraid = false;
        self.is_hallucinating = false;
        self.janitor_present = false;
        self.venom_surge_active = false;
        self.found_loophole = false;
        self.schedule_compressed = false;
    }
}

// ---------------------------------------------------------------------------
// Human factors
// ---------------------------------------------------------------------------

/// Human-factors gauges and the buff/debuff timer family (milliseconds).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export, export_to = "bindings/")]
pub struct HfStats {
    /// Fatigue in `[0, 100]`.
    pub fatigue: f64,
    /// Social stress in `[0, 100]`.
    pub social_stress: f64,
    /// Current noise exposure in dB.
    pub noise_exposure: f64,
    /// Felt temperature in °C; eases toward the location target.
    pub temperature: f64,
    /// Fear countdown.
    pub fear_timer: f64,
    /// Schedule compression countdown.
    pub schedule_compression_timer: f64,
    /// Sanity shield countdown.
    pub sanity_shield_timer: f64,
    /// Found-loophole countdown.
    pub found_loophole_timer: f64,
    /// Toolroom master cooldown.
    pub toolroom_master_cooldown: f64,
    /// Efficiency boost countdown.
    pub efficiency_boost_timer: f64,
    /// Venom surge countdown.
    pub venom_surge_timer: f64,
    /// Janitor cooldown.
    pub janitor_cooldown: f64,
}

impl Default for HfStats {
    fn default() -> Self {
        Self {
            fatigue: 0.0,
            social_stress: 0.0,
            noise_exposure: 0.0,
            temperature: 18.0,
            fear_timer: 0.0,
            schedule_compression_timer: 0.0,
            sanity_shield_timer: 0.0,
            found_loophole_timer: 0.0,
            toolroom_master_cooldown: 0.0,
            efficiency_boost_timer: 0.0,
            venom_surge_timer: 0.0,
            janitor_cooldown: 0.0,
        }
    }
}

impl HfStats {
    /// Add fatigue, clamped to `[0, 100]`.
    pub fn add_fatigue(&mut self, delta: f64) {
        self.fatigue = clamp_gauge(self.fatigue + delta);
    }

    /// Add social stress, clamped to `[0, 100]`.
    pub fn add_social_stress(&mut self, delta: f64) {
        self.social_stress = clamp_gauge(self.social_stress + delta);
    }

    /// Zero every buff/debuff timer. Cooldowns are left alone.
    pub const fn reset_transient(&mut self) {
        self.fear_timer = 0.0;
        self.schedule_compression_timer = 0.0;
        self.sanity_shield_timer = 0.0;
        self.found_loophole_timer = 0.0;
        self.efficiency_boost_timer = 0.0;
        self.venom_surge_timer = 0.0;
    }
}

// ---------------------------------------------------------------------------
// Proficiency and stats
// ---------------------------------------------------------------------------

/// Skill points and unlocked skills.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export, export_to = "bindings/")]
pub struct Proficiency {
    /// Unspent skill points.
    pub skill_points: u32,
    /// Unlocked skill ids; unique.
    pub unlocked: Vec<String>,
}

impl Proficiency {
    /// Whether a skill is unlocked.
    pub fn has(&self, skill_id: &str) -> bool {
        self.unlocked.iter().any(|s| s == skill_id)
    }
}

/// Lifetime counters and bookkeeping timestamps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export, export_to = "bindings/")]
pub struct Stats {
    /// Work cards signed off.
    pub jobs_completed: u32,
    /// Events resolved by the player.
    pub events_resolved: u32,
    /// Events that ran out of time.
    pub events_failed: u32,
    /// Anomalies analyzed.
    pub anomalies_analyzed: u32,
    /// Rotables repaired.
    pub rotables_repaired: u32,
    /// Rotables disposed of.
    pub rotables_disposed: u32,
    /// Total simulated time in milliseconds.
    pub play_time_ms: f64,
    /// Epoch milliseconds of the last advisory evaluation.
    #[ts(type = "number")]
    pub last_advisory_at: i64,
    /// Epoch milliseconds of the last delivered mail.
    #[ts(type = "number")]
    pub last_mail_at: i64,
}

// ---------------------------------------------------------------------------
// GameState
// ---------------------------------------------------------------------------

/// The whole simulation state for one player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export, export_to = "bindings/")]
pub struct GameState {
    /// Numeric resource pool.
    pub resources: Resources,
    /// Ownership flags and counters.
    pub inventory: Inventory,
    /// Narrative and mode flags.
    pub flags: Flags,
    /// Activity log, newest first, at most [`LOG_CAPACITY`] entries.
    pub logs: Vec<LogEntry>,
    /// Skills.
    pub proficiency: Proficiency,
    /// Lifetime counters.
    pub stats: Stats,
    /// Human-factors gauges and timers.
    pub hf_stats: HfStats,
    /// Tracked rotables.
    pub rotables: Vec<Rotable>,
    /// Discovered, unanalyzed anomalies.
    pub anomalies: Vec<Anomaly>,
    /// Condition of each tool in `[0, 100]`.
    pub tool_conditions: BTreeMap<ToolId, f64>,
    /// Delivered mail.
    pub mail: Vec<MailMessage>,
    /// Current work card.
    pub active_job: Option<Job>,
    /// Current event.
    pub active_event: Option<ActiveEvent>,
    /// Hazards in progress.
    pub active_hazards: Vec<ActiveHazard>,
    /// Multi-step encounter in progress.
    pub active_scenario: Option<ScenarioState>,
    /// Toasts waiting for the UI.
    pub notification_queue: Vec<Notification>,
    /// Vending machine prices keyed by item id.
    pub vending_prices: BTreeMap<String, f64>,
    /// Archive terminal session.
    pub archive_terminal: TerminalState,
    /// Maintenance terminal session.
    pub maintenance_terminal: TerminalState,
    /// Epoch milliseconds of the last load or commit.
    #[ts(type = "number")]
    pub last_update: i64,
}

impl Default for GameState {
    fn default() -> Self {
        let mut tool_conditions = BTreeMap::new();
        tool_conditions.insert(ToolId::TorqueWrench, GAUGE_MAX);

        let vending_prices = [
            ("coffee", 10.0),
            ("venom", 25.0),
            ("snack", 8.0),
            ("mystery_button", 0.0),
        ]
        .into_iter()
        .map(|(id, price)| (id.to_owned(), price))
        .collect();

        Self {
            resources: Resources::default(),
            inventory: Inventory::default(),
            flags: Flags::default(),
            logs: Vec::new(),
            proficiency: Proficiency::default(),
            stats: Stats::default(),
            hf_stats: HfStats::default(),
            rotables: Vec::new(),
            anomalies: Vec::new(),
            tool_conditions,
            mail: Vec::new(),
            active_job: None,
            active_event: None,
            active_hazards: Vec::new(),
            active_scenario: None,
            notification_queue: Vec::new(),
            vending_prices,
            archive_terminal: TerminalState {
                cwd: "/records".to_owned(),
                ..TerminalState::default()
            },
            maintenance_terminal: TerminalState {
                cwd: "/amos".to_owned(),
                ..TerminalState::default()
            },
            last_update: 0,
        }
    }
}

impl GameState {
    /// Prepend a log entry, dropping the oldest beyond [`LOG_CAPACITY`].
    pub fn push_log(&mut self, text: impl Into<String>, log_type: LogType, timestamp: i64) {
        let entry = LogEntry {
            id: Uuid::now_v7().to_string(),
            text: text.into(),
            log_type,
            timestamp,
        };
        self.logs.insert(0, entry);
        self.logs.truncate(LOG_CAPACITY);
    }

    /// Queue a notification; an existing one with the same id is replaced
    /// in place so repeats refresh rather than stack.
    pub fn enqueue_notification(&mut self, notification: Notification) {
        if let Some(existing) = self
            .notification_queue
            .iter_mut()
            .find(|n| n.id == notification.id)
        {
            *existing = notification;
        } else {
            self.notification_queue.push(notification);
        }
    }

    /// Number of unread mail messages.
    pub fn unread_mail_count(&self) -> usize {
        self.mail.iter().filter(|m| !m.read).count()
    }

    /// Condition of a tool, zero when never recorded.
    pub fn tool_condition(&self, tool: ToolId) -> f64 {
        self.tool_conditions.get(&tool).copied().unwrap_or(0.0)
    }

    /// Whether a tool is owned and still has condition left.
    pub fn tool_serviceable(&self, tool: ToolId) -> bool {
        self.inventory.owns_tool(tool) && self.tool_condition(tool) > 0.0
    }

    /// Find a rotable by id.
    pub fn rotable(&self, id: &str) -> Option<&Rotable> {
        self.rotables.iter().find(|r| r.id == id)
    }

    /// Find a rotable by id, mutably.
    pub fn rotable_mut(&mut self, id: &str) -> Option<&mut Rotable> {
        self.rotables.iter_mut().find(|r| r.id == id)
    }
}
