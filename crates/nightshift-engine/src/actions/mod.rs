//! The Action Processor.
//!
//! Resolves one discrete player command against the current state and
//! returns the next snapshot. The input snapshot is never touched; every
//! mutation lands on an [`ActionDraft`] built from a fresh copy.
//!
//! # Order of operations
//!
//! 1. Parse the action id (unknown ids only go through the cost step)
//! 2. Compute the effective focus cost ([`costs::effective_cost`])
//! 3. Decline with a warning log when focus is short
//! 4. Deduct the cost
//! 5. Dispatch to exactly one handler
//!
//! A handler that finds the action cannot actually be completed calls
//! [`ActionDraft::fail`], which refunds the deducted focus and logs an
//! error. That is distinct from the decline in step 3, which leaves the
//! state untouched apart from the warning.
//!
//! # Submodules
//!
//! - [`floor`] -- Jobs, events, aircraft inspection, hangar tasks, the hum
//! - [`rotables`] -- Repair, dispose, harvest, red-tag, install, anomaly analysis
//! - [`office`] -- Paperwork, regulations, bribes, mail, dossier, the ending
//! - [`supply`] -- Shop, vending, tool care, scrap, scavenging
//! - [`personal`] -- Breaks, pills, the janitor, skills, passive-income toggles

pub mod floor;
pub mod office;
pub mod personal;
pub mod rotables;
pub mod supply;

use nightshift_types::{Anomaly, EventCategory, GameState, LogType, ToolId};
use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::catalog;
use crate::context::ActionContext;
use crate::costs;

/// Every action id the processor recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionId {
    /// Sign off the active work card.
    CompleteJob,
    /// Deal with the active event.
    ResolveEvent,
    /// Spend a skill point.
    UnlockSkill,
    /// Toggle automatic SRF filing.
    ToggleAutoSrf,
    /// Toggle the night crew.
    ToggleNightCrew,
    /// Toggle transit-check delegation.
    ToggleTransitCheckDelegation,
    /// Walk round the aircraft.
    InspectAircraft,
    /// Do a hangar task (`task` payload).
    PerformHangarTask,
    /// Press an ear to the fuselage.
    ListenToHull,
    /// Advance the multi-stage hum encounter.
    FollowTheSound,
    /// Overhaul a rotable.
    RepairRotable,
    /// Scrap a rotable through official channels.
    DisposeRotable,
    /// Strip a rotable for materials.
    HarvestRotable,
    /// Tag a rotable unserviceable.
    RedTagRotable,
    /// Fit a rotable to an aircraft.
    InstallRotable,
    /// Study a discovered anomaly.
    AnalyzeAnomaly,
    /// Do an office task (`task` payload).
    PerformOfficeTask,
    /// Tidy the paper trail.
    FilePaperwork,
    /// Read the regulations looking for gaps.
    StudyRegulations,
    /// Take the extra hours.
    AcceptOvertime,
    /// Pay the auditor to look away.
    BribeAuditor,
    /// Open a mail message.
    ReadMail,
    /// Build the break-room PC.
    AssemblePc,
    /// Bind the kardex fragments into evidence.
    CompileDossier,
    /// Blow the whistle.
    FileFinalReport,
    /// Buy from the toolroom shop.
    BuyItem,
    /// Buy from the vending machine.
    BuyVending,
    /// Recalibrate a tool.
    RepairTool,
    /// Ask the toolroom master for help.
    AskToolroomMaster,
    /// Sell scrap metal.
    SellScrap,
    /// Go through bins and cages (`spot` payload).
    Scavenge,
    /// Sit down for a bit.
    TakeBreak,
    /// Talk to the janitor.
    TalkToJanitor,
    /// Take a pill.
    TakePills,
}

impl ActionId {
    /// Every action, in catalogue order.
    pub const ALL: [Self; 34] = [
        Self::CompleteJob,
        Self::ResolveEvent,
        Self::UnlockSkill,
        Self::ToggleAutoSrf,
        Self::ToggleNightCrew,
        Self::ToggleTransitCheckDelegation,
        Self::InspectAircraft,
        Self::PerformHangarTask,
        Self::ListenToHull,
        Self::FollowTheSound,
        Self::RepairRotable,
        Self::DisposeRotable,
        Self::HarvestRotable,
        Self::RedTagRotable,
        Self::InstallRotable,
        Self::AnalyzeAnomaly,
        Self::PerformOfficeTask,
        Self::FilePaperwork,
        Self::StudyRegulations,
        Self::AcceptOvertime,
        Self::BribeAuditor,
        Self::ReadMail,
        Self::AssemblePc,
        Self::CompileDossier,
        Self::FileFinalReport,
        Self::BuyItem,
        Self::BuyVending,
        Self::RepairTool,
        Self::AskToolroomMaster,
        Self::SellScrap,
        Self::Scavenge,
        Self::TakeBreak,
        Self::TalkToJanitor,
        Self::TakePills,
    ];

    /// Wire id, e.g. `COMPLETE_JOB`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CompleteJob => "COMPLETE_JOB",
            Self::ResolveEvent => "RESOLVE_EVENT",
            Self::UnlockSkill => "UNLOCK_SKILL",
            Self::ToggleAutoSrf => "TOGGLE_AUTO_SRF",
            Self::ToggleNightCrew => "TOGGLE_NIGHT_CREW",
            Self::ToggleTransitCheckDelegation => "TOGGLE_TRANSIT_CHECK_DELEGATION",
            Self::InspectAircraft => "INSPECT_AIRCRAFT",
            Self::PerformHangarTask => "PERFORM_HANGAR_TASK",
            Self::ListenToHull => "LISTEN_TO_HULL",
            Self::FollowTheSound => "FOLLOW_THE_SOUND",
            Self::RepairRotable => "REPAIR_ROTABLE",
            Self::DisposeRotable => "DISPOSE_ROTABLE",
            Self::HarvestRotable => "HARVEST_ROTABLE",
            Self::RedTagRotable => "RED_TAG_ROTABLE",
            Self::InstallRotable => "INSTALL_ROTABLE",
            Self::AnalyzeAnomaly => "ANALYZE_ANOMALY",
            Self::PerformOfficeTask => "PERFORM_OFFICE_TASK",
            Self::FilePaperwork => "FILE_PAPERWORK",
            Self::StudyRegulations => "STUDY_REGULATIONS",
            Self::AcceptOvertime => "ACCEPT_OVERTIME",
            Self::BribeAuditor => "BRIBE_AUDITOR",
            Self::ReadMail => "READ_MAIL",
            Self::AssemblePc => "ASSEMBLE_PC",
            Self::CompileDossier => "COMPILE_DOSSIER",
            Self::FileFinalReport => "FILE_FINAL_REPORT",
            Self::BuyItem => "BUY_ITEM",
            Self::BuyVending => "BUY_VENDING",
            Self::RepairTool => "REPAIR_TOOL",
            Self::AskToolroomMaster => "ASK_TOOLROOM_MASTER",
            Self::SellScrap => "SELL_SCRAP",
            Self::Scavenge => "SCAVENGE",
            Self::TakeBreak => "TAKE_BREAK",
            Self::TalkToJanitor => "TALK_TO_JANITOR",
            Self::TakePills => "TAKE_PILLS",
        }
    }

    /// Parse a wire id.
    pub fn parse(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.as_str() == id)
    }
}

impl core::fmt::Display for ActionId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Draft
// ---------------------------------------------------------------------------

/// Working copy for one action resolution.
///
/// Owns the next snapshot and borrows the context. Handlers mutate
/// `state` directly and use the helpers for logs, draws, refunds, and the
/// content-layer hooks.
pub struct ActionDraft<'d, 'a> {
    /// The next snapshot under construction.
    pub state: GameState,
    ctx: &'d mut ActionContext<'a>,
    cost: f64,
}

impl<'d, 'a> ActionDraft<'d, 'a> {
    fn new(state: GameState, ctx: &'d mut ActionContext<'a>, cost: f64) -> Self {
        Self { state, ctx, cost }
    }

    /// Focus deducted for this action.
    pub const fn cost(&self) -> f64 {
        self.cost
    }

    /// Wall-clock epoch milliseconds.
    pub fn now(&self) -> i64 {
        self.ctx.now_ms
    }

    /// Take one draw from the random source.
    pub fn roll(&mut self) -> f64 {
        self.ctx.rng.next_f64()
    }

    /// Pick an index in `0..len` from one draw.
    pub fn pick(&mut self, len: usize) -> Option<usize> {
        self.ctx.rng.pick(len)
    }

    /// Prepend a log entry.
    pub fn log(&mut self, text: impl Into<String>, log_type: LogType) {
        let now = self.ctx.now_ms;
        self.state.push_log(text, log_type, now);
    }

    /// Logical failure: refund the deducted focus and log an error.
    pub fn fail(&mut self, text: impl Into<String>) {
        let text = text.into();
        warn!(reason = %text, refund = self.cost, "Action could not be completed");
        self.state.resources.add_focus(self.cost);
        self.cost = 0.0;
        self.log(text, LogType::Error);
    }

    /// Hand an event request to the content layer.
    pub fn trigger(&mut self, category: EventCategory, id: Option<&str>) {
        debug!(category = %category, id = ?id, "Event requested");
        self.ctx.hooks.trigger_event(category, id);
    }

    /// Replace the active job with a fresh one from the content layer.
    pub fn new_job(&mut self) {
        self.state.active_job = Some(self.ctx.hooks.create_job());
    }

    /// Start a fear episode (timer reset to its full length).
    pub fn frighten(&mut self) {
        self.state.flags.is_afraid = true;
        self.state.hf_stats.fear_timer = FEAR_DURATION_MS;
    }

    /// Append an anomaly from a random template. Takes one draw.
    pub fn discover_anomaly(&mut self) -> Option<&'static str> {
        let idx = self.pick(catalog::ANOMALIES.len())?;
        let template = catalog::ANOMALIES.get(idx)?;
        self.state.anomalies.push(Anomaly {
            id: Uuid::now_v7().to_string(),
            template_id: template.id.to_owned(),
            discovered_at: self.now(),
        });
        Some(template.label)
    }

    /// Whether a tool is owned and serviceable; fails the action if not.
    pub fn require_tool(&mut self, tool: Option<ToolId>) -> bool {
        match tool {
            Some(t) if !self.state.tool_serviceable(t) => {
                self.fail(format!("You need a serviceable {} for that.", t.label()));
                false
            }
            _ => true,
        }
    }

    fn finish(self) -> GameState {
        self.state
    }
}

impl core::fmt::Debug for ActionDraft<'_, '_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ActionDraft")
            .field("cost", &self.cost)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Timers set by actions (milliseconds)
// ---------------------------------------------------------------------------

/// Fear episode length.
pub const FEAR_DURATION_MS: f64 = 20_000.0;
/// Overtime schedule compression length.
pub const SCHEDULE_COMPRESSION_MS: f64 = 120_000.0;
/// Pill sanity shield length.
pub const SANITY_SHIELD_MS: f64 = 60_000.0;
/// Found-loophole length.
pub const FOUND_LOOPHOLE_MS: f64 = 60_000.0;
/// Toolroom master cooldown.
pub const TOOLROOM_MASTER_COOLDOWN_MS: f64 = 300_000.0;
/// Coffee efficiency boost length.
pub const EFFICIENCY_BOOST_MS: f64 = 30_000.0;
/// Venom surge length.
pub const VENOM_SURGE_MS: f64 = 45_000.0;
/// Janitor cooldown.
pub const JANITOR_COOLDOWN_MS: f64 = 300_000.0;

// ---------------------------------------------------------------------------
// Payload helpers
// ---------------------------------------------------------------------------

/// Read a string field from the payload.
pub fn payload_str<'p>(payload: &'p Value, key: &str) -> Option<&'p str> {
    payload.get(key).and_then(Value::as_str)
}

/// Read a numeric field from the payload.
pub fn payload_f64(payload: &Value, key: &str) -> Option<f64> {
    payload.get(key).and_then(Value::as_f64)
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Resolve one action and return the next snapshot.
///
/// Never fails: unknown ids, declines, and logical failures are all
/// expressed in the returned state.
pub fn process_action(
    state: &GameState,
    action_id: &str,
    payload: &Value,
    ctx: &mut ActionContext<'_>,
) -> GameState {
    let Some(action) = ActionId::parse(action_id) else {
        debug!(action_id, "Unknown action id, ignoring");
        return state.clone();
    };

    let cost = f64::from(costs::effective_cost(action, state, payload));
    let mut next = state.clone();

    if cost > 0.0 && next.resources.focus < cost {
        debug!(%action, cost, focus = next.resources.focus, "Declined: not enough focus");
        next.push_log(
            format!("Too exhausted for that. It needs {cost} focus."),
            LogType::Warning,
            ctx.now_ms,
        );
        return next;
    }

    next.resources.add_focus(-cost);
    let mut draft = ActionDraft::new(next, ctx, cost);
    dispatch(action, &mut draft, payload);
    draft.finish()
}

fn dispatch(action: ActionId, d: &mut ActionDraft<'_, '_>, payload: &Value) {
    match action {
        ActionId::CompleteJob => floor::complete_job(d),
        ActionId::ResolveEvent => floor::resolve_event(d),
        ActionId::InspectAircraft => floor::inspect_aircraft(d),
        ActionId::PerformHangarTask => floor::perform_hangar_task(d, payload),
        ActionId::ListenToHull => floor::listen_to_hull(d),
        ActionId::FollowTheSound => floor::follow_the_sound(d),
        ActionId::RepairRotable => rotables::repair(d, payload),
        ActionId::DisposeRotable => rotables::dispose(d, payload),
        ActionId::HarvestRotable => rotables::harvest(d, payload),
        ActionId::RedTagRotable => rotables::red_tag(d, payload),
        ActionId::InstallRotable => rotables::install(d, payload),
        ActionId::AnalyzeAnomaly => rotables::analyze_anomaly(d, payload),
        ActionId::PerformOfficeTask => office::perform_office_task(d, payload),
        ActionId::FilePaperwork => office::file_paperwork(d),
        ActionId::StudyRegulations => office::study_regulations(d),
        ActionId::AcceptOvertime => office::accept_overtime(d),
        ActionId::BribeAuditor => office::bribe_auditor(d),
        ActionId::ReadMail => office::read_mail(d, payload),
        ActionId::AssemblePc => office::assemble_pc(d),
        ActionId::CompileDossier => office::compile_dossier(d),
        ActionId::FileFinalReport => office::file_final_report(d),
        ActionId::BuyItem => supply::buy_item(d, payload),
        ActionId::BuyVending => supply::buy_vending(d, payload),
        ActionId::RepairTool => supply::repair_tool(d, payload),
        ActionId::AskToolroomMaster => supply::ask_toolroom_master(d),
        ActionId::SellScrap => supply::sell_scrap(d),
        ActionId::Scavenge => supply::scavenge(d, payload),
        ActionId::TakeBreak => personal::take_break(d),
        ActionId::TalkToJanitor => personal::talk_to_janitor(d),
        ActionId::TakePills => personal::take_pills(d),
        ActionId::UnlockSkill => personal::unlock_skill(d, payload),
        ActionId::ToggleAutoSrf => personal::toggle_auto_srf(d),
        ActionId::ToggleNightCrew => personal::toggle_night_crew(d),
        ActionId::ToggleTransitCheckDelegation => personal::toggle_transit_check_delegation(d),
    }
}
