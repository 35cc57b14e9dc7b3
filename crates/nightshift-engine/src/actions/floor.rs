//! Hangar floor handlers: work cards, events, inspections, and the hum.
//!
//! Draw order per handler (tests script draws in this order):
//!
//! - `COMPLETE_JOB` / `RESOLVE_EVENT`: wear skip (only with `steady_hands`),
//!   wear amount (only when a tool is required), then for jobs the anomaly
//!   roll and, on a hit, the template pick
//! - `INSPECT_AIRCRAFT`: branch; rotable branch adds condition then
//!   traceability; anomaly branch adds the template pick
//! - `LISTEN_TO_HULL`: branch; anomaly branch adds the template pick
//! - `FOLLOW_THE_SOUND`: one draw per stage

use nightshift_types::{
    ActiveEvent, EventCategory, LogType, RewardBundle, Rotable, ScenarioState, ToolId,
};
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use super::{ActionDraft, payload_str};
use crate::catalog;
use crate::rewards::{self, RewardCategory};
use crate::skills;

/// Chance `steady_hands` skips tool wear.
pub const STEADY_HANDS_SKIP: f64 = 0.3;
/// Chance a non-retrofit job turns up an anomaly.
pub const JOB_ANOMALY_CHANCE: f64 = 0.05;
/// Scenario id of the multi-stage hum encounter.
pub const THE_HUM: &str = "the_hum";
/// Last stage of the hum; succeeding here pays out.
pub const THE_HUM_FINAL_STAGE: u32 = 2;

const HUM_STAGE_TEXT: [&str; 2] = [
    "The hum leads you past bay 4, under the tail of an aircraft nobody booked in.",
    "It is coming from inside a sealed wing tank. It knows your name.",
];

/// Apply `keen_eye` to a job or event reward.
fn with_keen_eye(d: &ActionDraft<'_, '_>, reward: RewardBundle) -> RewardBundle {
    if d.state.proficiency.has(skills::KEEN_EYE) {
        RewardBundle {
            xp: reward.xp * 1.1,
            ..reward
        }
    } else {
        reward
    }
}

/// Wear a tool after use, unless `steady_hands` saves it.
pub(crate) fn wear_tool(d: &mut ActionDraft<'_, '_>, tool: ToolId) {
    if d.state.proficiency.has(skills::STEADY_HANDS) && d.roll() < STEADY_HANDS_SKIP {
        return;
    }
    let amount = 2.0 + 6.0 * d.roll();
    let condition = d.state.tool_conditions.entry(tool).or_insert(0.0);
    *condition = (*condition - amount).max(0.0);
}

/// `COMPLETE_JOB`.
pub fn complete_job(d: &mut ActionDraft<'_, '_>) {
    let Some(job) = d.state.active_job.clone() else {
        d.fail("There is no work card to sign off.");
        return;
    };
    if !d.require_tool(job.required_tool) {
        return;
    }

    let reward = with_keen_eye(d, job.reward);
    rewards::grant(&mut d.state, reward);
    d.state.stats.jobs_completed = d.state.stats.jobs_completed.saturating_add(1);
    if let Some(tool) = job.required_tool {
        wear_tool(d, tool);
    }
    d.log(format!("Signed off: {}.", job.title), LogType::Success);

    if !job.is_retrofit
        && d.roll() < JOB_ANOMALY_CHANCE
        && let Some(label) = d.discover_anomaly()
    {
        d.log(format!("Something about that job stays with you: {label}."), LogType::Story);
    }

    d.new_job();
}

/// `RESOLVE_EVENT`.
pub fn resolve_event(d: &mut ActionDraft<'_, '_>) {
    let Some(event) = d.state.active_event.clone() else {
        d.fail("Nothing needs resolving right now.");
        return;
    };
    if event.category == EventCategory::ComponentFailure {
        d.fail("A failed part cannot be talked away. Repair it.");
        return;
    }
    if !d.require_tool(event.required_tool) {
        return;
    }

    let ActiveEvent {
        id,
        title,
        reward,
        required_tool,
        ..
    } = event;
    let reward = with_keen_eye(d, reward);
    rewards::grant(&mut d.state, reward);
    d.state.stats.events_resolved = d.state.stats.events_resolved.saturating_add(1);
    if let Some(tool) = required_tool {
        wear_tool(d, tool);
    }
    if id == catalog::HYDRAULIC_CONTAMINATION {
        d.state.flags.contamination_risk = false;
    }
    d.state.active_event = None;
    d.log(format!("Resolved: {title}."), LogType::Success);
}

/// `INSPECT_AIRCRAFT`.
pub fn inspect_aircraft(d: &mut ActionDraft<'_, '_>) {
    let r = d.roll();
    if r < 0.1 {
        if let Some(label) = d.discover_anomaly() {
            d.log(format!("Behind an access panel: {label}."), LogType::Story);
        }
    } else if r < 0.3 {
        let condition = 30.0 + 70.0 * d.roll();
        let untraceable = d.roll() < 0.25;
        let slot = d.state.rotables.len() % catalog::ROTABLE_PARTS.len();
        let (label, part_number) = catalog::ROTABLE_PARTS
            .get(slot)
            .copied()
            .unwrap_or(("Unidentified Unit", "UNKNOWN"));
        let serial = Uuid::now_v7().as_u128() as u32;
        d.state.rotables.push(Rotable {
            id: Uuid::now_v7().to_string(),
            label: label.to_owned(),
            part_number: part_number.to_owned(),
            serial_number: format!("SN-{serial:08X}"),
            condition,
            is_installed: true,
            is_untraceable: untraceable,
            is_red_tagged: false,
        });
        let note = if untraceable {
            " The data plate has been ground off."
        } else {
            ""
        };
        d.log(
            format!("Logged a {label} at {condition:.0}% condition.{note}"),
            LogType::Info,
        );
    } else if r < 0.6 {
        d.state.resources.alclad += 5.0;
        d.state.resources.rivets += 20.0;
        d.log("Salvaged offcuts: 5 alclad, 20 rivets.", LogType::Info);
    } else {
        d.state.resources.add_experience(15.0);
        d.log("Routine walkaround. Nothing to report.", LogType::Info);
    }
}

fn hangar_task_tool(task: &str) -> Option<ToolId> {
    match task {
        "rivet_panel" => Some(ToolId::RivetGun),
        "torque_check" => Some(ToolId::TorqueWrench),
        _ => None,
    }
}

/// `PERFORM_HANGAR_TASK { task }`.
pub fn perform_hangar_task(d: &mut ActionDraft<'_, '_>, payload: &Value) {
    let Some(task) = payload_str(payload, "task") else {
        d.fail("Which task?");
        return;
    };
    let Some(reward) = rewards::calculate_reward(RewardCategory::Hangar, task, &d.state.proficiency)
    else {
        d.fail(format!("There is no hangar task called {task}."));
        return;
    };
    if !d.require_tool(hangar_task_tool(task)) {
        return;
    }
    rewards::grant(&mut d.state, reward);
    d.log(format!("Hangar task done: {task}."), LogType::Success);
}

/// `LISTEN_TO_HULL`.
pub fn listen_to_hull(d: &mut ActionDraft<'_, '_>) {
    let r = d.roll();
    if r < 0.15 {
        d.frighten();
        d.state.resources.add_sanity(-8.0);
        d.log("Something on the other side of the skin listens back.", LogType::Story);
    } else if r < 0.4 {
        if let Some(label) = d.discover_anomaly() {
            d.log(format!("You hear it before you see it: {label}."), LogType::Story);
        }
    } else if r < 0.7 {
        d.state.resources.kardex_fragments += 1.0;
        d.state.resources.add_experience(30.0);
        d.log("A tapping, in a pattern. You copy it onto a kardex card.", LogType::Info);
    } else {
        d.state.resources.add_sanity(2.0);
        d.log("Just the hangar settling. It is almost restful.", LogType::Info);
    }
}

/// `FOLLOW_THE_SOUND`: advance the hum one stage.
pub fn follow_the_sound(d: &mut ActionDraft<'_, '_>) {
    let current = d
        .state
        .active_scenario
        .as_ref()
        .filter(|s| s.id == THE_HUM)
        .map(|s| s.stage);
    let stage = if let Some(stage) = current {
        stage
    } else {
        let started_at = d.now();
        d.state.active_scenario = Some(ScenarioState {
            id: THE_HUM.to_owned(),
            stage: 0,
            started_at,
        });
        0
    };

    if d.roll() < 0.3 {
        d.frighten();
        d.state.resources.add_sanity(-10.0);
        d.state.active_scenario = None;
        d.log("The hum stops. Something else starts breathing.", LogType::Story);
        return;
    }

    if stage >= THE_HUM_FINAL_STAGE {
        d.state.resources.kardex_fragments += 2.0;
        d.state.resources.add_experience(200.0);
        d.state.active_scenario = None;
        info!("The hum encounter completed");
        d.log(
            "You find the source. You write down what it tells you, every word.",
            LogType::Story,
        );
        return;
    }

    if let Some(scenario) = d.state.active_scenario.as_mut() {
        scenario.stage = stage.saturating_add(1);
    }
    let text = HUM_STAGE_TEXT
        .get(stage as usize)
        .copied()
        .unwrap_or("The hum continues.");
    d.log(text, LogType::Story);
}
