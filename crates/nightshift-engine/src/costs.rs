//! Focus costs for each action and the modifier pipeline.
//!
//! All values are `u32`; each multiplicative stage rounds as listed so the
//! result matches the table exactly.
//!
//! # Order of operations
//!
//! 1. Base cost: payload `cost`, else the sub-type table, else [`base_cost`]
//! 2. Fear: ×1.5, floored
//! 3. Efficiency boost: ×0.9, floored
//! 4. Performance-improvement plan: ×1.2, ceiled
//! 5. Flat skill discount, saturating at zero
//!
//! A found loophole overrides `FILE_PAPERWORK` to zero before any of this.

use nightshift_types::GameState;
use serde_json::Value;

use crate::actions::ActionId;
use crate::skills;

/// Return the base focus cost for an action.
#[allow(clippy::match_same_arms)] // Each action keeps its own catalogue entry.
pub const fn base_cost(action: ActionId) -> u32 {
    match action {
        ActionId::CompleteJob => 10,
        ActionId::ResolveEvent => 15,
        ActionId::UnlockSkill => 0,
        ActionId::ToggleAutoSrf => 0,
        ActionId::ToggleNightCrew => 0,
        ActionId::ToggleTransitCheckDelegation => 0,
        ActionId::InspectAircraft => 15,
        // Sub-typed; the fallback is the cheapest task.
        ActionId::PerformHangarTask => 6,
        ActionId::ListenToHull => 5,
        ActionId::FollowTheSound => 10,
        ActionId::RepairRotable => 20,
        ActionId::DisposeRotable => 5,
        ActionId::HarvestRotable => 10,
        ActionId::RedTagRotable => 5,
        ActionId::InstallRotable => 10,
        ActionId::AnalyzeAnomaly => 20,
        ActionId::PerformOfficeTask => 8,
        ActionId::FilePaperwork => 10,
        ActionId::StudyRegulations => 12,
        ActionId::AcceptOvertime => 0,
        ActionId::BribeAuditor => 10,
        ActionId::ReadMail => 0,
        ActionId::AssemblePc => 15,
        ActionId::CompileDossier => 20,
        ActionId::FileFinalReport => 30,
        ActionId::BuyItem => 0,
        ActionId::BuyVending => 0,
        ActionId::RepairTool => 5,
        ActionId::AskToolroomMaster => 5,
        ActionId::SellScrap => 0,
        ActionId::Scavenge => 8,
        ActionId::TakeBreak => 0,
        ActionId::TalkToJanitor => 5,
        ActionId::TakePills => 0,
    }
}

/// Cost of a hangar task sub-type.
pub fn hangar_task_cost(task: &str) -> Option<u32> {
    match task {
        "rivet_panel" => Some(10),
        "torque_check" => Some(8),
        "lube_gear" => Some(6),
        _ => None,
    }
}

/// Cost of an office task sub-type.
pub fn office_task_cost(task: &str) -> Option<u32> {
    match task {
        "file_srf" => Some(8),
        "transit_check" => Some(12),
        "archive_records" => Some(10),
        _ => None,
    }
}

/// Cost of a scavenging spot.
pub fn scavenge_cost(spot: &str) -> Option<u32> {
    match spot {
        "bin_dive" => Some(8),
        "parts_cage" => Some(12),
        _ => None,
    }
}

/// Flat discount the player's skills grant on an action.
pub fn skill_discount(action: ActionId, state: &GameState) -> u32 {
    let prof = &state.proficiency;
    match action {
        ActionId::InspectAircraft | ActionId::PerformHangarTask | ActionId::CompleteJob
            if prof.has(skills::EFFICIENT_WORKFLOW) =>
        {
            1
        }
        ActionId::PerformOfficeTask | ActionId::FilePaperwork | ActionId::StudyRegulations
            if prof.has(skills::PAPER_TIGER) =>
        {
            2
        }
        _ => 0,
    }
}

/// Resolve the undiscounted cost for an action and its payload.
///
/// A fractional payload `cost` rounds up to the next whole point of focus.
fn resolve_base(action: ActionId, payload: &Value) -> u32 {
    if let Some(cost) = payload.get("cost").and_then(Value::as_f64) {
        return cost.max(0.0).ceil() as u32;
    }
    let sub = |key: &str| payload.get(key).and_then(Value::as_str);
    let sub_cost = match action {
        ActionId::PerformHangarTask => sub("task").and_then(hangar_task_cost),
        ActionId::PerformOfficeTask => sub("task").and_then(office_task_cost),
        ActionId::Scavenge => sub("spot").and_then(scavenge_cost),
        _ => None,
    };
    sub_cost.unwrap_or_else(|| base_cost(action))
}

/// Apply the multiplicative stages to an already-resolved base cost.
pub const fn apply_modifiers(base: u32, afraid: bool, efficiency_boost: bool, on_pip: bool) -> u32 {
    let mut cost = base;
    if afraid {
        cost = cost.saturating_mul(3) / 2;
    }
    if efficiency_boost {
        cost = cost.saturating_mul(9) / 10;
    }
    if on_pip {
        cost = cost.saturating_mul(6).saturating_add(4) / 5;
    }
    cost
}

/// Compute the focus an action will actually cost in the current state.
pub fn effective_cost(action: ActionId, state: &GameState, payload: &Value) -> u32 {
    if action == ActionId::FilePaperwork && state.hf_stats.found_loophole_timer > 0.0 {
        return 0;
    }
    let base = resolve_base(action, payload);
    let modified = apply_modifiers(
        base,
        state.flags.is_afraid,
        state.hf_stats.efficiency_boost_timer > 0.0,
        state.flags.on_pip,
    );
    modified.saturating_sub(skill_discount(action, state))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn fear_then_pip_stacks_in_order() {
        assert_eq!(apply_modifiers(15, true, false, true), 27);
        assert_eq!(apply_modifiers(15, true, false, false), 22);
    }

    #[test]
    fn efficiency_boost_floors() {
        assert_eq!(apply_modifiers(15, false, true, false), 13);
        assert_eq!(apply_modifiers(10, false, true, false), 9);
    }

    #[test]
    fn pip_ceils() {
        assert_eq!(apply_modifiers(11, false, false, true), 14);
        assert_eq!(apply_modifiers(10, false, false, true), 12);
    }

    #[test]
    fn payload_cost_overrides_table() {
        let state = GameState::default();
        let cost = effective_cost(ActionId::InspectAircraft, &state, &json!({ "cost": 3 }));
        assert_eq!(cost, 3);
    }

    #[test]
    fn fractional_payload_cost_rounds_up() {
        let state = GameState::default();
        let cost = |c: f64| effective_cost(ActionId::InspectAircraft, &state, &json!({ "cost": c }));
        assert_eq!(cost(2.9), 3);
        assert_eq!(cost(2.1), 3);
        assert_eq!(cost(2.0), 2);
        assert_eq!(cost(-4.5), 0);
    }

    #[test]
    fn sub_type_lookup() {
        let state = GameState::default();
        assert_eq!(
            effective_cost(ActionId::PerformHangarTask, &state, &json!({ "task": "rivet_panel" })),
            10
        );
        assert_eq!(
            effective_cost(ActionId::Scavenge, &state, &json!({ "spot": "parts_cage" })),
            12
        );
    }

    #[test]
    fn discount_applies_after_multipliers_and_saturates() {
        let mut state = GameState::default();
        state.proficiency.unlocked.push(skills::PAPER_TIGER.to_owned());
        state.flags.is_afraid = true;
        // floor(10 * 1.5) = 15, minus 2
        assert_eq!(effective_cost(ActionId::FilePaperwork, &state, &Value::Null), 13);
        assert_eq!(
            effective_cost(ActionId::FilePaperwork, &state, &json!({ "cost": 1 })),
            0
        );
    }

    #[test]
    fn loophole_makes_paperwork_free() {
        let mut state = GameState::default();
        state.hf_stats.found_loophole_timer = 1000.0;
        state.flags.on_pip = true;
        assert_eq!(effective_cost(ActionId::FilePaperwork, &state, &Value::Null), 0);
        assert_eq!(effective_cost(ActionId::StudyRegulations, &state, &Value::Null), 15);
    }
}
