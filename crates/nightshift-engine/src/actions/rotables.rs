//! Rotable and anomaly handlers.
//!
//! Every rotable action takes a `rotableId` payload. A rotable tied to an
//! active component failure can be repaired but not disposed of or
//! harvested. Harvesting removes the part.

use nightshift_types::{EventCategory, LogType, Rotable};
use serde_json::Value;
use tracing::info;

use super::{ActionDraft, payload_str};
use crate::catalog;
use crate::progression;

/// Alclad consumed by a repair.
pub const REPAIR_ALCLAD: f64 = 10.0;
/// Rivets consumed by a repair.
pub const REPAIR_RIVETS: f64 = 20.0;
/// Credits charged for official disposal.
pub const DISPOSAL_FEE: f64 = 500.0;

/// Resolve the payload's rotable, failing the action when it is missing.
fn target(d: &mut ActionDraft<'_, '_>, payload: &Value) -> Option<Rotable> {
    let Some(id) = payload_str(payload, "rotableId") else {
        d.fail("Which part?");
        return None;
    };
    let found = d.state.rotable(id).cloned();
    if found.is_none() {
        d.fail("That part is not on the books.");
    }
    found
}

fn is_failing(d: &ActionDraft<'_, '_>, rotable_id: &str) -> bool {
    d.state.flags.active_component_failure
        && d.state.flags.failing_rotable_id.as_deref() == Some(rotable_id)
}

/// `REPAIR_ROTABLE { rotableId }`.
pub fn repair(d: &mut ActionDraft<'_, '_>, payload: &Value) {
    let Some(rotable) = target(d, payload) else {
        return;
    };
    let res = &d.state.resources;
    if res.alclad < REPAIR_ALCLAD || res.rivets < REPAIR_RIVETS {
        d.fail("A proper repair needs 10 alclad and 20 rivets.");
        return;
    }
    d.state.resources.alclad -= REPAIR_ALCLAD;
    d.state.resources.rivets -= REPAIR_RIVETS;
    if let Some(r) = d.state.rotable_mut(&rotable.id) {
        r.condition = 100.0;
        r.is_red_tagged = false;
    }
    d.state.stats.rotables_repaired = d.state.stats.rotables_repaired.saturating_add(1);
    d.state.resources.add_experience(50.0);

    if is_failing(d, &rotable.id) {
        d.state.flags.active_component_failure = false;
        d.state.flags.failing_rotable_id = None;
        if d
            .state
            .active_event
            .as_ref()
            .is_some_and(|e| e.category == EventCategory::ComponentFailure)
        {
            d.state.active_event = None;
            d.state.stats.events_resolved = d.state.stats.events_resolved.saturating_add(1);
        }
        info!(rotable = %rotable.id, "Component failure cleared by repair");
        d.log(
            format!("{} overhauled. The failure is cleared.", rotable.label),
            LogType::Success,
        );
    } else {
        d.log(format!("{} overhauled to full condition.", rotable.label), LogType::Success);
    }
}

/// `DISPOSE_ROTABLE { rotableId }`.
pub fn dispose(d: &mut ActionDraft<'_, '_>, payload: &Value) {
    let Some(rotable) = target(d, payload) else {
        return;
    };
    if is_failing(d, &rotable.id) {
        d.fail("You cannot dispose of a part that is failing on the line. Repair it.");
        return;
    }
    if d.state.resources.credits < DISPOSAL_FEE {
        d.fail("Official disposal costs 500 credits.");
        return;
    }
    d.state.resources.add_credits(-DISPOSAL_FEE);
    d.state.rotables.retain(|r| r.id != rotable.id);
    d.state.stats.rotables_disposed = d.state.stats.rotables_disposed.saturating_add(1);
    d.log(format!("{} disposed of through stores.", rotable.label), LogType::Info);
}

/// `HARVEST_ROTABLE { rotableId }`: strip for materials. The part is gone.
pub fn harvest(d: &mut ActionDraft<'_, '_>, payload: &Value) {
    let Some(rotable) = target(d, payload) else {
        return;
    };
    if rotable.is_installed {
        d.fail("Pull it off the aircraft before you strip it.");
        return;
    }
    if is_failing(d, &rotable.id) {
        d.fail("That part is the subject of an open failure report.");
        return;
    }
    let alclad = (rotable.condition / 10.0).floor();
    d.state.resources.alclad += alclad;
    d.state.resources.scrap_metal += 5.0;
    d.state.rotables.retain(|r| r.id != rotable.id);
    d.log(
        format!("Stripped the {}: {alclad} alclad and 5 scrap.", rotable.label),
        LogType::Info,
    );
}

/// `RED_TAG_ROTABLE { rotableId }`.
pub fn red_tag(d: &mut ActionDraft<'_, '_>, payload: &Value) {
    let Some(rotable) = target(d, payload) else {
        return;
    };
    if rotable.is_red_tagged {
        d.fail("It is already tagged.");
        return;
    }
    if let Some(r) = d.state.rotable_mut(&rotable.id) {
        r.is_red_tagged = true;
        r.is_installed = false;
    }
    d.state.resources.add_experience(25.0);
    if rotable.is_untraceable {
        d.state.resources.add_suspicion(-5.0);
        d.log(
            format!("Red-tagged the {}. Quality notes your diligence.", rotable.label),
            LogType::Success,
        );
    } else {
        d.log(format!("Red-tagged the {}.", rotable.label), LogType::Info);
    }
}

/// `INSTALL_ROTABLE { rotableId }`.
pub fn install(d: &mut ActionDraft<'_, '_>, payload: &Value) {
    let Some(rotable) = target(d, payload) else {
        return;
    };
    if rotable.is_installed {
        d.fail("It is already fitted.");
        return;
    }
    if rotable.is_red_tagged || rotable.condition <= 0.0 {
        d.fail("That part is unserviceable.");
        return;
    }
    if let Some(r) = d.state.rotable_mut(&rotable.id) {
        r.is_installed = true;
    }
    d.state.resources.add_experience(30.0);
    if rotable.is_untraceable {
        d.state.resources.add_suspicion(10.0);
        d.log(
            format!("Fitted the {}. Nobody asks where it came from. Yet.", rotable.label),
            LogType::Warning,
        );
    } else {
        d.log(format!("Fitted the {}.", rotable.label), LogType::Success);
    }
}

/// `ANALYZE_ANOMALY { anomalyId }`.
///
/// Draws: fear roll, then the manifestation roll when the template has one.
pub fn analyze_anomaly(d: &mut ActionDraft<'_, '_>, payload: &Value) {
    let Some(id) = payload_str(payload, "anomalyId") else {
        d.fail("Which anomaly?");
        return;
    };
    let Some(pos) = d.state.anomalies.iter().position(|a| a.id == id) else {
        d.fail("Whatever it was, it is gone now.");
        return;
    };
    let anomaly = d.state.anomalies.remove(pos);
    d.state.stats.anomalies_analyzed = d.state.stats.anomalies_analyzed.saturating_add(1);

    let Some(template) = catalog::anomaly(&anomaly.template_id) else {
        d.state.resources.add_experience(20.0);
        d.log("You study it until it stops making sense.", LogType::Story);
        return;
    };

    d.state.resources.add_experience(template.xp);
    d.state.resources.kardex_fragments += template.kardex;
    if d.state.hf_stats.sanity_shield_timer > 0.0 {
        d.log("The pills keep it at arm's length.", LogType::Info);
    } else {
        d.state.resources.add_sanity(-template.sanity_cost);
    }

    if d.roll() < template.fear_chance {
        d.frighten();
    }

    if let Some((event_id, chance)) = template.manifestation
        && d.roll() < chance
        && d.state.active_event.is_none()
        && progression::can_spawn_event_category(EventCategory::EldritchManifestation, &d.state)
    {
        d.trigger(EventCategory::EldritchManifestation, Some(event_id));
    }

    d.log(format!("Analyzed: {}.", template.label), LogType::Story);
}
