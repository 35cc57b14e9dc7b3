//! Personal handlers: breaks, pills, the janitor, skills, and the
//! passive-income toggles.

use nightshift_types::LogType;
use serde_json::Value;
use tracing::debug;

use super::{ActionDraft, SANITY_SHIELD_MS, payload_str};
use crate::skills;

/// `TAKE_BREAK`.
pub fn take_break(d: &mut ActionDraft<'_, '_>) {
    d.state.resources.add_focus(20.0);
    d.state.hf_stats.add_fatigue(-15.0);
    d.state.resources.add_suspicion(3.0);
    d.log("You sit down for ten minutes. Someone notices.", LogType::Info);
}

/// `TALK_TO_JANITOR`: one draw. The janitor leaves afterwards.
pub fn talk_to_janitor(d: &mut ActionDraft<'_, '_>) {
    if !d.state.flags.janitor_present {
        d.fail("There is nobody here but you.");
        return;
    }
    d.state.flags.has_met_the_janitor = true;
    d.state.flags.janitor_present = false;

    let r = d.roll();
    if r < 0.3 {
        d.state.resources.kardex_fragments += 1.0;
        d.log(
            "The janitor presses a kardex card into your hand. \"You dropped this. In 1974.\"",
            LogType::Story,
        );
    } else if r < 0.7 {
        d.state.resources.add_sanity(10.0);
        d.log("The janitor talks about nothing for a while. It helps.", LogType::Story);
    } else {
        d.state.resources.add_sanity(-5.0);
        d.log("The janitor stops mopping and looks at you for too long.", LogType::Story);
    }
}

/// `TAKE_PILLS`.
pub fn take_pills(d: &mut ActionDraft<'_, '_>) {
    if d.state.inventory.pills == 0 {
        d.fail("The blister pack is empty.");
        return;
    }
    d.state.inventory.pills -= 1;
    d.state.hf_stats.sanity_shield_timer = SANITY_SHIELD_MS;
    d.state.resources.add_sanity(5.0);
    d.log("The edges of things go soft.", LogType::Info);
}

/// `UNLOCK_SKILL { skillId }`. Every refusal is silent.
pub fn unlock_skill(d: &mut ActionDraft<'_, '_>, payload: &Value) {
    let id = payload_str(payload, "skillId").unwrap_or_default();
    match skills::check_unlock(id, &d.state.proficiency) {
        Ok(skill) => {
            d.state.proficiency.skill_points -= 1;
            d.state.proficiency.unlocked.push(skill.id.to_owned());
            d.log(format!("Skill unlocked: {}.", skill.label), LogType::Success);
        }
        Err(refusal) => debug!(skill = id, ?refusal, "Skill unlock refused"),
    }
}

fn toggled(d: &mut ActionDraft<'_, '_>, name: &str, on: bool) {
    let state = if on { "on" } else { "off" };
    d.log(format!("{name}: {state}."), LogType::Info);
}

/// `TOGGLE_AUTO_SRF`.
pub fn toggle_auto_srf(d: &mut ActionDraft<'_, '_>) {
    let on = !d.state.flags.auto_srf_active;
    d.state.flags.auto_srf_active = on;
    toggled(d, "Automatic SRF filing", on);
}

/// `TOGGLE_NIGHT_CREW`.
pub fn toggle_night_crew(d: &mut ActionDraft<'_, '_>) {
    let on = !d.state.flags.night_crew_active;
    d.state.flags.night_crew_active = on;
    toggled(d, "Night crew", on);
}

/// `TOGGLE_TRANSIT_CHECK_DELEGATION`.
pub fn toggle_transit_check_delegation(d: &mut ActionDraft<'_, '_>) {
    let on = !d.state.flags.transit_check_delegation_active;
    d.state.flags.transit_check_delegation_active = on;
    toggled(d, "Transit-check delegation", on);
}
