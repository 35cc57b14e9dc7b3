//! Location-driven effects: the environmental profile, PPE advisories,
//! location risk, and slow wear on parts and precision tools.

use nightshift_types::{EventCategory, GameState, LocationId, Notification, NotificationVariant, ToolId};

use super::{may_spawn, request_event, roll_rate};
use crate::context::TickContext;
use crate::locations::{self, Ppe, TEMPERATURE_EASE_PER_SEC};

/// Chance per tick that a due advisory check actually runs.
pub const ADVISORY_SAMPLE_CHANCE: f64 = 0.05;
/// Minimum gap between advisory checks.
pub const ADVISORY_COOLDOWN_MS: i64 = 60_000;
/// Backshop suspicion gained per second.
pub const BACKSHOP_SUSPICION_PER_SEC: f64 = 0.03;
/// Suspicion floor for the backshop spot check.
pub const BACKSHOP_AUDIT_FLOOR: f64 = 40.0;
/// Backshop spot-check rate per second.
pub const BACKSHOP_AUDIT_PER_SEC: f64 = 0.0004;
/// Archive whisper rate per second.
pub const ARCHIVE_ELDRITCH_PER_SEC: f64 = 0.0008;
/// Rotable condition lost per second.
pub const ROTABLE_DECAY_PER_SEC: f64 = 0.01;
/// Precision tool condition lost per second.
pub const PRECISION_TOOL_DECAY_PER_SEC: f64 = 0.005;

/// Step 1.
pub fn apply_environment(state: &mut GameState, secs: f64, location: LocationId) {
    let profile = locations::profile(location);
    let noise = profile.noise.effects();
    state.hf_stats.noise_exposure = noise.exposure_db;

    state.resources.add_suspicion(noise.suspicion_per_sec * secs);
    let dampen = if profile.noise.is_loud() && state.inventory.has_ear_defenders {
        0.5
    } else {
        1.0
    };
    state.hf_stats.add_social_stress(noise.stress_per_sec * dampen * secs);
    state.resources.add_focus(-noise.focus_drain_per_sec * dampen * secs);

    if !state.flags.venom_surge_active {
        state.hf_stats.add_fatigue(profile.fatigue.per_sec() * secs);
    }

    state.hf_stats.temperature = locations::ease_toward(
        state.hf_stats.temperature,
        profile.target_temp,
        TEMPERATURE_EASE_PER_SEC * secs,
    );
}

/// Step 3. Sampled, then throttled by `stats.lastAdvisoryAt`.
pub fn check_advisory(state: &mut GameState, ctx: &mut TickContext<'_>, location: LocationId) {
    if ctx.now_ms - state.stats.last_advisory_at < ADVISORY_COOLDOWN_MS {
        return;
    }
    if !ctx.rng.chance(ADVISORY_SAMPLE_CHANCE) {
        return;
    }
    state.stats.last_advisory_at = ctx.now_ms;

    let missing = locations::missing_ppe(location, &state.inventory);
    if missing.is_empty() {
        return;
    }
    let items: Vec<&str> = missing.into_iter().map(Ppe::label).collect();
    state.enqueue_notification(Notification::new(
        format!("advisory-{location}"),
        "Safety advisory",
        Some(format!("Required here: {}.", items.join(", "))),
        NotificationVariant::Warning,
    ));
}

/// Step 4.
pub fn apply_location_risk(
    state: &mut GameState,
    secs: f64,
    ctx: &mut TickContext<'_>,
    location: LocationId,
) {
    match location {
        LocationId::Backshop => {
            state.resources.add_suspicion(BACKSHOP_SUSPICION_PER_SEC * secs);
            if state.resources.suspicion >= BACKSHOP_AUDIT_FLOOR
                && may_spawn(state, EventCategory::Audit)
                && roll_rate(ctx, BACKSHOP_AUDIT_PER_SEC, secs)
            {
                request_event(ctx, EventCategory::Audit, Some("BACKSHOP_SPOT_CHECK"));
            }
        }
        LocationId::Archive => {
            if may_spawn(state, EventCategory::EldritchManifestation)
                && roll_rate(ctx, ARCHIVE_ELDRITCH_PER_SEC, secs)
            {
                request_event(
                    ctx,
                    EventCategory::EldritchManifestation,
                    Some("ARCHIVE_WHISPERS"),
                );
            }
        }
        _ => {}
    }
}

/// Step 5. Both floors are zero.
pub fn apply_degradation(state: &mut GameState, secs: f64) {
    let rotable_loss = ROTABLE_DECAY_PER_SEC * secs;
    for rotable in &mut state.rotables {
        rotable.condition = (rotable.condition - rotable_loss).max(0.0);
    }

    let tool_loss = PRECISION_TOOL_DECAY_PER_SEC * secs;
    for tool in ToolId::PRECISION {
        if !state.tool_serviceable(tool) {
            continue;
        }
        if let Some(condition) = state.tool_conditions.get_mut(&tool) {
            *condition = (*condition - tool_loss).max(0.0);
        }
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn office_is_quiet_and_visible() {
        let mut state = GameState::default();
        apply_environment(&mut state, 100.0, LocationId::Office);
        assert_eq!(state.hf_stats.noise_exposure, 35.0);
        assert!(state.resources.suspicion > 0.0);
        assert_eq!(state.resources.focus, 100.0);
    }

    #[test]
    fn ear_defenders_halve_the_apron() {
        let mut bare = GameState::default();
        bare.resources.focus = 50.0;
        let mut muffled = bare.clone();
        muffled.inventory.has_ear_defenders = true;

        apply_environment(&mut bare, 10.0, LocationId::Apron);
        apply_environment(&mut muffled, 10.0, LocationId::Apron);

        let bare_loss = 50.0 - bare.resources.focus;
        let muffled_loss = 50.0 - muffled.resources.focus;
        assert!(muffled_loss < bare_loss);
        assert!(muffled_loss > 0.0);
    }

    #[test]
    fn venom_surge_suppresses_fatigue() {
        let mut state = GameState::default();
        state.flags.venom_surge_active = true;
        apply_environment(&mut state, 60.0, LocationId::Apron);
        assert_eq!(state.hf_stats.fatigue, 0.0);
    }

    #[test]
    fn temperature_snaps_onto_target() {
        let mut state = GameState::default();
        state.hf_stats.temperature = 21.99;
        apply_environment(&mut state, 1.0, LocationId::Office);
        assert_eq!(state.hf_stats.temperature, 22.0);
    }

    #[test]
    fn unowned_precision_tools_do_not_decay() {
        let mut state = GameState::default();
        state.tool_conditions.insert(ToolId::Borescope, 50.0);
        apply_degradation(&mut state, 100.0);
        assert_eq!(state.tool_condition(ToolId::Borescope), 50.0);
        assert_eq!(state.tool_condition(ToolId::TorqueWrench), 100.0);

        state.inventory.has_borescope = true;
        apply_degradation(&mut state, 100.0);
        assert!(state.tool_condition(ToolId::Borescope) < 50.0);
    }
}
