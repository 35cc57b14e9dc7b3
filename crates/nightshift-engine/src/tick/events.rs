//! Event rolls, component-failure drag, and the hazard lifecycle.
//!
//! Rolls only ever request events from the content layer; none of them
//! writes `activeEvent` directly. Every roll is skipped while an event is
//! active or while its category is still locked.

use nightshift_types::{
    ActiveHazard, EventCategory, GameState, LogType, Notification, NotificationVariant,
};
use tracing::info;

use super::{may_spawn, request_event, roll_rate};
use crate::catalog::{self, HAZARDS};
use crate::context::TickContext;

/// Suspicion thresholds and the audit each one fires, ascending.
pub const SUSPICION_THRESHOLDS: [(f64, &str); 3] = [
    (30.0, "AUDIT_NOTICE"),
    (60.0, "AUDIT_INVESTIGATION"),
    (90.0, "AUDIT_TRIBUNAL"),
];
/// Audit roll rate while suspicion is above [`AUDIT_SUSPICION_BAND`].
pub const AUDIT_PER_SEC: f64 = 0.0005;
/// Suspicion above which audits roll continuously.
pub const AUDIT_SUSPICION_BAND: f64 = 50.0;
/// Eldritch roll rate while sanity is below [`ELDRITCH_SANITY_BAND`].
pub const ELDRITCH_PER_SEC: f64 = 0.001;
/// Sanity below which manifestations roll.
pub const ELDRITCH_SANITY_BAND: f64 = 30.0;
/// Generic weirdness rate.
pub const WEIRDNESS_PER_SEC: f64 = 0.0002;
/// Condition below which a rotable may fail.
pub const FAILURE_CONDITION: f64 = 25.0;
/// Failure roll rate per rotable under [`FAILURE_CONDITION`].
pub const COMPONENT_FAILURE_PER_SEC: f64 = 0.001;
/// Credits lost per second while a component failure is active.
pub const FAILURE_DRAG_PER_SEC: f64 = 1.0;
/// Hazard spawn rate while none is active.
pub const HAZARD_SPAWN_PER_SEC: f64 = 0.0002;

fn threshold_flag(state: &mut GameState, index: usize) -> Option<&mut bool> {
    let flags = &mut state.flags;
    match index {
        0 => Some(&mut flags.suspicion_event_30_triggered),
        1 => Some(&mut flags.suspicion_event_60_triggered),
        2 => Some(&mut flags.suspicion_event_90_triggered),
        _ => None,
    }
}

/// Step 6. At most one event is requested per tick.
pub fn roll_events(state: &mut GameState, secs: f64, ctx: &mut TickContext<'_>) {
    if state.active_event.is_some() {
        return;
    }

    if may_spawn(state, EventCategory::Audit) {
        let suspicion = state.resources.suspicion;
        for (index, (threshold, event_id)) in SUSPICION_THRESHOLDS.into_iter().enumerate() {
            if suspicion < threshold {
                break;
            }
            if let Some(fired) = threshold_flag(state, index)
                && !*fired
            {
                *fired = true;
                info!(threshold, event_id, "Suspicion threshold crossed");
                request_event(ctx, EventCategory::Audit, Some(event_id));
                return;
            }
        }
    }

    if state.resources.suspicion > AUDIT_SUSPICION_BAND
        && may_spawn(state, EventCategory::Audit)
        && roll_rate(ctx, AUDIT_PER_SEC, secs)
    {
        request_event(ctx, EventCategory::Audit, None);
        return;
    }

    if state.resources.sanity < ELDRITCH_SANITY_BAND
        && may_spawn(state, EventCategory::EldritchManifestation)
        && roll_rate(ctx, ELDRITCH_PER_SEC, secs)
    {
        request_event(ctx, EventCategory::EldritchManifestation, None);
        return;
    }

    if may_spawn(state, EventCategory::Incident) && roll_rate(ctx, WEIRDNESS_PER_SEC, secs) {
        request_event(ctx, EventCategory::Incident, None);
        return;
    }

    if !state.flags.active_component_failure
        && may_spawn(state, EventCategory::ComponentFailure)
    {
        let mut failed = None;
        for rotable in state.rotables.iter().filter(|r| r.condition < FAILURE_CONDITION) {
            if roll_rate(ctx, COMPONENT_FAILURE_PER_SEC, secs) {
                failed = Some((rotable.id.clone(), rotable.label.clone()));
                break;
            }
        }
        if let Some((id, label)) = failed {
            state.flags.active_component_failure = true;
            state.flags.failing_rotable_id = Some(id.clone());
            info!(rotable = %id, "Component failure");
            state.push_log(
                format!("The {label} has failed in service."),
                LogType::Error,
                ctx.now_ms,
            );
            request_event(ctx, EventCategory::ComponentFailure, Some(&id));
        }
    }
}

/// Step 7.
pub fn apply_failure_drag(state: &mut GameState, secs: f64) {
    if state.flags.active_component_failure {
        state.resources.add_credits(-FAILURE_DRAG_PER_SEC * secs);
    }
}

/// Step 8. Spawn at most one hazard, then run every active one.
pub fn update_hazards(state: &mut GameState, delta_ms: f64, ctx: &mut TickContext<'_>) {
    let secs = delta_ms / 1000.0;

    if state.active_hazards.is_empty()
        && roll_rate(ctx, HAZARD_SPAWN_PER_SEC, secs)
        && let Some(def) = ctx.rng.pick(HAZARDS.len()).and_then(|i| HAZARDS.get(i))
    {
        let now = ctx.now_ms;
        info!(hazard = def.id, "Hazard spawned");
        state.active_hazards.push(ActiveHazard {
            id: format!("{}-{now}", def.id),
            hazard_id: def.id.to_owned(),
            label: def.label.to_owned(),
            duration: def.duration_ms,
            sanity_per_sec: def.sanity_per_sec,
            health_per_sec: def.health_per_sec,
        });
        state.enqueue_notification(Notification::new(
            format!("hazard-{}", def.id),
            def.label,
            Some(String::from("Clear the area or ride it out.")),
            NotificationVariant::Danger,
        ));
        state.push_log(format!("Hazard: {}.", def.label), LogType::Warning, now);
    }

    for index in (0..state.active_hazards.len()).rev() {
        let Some(hazard) = state.active_hazards.get_mut(index) else {
            continue;
        };
        hazard.duration -= delta_ms;
        let (sanity, health) = (hazard.sanity_per_sec, hazard.health_per_sec);
        let expired = hazard.duration <= 0.0;
        let hazard_id = hazard.hazard_id.clone();
        let label = hazard.label.clone();

        state.resources.add_sanity(-sanity * secs);
        state.resources.add_health(-health * secs);

        if let Some(sub) = catalog::hazard(&hazard_id).and_then(|def| def.sub_event.as_ref())
            && may_spawn(state, sub.category)
            && roll_rate(ctx, sub.per_sec, secs)
        {
            request_event(ctx, sub.category, Some(sub.event_id));
        }

        if expired {
            state.active_hazards.remove(index);
            state.push_log(format!("{label} cleared."), LogType::Info, ctx.now_ms);
        }
    }
}
