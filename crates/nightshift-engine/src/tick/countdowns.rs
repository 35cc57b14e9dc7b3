//! Active event expiry and the work-card clock.

use nightshift_types::{EventCategory, FailureOutcome, GameState, LogType};
use tracing::{info, warn};

use crate::catalog::HYDRAULIC_CONTAMINATION;
use crate::context::TickContext;

/// Penalty for an expired event that carries no explicit failure outcome.
#[allow(clippy::match_same_arms)]
pub const fn default_failure(category: EventCategory) -> FailureOutcome {
    let (sanity_loss, suspicion_gain) = match category {
        EventCategory::Incident => (5.0, 5.0),
        EventCategory::Audit => (0.0, 15.0),
        EventCategory::Accident => (10.0, 5.0),
        EventCategory::EldritchManifestation => (15.0, 0.0),
        EventCategory::ComponentFailure => (0.0, 0.0),
        EventCategory::StoryEvent => (0.0, 0.0),
    };
    FailureOutcome {
        sanity_loss,
        suspicion_gain,
    }
}

/// Step 12. Story beats and component failures never expire.
pub fn update_active_event(state: &mut GameState, delta_ms: f64, now_ms: i64) {
    let Some(event) = state.active_event.as_mut() else {
        return;
    };
    if !event.category.expires() {
        return;
    }
    event.time_left -= delta_ms;
    if event.time_left > 0.0 {
        return;
    }

    let Some(event) = state.active_event.take() else {
        return;
    };
    let outcome = event.failure.unwrap_or_else(|| default_failure(event.category));
    state.resources.add_sanity(-outcome.sanity_loss);
    state.resources.add_suspicion(outcome.suspicion_gain);
    state.stats.events_failed = state.stats.events_failed.saturating_add(1);
    if event.id == HYDRAULIC_CONTAMINATION {
        state.flags.contamination_risk = true;
    }
    info!(event = %event.id, category = %event.category, "Event expired unresolved");
    state.push_log(format!("Too late: {}.", event.title), LogType::Error, now_ms);
}

/// Step 13. A job is always present when this returns.
pub fn update_active_job(state: &mut GameState, delta_ms: f64, ctx: &mut TickContext<'_>) {
    let rate = if state.flags.schedule_compressed { 2.0 } else { 1.0 };
    let expired = state.active_job.as_mut().is_some_and(|job| {
        job.time_left -= delta_ms * rate;
        job.time_left <= 0.0
    });

    if expired && let Some(job) = state.active_job.take() {
        warn!(job = %job.id, "Work card expired");
        state.push_log(
            format!("The card for \"{}\" ran out of time.", job.title),
            LogType::Warning,
            ctx.now_ms,
        );
    }
    if state.active_job.is_none() {
        state.active_job = Some(ctx.hooks.create_job());
    }
}
