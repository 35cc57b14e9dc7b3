//! The Tick Processor.
//!
//! Advances the state by a wall-clock delta. Every rate is per second and
//! scaled by `delta_ms / 1000`, so doubling the delta doubles every
//! continuous effect. Random rolls use `rate × seconds` as their probability.
//!
//! # Order of operations
//!
//! 1. Environment (noise, fatigue, temperature)
//! 2. Leveling (loop until below threshold) and milestones
//! 3. PPE advisory check
//! 4. Location-specific passive risk
//! 5. Rotable and precision tool degradation
//! 6. Threshold and random events (only with no active event)
//! 7. Component failure credit drag
//! 8. Hazard lifecycle
//! 9. Timers and cooldowns
//! 10. Continuous drains, regen, janitor presence
//! 11. Passive income streams
//! 12. Active event expiry
//! 13. Active job countdown and replacement
//! 14. Mail delivery
//! 15. Vending price drift
//!
//! # Submodules
//!
//! - [`environment`] -- Steps 1, 3, 4, 5
//! - [`leveling`] -- Step 2
//! - [`events`] -- Steps 6, 7, 8
//! - [`timers`] -- Steps 9, 10
//! - [`economy`] -- Steps 11, 14, 15
//! - [`countdowns`] -- Steps 12, 13

pub mod countdowns;
pub mod economy;
pub mod environment;
pub mod events;
pub mod leveling;
pub mod timers;

use nightshift_types::{EventCategory, GameState, LocationId};
use tracing::{debug, trace};

use crate::context::TickContext;
use crate::progression;

/// Roll for a per-second probability over `secs` seconds.
pub(crate) fn roll_rate(ctx: &mut TickContext<'_>, per_sec: f64, secs: f64) -> bool {
    ctx.rng.chance(per_sec * secs)
}

/// No event is active and `category` is unlocked at the current level.
pub(crate) fn may_spawn(state: &GameState, category: EventCategory) -> bool {
    state.active_event.is_none() && progression::can_spawn_event_category(category, state)
}

/// Hand an event request to the content layer.
pub(crate) fn request_event(ctx: &mut TickContext<'_>, category: EventCategory, id: Option<&str>) {
    debug!(%category, ?id, "Event requested by tick");
    ctx.hooks.trigger_event(category, id);
}

/// Advance `state` in place by `delta_ms` at `location`.
///
/// Non-positive or non-finite deltas leave the state untouched.
pub fn advance(state: &mut GameState, delta_ms: f64, ctx: &mut TickContext<'_>, location: LocationId) {
    if !delta_ms.is_finite() || delta_ms <= 0.0 {
        return;
    }
    let secs = delta_ms / 1000.0;
    trace!(delta_ms, %location, "Tick");

    state.stats.play_time_ms += delta_ms;

    environment::apply_environment(state, secs, location);
    leveling::apply_leveling(state, ctx);
    environment::check_advisory(state, ctx, location);
    environment::apply_location_risk(state, secs, ctx, location);
    environment::apply_degradation(state, secs);
    events::roll_events(state, secs, ctx);
    events::apply_failure_drag(state, secs);
    events::update_hazards(state, delta_ms, ctx);
    timers::update_timers(state, delta_ms, ctx.now_ms);
    timers::apply_drains_and_regen(state, secs, ctx);
    economy::apply_passive_income(state, secs, ctx);
    countdowns::update_active_event(state, delta_ms, ctx.now_ms);
    countdowns::update_active_job(state, delta_ms, ctx);
    economy::deliver_mail(state, secs, ctx);
    economy::drift_vending_prices(state, secs, ctx);
}

/// Snapshot wrapper around [`advance`]: the input is never touched.
pub fn process_tick(
    state: &GameState,
    delta_ms: f64,
    ctx: &mut TickContext<'_>,
    location: LocationId,
) -> GameState {
    let mut next = state.clone();
    advance(&mut next, delta_ms, ctx, location);
    next
}
