//! Timer countdowns and the continuous drains and regeneration.
//!
//! A timer only counts while it is above zero. The tick that carries it to
//! zero or below clamps it to exactly zero and fires its paired effect;
//! later ticks see zero and do nothing.

use nightshift_types::{GameState, LogType, Notification, NotificationVariant};
use tracing::debug;

use super::roll_rate;
use crate::actions::JANITOR_COOLDOWN_MS;
use crate::context::TickContext;
use crate::progression;
use crate::skills;

/// Fatigue added when a venom surge wears off.
pub const VENOM_CRASH_FATIGUE: f64 = 10.0;
/// Sanity below which hallucinations begin.
pub const HALLUCINATION_ONSET: f64 = 20.0;
/// Sanity at or above which hallucinations stop.
pub const HALLUCINATION_RECOVERY: f64 = 40.0;
/// Focus lost per second while hallucinating.
pub const HALLUCINATION_FOCUS_DRAIN: f64 = 0.3;
/// Sanity lost per second while afraid, before the difficulty multiplier.
pub const FEAR_SANITY_DRAIN: f64 = 0.5;
/// Base focus regeneration per second.
pub const FOCUS_REGEN: f64 = 0.4;
/// Janitor appearance rate per second.
pub const JANITOR_SPAWN_PER_SEC: f64 = 0.002;

/// Count a timer down. Returns `true` only on the tick it reaches zero.
fn count_down(timer: &mut f64, delta_ms: f64) -> bool {
    if *timer <= 0.0 {
        return false;
    }
    *timer -= delta_ms;
    if *timer <= 0.0 {
        *timer = 0.0;
        return true;
    }
    false
}

/// Step 9.
pub fn update_timers(state: &mut GameState, delta_ms: f64, now_ms: i64) {
    let hf = &mut state.hf_stats;
    let fear = count_down(&mut hf.fear_timer, delta_ms);
    let schedule = count_down(&mut hf.schedule_compression_timer, delta_ms);
    let shield = count_down(&mut hf.sanity_shield_timer, delta_ms);
    let loophole = count_down(&mut hf.found_loophole_timer, delta_ms);
    let toolroom = count_down(&mut hf.toolroom_master_cooldown, delta_ms);
    let efficiency = count_down(&mut hf.efficiency_boost_timer, delta_ms);
    let venom = count_down(&mut hf.venom_surge_timer, delta_ms);
    let janitor = count_down(&mut hf.janitor_cooldown, delta_ms);

    if fear {
        state.flags.is_afraid = false;
        state.push_log("Your pulse settles. Whatever it was, it has gone.", LogType::Info, now_ms);
    }
    if schedule {
        state.flags.schedule_compressed = false;
        state.push_log("Overtime is over. The cards slow down.", LogType::Info, now_ms);
    }
    if shield {
        state.push_log("The pills wear off. Colours come back.", LogType::Info, now_ms);
    }
    if loophole {
        state.flags.found_loophole = false;
        state.push_log("Someone closed the loophole.", LogType::Info, now_ms);
    }
    if toolroom {
        state.push_log("The toolroom master is taking questions again.", LogType::Info, now_ms);
    }
    if efficiency {
        state.push_log("The coffee wears off.", LogType::Info, now_ms);
    }
    if venom {
        state.flags.venom_surge_active = false;
        state.hf_stats.add_fatigue(VENOM_CRASH_FATIGUE);
        state.push_log("The venom crash hits all at once.", LogType::Warning, now_ms);
    }
    if janitor {
        state.flags.janitor_present = false;
        debug!("Janitor cooldown elapsed");
    }
}

/// Step 10.
pub fn apply_drains_and_regen(state: &mut GameState, secs: f64, ctx: &mut TickContext<'_>) {
    let now = ctx.now_ms;

    if !state.flags.is_hallucinating && state.resources.sanity < HALLUCINATION_ONSET {
        state.flags.is_hallucinating = true;
        state.push_log("The rivets are moving. You are almost sure of it.", LogType::Story, now);
    } else if state.flags.is_hallucinating && state.resources.sanity >= HALLUCINATION_RECOVERY {
        state.flags.is_hallucinating = false;
        state.push_log("The rivets hold still again.", LogType::Info, now);
    }
    if state.flags.is_hallucinating {
        state.resources.add_focus(-HALLUCINATION_FOCUS_DRAIN * secs);
    }

    if state.flags.is_afraid && state.hf_stats.sanity_shield_timer <= 0.0 {
        let mut rate = FEAR_SANITY_DRAIN * progression::difficulty_multiplier(state.resources.level);
        if state.proficiency.has(skills::IRON_WILL) {
            rate *= 0.75;
        }
        state.resources.add_sanity(-rate * secs);
    }

    let mut regen = FOCUS_REGEN;
    if state.flags.night_crew_active {
        regen *= 0.5;
    }
    if state.flags.is_afraid {
        regen *= 0.5;
    }
    if state.hf_stats.efficiency_boost_timer > 0.0 {
        regen *= 1.5;
    }
    state.resources.add_focus(regen * secs);

    if !state.flags.janitor_present
        && state.hf_stats.janitor_cooldown <= 0.0
        && roll_rate(ctx, JANITOR_SPAWN_PER_SEC, secs)
    {
        state.flags.janitor_present = true;
        state.hf_stats.janitor_cooldown = JANITOR_COOLDOWN_MS;
        state.push_log("Somewhere nearby, a mop bucket squeaks.", LogType::Story, now);
        state.enqueue_notification(Notification::new(
            "janitor",
            "The janitor is here",
            None,
            NotificationVariant::Info,
        ));
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::context::{EngineContext, RecordingHooks};
    use crate::random::ScriptedRandom;

    #[test]
    fn fear_timer_clamps_and_clears_once() {
        let mut state = GameState::default();
        state.flags.is_afraid = true;
        state.hf_stats.fear_timer = 500.0;

        update_timers(&mut state, 1000.0, 0);
        assert_eq!(state.hf_stats.fear_timer, 0.0);
        assert!(!state.flags.is_afraid);
        assert_eq!(state.logs.len(), 1);

        update_timers(&mut state, 1000.0, 0);
        assert_eq!(state.hf_stats.fear_timer, 0.0);
        assert_eq!(state.logs.len(), 1);
    }

    #[test]
    fn venom_crash_adds_fatigue() {
        let mut state = GameState::default();
        state.flags.venom_surge_active = true;
        state.hf_stats.venom_surge_timer = 10.0;
        update_timers(&mut state, 50.0, 0);
        assert!(!state.flags.venom_surge_active);
        assert_eq!(state.hf_stats.fatigue, VENOM_CRASH_FATIGUE);
    }

    #[test]
    fn shield_suppresses_fear_drain() {
        let mut state = GameState::default();
        state.flags.is_afraid = true;
        state.hf_stats.fear_timer = 10_000.0;
        state.hf_stats.sanity_shield_timer = 10_000.0;
        state.flags.janitor_present = true;

        let mut rng = ScriptedRandom::constant(0.99);
        let mut hooks = RecordingHooks::new();
        let mut ctx = EngineContext::new(&mut rng, &mut hooks, 0);
        apply_drains_and_regen(&mut state, 2.0, &mut ctx);
        assert_eq!(state.resources.sanity, 100.0);

        state.hf_stats.sanity_shield_timer = 0.0;
        apply_drains_and_regen(&mut state, 2.0, &mut ctx);
        assert_eq!(state.resources.sanity, 99.0);
    }

    #[test]
    fn focus_regen_modifiers_stack() {
        let mut state = GameState::default();
        state.resources.focus = 50.0;
        state.flags.janitor_present = true;
        state.flags.night_crew_active = true;
        state.hf_stats.efficiency_boost_timer = 1000.0;

        let mut rng = ScriptedRandom::constant(0.99);
        let mut hooks = RecordingHooks::new();
        let mut ctx = EngineContext::new(&mut rng, &mut hooks, 0);
        apply_drains_and_regen(&mut state, 10.0, &mut ctx);
        // 0.4 × 0.5 × 1.5 = 0.3 per second.
        assert!((state.resources.focus - 53.0).abs() < 1e-9);
    }

    #[test]
    fn janitor_appears_on_a_hit() {
        let mut state = GameState::default();
        let mut rng = ScriptedRandom::constant(0.0);
        let mut hooks = RecordingHooks::new();
        let mut ctx = EngineContext::new(&mut rng, &mut hooks, 0);
        apply_drains_and_regen(&mut state, 1.0, &mut ctx);
        assert!(state.flags.janitor_present);
        assert_eq!(state.hf_stats.janitor_cooldown, JANITOR_COOLDOWN_MS);
    }
}
