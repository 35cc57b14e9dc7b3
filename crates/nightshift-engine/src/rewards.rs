//! Deterministic reward tables and skill multipliers.
//!
//! No randomness here: a sub-type maps to a fixed [`RewardBundle`], skills
//! scale it by flat percentages, and passive streams additionally scale by
//! elapsed seconds.

use nightshift_types::{GameState, Proficiency, RewardBundle};

use crate::skills;

/// Reward table a categorized action draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewardCategory {
    /// `PERFORM_HANGAR_TASK`.
    Hangar,
    /// `PERFORM_OFFICE_TASK`.
    Office,
    /// `SCAVENGE`.
    Scavenge,
}

/// A passive income stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassiveStream {
    /// Night crew working the floor unsupervised.
    NightCrew,
    /// Transit checks delegated to someone else's stamp.
    TransitCheckDelegation,
    /// Service request forms filed automatically.
    AutoSrf,
}

/// Look up the table value for a categorized action.
#[allow(clippy::match_same_arms)]
pub fn table_reward(category: RewardCategory, sub_type: &str) -> Option<RewardBundle> {
    let bundle = match (category, sub_type) {
        (RewardCategory::Hangar, "rivet_panel") => RewardBundle::new(20.0, 10.0, 2.0, 0.0),
        (RewardCategory::Hangar, "torque_check") => RewardBundle::new(15.0, 8.0, 0.0, 0.0),
        (RewardCategory::Hangar, "lube_gear") => RewardBundle::new(10.0, 5.0, 1.0, 0.0),
        (RewardCategory::Office, "file_srf") => RewardBundle::new(15.0, 12.0, 0.0, -1.0),
        (RewardCategory::Office, "transit_check") => RewardBundle::new(25.0, 20.0, 0.0, 1.0),
        (RewardCategory::Office, "archive_records") => RewardBundle::new(20.0, 5.0, 0.0, -2.0),
        (RewardCategory::Scavenge, "bin_dive") => RewardBundle::new(5.0, 0.0, 3.0, 1.0),
        (RewardCategory::Scavenge, "parts_cage") => RewardBundle::new(10.0, 0.0, 6.0, 3.0),
        _ => return None,
    };
    Some(bundle)
}

/// Per-second rate of a passive stream before skills.
pub const fn passive_rate(stream: PassiveStream) -> RewardBundle {
    match stream {
        PassiveStream::NightCrew => RewardBundle::new(0.0, 0.0, 0.05, 0.02),
        PassiveStream::TransitCheckDelegation => RewardBundle::new(0.2, 0.5, 0.0, 0.01),
        PassiveStream::AutoSrf => RewardBundle::new(0.5, 0.2, 0.0, 0.0),
    }
}

/// Apply the general skill multipliers to a bundle.
///
/// `keen_eye`: XP ×1.1. `scrounger`: materials ×1.1 and positive suspicion
/// ×0.85.
pub fn apply_skill_bonuses(bundle: RewardBundle, proficiency: &Proficiency) -> RewardBundle {
    let mut out = bundle;
    if proficiency.has(skills::KEEN_EYE) {
        out.xp *= 1.1;
    }
    if proficiency.has(skills::SCROUNGER) {
        out.materials *= 1.1;
        if out.suspicion > 0.0 {
            out.suspicion *= 0.85;
        }
    }
    out
}

/// Reward for a categorized action with skills applied.
pub fn calculate_reward(
    category: RewardCategory,
    sub_type: &str,
    proficiency: &Proficiency,
) -> Option<RewardBundle> {
    table_reward(category, sub_type).map(|b| apply_skill_bonuses(b, proficiency))
}

/// Reward a passive stream pays over `secs` seconds.
pub fn passive_reward(stream: PassiveStream, secs: f64, proficiency: &Proficiency) -> RewardBundle {
    let mut bundle = apply_skill_bonuses(passive_rate(stream), proficiency);
    if stream == PassiveStream::NightCrew && proficiency.has(skills::CREW_CHIEF) {
        bundle.materials *= 1.25;
    }
    bundle.scaled(secs)
}

/// Credit a bundle to the state. Materials arrive as alclad sheet.
pub fn grant(state: &mut GameState, bundle: RewardBundle) {
    state.resources.add_experience(bundle.xp);
    state.resources.add_credits(bundle.credits);
    state.resources.alclad = (state.resources.alclad + bundle.materials).max(0.0);
    state.resources.add_suspicion(bundle.suspicion);
}
