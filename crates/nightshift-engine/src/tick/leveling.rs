//! Level-ups and milestone grants.

use nightshift_types::{EventCategory, GameState, LogType, Notification, NotificationVariant};
use tracing::info;

use super::request_event;
use crate::context::TickContext;
use crate::progression;

/// Step 2: consume experience until it is below the next threshold.
///
/// Several levels may be gained in one tick. Only the final level reached
/// gets a notification.
pub fn apply_leveling(state: &mut GameState, ctx: &mut TickContext<'_>) {
    let start = state.resources.level;
    loop {
        let threshold = progression::xp_for_next_level(state.resources.level);
        if threshold <= 0.0 || state.resources.experience < threshold {
            break;
        }
        state.resources.experience -= threshold;
        state.resources.level = state.resources.level.saturating_add(1);
        state.proficiency.skill_points = state.proficiency.skill_points.saturating_add(1);

        let level = state.resources.level;
        info!(level, "Level up");
        state.push_log(
            format!("Level {level}. The lead engineer nods at you in the corridor."),
            LogType::Success,
            ctx.now_ms,
        );

        if let Some(milestone) = progression::milestone_at(level) {
            for flag in milestone.flags {
                flag.apply(&mut state.flags);
            }
            request_event(ctx, EventCategory::StoryEvent, Some(milestone.narrative_event));
        }
    }

    let level = state.resources.level;
    if level > start {
        state.enqueue_notification(Notification::new(
            format!("level-up-{level}"),
            format!("Level {level}"),
            Some(String::from("A skill point is waiting.")),
            NotificationVariant::Success,
        ));
    }
}
