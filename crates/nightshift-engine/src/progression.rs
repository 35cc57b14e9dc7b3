//! Level curve, milestones, and unlock gating.
//!
//! Every predicate here is pure over `(target, state)`. Tabs, actions, and
//! event categories each have a static level table; a few actions carry an
//! extra requirement. Action ids that appear in no table are unlocked (fail
//! open) so new content is never hard-blocked.

use nightshift_types::{EventCategory, Flags, GameState};

use crate::actions::ActionId;

/// XP needed to go from `level` to `level + 1`: `floor(1000 × L^1.5)`.
pub fn xp_for_next_level(level: u32) -> f64 {
    (1000.0 * f64::from(level).powf(1.5)).floor()
}

/// Difficulty multiplier for fear drain: `min(1 + 0.1 × (L − 1), 2.0)`.
pub fn difficulty_multiplier(level: u32) -> f64 {
    let steps = f64::from(level.saturating_sub(1));
    (1.0 + 0.1 * steps).min(2.0)
}

// ---------------------------------------------------------------------------
// Milestones
// ---------------------------------------------------------------------------

/// A flag a milestone grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MilestoneFlag {
    /// `flags.toolroomAccess`.
    ToolroomAccess,
    /// `flags.backshopAccess`.
    BackshopAccess,
    /// `flags.archiveAccess`.
    ArchiveAccess,
    /// `flags.terminalAccess`.
    TerminalAccess,
}

impl MilestoneFlag {
    /// Set this flag.
    pub const fn apply(self, flags: &mut Flags) {
        match self {
            Self::ToolroomAccess => flags.toolroom_access = true,
            Self::BackshopAccess => flags.backshop_access = true,
            Self::ArchiveAccess => flags.archive_access = true,
            Self::TerminalAccess => flags.terminal_access = true,
        }
    }
}

/// A level-keyed record granting flags and a narrative event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Milestone {
    /// Level that reaches it.
    pub level: u32,
    /// Flags granted.
    pub flags: &'static [MilestoneFlag],
    /// `story_event` id handed to the content layer.
    pub narrative_event: &'static str,
}

/// Every milestone, ascending.
pub static MILESTONES: [Milestone; 5] = [
    Milestone {
        level: 2,
        flags: &[MilestoneFlag::ToolroomAccess],
        narrative_event: "STORY_TOOLROOM_KEYS",
    },
    Milestone {
        level: 4,
        flags: &[MilestoneFlag::BackshopAccess],
        narrative_event: "STORY_THE_BACKSHOP",
    },
    Milestone {
        level: 6,
        flags: &[MilestoneFlag::ArchiveAccess],
        narrative_event: "STORY_ARCHIVE_DOOR",
    },
    Milestone {
        level: 8,
        flags: &[MilestoneFlag::TerminalAccess],
        narrative_event: "STORY_MAINTENANCE_TERMINAL",
    },
    Milestone {
        level: 10,
        flags: &[],
        narrative_event: "STORY_THE_LAST_INSPECTION",
    },
];

/// Milestone reached at exactly `level`.
pub fn milestone_at(level: u32) -> Option<&'static Milestone> {
    MILESTONES.iter().find(|m| m.level == level)
}

// ---------------------------------------------------------------------------
// Unlock tables
// ---------------------------------------------------------------------------

/// Tab ids with their unlock level.
pub static TAB_UNLOCKS: [(&str, u32); 8] = [
    ("hangar", 1),
    ("office", 1),
    ("break_room", 1),
    ("toolroom", 2),
    ("apron", 3),
    ("backshop", 4),
    ("archive", 6),
    ("terminal", 8),
];

/// Event categories with their unlock level.
pub static EVENT_CATEGORY_UNLOCKS: [(EventCategory, u32); 6] = [
    (EventCategory::Incident, 1),
    (EventCategory::StoryEvent, 1),
    (EventCategory::ComponentFailure, 2),
    (EventCategory::Accident, 2),
    (EventCategory::Audit, 3),
    (EventCategory::EldritchManifestation, 5),
];

/// Gated actions with their unlock level. `UNLOCK_SKILL` and `READ_MAIL`
/// are deliberately absent.
pub static ACTION_UNLOCKS: [(ActionId, u32); 32] = [
    (ActionId::InspectAircraft, 1),
    (ActionId::PerformHangarTask, 1),
    (ActionId::CompleteJob, 1),
    (ActionId::ResolveEvent, 1),
    (ActionId::FilePaperwork, 1),
    (ActionId::TakeBreak, 1),
    (ActionId::BuyVending, 1),
    (ActionId::ListenToHull, 2),
    (ActionId::BuyItem, 2),
    (ActionId::RepairTool, 2),
    (ActionId::PerformOfficeTask, 2),
    (ActionId::Scavenge, 2),
    (ActionId::SellScrap, 2),
    (ActionId::RepairRotable, 3),
    (ActionId::RedTagRotable, 3),
    (ActionId::InstallRotable, 3),
    (ActionId::DisposeRotable, 3),
    (ActionId::AnalyzeAnomaly, 3),
    (ActionId::StudyRegulations, 3),
    (ActionId::AcceptOvertime, 3),
    (ActionId::HarvestRotable, 4),
    (ActionId::AskToolroomMaster, 4),
    (ActionId::TakePills, 4),
    (ActionId::AssemblePc, 4),
    (ActionId::CompileDossier, 4),
    (ActionId::BribeAuditor, 5),
    (ActionId::ToggleTransitCheckDelegation, 5),
    (ActionId::TalkToJanitor, 5),
    (ActionId::FollowTheSound, 6),
    (ActionId::ToggleNightCrew, 6),
    (ActionId::ToggleAutoSrf, 7),
    (ActionId::FileFinalReport, 10),
];

fn action_level(action: ActionId) -> Option<u32> {
    ACTION_UNLOCKS
        .iter()
        .find(|(a, _)| *a == action)
        .map(|(_, lvl)| *lvl)
}

/// Whether a tab is available. Unknown tabs are locked.
pub fn is_tab_unlocked(tab: &str, state: &GameState) -> bool {
    TAB_UNLOCKS
        .iter()
        .find(|(id, _)| *id == tab)
        .is_some_and(|(_, lvl)| state.resources.level >= *lvl)
}

/// Whether an action is available. Unknown or ungated ids fail open.
pub fn is_action_unlocked(action_id: &str, state: &GameState) -> bool {
    let Some(action) = ActionId::parse(action_id) else {
        return true;
    };
    let Some(level) = action_level(action) else {
        return true;
    };
    if state.resources.level < level {
        return false;
    }
    match action {
        ActionId::FileFinalReport => state.inventory.has_compiled_dossier,
        _ => true,
    }
}

/// Whether the tick may roll for events of `category`.
pub fn can_spawn_event_category(category: EventCategory, state: &GameState) -> bool {
    EVENT_CATEGORY_UNLOCKS
        .iter()
        .find(|(c, _)| *c == category)
        .is_some_and(|(_, lvl)| state.resources.level >= *lvl)
}

/// Every available tab.
pub fn get_unlocked_tabs(state: &GameState) -> Vec<&'static str> {
    TAB_UNLOCKS
        .iter()
        .filter(|(id, _)| is_tab_unlocked(id, state))
        .map(|(id, _)| *id)
        .collect()
}

/// Every available action, in catalogue order, ungated ids included.
pub fn get_unlocked_actions(state: &GameState) -> Vec<&'static str> {
    ActionId::ALL
        .iter()
        .filter(|a| is_action_unlocked(a.as_str(), state))
        .map(|a| a.as_str())
        .collect()
}

/// Every event category the tick may spawn.
pub fn get_unlocked_event_categories(state: &GameState) -> Vec<EventCategory> {
    EVENT_CATEGORY_UNLOCKS
        .iter()
        .filter(|(c, _)| can_spawn_event_category(*c, state))
        .map(|(c, _)| *c)
        .collect()
}

// ---------------------------------------------------------------------------
// Progress info
// ---------------------------------------------------------------------------

/// What the next level with any unlock brings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextMilestone {
    /// Level that brings it.
    pub level: u32,
    /// Tab ids that open.
    pub tabs: Vec<&'static str>,
    /// Action ids that open.
    pub actions: Vec<&'static str>,
    /// Event categories that start spawning.
    pub event_categories: Vec<EventCategory>,
    /// Narrative event fired on arrival, if any.
    pub narrative_event: Option<&'static str>,
}

/// Current level, XP, and the road ahead.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelProgressInfo {
    /// Current level.
    pub level: u32,
    /// XP toward the next level.
    pub experience: f64,
    /// XP threshold for the next level.
    pub xp_for_next: f64,
    /// `experience / xp_for_next`, clamped to `[0, 1]`.
    pub progress: f64,
    /// Next level that unlocks anything, or `None` past the last one.
    pub next_milestone: Option<NextMilestone>,
}

fn unlocks_at(level: u32) -> NextMilestone {
    NextMilestone {
        level,
        tabs: TAB_UNLOCKS
            .iter()
            .filter(|(_, l)| *l == level)
            .map(|(id, _)| *id)
            .collect(),
        actions: ACTION_UNLOCKS
            .iter()
            .filter(|(_, l)| *l == level)
            .map(|(a, _)| a.as_str())
            .collect(),
        event_categories: EVENT_CATEGORY_UNLOCKS
            .iter()
            .filter(|(_, l)| *l == level)
            .map(|(c, _)| *c)
            .collect(),
        narrative_event: milestone_at(level).map(|m| m.narrative_event),
    }
}

/// Report progress toward the next level and the next unlock.
pub fn get_level_progress_info(state: &GameState) -> LevelProgressInfo {
    let level = state.resources.level;
    let xp_for_next = xp_for_next_level(level);
    let experience = state.resources.experience;
    let progress = if xp_for_next > 0.0 {
        (experience / xp_for_next).clamp(0.0, 1.0)
    } else {
        1.0
    };

    let next_level = TAB_UNLOCKS
        .iter()
        .map(|(_, l)| *l)
        .chain(ACTION_UNLOCKS.iter().map(|(_, l)| *l))
        .chain(EVENT_CATEGORY_UNLOCKS.iter().map(|(_, l)| *l))
        .chain(MILESTONES.iter().map(|m| m.level))
        .filter(|l| *l > level)
        .min();

    LevelProgressInfo {
        level,
        experience,
        xp_for_next,
        progress,
        next_milestone: next_level.map(unlocks_at),
    }
}
