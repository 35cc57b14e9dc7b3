//! Reference content layer: the job board and the event deck.
//!
//! The engine asks for work cards and events through
//! [`ContentHooks`]. Job requests are answered on the spot from the job
//! board. Event requests are queued, and [`ContentDeck::deal`] turns the
//! oldest one into the active event whenever the event slot is free.
//!
//! Requests naming a card id get that card. Requests carrying only a
//! category draw a card of that category. A component failure names the
//! failing rotable instead of a card, and its event is built from the part.

use std::collections::VecDeque;

use nightshift_engine::{ContentHooks, RandomSource};
use nightshift_types::{
    ActiveEvent, EventCategory, FailureOutcome, GameState, Job, LogType, Notification,
    NotificationVariant, RewardBundle, ToolId,
};
use tracing::{debug, info};
use uuid::Uuid;

/// Most requests held while an event is active.
const MAX_PENDING: usize = 8;

/// Nominal window shown for events that never expire.
const OPEN_ENDED_MS: f64 = 60_000.0;

/// A work card the board can hand out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JobTemplate {
    /// Card title.
    pub title: &'static str,
    /// Flavour text.
    pub description: &'static str,
    /// Time allowed, in milliseconds.
    pub duration_ms: f64,
    /// Tool the card needs, if any.
    pub required_tool: Option<ToolId>,
    /// Payout on sign-off.
    pub reward: RewardBundle,
    /// Retrofit cards pay materials.
    pub is_retrofit: bool,
}

/// The card handed out when the board has nothing better.
const ROUTINE_JOB: JobTemplate = JobTemplate {
    title: "Routine walkaround",
    description: "Walk the aircraft. Sign the card. Do not look up into the wheel well.",
    duration_ms: 60_000.0,
    required_tool: None,
    reward: RewardBundle::new(15.0, 10.0, 0.0, 0.0),
    is_retrofit: false,
};

/// Every card on the job board.
pub static JOB_BOARD: [JobTemplate; 6] = [
    ROUTINE_JOB,
    JobTemplate {
        title: "Torque the engine mounts",
        description: "Every bolt to the published value. Every one.",
        duration_ms: 90_000.0,
        required_tool: Some(ToolId::TorqueWrench),
        reward: RewardBundle::new(30.0, 20.0, 0.0, 0.0),
        is_retrofit: false,
    },
    JobTemplate {
        title: "Borescope the number two engine",
        description: "Something in the hot section left fingerprints.",
        duration_ms: 120_000.0,
        required_tool: Some(ToolId::Borescope),
        reward: RewardBundle::new(40.0, 25.0, 0.0, 0.0),
        is_retrofit: false,
    },
    JobTemplate {
        title: "Safety-wire the fuel caps",
        description: "Both wings. The wire on the left one is already twisted the wrong way.",
        duration_ms: 75_000.0,
        required_tool: Some(ToolId::SafetyWirePliers),
        reward: RewardBundle::new(25.0, 15.0, 0.0, 0.0),
        is_retrofit: false,
    },
    JobTemplate {
        title: "Cabin retrofit: seat tracks",
        description: "Pull the old tracks. Keep whatever is worth keeping.",
        duration_ms: 150_000.0,
        required_tool: Some(ToolId::RivetGun),
        reward: RewardBundle::new(35.0, 20.0, 3.0, 0.0),
        is_retrofit: true,
    },
    JobTemplate {
        title: "Wiring loom continuity check",
        description: "One pin reads a voltage it has no source for.",
        duration_ms: 100_000.0,
        required_tool: Some(ToolId::Multimeter),
        reward: RewardBundle::new(35.0, 20.0, 0.0, 0.0),
        is_retrofit: false,
    },
];

/// An event the deck can deal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventCard {
    /// Content id, as named in trigger requests.
    pub id: &'static str,
    /// Category.
    pub category: EventCategory,
    /// Headline.
    pub title: &'static str,
    /// Flavour text.
    pub description: &'static str,
    /// Time allowed, in milliseconds.
    pub duration_ms: f64,
    /// Tool needed to resolve it, if any.
    pub required_tool: Option<ToolId>,
    /// Payout on resolution.
    pub reward: RewardBundle,
    /// Penalty on expiry. `None` uses the category default.
    pub failure: Option<FailureOutcome>,
}

/// Every card in the event deck.
pub static EVENT_DECK: [EventCard; 18] = [
    // Incidents
    EventCard {
        id: "FOD_ON_THE_APRON",
        category: EventCategory::Incident,
        title: "FOD on the apron",
        description: "A bolt on the taxi line. Nobody on shift is missing one.",
        duration_ms: 45_000.0,
        required_tool: None,
        reward: RewardBundle::new(20.0, 10.0, 0.0, 0.0),
        failure: None,
    },
    EventCard {
        id: "MISSING_TOOL_TAG",
        category: EventCategory::Incident,
        title: "Missing tool tag",
        description: "The shadow board has a gap shaped like a wrench you never borrowed.",
        duration_ms: 60_000.0,
        required_tool: None,
        reward: RewardBundle::new(15.0, 5.0, 0.0, -2.0),
        failure: Some(FailureOutcome {
            sanity_loss: 2.0,
            suspicion_gain: 8.0,
        }),
    },
    EventCard {
        id: "HYDRAULIC_CONTAMINATION",
        category: EventCategory::Incident,
        title: "Hydraulic contamination",
        description: "The fluid sample is the wrong colour and slightly warm.",
        duration_ms: 60_000.0,
        required_tool: Some(ToolId::NdtKit),
        reward: RewardBundle::new(40.0, 20.0, 0.0, 0.0),
        failure: None,
    },
    // Audits
    EventCard {
        id: "AUDIT_NOTICE",
        category: EventCategory::Audit,
        title: "Audit notice",
        description: "Quality would like a word about your paperwork.",
        duration_ms: 90_000.0,
        required_tool: None,
        reward: RewardBundle::new(20.0, 0.0, 0.0, -5.0),
        failure: None,
    },
    EventCard {
        id: "AUDIT_INVESTIGATION",
        category: EventCategory::Audit,
        title: "Formal investigation",
        description: "Two people in clean overalls are photographing your work.",
        duration_ms: 75_000.0,
        required_tool: None,
        reward: RewardBundle::new(35.0, 0.0, 0.0, -10.0),
        failure: Some(FailureOutcome {
            sanity_loss: 5.0,
            suspicion_gain: 20.0,
        }),
    },
    EventCard {
        id: "AUDIT_TRIBUNAL",
        category: EventCategory::Audit,
        title: "Tribunal",
        description: "Your licence is on the table. So is a folder with your name on it.",
        duration_ms: 60_000.0,
        required_tool: None,
        reward: RewardBundle::new(60.0, 0.0, 0.0, -20.0),
        failure: Some(FailureOutcome {
            sanity_loss: 10.0,
            suspicion_gain: 25.0,
        }),
    },
    EventCard {
        id: "BACKSHOP_SPOT_CHECK",
        category: EventCategory::Audit,
        title: "Backshop spot check",
        description: "Someone is counting the serviceable tags. Out loud.",
        duration_ms: 60_000.0,
        required_tool: None,
        reward: RewardBundle::new(25.0, 0.0, 0.0, -8.0),
        failure: None,
    },
    EventCard {
        id: "INTERNAL_AUDIT",
        category: EventCategory::Audit,
        title: "Internal audit",
        description: "The automatic SRFs all have the same signature. Including the time.",
        duration_ms: 90_000.0,
        required_tool: None,
        reward: RewardBundle::new(25.0, 0.0, 0.0, -6.0),
        failure: None,
    },
    // Accidents
    EventCard {
        id: "FUEL_VAPOUR_FLASH",
        category: EventCategory::Accident,
        title: "Vapour flash",
        description: "The air over the wing lit up for half a second.",
        duration_ms: 30_000.0,
        required_tool: None,
        reward: RewardBundle::new(30.0, 10.0, 0.0, 0.0),
        failure: None,
    },
    EventCard {
        id: "DROPPED_PANEL",
        category: EventCategory::Accident,
        title: "Dropped access panel",
        description: "It missed your foot. It should not have been able to fall from there.",
        duration_ms: 40_000.0,
        required_tool: Some(ToolId::RivetGun),
        reward: RewardBundle::new(25.0, 10.0, 1.0, 0.0),
        failure: None,
    },
    // Eldritch
    EventCard {
        id: "ARCHIVE_WHISPERS",
        category: EventCategory::EldritchManifestation,
        title: "Whispers in the stacks",
        description: "The old logbooks are reading themselves aloud.",
        duration_ms: 45_000.0,
        required_tool: None,
        reward: RewardBundle::new(45.0, 0.0, 0.0, 0.0),
        failure: None,
    },
    EventCard {
        id: "THE_HANGAR_BREATHES",
        category: EventCategory::EldritchManifestation,
        title: "The hangar breathes",
        description: "The doors flex inward. Then outward. Then inward.",
        duration_ms: 45_000.0,
        required_tool: Some(ToolId::Multimeter),
        reward: RewardBundle::new(50.0, 0.0, 0.0, 0.0),
        failure: None,
    },
    // Story
    EventCard {
        id: "STORY_TOOLROOM_KEYS",
        category: EventCategory::StoryEvent,
        title: "The toolroom keys",
        description: "The storeman leaves a key ring on your bench and does not look back.",
        duration_ms: OPEN_ENDED_MS,
        required_tool: None,
        reward: RewardBundle::new(10.0, 0.0, 0.0, 0.0),
        failure: None,
    },
    EventCard {
        id: "STORY_THE_BACKSHOP",
        category: EventCategory::StoryEvent,
        title: "The backshop",
        description: "There is a second parts store. The tags there are handwritten.",
        duration_ms: OPEN_ENDED_MS,
        required_tool: None,
        reward: RewardBundle::new(10.0, 0.0, 0.0, 0.0),
        failure: None,
    },
    EventCard {
        id: "STORY_ARCHIVE_DOOR",
        category: EventCategory::StoryEvent,
        title: "The archive door",
        description: "Records goes back further than the airport does.",
        duration_ms: OPEN_ENDED_MS,
        required_tool: None,
        reward: RewardBundle::new(10.0, 0.0, 0.0, 0.0),
        failure: None,
    },
    EventCard {
        id: "STORY_MAINTENANCE_TERMINAL",
        category: EventCategory::StoryEvent,
        title: "The maintenance terminal",
        description: "A login prompt, already filled in with your staff number.",
        duration_ms: OPEN_ENDED_MS,
        required_tool: None,
        reward: RewardBundle::new(10.0, 0.0, 0.0, 0.0),
        failure: None,
    },
    EventCard {
        id: "STORY_THE_LAST_INSPECTION",
        category: EventCategory::StoryEvent,
        title: "The last inspection",
        description: "One aircraft is still on the schedule. It was retired in 1987.",
        duration_ms: OPEN_ENDED_MS,
        required_tool: None,
        reward: RewardBundle::new(10.0, 0.0, 0.0, 0.0),
        failure: None,
    },
    EventCard {
        id: "ENDING_WHISTLEBLOWER",
        category: EventCategory::StoryEvent,
        title: "Whistleblower",
        description: "The report is in. The night shift ends here.",
        duration_ms: OPEN_ENDED_MS,
        required_tool: None,
        reward: RewardBundle::new(0.0, 0.0, 0.0, 0.0),
        failure: None,
    },
];

/// Look up a card by content id.
pub fn card(id: &str) -> Option<&'static EventCard> {
    EVENT_DECK.iter().find(|c| c.id == id)
}

impl EventCard {
    fn to_event(self) -> ActiveEvent {
        ActiveEvent {
            id: self.id.to_owned(),
            category: self.category,
            title: self.title.to_owned(),
            description: self.description.to_owned(),
            time_left: self.duration_ms,
            total_time: self.duration_ms,
            required_tool: self.required_tool,
            reward: self.reward,
            rotable_id: None,
            failure: self.failure,
        }
    }
}

/// The content layer used by the headless runner.
pub struct ContentDeck {
    draws: Box<dyn RandomSource>,
    pending: VecDeque<(EventCategory, Option<String>)>,
}

impl core::fmt::Debug for ContentDeck {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ContentDeck")
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

impl ContentDeck {
    /// Create a deck drawing from `draws`.
    pub fn new(draws: Box<dyn RandomSource>) -> Self {
        Self {
            draws,
            pending: VecDeque::new(),
        }
    }

    /// Requests waiting for the event slot.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Drop every queued request.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Fill a free event slot from the oldest usable request.
    ///
    /// Stale requests (a component failure already repaired, an id with no
    /// card and a category with none either) are discarded along the way.
    /// Returns whether an event was dealt.
    pub fn deal(&mut self, state: &mut GameState, now_ms: i64) -> bool {
        if state.active_event.is_some() {
            return false;
        }
        while let Some((category, id)) = self.pending.pop_front() {
            let event = if category == EventCategory::ComponentFailure {
                id.as_deref().and_then(|rotable| failure_event(state, rotable))
            } else {
                self.draw(category, id.as_deref())
            };
            let Some(event) = event else {
                debug!(%category, id = ?id, "Discarding stale event request");
                continue;
            };
            announce(state, &event, now_ms);
            state.active_event = Some(event);
            return true;
        }
        false
    }

    fn draw(&mut self, category: EventCategory, id: Option<&str>) -> Option<ActiveEvent> {
        if let Some(found) = id.and_then(card)
            && found.category == category
        {
            return Some(found.to_event());
        }
        let candidates: Vec<EventCard> = EVENT_DECK
            .iter()
            .filter(|c| c.category == category && c.category != EventCategory::StoryEvent)
            .copied()
            .collect();
        let idx = self.draws.pick(candidates.len())?;
        candidates.get(idx).copied().map(EventCard::to_event)
    }
}

fn failure_event(state: &GameState, rotable_id: &str) -> Option<ActiveEvent> {
    if state.flags.failing_rotable_id.as_deref() != Some(rotable_id) {
        return None;
    }
    let rotable = state.rotable(rotable_id)?;
    Some(ActiveEvent {
        id: rotable.id.clone(),
        category: EventCategory::ComponentFailure,
        title: format!("{} failure", rotable.label),
        description: format!(
            "{} ({}) has stopped working. Repair it before the delays bankrupt you.",
            rotable.label, rotable.serial_number
        ),
        time_left: OPEN_ENDED_MS,
        total_time: OPEN_ENDED_MS,
        required_tool: None,
        reward: RewardBundle::default(),
        rotable_id: Some(rotable.id.clone()),
        failure: None,
    })
}

fn announce(state: &mut GameState, event: &ActiveEvent, now_ms: i64) {
    let (log_type, variant) = match event.category {
        EventCategory::StoryEvent => (LogType::Story, NotificationVariant::Info),
        EventCategory::Incident | EventCategory::Audit => {
            (LogType::Warning, NotificationVariant::Warning)
        }
        EventCategory::Accident
        | EventCategory::EldritchManifestation
        | EventCategory::ComponentFailure => (LogType::Error, NotificationVariant::Danger),
    };
    info!(event = %event.id, category = %event.category, "Event dealt");
    state.push_log(format!("{}: {}", event.title, event.description), log_type, now_ms);
    state.enqueue_notification(Notification::new(
        format!("event-{}", event.id),
        event.title.clone(),
        Some(event.description.clone()),
        variant,
    ));
}

impl ContentHooks for ContentDeck {
    fn create_job(&mut self) -> Job {
        let template = self
            .draws
            .pick(JOB_BOARD.len())
            .and_then(|idx| JOB_BOARD.get(idx).copied())
            .unwrap_or(ROUTINE_JOB);
        Job {
            id: format!("job-{}", Uuid::now_v7()),
            title: template.title.to_owned(),
            description: template.description.to_owned(),
            time_left: template.duration_ms,
            total_time: template.duration_ms,
            required_tool: template.required_tool,
            reward: template.reward,
            is_retrofit: template.is_retrofit,
        }
    }

    fn trigger_event(&mut self, category: EventCategory, id: Option<&str>) {
        let request = (category, id.map(str::to_owned));
        if self.pending.contains(&request) {
            return;
        }
        if self.pending.len() >= MAX_PENDING {
            debug!(%category, id, "Event queue full, dropping request");
            return;
        }
        self.pending.push_back(request);
    }
}
