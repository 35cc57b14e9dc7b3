//! Collaborators handed to the action and tick processors.
//!
//! The engine never builds jobs or events itself. It asks the external
//! content layer through [`ContentHooks`]: `create_job` must return a fresh
//! work card, and `trigger_event` is fire-and-forget (the engine never waits
//! for or inspects what the content layer does with it).

use nightshift_types::{EventCategory, Job};

use crate::random::RandomSource;

/// The external content layer.
pub trait ContentHooks {
    /// Build a fresh work card to replace a completed or expired one.
    fn create_job(&mut self) -> Job;

    /// Ask for an event of `category` to be spawned, optionally a specific
    /// content `id`.
    fn trigger_event(&mut self, category: EventCategory, id: Option<&str>);
}

/// Hooks that record every trigger and hand out numbered placeholder jobs.
///
/// Used by tests and by headless tooling that only cares which events the
/// engine asked for.
#[derive(Debug, Clone, Default)]
pub struct RecordingHooks {
    /// Every `(category, id)` passed to `trigger_event`, oldest first.
    pub triggered: Vec<(EventCategory, Option<String>)>,
    /// Number of jobs handed out.
    pub jobs_created: u32,
}

impl RecordingHooks {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any trigger of `category` was recorded.
    pub fn saw(&self, category: EventCategory) -> bool {
        self.triggered.iter().any(|(c, _)| *c == category)
    }
}

impl ContentHooks for RecordingHooks {
    fn create_job(&mut self) -> Job {
        self.jobs_created = self.jobs_created.saturating_add(1);
        Job {
            id: format!("job-{}", self.jobs_created),
            title: String::from("Routine inspection"),
            description: String::from("Walk the aircraft and sign the card."),
            time_left: 60_000.0,
            total_time: 60_000.0,
            required_tool: None,
            reward: nightshift_types::RewardBundle::new(20.0, 10.0, 0.0, 0.0),
            is_retrofit: false,
        }
    }

    fn trigger_event(&mut self, category: EventCategory, id: Option<&str>) {
        self.triggered.push((category, id.map(str::to_owned)));
    }
}

/// Everything one action or tick resolution may reach outside the state.
pub struct EngineContext<'a> {
    /// The single source of randomness.
    pub rng: &'a mut dyn RandomSource,
    /// The external content layer.
    pub hooks: &'a mut dyn ContentHooks,
    /// Wall-clock epoch milliseconds for timestamps and cooldowns.
    pub now_ms: i64,
}

impl<'a> EngineContext<'a> {
    /// Bundle the collaborators for one resolution.
    pub fn new(rng: &'a mut dyn RandomSource, hooks: &'a mut dyn ContentHooks, now_ms: i64) -> Self {
        Self { rng, hooks, now_ms }
    }
}

impl core::fmt::Debug for EngineContext<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EngineContext")
            .field("now_ms", &self.now_ms)
            .finish_non_exhaustive()
    }
}

/// Context for [`process_action`](crate::actions::process_action).
pub type ActionContext<'a> = EngineContext<'a>;

/// Context for [`advance`](crate::tick::advance).
pub type TickContext<'a> = EngineContext<'a>;
