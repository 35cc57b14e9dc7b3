//! Rules engine for the Nightshift simulation.
//!
//! Everything here is a pure transition over a [`GameState`] snapshot. The
//! engine does no I/O: randomness, the wall clock, and the content layer
//! (jobs and event instantiation) all arrive through an
//! [`EngineContext`], so seeded tests can drive every branch exactly.
//!
//! # Modules
//!
//! - [`actions`] -- The Action Processor and one handler per action id
//! - [`catalog`] -- Static content tables (hazards, anomalies, mail, shop)
//! - [`context`] -- Content-layer hooks and the per-resolution context
//! - [`costs`] -- Focus cost table and modifier pipeline
//! - [`locations`] -- Environmental profile per location
//! - [`progression`] -- Level curve, milestones, and unlock gating
//! - [`random`] -- The injectable random source
//! - [`rewards`] -- Deterministic reward tables and skill bonuses
//! - [`skills`] -- Skill catalogue and unlock preconditions
//! - [`tick`] -- The Tick Processor
//!
//! [`GameState`]: nightshift_types::GameState

pub mod actions;
pub mod catalog;
pub mod context;
pub mod costs;
pub mod locations;
pub mod progression;
pub mod random;
pub mod rewards;
pub mod skills;
pub mod tick;

// Re-export the entry points at crate root for convenience.
pub use actions::{ActionId, process_action};
pub use context::{ActionContext, ContentHooks, EngineContext, RecordingHooks, TickContext};
pub use costs::effective_cost;
pub use progression::{
    LevelProgressInfo, NextMilestone, can_spawn_event_category, get_level_progress_info,
    get_unlocked_actions, get_unlocked_event_categories, get_unlocked_tabs, is_action_unlocked,
    is_tab_unlocked, xp_for_next_level,
};
pub use random::{RandomSource, ScriptedRandom, SeededRandom, ThreadRandom};
pub use tick::{advance, process_tick};
