//! One headless play session.
//!
//! A [`Session`] owns the live state, the random source, the content deck,
//! and the save slot. The main loop feeds it ticks and parsed [`Command`]s;
//! everything it does goes through the engine's public entry points.
//!
//! # Order of operations (per tick)
//!
//! 1. Advance the state by the elapsed time at the current location
//! 2. Deal a queued event if the event slot is free
//! 3. Drain the notification queue for display

use nightshift_engine::{
    EngineContext, RandomSource, SeededRandom, ThreadRandom, advance, get_level_progress_info,
    is_action_unlocked, is_tab_unlocked, process_action,
};
use nightshift_save::slot::sanitize_loaded;
use nightshift_save::{
    FileStorage, SaveError, Storage, export_game_data, import_game_data, load_state, save_state,
};
use nightshift_types::{GameState, LocationId, Notification};
use serde_json::Value;
use tracing::{debug, info};

use crate::config::RunnerConfig;
use crate::content::ContentDeck;
use crate::error::RunnerError;

/// Mixed into the session seed so the deck does not mirror the engine's draws.
const DECK_SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// A line typed at the runner.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Run an engine action with an optional JSON payload.
    Action {
        /// Action id, e.g. `COMPLETE_JOB`.
        id: String,
        /// Payload; `null` when none was given.
        payload: Value,
    },
    /// Move to another location.
    Go(LocationId),
    /// Print a summary of the state.
    Status,
    /// Print a transfer string.
    Export,
    /// Replace the state from a transfer string.
    Import(String),
    /// Write the save slot now.
    Save,
    /// List commands.
    Help,
    /// Save and stop.
    Quit,
}

impl Command {
    /// Parse one input line. Blank lines parse to `None`.
    pub fn parse(line: &str) -> Result<Option<Self>, RunnerError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (head, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(h, r)| (h, r.trim()));

        let Some(name) = head.strip_prefix(':') else {
            let payload = if rest.is_empty() {
                Value::Null
            } else {
                serde_json::from_str(rest)
                    .map_err(|e| RunnerError::Command(format!("payload is not JSON: {e}")))?
            };
            return Ok(Some(Self::Action {
                id: head.to_owned(),
                payload,
            }));
        };

        let command = match name {
            "go" => {
                let location = LocationId::parse(rest)
                    .ok_or_else(|| RunnerError::Command(format!("unknown location '{rest}'")))?;
                Self::Go(location)
            }
            "import" if !rest.is_empty() => Self::Import(rest.to_owned()),
            "import" => return Err(RunnerError::Command(String::from(":import needs a string"))),
            "status" => Self::Status,
            "export" => Self::Export,
            "save" => Self::Save,
            "help" => Self::Help,
            "quit" | "q" => Self::Quit,
            other => return Err(RunnerError::Command(format!("unknown command ':{other}'"))),
        };
        Ok(Some(command))
    }
}

/// What the loop should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Print this and keep going.
    Text(String),
    /// Stop the session.
    Quit,
}

const HELP: &str = "\
<ACTION_ID> [json]  run an action, e.g. PERFORM_HANGAR_TASK {\"task\":\"lube_gear\"}
:go <location>      move (hangar, apron, office, break_room, toolroom, backshop, archive)
:status             summary of the shift
:export             print a transfer string
:import <string>    replace the state from a transfer string
:save               write the save slot
:quit               save and stop";

/// Whether the player may be at `location`: its tab must be unlocked at
/// the current level and any access flag it needs must be set.
pub fn location_open(location: LocationId, state: &GameState) -> bool {
    let access = match location {
        LocationId::Toolroom => state.flags.toolroom_access,
        LocationId::Backshop => state.flags.backshop_access,
        LocationId::Archive => state.flags.archive_access,
        LocationId::Hangar | LocationId::Apron | LocationId::Office | LocationId::BreakRoom => {
            true
        }
    };
    access && is_tab_unlocked(location.as_str(), state)
}

/// A running session.
pub struct Session {
    state: GameState,
    rng: Box<dyn RandomSource>,
    deck: ContentDeck,
    location: LocationId,
    storage: Box<dyn Storage>,
    key: String,
    ticks: u64,
}

impl core::fmt::Debug for Session {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Session")
            .field("location", &self.location)
            .field("key", &self.key)
            .field("ticks", &self.ticks)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Start a session over an already loaded state.
    pub fn new(
        state: GameState,
        location: LocationId,
        seed: Option<u64>,
        storage: Box<dyn Storage>,
        key: impl Into<String>,
    ) -> Self {
        let (rng, deck_rng): (Box<dyn RandomSource>, Box<dyn RandomSource>) = match seed {
            Some(seed) => (
                Box::new(SeededRandom::new(seed)),
                Box::new(SeededRandom::new(seed ^ DECK_SEED_SALT)),
            ),
            None => (Box::new(ThreadRandom::new()), Box::new(ThreadRandom::new())),
        };
        let location = if location_open(location, &state) {
            location
        } else {
            LocationId::Hangar
        };
        Self {
            state,
            rng,
            deck: ContentDeck::new(deck_rng),
            location,
            storage,
            key: key.into(),
            ticks: 0,
        }
    }

    /// Open the configured save slot and start a session on it.
    pub fn open(config: &RunnerConfig) -> Result<Self, RunnerError> {
        let storage = FileStorage::new(&config.storage.dir);
        let state = load_state(&storage, &config.storage.key);
        info!(
            dir = %storage.dir().display(),
            key = config.storage.key,
            level = state.resources.level,
            "Session opened"
        );
        Ok(Self::new(
            state,
            config.session.start_location()?,
            config.session.seed,
            Box::new(storage),
            config.storage.key.clone(),
        ))
    }

    /// The live state.
    pub const fn state(&self) -> &GameState {
        &self.state
    }

    /// Where the player is.
    pub const fn location(&self) -> LocationId {
        self.location
    }

    /// Ticks run so far.
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Advance by `delta_ms`, deal any queued event, and return the
    /// notifications raised since the last tick.
    pub fn tick(&mut self, delta_ms: f64, now_ms: i64) -> Vec<Notification> {
        let mut ctx = EngineContext::new(self.rng.as_mut(), &mut self.deck, now_ms);
        advance(&mut self.state, delta_ms, &mut ctx, self.location);
        self.deck.deal(&mut self.state, now_ms);
        self.ticks = self.ticks.saturating_add(1);
        std::mem::take(&mut self.state.notification_queue)
    }

    /// Run an action. Locked actions are refused without reaching the
    /// engine. Returns the log lines the action wrote, oldest first.
    pub fn act(&mut self, id: &str, payload: &Value, now_ms: i64) -> Vec<String> {
        if !is_action_unlocked(id, &self.state) {
            debug!(action = id, level = self.state.resources.level, "Locked action refused");
            return vec![format!("{id} is not available yet.")];
        }
        let newest = self.state.logs.first().map(|e| e.id.clone());
        let mut ctx = EngineContext::new(self.rng.as_mut(), &mut self.deck, now_ms);
        self.state = process_action(&self.state, id, payload, &mut ctx);
        self.deck.deal(&mut self.state, now_ms);

        let mut lines: Vec<String> = self
            .state
            .logs
            .iter()
            .take_while(|e| Some(&e.id) != newest.as_ref())
            .map(|e| e.text.clone())
            .collect();
        lines.reverse();
        lines
    }

    /// Move to `location` if it is open.
    pub fn travel(&mut self, location: LocationId) -> Result<(), RunnerError> {
        if !location_open(location, &self.state) {
            return Err(RunnerError::Command(format!("the {location} is locked")));
        }
        info!(from = %self.location, to = %location, "Moved");
        self.location = location;
        Ok(())
    }

    /// Replace the state from a transfer string.
    pub fn import(&mut self, blob: &str, now_ms: i64) -> Result<(), RunnerError> {
        let mut state = import_game_data(blob)
            .ok_or_else(|| RunnerError::Command(String::from("not a valid transfer string")))?;
        sanitize_loaded(&mut state, now_ms);
        self.deck.clear();
        if !location_open(self.location, &state) {
            self.location = LocationId::Hangar;
        }
        self.state = state;
        info!(level = self.state.resources.level, "State imported");
        Ok(())
    }

    /// Write the save slot.
    pub fn save(&self) -> Result<(), SaveError> {
        save_state(self.storage.as_ref(), &self.key, &self.state)
    }

    /// One-screen summary of the shift.
    pub fn status(&self) -> String {
        let s = &self.state;
        let r = &s.resources;
        let progress = get_level_progress_info(s);
        let mut out = format!(
            "level {} ({:.0}/{:.0} xp) at the {}\n\
             sanity {:.0}  suspicion {:.0}  focus {:.0}  health {:.0}\n\
             credits {:.0}  alclad {:.1}  rivets {:.0}  scrap {:.1}  kardex {:.0}",
            r.level,
            progress.experience,
            progress.xp_for_next,
            self.location,
            r.sanity,
            r.suspicion,
            r.focus,
            r.health,
            r.credits,
            r.alclad,
            r.rivets,
            r.scrap_metal,
            r.kardex_fragments,
        );
        if let Some(job) = &s.active_job {
            out.push_str(&format!(
                "\njob: {} ({:.0}s left)",
                job.title,
                job.time_left / 1000.0
            ));
        }
        if let Some(event) = &s.active_event {
            out.push_str(&format!("\nevent: {} [{}]", event.title, event.category));
        }
        let queued = self.deck.pending();
        if queued > 0 {
            out.push_str(&format!("\n{queued} more event(s) waiting"));
        }
        let unread = s.unread_mail_count();
        if unread > 0 {
            out.push_str(&format!("\nmail: {unread} unread"));
        }
        out
    }

    /// Carry out one command.
    pub fn execute(&mut self, command: Command, now_ms: i64) -> Result<Reply, RunnerError> {
        let text = match command {
            Command::Action { id, payload } => self.act(&id, &payload, now_ms).join("\n"),
            Command::Go(location) => {
                self.travel(location)?;
                format!("You are in the {location}.")
            }
            Command::Status => self.status(),
            Command::Export => export_game_data(&self.state)?,
            Command::Import(blob) => {
                self.import(&blob, now_ms)?;
                String::from("Imported.")
            }
            Command::Save => {
                self.save()?;
                String::from("Saved.")
            }
            Command::Help => HELP.to_owned(),
            Command::Quit => return Ok(Reply::Quit),
        };
        Ok(Reply::Text(text))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use nightshift_save::{MemoryStorage, export_game_data_at, load_state_at};
    use serde_json::json;

    use super::*;

    const NOW: i64 = 1_700_000_000_000;

    fn session(state: GameState) -> Session {
        Session::new(
            state,
            LocationId::Hangar,
            Some(7),
            Box::new(MemoryStorage::new()),
            "test",
        )
    }

    #[test]
    fn parses_actions_and_meta_commands() {
        assert_eq!(Command::parse("   ").unwrap(), None);
        assert_eq!(
            Command::parse("PERFORM_HANGAR_TASK {\"task\": \"lube_gear\"}").unwrap(),
            Some(Command::Action {
                id: String::from("PERFORM_HANGAR_TASK"),
                payload: json!({ "task": "lube_gear" }),
            })
        );
        assert_eq!(
            Command::parse("COMPLETE_JOB").unwrap(),
            Some(Command::Action {
                id: String::from("COMPLETE_JOB"),
                payload: Value::Null,
            })
        );
        assert_eq!(
            Command::parse(":go break_room").unwrap(),
            Some(Command::Go(LocationId::BreakRoom))
        );
        assert_eq!(Command::parse(":q").unwrap(), Some(Command::Quit));
        assert!(Command::parse(":go roof").is_err());
        assert!(Command::parse(":import").is_err());
        assert!(Command::parse(":dance").is_err());
        assert!(Command::parse("COMPLETE_JOB {oops").is_err());
    }

    #[test]
    fn locked_actions_never_reach_the_engine() {
        let mut s = session(GameState::default());
        let before = s.state().clone();
        let lines = s.act("FILE_FINAL_REPORT", &Value::Null, NOW);
        assert_eq!(lines, vec![String::from("FILE_FINAL_REPORT is not available yet.")]);
        assert_eq!(s.state(), &before);
    }

    #[test]
    fn locked_locations_are_refused() {
        let mut s = session(GameState::default());
        assert!(s.travel(LocationId::Backshop).is_err());
        assert_eq!(s.location(), LocationId::Hangar);

        let mut state = GameState::default();
        state.resources.level = 4;
        state.flags.backshop_access = true;
        let mut s = session(state);
        s.travel(LocationId::Backshop).unwrap();
        assert_eq!(s.location(), LocationId::Backshop);
    }

    #[test]
    fn travel_agrees_with_the_tab_unlocks() {
        let mut s = session(GameState::default());
        for location in LocationId::ALL {
            let unlocked = is_tab_unlocked(location.as_str(), s.state());
            assert_eq!(s.travel(location).is_ok(), unlocked, "{location}");
        }
        assert!(s.travel(LocationId::Apron).is_err());

        let mut state = GameState::default();
        state.resources.level = 3;
        let mut s = session(state);
        s.travel(LocationId::Apron).unwrap();
        assert_eq!(s.location(), LocationId::Apron);
    }

    #[test]
    fn locked_start_location_falls_back_to_the_hangar() {
        let s = Session::new(
            GameState::default(),
            LocationId::Apron,
            Some(7),
            Box::new(MemoryStorage::new()),
            "test",
        );
        assert_eq!(s.location(), LocationId::Hangar);
    }

    #[test]
    fn ticks_keep_a_job_on_the_board() {
        let mut s = session(GameState::default());
        s.tick(1_000.0, NOW);
        s.tick(1_000.0, NOW + 1_000);
        assert_eq!(s.ticks(), 2);
        assert!(s.state().active_job.is_some());
        assert!(s.state().notification_queue.is_empty());
    }

    #[test]
    fn save_then_reload_through_the_slot() {
        let mut state = GameState::default();
        state.resources.credits = 321.0;
        let s = session(state);
        s.save().unwrap();
        let loaded = load_state_at(s.storage.as_ref(), "test", NOW);
        assert!((loaded.resources.credits - 321.0).abs() < f64::EPSILON);
    }

    #[test]
    fn import_replaces_the_state() {
        let mut other = GameState::default();
        other.resources.level = 4;
        other.flags.is_afraid = true;
        let blob = export_game_data_at(&other, NOW).unwrap();

        let mut s = session(GameState::default());
        let reply = s.execute(Command::Import(blob), NOW).unwrap();
        assert_eq!(reply, Reply::Text(String::from("Imported.")));
        assert_eq!(s.state().resources.level, 4);
        assert!(!s.state().flags.is_afraid);

        assert!(s.execute(Command::Import(String::from("zz")), NOW).is_err());
        assert_eq!(s.execute(Command::Quit, NOW).unwrap(), Reply::Quit);
    }
}
