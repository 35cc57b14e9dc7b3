//! Action Processor behavior through the public entry point.
//!
//! Every test scripts its random draws so branch selection is exact.

#![allow(clippy::unwrap_used, clippy::float_cmp, clippy::indexing_slicing)]

use nightshift_engine::catalog::HYDRAULIC_CONTAMINATION;
use nightshift_engine::{EngineContext, RecordingHooks, ScriptedRandom, process_action};
use nightshift_types::{
    ActiveEvent, Anomaly, EventCategory, GameState, Job, LogType, MailMessage, RewardBundle,
    Rotable, ToolId,
};
use serde_json::{Value, json};

const NOW: i64 = 1_700_000_000_000;

fn run_with(state: &GameState, action: &str, payload: &Value, draws: &[f64]) -> GameState {
    let mut rng = ScriptedRandom::new(draws.iter().copied(), 0.99);
    let mut hooks = RecordingHooks::new();
    let mut ctx = EngineContext::new(&mut rng, &mut hooks, NOW);
    process_action(state, action, payload, &mut ctx)
}

fn run_recorded(
    state: &GameState,
    action: &str,
    payload: &Value,
    draws: &[f64],
) -> (GameState, RecordingHooks) {
    let mut rng = ScriptedRandom::new(draws.iter().copied(), 0.99);
    let mut hooks = RecordingHooks::new();
    let next = {
        let mut ctx = EngineContext::new(&mut rng, &mut hooks, NOW);
        process_action(state, action, payload, &mut ctx)
    };
    (next, hooks)
}

fn run(state: &GameState, action: &str) -> GameState {
    run_with(state, action, &Value::Null, &[])
}

fn rotable(id: &str, condition: f64, installed: bool) -> Rotable {
    Rotable {
        id: id.to_owned(),
        label: String::from("Hydraulic pump"),
        part_number: String::from("HP-3201"),
        serial_number: String::from("SN-0000BEEF"),
        condition,
        is_installed: installed,
        ..Rotable::default()
    }
}

fn event(id: &str, category: EventCategory, tool: Option<ToolId>) -> ActiveEvent {
    ActiveEvent {
        id: id.to_owned(),
        category,
        title: String::from("Something on the floor"),
        description: String::new(),
        time_left: 30_000.0,
        total_time: 30_000.0,
        required_tool: tool,
        reward: RewardBundle::new(30.0, 20.0, 0.0, 0.0),
        rotable_id: None,
        failure: None,
    }
}

fn anomaly(id: &str, template: &str) -> Anomaly {
    Anomaly {
        id: id.to_owned(),
        template_id: template.to_owned(),
        discovered_at: 0,
    }
}

#[test]
fn affordable_action_deducts_exactly_its_cost() {
    let state = GameState::default();
    let next = run(&state, "FILE_PAPERWORK");
    assert_eq!(next.resources.focus, 90.0);
    assert_eq!(next.resources.experience, 10.0);
}

#[test]
fn unaffordable_action_is_declined_with_a_warning() {
    let mut state = GameState::default();
    state.resources.focus = 5.0;
    state.resources.suspicion = 40.0;

    let next = run(&state, "FILE_PAPERWORK");
    assert_eq!(next.resources.focus, 5.0);
    assert_eq!(next.resources.suspicion, 40.0);
    assert_eq!(next.resources.experience, 0.0);
    assert_eq!(next.logs[0].log_type, LogType::Warning);
}

#[test]
fn fear_and_pip_stack_on_the_cost() {
    let mut state = GameState::default();
    state.flags.is_afraid = true;
    state.flags.on_pip = true;
    let next = run(&state, "INSPECT_AIRCRAFT");
    assert_eq!(next.resources.focus, 73.0);
}

#[test]
fn loophole_makes_paperwork_free() {
    let mut state = GameState::default();
    state.hf_stats.found_loophole_timer = 10_000.0;
    let next = run(&state, "FILE_PAPERWORK");
    assert_eq!(next.resources.focus, 100.0);
}

#[test]
fn input_snapshot_is_never_mutated() {
    let mut state = GameState::default();
    state.resources.credits = 200.0;
    let before = state.clone();
    let next = run_with(&state, "BRIBE_AUDITOR", &Value::Null, &[0.9]);
    assert_eq!(state, before);
    assert_ne!(next, before);
}

#[test]
fn unknown_action_changes_nothing() {
    let state = GameState::default();
    let next = run(&state, "SUMMON_THE_HUM");
    assert_eq!(next, state);
}

#[test]
fn logical_failure_refunds_focus() {
    let state = GameState::default();
    // Recalibration costs 75 credits; the default purse holds 50.
    let next = run_with(&state, "REPAIR_TOOL", &json!({ "toolId": "torqueWrench" }), &[]);
    assert_eq!(next.resources.focus, 100.0);
    assert_eq!(next.resources.credits, 50.0);
    assert_eq!(next.logs[0].log_type, LogType::Error);
}

#[test]
fn missing_tool_refunds_and_keeps_the_job() {
    let mut state = GameState::default();
    state.active_job = Some(Job {
        id: String::from("borescope-job"),
        title: String::from("Borescope the number two engine"),
        time_left: 60_000.0,
        total_time: 60_000.0,
        required_tool: Some(ToolId::Borescope),
        reward: RewardBundle::new(50.0, 20.0, 0.0, 0.0),
        ..Job::default()
    });
    let next = run(&state, "COMPLETE_JOB");
    assert_eq!(next.resources.focus, 100.0);
    assert_eq!(next.resources.experience, 0.0);
    assert_eq!(next.active_job, state.active_job);
}

#[test]
fn completing_a_job_pays_wears_the_tool_and_deals_a_new_card() {
    let mut state = GameState::default();
    state.active_job = Some(Job {
        id: String::from("torque-job"),
        title: String::from("Torque the gear leg bolts"),
        time_left: 60_000.0,
        total_time: 60_000.0,
        required_tool: Some(ToolId::TorqueWrench),
        reward: RewardBundle::new(20.0, 10.0, 0.0, 0.0),
        ..Job::default()
    });

    // Wear amount 2 + 6 × 0.5 = 5, then the anomaly roll misses.
    let next = run_with(&state, "COMPLETE_JOB", &Value::Null, &[0.5, 0.99]);
    assert_eq!(next.resources.focus, 90.0);
    assert_eq!(next.resources.experience, 20.0);
    assert_eq!(next.resources.credits, 60.0);
    assert_eq!(next.tool_condition(ToolId::TorqueWrench), 95.0);
    assert_eq!(next.stats.jobs_completed, 1);
    assert_eq!(next.active_job.as_ref().map(|j| j.id.as_str()), Some("job-1"));
    assert!(next.anomalies.is_empty());
}

#[test]
fn job_side_effect_can_turn_up_an_anomaly() {
    let mut state = GameState::default();
    state.active_job = Some(Job {
        id: String::from("plain"),
        title: String::from("Check tyre pressures"),
        reward: RewardBundle::new(5.0, 0.0, 0.0, 0.0),
        ..Job::default()
    });
    // No tool, so the first draw is the anomaly roll; then the template pick.
    let next = run_with(&state, "COMPLETE_JOB", &Value::Null, &[0.01, 0.0]);
    assert_eq!(next.anomalies.len(), 1);
}

#[test]
fn unlock_skill_spends_one_point_once() {
    let mut state = GameState::default();
    state.proficiency.skill_points = 1;
    let payload = json!({ "skillId": "keen_eye" });

    let once = run_with(&state, "UNLOCK_SKILL", &payload, &[]);
    assert_eq!(once.proficiency.skill_points, 0);
    assert_eq!(once.proficiency.unlocked, vec![String::from("keen_eye")]);

    let twice = run_with(&once, "UNLOCK_SKILL", &payload, &[]);
    assert_eq!(twice.proficiency.skill_points, 0);
    assert_eq!(twice.proficiency.unlocked, vec![String::from("keen_eye")]);
    assert_eq!(twice.logs.len(), once.logs.len());
}

#[test]
fn unlock_skill_refusals_are_silent() {
    let mut state = GameState::default();
    state.proficiency.skill_points = 2;

    let missing_prereq = run_with(&state, "UNLOCK_SKILL", &json!({ "skillId": "scrounger" }), &[]);
    assert_eq!(missing_prereq, state);

    let unknown = run_with(&state, "UNLOCK_SKILL", &json!({ "skillId": "telepathy" }), &[]);
    assert_eq!(unknown, state);
}

#[test]
fn toggles_flip_and_log_every_call() {
    let state = GameState::default();
    let on = run(&state, "TOGGLE_NIGHT_CREW");
    assert!(on.flags.night_crew_active);
    let off = run(&on, "TOGGLE_NIGHT_CREW");
    assert!(!off.flags.night_crew_active);
    assert_eq!(off.logs.len(), 2);
}

#[test]
fn successful_bribe_at_point_three() {
    let mut state = GameState::default();
    state.resources.credits = 200.0;
    state.resources.suspicion = 50.0;
    let next = run_with(&state, "BRIBE_AUDITOR", &Value::Null, &[0.3]);
    assert_eq!(next.resources.credits, 100.0);
    assert_eq!(next.resources.suspicion, 30.0);
    assert!(!next.flags.on_pip);
}

#[test]
fn failed_bribe_puts_you_on_a_pip() {
    let mut state = GameState::default();
    state.resources.credits = 200.0;
    state.resources.suspicion = 50.0;
    let next = run_with(&state, "BRIBE_AUDITOR", &Value::Null, &[0.6]);
    assert_eq!(next.resources.credits, 100.0);
    assert_eq!(next.resources.suspicion, 65.0);
    assert!(next.flags.on_pip);
}

#[test]
fn disposal_costs_five_hundred_and_removes_the_part() {
    let mut state = GameState::default();
    state.resources.credits = 600.0;
    state.rotables.push(rotable("rot-1", 40.0, false));
    let next = run_with(&state, "DISPOSE_ROTABLE", &json!({ "rotableId": "rot-1" }), &[]);
    assert_eq!(next.resources.credits, 100.0);
    assert!(next.rotables.is_empty());
    assert_eq!(next.stats.rotables_disposed, 1);
}

#[test]
fn harvest_strips_and_removes_an_uninstalled_part() {
    let mut state = GameState::default();
    state.rotables.push(rotable("rot-1", 55.0, false));
    let next = run_with(&state, "HARVEST_ROTABLE", &json!({ "rotableId": "rot-1" }), &[]);
    assert_eq!(next.resources.alclad, 5.0);
    assert_eq!(next.resources.scrap_metal, 5.0);
    assert!(next.rotables.is_empty());
}

#[test]
fn installed_part_cannot_be_harvested() {
    let mut state = GameState::default();
    state.rotables.push(rotable("rot-1", 55.0, true));
    let next = run_with(&state, "HARVEST_ROTABLE", &json!({ "rotableId": "rot-1" }), &[]);
    assert_eq!(next.rotables.len(), 1);
    assert_eq!(next.resources.focus, 100.0);
}

#[test]
fn repair_clears_the_component_failure() {
    let mut state = GameState::default();
    state.resources.alclad = 10.0;
    state.resources.rivets = 20.0;
    state.rotables.push(rotable("rot-1", 12.0, true));
    state.flags.active_component_failure = true;
    state.flags.failing_rotable_id = Some(String::from("rot-1"));

    let next = run_with(&state, "REPAIR_ROTABLE", &json!({ "rotableId": "rot-1" }), &[]);
    assert!(!next.flags.active_component_failure);
    assert!(next.flags.failing_rotable_id.is_none());
    assert_eq!(next.rotables[0].condition, 100.0);
    assert_eq!(next.resources.alclad, 0.0);
    assert_eq!(next.resources.rivets, 0.0);
}

#[test]
fn analyzing_consumes_the_anomaly() {
    let mut state = GameState::default();
    state.anomalies.push(Anomaly {
        id: String::from("a-1"),
        template_id: String::from("warm_rivet"),
        discovered_at: 0,
    });
    let next = run_with(&state, "ANALYZE_ANOMALY", &json!({ "anomalyId": "a-1" }), &[]);
    assert!(next.anomalies.is_empty());
    assert_eq!(next.stats.anomalies_analyzed, 1);
    assert_eq!(next.resources.focus, 80.0);
}

#[test]
fn reading_mail_pays_once() {
    let mut state = GameState::default();
    state.mail.push(MailMessage {
        id: String::from("m-1"),
        sender: String::from("Quality"),
        subject: String::from("Reminder"),
        body: String::new(),
        read: false,
        received_at: 0,
    });
    let payload = json!({ "mailId": "m-1" });
    let once = run_with(&state, "READ_MAIL", &payload, &[]);
    let twice = run_with(&once, "READ_MAIL", &payload, &[]);
    assert!(twice.mail[0].read);
    assert_eq!(twice.resources.experience, 5.0);
}

#[test]
fn overtime_compresses_the_schedule() {
    let state = GameState::default();
    let next = run(&state, "ACCEPT_OVERTIME");
    assert!(next.flags.schedule_compressed);
    assert_eq!(next.hf_stats.schedule_compression_timer, 120_000.0);
    assert_eq!(next.resources.credits, 100.0);

    let again = run(&next, "ACCEPT_OVERTIME");
    assert_eq!(again.resources.credits, 100.0);
    assert_eq!(again.logs[0].log_type, LogType::Error);
}

// ---------------------------------------------------------------------------
// Hangar floor
// ---------------------------------------------------------------------------

#[test]
fn inspection_below_point_one_turns_up_an_anomaly() {
    let state = GameState::default();
    let next = run_with(&state, "INSPECT_AIRCRAFT", &Value::Null, &[0.09, 0.0]);
    assert_eq!(next.resources.focus, 85.0);
    assert_eq!(next.anomalies.len(), 1);
    assert_eq!(next.anomalies[0].template_id, "warm_rivet");
    assert!(next.rotables.is_empty());
}

#[test]
fn inspection_between_point_one_and_point_three_logs_a_rotable() {
    let state = GameState::default();

    // Condition 30 + 70 × 0.5, then the traceability roll hits.
    let next = run_with(&state, "INSPECT_AIRCRAFT", &Value::Null, &[0.1, 0.5, 0.1]);
    assert!(next.anomalies.is_empty());
    assert_eq!(next.rotables.len(), 1);
    let part = &next.rotables[0];
    assert_eq!(part.label, "Hydraulic Pump");
    assert_eq!(part.condition, 65.0);
    assert!(part.is_installed);
    assert!(part.is_untraceable);
    assert!(part.serial_number.starts_with("SN-"));

    let next = run_with(&state, "INSPECT_AIRCRAFT", &Value::Null, &[0.29, 0.0, 0.25]);
    assert_eq!(next.rotables[0].condition, 30.0);
    assert!(!next.rotables[0].is_untraceable);
}

#[test]
fn inspection_between_point_three_and_point_six_salvages_offcuts() {
    let state = GameState::default();
    for draw in [0.3, 0.59] {
        let next = run_with(&state, "INSPECT_AIRCRAFT", &Value::Null, &[draw]);
        assert!(next.rotables.is_empty());
        assert_eq!(next.resources.alclad, 5.0);
        assert_eq!(next.resources.rivets, 20.0);
        assert_eq!(next.resources.experience, 0.0);
    }
}

#[test]
fn inspection_from_point_six_is_a_routine_walkaround() {
    let state = GameState::default();
    let next = run_with(&state, "INSPECT_AIRCRAFT", &Value::Null, &[0.6]);
    assert_eq!(next.resources.experience, 15.0);
    assert_eq!(next.resources.alclad, 0.0);
    assert!(next.rotables.is_empty());
    assert!(next.anomalies.is_empty());
}

#[test]
fn listening_below_point_one_five_frightens() {
    let state = GameState::default();
    let next = run_with(&state, "LISTEN_TO_HULL", &Value::Null, &[0.14]);
    assert_eq!(next.resources.focus, 95.0);
    assert!(next.flags.is_afraid);
    assert_eq!(next.hf_stats.fear_timer, 20_000.0);
    assert_eq!(next.resources.sanity, 92.0);
    assert!(next.anomalies.is_empty());
}

#[test]
fn listening_between_point_one_five_and_point_four_finds_an_anomaly() {
    let state = GameState::default();
    for draw in [0.15, 0.39] {
        let next = run_with(&state, "LISTEN_TO_HULL", &Value::Null, &[draw, 0.0]);
        assert!(!next.flags.is_afraid);
        assert_eq!(next.anomalies.len(), 1);
        assert_eq!(next.resources.kardex_fragments, 0.0);
    }
}

#[test]
fn listening_between_point_four_and_point_seven_copies_a_pattern() {
    let state = GameState::default();
    for draw in [0.4, 0.69] {
        let next = run_with(&state, "LISTEN_TO_HULL", &Value::Null, &[draw]);
        assert!(next.anomalies.is_empty());
        assert_eq!(next.resources.kardex_fragments, 1.0);
        assert_eq!(next.resources.experience, 30.0);
    }
}

#[test]
fn listening_from_point_seven_restores_a_little_sanity() {
    let mut state = GameState::default();
    state.resources.sanity = 50.0;
    let next = run_with(&state, "LISTEN_TO_HULL", &Value::Null, &[0.7]);
    assert_eq!(next.resources.sanity, 52.0);
    assert_eq!(next.resources.kardex_fragments, 0.0);
}

#[test]
fn following_the_sound_walks_every_stage_then_pays() {
    let state = GameState::default();

    let first = run_with(&state, "FOLLOW_THE_SOUND", &Value::Null, &[0.3]);
    let scenario = first.active_scenario.clone().unwrap();
    assert_eq!(scenario.id, "the_hum");
    assert_eq!(scenario.stage, 1);
    assert_eq!(scenario.started_at, NOW);

    let second = run_with(&first, "FOLLOW_THE_SOUND", &Value::Null, &[0.5]);
    assert_eq!(second.active_scenario.as_ref().map(|s| s.stage), Some(2));
    assert_eq!(second.resources.kardex_fragments, 0.0);

    let done = run_with(&second, "FOLLOW_THE_SOUND", &Value::Null, &[0.5]);
    assert!(done.active_scenario.is_none());
    assert_eq!(done.resources.kardex_fragments, 2.0);
    assert_eq!(done.resources.experience, 200.0);
    assert_eq!(done.resources.focus, 70.0);
    assert!(!done.flags.is_afraid);
}

#[test]
fn following_the_sound_aborts_below_point_three() {
    let state = GameState::default();
    let first = run_with(&state, "FOLLOW_THE_SOUND", &Value::Null, &[0.5]);
    assert!(first.active_scenario.is_some());

    let next = run_with(&first, "FOLLOW_THE_SOUND", &Value::Null, &[0.29]);
    assert!(next.active_scenario.is_none());
    assert!(next.flags.is_afraid);
    assert_eq!(next.resources.sanity, 90.0);
    assert_eq!(next.resources.kardex_fragments, 0.0);
    assert_eq!(next.resources.experience, 0.0);
}

#[test]
fn resolving_an_event_pays_and_clears_it() {
    let mut state = GameState::default();
    state.active_event = Some(event(
        "LOOSE_PANEL",
        EventCategory::Incident,
        Some(ToolId::TorqueWrench),
    ));

    // Wear amount 2 + 6 × 0.5 = 5.
    let next = run_with(&state, "RESOLVE_EVENT", &Value::Null, &[0.5]);
    assert!(next.active_event.is_none());
    assert_eq!(next.resources.focus, 85.0);
    assert_eq!(next.resources.experience, 30.0);
    assert_eq!(next.resources.credits, 70.0);
    assert_eq!(next.stats.events_resolved, 1);
    assert_eq!(next.tool_condition(ToolId::TorqueWrench), 95.0);
}

#[test]
fn component_failures_cannot_be_resolved_away() {
    let mut state = GameState::default();
    state.active_event = Some(event("rot-1", EventCategory::ComponentFailure, None));

    let next = run(&state, "RESOLVE_EVENT");
    assert_eq!(next.active_event, state.active_event);
    assert_eq!(next.resources.focus, 100.0);
    assert_eq!(next.stats.events_resolved, 0);
    assert_eq!(next.logs[0].log_type, LogType::Error);
}

#[test]
fn resolving_with_nothing_active_refunds() {
    let state = GameState::default();
    let next = run(&state, "RESOLVE_EVENT");
    assert_eq!(next.resources.focus, 100.0);
    assert_eq!(next.logs[0].log_type, LogType::Error);
}

#[test]
fn resolving_the_contamination_clears_its_risk_flag() {
    let mut state = GameState::default();
    state.flags.contamination_risk = true;
    state.active_event = Some(event(HYDRAULIC_CONTAMINATION, EventCategory::Accident, None));

    let next = run(&state, "RESOLVE_EVENT");
    assert!(!next.flags.contamination_risk);
    assert!(next.active_event.is_none());

    state.active_event = Some(event("LOOSE_PANEL", EventCategory::Incident, None));
    let other = run(&state, "RESOLVE_EVENT");
    assert!(other.flags.contamination_risk);
}

// ---------------------------------------------------------------------------
// Rotables and anomalies
// ---------------------------------------------------------------------------

#[test]
fn red_tagging_pulls_the_part() {
    let mut state = GameState::default();
    state.resources.suspicion = 20.0;
    state.rotables.push(rotable("rot-1", 40.0, true));

    let next = run_with(&state, "RED_TAG_ROTABLE", &json!({ "rotableId": "rot-1" }), &[]);
    assert!(next.rotables[0].is_red_tagged);
    assert!(!next.rotables[0].is_installed);
    assert_eq!(next.resources.experience, 25.0);
    assert_eq!(next.resources.suspicion, 20.0);
    assert_eq!(next.resources.focus, 95.0);

    let again = run_with(&next, "RED_TAG_ROTABLE", &json!({ "rotableId": "rot-1" }), &[]);
    assert_eq!(again.resources.focus, 95.0);
    assert_eq!(again.resources.experience, 25.0);
    assert_eq!(again.logs[0].log_type, LogType::Error);
}

#[test]
fn red_tagging_an_untraceable_part_eases_suspicion() {
    let mut state = GameState::default();
    state.resources.suspicion = 20.0;
    state.rotables.push(Rotable {
        is_untraceable: true,
        ..rotable("rot-1", 40.0, true)
    });

    let next = run_with(&state, "RED_TAG_ROTABLE", &json!({ "rotableId": "rot-1" }), &[]);
    assert_eq!(next.resources.suspicion, 15.0);
}

#[test]
fn installing_fits_a_serviceable_part() {
    let mut state = GameState::default();
    state.rotables.push(rotable("rot-1", 80.0, false));

    let next = run_with(&state, "INSTALL_ROTABLE", &json!({ "rotableId": "rot-1" }), &[]);
    assert!(next.rotables[0].is_installed);
    assert_eq!(next.resources.experience, 30.0);
    assert_eq!(next.resources.suspicion, 0.0);
    assert_eq!(next.resources.focus, 90.0);

    let again = run_with(&next, "INSTALL_ROTABLE", &json!({ "rotableId": "rot-1" }), &[]);
    assert_eq!(again.resources.focus, 90.0);
    assert_eq!(again.logs[0].log_type, LogType::Error);
}

#[test]
fn installing_an_untraceable_part_draws_suspicion() {
    let mut state = GameState::default();
    state.rotables.push(Rotable {
        is_untraceable: true,
        ..rotable("rot-1", 80.0, false)
    });

    let next = run_with(&state, "INSTALL_ROTABLE", &json!({ "rotableId": "rot-1" }), &[]);
    assert!(next.rotables[0].is_installed);
    assert_eq!(next.resources.suspicion, 10.0);
}

#[test]
fn red_tagged_parts_cannot_be_installed() {
    let mut state = GameState::default();
    state.rotables.push(Rotable {
        is_red_tagged: true,
        ..rotable("rot-1", 80.0, false)
    });

    let next = run_with(&state, "INSTALL_ROTABLE", &json!({ "rotableId": "rot-1" }), &[]);
    assert!(!next.rotables[0].is_installed);
    assert_eq!(next.resources.focus, 100.0);
    assert_eq!(next.resources.experience, 0.0);
}

#[test]
fn sanity_shield_blocks_the_analysis_cost() {
    let mut state = GameState::default();
    state.resources.sanity = 50.0;
    state.anomalies.push(anomaly("a-1", "warm_rivet"));
    let payload = json!({ "anomalyId": "a-1" });

    let unshielded = run_with(&state, "ANALYZE_ANOMALY", &payload, &[]);
    assert_eq!(unshielded.resources.sanity, 47.0);

    state.hf_stats.sanity_shield_timer = 1_000.0;
    let shielded = run_with(&state, "ANALYZE_ANOMALY", &payload, &[]);
    assert_eq!(shielded.resources.sanity, 50.0);
    assert_eq!(shielded.resources.experience, 40.0);
    assert_eq!(shielded.resources.kardex_fragments, 1.0);
    assert!(shielded.anomalies.is_empty());
}

// ---------------------------------------------------------------------------
// Office
// ---------------------------------------------------------------------------

#[test]
fn studying_below_a_quarter_finds_a_loophole() {
    let state = GameState::default();
    let next = run_with(&state, "STUDY_REGULATIONS", &Value::Null, &[0.24]);
    assert_eq!(next.resources.focus, 88.0);
    assert!(next.flags.found_loophole);
    assert_eq!(next.hf_stats.found_loophole_timer, 60_000.0);
    assert_eq!(next.resources.experience, 0.0);

    let free = run(&next, "FILE_PAPERWORK");
    assert_eq!(free.resources.focus, 88.0);
}

#[test]
fn studying_from_a_quarter_is_just_reading() {
    let state = GameState::default();
    let next = run_with(&state, "STUDY_REGULATIONS", &Value::Null, &[0.25]);
    assert!(!next.flags.found_loophole);
    assert_eq!(next.hf_stats.found_loophole_timer, 0.0);
    assert_eq!(next.resources.experience, 15.0);
}

#[test]
fn assembling_the_pc_takes_three_parts_once() {
    let mut state = GameState::default();
    state.inventory.pc_parts = 4;

    let next = run(&state, "ASSEMBLE_PC");
    assert!(next.inventory.pc_assembled);
    assert_eq!(next.inventory.pc_parts, 1);
    assert_eq!(next.resources.focus, 85.0);

    state.inventory.pc_parts = 2;
    let short = run(&state, "ASSEMBLE_PC");
    assert!(!short.inventory.pc_assembled);
    assert_eq!(short.inventory.pc_parts, 2);
    assert_eq!(short.resources.focus, 100.0);

    let mut built = next;
    built.inventory.pc_parts = 3;
    let again = run(&built, "ASSEMBLE_PC");
    assert_eq!(again.inventory.pc_parts, 3);
    assert_eq!(again.logs[0].log_type, LogType::Error);
}

#[test]
fn compiling_the_dossier_binds_twelve_fragments() {
    let mut state = GameState::default();
    state.resources.kardex_fragments = 13.0;

    let next = run(&state, "COMPILE_DOSSIER");
    assert!(next.inventory.has_compiled_dossier);
    assert_eq!(next.resources.kardex_fragments, 1.0);
    assert_eq!(next.resources.focus, 80.0);

    state.resources.kardex_fragments = 11.0;
    let short = run(&state, "COMPILE_DOSSIER");
    assert!(!short.inventory.has_compiled_dossier);
    assert_eq!(short.resources.kardex_fragments, 11.0);
    assert_eq!(short.resources.focus, 100.0);
}

#[test]
fn final_report_needs_standing_and_the_dossier() {
    let mut state = GameState::default();
    state.resources.level = 10;
    state.inventory.has_compiled_dossier = true;

    let (next, hooks) = run_recorded(&state, "FILE_FINAL_REPORT", &Value::Null, &[]);
    assert!(next.flags.ending_reached);
    assert_eq!(next.resources.focus, 70.0);
    assert_eq!(
        hooks.triggered,
        vec![(EventCategory::StoryEvent, Some(String::from("ENDING_WHISTLEBLOWER")))]
    );

    let (again, hooks) = run_recorded(&next, "FILE_FINAL_REPORT", &Value::Null, &[]);
    assert_eq!(again.resources.focus, 70.0);
    assert!(hooks.triggered.is_empty());

    state.resources.level = 9;
    let (early, hooks) = run_recorded(&state, "FILE_FINAL_REPORT", &Value::Null, &[]);
    assert!(!early.flags.ending_reached);
    assert_eq!(early.resources.focus, 100.0);
    assert!(hooks.triggered.is_empty());
}

// ---------------------------------------------------------------------------
// Supply
// ---------------------------------------------------------------------------

#[test]
fn buying_a_tool_delivers_it_calibrated() {
    let mut state = GameState::default();
    state.resources.credits = 500.0;

    let next = run_with(&state, "BUY_ITEM", &json!({ "itemId": "borescope" }), &[]);
    assert!(next.inventory.has_borescope);
    assert_eq!(next.tool_condition(ToolId::Borescope), 100.0);
    assert_eq!(next.resources.credits, 200.0);

    let pills = run_with(&next, "BUY_ITEM", &json!({ "itemId": "pills" }), &[]);
    assert_eq!(pills.inventory.pills, 3);
    assert_eq!(pills.resources.credits, 170.0);
}

#[test]
fn buying_refuses_unknown_or_unaffordable_items() {
    let state = GameState::default();

    let poor = run_with(&state, "BUY_ITEM", &json!({ "itemId": "borescope" }), &[]);
    assert!(!poor.inventory.has_borescope);
    assert_eq!(poor.resources.credits, 50.0);
    assert_eq!(poor.logs[0].log_type, LogType::Error);

    let unknown = run_with(&state, "BUY_ITEM", &json!({ "itemId": "jetpack" }), &[]);
    assert_eq!(unknown.resources.credits, 50.0);
    assert_eq!(unknown.logs[0].log_type, LogType::Error);
}

#[test]
fn mystery_button_below_half_dispenses_a_tooth() {
    let state = GameState::default();
    let payload = json!({ "itemId": "mystery_button" });
    let next = run_with(&state, "BUY_VENDING", &payload, &[0.49]);
    assert_eq!(next.resources.sanity, 97.0);
    assert_eq!(next.resources.kardex_fragments, 0.0);
    assert_eq!(next.resources.credits, 50.0);
}

#[test]
fn mystery_button_from_half_dispenses_a_kardex_card() {
    let state = GameState::default();
    let payload = json!({ "itemId": "mystery_button" });
    let next = run_with(&state, "BUY_VENDING", &payload, &[0.5]);
    assert_eq!(next.resources.sanity, 100.0);
    assert_eq!(next.resources.kardex_fragments, 1.0);
}

#[test]
fn toolroom_master_below_half_fettles_the_worst_tool() {
    let mut state = GameState::default();
    state.inventory.has_borescope = true;
    state.tool_conditions.insert(ToolId::TorqueWrench, 40.0);
    state.tool_conditions.insert(ToolId::Borescope, 10.0);

    let next = run_with(&state, "ASK_TOOLROOM_MASTER", &Value::Null, &[0.49]);
    assert_eq!(next.tool_condition(ToolId::Borescope), 40.0);
    assert_eq!(next.tool_condition(ToolId::TorqueWrench), 40.0);
    assert_eq!(next.resources.experience, 0.0);
    assert_eq!(next.hf_stats.toolroom_master_cooldown, 300_000.0);
    assert_eq!(next.resources.focus, 95.0);
}

#[test]
fn toolroom_master_from_half_tells_a_story() {
    let mut state = GameState::default();
    state.tool_conditions.insert(ToolId::TorqueWrench, 40.0);

    let next = run_with(&state, "ASK_TOOLROOM_MASTER", &Value::Null, &[0.5]);
    assert_eq!(next.tool_condition(ToolId::TorqueWrench), 40.0);
    assert_eq!(next.resources.experience, 40.0);
    assert_eq!(next.hf_stats.toolroom_master_cooldown, 300_000.0);
}

#[test]
fn toolroom_master_refuses_during_the_cooldown() {
    let mut state = GameState::default();
    state.tool_conditions.insert(ToolId::TorqueWrench, 40.0);
    state.hf_stats.toolroom_master_cooldown = 1_000.0;

    let next = run_with(&state, "ASK_TOOLROOM_MASTER", &Value::Null, &[0.0]);
    assert_eq!(next.tool_condition(ToolId::TorqueWrench), 40.0);
    assert_eq!(next.resources.experience, 0.0);
    assert_eq!(next.hf_stats.toolroom_master_cooldown, 1_000.0);
    assert_eq!(next.resources.focus, 100.0);
    assert_eq!(next.logs[0].log_type, LogType::Error);
}

#[test]
fn selling_scrap_clears_the_pile() {
    let mut state = GameState::default();
    state.resources.scrap_metal = 15.0;
    let next = run(&state, "SELL_SCRAP");
    assert_eq!(next.resources.scrap_metal, 0.0);
    assert_eq!(next.resources.credits, 80.0);

    state.resources.scrap_metal = 9.0;
    let short = run(&state, "SELL_SCRAP");
    assert_eq!(short.resources.scrap_metal, 9.0);
    assert_eq!(short.resources.credits, 50.0);
    assert_eq!(short.logs[0].log_type, LogType::Error);
}

#[test]
fn scavenging_below_point_two_finds_a_pc_part() {
    let state = GameState::default();
    let payload = json!({ "spot": "bin_dive" });

    let lucky = run_with(&state, "SCAVENGE", &payload, &[0.19]);
    assert_eq!(lucky.inventory.pc_parts, 1);
    assert_eq!(lucky.resources.alclad, 3.0);
    assert_eq!(lucky.resources.experience, 5.0);
    assert_eq!(lucky.resources.suspicion, 1.0);
    assert_eq!(lucky.resources.focus, 92.0);

    let plain = run_with(&state, "SCAVENGE", &payload, &[0.2]);
    assert_eq!(plain.inventory.pc_parts, 0);
    assert_eq!(plain.resources.alclad, 3.0);
}

// ---------------------------------------------------------------------------
// Personal
// ---------------------------------------------------------------------------

#[test]
fn janitor_below_point_three_hands_over_a_card() {
    let mut state = GameState::default();
    state.flags.janitor_present = true;

    let next = run_with(&state, "TALK_TO_JANITOR", &Value::Null, &[0.29]);
    assert_eq!(next.resources.kardex_fragments, 1.0);
    assert_eq!(next.resources.sanity, 100.0);
    assert!(next.flags.has_met_the_janitor);
    assert!(!next.flags.janitor_present);
    assert_eq!(next.resources.focus, 95.0);
}

#[test]
fn janitor_between_point_three_and_point_seven_is_good_company() {
    let mut state = GameState::default();
    state.flags.janitor_present = true;
    state.resources.sanity = 50.0;
    for draw in [0.3, 0.69] {
        let next = run_with(&state, "TALK_TO_JANITOR", &Value::Null, &[draw]);
        assert_eq!(next.resources.sanity, 60.0);
        assert_eq!(next.resources.kardex_fragments, 0.0);
    }
}

#[test]
fn janitor_from_point_seven_stares() {
    let mut state = GameState::default();
    state.flags.janitor_present = true;
    state.resources.sanity = 50.0;
    let next = run_with(&state, "TALK_TO_JANITOR", &Value::Null, &[0.7]);
    assert_eq!(next.resources.sanity, 45.0);
}

#[test]
fn janitor_must_be_present() {
    let state = GameState::default();
    let next = run_with(&state, "TALK_TO_JANITOR", &Value::Null, &[0.0]);
    assert!(!next.flags.has_met_the_janitor);
    assert_eq!(next.resources.kardex_fragments, 0.0);
    assert_eq!(next.resources.focus, 100.0);
}

#[test]
fn pills_raise_the_sanity_shield() {
    let mut state = GameState::default();
    state.inventory.pills = 2;
    state.resources.sanity = 60.0;

    let next = run(&state, "TAKE_PILLS");
    assert_eq!(next.inventory.pills, 1);
    assert_eq!(next.hf_stats.sanity_shield_timer, 60_000.0);
    assert_eq!(next.resources.sanity, 65.0);

    state.inventory.pills = 0;
    let empty = run(&state, "TAKE_PILLS");
    assert_eq!(empty.hf_stats.sanity_shield_timer, 0.0);
    assert_eq!(empty.resources.sanity, 60.0);
    assert_eq!(empty.logs[0].log_type, LogType::Error);
}
