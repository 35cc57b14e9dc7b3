//! Office handlers: paperwork, regulations, bribes, mail, and the ending.

use nightshift_types::{EventCategory, LogType};
use serde_json::Value;
use tracing::info;

use super::{ActionDraft, FOUND_LOOPHOLE_MS, SCHEDULE_COMPRESSION_MS, payload_str};
use crate::rewards::{self, RewardCategory};

/// Credits a bribe costs, win or lose.
pub const BRIBE_COST: f64 = 100.0;
/// Chance the auditor takes the money and looks away.
pub const BRIBE_SUCCESS_CHANCE: f64 = 0.6;
/// PC parts needed to assemble the break-room PC.
pub const PC_PARTS_NEEDED: u32 = 3;
/// Kardex fragments bound into the dossier.
pub const DOSSIER_FRAGMENTS: f64 = 12.0;
/// Level the final report requires.
pub const FINAL_REPORT_LEVEL: u32 = 10;
/// Story event fired by the final report.
pub const ENDING_EVENT: &str = "ENDING_WHISTLEBLOWER";

/// `PERFORM_OFFICE_TASK { task }`.
pub fn perform_office_task(d: &mut ActionDraft<'_, '_>, payload: &Value) {
    let Some(task) = payload_str(payload, "task") else {
        d.fail("Which task?");
        return;
    };
    let Some(reward) = rewards::calculate_reward(RewardCategory::Office, task, &d.state.proficiency)
    else {
        d.fail(format!("There is no office task called {task}."));
        return;
    };
    rewards::grant(&mut d.state, reward);
    d.log(format!("Office task done: {task}."), LogType::Success);
}

/// `FILE_PAPERWORK`.
pub fn file_paperwork(d: &mut ActionDraft<'_, '_>) {
    d.state.resources.add_suspicion(-5.0);
    d.state.resources.add_experience(10.0);
    d.log("The paper trail is tidy again. For now.", LogType::Info);
}

/// `STUDY_REGULATIONS`: one draw.
pub fn study_regulations(d: &mut ActionDraft<'_, '_>) {
    if d.roll() < 0.25 {
        d.state.flags.found_loophole = true;
        d.state.hf_stats.found_loophole_timer = FOUND_LOOPHOLE_MS;
        d.log(
            "Paragraph 4.2.7(c) contradicts itself. Your paperwork is free for a while.",
            LogType::Success,
        );
    } else {
        d.state.resources.add_experience(15.0);
        d.log("Dry reading. You learn something anyway.", LogType::Info);
    }
}

/// `ACCEPT_OVERTIME`.
pub fn accept_overtime(d: &mut ActionDraft<'_, '_>) {
    if d.state.flags.schedule_compressed {
        d.fail("You are already on overtime.");
        return;
    }
    d.state.resources.add_credits(50.0);
    d.state.flags.schedule_compressed = true;
    d.state.hf_stats.schedule_compression_timer = SCHEDULE_COMPRESSION_MS;
    d.state.hf_stats.add_fatigue(10.0);
    d.log("Overtime accepted. The cards come twice as fast.", LogType::Warning);
}

/// `BRIBE_AUDITOR`: one draw.
pub fn bribe_auditor(d: &mut ActionDraft<'_, '_>) {
    if d.state.resources.credits < BRIBE_COST {
        d.fail("You cannot afford to bribe anyone.");
        return;
    }
    d.state.resources.add_credits(-BRIBE_COST);
    if d.roll() < BRIBE_SUCCESS_CHANCE {
        d.state.resources.add_suspicion(-20.0);
        d.log("The auditor pockets the envelope and loses your file.", LogType::Success);
    } else {
        d.state.resources.add_suspicion(15.0);
        d.state.flags.on_pip = true;
        d.log(
            "The auditor pockets the envelope and reports you anyway. You are on a PIP.",
            LogType::Error,
        );
    }
}

/// `READ_MAIL { mailId }`.
pub fn read_mail(d: &mut ActionDraft<'_, '_>, payload: &Value) {
    let Some(id) = payload_str(payload, "mailId") else {
        d.fail("Which message?");
        return;
    };
    let Some(mail) = d.state.mail.iter_mut().find(|m| m.id == id) else {
        d.fail("That message is gone.");
        return;
    };
    if mail.read {
        return;
    }
    mail.read = true;
    let subject = mail.subject.clone();
    d.state.resources.add_experience(5.0);
    d.log(format!("Read: {subject}"), LogType::Info);
}

/// `ASSEMBLE_PC`.
pub fn assemble_pc(d: &mut ActionDraft<'_, '_>) {
    if d.state.inventory.pc_assembled {
        d.fail("The PC is already humming away in the break room.");
        return;
    }
    if d.state.inventory.pc_parts < PC_PARTS_NEEDED {
        d.fail("You need 3 PC parts.");
        return;
    }
    d.state.inventory.pc_parts -= PC_PARTS_NEEDED;
    d.state.inventory.pc_assembled = true;
    d.log("The break-room PC boots. It already has mail waiting.", LogType::Success);
}

/// `COMPILE_DOSSIER`.
pub fn compile_dossier(d: &mut ActionDraft<'_, '_>) {
    if d.state.inventory.has_compiled_dossier {
        d.fail("The dossier is already compiled.");
        return;
    }
    if d.state.resources.kardex_fragments < DOSSIER_FRAGMENTS {
        d.fail("You need 12 kardex fragments to make the case.");
        return;
    }
    d.state.resources.kardex_fragments -= DOSSIER_FRAGMENTS;
    d.state.inventory.has_compiled_dossier = true;
    d.log("The fragments fit together. It is all there, in writing.", LogType::Story);
}

/// `FILE_FINAL_REPORT`.
pub fn file_final_report(d: &mut ActionDraft<'_, '_>) {
    if d.state.flags.ending_reached {
        d.fail("The report is already filed.");
        return;
    }
    if d.state.resources.level < FINAL_REPORT_LEVEL || !d.state.inventory.has_compiled_dossier {
        d.fail("Nobody will believe you without the dossier and ten levels of standing.");
        return;
    }
    d.state.flags.ending_reached = true;
    info!("Final report filed");
    d.trigger(EventCategory::StoryEvent, Some(ENDING_EVENT));
    d.log("You file the report. The hangar goes very quiet.", LogType::Story);
}
