//! The proficiency tree.
//!
//! Seven skills, each with at most one prerequisite. Skill ids are plain
//! strings in the state (so saves survive content changes); the constants
//! below are the ids the engine itself checks for.

use nightshift_types::Proficiency;

/// +10% XP on job, event, and categorized rewards.
pub const KEEN_EYE: &str = "keen_eye";
/// Chance to skip tool wear after a job or event.
pub const STEADY_HANDS: &str = "steady_hands";
/// −1 focus on hangar floor work.
pub const EFFICIENT_WORKFLOW: &str = "efficient_workflow";
/// +10% materials and −15% suspicion on categorized rewards.
pub const SCROUNGER: &str = "scrounger";
/// Fear drains a quarter less sanity.
pub const IRON_WILL: &str = "iron_will";
/// −2 focus on office work.
pub const PAPER_TIGER: &str = "paper_tiger";
/// +25% night-crew materials.
pub const CREW_CHIEF: &str = "crew_chief";

/// One node of the proficiency tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkillDef {
    /// Stable id.
    pub id: &'static str,
    /// Display name.
    pub label: &'static str,
    /// One-line effect summary.
    pub description: &'static str,
    /// Skill that must already be unlocked.
    pub prerequisite: Option<&'static str>,
}

/// Every skill, roots first.
pub static SKILLS: [SkillDef; 7] = [
    SkillDef {
        id: KEEN_EYE,
        label: "Keen Eye",
        description: "+10% XP from signed-off work.",
        prerequisite: None,
    },
    SkillDef {
        id: STEADY_HANDS,
        label: "Steady Hands",
        description: "30% chance your tools take no wear.",
        prerequisite: None,
    },
    SkillDef {
        id: EFFICIENT_WORKFLOW,
        label: "Efficient Workflow",
        description: "Hangar work costs 1 less focus.",
        prerequisite: None,
    },
    SkillDef {
        id: SCROUNGER,
        label: "Scrounger",
        description: "+10% materials, 15% less suspicion from side work.",
        prerequisite: Some(KEEN_EYE),
    },
    SkillDef {
        id: IRON_WILL,
        label: "Iron Will",
        description: "Fear drains 25% less sanity.",
        prerequisite: Some(STEADY_HANDS),
    },
    SkillDef {
        id: PAPER_TIGER,
        label: "Paper Tiger",
        description: "Office work costs 2 less focus.",
        prerequisite: Some(EFFICIENT_WORKFLOW),
    },
    SkillDef {
        id: CREW_CHIEF,
        label: "Crew Chief",
        description: "Night crew brings in 25% more materials.",
        prerequisite: Some(SCROUNGER),
    },
];

/// Look up a skill by id.
pub fn find(id: &str) -> Option<&'static SkillDef> {
    SKILLS.iter().find(|s| s.id == id)
}

/// Why a skill could not be unlocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnlockRefusal {
    /// No skill with that id.
    UnknownSkill,
    /// No skill points left.
    NoPoints,
    /// Already unlocked.
    AlreadyUnlocked,
    /// The prerequisite is still locked.
    MissingPrerequisite,
}

/// Check whether `id` may be unlocked right now.
pub fn check_unlock(id: &str, proficiency: &Proficiency) -> Result<&'static SkillDef, UnlockRefusal> {
    let skill = find(id).ok_or(UnlockRefusal::UnknownSkill)?;
    if proficiency.skill_points == 0 {
        return Err(UnlockRefusal::NoPoints);
    }
    if proficiency.has(skill.id) {
        return Err(UnlockRefusal::AlreadyUnlocked);
    }
    if let Some(pre) = skill.prerequisite
        && !proficiency.has(pre)
    {
        return Err(UnlockRefusal::MissingPrerequisite);
    }
    Ok(skill)
}
