//! Skill portfolio analytics.
//!
//! Runs every known skill in a profile through the market heuristic and
//! aggregates the result into a report a dashboard can render directly.

use serde::Serialize;
use skillpath_core::{classify, Profile, RiskTier, SkillSignal};

/// Market signal for one named skill.
#[derive(Debug, Clone, Serialize)]
pub struct SkillAssessment {
    /// Skill name as it appears in the profile
    pub name: String,

    /// Heuristic market signal
    #[serde(flatten)]
    pub signal: SkillSignal,
}

/// Count of skills per risk tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RiskBreakdown {
    /// Low-risk skills
    pub low: usize,
    /// Medium-risk skills
    pub medium: usize,
    /// High-risk skills
    pub high: usize,
}

/// Overall portfolio verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillHealth {
    /// More low-risk than high-risk skills
    Good,
    /// Anything else
    NeedsAttention,
}

/// Aggregated view of a profile's skill portfolio.
#[derive(Debug, Clone, Serialize)]
pub struct SkillsReport {
    /// Number of assessed skills (technical plus tools)
    pub total_skills: usize,

    /// Per-skill market signals, in profile order
    pub assessments: Vec<SkillAssessment>,

    /// Skills per risk tier
    pub risk_breakdown: RiskBreakdown,

    /// Domain skills, passed through unassessed
    pub domain_skills: Vec<String>,

    /// Soft skills, passed through unassessed
    pub soft_skills: Vec<String>,

    /// Years of experience from the profile
    pub experience_years: u32,

    /// Career stage label from the profile
    pub career_stage: String,

    /// Portfolio verdict
    pub skill_health: SkillHealth,
}

/// Whether a technology is already in the user's skill list.
///
/// Exact name equality, ignoring case. Unlike the market heuristic this is
/// not a substring match: knowing "Java" does not mean knowing "JavaScript".
pub fn is_known_skill(known: &[String], tech_stack: &str) -> bool {
    known.iter().any(|s| s.eq_ignore_ascii_case(tech_stack))
}

/// Build a skills report from a profile.
///
/// Only technical skills and tools are assessed; domain and soft skills are
/// carried through untouched. The verdict is `Good` exactly when low-risk
/// skills outnumber high-risk ones.
pub fn analyze(profile: &Profile) -> SkillsReport {
    let assessments: Vec<SkillAssessment> = profile
        .known_skills()
        .into_iter()
        .map(|name| {
            let signal = classify(&name);
            SkillAssessment { name, signal }
        })
        .collect();

    let mut breakdown = RiskBreakdown::default();
    for assessment in &assessments {
        match assessment.signal.risk {
            RiskTier::Low => breakdown.low += 1,
            RiskTier::Medium => breakdown.medium += 1,
            RiskTier::High => breakdown.high += 1,
        }
    }

    let skill_health = if breakdown.low > breakdown.high {
        SkillHealth::Good
    } else {
        SkillHealth::NeedsAttention
    };

    SkillsReport {
        total_skills: assessments.len(),
        assessments,
        risk_breakdown: breakdown,
        domain_skills: profile.skills.domain.clone(),
        soft_skills: profile.skills.soft.clone(),
        experience_years: profile.user_profile.experience_years,
        career_stage: profile.user_profile.career_stage.clone(),
        skill_health,
    }
}
