//! Skill obsolescence heuristic.
//!
//! Buckets a skill name into a market signal using fixed keyword lists and
//! bidirectional substring matching ("ReactJS" matches "React", and vice
//! versa). This is a deliberate heuristic; no market data is consulted.

use serde::{Deserialize, Serialize};

/// Obsolescence risk tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    /// Safe bet for the foreseeable future
    Low,
    /// Neither growing nor fading
    Medium,
    /// Market demand is fading
    High,
}

/// Market trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    /// Demand is increasing
    Growing,
    /// Demand is flat
    Stable,
    /// Demand is shrinking
    Declining,
}

/// Market demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Demand {
    /// Few openings ask for it
    Low,
    /// Steady demand
    Medium,
    /// Widely requested
    High,
}

/// Combined market signal for one skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillSignal {
    /// Obsolescence risk
    pub risk: RiskTier,

    /// Market trend
    pub trend: Trend,

    /// Market demand
    pub demand: Demand,
}

impl SkillSignal {
    /// The default bucket for skills matching neither list.
    pub const NEUTRAL: Self = Self {
        risk: RiskTier::Medium,
        trend: Trend::Stable,
        demand: Demand::Medium,
    };
}

/// Skills in high demand: low risk, growing.
const HIGH_DEMAND: &[&str] = &[
    "React",
    "Python",
    "JavaScript",
    "AWS",
    "Docker",
    "Kubernetes",
    "TypeScript",
    "Node.js",
    "LangChain",
    "LangGraph",
];

/// Skills in declining demand: high risk.
const LOW_DEMAND: &[&str] = &["jQuery", "PHP", "Ruby"];

/// Classify a skill name into a market signal.
///
/// Pure and deterministic: the result depends only on the fixed lists and
/// the input string.
pub fn classify(skill: &str) -> SkillSignal {
    let skill = skill.to_lowercase();

    if HIGH_DEMAND.iter().any(|entry| matches(&skill, entry)) {
        return SkillSignal {
            risk: RiskTier::Low,
            trend: Trend::Growing,
            demand: Demand::High,
        };
    }

    if LOW_DEMAND.iter().any(|entry| matches(&skill, entry)) {
        return SkillSignal {
            risk: RiskTier::High,
            trend: Trend::Declining,
            demand: Demand::Low,
        };
    }

    SkillSignal::NEUTRAL
}

/// Bidirectional case-insensitive substring containment.
fn matches(skill_lower: &str, entry: &str) -> bool {
    let entry = entry.to_lowercase();
    skill_lower.contains(&entry) || entry.contains(skill_lower)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_high_demand_match() {
        let signal = classify("ReactJS");
        assert_eq!(signal.risk, RiskTier::Low);
        assert_eq!(signal.trend, Trend::Growing);
        assert_eq!(signal.demand, Demand::High);
    }

    #[test]
    fn test_low_demand_match() {
        let signal = classify("jQuery");
        assert_eq!(signal.risk, RiskTier::High);
        assert_eq!(signal.trend, Trend::Declining);
        assert_eq!(signal.demand, Demand::Low);
    }

    #[test]
    fn test_unlisted_skill_is_neutral() {
        assert_eq!(classify("COBOL"), SkillSignal::NEUTRAL);
    }

    #[test]
    fn test_containment_works_both_ways() {
        // Skill contains list entry.
        assert_eq!(classify("node.js developer").demand, Demand::High);
        // List entry contains skill.
        assert_eq!(classify("Lang").demand, Demand::High);
        // Case-insensitive.
        assert_eq!(classify("DOCKER").demand, Demand::High);
    }

    #[test]
    fn test_high_list_wins_over_low_list() {
        // "p" is a substring of both Python and PHP; the high-demand list is
        // consulted first.
        assert_eq!(classify("p").demand, Demand::High);
    }
}
