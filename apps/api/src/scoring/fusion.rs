//! Score fusion: fixed-weight linear combination of the three signals plus
//! the accept/reject decision.

use serde::Serialize;

use crate::scoring::round2;

/// Weights and threshold for fusing component scores. Loaded from config.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringPolicy {
    pub lexical_weight: f64,
    pub semantic_weight: f64,
    pub skill_weight: f64,
    /// Final scores at or above this are accepted.
    pub accept_threshold: f64,
    pub points_per_skill: f64,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            lexical_weight: 0.4,
            semantic_weight: 0.4,
            skill_weight: 0.2,
            accept_threshold: 40.0,
            points_per_skill: 10.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Decision {
    Accepted,
    Rejected,
}

/// Component scores that went into a decision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub lexical: f64,
    pub semantic: f64,
    pub skill: f64,
}

/// `round(w_l * lexical + w_s * semantic + w_k * skill, 2)`. No upper bound:
/// the skill score is uncapped.
pub fn fused_score(breakdown: &ScoreBreakdown, policy: &ScoringPolicy) -> f64 {
    round2(
        policy.lexical_weight * breakdown.lexical
            + policy.semantic_weight * breakdown.semantic
            + policy.skill_weight * breakdown.skill,
    )
}

pub fn decide(final_score: f64, policy: &ScoringPolicy) -> Decision {
    if final_score >= policy.accept_threshold {
        Decision::Accepted
    } else {
        Decision::Rejected
    }
}
