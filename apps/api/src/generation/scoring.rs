//! Feasibility score aggregation.
//!
//! All rounding is round-half-up, done in integer arithmetic so that exact halves
//! (72.5, 74.5) never drift below the boundary through float error.

use serde::{Deserialize, Serialize};

use crate::models::FeasibilityFactor;

/// Category weights for the overall score, in whole percents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub technical: u32,
    pub financial: u32,
    pub operational: u32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            technical: 35,
            financial: 40,
            operational: 25,
        }
    }
}

impl ScoringWeights {
    /// round(0.35*technical + 0.40*financial + 0.25*operational) with the default weights.
    pub fn overall_score(&self, technical: u32, financial: u32, operational: u32) -> u32 {
        let weighted = u64::from(self.technical) * u64::from(technical)
            + u64::from(self.financial) * u64::from(financial)
            + u64::from(self.operational) * u64::from(operational);
        let total = u64::from(self.technical) + u64::from(self.financial) + u64::from(self.operational);
        round_half_up(weighted, total)
    }
}

/// Rounded mean of the factor scores. An empty slice scores 0.
pub fn category_score(factors: &[FeasibilityFactor]) -> u32 {
    let sum: u64 = factors.iter().map(|f| u64::from(f.score)).sum();
    round_half_up(sum, factors.len() as u64)
}

/// `numerator / denominator` rounded half up; 0 when the denominator is 0.
fn round_half_up(numerator: u64, denominator: u64) -> u32 {
    if denominator == 0 {
        return 0;
    }
    ((2 * numerator + denominator) / (2 * denominator)) as u32
}

// ────────────────────────────────────────────────────────────────────────────
// Recommendation ladder
// ────────────────────────────────────────────────────────────────────────────

/// Recommendation bands on the overall score. Lower bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecommendationTier {
    ProceedAsPlanned,       // ≥ 80
    ProceedWithMitigations, // 70 – 79
    AddressHighRisk,        // 60 – 69
    Reevaluate,             // < 60
}

impl RecommendationTier {
    pub fn from_score(overall_score: u32) -> Self {
        if overall_score >= 80 {
            RecommendationTier::ProceedAsPlanned
        } else if overall_score >= 70 {
            RecommendationTier::ProceedWithMitigations
        } else if overall_score >= 60 {
            RecommendationTier::AddressHighRisk
        } else {
            RecommendationTier::Reevaluate
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            RecommendationTier::ProceedAsPlanned => {
                "The project is highly feasible and should proceed as planned."
            }
            RecommendationTier::ProceedWithMitigations => {
                "The project is feasible and should proceed with risk mitigations in place \
                for the concerns identified below."
            }
            RecommendationTier::AddressHighRisk => {
                "The project is moderately feasible. Address high-risk areas before proceeding."
            }
            RecommendationTier::Reevaluate => {
                "The project faces serious feasibility concerns. Significant re-evaluation \
                recommended before committing budget."
            }
        }
    }
}
