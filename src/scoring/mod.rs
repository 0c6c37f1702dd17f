//! Clarity score, derived ratios and the needs/wants/savings breakdown

mod allocation;
mod engine;
mod metrics;

pub use allocation::{
    AllocationBreakdown, AllocationClassifier, AllocationGuideline, Bucket, BucketAmounts,
    GuidelineComparison,
};
pub use engine::{
    ClarityScore, PillarScore, PillarStatus, ScoreEngine, PLANNING_MAX, SAVING_MAX, SPENDING_MAX,
    TOTAL_MAX,
};
pub use metrics::{safe_divisor, ProfileMetrics};
