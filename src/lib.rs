//! Clarity Engine - deterministic financial computation for a personal-finance dashboard
//!
//! This library provides:
//! - Survey intake normalization into a canonical financial profile
//! - A three-pillar clarity score and the needs/wants/savings breakdown
//! - Compound growth projections under named fixed-rate scenarios
//! - Goal impact and present-vs-future split views
//! - A repository seam for saved state and a dashboard that ties it together

pub mod config;
pub mod dashboard;
pub mod error;
pub mod profile;
pub mod projection;
pub mod scenario;
pub mod scoring;
pub mod storage;

// Re-export commonly used types
pub use config::EngineConfig;
pub use dashboard::{Dashboard, DashboardReport};
pub use error::{Error, Result};
pub use profile::{normalize, FinancialProfile, Goal, RawSurvey};
pub use projection::{GoalImpactCalculator, GrowthProjector, ProjectionResult};
pub use scenario::{Scenario, ScenarioRunner, ScenarioSet};
pub use scoring::{AllocationBreakdown, AllocationClassifier, ClarityScore, ScoreEngine};
pub use storage::{JsonFileRepository, MemoryRepository, ProfileRepository};
