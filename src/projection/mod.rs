//! Growth projections, goal impacts and the present/future split

mod growth;
mod goals;
mod result;
mod split;

pub use growth::{monthly_rate, GrowthBreakdown, GrowthProjector, YearlyBalance};
pub use goals::{GoalImpact, GoalImpactCalculator};
pub use result::{ProjectionResult, ScenarioProjection};
pub use split::{SplitProjector, SplitValue, DEFAULT_INVESTMENT_SHARE, DEFAULT_MILESTONE_MONTHS};
