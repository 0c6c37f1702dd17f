//! Projection output structures

use serde::{Deserialize, Serialize};

use super::goals::{GoalImpact, GoalImpactCalculator};
use crate::profile::Goal;

/// Outcome of projecting one scenario, before goals are attached
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioProjection {
    /// Scenario name
    pub scenario: String,

    pub annual_rate_percent: f64,

    /// Projection horizon in months
    pub months: u32,

    /// Starting principal the projection grew from
    pub initial_principal: f64,

    /// Value at the end of the horizon
    pub projected_value: f64,

    /// `projected_value - initial_principal`
    pub growth: f64,
}

impl ScenarioProjection {
    /// Attach goal impacts measured against this projection
    pub fn with_goals(self, goals: &[Goal]) -> ProjectionResult {
        let goals = GoalImpactCalculator::impacts(goals, self.projected_value);
        ProjectionResult {
            scenario: self.scenario,
            annual_rate_percent: self.annual_rate_percent,
            months: self.months,
            projected_value: self.projected_value,
            growth: self.growth,
            goals,
        }
    }
}

/// Complete projection for one scenario, including goal impacts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResult {
    pub scenario: String,
    pub annual_rate_percent: f64,
    pub months: u32,
    pub projected_value: f64,
    pub growth: f64,
    pub goals: Vec<GoalImpact>,
}

impl ProjectionResult {
    /// Goals the projection does not cover
    pub fn shortfalls(&self) -> impl Iterator<Item = &GoalImpact> {
        self.goals.iter().filter(|g| g.is_shortfall())
    }

    /// Sum of all goal targets as a percentage of the projected value
    pub fn combined_impact_percent(&self) -> f64 {
        self.goals.iter().map(|g| g.impact_percent).sum()
    }
}
