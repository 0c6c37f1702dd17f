//! Scenario runner for side-by-side market projections
//!
//! A scenario is nothing more than a named fixed annual growth rate. The
//! runner projects the same principal and contribution once per scenario;
//! evaluations share nothing, so their order never changes a result.

use std::collections::BTreeMap;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::profile::Goal;
use crate::projection::{GrowthProjector, ProjectionResult, ScenarioProjection};

/// A named fixed-rate market assumption
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub name: String,
    /// Annual growth rate in percent (10.0 = 10%)
    pub annual_rate_percent: f64,
}

impl Scenario {
    /// Create a scenario from a name and an annual rate in percent
    pub fn new(name: impl Into<String>, annual_rate_percent: f64) -> Self {
        Self {
            name: name.into(),
            annual_rate_percent,
        }
    }
}

/// Ordered list of scenarios to compare
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScenarioSet {
    scenarios: Vec<Scenario>,
}

impl ScenarioSet {
    /// Wrap scenarios in the order given
    pub fn new(scenarios: Vec<Scenario>) -> Self {
        Self { scenarios }
    }

    /// Optimistic 15%, neutral 10%, pessimistic 5%
    pub fn standard() -> Self {
        Self::new(vec![
            Scenario::new("optimistic", 15.0),
            Scenario::new("neutral", 10.0),
            Scenario::new("pessimistic", 5.0),
        ])
    }

    /// Scenarios as given, duplicates included
    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    /// Scenario by name; the last one wins if the name repeats
    pub fn get(&self, name: &str) -> Option<&Scenario> {
        self.scenarios.iter().rev().find(|s| s.name == name)
    }

    /// One scenario per name, see [`distinct_scenarios`]
    pub fn distinct(&self) -> Vec<&Scenario> {
        distinct_scenarios(&self.scenarios)
    }

    /// Number of scenarios as given
    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    /// True when there is nothing to run
    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }
}

/// One scenario per name, in order of first appearance.
///
/// A repeated name keeps the rate of its last occurrence.
pub fn distinct_scenarios(scenarios: &[Scenario]) -> Vec<&Scenario> {
    let mut distinct: Vec<&Scenario> = Vec::with_capacity(scenarios.len());
    for scenario in scenarios {
        match distinct.iter_mut().find(|kept| kept.name == scenario.name) {
            Some(kept) => {
                warn!("duplicate scenario name {:?}, keeping the last one", scenario.name);
                *kept = scenario;
            }
            None => distinct.push(scenario),
        }
    }
    distinct
}

impl Default for ScenarioSet {
    fn default() -> Self {
        Self::standard()
    }
}

/// Runs one growth projection per scenario
///
/// # Example
/// ```
/// use clarity_engine::scenario::{ScenarioRunner, ScenarioSet};
///
/// let runner = ScenarioRunner::new(ScenarioSet::standard());
/// let results = runner.run(10_000.0, 500.0, 120);
/// assert!(results["optimistic"].projected_value > results["pessimistic"].projected_value);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    scenarios: ScenarioSet,
}

impl ScenarioRunner {
    /// Create a runner for a scenario set
    pub fn new(scenarios: ScenarioSet) -> Self {
        Self { scenarios }
    }

    /// Scenarios this runner projects
    pub fn scenarios(&self) -> &ScenarioSet {
        &self.scenarios
    }

    /// Project a single scenario
    pub fn project(
        scenario: &Scenario,
        principal: f64,
        monthly_contribution: f64,
        months: u32,
    ) -> ScenarioProjection {
        let projected_value = GrowthProjector::project(
            principal,
            monthly_contribution,
            scenario.annual_rate_percent,
            months,
        );

        ScenarioProjection {
            scenario: scenario.name.clone(),
            annual_rate_percent: scenario.annual_rate_percent,
            months,
            initial_principal: principal,
            projected_value,
            growth: projected_value - principal,
        }
    }

    /// Project every scenario with the same inputs, keyed by scenario name.
    ///
    /// If two scenarios share a name the later one wins.
    pub fn run_scenarios(
        principal: f64,
        monthly_contribution: f64,
        scenarios: &[Scenario],
        months: u32,
    ) -> BTreeMap<String, ScenarioProjection> {
        distinct_scenarios(scenarios)
            .into_iter()
            .map(|scenario| {
                let projection = Self::project(scenario, principal, monthly_contribution, months);
                debug!(
                    "scenario {} at {:.2}%: {:.2} after {} months",
                    scenario.name, scenario.annual_rate_percent, projection.projected_value, months
                );
                (scenario.name.clone(), projection)
            })
            .collect()
    }

    /// Run this runner's scenario set
    pub fn run(
        &self,
        principal: f64,
        monthly_contribution: f64,
        months: u32,
    ) -> BTreeMap<String, ScenarioProjection> {
        Self::run_scenarios(principal, monthly_contribution, self.scenarios.scenarios(), months)
    }

    /// Run every scenario and measure the goals against each, in scenario order.
    ///
    /// Repeated names collapse the same way as in [`ScenarioRunner::run_scenarios`].
    pub fn run_with_goals(
        &self,
        principal: f64,
        monthly_contribution: f64,
        months: u32,
        goals: &[Goal],
    ) -> Vec<ProjectionResult> {
        self.scenarios
            .distinct()
            .into_iter()
            .map(|scenario| {
                Self::project(scenario, principal, monthly_contribution, months).with_goals(goals)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_standard_set() {
        let set = ScenarioSet::standard();
        assert_eq!(set.len(), 3);
        assert_eq!(set.get("neutral").map(|s| s.annual_rate_percent), Some(10.0));
        assert!(set.get("bull").is_none());
    }

    #[test]
    fn test_run_matches_growth_projector() {
        let results = ScenarioRunner::default().run(10_000.0, 500.0, 204);

        assert_eq!(results.len(), 3);
        for (name, rate) in [("optimistic", 15.0), ("neutral", 10.0), ("pessimistic", 5.0)] {
            let projection = &results[name];
            let expected = GrowthProjector::project(10_000.0, 500.0, rate, 204);
            assert_relative_eq!(projection.projected_value, expected);
            assert_relative_eq!(projection.growth, expected - 10_000.0);
            assert_eq!(projection.months, 204);
        }

        // Higher rate should result in higher projected value
        assert!(results["optimistic"].projected_value > results["neutral"].projected_value);
        assert!(results["neutral"].projected_value > results["pessimistic"].projected_value);
    }

    #[test]
    fn test_order_does_not_affect_results() {
        let forward = ScenarioSet::standard().scenarios().to_vec();
        let mut reversed = forward.clone();
        reversed.reverse();

        let a = ScenarioRunner::run_scenarios(2_500.0, 300.0, &forward, 120);
        let b = ScenarioRunner::run_scenarios(2_500.0, 300.0, &reversed, 120);
        assert_eq!(a, b);
    }

    #[test]
    fn test_duplicate_name_keeps_last() {
        let scenarios = vec![Scenario::new("base", 4.0), Scenario::new("base", 8.0)];
        let results = ScenarioRunner::run_scenarios(1_000.0, 0.0, &scenarios, 12);

        assert_eq!(results.len(), 1);
        assert_eq!(results["base"].annual_rate_percent, 8.0);
    }

    #[test]
    fn test_duplicate_name_keeps_last_with_goals() {
        let runner = ScenarioRunner::new(ScenarioSet::new(vec![
            Scenario::new("base", 4.0),
            Scenario::new("bull", 12.0),
            Scenario::new("base", 8.0),
        ]));
        let goals = vec![Goal::new("Car", 6_000.0, 24)];

        let with_goals = runner.run_with_goals(1_000.0, 100.0, 12, &goals);
        let by_name = runner.run(1_000.0, 100.0, 12);

        assert_eq!(with_goals.len(), by_name.len());
        assert_eq!(with_goals[0].scenario, "base");
        assert_eq!(with_goals[0].annual_rate_percent, 8.0);
        assert_eq!(with_goals[1].scenario, "bull");
        for result in &with_goals {
            assert_eq!(result.projected_value, by_name[&result.scenario].projected_value);
        }
        assert_eq!(runner.scenarios().get("base").map(|s| s.annual_rate_percent), Some(8.0));
    }

    #[test]
    fn test_empty_set() {
        let runner = ScenarioRunner::new(ScenarioSet::new(Vec::new()));
        assert!(runner.run(1_000.0, 100.0, 12).is_empty());
        assert!(runner.run_with_goals(1_000.0, 100.0, 12, &[]).is_empty());
    }

    #[test]
    fn test_run_with_goals_keeps_scenario_order() {
        let runner = ScenarioRunner::new(ScenarioSet::new(vec![
            Scenario::new("flat", 0.0),
            Scenario::new("growth", 12.0),
        ]));
        let goals = vec![Goal::new("Car", 6_000.0, 24)];

        let results = runner.run_with_goals(6_000.0, 500.0, 12, &goals);
        assert_eq!(results[0].scenario, "flat");
        assert_relative_eq!(results[0].projected_value, 12_000.0);
        assert_relative_eq!(results[0].goals[0].impact_percent, 50.0);
        assert_eq!(results[1].scenario, "growth");
        assert!(results[1].goals[0].impact_percent < 50.0);
    }
}
