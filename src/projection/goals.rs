//! Goal impact: how large each goal is relative to a projected net worth

use serde::{Deserialize, Serialize};

use crate::profile::Goal;

/// A goal measured against one projected value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalImpact {
    pub goal_name: String,
    pub target_amount: f64,
    /// Target as a percentage of the projected value. Not clamped: above
    /// 100 means the projection falls short of the goal.
    pub impact_percent: f64,
}

impl GoalImpact {
    /// True when the goal is larger than the projected value
    pub fn is_shortfall(&self) -> bool {
        self.impact_percent > 100.0
    }
}

pub struct GoalImpactCalculator;

impl GoalImpactCalculator {
    /// `target / projected * 100`, or 0 when nothing is projected
    pub fn impact(goal: &Goal, projected_value: f64) -> GoalImpact {
        let impact_percent = if projected_value > 0.0 {
            goal.target_amount / projected_value * 100.0
        } else {
            0.0
        };

        GoalImpact {
            goal_name: goal.name.clone(),
            target_amount: goal.target_amount,
            impact_percent,
        }
    }

    /// Impact of every goal against the same projected value, in goal order
    pub fn impacts(goals: &[Goal], projected_value: f64) -> Vec<GoalImpact> {
        goals
            .iter()
            .map(|goal| Self::impact(goal, projected_value))
            .collect()
    }

    /// Monthly amount needed to hit the target by the deadline, without growth
    pub fn needed_per_month(goal: &Goal) -> f64 {
        goal.target_amount / goal.timeframe_months.max(1) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_impact_percent() {
        let goal = Goal::new("House deposit", 50_000.0, 60);
        let impact = GoalImpactCalculator::impact(&goal, 250_000.0);

        assert_eq!(impact.goal_name, "House deposit");
        assert_eq!(impact.target_amount, 50_000.0);
        assert_relative_eq!(impact.impact_percent, 20.0);
        assert!(!impact.is_shortfall());
    }

    #[test]
    fn test_impact_is_not_clamped() {
        let goal = Goal::new("Yacht", 300_000.0, 120);
        let impact = GoalImpactCalculator::impact(&goal, 100_000.0);

        assert_relative_eq!(impact.impact_percent, 300.0);
        assert!(impact.is_shortfall());
    }

    #[test]
    fn test_no_projection_means_zero_impact() {
        let goal = Goal::new("Car", 10_000.0, 12);
        assert_eq!(GoalImpactCalculator::impact(&goal, 0.0).impact_percent, 0.0);
        assert_eq!(GoalImpactCalculator::impact(&goal, -5.0).impact_percent, 0.0);
    }

    #[test]
    fn test_impacts_keep_goal_order() {
        let goals = vec![Goal::new("A", 1_000.0, 12), Goal::new("B", 4_000.0, 12)];
        let impacts = GoalImpactCalculator::impacts(&goals, 8_000.0);

        assert_eq!(impacts.len(), 2);
        assert_eq!(impacts[0].goal_name, "A");
        assert_relative_eq!(impacts[0].impact_percent, 12.5);
        assert_relative_eq!(impacts[1].impact_percent, 50.0);
    }

    #[test]
    fn test_needed_per_month() {
        assert_relative_eq!(
            GoalImpactCalculator::needed_per_month(&Goal::new("Holiday", 3_000.0, 12)),
            250.0
        );

        // timeframe forced to zero after construction still divides by one
        let mut goal = Goal::new("Now", 900.0, 1);
        goal.timeframe_months = 0;
        assert_relative_eq!(GoalImpactCalculator::needed_per_month(&goal), 900.0);
    }
}
