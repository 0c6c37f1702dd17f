//! Dashboard report assembly
//!
//! Loads the saved profile and planner goals through a [`ProfileRepository`],
//! then runs every view over them: score, ratios, guideline comparison,
//! scenario projections and the present/future split.

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::error::Result;
use crate::profile::{FinancialProfile, Goal};
use crate::projection::{ProjectionResult, SplitProjector, SplitValue};
use crate::scenario::ScenarioRunner;
use crate::scoring::{ClarityScore, GuidelineComparison, ProfileMetrics, ScoreEngine};
use crate::storage::ProfileRepository;

/// Present/future balances for one scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioMilestones {
    pub scenario: String,
    pub values: Vec<SplitValue>,
}

/// Everything the dashboard shows for one profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardReport {
    pub score: ClarityScore,
    pub metrics: ProfileMetrics,
    pub guideline: GuidelineComparison,
    /// Starting balance the projections grow from
    pub principal: f64,
    pub monthly_contribution: f64,
    pub projections: Vec<ProjectionResult>,
    pub milestones: Vec<ScenarioMilestones>,
}

/// Builds dashboard reports from saved state
pub struct Dashboard<R: ProfileRepository> {
    repository: R,
    config: EngineConfig,
}

impl<R: ProfileRepository> Dashboard<R> {
    /// Create a dashboard over a repository
    pub fn new(repository: R, config: EngineConfig) -> Self {
        Self { repository, config }
    }

    /// Repository the report reads from
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Configuration the report is built with
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Build the report from saved state.
    ///
    /// With no saved profile the report is for an empty one. Unreadable
    /// planner goals fall back to the survey's goals.
    pub fn report(&self) -> Result<DashboardReport> {
        let profile = match self.repository.load_profile()? {
            Some(profile) => profile,
            None => {
                info!("no saved profile, reporting on an empty one");
                FinancialProfile::default()
            }
        };

        let goals = self.repository.load_goals().unwrap_or_else(|e| {
            warn!("failed to load planner goals: {}", e);
            Vec::new()
        });

        Ok(self.report_for(&profile, &goals))
    }

    /// Build the report for a profile already in hand
    pub fn report_for(&self, profile: &FinancialProfile, planner_goals: &[Goal]) -> DashboardReport {
        let metrics = ProfileMetrics::from_profile(profile);
        let score = ScoreEngine::compute_with_metrics(profile, &metrics);
        let guideline = self.config.guideline.compare(&score.breakdown);

        let goals = if planner_goals.is_empty() {
            profile.goals.as_slice()
        } else {
            planner_goals
        };

        let principal = profile.net_worth();
        let monthly_contribution = profile.monthly_contribution();

        let runner = ScenarioRunner::new(self.config.scenarios.clone());
        let projections =
            runner.run_with_goals(principal, monthly_contribution, self.config.horizon_months, goals);

        let milestones = self
            .config
            .scenarios
            .distinct()
            .into_iter()
            .map(|scenario| {
                let split = SplitProjector::new(
                    profile.cash.total(),
                    profile.investments,
                    monthly_contribution,
                    scenario.annual_rate_percent,
                )
                .with_investment_share(self.config.investment_share);

                ScenarioMilestones {
                    scenario: scenario.name.clone(),
                    values: split.milestones(&self.config.milestone_months),
                }
            })
            .collect();

        DashboardReport {
            score,
            metrics,
            guideline,
            principal,
            monthly_contribution,
            projections,
            milestones,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::profile::{BillsOnTime, Cash, ExpenseCategory};
    use crate::projection::GrowthProjector;
    use crate::scenario::{Scenario, ScenarioSet};
    use crate::storage::MemoryRepository;
    use approx::assert_relative_eq;

    fn profile() -> FinancialProfile {
        let mut profile = FinancialProfile {
            income: 3_000.0,
            monthly_savings: 600.0,
            cash: Cash { bank: 4_000.0, savings: 5_000.0 },
            investments: 2_000.0,
            has_pension: Some(true),
            bills_on_time: BillsOnTime::Always,
            goals: vec![Goal::new("Emergency fund", 9_000.0, 12)],
            ..Default::default()
        };
        profile.expenses.insert(ExpenseCategory::Rent, 1_200.0);
        profile.expenses.insert(ExpenseCategory::Other, 300.0);
        profile
    }

    struct FailingGoals;

    impl ProfileRepository for FailingGoals {
        fn load_profile(&self) -> Result<Option<FinancialProfile>> {
            Ok(Some(profile()))
        }

        fn save_profile(&self, _: &FinancialProfile) -> Result<()> {
            Ok(())
        }

        fn load_goals(&self) -> Result<Vec<Goal>> {
            Err(Error::InvalidData("corrupt goals".to_string()))
        }

        fn save_goals(&self, _: &[Goal]) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_report_from_repository() {
        let dashboard = Dashboard::new(MemoryRepository::with_profile(profile()), EngineConfig::default());
        let report = dashboard.report().unwrap();

        assert_eq!(report.principal, 11_000.0);
        assert_eq!(report.monthly_contribution, 600.0);
        assert_eq!(report.projections.len(), 3);
        assert_eq!(report.projections[0].scenario, "optimistic");
        assert_relative_eq!(
            report.projections[1].projected_value,
            GrowthProjector::project(11_000.0, 600.0, 10.0, 204)
        );
        assert_eq!(report.projections[0].goals[0].goal_name, "Emergency fund");
        assert_eq!(report.score, ScoreEngine::compute(&profile()));
    }

    #[test]
    fn test_guideline_comparison() {
        let dashboard = Dashboard::new(MemoryRepository::new(), EngineConfig::default());
        let report = dashboard.report_for(&profile(), &[]);

        // needs 40, wants 10, savings 20
        assert_eq!(report.guideline.needs_delta, -10);
        assert_eq!(report.guideline.wants_delta, -20);
        assert_eq!(report.guideline.savings_delta, 0);
    }

    #[test]
    fn test_planner_goals_take_precedence() {
        let repo = MemoryRepository::with_profile(profile());
        repo.save_goals(&[Goal::new("House", 50_000.0, 120), Goal::new("Car", 10_000.0, 24)])
            .unwrap();

        let report = Dashboard::new(repo, EngineConfig::default()).report().unwrap();
        let names: Vec<_> = report.projections[0]
            .goals
            .iter()
            .map(|g| g.goal_name.as_str())
            .collect();
        assert_eq!(names, vec!["House", "Car"]);
    }

    #[test]
    fn test_unreadable_goals_fall_back_to_survey_goals() {
        let report = Dashboard::new(FailingGoals, EngineConfig::default()).report().unwrap();
        assert_eq!(report.projections[0].goals.len(), 1);
        assert_eq!(report.projections[0].goals[0].goal_name, "Emergency fund");
    }

    #[test]
    fn test_no_saved_profile() {
        let report = Dashboard::new(MemoryRepository::new(), EngineConfig::default())
            .report()
            .unwrap();

        assert_eq!(report.principal, 0.0);
        assert!(report.projections.iter().all(|p| p.projected_value == 0.0));
        assert!(report.projections.iter().all(|p| p.goals.is_empty()));
        assert_eq!(report.score.total, 20);
    }

    #[test]
    fn test_contribution_falls_back_to_unallocated_income() {
        let dashboard = Dashboard::new(MemoryRepository::new(), EngineConfig::default());

        let report = dashboard.report_for(&profile(), &[]);
        assert_eq!(report.monthly_contribution, 600.0);

        // no savings answer: 3000 income - 1500 expenses
        let mut no_savings = profile();
        no_savings.monthly_savings = 0.0;
        let report = dashboard.report_for(&no_savings, &[]);
        assert_eq!(report.monthly_contribution, 1_500.0);
        assert_relative_eq!(
            report.projections[1].projected_value,
            GrowthProjector::project(11_000.0, 1_500.0, 10.0, 204)
        );
        assert_relative_eq!(report.milestones[0].values[0].savings, 9_000.0 + 750.0 * 12.0);
    }

    #[test]
    fn test_duplicate_scenarios_collapse_everywhere() {
        let config = EngineConfig {
            scenarios: ScenarioSet::new(vec![
                Scenario::new("base", 4.0),
                Scenario::new("bull", 12.0),
                Scenario::new("base", 8.0),
            ]),
            ..Default::default()
        };
        let report = Dashboard::new(MemoryRepository::new(), config).report_for(&profile(), &[]);

        let projected: Vec<_> = report
            .projections
            .iter()
            .map(|p| (p.scenario.as_str(), p.annual_rate_percent))
            .collect();
        assert_eq!(projected, vec![("base", 8.0), ("bull", 12.0)]);

        let milestone_names: Vec<_> = report.milestones.iter().map(|m| m.scenario.as_str()).collect();
        assert_eq!(milestone_names, vec!["base", "bull"]);
    }

    #[test]
    fn test_milestones_follow_config() {
        let config = EngineConfig {
            scenarios: ScenarioSet::new(vec![Scenario::new("flat", 0.0)]),
            milestone_months: vec![12, 24],
            ..Default::default()
        };
        let report = Dashboard::new(MemoryRepository::new(), config).report_for(&profile(), &[]);

        assert_eq!(report.milestones.len(), 1);
        let values = &report.milestones[0].values;
        assert_eq!(values.len(), 2);
        // 300 a month to each leg at 0%
        assert_relative_eq!(values[0].savings, 9_000.0 + 3_600.0);
        assert_relative_eq!(values[0].investments, 2_000.0 + 3_600.0);
        assert_relative_eq!(values[1].total(), 11_000.0 + 600.0 * 24.0);
    }
}
