//! Present-vs-future split: cash that sits still next to investments that grow
//!
//! The monthly contribution is divided between a cash leg, which only
//! accumulates, and an investment leg, which compounds at the scenario rate.
//! Both legs are projected with [`GrowthProjector`] (the cash leg at 0%).

use serde::{Deserialize, Serialize};

use super::growth::GrowthProjector;

/// Milestones shown by the future view: 1, 5 and 10 years
pub const DEFAULT_MILESTONE_MONTHS: [u32; 3] = [12, 60, 120];

/// Share of the monthly contribution that goes to investments by default
pub const DEFAULT_INVESTMENT_SHARE: f64 = 0.5;

/// Cash and investment balances at one point in time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitValue {
    pub months: u32,
    pub savings: f64,
    pub investments: f64,
}

impl SplitValue {
    /// Cash plus investments
    pub fn total(&self) -> f64 {
        self.savings + self.investments
    }
}

/// Projects cash and investment legs side by side
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitProjector {
    pub initial_cash: f64,
    pub initial_portfolio: f64,
    pub monthly_contribution: f64,
    /// Fraction of the contribution invested, in [0, 1]
    pub investment_share: f64,
    pub annual_rate_percent: f64,
}

impl SplitProjector {
    /// Create a projector with the default even split
    pub fn new(
        initial_cash: f64,
        initial_portfolio: f64,
        monthly_contribution: f64,
        annual_rate_percent: f64,
    ) -> Self {
        Self {
            initial_cash,
            initial_portfolio,
            monthly_contribution,
            investment_share: DEFAULT_INVESTMENT_SHARE,
            annual_rate_percent,
        }
    }

    /// Override the invested share; clamped to [0, 1]
    pub fn with_investment_share(mut self, share: f64) -> Self {
        self.investment_share = share.clamp(0.0, 1.0);
        self
    }

    fn monthly_invested(&self) -> f64 {
        self.monthly_contribution * self.investment_share
    }

    fn monthly_saved(&self) -> f64 {
        self.monthly_contribution - self.monthly_invested()
    }

    /// Balances after `months` months
    pub fn at(&self, months: u32) -> SplitValue {
        SplitValue {
            months,
            savings: GrowthProjector::project(self.initial_cash, self.monthly_saved(), 0.0, months),
            investments: GrowthProjector::project(
                self.initial_portfolio,
                self.monthly_invested(),
                self.annual_rate_percent,
                months,
            ),
        }
    }

    /// Balances at each requested milestone, in the order given
    pub fn milestones(&self, months: &[u32]) -> Vec<SplitValue> {
        months.iter().map(|&m| self.at(m)).collect()
    }
}
