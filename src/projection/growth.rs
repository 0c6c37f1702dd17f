//! Time-value-of-money growth at a fixed monthly compounding rate
//!
//! Every view that shows a future balance goes through [`GrowthProjector`],
//! so the planner, the scenario simulator and the present/future split all
//! agree. Contributions are credited at the end of each month (ordinary
//! annuity).

use serde::{Deserialize, Serialize};

/// Convert an annual percentage (e.g. 12.0 for 12%) to a monthly rate
pub fn monthly_rate(annual_rate_percent: f64) -> f64 {
    annual_rate_percent / 100.0 / 12.0
}

/// Future value split into what the principal and the contributions grew to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthBreakdown {
    /// Starting principal after compounding
    pub principal_value: f64,
    /// Contribution stream after compounding
    pub contribution_value: f64,
}

impl GrowthBreakdown {
    /// Both legs together
    pub fn total(&self) -> f64 {
        self.principal_value + self.contribution_value
    }
}

/// One point on a year-by-year balance chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyBalance {
    pub year: u32,
    /// Projected balance at the end of the year
    pub balance: f64,
    /// Principal plus all contributions made so far, without growth
    pub contributed: f64,
}

/// Future value of a principal plus a stream of monthly contributions
pub struct GrowthProjector;

impl GrowthProjector {
    /// Projected value after `months` months.
    ///
    /// With `r = annual_rate_percent / 1200`:
    /// - `r == 0`: `principal + monthly_contribution * months`
    /// - otherwise: `principal*(1+r)^n + monthly_contribution*((1+r)^n - 1)/r`
    pub fn project(
        principal: f64,
        monthly_contribution: f64,
        annual_rate_percent: f64,
        months: u32,
    ) -> f64 {
        Self::project_breakdown(principal, monthly_contribution, annual_rate_percent, months).total()
    }

    /// Same as [`GrowthProjector::project`] but keeps the two legs apart
    pub fn project_breakdown(
        principal: f64,
        monthly_contribution: f64,
        annual_rate_percent: f64,
        months: u32,
    ) -> GrowthBreakdown {
        let r = monthly_rate(annual_rate_percent);

        if r == 0.0 {
            return GrowthBreakdown {
                principal_value: principal,
                contribution_value: monthly_contribution * months as f64,
            };
        }

        // Month by month: each step is non-decreasing in r, so a higher rate
        // never rounds to a lower value than a lower rate.
        let step = 1.0 + r;
        let mut growth_factor = 1.0;
        let mut annuity_factor = 0.0;
        for _ in 0..months {
            growth_factor *= step;
            annuity_factor = annuity_factor * step + 1.0;
        }

        GrowthBreakdown {
            principal_value: principal * growth_factor,
            contribution_value: monthly_contribution * annuity_factor,
        }
    }

    /// Balance at the end of each year from year 0 through `years`
    pub fn yearly_schedule(
        principal: f64,
        monthly_contribution: f64,
        annual_rate_percent: f64,
        years: u32,
    ) -> Vec<YearlyBalance> {
        (0..=years)
            .map(|year| {
                let months = year.saturating_mul(12);
                YearlyBalance {
                    year,
                    balance: Self::project(principal, monthly_contribution, annual_rate_percent, months),
                    contributed: principal + monthly_contribution * months as f64,
                }
            })
            .collect()
    }

    /// First month at which the projected balance reaches `target`.
    ///
    /// Returns `Some(0)` if the principal already covers it and `None` if
    /// the target is not reached within `max_months`.
    pub fn months_to_reach(
        target: f64,
        principal: f64,
        monthly_contribution: f64,
        annual_rate_percent: f64,
        max_months: u32,
    ) -> Option<u32> {
        (0..=max_months).find(|&month| {
            Self::project(principal, monthly_contribution, annual_rate_percent, month) >= target
        })
    }
}
