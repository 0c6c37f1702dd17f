//! Needs / wants / savings breakdown and the 50/30/20 guideline

use serde::{Deserialize, Serialize};

use super::metrics::safe_divisor;
use crate::profile::{ExpenseCategory, FinancialProfile};

/// Budget bucket an expense category falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    Needs,
    Wants,
}

/// Share of income going to each bucket, each in [0, 100].
///
/// The three are independent percentages of income, so they need not sum
/// to 100.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationBreakdown {
    pub needs_percent: u32,
    pub wants_percent: u32,
    pub savings_percent: u32,
}

/// Monthly amounts behind an [`AllocationBreakdown`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketAmounts {
    pub needs: f64,
    pub wants: f64,
    pub savings: f64,
}

impl AllocationBreakdown {
    /// Money per month each percentage represents, rounded to whole units
    pub fn monthly_amounts(&self, income: f64) -> BucketAmounts {
        let amount = |percent: u32| (income * percent as f64 / 100.0).round();
        BucketAmounts {
            needs: amount(self.needs_percent),
            wants: amount(self.wants_percent),
            savings: amount(self.savings_percent),
        }
    }
}

pub struct AllocationClassifier;

impl AllocationClassifier {
    /// Static needs/wants tag for each category
    pub fn bucket(category: ExpenseCategory) -> Bucket {
        match category {
            ExpenseCategory::Rent
            | ExpenseCategory::Mortgage
            | ExpenseCategory::Utilities
            | ExpenseCategory::CarFuel
            | ExpenseCategory::PublicTransport
            | ExpenseCategory::InsuranceMedical
            | ExpenseCategory::Groceries
            | ExpenseCategory::ChildCare => Bucket::Needs,
            ExpenseCategory::MediaEntertainment | ExpenseCategory::Other => Bucket::Wants,
        }
    }

    /// Classify a profile's spending. Debt repayments always count as needs.
    pub fn classify(profile: &FinancialProfile) -> AllocationBreakdown {
        let mut needs = profile.debts.total();
        let mut wants = 0.0;

        for (&category, &amount) in &profile.expenses {
            match Self::bucket(category) {
                Bucket::Needs => needs += amount,
                Bucket::Wants => wants += amount,
            }
        }

        let income = safe_divisor(profile.income);
        AllocationBreakdown {
            needs_percent: percent_of(needs, income),
            wants_percent: percent_of(wants, income),
            savings_percent: percent_of(profile.monthly_savings, income),
        }
    }
}

/// `round(amount / income * 100)` clamped to [0, 100]
fn percent_of(amount: f64, income: f64) -> u32 {
    let percent = (amount / income * 100.0).round();
    if percent.is_nan() {
        return 0;
    }
    percent.clamp(0.0, 100.0) as u32
}

/// Reference split used to put an actual breakdown in context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationGuideline {
    pub needs_percent: u32,
    pub wants_percent: u32,
    pub savings_percent: u32,
}

impl Default for AllocationGuideline {
    /// The 50/30/20 rule
    fn default() -> Self {
        Self {
            needs_percent: 50,
            wants_percent: 30,
            savings_percent: 20,
        }
    }
}

/// Actual minus guideline, in percentage points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuidelineComparison {
    pub needs_delta: i32,
    pub wants_delta: i32,
    pub savings_delta: i32,
}

impl GuidelineComparison {
    /// Needs and wants at or under the guideline, savings at or over it
    pub fn within_guideline(&self) -> bool {
        self.needs_delta <= 0 && self.wants_delta <= 0 && self.savings_delta >= 0
    }
}

impl AllocationGuideline {
    /// Signed gap between an actual breakdown and this guideline
    pub fn compare(&self, actual: &AllocationBreakdown) -> GuidelineComparison {
        let delta = |actual: u32, target: u32| actual as i32 - target as i32;
        GuidelineComparison {
            needs_delta: delta(actual.needs_percent, self.needs_percent),
            wants_delta: delta(actual.wants_percent, self.wants_percent),
            savings_delta: delta(actual.savings_percent, self.savings_percent),
        }
    }
}
