//! Ratios derived from a profile, shared by the score and the report views

use serde::{Deserialize, Serialize};

use crate::profile::FinancialProfile;

/// Denominator guard: never divide by less than 1
pub fn safe_divisor(value: f64) -> f64 {
    value.max(1.0)
}

/// Totals and ratios the scoring rules are evaluated on
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileMetrics {
    pub total_expenses: f64,
    pub total_debt_payments: f64,
    pub total_cash: f64,
    /// (expenses + debt payments) / income
    pub expense_ratio: f64,
    /// debt payments / income
    pub debt_ratio: f64,
    /// monthly savings / income
    pub savings_ratio: f64,
    /// Months of outflow the cash balance covers
    pub emergency_months: f64,
}

impl ProfileMetrics {
    /// Derive every ratio from a profile
    pub fn from_profile(profile: &FinancialProfile) -> Self {
        let total_expenses = profile.total_expenses();
        let total_debt_payments = profile.debts.total();
        let total_cash = profile.cash.total();
        let income = safe_divisor(profile.income);
        let outflow = total_expenses + total_debt_payments;

        Self {
            total_expenses,
            total_debt_payments,
            total_cash,
            expense_ratio: outflow / income,
            debt_ratio: total_debt_payments / income,
            savings_ratio: profile.monthly_savings / income,
            emergency_months: total_cash / safe_divisor(outflow),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{Cash, Debts, ExpenseCategory};
    use approx::assert_relative_eq;

    #[test]
    fn test_metrics() {
        let mut profile = FinancialProfile {
            income: 4_000.0,
            debts: Debts { credit_cards: 200.0, loans: 0.0, other: 0.0 },
            monthly_savings: 400.0,
            cash: Cash { bank: 3_000.0, savings: 6_000.0 },
            ..Default::default()
        };
        profile.expenses.insert(ExpenseCategory::Rent, 1_300.0);
        profile.expenses.insert(ExpenseCategory::Groceries, 300.0);

        let m = ProfileMetrics::from_profile(&profile);
        assert_relative_eq!(m.expense_ratio, 0.45);
        assert_relative_eq!(m.debt_ratio, 0.05);
        assert_relative_eq!(m.savings_ratio, 0.10);
        assert_relative_eq!(m.emergency_months, 5.0);
    }

    #[test]
    fn test_zero_income_and_outflow_stay_finite() {
        let profile = FinancialProfile {
            cash: Cash { bank: 500.0, savings: 0.0 },
            ..Default::default()
        };
        let m = ProfileMetrics::from_profile(&profile);

        assert_eq!(m.expense_ratio, 0.0);
        assert_eq!(m.debt_ratio, 0.0);
        assert_eq!(m.savings_ratio, 0.0);
        assert_eq!(m.emergency_months, 500.0);
    }

    #[test]
    fn test_fractional_income_uses_floor_of_one() {
        let profile = FinancialProfile {
            income: 0.25,
            monthly_savings: 0.5,
            ..Default::default()
        };
        assert_eq!(ProfileMetrics::from_profile(&profile).savings_ratio, 0.5);
    }
}
