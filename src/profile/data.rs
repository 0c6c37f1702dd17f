//! Financial profile data structures matching the survey answer format

use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Default goal timeframe when none was given (one year)
pub const DEFAULT_GOAL_TIMEFRAME_MONTHS: u32 = 12;

/// Fixed set of monthly expense categories asked for by the survey
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ExpenseCategory {
    Rent,
    Mortgage,
    Utilities,
    #[serde(rename = "Car/Fuel")]
    CarFuel,
    #[serde(rename = "Public transport")]
    PublicTransport,
    #[serde(rename = "Media & Ent.")]
    MediaEntertainment,
    #[serde(rename = "Insurance & Medical")]
    InsuranceMedical,
    Groceries,
    #[serde(rename = "Child care")]
    ChildCare,
    Other,
}

impl ExpenseCategory {
    /// All categories in survey order
    pub const ALL: [ExpenseCategory; 10] = [
        ExpenseCategory::Rent,
        ExpenseCategory::Mortgage,
        ExpenseCategory::Utilities,
        ExpenseCategory::CarFuel,
        ExpenseCategory::PublicTransport,
        ExpenseCategory::MediaEntertainment,
        ExpenseCategory::InsuranceMedical,
        ExpenseCategory::Groceries,
        ExpenseCategory::ChildCare,
        ExpenseCategory::Other,
    ];

    /// Display label as shown in the survey
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseCategory::Rent => "Rent",
            ExpenseCategory::Mortgage => "Mortgage",
            ExpenseCategory::Utilities => "Utilities",
            ExpenseCategory::CarFuel => "Car/Fuel",
            ExpenseCategory::PublicTransport => "Public transport",
            ExpenseCategory::MediaEntertainment => "Media & Ent.",
            ExpenseCategory::InsuranceMedical => "Insurance & Medical",
            ExpenseCategory::Groceries => "Groceries",
            ExpenseCategory::ChildCare => "Child care",
            ExpenseCategory::Other => "Other",
        }
    }

    /// Match a free-form label against the category set.
    ///
    /// Comparison ignores case and whitespace, so "Car / Fuel" and
    /// "car/fuel" both resolve to [`ExpenseCategory::CarFuel`].
    pub fn from_label(label: &str) -> Option<Self> {
        let wanted = squash(label);
        Self::ALL
            .iter()
            .copied()
            .find(|category| squash(category.as_str()) == wanted)
    }
}

fn squash(label: &str) -> String {
    label
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Monthly debt repayments
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Debts {
    pub credit_cards: f64,
    pub loans: f64,
    pub other: f64,
}

impl Debts {
    /// Sum of all monthly repayments
    pub fn total(&self) -> f64 {
        self.credit_cards + self.loans + self.other
    }
}

/// Liquid cash balances
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Cash {
    pub bank: f64,
    pub savings: f64,
}

impl Cash {
    /// Bank plus savings balance
    pub fn total(&self) -> f64 {
        self.bank + self.savings
    }
}

/// How reliably bills get paid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillsOnTime {
    Always,
    Sometimes,
    Rarely,
    #[default]
    Unknown,
}

impl FromStr for BillsOnTime {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "always" => Ok(BillsOnTime::Always),
            "sometimes" => Ok(BillsOnTime::Sometimes),
            "rarely" => Ok(BillsOnTime::Rarely),
            "unknown" | "" => Ok(BillsOnTime::Unknown),
            _ => Err(()),
        }
    }
}

/// Whether the survey covers one person or a household
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurveyScope {
    Yourself,
    Household,
    #[default]
    Unknown,
}

impl FromStr for SurveyScope {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yourself" => Ok(SurveyScope::Yourself),
            "household" => Ok(SurveyScope::Household),
            "unknown" | "" => Ok(SurveyScope::Unknown),
            _ => Err(()),
        }
    }
}

/// Self-reported feeling about finances
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FinancialFeeling {
    Ok,
    Worried,
    #[default]
    Unknown,
}

impl FromStr for FinancialFeeling {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ok" => Ok(FinancialFeeling::Ok),
            "worried" => Ok(FinancialFeeling::Worried),
            "unknown" | "" => Ok(FinancialFeeling::Unknown),
            _ => Err(()),
        }
    }
}

/// Who answered the survey. Informational only; no scoring rule reads it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Respondent {
    pub name: String,
    pub age: Option<u32>,
    pub scope: SurveyScope,
}

/// A savings goal with a target amount and deadline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "GoalRecord")]
pub struct Goal {
    pub name: String,
    pub target_amount: f64,
    pub timeframe_months: u32,
}

/// Stored form of a [`Goal`]; read back through [`Goal::new`] so the
/// timeframe floor holds for saved goals too
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoalRecord {
    name: String,
    target_amount: f64,
    timeframe_months: u32,
}

impl From<GoalRecord> for Goal {
    fn from(record: GoalRecord) -> Self {
        Goal::new(record.name, record.target_amount, record.timeframe_months)
    }
}

impl Goal {
    /// Create a goal; a zero timeframe is raised to one month
    pub fn new(name: impl Into<String>, target_amount: f64, timeframe_months: u32) -> Self {
        Self {
            name: name.into(),
            target_amount,
            timeframe_months: timeframe_months.max(1),
        }
    }
}

/// Canonical snapshot of a user's finances.
///
/// Built once per survey completion by [`crate::profile::normalize`]. All
/// monetary fields are monthly amounts or balances and are never negative
/// when produced by the normalizer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FinancialProfile {
    /// Monthly after-tax income
    pub income: f64,

    /// Monthly spend per category
    pub expenses: BTreeMap<ExpenseCategory, f64>,

    /// Monthly debt repayments
    pub debts: Debts,

    /// Amount put aside each month
    pub monthly_savings: f64,

    /// Current cash balances
    pub cash: Cash,

    /// Pension enrolment (None = not answered)
    pub has_pension: Option<bool>,

    /// Current portfolio value, pension excluded
    pub investments: f64,

    /// Names of insurance policies held
    pub insurance_policies: BTreeSet<String>,

    pub goals: Vec<Goal>,

    pub bills_on_time: BillsOnTime,

    pub respondent: Respondent,

    pub feeling: FinancialFeeling,
}

impl FinancialProfile {
    /// Sum of all expense categories
    pub fn total_expenses(&self) -> f64 {
        self.expenses.values().sum()
    }

    /// Amount spent in one category (0 when absent)
    pub fn expense(&self, category: ExpenseCategory) -> f64 {
        self.expenses.get(&category).copied().unwrap_or(0.0)
    }

    /// Monthly outflow the emergency fund has to cover
    pub fn monthly_outflow(&self) -> f64 {
        self.total_expenses() + self.debts.total()
    }

    /// Liquid cash plus investments: the starting principal for projections
    pub fn net_worth(&self) -> f64 {
        self.cash.total() + self.investments
    }

    /// Amount added to projections each month.
    ///
    /// The stated monthly savings when there are any, otherwise whatever
    /// income is left after expenses and debt payments.
    pub fn monthly_contribution(&self) -> f64 {
        if self.monthly_savings > 0.0 {
            self.monthly_savings
        } else {
            (self.income - self.monthly_outflow()).max(0.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_labels_round_trip() {
        for category in ExpenseCategory::ALL {
            assert_eq!(ExpenseCategory::from_label(category.as_str()), Some(category));
        }
    }

    #[test]
    fn test_category_label_matching_is_loose() {
        assert_eq!(ExpenseCategory::from_label("Car / Fuel"), Some(ExpenseCategory::CarFuel));
        assert_eq!(ExpenseCategory::from_label("  child CARE "), Some(ExpenseCategory::ChildCare));
        assert_eq!(ExpenseCategory::from_label("Council Tax"), None);
    }

    #[test]
    fn test_goal_timeframe_floor() {
        let goal = Goal::new("Holiday", 2_000.0, 0);
        assert_eq!(goal.timeframe_months, 1);
    }

    #[test]
    fn test_saved_goal_timeframe_floor() {
        let goal: Goal = serde_json::from_str(
            r#"{"name": "Holiday", "targetAmount": 2000, "timeframeMonths": 0}"#,
        )
        .unwrap();
        assert_eq!(goal, Goal::new("Holiday", 2_000.0, 1));
        assert_eq!(serde_json::to_value(&goal).unwrap()["timeframeMonths"], 1);
    }

    #[test]
    fn test_monthly_contribution() {
        let mut profile = FinancialProfile {
            income: 3_000.0,
            monthly_savings: 400.0,
            debts: Debts { credit_cards: 100.0, loans: 0.0, other: 0.0 },
            ..Default::default()
        };
        profile.expenses.insert(ExpenseCategory::Rent, 1_500.0);
        assert_eq!(profile.monthly_contribution(), 400.0);

        // no savings answer: what is left of income
        profile.monthly_savings = 0.0;
        assert_eq!(profile.monthly_contribution(), 1_400.0);

        // spending more than earned leaves nothing
        profile.expenses.insert(ExpenseCategory::Mortgage, 2_000.0);
        assert_eq!(profile.monthly_contribution(), 0.0);
    }

    #[test]
    fn test_profile_totals() {
        let mut profile = FinancialProfile {
            income: 3_000.0,
            debts: Debts { credit_cards: 50.0, loans: 100.0, other: 0.0 },
            cash: Cash { bank: 1_000.0, savings: 4_000.0 },
            investments: 2_500.0,
            ..Default::default()
        };
        profile.expenses.insert(ExpenseCategory::Rent, 900.0);
        profile.expenses.insert(ExpenseCategory::Groceries, 300.0);

        assert_eq!(profile.total_expenses(), 1_200.0);
        assert_eq!(profile.monthly_outflow(), 1_350.0);
        assert_eq!(profile.expense(ExpenseCategory::Mortgage), 0.0);
        assert_eq!(profile.net_worth(), 7_500.0);
    }

    #[test]
    fn test_profile_json_uses_survey_labels() {
        let mut profile = FinancialProfile::default();
        profile.expenses.insert(ExpenseCategory::MediaEntertainment, 150.0);

        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["expenses"]["Media & Ent."], 150.0);
        assert_eq!(json["billsOnTime"], "unknown");

        let back: FinancialProfile = serde_json::from_value(json).unwrap();
        assert_eq!(back, profile);
    }
}
