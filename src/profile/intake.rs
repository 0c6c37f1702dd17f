//! Survey intake: raw, possibly partial answers into a canonical profile
//!
//! The survey is filled in step by step, so any answer may be missing or
//! hold junk typed into a number box. [`normalize`] never fails: missing
//! numbers become 0, unparseable or negative numbers become 0, and unset
//! enums become `Unknown`.
//!
//! Fields are edited through typed setters on [`RawSurvey`] rather than by
//! string paths.

use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Deserializer, Serialize};

use super::data::{
    BillsOnTime, Cash, Debts, ExpenseCategory, FinancialFeeling, FinancialProfile, Goal,
    Respondent, SurveyScope, DEFAULT_GOAL_TIMEFRAME_MONTHS,
};

/// Name given to goals saved without one
pub const DEFAULT_GOAL_NAME: &str = "Goal";

/// A numeric answer as typed: either a JSON number or free text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    Number(f64),
    Text(String),
}

impl RawNumber {
    /// Parsed value, or `None` if the text is not a number
    pub fn parse(&self) -> Option<f64> {
        match self {
            RawNumber::Number(n) => Some(*n),
            RawNumber::Text(s) => s.trim().parse::<f64>().ok(),
        }
    }

    /// Value usable as a monetary amount: finite and non-negative, else 0
    pub fn amount(&self) -> f64 {
        match self.parse() {
            Some(n) if n.is_finite() && n > 0.0 => n,
            _ => 0.0,
        }
    }
}

impl From<f64> for RawNumber {
    fn from(n: f64) -> Self {
        RawNumber::Number(n)
    }
}

impl From<u32> for RawNumber {
    fn from(n: u32) -> Self {
        RawNumber::Number(n as f64)
    }
}

impl From<&str> for RawNumber {
    fn from(s: &str) -> Self {
        RawNumber::Text(s.to_string())
    }
}

impl From<String> for RawNumber {
    fn from(s: String) -> Self {
        RawNumber::Text(s)
    }
}

fn amount_of(value: Option<&RawNumber>) -> f64 {
    value.map(RawNumber::amount).unwrap_or(0.0)
}

/// Deserialize an enum answer, mapping missing or unrecognized text to the default
fn lenient_enum<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + Default,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.parse().ok()).unwrap_or_default())
}

/// A goal as captured by the survey or the goal planner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawGoal {
    /// Goal picked from the survey's list, no amount attached
    Named(String),
    /// Goal entered with an amount and deadline
    #[serde(rename_all = "camelCase")]
    Detailed {
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        target_amount: Option<RawNumber>,
        #[serde(default)]
        timeframe_months: Option<RawNumber>,
    },
}

impl RawGoal {
    fn name(&self) -> Option<&str> {
        match self {
            RawGoal::Named(name) => Some(name.as_str()),
            RawGoal::Detailed { name, .. } => name.as_deref(),
        }
    }

    fn to_goal(&self) -> Goal {
        match self {
            RawGoal::Named(name) => Goal::new(
                non_blank(name).unwrap_or(DEFAULT_GOAL_NAME),
                0.0,
                DEFAULT_GOAL_TIMEFRAME_MONTHS,
            ),
            RawGoal::Detailed {
                name,
                target_amount,
                timeframe_months,
            } => {
                let months = timeframe_months
                    .as_ref()
                    .map(RawNumber::amount)
                    .filter(|m| *m >= 1.0)
                    .map(|m| m.round().min(u32::MAX as f64) as u32)
                    .unwrap_or(DEFAULT_GOAL_TIMEFRAME_MONTHS);
                Goal::new(
                    name.as_deref().and_then(non_blank).unwrap_or(DEFAULT_GOAL_NAME),
                    amount_of(target_amount.as_ref()),
                    months,
                )
            }
        }
    }
}

fn non_blank(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Which debt repayment a value belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebtKind {
    CreditCards,
    Loans,
    Other,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawPersonal {
    pub name: Option<String>,
    pub age: Option<RawNumber>,
    #[serde(deserialize_with = "lenient_enum")]
    pub scope: SurveyScope,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawFinancialHealth {
    #[serde(deserialize_with = "lenient_enum")]
    pub bills_on_time: BillsOnTime,
    #[serde(deserialize_with = "lenient_enum")]
    pub feeling: FinancialFeeling,
    pub goals: Vec<RawGoal>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawDebts {
    pub credit_cards: Option<RawNumber>,
    pub loans: Option<RawNumber>,
    pub other: Option<RawNumber>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawCash {
    pub bank: Option<RawNumber>,
    pub savings: Option<RawNumber>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawNumbers {
    pub income: Option<RawNumber>,
    /// Keyed by category label; `null` amounts count as 0
    pub expenses: BTreeMap<String, Option<RawNumber>>,
    pub has_debt: Option<bool>,
    pub debts: RawDebts,
    pub monthly_savings: Option<RawNumber>,
    pub cash: RawCash,
    pub has_pension: Option<bool>,
    pub investments: Option<RawNumber>,
    pub insurance_policies: Vec<String>,
}

/// Survey answers exactly as collected, grouped like the survey steps
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawSurvey {
    pub personal: RawPersonal,
    pub financial_health: RawFinancialHealth,
    pub numbers: RawNumbers,
}

impl RawSurvey {
    /// Empty survey, nothing answered yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Respondent name
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.personal.name = Some(name.into());
    }

    /// Respondent age in years
    pub fn set_age(&mut self, age: impl Into<RawNumber>) {
        self.personal.age = Some(age.into());
    }

    /// Whether the answers cover one person or a household
    pub fn set_scope(&mut self, scope: SurveyScope) {
        self.personal.scope = scope;
    }

    /// How reliably bills get paid
    pub fn set_bills_on_time(&mut self, bills_on_time: BillsOnTime) {
        self.financial_health.bills_on_time = bills_on_time;
    }

    /// Self-reported feeling about money
    pub fn set_feeling(&mut self, feeling: FinancialFeeling) {
        self.financial_health.feeling = feeling;
    }

    /// Select or deselect a goal from the survey's goal list
    pub fn toggle_goal(&mut self, name: &str) {
        let goals = &mut self.financial_health.goals;
        if let Some(pos) = goals.iter().position(|g| g.name() == Some(name)) {
            goals.remove(pos);
        } else {
            goals.push(RawGoal::Named(name.to_string()));
        }
    }

    /// Add a goal with an amount and deadline
    pub fn add_goal(
        &mut self,
        name: impl Into<String>,
        target_amount: impl Into<RawNumber>,
        timeframe_months: impl Into<RawNumber>,
    ) {
        self.financial_health.goals.push(RawGoal::Detailed {
            name: Some(name.into()),
            target_amount: Some(target_amount.into()),
            timeframe_months: Some(timeframe_months.into()),
        });
    }

    /// Monthly income after tax
    pub fn set_income(&mut self, income: impl Into<RawNumber>) {
        self.numbers.income = Some(income.into());
    }

    /// Monthly spend in one category, replacing any earlier answer
    pub fn set_expense(&mut self, category: ExpenseCategory, amount: impl Into<RawNumber>) {
        self.numbers
            .expenses
            .insert(category.as_str().to_string(), Some(amount.into()));
    }

    /// Answer to "do you have debt"; `false` clears any debt amounts
    pub fn set_has_debt(&mut self, has_debt: bool) {
        self.numbers.has_debt = Some(has_debt);
    }

    /// Monthly repayment for one kind of debt
    pub fn set_debt(&mut self, kind: DebtKind, amount: impl Into<RawNumber>) {
        let slot = match kind {
            DebtKind::CreditCards => &mut self.numbers.debts.credit_cards,
            DebtKind::Loans => &mut self.numbers.debts.loans,
            DebtKind::Other => &mut self.numbers.debts.other,
        };
        *slot = Some(amount.into());
    }

    /// Amount put aside each month
    pub fn set_monthly_savings(&mut self, amount: impl Into<RawNumber>) {
        self.numbers.monthly_savings = Some(amount.into());
    }

    /// Current account balance
    pub fn set_bank_balance(&mut self, amount: impl Into<RawNumber>) {
        self.numbers.cash.bank = Some(amount.into());
    }

    /// Savings account balance
    pub fn set_savings_balance(&mut self, amount: impl Into<RawNumber>) {
        self.numbers.cash.savings = Some(amount.into());
    }

    /// Whether the respondent pays into a pension
    pub fn set_has_pension(&mut self, has_pension: bool) {
        self.numbers.has_pension = Some(has_pension);
    }

    /// Value of investments outside the pension
    pub fn set_investments(&mut self, amount: impl Into<RawNumber>) {
        self.numbers.investments = Some(amount.into());
    }

    /// Select or deselect an insurance policy
    pub fn toggle_insurance_policy(&mut self, policy: &str) {
        let policies = &mut self.numbers.insurance_policies;
        if let Some(pos) = policies.iter().position(|p| p == policy) {
            policies.remove(pos);
        } else {
            policies.push(policy.to_string());
        }
    }

    /// Build the canonical profile from these answers
    pub fn normalize(&self) -> FinancialProfile {
        normalize(self)
    }
}

/// Convert raw survey answers into a complete [`FinancialProfile`].
///
/// Total and side-effect free apart from debug logging.
pub fn normalize(raw: &RawSurvey) -> FinancialProfile {
    let numbers = &raw.numbers;

    if numbers.income.is_none() {
        debug!("income not answered, defaulting to 0");
    }

    let mut expenses = BTreeMap::new();
    for (label, value) in &numbers.expenses {
        let category = ExpenseCategory::from_label(label).unwrap_or_else(|| {
            debug!("unrecognized expense category {:?}, counting as Other", label);
            ExpenseCategory::Other
        });
        *expenses.entry(category).or_insert(0.0) += amount_of(value.as_ref());
    }

    // A "no debt" answer overrides amounts left over from an earlier pass.
    let debts = if numbers.has_debt == Some(false) {
        Debts::default()
    } else {
        Debts {
            credit_cards: amount_of(numbers.debts.credit_cards.as_ref()),
            loans: amount_of(numbers.debts.loans.as_ref()),
            other: amount_of(numbers.debts.other.as_ref()),
        }
    };

    let insurance_policies: BTreeSet<String> = numbers
        .insurance_policies
        .iter()
        .filter_map(|p| non_blank(p))
        .map(str::to_string)
        .collect();

    let goals: Vec<Goal> = raw.financial_health.goals.iter().map(RawGoal::to_goal).collect();

    let age = raw
        .personal
        .age
        .as_ref()
        .map(RawNumber::amount)
        .filter(|a| *a >= 1.0)
        .map(|a| a.round().min(u32::MAX as f64) as u32);

    let profile = FinancialProfile {
        income: amount_of(numbers.income.as_ref()),
        expenses,
        debts,
        monthly_savings: amount_of(numbers.monthly_savings.as_ref()),
        cash: Cash {
            bank: amount_of(numbers.cash.bank.as_ref()),
            savings: amount_of(numbers.cash.savings.as_ref()),
        },
        has_pension: numbers.has_pension,
        investments: amount_of(numbers.investments.as_ref()),
        insurance_policies,
        goals,
        bills_on_time: raw.financial_health.bills_on_time,
        respondent: Respondent {
            name: raw
                .personal
                .name
                .as_deref()
                .map(str::trim)
                .unwrap_or_default()
                .to_string(),
            age,
            scope: raw.personal.scope,
        },
        feeling: raw.financial_health.feeling,
    };

    debug!(
        "normalized survey: income={:.2} expenses={:.2} goals={}",
        profile.income,
        profile.total_expenses(),
        profile.goals.len()
    );

    profile
}
