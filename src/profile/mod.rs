//! Financial profile data structures and survey intake

mod data;
pub mod intake;

pub use data::{
    BillsOnTime, Cash, Debts, ExpenseCategory, FinancialFeeling, FinancialProfile, Goal,
    Respondent, SurveyScope,
};
pub use intake::{normalize, DebtKind, RawGoal, RawNumber, RawSurvey};
