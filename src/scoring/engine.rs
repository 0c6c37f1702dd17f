//! Rule-based clarity score over three pillars
//!
//! Points are awards, never penalties, and each rule is evaluated
//! independently. Pillar maxima: spending 35, saving 35, planning 30.

use log::debug;
use serde::{Deserialize, Serialize};

use super::allocation::{AllocationBreakdown, AllocationClassifier};
use super::metrics::ProfileMetrics;
use crate::profile::{BillsOnTime, FinancialProfile};

pub const SPENDING_MAX: u32 = 35;
pub const SAVING_MAX: u32 = 35;
pub const PLANNING_MAX: u32 = 30;
pub const TOTAL_MAX: u32 = 100;

/// (upper bound on expense ratio, points), first match wins
const EXPENSE_RATIO_TIERS: [(f64, u32); 2] = [(0.50, 15), (0.70, 8)];
const DEBT_RATIO_LIMIT: f64 = 0.20;
const DEBT_RATIO_POINTS: u32 = 5;

/// (lower bound on savings ratio, points), first match wins
const SAVINGS_RATIO_TIERS: [(f64, u32); 2] = [(0.20, 15), (0.10, 8)];
/// (lower bound on months of cover, points), first match wins
const EMERGENCY_MONTH_TIERS: [(f64, u32); 3] = [(6.0, 15), (3.0, 12), (1.0, 6)];
const SAVINGS_BONUS_RATIO: f64 = 0.15;
const SAVINGS_BONUS_POINTS: u32 = 5;

const GOALS_REQUIRED: usize = 3;
const GOALS_POINTS: u32 = 10;
const PENSION_POINTS: u32 = 10;
const INVESTMENTS_POINTS: u32 = 5;
const POLICIES_REQUIRED: usize = 3;
const POLICIES_POINTS: u32 = 5;

/// Qualitative label for a pillar
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PillarStatus {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl PillarStatus {
    /// Status from the share of the pillar's maximum that was earned
    pub fn from_points(points: u32, max_points: u32) -> Self {
        let share = points as f64 / max_points.max(1) as f64;
        if share >= 0.8 {
            PillarStatus::Excellent
        } else if share >= 0.6 {
            PillarStatus::Good
        } else if share >= 0.4 {
            PillarStatus::Fair
        } else {
            PillarStatus::Poor
        }
    }

    /// Label as shown on the dashboard
    pub fn as_str(&self) -> &'static str {
        match self {
            PillarStatus::Poor => "Poor",
            PillarStatus::Fair => "Fair",
            PillarStatus::Good => "Good",
            PillarStatus::Excellent => "Excellent",
        }
    }
}

/// Points earned in one pillar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PillarScore {
    pub points: u32,
    pub max_points: u32,
    pub status: PillarStatus,
}

impl PillarScore {
    fn new(points: u32, max_points: u32) -> Self {
        let points = points.min(max_points);
        Self {
            points,
            max_points,
            status: PillarStatus::from_points(points, max_points),
        }
    }
}

/// Composite 0-100 financial health score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClarityScore {
    pub total: u32,
    pub spending: PillarScore,
    pub saving: PillarScore,
    pub planning: PillarScore,
    pub breakdown: AllocationBreakdown,
}

pub struct ScoreEngine;

impl ScoreEngine {
    /// Score a profile
    pub fn compute(profile: &FinancialProfile) -> ClarityScore {
        let metrics = ProfileMetrics::from_profile(profile);
        Self::compute_with_metrics(profile, &metrics)
    }

    /// Score a profile whose metrics were already derived
    pub fn compute_with_metrics(profile: &FinancialProfile, metrics: &ProfileMetrics) -> ClarityScore {
        let spending = PillarScore::new(Self::spending_points(profile, metrics), SPENDING_MAX);
        let saving = PillarScore::new(Self::saving_points(metrics), SAVING_MAX);
        let planning = PillarScore::new(Self::planning_points(profile), PLANNING_MAX);

        let total = (spending.points + saving.points + planning.points).min(TOTAL_MAX);

        debug!(
            "clarity score {} (spending {}, saving {}, planning {})",
            total, spending.points, saving.points, planning.points
        );

        ClarityScore {
            total,
            spending,
            saving,
            planning,
            breakdown: AllocationClassifier::classify(profile),
        }
    }

    fn spending_points(profile: &FinancialProfile, metrics: &ProfileMetrics) -> u32 {
        let ratio_points = EXPENSE_RATIO_TIERS
            .iter()
            .find(|(limit, _)| metrics.expense_ratio <= *limit)
            .map_or(0, |&(_, points)| points);

        let bills_points = match profile.bills_on_time {
            BillsOnTime::Always => 15,
            BillsOnTime::Sometimes => 8,
            BillsOnTime::Rarely | BillsOnTime::Unknown => 0,
        };

        let debt_points = if metrics.debt_ratio <= DEBT_RATIO_LIMIT {
            DEBT_RATIO_POINTS
        } else {
            0
        };

        ratio_points + bills_points + debt_points
    }

    fn saving_points(metrics: &ProfileMetrics) -> u32 {
        let ratio_points = SAVINGS_RATIO_TIERS
            .iter()
            .find(|(floor, _)| metrics.savings_ratio >= *floor)
            .map_or(0, |&(_, points)| points);

        let cover_points = EMERGENCY_MONTH_TIERS
            .iter()
            .find(|(floor, _)| metrics.emergency_months >= *floor)
            .map_or(0, |&(_, points)| points);

        // stacks with the tiered savings award
        let bonus = if metrics.savings_ratio >= SAVINGS_BONUS_RATIO {
            SAVINGS_BONUS_POINTS
        } else {
            0
        };

        ratio_points + cover_points + bonus
    }

    fn planning_points(profile: &FinancialProfile) -> u32 {
        let mut points = 0;
        if profile.goals.len() >= GOALS_REQUIRED {
            points += GOALS_POINTS;
        }
        if profile.has_pension == Some(true) {
            points += PENSION_POINTS;
        }
        if profile.investments > 0.0 {
            points += INVESTMENTS_POINTS;
        }
        if profile.insurance_policies.len() >= POLICIES_REQUIRED {
            points += POLICIES_POINTS;
        }
        points
    }
}
