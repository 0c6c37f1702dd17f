//! Engine configuration and the CSV scenario loader
//!
//! Scenario rates live in `data/scenarios.csv` with a `name,annual_rate_percent`
//! header. Everything else has a built-in default.

use std::fs::File;
use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::projection::{DEFAULT_INVESTMENT_SHARE, DEFAULT_MILESTONE_MONTHS};
use crate::scenario::{Scenario, ScenarioSet};
use crate::scoring::AllocationGuideline;

/// Default path to the data directory
pub const DEFAULT_DATA_PATH: &str = "data";

/// Scenario table file name inside the data directory
pub const SCENARIOS_FILE: &str = "scenarios.csv";

/// 17 years
pub const DEFAULT_HORIZON_MONTHS: u32 = 204;

/// Load a scenario table from a CSV file
pub fn load_scenarios(path: &Path) -> Result<ScenarioSet> {
    let file = File::open(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(file);

    let mut scenarios = Vec::new();

    for result in reader.records() {
        let record = result?;
        let name = record.get(0).unwrap_or_default();
        let rate = record.get(1).unwrap_or_default();

        if name.is_empty() {
            return Err(Error::InvalidData(format!(
                "{}: scenario without a name",
                path.display()
            )));
        }

        let annual_rate_percent: f64 = rate.parse().map_err(|_| {
            Error::InvalidData(format!("{}: bad rate {:?} for {}", path.display(), rate, name))
        })?;
        if !annual_rate_percent.is_finite() {
            return Err(Error::InvalidData(format!(
                "{}: rate for {} is not finite",
                path.display(),
                name
            )));
        }

        scenarios.push(Scenario::new(name, annual_rate_percent));
    }

    if scenarios.is_empty() {
        return Err(Error::InvalidData(format!("{}: no scenarios", path.display())));
    }

    debug!("loaded {} scenarios from {}", scenarios.len(), path.display());
    Ok(ScenarioSet::new(scenarios))
}

/// Tunables shared by the dashboard views
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    pub scenarios: ScenarioSet,
    /// Projection horizon for the scenario comparison
    pub horizon_months: u32,
    /// Share of monthly savings invested in the present/future split
    pub investment_share: f64,
    pub milestone_months: Vec<u32>,
    pub guideline: AllocationGuideline,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            scenarios: ScenarioSet::standard(),
            horizon_months: DEFAULT_HORIZON_MONTHS,
            investment_share: DEFAULT_INVESTMENT_SHARE,
            milestone_months: DEFAULT_MILESTONE_MONTHS.to_vec(),
            guideline: AllocationGuideline::default(),
        }
    }
}

impl EngineConfig {
    /// Load from the default location (data/)
    pub fn from_csv() -> Result<Self> {
        Self::from_dir(Path::new(DEFAULT_DATA_PATH))
    }

    /// Defaults overlaid with whatever tables exist in `dir`
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let mut config = Self::default();

        let scenarios_path = dir.join(SCENARIOS_FILE);
        if scenarios_path.is_file() {
            config.scenarios = load_scenarios(&scenarios_path)?;
            info!(
                "using {} scenarios from {}",
                config.scenarios.len(),
                scenarios_path.display()
            );
        } else {
            debug!("{} not found, using standard scenarios", scenarios_path.display());
        }

        Ok(config)
    }

    /// Replace the scenario set
    pub fn with_scenarios(mut self, scenarios: ScenarioSet) -> Self {
        self.scenarios = scenarios;
        self
    }

    /// Set the projection horizon in whole years
    pub fn with_horizon_years(mut self, years: u32) -> Self {
        self.horizon_months = years.saturating_mul(12);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.scenarios, ScenarioSet::standard());
        assert_eq!(config.horizon_months, 204);
        assert_eq!(config.investment_share, 0.5);
        assert_eq!(config.milestone_months, vec![12, 60, 120]);
        assert_eq!(config.guideline, AllocationGuideline::default());
    }

    #[test]
    fn test_load_scenarios() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SCENARIOS_FILE);
        fs::write(
            &path,
            "name,annual_rate_percent\n# conservative mix\nbonds, 3.5\nequities,9\n",
        )
        .unwrap();

        let set = load_scenarios(&path).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.scenarios()[0], Scenario::new("bonds", 3.5));
        assert_eq!(set.get("equities").map(|s| s.annual_rate_percent), Some(9.0));
    }

    #[test]
    fn test_bad_rate_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SCENARIOS_FILE);
        fs::write(&path, "name,annual_rate_percent\nbonds,lots\n").unwrap();

        assert!(matches!(load_scenarios(&path), Err(Error::InvalidData(_))));
    }

    #[test]
    fn test_empty_table_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SCENARIOS_FILE);
        fs::write(&path, "name,annual_rate_percent\n").unwrap();

        assert!(matches!(load_scenarios(&path), Err(Error::InvalidData(_))));
    }

    #[test]
    fn test_from_dir_without_tables_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(EngineConfig::from_dir(dir.path()).unwrap(), EngineConfig::default());
    }

    #[test]
    fn test_from_dir_overlays_scenarios() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(SCENARIOS_FILE),
            "name,annual_rate_percent\nflat,0\n",
        )
        .unwrap();

        let config = EngineConfig::from_dir(dir.path()).unwrap();
        assert_eq!(config.scenarios, ScenarioSet::new(vec![Scenario::new("flat", 0.0)]));
        assert_eq!(config.horizon_months, DEFAULT_HORIZON_MONTHS);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_scenarios(&dir.path().join("nope.csv"));
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_with_horizon_years() {
        let config = EngineConfig::default().with_horizon_years(30);
        assert_eq!(config.horizon_months, 360);
    }
}
