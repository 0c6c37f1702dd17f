//! Persistence for the saved profile and the goal planner's goals
//!
//! The engine never touches storage itself; the dashboard is handed a
//! [`ProfileRepository`] and reads through it.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use log::debug;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::profile::{FinancialProfile, Goal};

/// File holding the saved profile
pub const PROFILE_FILE: &str = "profile.json";
/// File holding the goal planner's goals
pub const GOALS_FILE: &str = "goals.json";

/// Storage seam for user state.
///
/// Nothing saved yet is `Ok(None)` / an empty list, never an error.
pub trait ProfileRepository {
    fn load_profile(&self) -> Result<Option<FinancialProfile>>;

    fn save_profile(&self, profile: &FinancialProfile) -> Result<()>;

    /// Goals kept by the goal planner, separate from the survey's goals
    fn load_goals(&self) -> Result<Vec<Goal>>;

    fn save_goals(&self, goals: &[Goal]) -> Result<()>;
}

/// On-disk wrapper recording when a document was written
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Saved<T> {
    pub saved_at: DateTime<Utc>,
    pub data: T,
}

impl<T> Saved<T> {
    /// Wrap `data` stamped with the current time
    pub fn now(data: T) -> Self {
        Self {
            saved_at: Utc::now(),
            data,
        }
    }
}

/// A directory holding `profile.json` and `goals.json`
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    root: PathBuf,
}

impl JsonFileRepository {
    /// Repository rooted at `root`; the directory is created on first save
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory the files live in
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// When the profile was last saved, if ever
    pub fn profile_saved_at(&self) -> Result<Option<DateTime<Utc>>> {
        Ok(self
            .read::<FinancialProfile>(PROFILE_FILE)?
            .map(|saved| saved.saved_at))
    }

    fn read<T: DeserializeOwned>(&self, file_name: &str) -> Result<Option<Saved<T>>> {
        let path = self.root.join(file_name);
        if !path.exists() {
            debug!("{} not found", path.display());
            return Ok(None);
        }

        let content = fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    fn write<T: Serialize>(&self, file_name: &str, data: T) -> Result<()> {
        fs::create_dir_all(&self.root)?;

        let path = self.root.join(file_name);
        let json = serde_json::to_string_pretty(&Saved::now(data))?;

        // write then rename so a crash never leaves a half-written file
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &path)?;

        debug!("saved {}", path.display());
        Ok(())
    }
}

impl ProfileRepository for JsonFileRepository {
    fn load_profile(&self) -> Result<Option<FinancialProfile>> {
        Ok(self.read(PROFILE_FILE)?.map(|saved| saved.data))
    }

    fn save_profile(&self, profile: &FinancialProfile) -> Result<()> {
        self.write(PROFILE_FILE, profile)
    }

    fn load_goals(&self) -> Result<Vec<Goal>> {
        Ok(self
            .read(GOALS_FILE)?
            .map(|saved| saved.data)
            .unwrap_or_default())
    }

    fn save_goals(&self, goals: &[Goal]) -> Result<()> {
        self.write(GOALS_FILE, goals)
    }
}

/// In-process repository
#[derive(Debug, Default)]
pub struct MemoryRepository {
    profile: Mutex<Option<FinancialProfile>>,
    goals: Mutex<Vec<Goal>>,
}

impl MemoryRepository {
    /// Empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository with a profile already saved
    pub fn with_profile(profile: FinancialProfile) -> Self {
        Self {
            profile: Mutex::new(Some(profile)),
            goals: Mutex::default(),
        }
    }
}

/// A poisoned lock still holds a complete value; every write replaces it whole
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl ProfileRepository for MemoryRepository {
    fn load_profile(&self) -> Result<Option<FinancialProfile>> {
        Ok(lock(&self.profile).clone())
    }

    fn save_profile(&self, profile: &FinancialProfile) -> Result<()> {
        *lock(&self.profile) = Some(profile.clone());
        Ok(())
    }

    fn load_goals(&self) -> Result<Vec<Goal>> {
        Ok(lock(&self.goals).clone())
    }

    fn save_goals(&self, goals: &[Goal]) -> Result<()> {
        *lock(&self.goals) = goals.to_vec();
        Ok(())
    }
}
