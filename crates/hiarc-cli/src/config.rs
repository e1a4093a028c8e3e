//! Profile store: named endpoint and credential pairs persisted as JSON.
//!
//! The file is a JSON object whose top-level keys are profile names:
//!
//! ```json
//! {
//!   "default": { "url": "https://api.example.com", "adminKey": "K1", "profile": "default" }
//! }
//! ```
//!
//! Every mutation reads the whole file, changes the map in memory and
//! writes the whole file back.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Directory under the home directory holding the config file
pub const CONFIG_DIR: &str = ".hiarc";

/// Config file name
pub const CONFIG_FILE: &str = "config.json";

/// Name of the profile used when none is selected
pub const DEFAULT_PROFILE: &str = "default";

/// Connection profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Base URL of the platform
    #[serde(default)]
    pub url: String,

    /// Admin key sent with every request
    #[serde(rename = "adminKey", alias = "adminkey", default)]
    pub admin_key: String,

    /// Profile name, mirrors the map key
    #[serde(rename = "profile", default)]
    pub name: String,
}

impl Profile {
    fn new(name: &str, url: &str, admin_key: &str) -> Self {
        Self {
            url: url.to_string(),
            admin_key: admin_key.to_string(),
            name: name.to_string(),
        }
    }
}

/// All profiles, keyed by name
pub type Profiles = BTreeMap<String, Profile>;

/// Profile field that `config set` may overwrite
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    /// Base URL
    Url,
    /// Admin key
    AdminKey,
}

/// Handle on a config file. Holds no profile state between calls.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    path: PathBuf,
}

impl ProfileStore {
    /// Store backed by an explicit file.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `path` when given, otherwise at [`ProfileStore::default_path`].
    pub fn open(path: Option<PathBuf>) -> Result<Self> {
        match path {
            Some(path) => Ok(Self::at(path)),
            None => Ok(Self::at(Self::default_path()?)),
        }
    }

    /// Get the configuration file path: `<home>/.hiarc/config.json`.
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the backing file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read every profile from disk.
    pub fn load(&self) -> Result<Profiles> {
        if !self.exists() {
            return Err(CliError::ConfigMissing(self.path.clone()));
        }

        let contents = fs::read_to_string(&self.path)?;
        let mut profiles: Profiles = serde_json::from_str(&contents)?;
        for (key, profile) in profiles.iter_mut() {
            if profile.name != *key {
                warn!(profile = %key, stored = %profile.name, "Profile name does not match its key");
                profile.name = key.clone();
            }
        }
        Ok(profiles)
    }

    /// Write every profile, creating the parent directory if needed.
    fn save(&self, profiles: &Profiles) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut contents = serde_json::to_string_pretty(profiles)?;
        contents.push('\n');
        fs::write(&self.path, contents)?;
        debug!(path = %self.path.display(), profiles = profiles.len(), "Config written");
        Ok(())
    }

    /// Create the config file holding a single profile.
    ///
    /// Fails if the file already exists.
    pub fn init(&self, name: &str, url: &str, admin_key: &str) -> Result<Profile> {
        if self.exists() {
            return Err(CliError::ConfigExists(self.path.clone()));
        }

        let profile = Profile::new(name, url, admin_key);
        let mut profiles = Profiles::new();
        profiles.insert(name.to_string(), profile.clone());
        self.save(&profiles)?;
        Ok(profile)
    }

    /// Add a profile, or update the URL of an existing one.
    ///
    /// An empty or absent `admin_key` keeps the stored key.
    pub fn add(&self, name: &str, url: &str, admin_key: Option<&str>) -> Result<Profile> {
        let mut profiles = self.load()?;
        let admin_key = admin_key.filter(|key| !key.is_empty());

        let profile = profiles
            .entry(name.to_string())
            .or_insert_with(|| Profile::new(name, "", ""));
        profile.url = url.to_string();
        if let Some(key) = admin_key {
            profile.admin_key = key.to_string();
        }
        let profile = profile.clone();

        self.save(&profiles)?;
        Ok(profile)
    }

    /// Get a single profile.
    pub fn view(&self, name: &str) -> Result<Profile> {
        self.load()?
            .remove(name)
            .ok_or_else(|| CliError::ProfileNotFound(name.to_string()))
    }

    /// Get every profile.
    pub fn view_all(&self) -> Result<Profiles> {
        self.load()
    }

    /// Remove a profile. The file is untouched when the profile is absent.
    pub fn delete(&self, name: &str) -> Result<Profile> {
        let mut profiles = self.load()?;
        let removed = profiles
            .remove(name)
            .ok_or_else(|| CliError::ProfileNotFound(name.to_string()))?;
        self.save(&profiles)?;
        Ok(removed)
    }

    /// Overwrite one field of an existing profile.
    pub fn set(&self, name: &str, field: ProfileField, value: &str) -> Result<Profile> {
        let mut profiles = self.load()?;
        let profile = profiles
            .get_mut(name)
            .ok_or_else(|| CliError::ProfileNotFound(name.to_string()))?;
        match field {
            ProfileField::Url => profile.url = value.to_string(),
            ProfileField::AdminKey => profile.admin_key = value.to_string(),
        }
        let profile = profile.clone();

        self.save(&profiles)?;
        Ok(profile)
    }

    /// Overwrite the URL of an existing profile.
    pub fn set_url(&self, name: &str, url: &str) -> Result<Profile> {
        self.set(name, ProfileField::Url, url)
    }

    /// Overwrite the admin key of an existing profile.
    pub fn set_admin_key(&self, name: &str, admin_key: &str) -> Result<Profile> {
        self.set(name, ProfileField::AdminKey, admin_key)
    }

    /// Find the profile to run a command against.
    ///
    /// An absent `default` profile reads as empty; any other absent
    /// profile is an error.
    pub fn lookup(&self, name: &str) -> Result<Profile> {
        match self.load()?.remove(name) {
            Some(profile) => Ok(profile),
            None if name == DEFAULT_PROFILE => Ok(Profile::new(DEFAULT_PROFILE, "", "")),
            None => Err(CliError::ProfileNotFound(name.to_string())),
        }
    }
}
