use crate::error::{ConfigError, EncounterError};
use crate::selector::SelectionPolicy;
use crate::sequence::Countdown;
use crate::session::{self, LoadedEncounter};
use crate::tabular::{self, Row};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const APP_NAME: &str = "encounter-manager";
const CONFIG_NAME: &str = "config";

/// Everything the REPL needs once a session has loaded.
pub struct AppState {
    pub config: AppConfig,
    pub manager: ManagerConfig,
    pub encounter: LoadedEncounter,
}

impl AppState {
    /// Run the load phase. Any error here aborts session start.
    pub fn load(config: AppConfig) -> Result<Self, EncounterError> {
        let manager = ManagerConfig::load(&config.manager_config_path())?;
        let encounter = session::load_encounter(
            &config.encounter_dir(),
            &config.image_dir(),
            config.selection_policy,
        )?;
        Ok(Self {
            config,
            manager,
            encounter,
        })
    }
}

/// Persistent application settings, stored with confy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory searched for `@*.csv` descriptions. None = working directory.
    #[serde(default)]
    pub encounter_directory: Option<String>,
    /// Image directory, relative paths resolve against the encounter directory
    #[serde(default = "default_image_directory")]
    pub image_directory: String,
    #[serde(default)]
    pub selection_policy: SelectionPolicy,
    #[serde(default = "default_manager_config_file")]
    pub manager_config_file: String,
}

fn default_image_directory() -> String {
    "SourceImages".to_string()
}

fn default_manager_config_file() -> String {
    "manager_config.csv".to_string()
}

impl ::std::default::Default for AppConfig {
    fn default() -> Self {
        Self {
            encounter_directory: None,
            image_directory: default_image_directory(),
            selection_policy: SelectionPolicy::default(),
            manager_config_file: default_manager_config_file(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Self {
        confy::load(APP_NAME, CONFIG_NAME).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "failed to load configuration, using defaults");
            Self::default()
        })
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        confy::store(APP_NAME, CONFIG_NAME, self).map_err(ConfigError::Save)
    }

    pub fn file_path() -> Result<PathBuf, ConfigError> {
        Ok(confy::get_configuration_file_path(APP_NAME, CONFIG_NAME)?)
    }

    pub fn encounter_dir(&self) -> PathBuf {
        match &self.encounter_directory {
            Some(dir) => PathBuf::from(dir),
            None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }

    pub fn image_dir(&self) -> PathBuf {
        self.resolve(&self.image_directory)
    }

    pub fn manager_config_path(&self) -> PathBuf {
        self.resolve(&self.manager_config_file)
    }

    fn resolve(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        if path.is_relative() {
            self.encounter_dir().join(path)
        } else {
            path.to_path_buf()
        }
    }
}

/// Window size and turn length, read from `manager_config.csv` rows such as
/// `size_xy,600` / `mins,1` / `secs,30`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManagerConfig {
    pub size_xy: u32,
    pub mins: u32,
    pub secs: u32,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            size_xy: 600,
            mins: 1,
            secs: 30,
        }
    }
}

impl ManagerConfig {
    /// Defaults when the file is absent; keys missing from the file keep their default.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no manager config, using defaults");
            return Ok(Self::default());
        }
        let rows = tabular::read_rows(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let rows: Vec<Row> = rows.into_iter().map(|row| row.fields).collect();
        Self::from_rows(&rows)
    }

    pub fn from_rows(rows: &[Row]) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        for row in rows {
            let key = row.first().map(|k| k.trim()).unwrap_or_default();
            let value = row.get(1).map(|v| v.trim()).unwrap_or_default();
            let slot = match key {
                "size_xy" => &mut config.size_xy,
                "mins" => &mut config.mins,
                "secs" => &mut config.secs,
                other => {
                    tracing::warn!(key = other, "ignoring unknown manager config key");
                    continue;
                }
            };
            *slot = value.parse().map_err(|_| ConfigError::InvalidValue {
                key: key.to_string(),
                value: value.to_string(),
            })?;
        }
        Ok(config)
    }

    pub fn turn_duration(&self) -> Countdown {
        Countdown::new(self.mins, self.secs)
    }
}
