use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    apod::{API_KEY_VAR, DEFAULT_ENDPOINT},
    gallery::{INITIAL_DAYS, PAGE_DAYS},
};

pub const APP_NAME: &str = "Spacestagram";
pub const CONFIG_FILE: &str = "config.json";
pub const ENV_FILE: &str = ".env";
pub const STORAGE_FILE: &str = "storage.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub endpoint: String,
    pub initial_days: u32,
    pub page_days: u32,
    /// Relative paths resolve against the config folder.
    pub storage_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            initial_days: INITIAL_DAYS,
            page_days: PAGE_DAYS,
            storage_file: PathBuf::from(STORAGE_FILE),
        }
    }
}

impl Config {
    pub fn storage_path<P: AsRef<Path>>(&self, config_folder: P) -> PathBuf {
        config_folder.as_ref().join(&self.storage_file)
    }
}

pub fn default_folder() -> Option<PathBuf> {
    dirs::config_dir().map(|path| path.join(APP_NAME))
}

/// Loads `config.json` from `config_folder`, writing the defaults on first
/// run, and loads `.env` into the environment when it exists.
pub fn configure<P: AsRef<Path>>(config_folder: P) -> io::Result<Config> {
    let config_folder = config_folder.as_ref();
    fs::create_dir_all(config_folder)?;

    let env_path = config_folder.join(ENV_FILE);
    if env_path.exists() {
        dotenvy::from_path(&env_path).map_err(|err| match err {
            dotenvy::Error::Io(err) => err,
            err => io::Error::new(io::ErrorKind::InvalidData, err),
        })?;
    } else {
        dotenvy::dotenv().ok();
    }

    let config_path = config_folder.join(CONFIG_FILE);
    let config = match fs::read_to_string(&config_path) {
        Ok(content) => serde_json::from_str(&content).map_err(Into::<io::Error>::into)?,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            let config = Config::default();
            let content = serde_json::to_string_pretty(&config).map_err(Into::<io::Error>::into)?;
            fs::write(&config_path, content)?;

            info!(
                path = %config_path.display(),
                "wrote default configuration; set {} in {}",
                API_KEY_VAR,
                env_path.display()
            );

            config
        }
        Err(err) => return Err(err),
    };

    Ok(config)
}
