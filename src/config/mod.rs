use log::debug;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::api::types::ResponseType;
use crate::api::{ApiType, ClientConfig};
use crate::error::{CompanyInfoError, Result};

const CONFIG_DIR_NAME: &str = ".company-info";
const CONFIG_FILE_NAME: &str = "config.yaml";

pub const MOF_APPLICATION_ID: &str = "MOF_APPLICATION_ID";
pub const MOF_API_VERSION: &str = "MOF_API_VERSION";
pub const METI_API_TOKEN: &str = "METI_API_TOKEN";
pub const METI_API_VERSION: &str = "METI_API_VERSION";
pub const METI_API_URL: &str = "METI_API_URL";

const DEFAULT_MOF_VERSION: &str = "4";
const DEFAULT_METI_VERSION: &str = "1";

/// File-based settings. Environment variables take precedence.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub mof: MofConfig,
    #[serde(default)]
    pub meti: MetiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct MofConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct MetiConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl Config {
    /// Get the configuration directory path
    pub fn config_path() -> Result<PathBuf> {
        let home_dir = dirs::home_dir().ok_or_else(|| {
            CompanyInfoError::Config("Could not determine home directory".to_string())
        })?;

        Ok(home_dir.join(CONFIG_DIR_NAME))
    }

    /// Get the configuration file full path
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_path()?.join(CONFIG_FILE_NAME))
    }

    /// Load `.env.local`, then `.env`. Variables already set are kept.
    pub fn load_env_files() {
        for file in [".env.local", ".env"] {
            match dotenvy::from_filename(file) {
                Ok(path) => debug!("Loaded environment from {}", path.display()),
                Err(e) if e.not_found() => {}
                Err(e) => debug!("Skipping {}: {}", file, e),
            }
        }
    }

    /// Load the configuration file; a missing file yields defaults
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config file at {}", path.display());
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .map_err(|e| CompanyInfoError::Config(format!("Failed to read config file: {}", e)))?;

        serde_yaml::from_str(&contents)
            .map_err(|e| CompanyInfoError::Config(format!("Failed to parse config file: {}", e)))
    }

    /// Write a default config file if none exists, readable only by the owner
    pub fn initialize() -> Result<PathBuf> {
        let config_file = Self::config_file_path()?;
        Self::initialize_at(&config_file)?;
        Ok(config_file)
    }

    pub fn initialize_at(config_file: &Path) -> Result<()> {
        if let Some(config_dir) = config_file.parent() {
            if !config_dir.exists() {
                fs::create_dir_all(config_dir).map_err(|e| {
                    CompanyInfoError::Config(format!("Failed to create config directory: {}", e))
                })?;

                #[cfg(unix)]
                {
                    use std::os::unix::fs::PermissionsExt;
                    fs::set_permissions(config_dir, fs::Permissions::from_mode(0o700)).map_err(
                        |e| {
                            CompanyInfoError::Config(format!(
                                "Failed to set directory permissions: {}",
                                e
                            ))
                        },
                    )?;
                }
            }
        }

        if config_file.exists() {
            return Ok(());
        }

        let yaml = serde_yaml::to_string(&Self::default())
            .map_err(|e| CompanyInfoError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(config_file, yaml)
            .map_err(|e| CompanyInfoError::Config(format!("Failed to write config file: {}", e)))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(config_file, fs::Permissions::from_mode(0o600)).map_err(|e| {
                CompanyInfoError::Config(format!("Failed to set file permissions: {}", e))
            })?;
        }

        Ok(())
    }

    /// Resolve the client configuration for a backend.
    ///
    /// `format` is the user-facing format name; `None` selects the backend
    /// default (XML for MOF, JSON for gBizINFO).
    pub fn resolve(&self, api_type: ApiType, format: Option<&str>) -> Result<ClientConfig> {
        let response_type = match format {
            Some(format) => ResponseType::for_format(api_type, format)?,
            None => ResponseType::default_for(api_type),
        };

        let config = match api_type {
            ApiType::Mof => {
                let credential = env_or(MOF_APPLICATION_ID, &self.mof.application_id)
                    .ok_or_else(|| missing_credential(MOF_APPLICATION_ID))?;
                let version = env_or(MOF_API_VERSION, &self.mof.version)
                    .unwrap_or_else(|| DEFAULT_MOF_VERSION.to_string());
                ClientConfig::mof(credential, version, response_type)
            }
            ApiType::Meti => {
                let credential = env_or(METI_API_TOKEN, &self.meti.token)
                    .ok_or_else(|| missing_credential(METI_API_TOKEN))?;
                let version = env_or(METI_API_VERSION, &self.meti.version)
                    .unwrap_or_else(|| DEFAULT_METI_VERSION.to_string());
                let base_url = env_or(METI_API_URL, &self.meti.base_url)
                    .unwrap_or_else(|| ApiType::Meti.default_base_url().to_string());
                ClientConfig {
                    version,
                    ..ClientConfig::meti(credential).with_base_url(base_url)
                }
            }
        };

        url::Url::parse(config.base_url()).map_err(|e| {
            CompanyInfoError::Config(format!("Invalid base URL '{}': {}", config.base_url, e))
        })?;

        Ok(config)
    }
}

/// Non-empty environment value, else the file value
fn env_or(key: &str, file_value: &Option<String>) -> Option<String> {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .or_else(|| file_value.clone().filter(|v| !v.trim().is_empty()))
}

fn missing_credential(var: &str) -> CompanyInfoError {
    CompanyInfoError::Config(format!(
        "{} is not set. Add it to .env or .env.local, or to the config file.",
        var
    ))
}
