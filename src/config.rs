//! Server configuration loaded from the environment.

use std::path::PathBuf;
use thiserror::Error;

use crate::form::fields::{ADDRESS1, BRANCH_ADDRESS, CLIENT_NAME, CUSTOMER_NAME, EMAIL, MOBILE};
use crate::form::{FieldValues, ProfileName};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_OUTPUT_FILE: &str = "Form_A_Mediation_Replica.docx";

/// Environment variable to placeholder name.
const FIELD_VARS: [(&str, &str); 6] = [
    ("FORM_CLIENT_NAME", CLIENT_NAME),
    ("FORM_BRANCH_ADDRESS", BRANCH_ADDRESS),
    ("FORM_MOBILE", MOBILE),
    ("FORM_CUSTOMER_NAME", CUSTOMER_NAME),
    ("FORM_ADDRESS1", ADDRESS1),
    ("FORM_EMAIL", EMAIL),
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid PORT '{0}': expected a number between 1 and 65535")]
    InvalidPort(String),
    #[error("invalid FORM_PROFILE: {0}")]
    InvalidProfile(String),
    #[error("FORM_OUTPUT_FILE '{0}' is not a usable file name")]
    InvalidOutputFile(String),
    #[error("cannot determine working directory: {0}")]
    WorkingDir(#[source] std::io::Error),
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub output_dir: PathBuf,
    pub output_file: String,
    pub profile: ProfileName,
    /// Values rendered into every generated form.
    pub fields: FieldValues,
    /// Empty allows any origin.
    pub allowed_origins: Vec<String>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match lookup("PORT") {
            Some(raw) => match raw.trim().parse::<u16>() {
                Ok(port) if port > 0 => port,
                _ => return Err(ConfigError::InvalidPort(raw)),
            },
            None => DEFAULT_PORT,
        };

        let output_dir = match lookup("FORM_OUTPUT_DIR") {
            Some(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
            _ => std::env::current_dir().map_err(ConfigError::WorkingDir)?,
        };

        let output_file = match lookup("FORM_OUTPUT_FILE") {
            Some(raw) => {
                let cleaned = sanitize_filename::sanitize(raw.trim());
                if cleaned.is_empty() {
                    return Err(ConfigError::InvalidOutputFile(raw));
                }
                cleaned
            }
            None => DEFAULT_OUTPUT_FILE.to_string(),
        };

        let profile = match lookup("FORM_PROFILE") {
            Some(raw) => raw.parse().map_err(ConfigError::InvalidProfile)?,
            None => ProfileName::default(),
        };

        let mut fields = FieldValues::with_defaults();
        for (var, field) in FIELD_VARS {
            if let Some(value) = lookup(var) {
                fields.insert(field, value);
            }
        }

        let allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            host,
            port,
            output_dir,
            output_file,
            profile,
            fields,
            allowed_origins,
        })
    }

    /// Full path of the generated document.
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.output_file)
    }
}
