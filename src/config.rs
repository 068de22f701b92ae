use serde::Deserialize;
use std::collections::BTreeMap;
use std::env;
use thiserror::Error;

pub const STORY_POINT: &str = "story_point";
const DEFAULT_CUSTOM_FIELDS: &str = r#"{"story_point": "customfield_10016"}"#;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("Invalid {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

/// Logical field name -> Jira custom field id
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct FieldMapping {
    story_point: String,
    #[serde(flatten)]
    others: BTreeMap<String, String>,
}

impl FieldMapping {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(raw).map_err(|e| ConfigError::Invalid {
            key: "JIRA_CUSTOM_FIELDS",
            message: e.to_string(),
        })
    }

    pub fn story_point(&self) -> &str {
        &self.story_point
    }

    /// Every (logical name, field id) pair, story point first
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        std::iter::once((STORY_POINT, self.story_point.as_str()))
            .chain(self.others.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }
}

#[derive(Debug, Clone)]
pub struct JiraConfig {
    pub url: String,
    pub user: String,
    pub token: String,
    pub custom_fields: FieldMapping,
}

#[derive(Debug, Clone)]
pub struct MongoConfig {
    pub uri: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub database: Option<String>,
}

/// Process configuration, loaded once at startup and read-only afterwards.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub jira: JiraConfig,
    pub mongo: MongoConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok().filter(|v| !v.trim().is_empty()))
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| lookup(key).ok_or(ConfigError::Missing(key));

        let port = match lookup("PORT") {
            Some(raw) => raw.parse().map_err(|e: std::num::ParseIntError| ConfigError::Invalid {
                key: "PORT",
                message: e.to_string(),
            })?,
            None => 80,
        };

        let custom_fields = match lookup("JIRA_CUSTOM_FIELDS") {
            Some(raw) => FieldMapping::from_json(&raw)?,
            None => {
                log::warn!("JIRA_CUSTOM_FIELDS not set, using default: {}", DEFAULT_CUSTOM_FIELDS);
                FieldMapping::from_json(DEFAULT_CUSTOM_FIELDS)?
            }
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            jira: JiraConfig {
                url: required("JIRA_URL")?.trim_end_matches('/').to_string(),
                user: required("JIRA_USER")?,
                token: required("JIRA_TOKEN")?,
                custom_fields,
            },
            mongo: MongoConfig {
                uri: required("MONGO_URI")?,
                username: lookup("MONGO_USERNAME"),
                password: lookup("MONGO_PASSWORD"),
                database: lookup("MONGO_DATABASE"),
            },
        })
    }
}
