use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use directories::ProjectDirs;
use serde::Deserialize;
use url::Url;

use crate::board::{ProjectBoard, DEFAULT_PROJECT_ID};
use crate::client::{GitHubClient, DEFAULT_API_ENDPOINT};
use crate::error::{Result, SignalError};

pub const DEFAULT_PAGE_SIZE: u32 = 100;
const MAX_PAGE_SIZE: u32 = 100;
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const TOKEN_ENV_VARS: [&str; 2] = ["SIGNALHOUND_GITHUB_TOKEN", "GITHUB_TOKEN"];

#[derive(Deserialize, Default, Debug)]
pub struct Config {
    pub token: Option<String>,
    pub project_id: Option<String>,
    pub api_url: Option<String>,
    pub page_size: Option<u32>,
    pub timeout_secs: Option<u64>,
    pub log_dir: Option<PathBuf>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Config::default());
        }

        let contents =
            std::fs::read_to_string(&config_path).map_err(|e| SignalError::ConfigRead {
                path: config_path.clone(),
                source: e,
            })?;

        toml::from_str(&contents).map_err(|e| SignalError::ConfigParse {
            path: config_path,
            source: e,
        })
    }

    pub fn config_path() -> Result<PathBuf> {
        ProjectDirs::from("", "", "signalhound")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .ok_or(SignalError::NoConfigDir)
    }

    /// GitHub token, with env vars taking precedence over the config file
    pub fn token(&self) -> Option<String> {
        self.token_from(|name| std::env::var(name).ok())
    }

    fn token_from(&self, lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
        TOKEN_ENV_VARS
            .iter()
            .filter_map(|&name| lookup(name))
            .chain(self.token.clone())
            .find(|token| !token.trim().is_empty())
    }

    pub fn project_id(&self) -> &str {
        self.project_id.as_deref().unwrap_or(DEFAULT_PROJECT_ID)
    }

    pub fn api_url(&self) -> Result<Url> {
        let raw = self.api_url.as_deref().unwrap_or(DEFAULT_API_ENDPOINT);
        Url::parse(raw).map_err(|_| SignalError::InvalidUrl(raw.to_string()))
    }

    /// Items requested per page, clamped to what the API accepts
    pub fn page_size(&self) -> u32 {
        self.page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    /// Build the project board. Without a token the board has no client and
    /// every operation reports `ClientUnavailable`.
    pub fn board(&self) -> Result<ProjectBoard> {
        let Some(token) = self.token() else {
            return Ok(ProjectBoard::unauthenticated(self.project_id()));
        };

        let client = GitHubClient::new(self.api_url()?, token, self.timeout())?;
        Ok(ProjectBoard::new(Arc::new(client), self.project_id()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.project_id(), DEFAULT_PROJECT_ID);
        assert_eq!(config.api_url().unwrap().as_str(), DEFAULT_API_ENDPOINT);
        assert_eq!(config.page_size(), 100);
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_parse_file() {
        let config: Config = toml::from_str(
            r#"
token = "ghp_file"
project_id = "PVT_other"
api_url = "https://github.example.com/api/graphql"
page_size = 500
log_dir = "logs"
"#,
        )
        .unwrap();

        assert_eq!(config.project_id(), "PVT_other");
        assert_eq!(config.api_url().unwrap().host_str(), Some("github.example.com"));
        assert_eq!(config.page_size(), 100);
        assert_eq!(config.log_dir, Some(PathBuf::from("logs")));
    }

    #[test]
    fn test_invalid_api_url() {
        let config = Config {
            api_url: Some("not a url".to_string()),
            ..Config::default()
        };
        assert!(matches!(config.api_url(), Err(SignalError::InvalidUrl(_))));
    }

    #[test]
    fn test_token_precedence() {
        let config = Config {
            token: Some("from-file".to_string()),
            ..Config::default()
        };

        let both = |name: &str| match name {
            "SIGNALHOUND_GITHUB_TOKEN" => Some("signalhound".to_string()),
            "GITHUB_TOKEN" => Some("github".to_string()),
            _ => None,
        };
        assert_eq!(config.token_from(both).as_deref(), Some("signalhound"));

        let github_only = |name: &str| (name == "GITHUB_TOKEN").then(|| "github".to_string());
        assert_eq!(config.token_from(github_only).as_deref(), Some("github"));

        assert_eq!(config.token_from(|_| None).as_deref(), Some("from-file"));
    }

    #[test]
    fn test_blank_token_is_ignored() {
        let config = Config {
            token: Some("  ".to_string()),
            ..Config::default()
        };
        let blank_env = |_: &str| Some(String::new());
        assert_eq!(config.token_from(blank_env), None);
    }
}
