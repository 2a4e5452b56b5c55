//! CLI Configuration

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub api_url: Option<String>,
    pub token: Option<String>,
    pub default_format: Option<String>,
}

impl Config {
    pub fn load(profile: Option<&str>) -> Result<Self> {
        Self::load_from(&Self::config_path(profile)?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn save(&self, profile: Option<&str>) -> Result<PathBuf> {
        let path = Self::config_path(profile)?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)
            .with_context(|| format!("writing {}", path.display()))
    }

    /// Set a key by name, as typed on the command line
    pub fn set(&mut self, key: &str, value: String) -> Result<()> {
        match key {
            "api_url" => self.api_url = Some(value),
            "token" => self.token = Some(value),
            "default_format" => self.default_format = Some(value),
            _ => return Err(anyhow!("Unknown config key: {}", key)),
        }
        Ok(())
    }

    /// Display value of a key; tokens are masked
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let value = match key {
            "api_url" => self.api_url.clone(),
            "token" => self.token.as_deref().map(mask),
            "default_format" => self.default_format.clone(),
            _ => return Err(anyhow!("Unknown config key: {}", key)),
        };
        Ok(value)
    }

    pub fn keys() -> [&'static str; 3] {
        ["api_url", "token", "default_format"]
    }

    fn config_path(profile: Option<&str>) -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| anyhow!("Cannot find home directory"))?;
        let filename = match profile {
            Some(p) => format!("config.{}.toml", p),
            None => "config.toml".to_string(),
        };
        Ok(home.join(".campus").join(filename))
    }
}

fn mask(token: &str) -> String {
    let visible: String = token.chars().take(8).collect();
    format!("{}****", visible)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.set("api_url", "https://kampus.example/api".into()).unwrap();
        config.set("token", "abcdefghijkl".into()).unwrap();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.get("token").unwrap().as_deref(), Some("abcdefgh****"));
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn test_unknown_key() {
        let mut config = Config::default();
        assert!(config.set("tenant_id", "x".into()).is_err());
        assert!(config.get("tenant_id").is_err());
    }
}
