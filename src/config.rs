use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_refresh")]
    pub refresh_interval_secs: u64,
    #[serde(default = "default_theme")]
    pub theme: String,
}

fn default_base_url() -> String {
    "http://localhost:8080/api".to_string()
}

fn default_refresh() -> u64 {
    300
}

fn default_theme() -> String {
    "lizard".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            refresh_interval_secs: default_refresh(),
            theme: default_theme(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let contents = fs::read_to_string(&path)?;
            let mut cfg: Config = serde_yaml::from_str(&contents)?;
            cfg.sanitize();
            Ok(cfg)
        } else {
            let cfg = Config::default();
            cfg.save()?;
            Ok(cfg)
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        fs::write(&path, yaml)?;
        Ok(())
    }

    // Sub-30s intervals would hammer the backend for no benefit.
    fn sanitize(&mut self) {
        if self.refresh_interval_secs < 30 {
            self.refresh_interval_secs = 30;
        }
    }

    fn config_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("lizard");
        path.push("config.yaml");
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let cfg: Config = serde_yaml::from_str("theme: midnight\n").unwrap();
        assert_eq!(cfg.theme, "midnight");
        assert_eq!(cfg.base_url, "http://localhost:8080/api");
        assert_eq!(cfg.refresh_interval_secs, 300);
    }

    #[test]
    fn tiny_refresh_interval_is_clamped() {
        let mut cfg: Config = serde_yaml::from_str("refresh_interval_secs: 5\n").unwrap();
        cfg.sanitize();
        assert_eq!(cfg.refresh_interval_secs, 30);
    }

    #[test]
    fn sane_refresh_interval_is_kept() {
        let mut cfg: Config = serde_yaml::from_str("refresh_interval_secs: 120\n").unwrap();
        cfg.sanitize();
        assert_eq!(cfg.refresh_interval_secs, 120);
    }
}
