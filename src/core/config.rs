use crate::errors::{PageError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Environment variable naming the device farm the suite runs against.
pub const DEVICE_CLOUD_ENV: &str = "DEVICE_CLOUD";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub execution: ExecutionConfig,
    pub timeouts: TimeoutConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionConfig {
    pub mode: ExecutionMode,
    pub device_cloud: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionMode {
    /// Emulator or device attached to the machine running the suite.
    Local,
    /// Hosted device farm.
    Remote,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    pub local_presence_secs: u64,
    pub remote_presence_secs: u64,
    pub default_presence_secs: u64,
    pub connection_secs: u64,
    pub poll_interval_ms: u64,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            mode: ExecutionMode::Remote,
            device_cloud: None,
        }
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            local_presence_secs: 50,
            remote_presence_secs: 10,
            default_presence_secs: 20,
            connection_secs: 300,
            poll_interval_ms: 500,
        }
    }
}

impl ExecutionMode {
    /// A device cloud name containing "Local" means a local run.
    pub fn from_device_cloud(value: &str) -> Self {
        if value.contains("Local") {
            ExecutionMode::Local
        } else {
            ExecutionMode::Remote
        }
    }
}

impl std::str::FromStr for ExecutionMode {
    type Err = PageError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "local" => Ok(ExecutionMode::Local),
            "remote" => Ok(ExecutionMode::Remote),
            other => Err(PageError::Configuration(format!(
                "unknown execution mode '{}'",
                other
            ))),
        }
    }
}

impl Config {
    pub fn with_mode(mode: ExecutionMode) -> Self {
        let mut config = Self::default();
        config.execution.mode = mode;
        config
    }

    /// Defaults, with the execution mode taken from `DEVICE_CLOUD` when set.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_device_cloud(std::env::var(DEVICE_CLOUD_ENV).ok());
        config.validate()?;
        Ok(config)
    }

    /// Loads a JSON config file. Missing fields fall back to defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn apply_device_cloud(&mut self, device_cloud: Option<String>) {
        if let Some(cloud) = device_cloud {
            self.execution.mode = ExecutionMode::from_device_cloud(&cloud);
            self.execution.device_cloud = Some(cloud);
        }
    }

    pub fn validate(&self) -> Result<()> {
        let t = &self.timeouts;
        let fields = [
            ("local_presence_secs", t.local_presence_secs),
            ("remote_presence_secs", t.remote_presence_secs),
            ("default_presence_secs", t.default_presence_secs),
            ("connection_secs", t.connection_secs),
            ("poll_interval_ms", t.poll_interval_ms),
        ];
        for (name, value) in fields {
            if value == 0 {
                return Err(PageError::Configuration(format!(
                    "{} must be greater than zero",
                    name
                )));
            }
        }
        Ok(())
    }

    /// Presence timeout for screens that are slow to render on local devices.
    pub fn presence_timeout(&self) -> Duration {
        match self.execution.mode {
            ExecutionMode::Local => Duration::from_secs(self.timeouts.local_presence_secs),
            ExecutionMode::Remote => Duration::from_secs(self.timeouts.remote_presence_secs),
        }
    }

    pub fn default_presence_timeout(&self) -> Duration {
        Duration::from_secs(self.timeouts.default_presence_secs)
    }

    pub fn connection_timeout(&self) -> Duration {
        Duration::from_secs(self.timeouts.connection_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.timeouts.poll_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_mode_gets_longer_presence_timeout() {
        let local = Config::with_mode(ExecutionMode::Local);
        let remote = Config::with_mode(ExecutionMode::Remote);
        assert_eq!(local.presence_timeout(), Duration::from_secs(50));
        assert_eq!(remote.presence_timeout(), Duration::from_secs(10));
        assert_eq!(remote.connection_timeout(), Duration::from_secs(300));
    }

    #[test]
    fn device_cloud_selects_mode() {
        let mut config = Config::default();
        config.apply_device_cloud(Some("LocalAndroid".to_string()));
        assert_eq!(config.execution.mode, ExecutionMode::Local);

        config.apply_device_cloud(Some("SauceLabs".to_string()));
        assert_eq!(config.execution.mode, ExecutionMode::Remote);
        assert_eq!(config.execution.device_cloud.as_deref(), Some("SauceLabs"));

        // Unset leaves the current mode alone
        config.apply_device_cloud(None);
        assert_eq!(config.execution.mode, ExecutionMode::Remote);
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"execution":{"mode":"local"},"timeouts":{"connection_secs":5}}"#)
                .unwrap();
        assert_eq!(config.execution.mode, ExecutionMode::Local);
        assert_eq!(config.connection_timeout(), Duration::from_secs(5));
        assert_eq!(config.poll_interval(), Duration::from_millis(500));
    }

    #[test]
    fn load_reads_file_and_validates() {
        let dir = std::env::temp_dir().join(format!("wallet-pages-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();

        let good = dir.join("good.json");
        std::fs::write(&good, r#"{"timeouts":{"remote_presence_secs":3}}"#).unwrap();
        let config = Config::load(&good).unwrap();
        assert_eq!(config.presence_timeout(), Duration::from_secs(3));

        let bad = dir.join("bad.json");
        std::fs::write(&bad, r#"{"timeouts":{"poll_interval_ms":0}}"#).unwrap();
        assert!(matches!(
            Config::load(&bad),
            Err(PageError::Configuration(_))
        ));

        assert!(matches!(
            Config::load(dir.join("missing.json")),
            Err(PageError::Io(_))
        ));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn parses_mode_names() {
        assert_eq!("Local".parse::<ExecutionMode>().unwrap(), ExecutionMode::Local);
        assert!("cloud".parse::<ExecutionMode>().is_err());
    }
}
