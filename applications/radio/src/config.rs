//! Radio configuration
use crate::error::{RadioError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use yurt_catalog_client::{CatalogClient, CatalogConfig};
use yurt_playback::{KeyBindings, SessionConfig};

/// Read from the working directory when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "yurt-radio.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RadioConfig {
    #[serde(default = "default_catalog")]
    pub catalog: CatalogSettings,

    #[serde(default = "default_session")]
    pub session: SessionSettings,

    #[serde(default = "default_keys")]
    pub keys: KeySettings,

    #[serde(default = "default_engine")]
    pub engine: EngineSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionSettings {
    #[serde(default = "default_initial_volume")]
    pub initial_volume: u8,

    #[serde(default = "default_status_clear_secs")]
    pub status_clear_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct KeySettings {
    #[serde(default = "default_toggle_key")]
    pub toggle: String,

    #[serde(default = "default_advance_key")]
    pub advance: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EngineSettings {
    /// Clock resolution of the headless engine
    #[serde(default = "default_tick_millis")]
    pub tick_millis: u64,

    /// How long a track of unknown duration plays before advancing
    ///
    /// 0 plays it until the next command.
    #[serde(default = "default_fallback_track_secs")]
    pub fallback_track_secs: u64,
}

impl RadioConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; otherwise [`DEFAULT_CONFIG_FILE`] is
    /// read if present. Variables like `YURT_CATALOG__BASE_URL` override
    /// file values.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with(path, environment())
    }

    fn load_with(path: Option<&Path>, env: config::Environment) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(env);

        let config = settings
            .build()
            .map_err(|e| RadioError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| RadioError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.session.initial_volume > 100 {
            return Err(RadioError::Config(format!(
                "initial_volume must be 0-100, got {}",
                self.session.initial_volume
            )));
        }

        if self.engine.tick_millis == 0 {
            return Err(RadioError::Config(
                "engine tick_millis must be greater than zero".to_string(),
            ));
        }

        let bindings = self.key_bindings()?;
        if bindings.toggle.eq_ignore_ascii_case(&bindings.advance) {
            return Err(RadioError::Config(format!(
                "toggle and advance keys are both bound to {:?}",
                bindings.toggle
            )));
        }

        Ok(())
    }

    pub fn catalog_config(&self) -> CatalogConfig {
        CatalogConfig::new(&self.catalog.base_url).with_timeouts(
            Duration::from_secs(self.catalog.timeout_secs),
            Duration::from_secs(self.catalog.connect_timeout_secs),
        )
    }

    /// Build the HTTP catalog client
    pub fn catalog_client(&self) -> Result<CatalogClient> {
        Ok(CatalogClient::new(self.catalog_config())?)
    }

    pub fn session_config(&self) -> Result<SessionConfig> {
        Ok(SessionConfig {
            initial_volume: self.session.initial_volume.min(100),
            status_clear_delay: Duration::from_secs(self.session.status_clear_secs),
            bindings: self.key_bindings()?,
        })
    }

    pub fn key_bindings(&self) -> Result<KeyBindings> {
        Ok(KeyBindings {
            toggle: single_key("toggle", &self.keys.toggle)?,
            advance: single_key("advance", &self.keys.advance)?,
        })
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.engine.tick_millis)
    }

    /// Play length for tracks without a known duration
    pub fn fallback_track_length(&self) -> Option<Duration> {
        match self.engine.fallback_track_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}

/// `YURT_` prefixed variables, `__` between section and key
fn environment() -> config::Environment {
    config::Environment::with_prefix("YURT")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

fn single_key(name: &str, value: &str) -> Result<char> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(key), None) => Ok(key),
        _ => Err(RadioError::Config(format!(
            "{} key must be a single character, got {:?}",
            name, value
        ))),
    }
}

// Default values
fn default_catalog() -> CatalogSettings {
    CatalogSettings {
        base_url: default_base_url(),
        timeout_secs: default_timeout_secs(),
        connect_timeout_secs: default_connect_timeout_secs(),
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000/api".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_connect_timeout_secs() -> u64 {
    5
}

fn default_session() -> SessionSettings {
    SessionSettings {
        initial_volume: default_initial_volume(),
        status_clear_secs: default_status_clear_secs(),
    }
}

fn default_initial_volume() -> u8 {
    80
}

fn default_status_clear_secs() -> u64 {
    3
}

fn default_keys() -> KeySettings {
    KeySettings {
        toggle: default_toggle_key(),
        advance: default_advance_key(),
    }
}

fn default_toggle_key() -> String {
    " ".to_string()
}

fn default_advance_key() -> String {
    "n".to_string()
}

fn default_engine() -> EngineSettings {
    EngineSettings {
        tick_millis: default_tick_millis(),
        fallback_track_secs: default_fallback_track_secs(),
    }
}

fn default_tick_millis() -> u64 {
    250
}

fn default_fallback_track_secs() -> u64 {
    300
}

impl Default for RadioConfig {
    fn default() -> Self {
        Self {
            catalog: default_catalog(),
            session: default_session(),
            keys: default_keys(),
            engine: default_engine(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    /// Environment source that ignores the real process environment
    fn env_from(vars: &[(&str, &str)]) -> config::Environment {
        let mut map = config::Map::new();
        for (key, value) in vars {
            map.insert((*key).to_string(), (*value).to_string());
        }
        environment().source(Some(map))
    }

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = RadioConfig::default();

        assert_eq!(config.catalog.base_url, "http://127.0.0.1:5000/api");
        assert_eq!(config.catalog.timeout_secs, 10);
        assert_eq!(config.session.initial_volume, 80);
        assert_eq!(config.tick(), Duration::from_millis(250));
        assert_eq!(config.fallback_track_length(), Some(Duration::from_secs(300)));
        assert!(config.validate().is_ok());

        let session = config.session_config().unwrap();
        assert_eq!(session, SessionConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let file = write_config(
            r#"
[catalog]
base_url = "http://radio.local:8080/api"
timeout_secs = 4

[session]
initial_volume = 35

[keys]
advance = "s"
"#,
        );

        let config = RadioConfig::load_with(Some(file.path()), env_from(&[])).unwrap();

        assert_eq!(config.catalog.base_url, "http://radio.local:8080/api");
        assert_eq!(config.catalog.timeout_secs, 4);
        assert_eq!(config.catalog.connect_timeout_secs, 5);
        assert_eq!(config.session.initial_volume, 35);
        assert_eq!(config.session.status_clear_secs, 3);
        assert_eq!(config.key_bindings().unwrap().advance, 's');
        assert_eq!(config.key_bindings().unwrap().toggle, ' ');
    }

    #[test]
    fn test_environment_overrides_file() {
        let file = write_config("[session]\ninitial_volume = 35\n");

        let config = RadioConfig::load_with(
            Some(file.path()),
            env_from(&[
                ("YURT_SESSION__INITIAL_VOLUME", "60"),
                ("YURT_CATALOG__BASE_URL", "https://catalog.example/api"),
            ]),
        )
        .unwrap();

        assert_eq!(config.session.initial_volume, 60);
        assert_eq!(config.catalog.base_url, "https://catalog.example/api");
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let result = RadioConfig::load_with(
            Some(Path::new("/nonexistent/yurt-radio.toml")),
            env_from(&[]),
        );

        assert!(matches!(result, Err(RadioError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_loud_volume() {
        let mut config = RadioConfig::default();
        config.session.initial_volume = 101;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_fallback_disables_cap() {
        let file = write_config("[engine]\nfallback_track_secs = 0\n");

        let config = RadioConfig::load_with(Some(file.path()), env_from(&[])).unwrap();

        assert_eq!(config.fallback_track_length(), None);
        assert_eq!(config.engine.tick_millis, 250);
    }

    #[test]
    fn test_validate_rejects_zero_tick() {
        let mut config = RadioConfig::default();
        config.engine.tick_millis = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_keys() {
        let mut config = RadioConfig::default();
        config.keys.toggle = "space".to_string();
        assert!(config.validate().is_err());

        config.keys.toggle = String::new();
        assert!(config.validate().is_err());

        config.keys.toggle = "N".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_catalog_config_uses_timeouts() {
        let mut config = RadioConfig::default();
        config.catalog.timeout_secs = 2;

        let catalog = config.catalog_config();
        assert_eq!(catalog.timeout, Duration::from_secs(2));
        assert_eq!(catalog.connect_timeout, Duration::from_secs(5));
        assert!(config.catalog_client().is_ok());
    }

    #[test]
    fn test_invalid_url_surfaces_as_catalog_error() {
        let mut config = RadioConfig::default();
        config.catalog.base_url = "radio.local".to_string();

        assert!(matches!(
            config.catalog_client(),
            Err(RadioError::Catalog(_))
        ));
    }
}
