use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    pub server: ServerSettings,
    #[serde(default)]
    pub backend: BackendSettings,
    #[serde(default)]
    pub telemetry: TelemetrySettings,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Planner sessions and their cookies expire after this much inactivity.
    #[serde(default = "default_session_idle_minutes")]
    pub session_idle_minutes: u64,
}

fn default_session_idle_minutes() -> u64 {
    24 * 60
}

impl ServerSettings {
    pub fn session_idle(&self) -> Duration {
        Duration::from_secs(self.session_idle_minutes.saturating_mul(60))
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct BackendSettings {
    /// Base URL of the itinerary agent; `/chat` is appended.
    #[serde(default = "default_backend_url")]
    pub url: String,
    /// No timeout unless set.
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

fn default_backend_url() -> String {
    "http://localhost:8000".to_string()
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            url: default_backend_url(),
            timeout_seconds: None,
        }
    }
}

impl BackendSettings {
    pub fn chat_url(&self) -> String {
        format!("{}/chat", self.url.trim_end_matches('/'))
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct TelemetrySettings {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// OTLP/gRPC collector; span export is off when unset.
    #[serde(default)]
    pub otlp_endpoint: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            otlp_endpoint: None,
        }
    }
}

/// The trip-planner crate directory, whether started from it or from the workspace root.
pub fn app_directory() -> Result<PathBuf, std::io::Error> {
    let base_path = std::env::current_dir()?;

    if base_path.ends_with("trip-planner") {
        Ok(base_path)
    } else {
        Ok(base_path.join("trip-planner"))
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let app_dir = app_directory().map_err(|e| config::ConfigError::Foreign(Box::new(e)))?;
    let configuration_directory = app_dir.join("config");

    let settings = config::Config::builder()
        .add_source(config::File::from(configuration_directory.join("base.yaml")).required(true))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}
