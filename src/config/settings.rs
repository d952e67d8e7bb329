//! Application settings and configuration management

use crate::error::{AppError, Result};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    pub amap: AmapConfig,
    pub weather: WeatherConfig,
    pub assistant: AssistantConfig,
    #[serde(default)]
    pub saved: SavedConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// `json` or `pretty`
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

/// CORS configuration. An empty origin list allows any origin.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// Map and directions service
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AmapConfig {
    #[serde(default = "default_amap_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub key: Option<String>,
    /// Environment variable holding the key when `key` is unset
    #[serde(default = "default_amap_key_env")]
    pub key_env: String,
    #[serde(default = "default_timeout")]
    pub timeout_ms: u64,
    #[serde(default = "default_driving_strategy")]
    pub driving_strategy: u32,
    /// Upper bound for one travel mode, geocoding included
    #[serde(default = "default_route_timeout")]
    pub route_timeout_ms: u64,
    /// `jscode` added to every request relayed by the map service proxy
    #[serde(default)]
    pub js_security_key: Option<String>,
    #[serde(default = "default_amap_js_key_env")]
    pub js_security_key_env: String,
    /// Custom map style service, relayed for `v4/map/styles`
    #[serde(default = "default_amap_styles_url")]
    pub styles_base_url: String,
    /// Overseas vector map service, relayed for `v3/vectormap`
    #[serde(default = "default_amap_vectormap_url")]
    pub vectormap_base_url: String,
}

fn default_amap_base_url() -> String {
    "https://restapi.amap.com".to_string()
}

fn default_amap_key_env() -> String {
    "AMAP_BACKEND_KEY".to_string()
}

fn default_amap_js_key_env() -> String {
    "AMAP_JS_SECURITY_KEY".to_string()
}

fn default_amap_styles_url() -> String {
    "https://webapi.amap.com".to_string()
}

fn default_amap_vectormap_url() -> String {
    "https://fmap01.amap.com".to_string()
}

fn default_timeout() -> u64 {
    10000
}

fn default_driving_strategy() -> u32 {
    10
}

fn default_route_timeout() -> u64 {
    30000
}

impl AmapConfig {
    pub fn resolve_key(&self) -> Option<String> {
        resolve_secret(self.key.as_ref(), Some(&self.key_env))
    }

    pub fn resolve_js_security_key(&self) -> Option<String> {
        resolve_secret(self.js_security_key.as_ref(), Some(&self.js_security_key_env))
    }
}

/// Weather forecast service
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WeatherConfig {
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_weather_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_timeout")]
    pub timeout_ms: u64,
    /// Offset of the travellers' local time from UTC
    #[serde(default = "default_utc_offset")]
    pub utc_offset_hours: i32,
}

fn default_weather_base_url() -> String {
    "https://api.tomorrow.io".to_string()
}

fn default_weather_key_env() -> String {
    "TOMORROW_API_KEY".to_string()
}

fn default_utc_offset() -> i32 {
    8
}

impl WeatherConfig {
    pub fn resolve_key(&self) -> Option<String> {
        resolve_secret(self.api_key.as_ref(), Some(&self.api_key_env))
    }
}

/// Chat completion backends used by the travel assistant
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AssistantConfig {
    pub suggest: BackendConfig,
    pub advice: BackendConfig,
}

/// Authentication for a chat backend
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct BackendAuth {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub token_env: Option<String>,
    /// Send the token in this header instead of `Authorization: Bearer`
    #[serde(default)]
    pub header_name: Option<String>,
}

/// OpenAI compatible chat backend
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    pub name: String,
    pub endpoint: String,
    pub model: String,
    #[serde(default)]
    pub auth: BackendAuth,
    #[serde(default = "default_chat_timeout")]
    pub timeout_ms: u64,
}

fn default_chat_timeout() -> u64 {
    60000
}

impl BackendConfig {
    pub fn resolve_token(&self) -> Option<String> {
        resolve_secret(self.auth.api_key.as_ref(), self.auth.token_env.as_ref())
    }
}

/// In-memory saved items
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SavedConfig {
    /// Refuse a spot whose name is already saved
    #[serde(default)]
    pub reject_duplicate_spots: bool,
}

fn resolve_secret(inline: Option<&String>, env_name: Option<&String>) -> Option<String> {
    inline
        .filter(|v| !v.is_empty())
        .cloned()
        .or_else(|| env_name.and_then(|name| std::env::var(name).ok()))
        .filter(|v| !v.is_empty())
}

impl Settings {
    /// Load settings from the default configuration file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path("config/travel.yaml")
    }

    /// Load settings from a YAML or TOML file, then apply `TRAVEL_PLANNER__*` overrides
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let format = if path.extension().map_or(false, |ext| ext == "toml") {
            FileFormat::Toml
        } else {
            FileFormat::Yaml
        };

        let mut builder = Config::builder()
            .set_default("server.host", default_host())?
            .set_default("server.port", i64::from(default_port()))?
            .set_default("logging.level", default_log_level())?
            .set_default("logging.format", default_log_format())?
            .set_default("amap.base_url", default_amap_base_url())?
            .set_default("amap.styles_base_url", default_amap_styles_url())?
            .set_default("amap.vectormap_base_url", default_amap_vectormap_url())?
            .set_default("weather.base_url", default_weather_base_url())?
            .set_default("assistant.suggest.name", "deepseek")?
            .set_default("assistant.suggest.endpoint", "https://api.deepseek.com")?
            .set_default("assistant.suggest.model", "deepseek-chat")?
            .set_default("assistant.suggest.auth.token_env", "DEEPSEEK_API_KEY")?
            .set_default("assistant.advice.name", "moonshot")?
            .set_default("assistant.advice.endpoint", "https://api.moonshot.cn/v1")?
            .set_default("assistant.advice.model", "moonshot-v1-8k")?
            .set_default("assistant.advice.auth.token_env", "MOONSHOT_API_KEY")?;

        if path.exists() {
            builder = builder.add_source(File::from(path).format(format));
        }

        builder = builder.add_source(
            Environment::with_prefix("TRAVEL_PLANNER")
                .separator("__")
                .try_parsing(true),
        );

        let settings: Settings = builder.build()?.try_deserialize()?;
        Ok(settings)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(invalid("Server port cannot be 0"));
        }

        if self.amap.base_url.is_empty() {
            return Err(invalid("amap.base_url cannot be empty"));
        }
        if self.amap.styles_base_url.is_empty() || self.amap.vectormap_base_url.is_empty() {
            return Err(invalid("amap proxy base URLs cannot be empty"));
        }
        if self.amap.timeout_ms == 0 || self.amap.route_timeout_ms == 0 {
            return Err(invalid("amap timeouts must be positive"));
        }

        if self.weather.base_url.is_empty() {
            return Err(invalid("weather.base_url cannot be empty"));
        }
        if self.weather.timeout_ms == 0 {
            return Err(invalid("weather.timeout_ms must be positive"));
        }

        for backend in [&self.assistant.suggest, &self.assistant.advice] {
            if backend.endpoint.is_empty() || backend.model.is_empty() {
                return Err(invalid(&format!(
                    "Assistant backend '{}' needs an endpoint and a model",
                    backend.name
                )));
            }
            if backend.timeout_ms == 0 {
                return Err(invalid(&format!(
                    "Assistant backend '{}' timeout must be positive",
                    backend.name
                )));
            }
        }

        Ok(())
    }
}

fn invalid(message: &str) -> AppError {
    AppError::Config(config::ConfigError::Message(message.to_string()))
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: default_host(),
                port: default_port(),
            },
            logging: LoggingConfig {
                level: default_log_level(),
                format: default_log_format(),
            },
            cors: CorsConfig::default(),
            amap: AmapConfig::default(),
            weather: WeatherConfig::default(),
            assistant: AssistantConfig {
                suggest: BackendConfig {
                    name: "deepseek".to_string(),
                    endpoint: "https://api.deepseek.com".to_string(),
                    model: "deepseek-chat".to_string(),
                    auth: BackendAuth {
                        token_env: Some("DEEPSEEK_API_KEY".to_string()),
                        ..Default::default()
                    },
                    timeout_ms: default_chat_timeout(),
                },
                advice: BackendConfig {
                    name: "moonshot".to_string(),
                    endpoint: "https://api.moonshot.cn/v1".to_string(),
                    model: "moonshot-v1-8k".to_string(),
                    auth: BackendAuth {
                        token_env: Some("MOONSHOT_API_KEY".to_string()),
                        ..Default::default()
                    },
                    timeout_ms: default_chat_timeout(),
                },
            },
            saved: SavedConfig::default(),
        }
    }
}

impl Default for AmapConfig {
    fn default() -> Self {
        Self {
            base_url: default_amap_base_url(),
            key: None,
            key_env: default_amap_key_env(),
            timeout_ms: default_timeout(),
            driving_strategy: default_driving_strategy(),
            route_timeout_ms: default_route_timeout(),
            js_security_key: None,
            js_security_key_env: default_amap_js_key_env(),
            styles_base_url: default_amap_styles_url(),
            vectormap_base_url: default_amap_vectormap_url(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_weather_base_url(),
            api_key: None,
            api_key_env: default_weather_key_env(),
            timeout_ms: default_timeout(),
            utc_offset_hours: default_utc_offset(),
        }
    }
}
