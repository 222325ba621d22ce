use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub provider: ProviderConfig,
    pub connectivity: ConnectivityConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// OpenAI-compatible chat completion provider (DeepSeek by default)
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    /// TCP connect timeout in seconds (default: 10)
    #[serde(deserialize_with = "deserialize_duration_secs")]
    pub connect_timeout_secs: u64,
    /// Time allowed until response headers arrive (default: 60).
    /// The streamed body itself is not bounded.
    #[serde(deserialize_with = "deserialize_duration_secs")]
    pub response_timeout_secs: u64,
}

/// Reachability probe run before YouTube generation
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ConnectivityConfig {
    pub enabled: bool,
    pub probe_url: String,
    /// Probe abort timeout in seconds (default: 5)
    #[serde(deserialize_with = "deserialize_duration_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<String>,
}

impl Config {
    /// Load configuration with environment variable override support
    ///
    /// Loading order:
    /// 1. Load from the explicit path, or the first config.toml found
    /// 2. Override with environment variables (prefixed with APP_)
    /// 3. Validate the final configuration
    pub fn load(explicit_path: Option<&Path>) -> Result<Self, anyhow::Error> {
        // 1. Load from config file
        let mut config = match explicit_path {
            Some(path) => Self::from_toml(path)?,
            None => match Self::find_config_file() {
                Some(path) => Self::from_toml(Path::new(&path))?,
                None => {
                    tracing::warn!("Configuration file not found, using defaults");
                    Config::default()
                },
            },
        };

        // 2. Override with environment variables
        config.apply_env_overrides(|key| std::env::var(key).ok());

        // 3. Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - APP_SERVER_HOST: Server host (default: 0.0.0.0)
    /// - APP_SERVER_PORT: Server port (default: 8080)
    /// - APP_PROVIDER_BASE_URL / DEEPSEEK_BASE_URL: Provider base URL
    /// - APP_PROVIDER_API_KEY / DEEPSEEK_API_KEY: Provider API key
    /// - APP_PROVIDER_MODEL: Model name (default: deepseek-chat)
    /// - APP_PROVIDER_CONNECT_TIMEOUT: Connect timeout (accepts "10s", "1m")
    /// - APP_PROVIDER_RESPONSE_TIMEOUT: Time to response headers (accepts "60s", "2m")
    /// - APP_CONNECTIVITY_ENABLED: Enable/disable the connectivity probe (true/false)
    /// - APP_CONNECTIVITY_PROBE_URL: URL fetched by the probe
    /// - APP_CONNECTIVITY_TIMEOUT: Probe timeout (accepts "5s")
    /// - APP_LOG_LEVEL: Logging level (e.g., "info,likhni=debug")
    fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(host) = lookup("APP_SERVER_HOST") {
            self.server.host = host;
            tracing::info!("Override server.host from env: {}", self.server.host);
        }

        if let Some(port) = lookup("APP_SERVER_PORT")
            && let Ok(port) = port.parse()
        {
            self.server.port = port;
            tracing::info!("Override server.port from env: {}", self.server.port);
        }

        if let Some(base_url) = lookup("APP_PROVIDER_BASE_URL").or_else(|| lookup("DEEPSEEK_BASE_URL"))
        {
            self.provider.base_url = base_url;
            tracing::info!("Override provider.base_url from env: {}", self.provider.base_url);
        }

        if let Some(api_key) = lookup("APP_PROVIDER_API_KEY").or_else(|| lookup("DEEPSEEK_API_KEY")) {
            self.provider.api_key = api_key;
            tracing::info!("Override provider.api_key from env");
        }

        if let Some(model) = lookup("APP_PROVIDER_MODEL") {
            self.provider.model = model;
            tracing::info!("Override provider.model from env: {}", self.provider.model);
        }

        for (key, target) in [
            ("APP_PROVIDER_CONNECT_TIMEOUT", &mut self.provider.connect_timeout_secs),
            ("APP_PROVIDER_RESPONSE_TIMEOUT", &mut self.provider.response_timeout_secs),
            ("APP_CONNECTIVITY_TIMEOUT", &mut self.connectivity.timeout_secs),
        ] {
            if let Some(raw) = lookup(key) {
                match parse_duration_to_secs(&raw) {
                    Ok(val) => {
                        *target = val;
                        tracing::info!("Override {} from env: {}s", key, val);
                    },
                    Err(e) => tracing::warn!("Invalid {} '{}': {} (keep {}s)", key, raw, e, target),
                }
            }
        }

        if let Some(enabled) = lookup("APP_CONNECTIVITY_ENABLED")
            && let Ok(val) = enabled.parse()
        {
            self.connectivity.enabled = val;
            tracing::info!("Override connectivity.enabled from env: {}", self.connectivity.enabled);
        }

        if let Some(url) = lookup("APP_CONNECTIVITY_PROBE_URL") {
            self.connectivity.probe_url = url;
            tracing::info!(
                "Override connectivity.probe_url from env: {}",
                self.connectivity.probe_url
            );
        }

        if let Some(level) = lookup("APP_LOG_LEVEL") {
            self.logging.level = level;
            tracing::info!("Override logging.level from env: {}", self.logging.level);
        }
    }

    /// Validate configuration
    fn validate(&self) -> Result<(), anyhow::Error> {
        if self.server.port == 0 {
            anyhow::bail!("Server port cannot be 0");
        }

        // The provider is required process-wide, fail before accepting traffic
        if self.provider.base_url.trim().is_empty() {
            anyhow::bail!(
                "provider.base_url is not set (config.toml, APP_PROVIDER_BASE_URL or DEEPSEEK_BASE_URL)"
            );
        }
        if self.provider.api_key.trim().is_empty() {
            anyhow::bail!(
                "provider.api_key is not set (config.toml, APP_PROVIDER_API_KEY or DEEPSEEK_API_KEY)"
            );
        }
        if self.provider.model.trim().is_empty() {
            anyhow::bail!("provider.model cannot be empty");
        }
        if self.provider.connect_timeout_secs == 0 || self.provider.response_timeout_secs == 0 {
            anyhow::bail!("provider timeouts must be > 0");
        }

        if self.connectivity.enabled {
            if self.connectivity.probe_url.is_empty() {
                anyhow::bail!("connectivity.probe_url cannot be empty when the probe is enabled");
            }
            if self.connectivity.timeout_secs == 0 {
                anyhow::bail!("connectivity.timeout_secs must be > 0");
            }
        }

        Ok(())
    }

    fn find_config_file() -> Option<String> {
        let possible_paths =
            ["conf/config.toml", "config.toml", "./conf/config.toml", "./config.toml"];

        for path in &possible_paths {
            if Path::new(path).exists() {
                return Some(path.to_string());
            }
        }
        None
    }

    fn from_toml(path: &Path) -> Result<Self, anyhow::Error> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "0.0.0.0".to_string(), port: 8080 }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: String::new(),
            model: "deepseek-chat".to_string(),
            connect_timeout_secs: 10,
            response_timeout_secs: 60,
        }
    }
}

impl Default for ConnectivityConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            probe_url: "https://www.google.com/favicon.ico".to_string(),
            timeout_secs: 5,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info,likhni=debug".to_string(), file: Some("logs/likhni.log".to_string()) }
    }
}

// =========================
// Helpers for parsing values
// =========================

fn parse_duration_to_secs(input: &str) -> Result<u64, String> {
    // Accept plain numbers (treated as seconds)
    if let Ok(val) = input.parse::<u64>() {
        return Ok(val);
    }

    let s = input.trim().to_lowercase();
    let (num_str, unit) = s.split_at(s.chars().take_while(|c| c.is_ascii_digit()).count());
    if num_str.is_empty() || unit.is_empty() {
        return Err("missing number or unit".into());
    }
    let n: u64 = num_str.parse().map_err(|_| "invalid number".to_string())?;
    match unit {
        "s" | "sec" | "secs" | "second" | "seconds" => Ok(n),
        "m" | "min" | "mins" | "minute" | "minutes" => Ok(n * 60),
        "h" | "hr" | "hour" | "hours" => Ok(n * 60 * 60),
        _ => Err(format!("unsupported unit: {}", unit)),
    }
}

// Custom serde deserializer to support numeric or human-friendly string values
fn deserialize_duration_secs<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    struct Visitor;
    impl<'de> serde::de::Visitor<'de> for Visitor {
        type Value = u64;
        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(f, "a number of seconds or a string like '30s', '5m', '1h'")
        }
        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E> {
            Ok(v)
        }
        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            if v >= 0 { Ok(v as u64) } else { Err(E::custom("negative not allowed")) }
        }
        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            parse_duration_to_secs(v).map_err(E::custom)
        }
        fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            parse_duration_to_secs(&v).map_err(E::custom)
        }
    }
    deserializer.deserialize_any(Visitor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn valid_config() -> Config {
        let mut config = Config::default();
        config.provider.base_url = "https://api.deepseek.com".to_string();
        config.provider.api_key = "sk-test".to_string();
        config
    }

    #[test]
    fn test_parse_duration_to_secs() {
        assert_eq!(parse_duration_to_secs("30"), Ok(30));
        assert_eq!(parse_duration_to_secs("5s"), Ok(5));
        assert_eq!(parse_duration_to_secs("2m"), Ok(120));
        assert_eq!(parse_duration_to_secs("1h"), Ok(3600));
        assert!(parse_duration_to_secs("s").is_err());
        assert!(parse_duration_to_secs("10x").is_err());
    }

    #[test]
    fn test_from_toml_accepts_human_durations() {
        let config: Config = toml::from_str(
            r#"
            [server]
            port = 3000

            [provider]
            base_url = "https://api.deepseek.com"
            api_key = "sk-test"
            response_timeout_secs = "2m"

            [connectivity]
            enabled = false
            timeout_secs = 3
            "#,
        )
        .expect("config should parse");

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.provider.model, "deepseek-chat");
        assert_eq!(config.provider.response_timeout_secs, 120);
        assert_eq!(config.provider.connect_timeout_secs, 10);
        assert!(!config.connectivity.enabled);
        assert_eq!(config.connectivity.timeout_secs, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_requires_provider_credentials() {
        let mut config = valid_config();
        config.provider.api_key.clear();
        assert!(config.validate().is_err());

        let mut config = valid_config();
        config.provider.base_url = "  ".to_string();
        assert!(config.validate().is_err());

        assert!(Config::default().validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_values() {
        let mut config = valid_config();
        config.server.port = 0;
        assert!(config.validate().is_err());

        let mut config = valid_config();
        config.provider.response_timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = valid_config();
        config.connectivity.timeout_secs = 0;
        assert!(config.validate().is_err());

        // A disabled probe does not need a timeout
        config.connectivity.enabled = false;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("APP_SERVER_PORT", "9090"),
            ("DEEPSEEK_BASE_URL", "https://fallback.example"),
            ("APP_PROVIDER_API_KEY", "sk-env"),
            ("DEEPSEEK_API_KEY", "sk-ignored"),
            ("APP_PROVIDER_RESPONSE_TIMEOUT", "90s"),
            ("APP_CONNECTIVITY_TIMEOUT", "bogus"),
            ("APP_CONNECTIVITY_ENABLED", "false"),
        ]);
        let mut config = Config::default();
        config.apply_env_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.server.port, 9090);
        assert_eq!(config.provider.base_url, "https://fallback.example");
        assert_eq!(config.provider.api_key, "sk-env");
        assert_eq!(config.provider.response_timeout_secs, 90);
        // Invalid values keep the previous setting
        assert_eq!(config.connectivity.timeout_secs, 5);
        assert!(!config.connectivity.enabled);
        assert!(config.validate().is_ok());
    }
}
