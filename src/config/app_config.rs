use serde::Deserialize;

use crate::domain::Locale;
use crate::infrastructure::storage::PostgresConfig;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub database: PostgresConfig,
    pub logging: LoggingConfig,
    /// Language of the messages shown to the user
    pub locale: Locale,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `config/default`, `config/local` and
    /// `APP__*` environment variables, later sources winning.
    ///
    /// `DATABASE_URL` is used when no database URL was configured
    /// explicitly.
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let explicit_url = config.get_string("database.url").is_ok();
        let mut app_config: Self = config.try_deserialize()?;

        if !explicit_url {
            if let Ok(url) = std::env::var("DATABASE_URL") {
                app_config.database.url = url;
            }
        }

        Ok(app_config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert_eq!(config.locale, Locale::En);
        assert_eq!(config.database.max_connections, 5);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: AppConfig = serde_json::from_str(
            r#"{"locale": "zh-cn", "logging": {"format": "json"}}"#,
        )
        .unwrap();

        assert_eq!(config.locale, Locale::ZhCn);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.database.url, "postgres://localhost/personplan");
    }

    #[test]
    fn test_built_config_deserializes() {
        let config = config::Config::builder()
            .set_override("database.url", "postgres://db/plan")
            .unwrap()
            .set_override("database.max_connections", 2)
            .unwrap()
            .set_override("locale", "zh")
            .unwrap()
            .build()
            .unwrap();

        let app_config: AppConfig = config.try_deserialize().unwrap();

        assert_eq!(app_config.database.url, "postgres://db/plan");
        assert_eq!(app_config.database.max_connections, 2);
        assert_eq!(app_config.locale, Locale::ZhCn);
    }
}
