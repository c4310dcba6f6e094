use config::{Config, Environment, File, FileFormat};
use log::Level;
use serde::Deserialize;

use crate::error::AppError;

const DEFAULT_CONFIG: &str = include_str!("../../resources/config/default.toml");
const DEFAULT_CONFIG_PREFIX: &str = "APP";

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub isolate_faults: bool,
    pub audit_level: Level,
    pub statsd_enabled: bool,
    pub statsd_host: String,
    pub statsd_port: u16,
}

impl AppConfig {
    pub fn new() -> Result<Self, AppError> {
        let config = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(Environment::with_prefix(DEFAULT_CONFIG_PREFIX))
            .build()?;

        config.try_deserialize().map_err(|e| e.into())
    }
}

#[cfg(test)]
mod tests {
    use log::Level;

    use super::AppConfig;

    #[test]
    fn test_new() {
        let result = AppConfig::new();
        assert!(
            matches!(result, Ok(ref x) if x.isolate_faults && !x.statsd_enabled),
            "By default, it should return a valid config"
        );

        let port = 9125u16;
        temp_env::with_var("APP_STATSD_PORT", Some(port.to_string()), || {
            let result = AppConfig::new();
            assert!(
                matches!(result, Ok(x) if x.statsd_port == port),
                "Should take into account env vars"
            )
        });

        temp_env::with_var("APP_AUDIT_LEVEL", Some("debug"), || {
            let result = AppConfig::new();
            assert!(
                matches!(result, Ok(x) if x.audit_level == Level::Debug),
                "Should parse log levels"
            )
        });

        temp_env::with_var("APP_STATSD_PORT", Some("invalid"), || {
            let result = AppConfig::new();
            assert!(
                matches!(result, Err(_)),
                "Should return error when config is not valid"
            )
        });
    }
}
