use crate::error::AppError;
use config::{Config as Cfg, File};
use serde::Deserialize;

/// Settings shared by every service: listener port and nothing else.
///
/// Values come from an optional `configuration` file and `APP__*`
/// environment variables, with `.env` loaded first when present.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    8080
}

impl Config {
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let config = Cfg::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_port_is_8080() {
        assert_eq!(Config::default().port, 8080);
    }

    #[test]
    fn deserializes_explicit_port() {
        let cfg = Cfg::builder()
            .set_override("port", 9090)
            .unwrap()
            .build()
            .unwrap();
        let parsed: Config = cfg.try_deserialize().unwrap();
        assert_eq!(parsed.port, 9090);
    }

    #[test]
    fn missing_port_falls_back_to_default() {
        let cfg = Cfg::builder().build().unwrap();
        let parsed: Config = cfg.try_deserialize().unwrap();
        assert_eq!(parsed.port, 8080);
    }
}
