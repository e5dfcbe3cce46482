use duration_str::{deserialize_duration, deserialize_option_duration};
use serde::Deserialize;
use std::time::Duration;

const DEFAULT_CONFIG_FILE: &str = include_str!("livemap.default.toml");

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub db: Option<Db>,
    pub webserver: Option<WebServer>,
    pub streaming: Option<Streaming>,
    pub translation: Option<Translation>,
    pub gateway: Option<Gateway>,
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_FILE).expect("Default configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Db {
    pub connection_sqlite: String,
    pub connection_pool_size: u8,
}

impl Default for Db {
    fn default() -> Self {
        Config::default().db.expect("DB configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct WebServer {
    pub cors: bool,
}

impl Default for WebServer {
    fn default() -> Self {
        Config::default()
            .webserver
            .expect("Webserver configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Streaming {
    #[serde(deserialize_with = "deserialize_duration")]
    pub heartbeat_interval: Duration,
    #[serde(default, deserialize_with = "deserialize_option_duration")]
    pub query_timeout: Option<Duration>,
}

impl Default for Streaming {
    fn default() -> Self {
        Config::default()
            .streaming
            .expect("Streaming configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Translation {
    pub source_lang: String,
    pub target_lang: String,
    pub gateway: Option<TranslationGateway>,
}

impl Default for Translation {
    fn default() -> Self {
        Config::default()
            .translation
            .expect("Translation configuration")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TranslationGateway {
    Lingvanex,
}

#[derive(Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Gateway {
    pub lingvanex: Option<Lingvanex>,
    pub overpass: Option<Overpass>,
}

impl Default for Gateway {
    fn default() -> Self {
        Config::default().gateway.expect("Gateway configuration")
    }
}

#[derive(Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Lingvanex {
    pub api_url: Option<String>,
    pub api_key: Option<String>,
}

#[derive(Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Overpass {
    pub api_url: String,
}
