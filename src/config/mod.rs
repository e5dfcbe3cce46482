use anyhow::{anyhow, Result};
use livemap_entities::language::Language;
use std::{env, fs, io::ErrorKind, path::Path, time::Duration};

mod raw;

const DEFAULT_CONFIG_FILE_NAME: &str = "livemap.toml";

const ENV_NAME_DB_URL: &str = "DATABASE_URL";
const ENV_NAME_LINGVANEX_API_KEY: &str = "LINGVANEX_API_KEY";
const ENV_NAME_LINGVANEX_URL: &str = "LINGVANEX_URL";

const DEFAULT_LINGVANEX_API_URL: &str = "https://api-b2b.backenster.com/b1/api/v3/translate";

pub struct Config {
    pub db: Db,
    pub webserver: WebServer,
    pub streaming: Streaming,
    pub translation: Translation,
    pub poi: Poi,
}

impl Config {
    pub fn try_load_from_file_or_default<P: AsRef<Path>>(file_path: Option<P>) -> Result<Self> {
        let file_path: &Path = file_path.as_ref().map(|p| p.as_ref()).unwrap_or_else(|| {
            log::info!("No configuration file specified. load {DEFAULT_CONFIG_FILE_NAME}");
            Path::new(DEFAULT_CONFIG_FILE_NAME)
        });

        let mut raw_config = match fs::read_to_string(file_path) {
            Ok(cfg_string) => toml::from_str(&cfg_string)?,
            Err(err) => match err.kind() {
                ErrorKind::NotFound => {
                    log::info!(
                        "{} not found => load default configuration.",
                        file_path.display()
                    );
                    Ok(raw::Config::default())
                }
                _ => Err(err),
            }?,
        };
        override_from_env(&mut raw_config, |name| env::var(name).ok());
        Self::try_from(raw_config)
    }
}

/// Environment variables take precedence over the file.
fn override_from_env<F>(cfg: &mut raw::Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(db_url) = lookup(ENV_NAME_DB_URL) {
        cfg.db.get_or_insert_with(Default::default).connection_sqlite = db_url;
    }
    let api_key = lookup(ENV_NAME_LINGVANEX_API_KEY);
    let api_url = lookup(ENV_NAME_LINGVANEX_URL);
    if api_key.is_none() && api_url.is_none() {
        return;
    }
    let lingvanex = cfg
        .gateway
        .get_or_insert_with(Default::default)
        .lingvanex
        .get_or_insert(raw::Lingvanex {
            api_url: None,
            api_key: None,
        });
    if api_key.is_some() {
        lingvanex.api_key = api_key;
    }
    if api_url.is_some() {
        lingvanex.api_url = api_url;
    }
}

pub struct Db {
    /// SQLite connection
    pub conn_sqlite: String,
    pub conn_pool_size: u8,
}

pub struct WebServer {
    pub enable_cors: bool,
}

pub struct Streaming {
    pub heartbeat_interval: Duration,
    pub query_timeout: Option<Duration>,
}

pub struct Translation {
    pub source_lang: Language,
    pub target_lang: Language,
    /// `None` if translations are disabled or the provider lacks credentials.
    pub gateway: Option<TranslationGateway>,
}

#[derive(Clone)]
pub enum TranslationGateway {
    Lingvanex { api_url: String, api_key: String },
}

pub struct Poi {
    pub overpass_api_url: String,
}

impl TryFrom<raw::Config> for Config {
    type Error = anyhow::Error;
    fn try_from(from: raw::Config) -> Result<Self> {
        let raw::Config {
            db,
            webserver,
            streaming,
            translation,
            gateway,
        } = from;

        let raw::Db {
            connection_sqlite,
            connection_pool_size,
        } = db.unwrap_or_default();
        if connection_pool_size == 0 {
            return Err(anyhow!("The connection pool must not be empty"));
        }
        let db = Db {
            conn_sqlite: connection_sqlite,
            conn_pool_size: connection_pool_size,
        };

        let raw::WebServer { cors } = webserver.unwrap_or_default();
        let webserver = WebServer { enable_cors: cors };

        let raw::Streaming {
            heartbeat_interval,
            query_timeout,
        } = streaming.unwrap_or_default();
        if heartbeat_interval.is_zero() {
            return Err(anyhow!("The heartbeat interval must be positive"));
        }
        let streaming = Streaming {
            heartbeat_interval,
            query_timeout,
        };

        let gateway = gateway.unwrap_or_default();

        let raw::Translation {
            source_lang,
            target_lang,
            gateway: gateway_name,
        } = translation.unwrap_or_default();
        let source_lang = source_lang
            .parse::<Language>()
            .map_err(|err| anyhow!("Invalid source language: {err}"))?;
        let target_lang = target_lang
            .parse::<Language>()
            .map_err(|err| anyhow!("Invalid target language: {err}"))?;
        let translation_gateway = match gateway_name {
            Some(raw::TranslationGateway::Lingvanex) => {
                let raw::Lingvanex { api_url, api_key } = gateway
                    .lingvanex
                    .ok_or_else(|| anyhow!("Missing 'lingvanex' gateway configuration"))?;
                api_key
                    .filter(|key| !key.trim().is_empty())
                    .map(|api_key| TranslationGateway::Lingvanex {
                        api_url: api_url.unwrap_or_else(|| DEFAULT_LINGVANEX_API_URL.to_string()),
                        api_key,
                    })
            }
            None => None,
        };
        let translation = Translation {
            source_lang,
            target_lang,
            gateway: translation_gateway,
        };

        let raw::Overpass { api_url } = gateway
            .overpass
            .or_else(|| raw::Gateway::default().overpass)
            .ok_or_else(|| anyhow!("Missing overpass gateway configuration"))?;
        let poi = Poi {
            overpass_api_url: api_url,
        };

        Ok(Self {
            db,
            webserver,
            streaming,
            translation,
            poi,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_toml(s: &str) -> Result<Config> {
        let raw: raw::Config = toml::from_str(s)?;
        Config::try_from(raw)
    }

    #[test]
    fn load_default_config() {
        let file: Option<&Path> = None;
        let _: Config = Config::try_load_from_file_or_default(file).unwrap();
    }

    #[test]
    fn default_config_without_api_key() {
        let cfg = Config::try_from(raw::Config::default()).unwrap();
        assert_eq!(cfg.db.conn_sqlite, "livemap.db");
        assert!(!cfg.webserver.enable_cors);
        assert_eq!(cfg.streaming.heartbeat_interval, Duration::from_secs(10));
        assert_eq!(cfg.translation.source_lang.as_str(), "en");
        assert_eq!(cfg.translation.target_lang.as_str(), "kn");
        assert!(cfg.translation.gateway.is_none());
        assert_eq!(
            cfg.poi.overpass_api_url,
            "https://overpass-api.de/api/interpreter"
        );
    }

    #[test]
    fn override_with_environment() {
        let env: HashMap<_, _> = [
            (ENV_NAME_DB_URL, "/tmp/test.db"),
            (ENV_NAME_LINGVANEX_API_KEY, "Bearer secret"),
        ]
        .into_iter()
        .collect();
        let mut raw = raw::Config::default();
        override_from_env(&mut raw, |name| env.get(name).map(ToString::to_string));
        let cfg = Config::try_from(raw).unwrap();
        assert_eq!(cfg.db.conn_sqlite, "/tmp/test.db");
        let Some(TranslationGateway::Lingvanex { api_url, api_key }) = cfg.translation.gateway
        else {
            panic!("Lingvanex gateway expected");
        };
        assert_eq!(api_key, "Bearer secret");
        assert_eq!(api_url, DEFAULT_LINGVANEX_API_URL);
    }

    #[test]
    fn override_translation_url_with_environment() {
        let mut raw: raw::Config = toml::from_str(
            r#"
            [translation]
            source-lang = "en"
            target-lang = "hi"
            gateway = "lingvanex"
            "#,
        )
        .unwrap();
        override_from_env(&mut raw, |name| match name {
            ENV_NAME_LINGVANEX_URL => Some("http://localhost:9000".into()),
            ENV_NAME_LINGVANEX_API_KEY => Some("key".into()),
            _ => None,
        });
        let cfg = Config::try_from(raw).unwrap();
        assert_eq!(cfg.translation.target_lang.as_str(), "hi");
        assert!(matches!(
            cfg.translation.gateway,
            Some(TranslationGateway::Lingvanex { ref api_url, .. }) if api_url == "http://localhost:9000"
        ));
    }

    #[test]
    fn disable_translation_without_gateway() {
        let cfg = from_toml(
            r#"
            [translation]
            source-lang = "en"
            target-lang = "kn"

            [gateway.lingvanex]
            api-key = "key"
            "#,
        )
        .unwrap();
        assert!(cfg.translation.gateway.is_none());
    }

    #[test]
    fn reject_zero_heartbeat_interval() {
        assert!(from_toml(
            r#"
            [streaming]
            heartbeat-interval = "0s"
            "#,
        )
        .is_err());
    }

    #[test]
    fn reject_invalid_languages() {
        assert!(from_toml(
            r#"
            [translation]
            source-lang = "english!"
            target-lang = "kn"
            "#,
        )
        .is_err());
    }
}
