#[macro_use]
extern crate log;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use livemap_db_sqlite::Connections;
use livemap_entities::{geo::MapBbox, language::Language};
use livemap_gateways::{lingvanex::Lingvanex, overpass::Overpass, unconfigured::Unconfigured};
use livemap_webserver::{Cfg, Gateways};
use tokio::runtime::Runtime;

mod config;
mod import;
mod watch;

use self::config::{Config, TranslationGateway};

#[derive(Parser, Debug)]
#[command(author, version, about = "Live map of places with translated labels")]
struct Args {
    /// Configuration file (TOML)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// URL to the database
    #[arg(long, value_name = "DATABASE_URL")]
    db_url: Option<String>,

    /// Allow requests from any origin
    #[arg(long)]
    enable_cors: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the web server (default)
    Serve,

    /// Load the features of a GeoJSON file into the database
    Import {
        /// GeoJSON file with a feature collection
        #[arg(value_name = "GEOJSON_FILE")]
        file: PathBuf,
    },

    /// Subscribe to a viewport of a running server and print its labels
    Watch {
        /// Base URL of the server API, e.g. http://localhost:8000/api
        #[arg(long)]
        api: String,

        /// Bounding box: west,south,east,north
        #[arg(long)]
        bbox: MapBbox,

        /// Display language (default: source language)
        #[arg(long)]
        lang: Option<Language>,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let args = Args::parse();
    let mut cfg = Config::try_load_from_file_or_default(args.config.as_ref())?;
    if let Some(db_url) = args.db_url {
        cfg.db.conn_sqlite = db_url;
    }
    if args.enable_cors {
        cfg.webserver.enable_cors = true;
    }

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(cfg),
        Command::Import { file } => {
            let connections = connect(&cfg)?;
            let count = import::import_from_geojson_file(&connections, &file)?;
            println!("Imported {count} feature(s) from {}", file.display());
            Ok(())
        }
        Command::Watch { api, bbox, lang } => {
            let runtime = runtime()?;
            let options = watch::WatchOptions {
                api_url: api,
                bbox,
                lang,
                source_lang: cfg.translation.source_lang,
                target_lang: cfg.translation.target_lang,
            };
            watch::watch(options, runtime.handle().clone())
        }
    }
}

fn runtime() -> Result<Runtime> {
    Ok(tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?)
}

fn connect(cfg: &Config) -> Result<Connections> {
    info!(
        "Connecting to SQLite database '{}' (pool size = {})",
        cfg.db.conn_sqlite, cfg.db.conn_pool_size
    );
    let connections = Connections::init(&cfg.db.conn_sqlite, cfg.db.conn_pool_size.into())?;
    info!("Running embedded database migrations");
    livemap_db_sqlite::run_embedded_database_migrations(connections.exclusive()?)?;
    Ok(connections)
}

fn gateways(cfg: &Config) -> Gateways {
    let translation: Box<dyn livemap_core::gateways::translate::TranslationGateway + Send + Sync> =
        match &cfg.translation.gateway {
            Some(TranslationGateway::Lingvanex { api_url, api_key }) => {
                info!("Use Lingvanex translation gateway ({api_url})");
                Box::new(Lingvanex {
                    api_url: api_url.clone(),
                    api_key: api_key.clone(),
                })
            }
            None => {
                warn!("No translation gateway configured: labels will not be translated");
                Box::new(Unconfigured)
            }
        };
    info!("Use Overpass POI gateway ({})", cfg.poi.overpass_api_url);
    let poi = Box::new(Overpass {
        api_url: cfg.poi.overpass_api_url.clone(),
    });
    Gateways { translation, poi }
}

fn serve(cfg: Config) -> Result<()> {
    let connections = connect(&cfg)?;
    let gateways = gateways(&cfg);
    let Config {
        webserver,
        streaming,
        translation,
        ..
    } = cfg;
    let web_cfg = Cfg {
        source_lang: translation.source_lang,
        target_lang: translation.target_lang,
        heartbeat_interval: streaming.heartbeat_interval,
        query_timeout: streaming.query_timeout,
    };
    runtime()?.block_on(livemap_webserver::run(
        connections,
        webserver.enable_cors,
        web_cfg,
        gateways,
        env!("CARGO_PKG_VERSION"),
    ));
    Ok(())
}
