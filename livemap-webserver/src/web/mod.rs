use std::{sync::Arc, time::Duration};

use rocket::{config::Config as RocketCfg, routes, Rocket, Route};

use crate::core::{
    entities::Language,
    gateways::{poi::PoiGateway, translate::TranslationGateway},
    repositories::FeatureRepo,
};

pub mod api;
mod guards;
mod sqlite;


#[derive(Debug, Clone)]
pub struct Cfg {
    /// Language of the stored feature names.
    pub source_lang: Language,
    /// Default target of explicit translation requests.
    pub target_lang: Language,
    pub heartbeat_interval: Duration,
    /// Bounds the initial query and translation of a viewport.
    pub query_timeout: Option<Duration>,
}

pub struct Gateways {
    pub translation: Box<dyn TranslationGateway + Send + Sync>,
    pub poi: Box<dyn PoiGateway + Send + Sync>,
}

pub(crate) struct InstanceOptions {
    mounts: Vec<(&'static str, Vec<Route>)>,
    rocket_cfg: Option<RocketCfg>,
    cfg: Cfg,
    version: &'static str,
}

fn log_feature_count(db: &sqlite::Connections) {
    match db.shared().map(|db| db.count_features()) {
        Ok(Ok(count)) => info!("The feature store contains {count} feature(s)"),
        Ok(Err(err)) => error!("Failed to count stored features: {err}"),
        Err(err) => error!("The feature store is unavailable: {err}"),
    }
}

pub(crate) fn rocket_instance(
    options: InstanceOptions,
    db: sqlite::Connections,
    gateways: Gateways,
) -> Rocket<rocket::Build> {
    let InstanceOptions {
        mounts,
        rocket_cfg,
        cfg,
        version,
    } = options;
    let Gateways { translation, poi } = gateways;

    log_feature_count(&db);
    info!(
        "Streaming viewports with a heartbeat every {:?}",
        cfg.heartbeat_interval
    );

    let r = match rocket_cfg {
        Some(cfg) => rocket::custom(cfg),
        None => rocket::build(),
    };

    let translation = guards::Translation(Arc::from(translation));
    let poi = guards::Poi(Arc::from(poi));
    let version = guards::Version(version);

    let mut instance = r
        .manage(db)
        .manage(translation)
        .manage(poi)
        .manage(api::stream::OpenSessions::default())
        .manage(cfg)
        .manage(version);

    for (m, r) in mounts {
        instance = instance.mount(m, r);
    }
    instance
}

fn mounts() -> Vec<(&'static str, Vec<Route>)> {
    vec![
        ("/api", api::routes()),
        ("/", routes![api::util::get_index]),
    ]
}

pub async fn run(
    db: sqlite::Connections,
    enable_cors: bool,
    cfg: Cfg,
    gateways: Gateways,
    version: &'static str,
) {
    let options = InstanceOptions {
        mounts: mounts(),
        rocket_cfg: None,
        cfg,
        version,
    };
    let instance = rocket_instance(options, db, gateways);
    let server_task = if enable_cors {
        match rocket_cors::CorsOptions::default().to_cors() {
            Ok(cors) => instance.attach(cors).launch(),
            Err(err) => {
                error!("Invalid CORS configuration: {err}");
                return;
            }
        }
    } else {
        instance.launch()
    };
    match server_task.await {
        Ok(rocket) => {
            if let Some(sessions) = rocket.state::<api::stream::OpenSessions>() {
                info!("Web server stopped with {} open session(s)", sessions.count());
            }
        }
        Err(err) => error!("Unable to run web server: {err}"),
    }
}
