use std::{fmt::Display, result, time::Duration};

use livemap_boundary::Error as JsonErrorResponse;
use rocket::serde::json::{Error as JsonError, Json};
use rocket::{
    self, get,
    http::Status,
    post,
    response::{self, Responder},
    routes, Route, State,
};

use super::{guards::*, sqlite, Cfg};
use crate::{
    adapters::json::{self, to_json},
    core::{prelude::*, usecases},
};

mod error;
mod live;
mod places;
pub mod stream;
mod translate;
pub mod util;

pub use self::error::Error as ApiError;


type Result<T> = result::Result<Json<T>, ApiError>;
type JsonResult<'a, T> = result::Result<Json<T>, JsonError<'a>>;

pub fn routes() -> Vec<Route> {
    routes![
        // ---   places   --- //
        stream::get_places_stream,
        places::get_places,
        live::get_places_live,
        // ---   translation   --- //
        translate::post_translate,
        // ---   util   --- //
        util::get_health,
        util::get_version,
    ]
}

fn json_error_response<'r, 'o: 'r, E: Display>(
    req: &'r rocket::Request<'_>,
    err: &E,
    status: Status,
) -> response::Result<'o> {
    let message = err.to_string();
    let boundary_error = JsonErrorResponse {
        http_status: status.code,
        message,
    };
    Json(boundary_error).respond_to(req).map(|mut res| {
        res.set_status(status);
        res
    })
}

/// Query and translate the features of a viewport.
///
/// Both steps block and are moved to the blocking thread pool.
async fn load_feature_collection(
    db: sqlite::Connections,
    translation: SharedTranslationGateway,
    source_lang: Language,
    query: usecases::ViewportQuery,
) -> result::Result<FeatureCollection, ApiError> {
    rocket::tokio::task::spawn_blocking(move || -> result::Result<_, ApiError> {
        let collection = usecases::query_feature_collection(&db.shared_repo()?, &query)?;
        Ok(usecases::merge_translations(
            &*translation,
            &source_lang,
            collection,
        ))
    })
    .await?
}

/// Like [`load_feature_collection`] but gives up after `timeout`.
async fn load_feature_collection_within(
    db: sqlite::Connections,
    translation: SharedTranslationGateway,
    source_lang: Language,
    query: usecases::ViewportQuery,
    timeout: Option<Duration>,
) -> result::Result<FeatureCollection, ApiError> {
    let pass = load_feature_collection(db, translation, source_lang, query);
    match timeout {
        Some(timeout) => rocket::tokio::time::timeout(timeout, pass)
            .await
            .map_err(|_| ApiError::Timeout(timeout))?,
        None => pass.await,
    }
}
