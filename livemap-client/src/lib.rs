//! Client side of the LiveMap viewport streams.
//!
//! The [`SubscriptionController`] keeps exactly one stream open for the
//! current viewport and language and hands every received collection to
//! a [`LayerReplacer`] that swaps what is displayed on a [`MapSurface`].

use reqwest::Response;
use serde::de::DeserializeOwned;
use thiserror::Error;

mod api;
mod controller;
mod render;
pub mod sse;
mod transport;

pub use self::{api::*, controller::*, render::*, transport::*};

type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum Error {
    #[error("{0}")]
    Fetch(String),

    #[error("{0:?}")]
    Api(#[from] livemap_boundary::Error),

    #[error("Stream failed: {0}")]
    Stream(String),

    #[error("Malformed event: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Fetch(format!("{err}"))
    }
}

pub async fn into_json<T>(response: Response) -> Result<T>
where
    T: DeserializeOwned,
{
    // ensure we've got 2xx status
    if response.status().is_success() {
        Ok(response.json().await?)
    } else {
        Err(response.json::<livemap_boundary::Error>().await?.into())
    }
}
