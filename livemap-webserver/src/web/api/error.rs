use std::time::Duration;

use super::json_error_response;
use anyhow::anyhow;
use rocket::{
    self,
    http::Status,
    response::{self, Responder},
    serde::json::Error as JsonError,
    tokio::task::JoinError,
};
use thiserror::Error;

pub use crate::core::{repositories::Error as RepoError, usecases::Error as ParameterError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parameter(#[from] ParameterError),
    #[error("No result within {0:?}")]
    Timeout(Duration),
    #[error("{0}")]
    OtherWithStatus(#[source] anyhow::Error, Status),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    pub fn status(&self) -> Status {
        match self {
            Self::Parameter(err) if err.is_invalid_request() => Status::BadRequest,
            Self::Parameter(ParameterError::Repo(_)) | Self::Timeout(_) => {
                Status::ServiceUnavailable
            }
            Self::Parameter(ParameterError::Translation(_) | ParameterError::Poi(_)) => {
                Status::BadGateway
            }
            Self::Parameter(_) | Self::Other(_) => Status::InternalServerError,
            Self::OtherWithStatus(_, status) => *status,
        }
    }
}

impl From<JsonError<'_>> for Error {
    fn from(err: JsonError) -> Self {
        match err {
            JsonError::Io(err) => Self::OtherWithStatus(anyhow!(err), Status::UnprocessableEntity),
            JsonError::Parse(_str, err) => {
                Self::OtherWithStatus(anyhow!(err), Status::UnprocessableEntity)
            }
        }
    }
}

impl From<RepoError> for Error {
    fn from(err: RepoError) -> Self {
        ParameterError::from(err).into()
    }
}

impl From<JoinError> for Error {
    fn from(err: JoinError) -> Self {
        Self::Other(anyhow!(err))
    }
}

impl<'r, 'o: 'r> Responder<'r, 'o> for Error {
    fn respond_to(self, req: &rocket::Request) -> response::Result<'o> {
        let status = self.status();
        if status.class().is_server_error() {
            error!("{self}");
        } else {
            debug!("Rejected request: {self}");
        }
        json_error_response(req, &self, status)
    }
}
