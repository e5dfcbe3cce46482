pub mod bbox;
pub mod gateways;
pub mod repositories;
pub mod usecases;

pub mod entities {
    pub use livemap_entities::{feature::*, geo::*, id::*, language::*};
}

pub use repositories::Error as RepoError;
