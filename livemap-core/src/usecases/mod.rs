mod error;
mod live_places;
mod merge_translations;
mod parse_viewport_query;
mod query_features;
mod translate_texts;

#[cfg(test)]
pub mod tests;

pub use self::{
    error::Error, live_places::*, merge_translations::*, parse_viewport_query::*,
    query_features::*, translate_texts::*,
};

mod prelude {
    pub use super::error::Error;
    pub type Result<T> = std::result::Result<T, Error>;
    pub use crate::{entities::*, repositories::*};
}
