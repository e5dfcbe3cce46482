pub use livemap_boundary::*;

use crate::core::usecases;

pub mod to_json {
    //! Use case results -> JSON

    use super::*;

    // NOTE:
    // We cannot impl From<T> here, because the JSON structs
    // and the use case types both are outside this crate.

    pub fn live_place(from: usecases::LivePlace) -> LivePlace {
        let usecases::LivePlace { id, name, pos, tags } = from;
        LivePlace {
            id,
            name,
            lat: pos.lat(),
            lng: pos.lng(),
            tags: tags.into_iter().collect(),
        }
    }

    pub fn translated_text(from: usecases::TranslatedText) -> TranslatedText {
        let usecases::TranslatedText {
            original,
            translated,
        } = from;
        TranslatedText {
            original,
            translated,
        }
    }
}
