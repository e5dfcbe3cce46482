pub use livemap_core::{gateways, repositories};

pub mod entities {
    pub use livemap_core::entities::*;
    #[cfg(test)]
    pub use livemap_entities::builders::*;
}

pub mod usecases {
    pub use livemap_core::usecases::*;
}

pub mod prelude {
    pub use super::entities::*;
}
