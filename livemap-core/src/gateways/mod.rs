pub mod poi;
pub mod translate;
