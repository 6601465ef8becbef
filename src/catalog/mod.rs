//! Translation catalog data model and operations.

mod merge;
mod types;

pub use types::{
    Catalog,
    Context,
    DEFAULT_TS_VERSION,
    Location,
    Message,
    TranslationStatus,
};
