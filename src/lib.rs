//! ts-catalog
//!
//! Qt Linguist TS translation catalogs: parse, lookup, merge, serialize.
//!
//! A catalog is the persisted snapshot between the UI source scanner and the
//! translation tooling: ordered contexts of messages, each with a source
//! text, location provenance, an optional translation, and an explicit
//! status. Once loaded it is a read-mostly value that can be shared across
//! threads without locking.

pub mod catalog;
pub mod cli;
pub mod loader;
pub mod ts;

pub use catalog::{
    Catalog,
    Context,
    Location,
    Message,
    TranslationStatus,
};
pub use ts::{
    ParseError,
    parse,
    serialize,
};
