//! Qt Linguist TS markup reading and writing.

mod error;
mod reader;
mod writer;

pub use error::ParseError;
pub use reader::parse;
pub use writer::serialize;
