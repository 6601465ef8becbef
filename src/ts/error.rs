//! Parse errors for TS markup.

use thiserror::Error;

/// Errors raised while parsing TS markup.
///
/// Parsing fails fast: the first malformed construct aborts the load and no
/// partial catalog is returned.
#[derive(Error, Debug)]
pub enum ParseError {
    /// The underlying XML is ill-formed.
    #[error("malformed markup: {0}")]
    Xml(#[from] quick_xml::Error),

    /// An attribute could not be read.
    #[error("malformed attribute: {0}")]
    Attr(#[from] quick_xml::events::attributes::AttrError),

    /// An entity reference could not be resolved.
    #[error("malformed escape sequence: {0}")]
    Escape(#[from] quick_xml::escape::EscapeError),

    /// The document carries no `<TS>` root element.
    #[error("no <TS> root element found")]
    MissingRoot,

    /// A context block carries no `<name>` element.
    #[error("<context> without a <name> near byte {position}")]
    MissingContextName {
        /// Byte offset of the offending construct.
        position: u64,
    },

    /// A message carries no `<source>` element.
    #[error("<message> without a <source> in context '{context}' near byte {position}")]
    MissingSource {
        /// Name of the enclosing context, or `?` when the name is missing too.
        context: String,
        /// Byte offset of the offending construct.
        position: u64,
    },

    /// An element appeared where the format does not allow it.
    #[error("unexpected {found} inside <{parent}> near byte {position}")]
    UnexpectedContent {
        /// Description of the offending node.
        found: String,
        /// Element the parser was reading.
        parent: &'static str,
        /// Byte offset of the offending construct.
        position: u64,
    },

    /// A `<location>` reference is missing a required attribute.
    #[error("<location> missing '{attribute}' attribute near byte {position}")]
    MissingLocationAttribute {
        /// Name of the absent attribute.
        attribute: &'static str,
        /// Byte offset of the offending construct.
        position: u64,
    },

    /// A `<location>` line attribute is not a line number.
    #[error("invalid line number '{value}' in <location> near byte {position}")]
    InvalidLocationLine {
        /// The attribute value as written.
        value: String,
        /// Byte offset of the offending construct.
        position: u64,
    },

    /// A translation carries an unrecognized `type` attribute.
    #[error("unknown translation type '{value}' near byte {position}")]
    UnknownTranslationType {
        /// The attribute value as written.
        value: String,
        /// Byte offset of the offending construct.
        position: u64,
    },

    /// The document ended inside an open element.
    #[error("unexpected end of document inside <{parent}>")]
    UnexpectedEof {
        /// Element left open at end of input.
        parent: &'static str,
    },
}
