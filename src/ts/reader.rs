//! Event-based TS markup reader.
//!
//! A single synchronous pass over the document with no lookahead. Text is
//! never trimmed: translators rely on significant leading and trailing
//! whitespace surviving a load/store cycle.

use std::collections::HashMap;

use quick_xml::Reader;
use quick_xml::events::{
    BytesStart,
    Event,
};

use super::error::ParseError;
use crate::catalog::{
    Catalog,
    Context,
    Location,
    Message,
    TranslationStatus,
};

/// Placeholder context name used in errors raised before `<name>` was seen.
const UNNAMED: &str = "?";

/// Parse TS markup into a catalog.
///
/// Duplicate context blocks are appended into the first block carrying the
/// same name, per the format's repeated-context allowance.
///
/// # Errors
/// Fails fast on ill-formed XML, a message without a source, a context
/// without a name, unexpected elements, non-numeric location lines, or an
/// unrecognized translation status.
pub fn parse(input: &str) -> Result<Catalog, ParseError> {
    let mut reader = Reader::from_str(input);

    loop {
        match reader.read_event()? {
            Event::Start(element) if element.name().as_ref() == b"TS" => {
                return parse_ts(&mut reader, &element);
            }
            Event::Empty(element) if element.name().as_ref() == b"TS" => {
                return catalog_from_attrs(&element);
            }
            Event::Decl(_) | Event::DocType(_) | Event::Comment(_) | Event::PI(_) => {}
            Event::Text(text) if text.unescape()?.trim().is_empty() => {}
            Event::Eof => return Err(ParseError::MissingRoot),
            _ => return Err(ParseError::MissingRoot),
        }
    }
}

/// Read the root's attributes into an otherwise empty catalog.
fn catalog_from_attrs(root: &BytesStart<'_>) -> Result<Catalog, ParseError> {
    let mut catalog = Catalog::new();
    for attr in root.attributes() {
        let attr = attr?;
        match attr.key.as_ref() {
            b"version" => catalog.version = attr.unescape_value()?.into_owned(),
            b"language" => catalog.language = Some(attr.unescape_value()?.into_owned()),
            b"sourcelanguage" => {
                catalog.source_language = Some(attr.unescape_value()?.into_owned());
            }
            _ => {}
        }
    }
    Ok(catalog)
}

/// Read the body of `<TS>`: a sequence of context blocks.
fn parse_ts(reader: &mut Reader<&[u8]>, root: &BytesStart<'_>) -> Result<Catalog, ParseError> {
    let mut catalog = catalog_from_attrs(root)?;
    // Duplicate context blocks are merged by name, append-on-match.
    let mut by_name: HashMap<String, usize> = HashMap::new();

    loop {
        match reader.read_event()? {
            Event::Start(element) if element.name().as_ref() == b"context" => {
                let context = parse_context(reader)?;
                match by_name.get(&context.name) {
                    Some(&index) => {
                        if let Some(existing) = catalog.contexts.get_mut(index) {
                            existing.messages.extend(context.messages);
                        }
                    }
                    None => {
                        by_name.insert(context.name.clone(), catalog.contexts.len());
                        catalog.contexts.push(context);
                    }
                }
            }
            Event::End(element) if element.name().as_ref() == b"TS" => return Ok(catalog),
            Event::Comment(_) => {}
            Event::Text(text) if text.unescape()?.trim().is_empty() => {}
            Event::Eof => return Err(ParseError::UnexpectedEof { parent: "TS" }),
            event => return Err(unexpected(reader, &event, "TS")),
        }
    }
}

/// Read the body of one `<context>` block.
fn parse_context(reader: &mut Reader<&[u8]>) -> Result<Context, ParseError> {
    let mut name: Option<String> = None;
    let mut messages = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(element) => match element.name().as_ref() {
                b"name" => name = Some(read_element_text(reader, "name")?),
                b"message" => {
                    messages.push(parse_message(reader, name.as_deref().unwrap_or(UNNAMED))?);
                }
                _ => return Err(unexpected(reader, &Event::Start(element), "context")),
            },
            Event::Empty(element) => match element.name().as_ref() {
                b"name" => name = Some(String::new()),
                b"message" => {
                    return Err(ParseError::MissingSource {
                        context: name.unwrap_or_else(|| UNNAMED.to_string()),
                        position: reader.buffer_position(),
                    });
                }
                _ => return Err(unexpected(reader, &Event::Empty(element), "context")),
            },
            Event::End(element) if element.name().as_ref() == b"context" => {
                let name = name.ok_or(ParseError::MissingContextName {
                    position: reader.buffer_position(),
                })?;
                return Ok(Context { name, messages });
            }
            Event::Comment(_) => {}
            Event::Text(text) if text.unescape()?.trim().is_empty() => {}
            Event::Eof => return Err(ParseError::UnexpectedEof { parent: "context" }),
            event => return Err(unexpected(reader, &event, "context")),
        }
    }
}

/// Read the body of one `<message>` element.
fn parse_message(reader: &mut Reader<&[u8]>, context: &str) -> Result<Message, ParseError> {
    let mut message = Message::new(String::new());
    let mut source: Option<String> = None;

    loop {
        match reader.read_event()? {
            Event::Start(element) => match element.name().as_ref() {
                b"location" => {
                    message.locations.push(parse_location(reader, &element)?);
                    consume_end(reader, "location")?;
                }
                b"source" => source = Some(read_element_text(reader, "source")?),
                b"comment" => message.comment = Some(read_element_text(reader, "comment")?),
                b"extracomment" => {
                    message.extracomment = Some(read_element_text(reader, "extracomment")?);
                }
                b"translation" => {
                    message.status = translation_status(reader, &element)?;
                    message.translation = Some(read_element_text(reader, "translation")?);
                }
                _ => return Err(unexpected(reader, &Event::Start(element), "message")),
            },
            Event::Empty(element) => match element.name().as_ref() {
                b"location" => message.locations.push(parse_location(reader, &element)?),
                b"source" => source = Some(String::new()),
                b"comment" => message.comment = Some(String::new()),
                b"extracomment" => message.extracomment = Some(String::new()),
                b"translation" => {
                    message.status = translation_status(reader, &element)?;
                    message.translation = Some(String::new());
                }
                _ => return Err(unexpected(reader, &Event::Empty(element), "message")),
            },
            Event::End(element) if element.name().as_ref() == b"message" => {
                message.source = source.ok_or_else(|| ParseError::MissingSource {
                    context: context.to_string(),
                    position: reader.buffer_position(),
                })?;
                return Ok(message);
            }
            Event::Comment(_) => {}
            Event::Text(text) if text.unescape()?.trim().is_empty() => {}
            Event::Eof => return Err(ParseError::UnexpectedEof { parent: "message" }),
            event => return Err(unexpected(reader, &event, "message")),
        }
    }
}

/// Read a `<location>` element's attributes. Attribute order is free, but
/// both filename and line are required.
fn parse_location(
    reader: &Reader<&[u8]>,
    element: &BytesStart<'_>,
) -> Result<Location, ParseError> {
    let mut filename: Option<String> = None;
    let mut line: Option<u32> = None;
    for attr in element.attributes() {
        let attr = attr?;
        match attr.key.as_ref() {
            b"filename" => filename = Some(attr.unescape_value()?.into_owned()),
            b"line" => {
                let value = attr.unescape_value()?;
                line = Some(value.parse().map_err(|_| ParseError::InvalidLocationLine {
                    value: value.clone().into_owned(),
                    position: reader.buffer_position(),
                })?);
            }
            _ => {}
        }
    }
    Ok(Location {
        filename: filename.ok_or(ParseError::MissingLocationAttribute {
            attribute: "filename",
            position: reader.buffer_position(),
        })?,
        line: line.ok_or(ParseError::MissingLocationAttribute {
            attribute: "line",
            position: reader.buffer_position(),
        })?,
    })
}

/// Read a `<translation>` element's `type` attribute into a status.
fn translation_status(
    reader: &Reader<&[u8]>,
    element: &BytesStart<'_>,
) -> Result<TranslationStatus, ParseError> {
    for attr in element.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == b"type" {
            let value = attr.unescape_value()?;
            return TranslationStatus::from_type_attr(&value).ok_or_else(|| {
                ParseError::UnknownTranslationType {
                    value: value.into_owned(),
                    position: reader.buffer_position(),
                }
            });
        }
    }
    Ok(TranslationStatus::Finished)
}

/// Collect the text content of an element up to its end tag.
fn read_element_text(
    reader: &mut Reader<&[u8]>,
    parent: &'static str,
) -> Result<String, ParseError> {
    let mut text = String::new();
    loop {
        match reader.read_event()? {
            Event::Text(chunk) => text.push_str(&chunk.unescape()?),
            Event::CData(chunk) => text.push_str(&String::from_utf8_lossy(&chunk)),
            Event::End(_) => return Ok(text),
            Event::Comment(_) => {}
            Event::Eof => return Err(ParseError::UnexpectedEof { parent }),
            event => return Err(unexpected(reader, &event, parent)),
        }
    }
}

/// Consume the end tag of an element whose body must be empty.
fn consume_end(reader: &mut Reader<&[u8]>, parent: &'static str) -> Result<(), ParseError> {
    loop {
        match reader.read_event()? {
            Event::End(_) => return Ok(()),
            Event::Text(text) if text.unescape()?.trim().is_empty() => {}
            Event::Eof => return Err(ParseError::UnexpectedEof { parent }),
            event => return Err(unexpected(reader, &event, parent)),
        }
    }
}

/// Build the error for a node the format does not allow here.
fn unexpected(reader: &Reader<&[u8]>, event: &Event<'_>, parent: &'static str) -> ParseError {
    let found = match event {
        Event::Start(element) | Event::Empty(element) => {
            format!("<{}>", String::from_utf8_lossy(element.name().as_ref()))
        }
        Event::End(element) => {
            format!("</{}>", String::from_utf8_lossy(element.name().as_ref()))
        }
        Event::Text(_) => "text content".to_string(),
        other => format!("{other:?}"),
    };
    ParseError::UnexpectedContent { found, parent, position: reader.buffer_position() }
}
