//! TS markup writer.
//!
//! Emits the 4-space-indented layout the translation tooling produces, so
//! stored catalogs diff cleanly against scanner output. Serialization is
//! deterministic: context and message order are preserved, location
//! attributes are normalized to filename-then-line.

use quick_xml::escape::escape;

use crate::catalog::{
    Catalog,
    Context,
    Location,
    Message,
    TranslationStatus,
};

/// One indentation step.
const INDENT: &str = "    ";

/// Serialize a catalog to TS markup.
///
/// Round-trips losslessly with [`super::parse`] for source text, translation
/// text, status, comments, and locations.
#[must_use]
pub fn serialize(catalog: &Catalog) -> String {
    let mut out = String::with_capacity(256 * catalog.message_count().max(1));
    out.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
    out.push_str("<!DOCTYPE TS>\n");

    out.push_str("<TS version=\"");
    out.push_str(&escape(catalog.version.as_str()));
    out.push('"');
    if let Some(language) = &catalog.language {
        out.push_str(" language=\"");
        out.push_str(&escape(language.as_str()));
        out.push('"');
    }
    if let Some(source_language) = &catalog.source_language {
        out.push_str(" sourcelanguage=\"");
        out.push_str(&escape(source_language.as_str()));
        out.push('"');
    }
    out.push_str(">\n");

    for context in &catalog.contexts {
        write_context(&mut out, context);
    }

    out.push_str("</TS>\n");
    out
}

/// Write one `<context>` block.
fn write_context(out: &mut String, context: &Context) {
    out.push_str(INDENT);
    out.push_str("<context>\n");
    write_text_element(out, 2, "name", &context.name);
    for message in &context.messages {
        write_message(out, message);
    }
    out.push_str(INDENT);
    out.push_str("</context>\n");
}

/// Write one `<message>` element.
fn write_message(out: &mut String, message: &Message) {
    push_indent(out, 2);
    out.push_str("<message>\n");
    for location in &message.locations {
        write_location(out, location);
    }
    write_text_element(out, 3, "source", &message.source);
    if let Some(comment) = &message.comment {
        write_text_element(out, 3, "comment", comment);
    }
    if let Some(extracomment) = &message.extracomment {
        write_text_element(out, 3, "extracomment", extracomment);
    }
    if let Some(translation) = &message.translation {
        write_translation(out, translation, message.status);
    }
    push_indent(out, 2);
    out.push_str("</message>\n");
}

/// Write a `<location>` reference with normalized attribute order.
fn write_location(out: &mut String, location: &Location) {
    push_indent(out, 3);
    out.push_str("<location filename=\"");
    out.push_str(&escape(location.filename.as_str()));
    out.push_str("\" line=\"");
    out.push_str(&location.line.to_string());
    out.push_str("\"/>\n");
}

/// Write the `<translation>` element, carrying the status as its `type`
/// attribute and self-closing when the text is empty.
fn write_translation(out: &mut String, text: &str, status: TranslationStatus) {
    push_indent(out, 3);
    out.push_str("<translation");
    if let Some(kind) = status.type_attr() {
        out.push_str(" type=\"");
        out.push_str(kind);
        out.push('"');
    }
    if text.is_empty() {
        out.push_str("/>\n");
    } else {
        out.push('>');
        out.push_str(&escape(text));
        out.push_str("</translation>\n");
    }
}

/// Write a simple text element, self-closing when the text is empty.
fn write_text_element(out: &mut String, depth: usize, tag: &str, text: &str) {
    push_indent(out, depth);
    out.push('<');
    out.push_str(tag);
    if text.is_empty() {
        out.push_str("/>\n");
    } else {
        out.push('>');
        out.push_str(&escape(text));
        out.push_str("</");
        out.push_str(tag);
        out.push_str(">\n");
    }
}

/// Append `depth` indentation steps.
fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}
