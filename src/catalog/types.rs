//! Core catalog data model.

use serde::{
    Deserialize,
    Serialize,
};

/// TS format version written when a catalog does not carry one.
pub const DEFAULT_TS_VERSION: &str = "2.1";

/// A source-location reference attached to a message.
///
/// Locations are provenance metadata emitted by the UI source scanner; they
/// never participate in lookup identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// Path of the scanned source file, usually relative to the catalog.
    pub filename: String,
    /// 1-based line number within `filename`.
    pub line: u32,
}

/// Translation lifecycle status of a message.
///
/// This is an explicit tri-plus-one state carried in the markup's `type`
/// attribute, never inferred from translation emptiness. `Obsolete` is the
/// legacy spelling of `Vanished` still produced by older tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TranslationStatus {
    /// No `type` attribute: the translation is considered done.
    #[default]
    Finished,
    /// `type="unfinished"`: scanned but not yet translated.
    Unfinished,
    /// `type="vanished"`: the source string no longer appears in the
    /// codebase; the translation is retained for reference.
    Vanished,
    /// `type="obsolete"`: legacy equivalent of `Vanished`.
    Obsolete,
}

impl TranslationStatus {
    /// Value written to the `type` attribute, if any.
    #[must_use]
    pub const fn type_attr(self) -> Option<&'static str> {
        match self {
            Self::Finished => None,
            Self::Unfinished => Some("unfinished"),
            Self::Vanished => Some("vanished"),
            Self::Obsolete => Some("obsolete"),
        }
    }

    /// Parse a `type` attribute value. `None` for unrecognized values.
    #[must_use]
    pub fn from_type_attr(value: &str) -> Option<Self> {
        match value {
            "unfinished" => Some(Self::Unfinished),
            "vanished" => Some(Self::Vanished),
            "obsolete" => Some(Self::Obsolete),
            _ => None,
        }
    }

    /// Whether a translation with this status may be served to a display
    /// layer. Vanished and obsolete entries are history, not live strings.
    #[must_use]
    pub const fn is_active(self) -> bool {
        !matches!(self, Self::Vanished | Self::Obsolete)
    }
}

/// One translatable string entry with its locations and translation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Original string as it appears in the scanned source.
    pub source: String,

    /// Call sites this string was scanned from. Multiplicity arises when the
    /// same literal appears in several places.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<Location>,

    /// Developer comment distinguishing identical source strings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    /// Free-form comment addressed to the translator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extracomment: Option<String>,

    /// Translated text. `None` when the markup carried no translation
    /// element at all; `Some("")` for an empty element.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation: Option<String>,

    /// Lifecycle status of the translation.
    #[serde(default)]
    pub status: TranslationStatus,
}

impl Message {
    /// Create a message with only a source text.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            locations: Vec::new(),
            comment: None,
            extracomment: None,
            translation: None,
            status: TranslationStatus::Finished,
        }
    }

    /// Translation text suitable for display: non-empty and not
    /// vanished/obsolete.
    #[must_use]
    pub fn display_translation(&self) -> Option<&str> {
        match self.translation.as_deref() {
            Some(text) if !text.is_empty() && self.status.is_active() => Some(text),
            _ => None,
        }
    }

    /// Whether this entry carries a non-empty translation, regardless of
    /// status. Drives duplicate-key resolution during merges.
    pub(crate) fn has_translation(&self) -> bool {
        self.translation.as_deref().is_some_and(|text| !text.is_empty())
    }
}

/// A named grouping of messages, usually one source class or screen.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Context {
    /// Context name, e.g. `McPrinter` or `Maccura::McImageItem`.
    pub name: String,
    /// Messages in catalog order.
    #[serde(default)]
    pub messages: Vec<Message>,
}

impl Context {
    /// Create an empty context.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), messages: Vec::new() }
    }

    /// First message with the given source text, if any.
    #[must_use]
    pub fn message(&self, source: &str) -> Option<&Message> {
        self.messages.iter().find(|message| message.source == source)
    }
}

/// An ordered collection of contexts parsed from one TS document.
///
/// A catalog is read-mostly: load once, then share immutable references
/// freely across threads.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    /// TS format version, `2.1` for catalogs produced by current tooling.
    pub version: String,
    /// Target language tag, e.g. `en_US`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Language the source strings are written in, when recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_language: Option<String>,
    /// Contexts in document order.
    #[serde(default)]
    pub contexts: Vec<Context>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            version: DEFAULT_TS_VERSION.to_string(),
            language: None,
            source_language: None,
            contexts: Vec::new(),
        }
    }
}

impl Catalog {
    /// Create an empty catalog with the default format version.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// First context with the given name, if any.
    #[must_use]
    pub fn context(&self, name: &str) -> Option<&Context> {
        self.contexts.iter().find(|context| context.name == name)
    }

    /// Resolve a display string for a `(context, source)` pair.
    ///
    /// Returns the first usable translation among entries matching the pair:
    /// present, non-empty, and not vanished/obsolete. `None` means the
    /// caller should fall back to the source text.
    #[must_use]
    pub fn lookup(&self, context: &str, source: &str) -> Option<&str> {
        self.contexts
            .iter()
            .filter(|candidate| candidate.name == context)
            .flat_map(|candidate| candidate.messages.iter())
            .filter(|message| message.source == source)
            .find_map(Message::display_translation)
    }

    /// Total number of messages across all contexts.
    #[must_use]
    pub fn message_count(&self) -> usize {
        self.contexts.iter().map(|context| context.messages.len()).sum()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    fn translated(source: &str, translation: &str) -> Message {
        Message { translation: Some(translation.to_string()), ..Message::new(source) }
    }

    #[googletest::test]
    fn test_lookup_returns_translation() {
        let mut context = Context::new("McPrinter");
        context.messages.push(translated("打印", "Print"));
        let catalog = Catalog { contexts: vec![context], ..Catalog::new() };

        expect_that!(catalog.lookup("McPrinter", "打印"), some(eq("Print")));
    }

    #[googletest::test]
    fn test_lookup_is_idempotent() {
        let mut context = Context::new("McPrinter");
        context.messages.push(translated("打印", "Print"));
        let catalog = Catalog { contexts: vec![context], ..Catalog::new() };

        let first = catalog.lookup("McPrinter", "打印");
        let second = catalog.lookup("McPrinter", "打印");

        expect_that!(first, eq(second));
    }

    #[googletest::test]
    fn test_lookup_misses_unknown_pairs() {
        let mut context = Context::new("McPrinter");
        context.messages.push(translated("打印", "Print"));
        let catalog = Catalog { contexts: vec![context], ..Catalog::new() };

        expect_that!(catalog.lookup("McPrinter", "保存"), none());
        expect_that!(catalog.lookup("McPreviewWidget", "打印"), none());
    }

    #[rstest]
    #[case(TranslationStatus::Finished, Some("Print"))]
    #[case(TranslationStatus::Unfinished, Some("Print"))]
    #[case(TranslationStatus::Vanished, None)]
    #[case(TranslationStatus::Obsolete, None)]
    fn test_display_translation_by_status(
        #[case] status: TranslationStatus,
        #[case] expected: Option<&str>,
    ) {
        let message = Message { status, ..translated("打印", "Print") };
        assert_eq!(message.display_translation(), expected);
    }

    #[googletest::test]
    fn test_display_translation_skips_empty_text() {
        let message = Message { translation: Some(String::new()), ..Message::new("view") };
        expect_that!(message.display_translation(), none());

        let message = Message::new("view");
        expect_that!(message.display_translation(), none());
    }

    #[rstest]
    #[case("unfinished", Some(TranslationStatus::Unfinished))]
    #[case("vanished", Some(TranslationStatus::Vanished))]
    #[case("obsolete", Some(TranslationStatus::Obsolete))]
    #[case("finished", None)]
    #[case("", None)]
    fn test_status_from_type_attr(#[case] value: &str, #[case] expected: Option<TranslationStatus>) {
        assert_eq!(TranslationStatus::from_type_attr(value), expected);
    }

    #[googletest::test]
    fn test_status_attr_round_trip() {
        for status in [
            TranslationStatus::Unfinished,
            TranslationStatus::Vanished,
            TranslationStatus::Obsolete,
        ] {
            let attr = status.type_attr().unwrap();
            expect_that!(TranslationStatus::from_type_attr(attr), some(eq(status)));
        }
        expect_that!(TranslationStatus::Finished.type_attr(), none());
    }

    #[googletest::test]
    fn test_message_count_spans_contexts() {
        let mut first = Context::new("A");
        first.messages.push(Message::new("one"));
        first.messages.push(Message::new("two"));
        let mut second = Context::new("B");
        second.messages.push(Message::new("three"));
        let catalog = Catalog { contexts: vec![first, second], ..Catalog::new() };

        expect_that!(catalog.message_count(), eq(3));
    }
}
