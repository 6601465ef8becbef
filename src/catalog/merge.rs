//! Catalog merging.
//!
//! Combines catalogs produced by separate scanner runs or maintained by
//! separate teams. Duplicate `(context, source)` keys are resolved by
//! preferring the entry that carries a non-empty translation; ties keep the
//! first occurrence. Locations are unioned with exact duplicates removed.

use std::collections::HashMap;
use std::mem;

use super::types::{
    Catalog,
    Context,
    Message,
};

impl Catalog {
    /// Merge `other` into `self`, returning the combined catalog.
    ///
    /// Context order is `self`'s, with `other`'s unmatched contexts
    /// appended; the same rule applies to messages within a context.
    /// Root metadata keeps `self`'s values, filling fields `self` left
    /// unset from `other`.
    #[must_use]
    pub fn merge(mut self, other: Self) -> Self {
        if self.language.is_none() {
            self.language = other.language;
        }
        if self.source_language.is_none() {
            self.source_language = other.source_language;
        }

        let mut by_name: HashMap<String, usize> = HashMap::new();
        for (index, context) in self.contexts.iter().enumerate() {
            by_name.entry(context.name.clone()).or_insert(index);
        }

        for context in other.contexts {
            match by_name.get(&context.name) {
                Some(&index) => {
                    if let Some(existing) = self.contexts.get_mut(index) {
                        merge_context(existing, context);
                    }
                }
                None => {
                    by_name.insert(context.name.clone(), self.contexts.len());
                    self.contexts.push(context);
                }
            }
        }

        self
    }
}

/// Fold `incoming`'s messages into `target`, keyed by source text.
fn merge_context(target: &mut Context, incoming: Context) {
    let mut by_source: HashMap<String, usize> = HashMap::new();
    for (index, message) in target.messages.iter().enumerate() {
        by_source.entry(message.source.clone()).or_insert(index);
    }

    for message in incoming.messages {
        match by_source.get(&message.source) {
            Some(&index) => {
                if let Some(existing) = target.messages.get_mut(index) {
                    merge_message(existing, message);
                }
            }
            None => {
                by_source.insert(message.source.clone(), target.messages.len());
                target.messages.push(message);
            }
        }
    }
}

/// Resolve one duplicate key. The entry with a non-empty translation wins;
/// when both or neither carry one, the existing entry stands. The winner's
/// locations come first, followed by the loser's unseen ones.
fn merge_message(existing: &mut Message, incoming: Message) {
    if incoming.has_translation() && !existing.has_translation() {
        let displaced = mem::replace(existing, incoming);
        extend_locations(existing, displaced);
    } else {
        extend_locations(existing, incoming);
    }
}

/// Append `loser`'s locations that `winner` does not already carry.
fn extend_locations(winner: &mut Message, loser: Message) {
    for location in loser.locations {
        if !winner.locations.contains(&location) {
            winner.locations.push(location);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;

    use super::super::types::{
        Location,
        TranslationStatus,
    };
    use super::*;

    fn catalog_with(context: &str, source: &str, translation: Option<&str>) -> Catalog {
        let mut ctx = Context::new(context);
        ctx.messages.push(Message {
            translation: translation.map(str::to_string),
            ..Message::new(source)
        });
        Catalog { contexts: vec![ctx], ..Catalog::new() }
    }

    #[googletest::test]
    fn test_merge_appends_new_contexts_in_order() {
        let a = catalog_with("McPrinter", "打印", Some("Print"));
        let b = catalog_with("McPreviewWidget", "放大", Some("Amplify "));

        let merged = a.merge(b);

        expect_that!(merged.contexts.len(), eq(2));
        expect_that!(merged.contexts[0].name, eq("McPrinter"));
        expect_that!(merged.contexts[1].name, eq("McPreviewWidget"));
    }

    #[googletest::test]
    fn test_merge_prefers_non_empty_translation() {
        let untranslated = catalog_with("McPrinter", "打印", None);
        let translated = catalog_with("McPrinter", "打印", Some("Print"));

        let forward = untranslated.clone().merge(translated.clone());
        let backward = translated.merge(untranslated);

        // The translated entry wins regardless of merge order.
        expect_that!(forward.lookup("McPrinter", "打印"), some(eq("Print")));
        expect_that!(backward.lookup("McPrinter", "打印"), some(eq("Print")));
    }

    #[googletest::test]
    fn test_merge_tie_keeps_first_occurrence() {
        let first = catalog_with("McPrinter", "删除", Some("Delete "));
        let second = catalog_with("McPrinter", "删除", Some("Remove"));

        let merged = first.merge(second);

        expect_that!(merged.lookup("McPrinter", "删除"), some(eq("Delete ")));
        expect_that!(merged.contexts[0].messages.len(), eq(1));
    }

    #[googletest::test]
    fn test_merge_unions_locations_without_duplicates() {
        let shared = Location { filename: "../../Interface/McPrinter.cpp".to_string(), line: 44 };
        let extra = Location { filename: "../../Interface/McPrinter.cpp".to_string(), line: 305 };

        let mut a = catalog_with("McPrinter", "Template%1", None);
        a.contexts[0].messages[0].locations.push(shared.clone());
        let mut b = catalog_with("McPrinter", "Template%1", Some("Template%1"));
        b.contexts[0].messages[0].locations.push(shared.clone());
        b.contexts[0].messages[0].locations.push(extra.clone());

        let merged = a.merge(b);
        let message = merged.contexts[0].message("Template%1").unwrap();

        expect_that!(message.locations, container_eq(vec![shared, extra]));
    }

    #[googletest::test]
    fn test_merge_keeps_vanished_history() {
        let mut live = catalog_with("McPrinter", "图片", None);
        live.contexts[0].messages[0].translation = None;
        let mut vanished = catalog_with("McPrinter", "图片", Some("Picture"));
        vanished.contexts[0].messages[0].status = TranslationStatus::Vanished;

        let merged = live.merge(vanished);
        let message = merged.contexts[0].message("图片").unwrap();

        // The vanished entry carries the only translation, so it wins, and
        // its status must survive the merge.
        expect_that!(message.status, eq(TranslationStatus::Vanished));
        expect_that!(message.translation.as_deref(), some(eq("Picture")));
        expect_that!(merged.lookup("McPrinter", "图片"), none());
    }

    #[googletest::test]
    fn test_merge_non_conflicting_keys_commute() {
        let a = catalog_with("McPrinter", "打印", Some("Print"));
        let b = catalog_with("McPrinter", "保存", Some("Save "));

        let forward = a.clone().merge(b.clone());
        let backward = b.merge(a);

        expect_that!(forward.lookup("McPrinter", "打印"), some(eq("Print")));
        expect_that!(forward.lookup("McPrinter", "保存"), some(eq("Save ")));
        expect_that!(backward.lookup("McPrinter", "打印"), some(eq("Print")));
        expect_that!(backward.lookup("McPrinter", "保存"), some(eq("Save ")));
    }

    #[googletest::test]
    fn test_merge_fills_missing_root_metadata() {
        let mut a = Catalog::new();
        a.language = None;
        let mut b = Catalog::new();
        b.language = Some("en_US".to_string());
        b.source_language = Some("zh_CN".to_string());

        let merged = a.merge(b);

        expect_that!(merged.language.as_deref(), some(eq("en_US")));
        expect_that!(merged.source_language.as_deref(), some(eq("zh_CN")));
    }
}
