//! Picking translation rows along a locale fallback chain.

use crate::entities::{faqs_i18n, projects_i18n, services_i18n};

/// A locale-scoped row belonging to a parent entity.
pub trait Translation {
    /// Parent row ID.
    fn parent_id(&self) -> &str;
    /// Locale code.
    fn locale(&self) -> &str;
}

impl Translation for projects_i18n::Model {
    fn parent_id(&self) -> &str {
        &self.project_id
    }
    fn locale(&self) -> &str {
        &self.locale
    }
}

impl Translation for services_i18n::Model {
    fn parent_id(&self) -> &str {
        &self.service_id
    }
    fn locale(&self) -> &str {
        &self.locale
    }
}

impl Translation for faqs_i18n::Model {
    fn parent_id(&self) -> &str {
        &self.faq_id
    }
    fn locale(&self) -> &str {
        &self.locale
    }
}

/// A parent row paired with the translation chosen for the request locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Localized<M, T> {
    /// The base row.
    pub item: M,
    /// Picked translation, `None` when the row has none at all.
    pub translation: Option<T>,
}

/// Pairs every item with its best translation along `chain`.
pub fn localize<M, T, F>(items: Vec<M>, rows: &[T], chain: &[String], id_of: F) -> Vec<Localized<M, T>>
where
    T: Translation + Clone,
    F: Fn(&M) -> &str,
{
    items
        .into_iter()
        .map(|item| {
            let translation = pick_translation(rows, id_of(&item), chain).cloned();
            Localized { item, translation }
        })
        .collect()
}

/// Picks the translation of `parent_id` for the first locale in `chain`
/// that has one, else any translation of the parent.
pub fn pick_translation<'a, T: Translation>(
    rows: &'a [T],
    parent_id: &str,
    chain: &[String],
) -> Option<&'a T> {
    chain
        .iter()
        .find_map(|locale| {
            rows.iter()
                .find(|row| row.parent_id() == parent_id && row.locale() == locale)
        })
        .or_else(|| rows.iter().find(|row| row.parent_id() == parent_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone)]
    struct Row(&'static str, &'static str);

    impl Translation for Row {
        fn parent_id(&self) -> &str {
            self.0
        }
        fn locale(&self) -> &str {
            self.1
        }
    }

    fn chain(codes: &[&str]) -> Vec<String> {
        codes.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn picks_requested_locale_first() {
        let rows = [Row("p1", "tr"), Row("p1", "en"), Row("p2", "en")];
        let picked = pick_translation(&rows, "p1", &chain(&["en", "tr"])).unwrap();
        assert_eq!(picked.locale(), "en");
    }

    #[test]
    fn falls_back_along_chain() {
        let rows = [Row("p1", "tr"), Row("p2", "en")];
        let picked = pick_translation(&rows, "p1", &chain(&["en", "tr"])).unwrap();
        assert_eq!(picked.locale(), "tr");
    }

    #[test]
    fn falls_back_to_any_translation_of_parent() {
        let rows = [Row("p1", "de")];
        let picked = pick_translation(&rows, "p1", &chain(&["en", "tr"])).unwrap();
        assert_eq!(picked.locale(), "de");
    }

    #[test]
    fn localize_keeps_item_order() {
        let rows = [Row("b", "en"), Row("a", "tr")];
        let items = vec!["a", "b", "c"];
        let localized = localize(items, &rows, &chain(&["en", "tr"]), |id| *id);

        let picked: Vec<_> = localized
            .iter()
            .map(|l| (l.item, l.translation.as_ref().map(|t| t.locale())))
            .collect();
        assert_eq!(picked, vec![("a", Some("tr")), ("b", Some("en")), ("c", None)]);
    }

    #[test]
    fn missing_parent_yields_none() {
        let rows = [Row("p1", "tr")];
        assert!(pick_translation(&rows, "p9", &chain(&["tr"])).is_none());
    }
}
