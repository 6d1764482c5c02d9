//! String catalog with locale fallback.
//!
//! Lookups never fail: [`LanguageLookup::get_or_default`] yields the
//! selected locale's string, then the first hit along the fallback chain,
//! then the caller's fallback format, then the key itself. Only loading a
//! malformed language file reports an error ([`I18nError::Parse`]).

use rustc_hash::FxHashMap;
use thiserror::Error;

/// Locale identifier (e.g., `"en_us"`, `"de_de"`).
pub type Locale = String;

/// Errors from loading translations.
#[derive(Debug, Error)]
pub enum I18nError {
    /// A language file could not be parsed.
    #[error("parse error in locale '{locale}': {source}")]
    Parse {
        locale: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Resolves a translation key to a raw format string.
pub trait LanguageLookup {
    /// Format string for `key`; `fallback` when the key is unknown, and the
    /// key itself when there is no fallback either.
    fn get_or_default(&self, key: &str, fallback: Option<&str>) -> String;
}

impl<F> LanguageLookup for F
where
    F: Fn(&str, Option<&str>) -> String,
{
    fn get_or_default(&self, key: &str, fallback: Option<&str>) -> String {
        self(key, fallback)
    }
}

/// Lookup with no translations loaded.
#[derive(Debug, Clone, Copy, Default)]
pub struct Untranslated;

impl LanguageLookup for Untranslated {
    fn get_or_default(&self, key: &str, fallback: Option<&str>) -> String {
        fallback.unwrap_or(key).to_owned()
    }
}

/// Key to format-string map for one locale.
#[derive(Debug, Clone, Default)]
pub struct LocaleStrings {
    strings: FxHashMap<String, String>,
}

impl LocaleStrings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a flat `{"key": "format", ...}` language file.
    pub fn from_json(locale: &str, json: &str) -> Result<Self, I18nError> {
        let strings: FxHashMap<String, String> =
            serde_json::from_str(json).map_err(|source| I18nError::Parse {
                locale: locale.to_owned(),
                source,
            })?;
        Ok(Self { strings })
    }

    /// Insert a string, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.strings.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.strings.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.strings.keys().map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for LocaleStrings {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            strings: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Central string catalog with locale fallback.
///
/// # Example
///
/// ```
/// use chatcolors_i18n::catalog::{LocaleStrings, StringCatalog};
///
/// let mut catalog = StringCatalog::new();
/// let en: LocaleStrings = [("chat.type.text", "<%s> %s")].into_iter().collect();
/// catalog.add_locale("en_us", en);
/// catalog.set_fallback_chain(vec!["en_us".into()]);
///
/// assert_eq!(catalog.get("de_de", "chat.type.text"), Some("<%s> %s"));
/// assert_eq!(catalog.get("en_us", "missing"), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StringCatalog {
    locales: FxHashMap<Locale, LocaleStrings>,
    fallback_chain: Vec<Locale>,
}

impl StringCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add strings for a locale, replacing any earlier set.
    pub fn add_locale(&mut self, locale: impl Into<String>, strings: LocaleStrings) {
        self.locales.insert(locale.into(), strings);
    }

    /// Locales consulted, in order, when the requested one lacks a key.
    pub fn set_fallback_chain(&mut self, chain: Vec<Locale>) {
        self.fallback_chain = chain;
    }

    /// Resolve `key` in `locale`, then along the fallback chain.
    #[must_use]
    pub fn get(&self, locale: &str, key: &str) -> Option<&str> {
        if let Some(found) = self.locales.get(locale).and_then(|ls| ls.get(key)) {
            return Some(found);
        }

        self.fallback_chain
            .iter()
            .filter(|fallback| fallback.as_str() != locale)
            .find_map(|fallback| self.locales.get(fallback.as_str())?.get(key))
    }

    /// All registered locale tags, sorted.
    #[must_use]
    pub fn locales(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.locales.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }

    /// Bind this catalog to the locale currently selected by the viewer.
    #[must_use]
    pub fn language(&self, locale: impl Into<String>) -> Language<'_> {
        Language {
            catalog: self,
            locale: locale.into(),
        }
    }
}

/// A catalog viewed through one selected locale.
#[derive(Debug, Clone)]
pub struct Language<'a> {
    catalog: &'a StringCatalog,
    locale: Locale,
}

impl Language<'_> {
    #[must_use]
    pub fn locale(&self) -> &str {
        &self.locale
    }
}

impl LanguageLookup for Language<'_> {
    fn get_or_default(&self, key: &str, fallback: Option<&str>) -> String {
        self.catalog
            .get(&self.locale, key)
            .or(fallback)
            .unwrap_or(key)
            .to_owned()
    }
}
