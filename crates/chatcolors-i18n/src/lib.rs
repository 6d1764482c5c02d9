#![forbid(unsafe_code)]

//! Translation lookup for chatcolors.
//!
//! Templated chat nodes name a translation key; expanding them needs the
//! raw format string for that key. [`LanguageLookup`] is that seam, and
//! [`StringCatalog`] is a locale-aware implementation of it.

pub mod catalog;

pub use catalog::{I18nError, Language, LanguageLookup, LocaleStrings, StringCatalog, Untranslated};
