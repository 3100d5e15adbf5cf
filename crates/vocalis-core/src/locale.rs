//! Locale validation and resolution
//!
//! Model files are usually written for generic locales (`en`), while platforms
//! may need specific ones (`en-US`). The [`LocaleResolver`] expands a model
//! locale into the list of platform locales to build.

use crate::error::{Error, Result};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

static LOCALE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z]{2,3}([-_][a-zA-Z0-9]{2,4})?$").expect("locale regex is valid")
});

/// Check that `locale` looks like `en`, `en-US` or `pt_br`
pub fn validate_locale(locale: &str) -> Result<()> {
    if LOCALE_RE.is_match(locale) {
        Ok(())
    } else {
        Err(Error::invalid_locale(locale))
    }
}

/// Language part of a locale (`en-US` -> `en`)
pub fn locale_prefix(locale: &str) -> &str {
    locale.split(['-', '_']).next().unwrap_or(locale)
}

/// Expands model locales into platform locales
#[derive(Debug, Clone, Default)]
pub struct LocaleResolver {
    mappings: BTreeMap<String, Vec<String>>,
    prefix_fallback: bool,
}

impl LocaleResolver {
    pub fn new(mappings: BTreeMap<String, Vec<String>>, prefix_fallback: bool) -> Self {
        Self {
            mappings,
            prefix_fallback,
        }
    }

    /// Platform locales to build for one model locale.
    ///
    /// An explicit mapping yields the locale followed by its mapped locales.
    /// Without one, the prefix heuristic (when enabled) puts the generic
    /// language in front of the locale. Duplicates are removed, first one wins.
    pub fn resolve(&self, locale: &str) -> Vec<String> {
        let mut resolved: Vec<String> = Vec::new();
        let mut push = |l: &str| {
            if !resolved.iter().any(|r| r == l) {
                resolved.push(l.to_string());
            }
        };

        match self.mappings.get(locale) {
            Some(mapped) => {
                push(locale);
                for l in mapped {
                    push(l);
                }
            }
            None => {
                if self.prefix_fallback {
                    push(locale_prefix(locale));
                }
                push(locale);
            }
        }

        resolved
    }

    /// Pick the default locale.
    ///
    /// A configured locale always wins. Otherwise English is preferred when any
    /// locale is English, then the first locale (reduced to its prefix when the
    /// prefix heuristic is enabled).
    pub fn default_locale(&self, configured: Option<&str>, locales: &[String]) -> Result<String> {
        if let Some(locale) = configured {
            return Ok(locale.to_string());
        }

        if locales.iter().any(|l| locale_prefix(l) == "en") {
            return Ok("en".to_string());
        }

        let first = locales.first().ok_or(Error::MissingDefaultLocale)?;
        if self.prefix_fallback {
            Ok(locale_prefix(first).to_string())
        } else {
            Ok(first.clone())
        }
    }
}
