#![forbid(unsafe_code)]

//! Writing-direction lookup.
//!
//! Direction has no effect on navigation logic; it only mirrors which icon
//! the previous and next controls show. Hosts either supply a fixed
//! [`Direction`] or derive one from a locale tag with [`LocaleDirection`].

use std::env;

/// Writing direction of the surrounding document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Left to right.
    #[default]
    Ltr,
    /// Right to left.
    Rtl,
}

impl Direction {
    /// Whether this is right-to-left.
    #[must_use]
    pub const fn is_rtl(self) -> bool {
        matches!(self, Self::Rtl)
    }
}

/// Source of the current writing direction.
pub trait DirectionLookup {
    /// The direction in effect right now.
    fn direction(&self) -> Direction;
}

impl DirectionLookup for Direction {
    fn direction(&self) -> Direction {
        *self
    }
}

/// Primary language subtags written right to left.
const RTL_LANGUAGES: &[&str] = &[
    "ar", "arc", "ckb", "dv", "fa", "he", "iw", "ks", "ps", "sd", "ug", "ur", "yi",
];

/// Direction derived from a BCP 47-ish locale tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleDirection {
    locale: String,
}

impl LocaleDirection {
    /// Build from a locale tag such as `"ar-EG"` or `"he_IL.UTF-8"`.
    #[must_use]
    pub fn new(locale: &str) -> Self {
        Self {
            locale: normalize_locale(locale).unwrap_or_else(|| "en".to_string()),
        }
    }

    /// Build from `LC_ALL`, then `LANG`, falling back to `"en"`.
    #[must_use]
    pub fn system() -> Self {
        let lc_all = env::var("LC_ALL").ok();
        let lang = env::var("LANG").ok();
        Self::from_env_values(lc_all.as_deref(), lang.as_deref())
    }

    fn from_env_values(lc_all: Option<&str>, lang: Option<&str>) -> Self {
        let locale = lc_all
            .and_then(normalize_locale)
            .or_else(|| lang.and_then(normalize_locale))
            .unwrap_or_else(|| "en".to_string());
        Self { locale }
    }

    /// The normalized locale tag.
    #[must_use]
    pub fn locale(&self) -> &str {
        &self.locale
    }
}

impl DirectionLookup for LocaleDirection {
    fn direction(&self) -> Direction {
        let primary = self.locale.split('-').next().unwrap_or_default();
        if RTL_LANGUAGES
            .iter()
            .any(|lang| primary.eq_ignore_ascii_case(lang))
        {
            Direction::Rtl
        } else {
            Direction::Ltr
        }
    }
}

fn normalize_locale(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let raw = raw.split('@').next().unwrap_or(raw);
    let raw = raw.split('.').next().unwrap_or(raw).trim();
    if raw.is_empty() {
        return None;
    }
    if raw.eq_ignore_ascii_case("c") || raw.eq_ignore_ascii_case("posix") {
        return Some("en".to_string());
    }
    Some(raw.replace('_', "-"))
}
