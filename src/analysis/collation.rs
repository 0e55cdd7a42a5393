//! Locale-aware string ordering.
//!
//! Range conditions compare text the way a reader of the locale expects, not
//! by code point. [`Collator`] implements a three-level comparison:
//!
//! 1. **Primary**: base letters, ignoring accents and case.
//! 2. **Secondary**: accents, compared only when the primary level ties.
//! 3. **Tertiary**: case, lower case first.
//!
//! A final code-point comparison keeps the ordering total.
//!
//! Locale tailoring: Nordic languages (`sv`, `fi`, `da`, `nb`, `nn`, `no`,
//! `is`) sort `å`, `ä`, `æ`, `ö` and `ø` as separate letters after `z`.

use std::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::analysis::locale::Locale;

const NORDIC_LANGUAGES: &[&str] = &["sv", "fi", "da", "nb", "nn", "no", "is"];

/// Letters appended after `z` in Nordic alphabets, in alphabet order.
const NORDIC_LETTERS: &[char] = &['æ', 'ø', 'å', 'ä', 'ö'];

/// Collation weights above any letter the primary level produces from `z`.
const TAILORED_BASE: u32 = 'z' as u32 + 1;

/// Compares strings according to a locale.
#[derive(Debug, Clone)]
pub struct Collator {
    nordic: bool,
}

impl Collator {
    /// Create a collator for `locale`.
    pub fn new(locale: &Locale) -> Self {
        Collator {
            nordic: NORDIC_LANGUAGES.contains(&locale.language()),
        }
    }

    /// Compare two strings.
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        let ka = self.sort_key(a);
        let kb = self.sort_key(b);
        ka.primary
            .cmp(&kb.primary)
            .then_with(|| ka.secondary.cmp(&kb.secondary))
            .then_with(|| ka.tertiary.cmp(&kb.tertiary))
            .then_with(|| a.cmp(b))
    }

    fn tailored_weight(&self, lower: char) -> Option<u32> {
        if !self.nordic {
            return None;
        }
        NORDIC_LETTERS
            .iter()
            .position(|&c| c == lower)
            .map(|idx| TAILORED_BASE + idx as u32)
    }

    fn sort_key(&self, text: &str) -> SortKey {
        let mut key = SortKey::default();
        for c in text.chars() {
            let upper = c.is_uppercase();
            for lower in c.to_lowercase() {
                key.tertiary.push(upper);
                if let Some(weight) = self.tailored_weight(lower) {
                    key.primary.push(weight);
                    key.secondary.push(0);
                    continue;
                }

                let mut accent = 0u32;
                for d in lower.nfkd() {
                    if is_combining_mark(d) {
                        accent = accent.wrapping_mul(31).wrapping_add(d as u32);
                    } else {
                        key.primary.push(d as u32);
                    }
                }
                key.secondary.push(accent);
            }
        }
        key
    }
}

impl Default for Collator {
    fn default() -> Self {
        Collator::new(&Locale::default())
    }
}

#[derive(Debug, Default)]
struct SortKey {
    primary: Vec<u32>,
    secondary: Vec<u32>,
    tertiary: Vec<bool>,
}
