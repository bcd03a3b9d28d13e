//! Slug normalization and uniqueness-suffix search.
//!
//! Slugs identify catalogs in public URLs and blocks in in-page navigation.
//! Everything here is pure: uniqueness is checked through a caller-supplied
//! predicate (or by iterating [`SlugCandidates`] and querying a store between
//! candidates), so no I/O happens in this module.

use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Maximum length of a normalized slug, in characters.
pub const MAX_SLUG_LEN: usize = 50;

/// Used when the input normalizes to nothing (e.g. "???" or an emoji title).
pub const FALLBACK_SLUG: &str = "pagina";

/// Upper bound on candidates tried by the uniqueness search.
pub const DEFAULT_MAX_ATTEMPTS: usize = 10_000;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SlugError {
    /// Every candidate up to the attempt bound was taken.
    #[error("no free slug for '{base}' after {attempts} attempts")]
    Exhausted { base: String, attempts: usize },
}

/// Normalize free text into a URL-safe slug.
///
/// Lowercases, strips diacritics (NFD + combining marks removed), collapses any
/// run of characters outside `[a-z0-9]` into one hyphen, trims hyphens at both
/// ends and caps the result at [`MAX_SLUG_LEN`]. Symbol-only input yields `""`.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len().min(MAX_SLUG_LEN));
    let mut pending_separator = false;

    for c in text.nfd().filter(|c| !is_combining_mark(*c)) {
        let c = c.to_ascii_lowercase();
        if c.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(c);
        } else {
            pending_separator = true;
        }
    }

    // Only ASCII remains, so byte truncation is char-safe.
    slug.truncate(MAX_SLUG_LEN);
    while slug.ends_with('-') {
        slug.pop();
    }

    slug
}

/// Candidate sequence for a unique slug: `base`, `base-1`, `base-2`, ...
///
/// Bounded by `max_attempts` so a search always terminates.
#[derive(Debug, Clone)]
pub struct SlugCandidates {
    base: String,
    next: usize,
    max_attempts: usize,
}

impl SlugCandidates {
    pub fn new(text: &str, max_attempts: usize) -> Self {
        let base = match slugify(text) {
            s if s.is_empty() => FALLBACK_SLUG.to_string(),
            s => s,
        };
        Self {
            base,
            next: 0,
            max_attempts,
        }
    }

    /// The normalized base every candidate starts with.
    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Error describing an exhausted search over this sequence.
    pub fn exhausted(&self) -> SlugError {
        SlugError::Exhausted {
            base: self.base.clone(),
            attempts: self.max_attempts,
        }
    }
}

impl Iterator for SlugCandidates {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.next >= self.max_attempts {
            return None;
        }
        let candidate = match self.next {
            0 => self.base.clone(),
            n => with_suffix(&self.base, n),
        };
        self.next += 1;
        Some(candidate)
    }
}

/// `base-n`, shortening `base` so the result stays within [`MAX_SLUG_LEN`].
fn with_suffix(base: &str, n: usize) -> String {
    let suffix = format!("-{n}");
    let room = MAX_SLUG_LEN.saturating_sub(suffix.len());
    // Base is ASCII, so byte slicing is char-safe.
    let stem = base[..base.len().min(room)].trim_end_matches('-');
    format!("{stem}{suffix}")
}

/// Find the first candidate derived from `text` for which `exists` is false.
pub fn unique_slug<F>(text: &str, max_attempts: usize, mut exists: F) -> Result<String, SlugError>
where
    F: FnMut(&str) -> bool,
{
    let mut candidates = SlugCandidates::new(text, max_attempts);
    match candidates.by_ref().find(|candidate| !exists(candidate.as_str())) {
        Some(slug) => Ok(slug),
        None => Err(candidates.exhausted()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn slugify_strips_diacritics_and_collapses_separators() {
        assert_eq!(slugify("Cardápio de Verão!!"), "cardapio-de-verao");
        assert_eq!(slugify("  --Açaí & Café--  "), "acai-cafe");
        assert_eq!(slugify("Promoção 2024"), "promocao-2024");
    }

    #[test]
    fn slugify_symbol_only_input_is_empty() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!! ??? ***"), "");
        assert_eq!(slugify("🍕🍔"), "");
    }

    #[test]
    fn slugify_truncates_without_trailing_hyphen() {
        let text = format!("{} tail", "a".repeat(49));
        let slug = slugify(&text);
        assert_eq!(slug, "a".repeat(49));
        assert!(slug.len() <= MAX_SLUG_LEN);
    }

    #[test]
    fn unique_slug_returns_base_when_free() {
        let slug = unique_slug("Menu", DEFAULT_MAX_ATTEMPTS, |_| false).unwrap();
        assert_eq!(slug, "menu");
    }

    #[test]
    fn unique_slug_appends_increasing_suffix() {
        let taken: HashSet<&str> = ["menu", "menu-1", "menu-2"].into_iter().collect();
        let slug = unique_slug("Menu", DEFAULT_MAX_ATTEMPTS, |c| taken.contains(c)).unwrap();
        assert_eq!(slug, "menu-3");
    }

    #[test]
    fn unique_slug_uses_fallback_for_empty_base() {
        let slug = unique_slug("???", DEFAULT_MAX_ATTEMPTS, |_| false).unwrap();
        assert_eq!(slug, FALLBACK_SLUG);
    }

    #[test]
    fn unique_slug_is_bounded() {
        let mut lookups = 0;
        let err = unique_slug("menu", 5, |_| {
            lookups += 1;
            true
        })
        .unwrap_err();
        assert_eq!(lookups, 5);
        assert_eq!(
            err,
            SlugError::Exhausted {
                base: "menu".to_string(),
                attempts: 5
            }
        );
    }

    #[test]
    fn candidates_start_with_base_then_suffixes() {
        let got: Vec<String> = SlugCandidates::new("Loja Nova", 3).collect();
        assert_eq!(got, vec!["loja-nova", "loja-nova-1", "loja-nova-2"]);
    }

    #[test]
    fn suffixed_candidates_stay_within_max_len() {
        let text = "x".repeat(60);
        let taken: HashSet<String> = SlugCandidates::new(&text, 12).collect();
        let slug = unique_slug(&text, DEFAULT_MAX_ATTEMPTS, |c| taken.contains(c)).unwrap();
        assert_eq!(slug, format!("{}-12", "x".repeat(47)));
        assert_eq!(slug.len(), MAX_SLUG_LEN);
    }

    #[test]
    fn shortened_stem_drops_trailing_hyphen() {
        // Cutting this base at 48 chars would leave "...-" before the suffix.
        let text = format!("{} {}", "a".repeat(47), "bcdef");
        let second: Vec<String> = SlugCandidates::new(&text, 2).collect();
        assert_eq!(second[1], format!("{}-1", "a".repeat(47)));
        assert!(!second[1].contains("--"));
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 500,
                ..ProptestConfig::default()
            })]

            /// Property: slugify is idempotent.
            #[test]
            fn slugify_is_idempotent(text in "\\PC{0,80}") {
                let once = slugify(&text);
                prop_assert_eq!(slugify(&once), once);
            }

            /// Property: output alphabet and length are normalized.
            #[test]
            fn slugify_output_is_normalized(text in "\\PC{0,120}") {
                let slug = slugify(&text);
                prop_assert!(slug.len() <= MAX_SLUG_LEN);
                prop_assert!(slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
                prop_assert!(!slug.starts_with('-') && !slug.ends_with('-'));
                prop_assert!(!slug.contains("--"));
            }

            /// Property: every candidate is a normalized slug, even for long bases.
            #[test]
            fn candidates_are_normalized(text in "[a-z ]{40,80}", count in 1usize..30) {
                for candidate in SlugCandidates::new(&text, count) {
                    prop_assert!(candidate.len() <= MAX_SLUG_LEN);
                    prop_assert!(!candidate.contains("--"));
                    prop_assert!(!candidate.starts_with('-') && !candidate.ends_with('-'));
                }
            }

            /// Property: unique_slug never returns a taken slug and keeps the base prefix.
            #[test]
            fn unique_slug_avoids_taken(text in "[A-Za-z ]{1,20}", taken_count in 0usize..20) {
                let base = slugify(&text);
                let mut taken: HashSet<String> = SlugCandidates::new(&text, taken_count).collect();
                taken.insert("unrelated".to_string());

                let slug = unique_slug(&text, DEFAULT_MAX_ATTEMPTS, |c| taken.contains(c)).unwrap();
                prop_assert!(!taken.contains(&slug));
                prop_assert!(slug.starts_with(&base));
            }
        }
    }
}
