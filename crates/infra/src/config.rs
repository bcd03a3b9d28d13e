//! Runtime configuration for the builder services.

use std::time::Duration;

use vitrine_core::DEFAULT_MAX_ATTEMPTS;

pub const ENV_SLUG_MAX_ATTEMPTS: &str = "VITRINE_SLUG_MAX_ATTEMPTS";
pub const ENV_DRAFT_DEBOUNCE_MS: &str = "VITRINE_DRAFT_DEBOUNCE_MS";
pub const ENV_COPY_SLUG_SUFFIX: &str = "VITRINE_COPY_SLUG_SUFFIX";

const DEFAULT_DRAFT_DEBOUNCE_MS: u64 = 800;
const DEFAULT_COPY_SLUG_SUFFIX: &str = "copia";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuilderConfig {
    /// Upper bound on slug / anchor candidates tried before giving up.
    pub slug_max_attempts: usize,
    /// Quiet period before a staged draft is written.
    pub draft_debounce: Duration,
    /// Appended to a catalog slug when the catalog is duplicated.
    pub copy_slug_suffix: String,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            slug_max_attempts: DEFAULT_MAX_ATTEMPTS,
            draft_debounce: Duration::from_millis(DEFAULT_DRAFT_DEBOUNCE_MS),
            copy_slug_suffix: DEFAULT_COPY_SLUG_SUFFIX.to_string(),
        }
    }
}

impl BuilderConfig {
    /// Read the configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    ///
    /// Missing or unparsable values keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let slug_max_attempts = parse_or(&lookup, ENV_SLUG_MAX_ATTEMPTS, defaults.slug_max_attempts)
            .max(1);
        let draft_debounce = Duration::from_millis(parse_or(
            &lookup,
            ENV_DRAFT_DEBOUNCE_MS,
            DEFAULT_DRAFT_DEBOUNCE_MS,
        ));
        let copy_slug_suffix = lookup(ENV_COPY_SLUG_SUFFIX)
            .map(|s| vitrine_core::slugify(&s))
            .filter(|s| !s.is_empty() && s != vitrine_core::FALLBACK_SLUG)
            .unwrap_or(defaults.copy_slug_suffix);

        Self {
            slug_max_attempts,
            draft_debounce,
            copy_slug_suffix,
        }
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "unparsable configuration value, using default");
            default
        }),
    }
}
