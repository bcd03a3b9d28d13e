//! Catalogs domain module (pages, publish state, theme overrides).
//!
//! Pure domain logic only: record-store orchestration lives in `vitrine-infra`.

pub mod catalog;
pub mod theme;

pub use catalog::{Catalog, CatalogPatch, CatalogStatus, COPY_TITLE_SUFFIX};
pub use theme::{ThemeOverrides, ThemePreset, ThemeTokens};
