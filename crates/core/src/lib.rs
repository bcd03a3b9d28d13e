//! `vitrine-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! identifiers, the domain error model, and slug normalization shared by the
//! block and catalog subsystems.

pub mod entity;
pub mod error;
pub mod id;
pub mod slug;
pub mod value_object;

pub use entity::{Entity, position_of};
pub use error::{DomainError, DomainResult};
pub use id::{BlockId, CatalogId, OptionId, OptionValueId, ProductId, UserId, VariantId};
pub use slug::{DEFAULT_MAX_ATTEMPTS, FALLBACK_SLUG, SlugCandidates, SlugError, slugify, unique_slug};
pub use value_object::ValueObject;
