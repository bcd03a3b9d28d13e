//! Error types of the record-store boundary and the services built on it.

use thiserror::Error;

use vitrine_catalogs::Catalog;
use vitrine_core::{DomainError, SlugError};

/// Failure reported by a record store implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("record not found: {0}")]
    NotFound(String),

    /// A uniqueness constraint (e.g. `(user_id, slug)`) rejected the write.
    #[error("duplicate record: {0}")]
    Duplicate(String),

    /// Transport / backend failure (connection, poisoned lock, injected fault).
    #[error("backend error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}

/// Error returned by the builder services.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Slug(#[from] SlugError),

    /// The duplicated catalog row exists but its blocks could not be copied.
    /// Nothing is rolled back; the caller decides whether to keep or delete it.
    #[error("catalog {} was created but copying its blocks failed: {source}", .catalog.id)]
    PartialDuplicate {
        catalog: Box<Catalog>,
        source: StoreError,
    },
}

pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use vitrine_core::{CatalogId, UserId};

    use super::*;

    #[test]
    fn partial_duplicate_names_the_new_catalog() {
        let catalog = Catalog::new(CatalogId::new(), UserId::new(), "Menu", "menu".to_string(), Utc::now())
            .unwrap();
        let id = catalog.id;
        let err = ServiceError::PartialDuplicate {
            catalog: Box::new(catalog),
            source: StoreError::backend("timeout"),
        };
        let msg = err.to_string();
        assert!(msg.contains(&id.to_string()));
        assert!(msg.contains("timeout"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn domain_errors_convert() {
        let err: ServiceError = DomainError::not_found("catalog x").into();
        assert!(matches!(err, ServiceError::Domain(DomainError::NotFound(_))));
    }
}
