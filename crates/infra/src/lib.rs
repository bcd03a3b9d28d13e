//! Infrastructure layer: record stores, builder services, drafts, config.

pub mod block_store;
pub mod catalog_lifecycle;
pub mod config;
pub mod draft;
pub mod error;
pub mod store;
pub mod variant_reader;


pub use block_store::{AnchorPolicy, BlockStore};
pub use catalog_lifecycle::CatalogLifecycleService;
pub use config::BuilderConfig;
pub use draft::{DebouncePolicy, DraftAutosave, DraftStore, InMemoryDraftStore, draft_key};
pub use error::{ServiceError, ServiceResult, StoreError};
pub use store::{BlockRecords, CatalogRecords, InMemoryRecordStore, ProductRecords};
pub use variant_reader::VariantReader;
