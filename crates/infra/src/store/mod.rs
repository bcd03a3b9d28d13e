//! Record-store boundary.
//!
//! The builder persists catalogs, blocks and product rows through the async
//! traits in [`r#trait`]; services never assume a particular backend.

pub mod in_memory;
pub mod r#trait;

pub use in_memory::InMemoryRecordStore;
pub use r#trait::{BlockRecords, CatalogRecords, ProductRecords};
