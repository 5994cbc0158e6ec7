#![forbid(unsafe_code)]

pub mod catalog;
pub mod repository;
pub mod seed;

pub use catalog::{Catalog, CatalogError};
pub use repository::{
    ContentRepository, InMemoryRepository, ProfileRepository, Storage, StorageError,
};
