pub mod memory_store;
pub mod schema;

#[cfg(feature = "sqlite")]
pub mod sqlite_store;

pub use memory_store::InMemoryGraphStore;

#[cfg(feature = "sqlite")]
pub use sqlite_store::SqliteGraphStore;
