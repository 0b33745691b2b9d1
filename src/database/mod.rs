pub mod manager;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod store;
pub mod update_builder;

pub use manager::DatabaseError;
pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use store::{NoteStore, ProjectStore, Store, StoreResult, TaskStore, UserStore};
pub use update_builder::{UpdateBuilder, UpdateStatement};
