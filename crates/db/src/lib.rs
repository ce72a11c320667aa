//! `db` crate — pure persistence layer.
//!
//! Creates the database on first use, applies the schema, stores fetched
//! repositories under one author row and answers the read queries.
//! No business logic lives here.

pub mod config;
pub mod error;
pub mod models;
pub mod pool;
pub mod repository;
pub mod store;

pub use config::StoreConfig;
pub use error::DbError;
pub use pool::DbPool;
pub use store::Store;
