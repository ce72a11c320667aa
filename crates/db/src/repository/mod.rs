//! Repository functions — one function per database operation.
//!
//! Inserts take a `&mut PgConnection` so they can run inside the caller's
//! transaction; reads take a `&PgPool`. No business logic, pure SQL.

pub mod repositories;
pub mod users;
