//! Schema migrations, one migrator per deployment.
//! Each deployment owns its own SQLite file, so the two migrators never share
//! a `seaql_migrations` table.
pub use sea_orm_migration::prelude::*;

pub mod maternity;
pub mod unlock;
