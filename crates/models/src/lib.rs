//! SeaORM entities for both deployments plus value-level validation helpers.

pub mod errors;
pub mod db;
pub mod validate;
pub mod unlock;
pub mod maternity;
