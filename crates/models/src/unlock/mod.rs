//! Phone-unlock shop entities.

pub mod user;
pub mod client;
pub mod phone;
pub mod unlock_job;
