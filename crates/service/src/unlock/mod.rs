//! Phone-unlock shop services: users, clients, phones, unlock jobs and reports.

pub mod users;
pub mod clients;
pub mod phones;
pub mod unlock_jobs;
pub mod reports;
