//! Service layer for both deployments.
//! - `integrity` holds the rule table and the single engine that enforces
//!   uniqueness, parent existence, one-to-one references and delete guards.
//! - `unlock` / `maternity` expose per-entity CRUD functions and reports.
//! - Every write runs its checks and mutation inside one transaction.

pub mod errors;
pub mod integrity;
pub mod pagination;
pub mod patch;
pub mod reporting;
pub mod runtime;
pub mod unlock;
pub mod maternity;
#[cfg(test)]
pub mod test_support;
