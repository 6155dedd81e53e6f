//! Maternity-ward services.

pub mod pregnant_people;
pub mod professionals;
pub mod prenatal_visits;
pub mod exams;
pub mod births;
pub mod reports;
