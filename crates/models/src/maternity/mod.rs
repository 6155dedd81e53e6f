//! Maternity-ward entities.

pub mod pregnant_person;
pub mod professional;
pub mod prenatal_visit;
pub mod exam;
pub mod birth;
