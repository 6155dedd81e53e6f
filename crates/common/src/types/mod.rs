use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
    pub service: &'static str,
    pub timestamp: DateTime<Utc>,
}

impl Health {
    pub fn healthy(service: &'static str) -> Self {
        Self { status: "healthy", service, timestamp: Utc::now() }
    }
}

/// Body returned by delete endpoints.
#[derive(Serialize, Debug)]
pub struct Removed {
    pub message: String,
}

impl Removed {
    pub fn new(entity: &str) -> Self {
        Self { message: format!("{entity} removed") }
    }
}
