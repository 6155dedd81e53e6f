use sea_orm::DatabaseConnection;

/// Shared handler state: the deployment's pool and its service name.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub service: &'static str,
}

impl AppState {
    pub fn new(db: DatabaseConnection, service: &'static str) -> Self {
        Self { db, service }
    }
}
