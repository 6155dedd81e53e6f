#![cfg(test)]
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;

/// Fresh in-memory database with the phone-unlock schema.
pub async fn unlock_db() -> Result<DatabaseConnection, anyhow::Error> {
    let db = models::db::connect_in_memory().await?;
    migration::unlock::Migrator::up(&db, None).await?;
    Ok(db)
}

/// Fresh in-memory database with the maternity schema.
pub async fn maternity_db() -> Result<DatabaseConnection, anyhow::Error> {
    let db = models::db::connect_in_memory().await?;
    migration::maternity::Migrator::up(&db, None).await?;
    Ok(db)
}
