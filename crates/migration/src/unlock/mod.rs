//! Phone-unlock shop schema, registered in dependency order.
//! Indexes are applied last.
use sea_orm_migration::prelude::*;

mod m20250101_000001_create_usuario;
mod m20250101_000002_create_cliente;
mod m20250101_000003_create_celular;
mod m20250101_000004_create_desbloqueio;
mod m20250101_000005_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_usuario::Migration),
            Box::new(m20250101_000002_create_cliente::Migration),
            Box::new(m20250101_000003_create_celular::Migration),
            Box::new(m20250101_000004_create_desbloqueio::Migration),
            // Indexes should always be applied last
            Box::new(m20250101_000005_add_indexes::Migration),
        ]
    }
}
