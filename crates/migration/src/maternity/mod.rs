//! Maternity-ward schema, registered in dependency order.
//! Indexes are applied last.
use sea_orm_migration::prelude::*;

mod m20250201_000001_create_gestante;
mod m20250201_000002_create_profissional;
mod m20250201_000003_create_consulta_prenatal;
mod m20250201_000004_create_exame;
mod m20250201_000005_create_parto;
mod m20250201_000006_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250201_000001_create_gestante::Migration),
            Box::new(m20250201_000002_create_profissional::Migration),
            Box::new(m20250201_000003_create_consulta_prenatal::Migration),
            Box::new(m20250201_000004_create_exame::Migration),
            Box::new(m20250201_000005_create_parto::Migration),
            // Indexes should always be applied last
            Box::new(m20250201_000006_add_indexes::Migration),
        ]
    }
}
