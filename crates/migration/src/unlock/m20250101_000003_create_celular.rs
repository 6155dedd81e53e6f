//! Create `celular` table with FK to `cliente`.
//!
//! Deleting a client with registered phones is refused by the store.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Celular::Table)
                    .if_not_exists()
                    .col(uuid(Celular::IdCelular).primary_key())
                    .col(string_len(Celular::Marca, 64))
                    .col(string_len(Celular::Modelo, 64))
                    .col(string_len(Celular::Imei, 32).unique_key())
                    .col(uuid(Celular::ClienteId))
                    .col(timestamp_with_time_zone(Celular::DataRegistro))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_celular_cliente")
                            .from(Celular::Table, Celular::ClienteId)
                            .to(Cliente::Table, Cliente::IdCliente)
                            .on_delete(ForeignKeyAction::NoAction)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Celular::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Celular { Table, IdCelular, Marca, Modelo, Imei, ClienteId, DataRegistro }

#[derive(DeriveIden)]
enum Cliente { Table, IdCliente }
