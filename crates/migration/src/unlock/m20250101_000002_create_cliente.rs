use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Cliente::Table)
                    .if_not_exists()
                    .col(uuid(Cliente::IdCliente).primary_key())
                    .col(string_len(Cliente::Nome, 128))
                    .col(string_len(Cliente::Telefone, 32))
                    .col(string_len(Cliente::Email, 255).unique_key())
                    .col(string_null(Cliente::Endereco))
                    .col(timestamp_with_time_zone(Cliente::DataRegistro))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Cliente::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Cliente { Table, IdCliente, Nome, Telefone, Email, Endereco, DataRegistro }
