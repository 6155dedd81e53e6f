use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Profissional::Table)
                    .if_not_exists()
                    .col(uuid(Profissional::IdProfissional).primary_key())
                    .col(string_len(Profissional::Nome, 128))
                    .col(string_len(Profissional::Especialidade, 32))
                    .col(string_len_null(Profissional::RegistroProfissional, 32))
                    .col(string_len(Profissional::Email, 255).unique_key())
                    .col(string_len_null(Profissional::Telefone, 32))
                    .col(timestamp_with_time_zone(Profissional::DataRegistro))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Profissional::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Profissional { Table, IdProfissional, Nome, Especialidade, RegistroProfissional, Email, Telefone, DataRegistro }
