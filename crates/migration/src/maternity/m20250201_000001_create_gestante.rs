//! Create `gestante` table; `cpf` is the national ID and unique.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Gestante::Table)
                    .if_not_exists()
                    .col(uuid(Gestante::IdGestante).primary_key())
                    .col(string_len(Gestante::Nome, 128))
                    .col(string_len(Gestante::Cpf, 14).unique_key())
                    .col(date(Gestante::DataNascimento))
                    .col(string_len_null(Gestante::Telefone, 32))
                    .col(string_len_null(Gestante::Email, 255))
                    .col(string_null(Gestante::Endereco))
                    .col(string_len_null(Gestante::TipoSanguineo, 4))
                    .col(date_null(Gestante::DataUltimaMenstruacao))
                    .col(timestamp_with_time_zone(Gestante::DataRegistro))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Gestante::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Gestante {
    Table,
    IdGestante,
    Nome,
    Cpf,
    DataNascimento,
    Telefone,
    Email,
    Endereco,
    TipoSanguineo,
    DataUltimaMenstruacao,
    DataRegistro,
}
