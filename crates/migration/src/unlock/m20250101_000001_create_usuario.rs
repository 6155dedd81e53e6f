//! Create `usuario` table.
//!
//! Shop staff; `username` and `email` are unique, `email` may be null.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Usuario::Table)
                    .if_not_exists()
                    .col(uuid(Usuario::IdUsuario).primary_key())
                    .col(string_len(Usuario::Username, 64).unique_key())
                    .col(string_len(Usuario::SenhaHash, 255))
                    .col(string_len_null(Usuario::Email, 255).unique_key())
                    .col(string_len_null(Usuario::NomeCompleto, 128))
                    .col(timestamp_with_time_zone(Usuario::DataCriacao))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Usuario::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Usuario { Table, IdUsuario, Username, SenhaHash, Email, NomeCompleto, DataCriacao }
