//! Create `desbloqueio` table with FKs to `celular` and (optional) `usuario`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Desbloqueio::Table)
                    .if_not_exists()
                    .col(uuid(Desbloqueio::IdDesbloqueio).primary_key())
                    .col(string_len(Desbloqueio::TipoDesbloqueio, 16))
                    .col(string_len(Desbloqueio::Status, 16).default("Pendente"))
                    .col(date(Desbloqueio::DataEntrada))
                    .col(date_null(Desbloqueio::DataSaida))
                    .col(text_null(Desbloqueio::DescricaoProblema))
                    .col(text_null(Desbloqueio::Observacoes))
                    .col(double_null(Desbloqueio::ValorCobrado))
                    .col(uuid(Desbloqueio::CelularId))
                    .col(uuid_null(Desbloqueio::UsuarioResponsavelId))
                    .col(timestamp_with_time_zone(Desbloqueio::DataCriacao))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_desbloqueio_celular")
                            .from(Desbloqueio::Table, Desbloqueio::CelularId)
                            .to(Celular::Table, Celular::IdCelular)
                            .on_delete(ForeignKeyAction::NoAction)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_desbloqueio_usuario")
                            .from(Desbloqueio::Table, Desbloqueio::UsuarioResponsavelId)
                            .to(Usuario::Table, Usuario::IdUsuario)
                            .on_delete(ForeignKeyAction::NoAction)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Desbloqueio::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Desbloqueio {
    Table,
    IdDesbloqueio,
    TipoDesbloqueio,
    Status,
    DataEntrada,
    DataSaida,
    DescricaoProblema,
    Observacoes,
    ValorCobrado,
    CelularId,
    UsuarioResponsavelId,
    DataCriacao,
}

#[derive(DeriveIden)]
enum Celular { Table, IdCelular }

#[derive(DeriveIden)]
enum Usuario { Table, IdUsuario }
