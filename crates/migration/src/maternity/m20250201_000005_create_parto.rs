//! Create `parto`; `id_gestante` is unique so a pregnant person has at most
//! one birth record.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Parto::Table)
                    .if_not_exists()
                    .col(uuid(Parto::IdParto).primary_key())
                    .col(uuid(Parto::IdGestante).unique_key())
                    .col(uuid(Parto::IdProfissional))
                    .col(date(Parto::DataParto))
                    .col(string_len(Parto::TipoParto, 16))
                    .col(integer_null(Parto::SemanaGestacional))
                    .col(integer_null(Parto::PesoBebeG))
                    .col(string_len_null(Parto::SexoBebe, 16))
                    .col(text_null(Parto::Observacoes))
                    .col(timestamp_with_time_zone(Parto::DataCriacao))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_parto_gestante")
                            .from(Parto::Table, Parto::IdGestante)
                            .to(Gestante::Table, Gestante::IdGestante)
                            .on_delete(ForeignKeyAction::NoAction)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_parto_profissional")
                            .from(Parto::Table, Parto::IdProfissional)
                            .to(Profissional::Table, Profissional::IdProfissional)
                            .on_delete(ForeignKeyAction::NoAction)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Parto::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Parto {
    Table,
    IdParto,
    IdGestante,
    IdProfissional,
    DataParto,
    TipoParto,
    SemanaGestacional,
    PesoBebeG,
    SexoBebe,
    Observacoes,
    DataCriacao,
}

#[derive(DeriveIden)]
enum Gestante { Table, IdGestante }

#[derive(DeriveIden)]
enum Profissional { Table, IdProfissional }
