//! Create `consulta_prenatal` with FKs to `gestante` and `profissional`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ConsultaPrenatal::Table)
                    .if_not_exists()
                    .col(uuid(ConsultaPrenatal::IdConsulta).primary_key())
                    .col(uuid(ConsultaPrenatal::IdGestante))
                    .col(uuid(ConsultaPrenatal::IdProfissional))
                    .col(date(ConsultaPrenatal::DataConsulta))
                    .col(integer_null(ConsultaPrenatal::SemanaGestacional))
                    .col(double_null(ConsultaPrenatal::PesoKg))
                    .col(string_len_null(ConsultaPrenatal::PressaoArterial, 16))
                    .col(text_null(ConsultaPrenatal::Observacoes))
                    .col(timestamp_with_time_zone(ConsultaPrenatal::DataCriacao))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_consulta_gestante")
                            .from(ConsultaPrenatal::Table, ConsultaPrenatal::IdGestante)
                            .to(Gestante::Table, Gestante::IdGestante)
                            .on_delete(ForeignKeyAction::NoAction)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_consulta_profissional")
                            .from(ConsultaPrenatal::Table, ConsultaPrenatal::IdProfissional)
                            .to(Profissional::Table, Profissional::IdProfissional)
                            .on_delete(ForeignKeyAction::NoAction)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(ConsultaPrenatal::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum ConsultaPrenatal {
    Table,
    IdConsulta,
    IdGestante,
    IdProfissional,
    DataConsulta,
    SemanaGestacional,
    PesoKg,
    PressaoArterial,
    Observacoes,
    DataCriacao,
}

#[derive(DeriveIden)]
enum Gestante { Table, IdGestante }

#[derive(DeriveIden)]
enum Profissional { Table, IdProfissional }
