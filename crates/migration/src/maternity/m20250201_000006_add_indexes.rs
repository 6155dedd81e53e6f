use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Consultas: nested listing and delete guards on both parents
        manager
            .create_index(
                Index::create()
                    .name("idx_consulta_gestante")
                    .table(ConsultaPrenatal::Table)
                    .col(ConsultaPrenatal::IdGestante)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_consulta_profissional")
                    .table(ConsultaPrenatal::Table)
                    .col(ConsultaPrenatal::IdProfissional)
                    .to_owned(),
            )
            .await?;

        // Exames: nested listing
        manager
            .create_index(
                Index::create()
                    .name("idx_exame_gestante")
                    .table(Exame::Table)
                    .col(Exame::IdGestante)
                    .to_owned(),
            )
            .await?;

        // Partos: delete guard on professional, period reports
        manager
            .create_index(
                Index::create()
                    .name("idx_parto_profissional")
                    .table(Parto::Table)
                    .col(Parto::IdProfissional)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_parto_data")
                    .table(Parto::Table)
                    .col(Parto::DataParto)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_consulta_gestante").table(ConsultaPrenatal::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_consulta_profissional").table(ConsultaPrenatal::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_exame_gestante").table(Exame::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_parto_profissional").table(Parto::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_parto_data").table(Parto::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ConsultaPrenatal { Table, IdGestante, IdProfissional }

#[derive(DeriveIden)]
enum Exame { Table, IdGestante }

#[derive(DeriveIden)]
enum Parto { Table, IdProfissional, DataParto }
