use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Celular: lookups and delete guard by owner
        manager
            .create_index(
                Index::create()
                    .name("idx_celular_cliente")
                    .table(Celular::Table)
                    .col(Celular::ClienteId)
                    .to_owned(),
            )
            .await?;

        // Desbloqueio: delete guards on phone and responsible user
        manager
            .create_index(
                Index::create()
                    .name("idx_desbloqueio_celular")
                    .table(Desbloqueio::Table)
                    .col(Desbloqueio::CelularId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_desbloqueio_usuario")
                    .table(Desbloqueio::Table)
                    .col(Desbloqueio::UsuarioResponsavelId)
                    .to_owned(),
            )
            .await?;

        // Desbloqueio: reports filter on status and entry date
        manager
            .create_index(
                Index::create()
                    .name("idx_desbloqueio_status")
                    .table(Desbloqueio::Table)
                    .col(Desbloqueio::Status)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_desbloqueio_data_entrada")
                    .table(Desbloqueio::Table)
                    .col(Desbloqueio::DataEntrada)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_celular_cliente").table(Celular::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_desbloqueio_celular").table(Desbloqueio::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_desbloqueio_usuario").table(Desbloqueio::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_desbloqueio_status").table(Desbloqueio::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_desbloqueio_data_entrada").table(Desbloqueio::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Celular { Table, ClienteId }

#[derive(DeriveIden)]
enum Desbloqueio { Table, CelularId, UsuarioResponsavelId, Status, DataEntrada }
