use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Exame::Table)
                    .if_not_exists()
                    .col(uuid(Exame::IdExame).primary_key())
                    .col(uuid(Exame::IdGestante))
                    .col(string_len(Exame::TipoExame, 64))
                    .col(date(Exame::DataExame))
                    .col(text_null(Exame::Resultado))
                    .col(text_null(Exame::Observacoes))
                    .col(timestamp_with_time_zone(Exame::DataCriacao))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_exame_gestante")
                            .from(Exame::Table, Exame::IdGestante)
                            .to(Gestante::Table, Gestante::IdGestante)
                            .on_delete(ForeignKeyAction::NoAction)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Exame::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Exame { Table, IdExame, IdGestante, TipoExame, DataExame, Resultado, Observacoes, DataCriacao }

#[derive(DeriveIden)]
enum Gestante { Table, IdGestante }
