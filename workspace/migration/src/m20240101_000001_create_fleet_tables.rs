use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create lojas table
        manager
            .create_table(
                Table::create()
                    .table(Lojas::Table)
                    .if_not_exists()
                    .col(pk_uuid(Lojas::Id))
                    .col(string(Lojas::Nome))
                    .col(string_null(Lojas::Endereco))
                    .col(timestamp_with_time_zone(Lojas::CreatedAt))
                    .col(timestamp_with_time_zone(Lojas::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        // Create roteiros table
        manager
            .create_table(
                Table::create()
                    .table(Roteiros::Table)
                    .if_not_exists()
                    .col(pk_uuid(Roteiros::Id))
                    .col(string(Roteiros::Nome))
                    .col(timestamp_with_time_zone(Roteiros::CreatedAt))
                    .col(timestamp_with_time_zone(Roteiros::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        // Create maquinas table. The commission percentage is added by a later migration.
        manager
            .create_table(
                Table::create()
                    .table(Maquinas::Table)
                    .if_not_exists()
                    .col(pk_uuid(Maquinas::Id))
                    .col(uuid(Maquinas::LojaId))
                    .col(string(Maquinas::Identificador))
                    .col(decimal_len(Maquinas::LucroAcumulado, 10, 2).default(0))
                    .col(timestamp_with_time_zone(Maquinas::CreatedAt))
                    .col(timestamp_with_time_zone(Maquinas::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_maquinas_loja")
                            .from(Maquinas::Table, Maquinas::LojaId)
                            .to(Lojas::Table, Lojas::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_maquinas_loja_id")
                    .table(Maquinas::Table)
                    .col(Maquinas::LojaId)
                    .to_owned(),
            )
            .await?;

        // Create tarefas table
        manager
            .create_table(
                Table::create()
                    .table(Tarefas::Table)
                    .if_not_exists()
                    .col(pk_uuid(Tarefas::Id))
                    .col(uuid(Tarefas::UsuarioId))
                    .col(string(Tarefas::Titulo))
                    .col(string_len(Tarefas::Status, 20).default("pending"))
                    .col(timestamp_with_time_zone(Tarefas::CreatedAt))
                    .col(timestamp_with_time_zone(Tarefas::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tarefas_usuario_id")
                    .table(Tarefas::Table)
                    .col(Tarefas::UsuarioId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Tarefas::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Maquinas::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Roteiros::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Lojas::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Lojas {
    Table,
    Id,
    Nome,
    Endereco,
    #[sea_orm(iden = "createdAt")]
    CreatedAt,
    #[sea_orm(iden = "updatedAt")]
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Roteiros {
    Table,
    Id,
    Nome,
    #[sea_orm(iden = "createdAt")]
    CreatedAt,
    #[sea_orm(iden = "updatedAt")]
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Maquinas {
    Table,
    Id,
    LojaId,
    Identificador,
    LucroAcumulado,
    #[sea_orm(iden = "createdAt")]
    CreatedAt,
    #[sea_orm(iden = "updatedAt")]
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Tarefas {
    Table,
    Id,
    UsuarioId,
    Titulo,
    Status,
    #[sea_orm(iden = "createdAt")]
    CreatedAt,
    #[sea_orm(iden = "updatedAt")]
    UpdatedAt,
}
