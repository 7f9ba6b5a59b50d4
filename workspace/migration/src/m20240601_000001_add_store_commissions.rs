use crate::entity_iden::EntityIden;
use model::entities::prelude::*;
use model::entities::{comissao_loja, loja, maquina, roteiro};
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 1. Add percentual_comissao to maquinas. Existing rows read the default.
        manager
            .alter_table(
                Table::alter()
                    .table(Maquina::table())
                    .add_column(
                        ColumnDef::new(Maquina::column(maquina::Column::PercentualComissao))
                            .decimal_len(5, 2)
                            .null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await?;

        // 2. Create comissoes_lojas table
        manager
            .create_table(
                Table::create()
                    .table(ComissaoLoja::table())
                    .if_not_exists()
                    .col(pk_uuid(ComissaoLoja::column(comissao_loja::Column::Id)))
                    .col(uuid(ComissaoLoja::column(comissao_loja::Column::LojaId)))
                    .col(uuid_null(ComissaoLoja::column(comissao_loja::Column::RoteiroId)))
                    .col(
                        timestamp_with_time_zone(ComissaoLoja::column(
                            comissao_loja::Column::DataCalculo,
                        ))
                        .default(Expr::current_timestamp()),
                    )
                    .col(
                        decimal_len(ComissaoLoja::column(comissao_loja::Column::TotalLucro), 10, 2)
                            .default(0),
                    )
                    .col(
                        decimal_len(
                            ComissaoLoja::column(comissao_loja::Column::TotalComissao),
                            10,
                            2,
                        )
                        .default(0),
                    )
                    .col(json_null(ComissaoLoja::column(comissao_loja::Column::Detalhes)))
                    .col(timestamp_with_time_zone(ComissaoLoja::column(
                        comissao_loja::Column::CreatedAt,
                    )))
                    .col(timestamp_with_time_zone(ComissaoLoja::column(
                        comissao_loja::Column::UpdatedAt,
                    )))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_comissoes_lojas_loja")
                            .from(
                                ComissaoLoja::table(),
                                ComissaoLoja::column(comissao_loja::Column::LojaId),
                            )
                            .to(Loja::table(), Loja::column(loja::Column::Id))
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_comissoes_lojas_roteiro")
                            .from(
                                ComissaoLoja::table(),
                                ComissaoLoja::column(comissao_loja::Column::RoteiroId),
                            )
                            .to(Roteiro::table(), Roteiro::column(roteiro::Column::Id))
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 3. Index for "latest snapshots of a store" listings
        manager
            .create_index(
                Index::create()
                    .name("idx_comissoes_lojas_loja_data")
                    .table(ComissaoLoja::table())
                    .col(ComissaoLoja::column(comissao_loja::Column::LojaId))
                    .col(ComissaoLoja::column(comissao_loja::Column::DataCalculo))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Reverse order: the table first, then the column
        manager
            .drop_table(Table::drop().table(ComissaoLoja::table()).to_owned())
            .await?;

        manager
            .alter_table(
                Table::alter()
                    .table(Maquina::table())
                    .drop_column(Maquina::column(maquina::Column::PercentualComissao))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}
