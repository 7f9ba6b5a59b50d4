use rust_decimal::Decimal;
use sea_orm::Set;
use sea_orm::entity::prelude::*;

use super::loja;

/// A revenue-generating unit placed in a store.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "maquinas")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// The store this machine is placed in.
    pub loja_id: Uuid,
    /// Serial number or label printed on the machine.
    pub identificador: String,
    /// Profit accrued over the current operating period.
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub lucro_acumulado: Decimal,
    /// Share of the profit owed to the store, in percent (0 to 100).
    /// `None` counts as zero.
    #[sea_orm(column_type = "Decimal(Some((5, 2)))", nullable)]
    pub percentual_comissao: Option<Decimal>,
    #[sea_orm(column_name = "createdAt")]
    pub created_at: DateTimeUtc,
    #[sea_orm(column_name = "updatedAt")]
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "loja::Entity",
        from = "Column::LojaId",
        to = "loja::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Loja,
}

impl Related<loja::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Loja.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    fn new() -> Self {
        let now = chrono::Utc::now();
        Self {
            id: Set(Uuid::new_v4()),
            lucro_acumulado: Set(Decimal::ZERO),
            percentual_comissao: Set(Some(Decimal::ZERO)),
            created_at: Set(now),
            updated_at: Set(now),
            ..ActiveModelTrait::default()
        }
    }

    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if !insert {
            self.updated_at = Set(chrono::Utc::now());
        }
        Ok(self)
    }
}
