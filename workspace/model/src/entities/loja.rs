use sea_orm::Set;
use sea_orm::entity::prelude::*;

/// A physical location owning a set of machines.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "lojas")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub nome: String,
    pub endereco: Option<String>,
    #[sea_orm(column_name = "createdAt")]
    pub created_at: DateTimeUtc,
    #[sea_orm(column_name = "updatedAt")]
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::maquina::Entity")]
    Maquina,
    /// Commission snapshots taken for this store.
    #[sea_orm(has_many = "super::comissao_loja::Entity")]
    ComissaoLoja,
}

impl Related<super::maquina::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Maquina.def()
    }
}

impl Related<super::comissao_loja::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ComissaoLoja.def()
    }
}

impl ActiveModelBehavior for ActiveModel {
    /// Fresh stores get a random id and both timestamps set to now.
    fn new() -> Self {
        let now = chrono::Utc::now();
        Self {
            id: Set(Uuid::new_v4()),
            created_at: Set(now),
            updated_at: Set(now),
            ..ActiveModelTrait::default()
        }
    }
}
