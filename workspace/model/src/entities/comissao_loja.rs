use rust_decimal::Decimal;
use sea_orm::FromJsonQueryResult;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{loja, roteiro};

/// One machine's share of a commission snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineContribution {
    /// Profit of the machine, rounded to cents.
    pub profit: Decimal,
    /// Commission percentage applied (a missing percentage is recorded as zero).
    pub percentage: Decimal,
    /// `profit * percentage / 100`, rounded to cents.
    pub commission: Decimal,
}

/// Per-machine breakdown stored in `comissoes_lojas.detalhes`.
///
/// Keyed by machine id. A `BTreeMap` keeps the serialized JSON stable, so two
/// snapshots over the same figures are byte-identical.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct CommissionDetails(pub BTreeMap<Uuid, MachineContribution>);

impl CommissionDetails {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, machine_id: Uuid, contribution: MachineContribution) {
        self.0.insert(machine_id, contribution);
    }

    pub fn get(&self, machine_id: &Uuid) -> Option<&MachineContribution> {
        self.0.get(machine_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Uuid, &MachineContribution)> {
        self.0.iter()
    }

    /// Sum of the per-machine profits.
    pub fn total_profit(&self) -> Decimal {
        self.0.values().map(|c| c.profit).sum()
    }

    /// Sum of the per-machine commissions. A snapshot's `total_comissao`
    /// must equal this value.
    pub fn total_commission(&self) -> Decimal {
        self.0.values().map(|c| c.commission).sum()
    }
}

/// An immutable snapshot of the profit and commission of a store at a point in time.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "comissoes_lojas")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub loja_id: Uuid,
    /// The route under which the snapshot was finalized, if any.
    /// Cleared when the route is deleted.
    pub roteiro_id: Option<Uuid>,
    pub data_calculo: DateTimeUtc,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub total_lucro: Decimal,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub total_comissao: Decimal,
    #[sea_orm(column_type = "Json", nullable)]
    pub detalhes: Option<CommissionDetails>,
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
    #[sea_orm(
        belongs_to = "roteiro::Entity",
        from = "Column::RoteiroId",
        to = "roteiro::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Roteiro,
}

impl Related<loja::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Loja.def()
    }
}

impl Related<roteiro::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Roteiro.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
