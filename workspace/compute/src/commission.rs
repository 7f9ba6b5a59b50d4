//! Store commission aggregation.
//!
//! A commission snapshot sums, for one store, the profit of its machines and
//! the commission owed on each of them (`profit * percentage / 100`). Every
//! per-machine commission is rounded to cents before summing, so the stored
//! total always reconciles with the stored breakdown.

use std::collections::HashSet;

use chrono::Utc;
use rust_decimal::{Decimal, RoundingStrategy};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tracing::{debug, info, instrument, trace};
use uuid::Uuid;

use model::entities::comissao_loja::{self, CommissionDetails, MachineContribution};
use model::entities::{loja, maquina, roteiro};

use crate::error::{ComputeError, Result};

/// Number of decimal places kept for money amounts.
pub const CURRENCY_SCALE: u32 = 2;

/// Round a money amount to cents, halves away from zero.
pub fn round_currency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(CURRENCY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Check that a commission percentage lies in [0, 100].
pub fn validate_percentage(percentage: Decimal) -> Result<()> {
    if percentage < Decimal::ZERO || percentage > Decimal::ONE_HUNDRED {
        return Err(ComputeError::validation(format!(
            "Commission percentage {} is outside [0, 100]",
            percentage
        )));
    }
    Ok(())
}

/// Largest magnitude a money column (`DECIMAL(10,2)`) can hold, exclusive.
const MONEY_LIMIT: Decimal = Decimal::from_parts(100_000_000, 0, 0, false, 0);

/// Check that a profit fits a `DECIMAL(10,2)` column: magnitude below 1e8
/// and at most two decimal places.
pub fn validate_profit(profit: Decimal) -> Result<()> {
    if profit.abs() >= MONEY_LIMIT {
        return Err(ComputeError::validation(format!(
            "Profit {} does not fit in 8 integer digits",
            profit
        )));
    }
    if profit.normalize().scale() > CURRENCY_SCALE {
        return Err(ComputeError::validation(format!(
            "Profit {} has more than {} decimal places",
            profit, CURRENCY_SCALE
        )));
    }
    Ok(())
}

fn overflow(what: &str, machine_id: Uuid) -> ComputeError {
    ComputeError::validation(format!(
        "Commission {} overflowed at machine {}",
        what, machine_id
    ))
}

/// Totals and per-machine breakdown of one commission computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommissionBreakdown {
    pub total_profit: Decimal,
    pub total_commission: Decimal,
    pub details: CommissionDetails,
}

/// Compute the commission breakdown for a set of machines.
///
/// A missing percentage counts as zero. A stored percentage outside [0, 100]
/// is rejected rather than silently clamped.
pub fn calculate_commission(machines: &[maquina::Model]) -> Result<CommissionBreakdown> {
    let mut details = CommissionDetails::new();
    let mut total_profit = Decimal::ZERO;
    let mut total_commission = Decimal::ZERO;

    for machine in machines {
        let profit = round_currency(machine.lucro_acumulado);
        let raw_percentage = machine.percentual_comissao.unwrap_or(Decimal::ZERO);
        validate_percentage(raw_percentage)?;
        let percentage = round_currency(raw_percentage);

        let commission = profit
            .checked_mul(percentage)
            .and_then(|v| v.checked_div(Decimal::ONE_HUNDRED))
            .map(round_currency)
            .ok_or_else(|| overflow("amount", machine.id))?;
        trace!(
            machine_id = %machine.id,
            %profit,
            %percentage,
            %commission,
            "Machine contribution"
        );

        total_profit = total_profit
            .checked_add(profit)
            .ok_or_else(|| overflow("profit total", machine.id))?;
        total_commission = total_commission
            .checked_add(commission)
            .ok_or_else(|| overflow("total", machine.id))?;
        details.insert(
            machine.id,
            MachineContribution {
                profit,
                percentage,
                commission,
            },
        );
    }

    Ok(CommissionBreakdown {
        total_profit,
        total_commission,
        details,
    })
}

/// Whether a stored snapshot's totals match its breakdown.
pub fn is_reconciled(record: &comissao_loja::Model) -> bool {
    match &record.detalhes {
        Some(details) => {
            details.total_commission() == record.total_comissao.round_dp(CURRENCY_SCALE)
                && details.total_profit() == record.total_lucro.round_dp(CURRENCY_SCALE)
        }
        None => record.total_comissao.is_zero() && record.total_lucro.is_zero(),
    }
}

/// Parameters of a commission computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommissionRequest {
    pub store_id: Uuid,
    /// Route the snapshot is finalized under. Tags the record, does not filter machines.
    pub route_id: Option<Uuid>,
    /// Restrict the computation to these machines of the store.
    pub machine_ids: Option<Vec<Uuid>>,
}

impl CommissionRequest {
    pub fn for_store(store_id: Uuid) -> Self {
        Self {
            store_id,
            route_id: None,
            machine_ids: None,
        }
    }

    pub fn with_route(mut self, route_id: Option<Uuid>) -> Self {
        self.route_id = route_id;
        self
    }

    pub fn restricted_to(mut self, machine_ids: Vec<Uuid>) -> Self {
        self.machine_ids = Some(machine_ids);
        self
    }
}

/// Compute and persist a commission snapshot over every machine of a store.
pub async fn compute_store_commission(
    db: &DatabaseConnection,
    store_id: Uuid,
    route_id: Option<Uuid>,
) -> Result<comissao_loja::Model> {
    compute_store_commission_for(db, CommissionRequest::for_store(store_id).with_route(route_id))
        .await
}

/// Compute and persist a commission snapshot.
///
/// Reads and the insert run in one transaction, so the figures stored are the
/// ones that were read. Any error drops the transaction and nothing is persisted.
#[instrument(skip(db), fields(store_id = %request.store_id, route_id = ?request.route_id))]
pub async fn compute_store_commission_for(
    db: &DatabaseConnection,
    request: CommissionRequest,
) -> Result<comissao_loja::Model> {
    trace!("Entering compute_store_commission_for");
    let txn = db.begin().await?;

    let store = loja::Entity::find_by_id(request.store_id)
        .one(&txn)
        .await?
        .ok_or_else(|| ComputeError::not_found("Store", request.store_id))?;

    if let Some(route_id) = request.route_id {
        roteiro::Entity::find_by_id(route_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ComputeError::not_found("Route", route_id))?;
    }

    let mut machines = maquina::Entity::find()
        .filter(maquina::Column::LojaId.eq(store.id))
        .order_by_asc(maquina::Column::Id)
        .all(&txn)
        .await?;
    debug!("Loaded {} machines for store {}", machines.len(), store.nome);

    if let Some(machine_ids) = &request.machine_ids {
        let wanted: HashSet<Uuid> = machine_ids.iter().copied().collect();
        let owned: HashSet<Uuid> = machines.iter().map(|m| m.id).collect();
        if let Some(foreign) = wanted.iter().find(|id| !owned.contains(id)) {
            return Err(ComputeError::validation(format!(
                "Machine {} does not belong to store {}",
                foreign, store.id
            )));
        }
        machines.retain(|m| wanted.contains(&m.id));
        debug!("Restricted computation to {} machines", machines.len());
    }

    let breakdown = calculate_commission(&machines)?;

    let now = Utc::now();
    let record = comissao_loja::ActiveModel {
        id: Set(Uuid::new_v4()),
        loja_id: Set(store.id),
        roteiro_id: Set(request.route_id),
        data_calculo: Set(now),
        total_lucro: Set(breakdown.total_profit),
        total_comissao: Set(breakdown.total_commission),
        detalhes: Set(Some(breakdown.details)),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;

    info!(
        "Commission snapshot {} for store {}: profit {}, commission {}",
        record.id, store.id, record.total_lucro, record.total_comissao
    );
    Ok(record)
}

/// Snapshots of a store, newest first. `page` is 1-based.
#[instrument(skip(db))]
pub async fn list_store_commissions(
    db: &DatabaseConnection,
    store_id: Uuid,
    page: u64,
    limit: u64,
) -> Result<(Vec<comissao_loja::Model>, u64)> {
    loja::Entity::find_by_id(store_id)
        .one(db)
        .await?
        .ok_or_else(|| ComputeError::not_found("Store", store_id))?;

    let paginator = comissao_loja::Entity::find()
        .filter(comissao_loja::Column::LojaId.eq(store_id))
        .order_by_desc(comissao_loja::Column::DataCalculo)
        .order_by_desc(comissao_loja::Column::CreatedAt)
        .paginate(db, limit.max(1));

    let total = paginator.num_items().await?;
    let records = paginator.fetch_page(page.saturating_sub(1)).await?;
    debug!("Fetched {} of {} snapshots", records.len(), total);

    Ok((records, total))
}

pub async fn get_commission(db: &DatabaseConnection, id: Uuid) -> Result<comissao_loja::Model> {
    comissao_loja::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ComputeError::not_found("Commission record", id))
}

/// Administrative purge of a single snapshot.
#[instrument(skip(db))]
pub async fn purge_commission(db: &DatabaseConnection, id: Uuid) -> Result<()> {
    let result = comissao_loja::Entity::delete_by_id(id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(ComputeError::not_found("Commission record", id));
    }
    info!("Purged commission record {}", id);
    Ok(())
}
