//! Business computations over the fleet schema: store commission snapshots
//! and the pending task counter.
//!
//! Every entry point takes the database handle explicitly.

pub mod commission;
pub mod error;
pub mod pending;

#[cfg(test)]
pub(crate) mod testing;

pub use commission::{
    CommissionBreakdown, CommissionRequest, calculate_commission, compute_store_commission,
    compute_store_commission_for,
};
pub use error::{ComputeError, Result};
pub use pending::fetch_pending_count;
