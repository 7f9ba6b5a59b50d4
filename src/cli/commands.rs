pub mod compute_commission;
pub mod initdb;
pub mod migrate;
pub mod serve;

pub use compute_commission::compute_commission;
pub use initdb::init_database;
pub use migrate::{downgrade, upgrade};
pub use serve::serve;
