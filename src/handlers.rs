pub mod commissions;
pub mod health;
pub mod machines;
pub mod routes;
pub mod stores;
pub mod tasks;
