//! Database fixtures shared by the compute tests.

use std::str::FromStr;

use migration::{Migrator, MigratorTrait};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ConnectionTrait, Database, DatabaseConnection, DbErr,
    Set,
};
use uuid::Uuid;

use model::entities::{loja, maquina, roteiro, tarefa};

pub type Result<T> = std::result::Result<T, DbErr>;

pub fn dec(value: &str) -> Decimal {
    Decimal::from_str(value).expect("valid decimal literal")
}

/// Create an in-memory SQLite database with all migrations applied
pub async fn setup_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory database");
    db.execute_unprepared("PRAGMA foreign_keys = ON;")
        .await
        .expect("Failed to enable foreign keys");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    db
}

pub async fn new_store(db: &DatabaseConnection, nome: &str) -> Result<loja::Model> {
    loja::ActiveModel {
        nome: Set(nome.to_string()),
        endereco: Set(Some("Rua Principal, 100".to_string())),
        ..loja::ActiveModel::new()
    }
    .insert(db)
    .await
}

pub async fn new_route(db: &DatabaseConnection, nome: &str) -> Result<roteiro::Model> {
    roteiro::ActiveModel {
        nome: Set(nome.to_string()),
        ..roteiro::ActiveModel::new()
    }
    .insert(db)
    .await
}

pub async fn new_machine(
    db: &DatabaseConnection,
    store: &loja::Model,
    identificador: &str,
    profit: &str,
    percentage: Option<&str>,
) -> Result<maquina::Model> {
    maquina::ActiveModel {
        loja_id: Set(store.id),
        identificador: Set(identificador.to_string()),
        lucro_acumulado: Set(dec(profit)),
        percentual_comissao: Set(percentage.map(dec)),
        ..maquina::ActiveModel::new()
    }
    .insert(db)
    .await
}

pub async fn new_task(
    db: &DatabaseConnection,
    usuario_id: Uuid,
    status: &str,
) -> Result<tarefa::Model> {
    tarefa::ActiveModel {
        usuario_id: Set(usuario_id),
        titulo: Set(format!("Tarefa {}", status)),
        status: Set(status.to_string()),
        ..tarefa::ActiveModel::new()
    }
    .insert(db)
    .await
}
