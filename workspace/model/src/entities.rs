//! This file serves as the root for all SeaORM entity modules.
//! Table and column names follow the schema shared with the existing
//! deployment (`lojas`, `maquinas`, `roteiros`, `comissoes_lojas`, ...).

pub mod comissao_loja;
pub mod loja;
pub mod maquina;
pub mod roteiro;
pub mod tarefa;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::comissao_loja::Entity as ComissaoLoja;
    pub use super::loja::Entity as Loja;
    pub use super::maquina::Entity as Maquina;
    pub use super::roteiro::Entity as Roteiro;
    pub use super::tarefa::Entity as Tarefa;
}

#[cfg(test)]
mod test {
    use std::str::FromStr;

    use chrono::Utc;
    use migration::{Migrator, MigratorTrait};
    use rust_decimal::Decimal;
    use sea_orm::{
        ActiveModelBehavior, ActiveModelTrait, ColumnTrait, ConnectionTrait, Database,
        DatabaseConnection, DbErr, EntityTrait, ModelTrait, PaginatorTrait, QueryFilter, Set,
    };
    use uuid::Uuid;

    use super::*;
    use prelude::*;

    async fn setup_db() -> Result<DatabaseConnection, DbErr> {
        // Connect to the SQLite database
        let db = Database::connect("sqlite::memory:").await?;

        // Enable foreign keys
        db.execute_unprepared("PRAGMA foreign_keys = ON;").await?;

        Migrator::up(&db, None).await.expect("Migrations failed.");
        Ok(db)
    }

    async fn insert_store(db: &DatabaseConnection, nome: &str) -> Result<loja::Model, DbErr> {
        loja::ActiveModel {
            nome: Set(nome.to_string()),
            endereco: Set(None),
            ..loja::ActiveModel::new()
        }
        .insert(db)
        .await
    }

    async fn insert_snapshot(
        db: &DatabaseConnection,
        loja_id: Uuid,
        roteiro_id: Option<Uuid>,
    ) -> Result<comissao_loja::Model, DbErr> {
        let now = Utc::now();
        comissao_loja::ActiveModel {
            id: Set(Uuid::new_v4()),
            loja_id: Set(loja_id),
            roteiro_id: Set(roteiro_id),
            data_calculo: Set(now),
            total_lucro: Set(Decimal::from_str("10.00").unwrap()),
            total_comissao: Set(Decimal::from_str("1.00").unwrap()),
            detalhes: Set(Some(comissao_loja::CommissionDetails::new())),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(db)
        .await
    }

    #[tokio::test]
    async fn test_entity_integration() -> Result<(), DbErr> {
        let db = setup_db().await?;

        let store = insert_store(&db, "Loja Centro").await?;

        let machine = maquina::ActiveModel {
            loja_id: Set(store.id),
            identificador: Set("MQ-001".to_string()),
            lucro_acumulado: Set(Decimal::from_str("1000.00").unwrap()),
            percentual_comissao: Set(Some(Decimal::from(10))),
            ..maquina::ActiveModel::new()
        }
        .insert(&db)
        .await?;

        let machines = store.find_related(Maquina).all(&db).await?;
        assert_eq!(machines.len(), 1);
        assert_eq!(machines[0].id, machine.id);
        assert_eq!(machines[0].identificador, "MQ-001");
        assert_eq!(
            machines[0].percentual_comissao.map(|p| p.round_dp(2)),
            Some(Decimal::from(10))
        );

        // Updating bumps updatedAt but keeps createdAt
        let mut active: maquina::ActiveModel = machine.clone().into();
        active.percentual_comissao = Set(None);
        let updated = active.update(&db).await?;
        assert_eq!(updated.percentual_comissao, None);
        assert_eq!(updated.created_at, machine.created_at);
        assert!(updated.updated_at >= machine.updated_at);

        Ok(())
    }

    #[tokio::test]
    async fn test_store_delete_cascades_snapshots_and_machines() -> Result<(), DbErr> {
        let db = setup_db().await?;

        let doomed = insert_store(&db, "Loja Fechada").await?;
        let kept = insert_store(&db, "Loja Aberta").await?;

        maquina::ActiveModel {
            loja_id: Set(doomed.id),
            identificador: Set("MQ-X".to_string()),
            ..maquina::ActiveModel::new()
        }
        .insert(&db)
        .await?;

        insert_snapshot(&db, doomed.id, None).await?;
        insert_snapshot(&db, doomed.id, None).await?;
        let survivor = insert_snapshot(&db, kept.id, None).await?;

        Loja::delete_by_id(doomed.id).exec(&db).await?;

        let remaining = ComissaoLoja::find().all(&db).await?;
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, survivor.id);

        let orphan_machines = Maquina::find()
            .filter(maquina::Column::LojaId.eq(doomed.id))
            .count(&db)
            .await?;
        assert_eq!(orphan_machines, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_route_delete_nulls_reference() -> Result<(), DbErr> {
        let db = setup_db().await?;

        let store = insert_store(&db, "Loja Rota").await?;
        let route = roteiro::ActiveModel {
            nome: Set("Rota Norte".to_string()),
            ..roteiro::ActiveModel::new()
        }
        .insert(&db)
        .await?;

        let snapshot = insert_snapshot(&db, store.id, Some(route.id)).await?;
        assert_eq!(snapshot.roteiro_id, Some(route.id));

        Roteiro::delete_by_id(route.id).exec(&db).await?;

        let reloaded = ComissaoLoja::find_by_id(snapshot.id)
            .one(&db)
            .await?
            .expect("snapshot must survive route deletion");
        assert_eq!(reloaded.roteiro_id, None);
        assert_eq!(reloaded.loja_id, store.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_snapshot_requires_existing_store() -> Result<(), DbErr> {
        let db = setup_db().await?;

        let result = insert_snapshot(&db, Uuid::new_v4(), None).await;
        assert!(result.is_err());
        assert_eq!(ComissaoLoja::find().count(&db).await?, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_details_roundtrip_through_database() -> Result<(), DbErr> {
        let db = setup_db().await?;
        let store = insert_store(&db, "Loja Json").await?;

        let machine_id = Uuid::new_v4();
        let mut details = comissao_loja::CommissionDetails::new();
        details.insert(
            machine_id,
            comissao_loja::MachineContribution {
                profit: Decimal::from_str("250.00").unwrap(),
                percentage: Decimal::ZERO,
                commission: Decimal::from_str("0.00").unwrap(),
            },
        );

        let now = Utc::now();
        let saved = comissao_loja::ActiveModel {
            id: Set(Uuid::new_v4()),
            loja_id: Set(store.id),
            roteiro_id: Set(None),
            data_calculo: Set(now),
            total_lucro: Set(Decimal::from_str("250.00").unwrap()),
            total_comissao: Set(Decimal::ZERO),
            detalhes: Set(Some(details.clone())),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&db)
        .await?;

        let reloaded = ComissaoLoja::find_by_id(saved.id).one(&db).await?.unwrap();
        let reloaded_details = reloaded.detalhes.expect("details are stored");
        assert_eq!(reloaded_details, details);
        assert_eq!(
            reloaded_details.get(&machine_id).map(|c| c.profit),
            Some(Decimal::from_str("250.00").unwrap())
        );

        Ok(())
    }
}
