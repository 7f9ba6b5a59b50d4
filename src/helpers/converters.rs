//! Conversions from database models to the transport types in `common`.

use common::{
    CommissionRecordDto, MachineContributionDto, MachineDto, RouteDto, StoreDto, TaskDto,
};
use model::entities::{comissao_loja, loja, maquina, roteiro, tarefa};

pub fn store_to_dto(model: loja::Model) -> StoreDto {
    StoreDto {
        id: model.id,
        nome: model.nome,
        endereco: model.endereco,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

pub fn machine_to_dto(model: maquina::Model) -> MachineDto {
    MachineDto {
        id: model.id,
        loja_id: model.loja_id,
        identificador: model.identificador,
        lucro_acumulado: model.lucro_acumulado,
        percentual_comissao: model.percentual_comissao,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

pub fn route_to_dto(model: roteiro::Model) -> RouteDto {
    RouteDto {
        id: model.id,
        nome: model.nome,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

/// Flatten a snapshot; the breakdown keeps the ascending machine id order it is stored in.
pub fn commission_to_dto(model: comissao_loja::Model) -> CommissionRecordDto {
    let detalhes = model
        .detalhes
        .as_ref()
        .map(|details| {
            details
                .iter()
                .map(|(machine_id, contribution)| MachineContributionDto {
                    machine_id: *machine_id,
                    profit: contribution.profit,
                    percentage: contribution.percentage,
                    commission: contribution.commission,
                })
                .collect()
        })
        .unwrap_or_default();

    CommissionRecordDto {
        id: model.id,
        loja_id: model.loja_id,
        roteiro_id: model.roteiro_id,
        data_calculo: model.data_calculo,
        total_lucro: model.total_lucro,
        total_comissao: model.total_comissao,
        detalhes,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

pub fn task_to_dto(model: tarefa::Model) -> TaskDto {
    TaskDto {
        id: model.id,
        usuario_id: model.usuario_id,
        titulo: model.titulo,
        status: model.status,
    }
}
