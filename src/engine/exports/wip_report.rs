// ==========================================
// 仿真/MES 工艺阶段导出桥 - 在制品导出
// ==========================================
// 职责: 在制批次按阶段聚合(wip / inventory / pg-wip 三种口径)
// 口径: 在加工批次经阶段解析定位;已完工批次回落到
//       主路线末道工序的阶段;无法定位阶段的批次告警后跳过
// ==========================================

use crate::domain::record::{InventoryRecord, PgWipRecord, WipRecord};
use crate::domain::reference::EntityBatch;
use crate::domain::types::char_suffix;
use crate::engine::aggregator::{Accumulator, InventoryKey};
use crate::engine::context::RunContext;
use crate::engine::exports::sort_by_identity;
use crate::engine::reference_index::RefIndex;
use crate::error::ExportResult;
use std::collections::HashMap;
use tracing::{info, warn};

/// 批次 identity 末 4 位码即存放部门
const DEPARTMENT_CODE_LEN: usize = 4;

/// 单个批次的阶段归属
///
/// - 绑定工序的批次: 走工序→阶段解析
/// - 无工序的批次: 完成率为 0 或产品无主路线时不计;
///   其余取主路线末道工序的阶段
/// - 两条路都解析不到阶段时返回 None,由调用方告警跳过
fn batch_phase<'a>(ctx: &'a RunContext<'_>, batch: &EntityBatch) -> ExportResult<Option<&'a str>> {
    let phases = ctx.phases()?;
    match batch.operation_id {
        Some(operation_id) => Ok(phases.get(operation_id)),
        None => {
            if batch.operation_progress == 0.0 {
                return Ok(None);
            }
            let main_routes = ctx.main_routes()?;
            if !main_routes.has_main_route(batch.entity_id) {
                return Ok(None);
            }
            Ok(main_routes.last_phase(batch.entity_id, phases))
        }
    }
}

pub fn export_wip(ctx: &RunContext<'_>) -> ExportResult<Vec<WipRecord>> {
    let batches = ctx.snapshot.entity_batches()?;
    let now = ctx.now.format("%Y-%m-%dT%H:%M:%S").to_string();

    let mut totals: Accumulator<String, f64> = Accumulator::new();
    let mut department: HashMap<String, String> = HashMap::new();
    for batch in batches {
        let phase = match batch_phase(ctx, batch)? {
            Some(phase) => phase.to_string(),
            None => {
                if batch.operation_id.is_some() || batch.operation_progress != 0.0 {
                    warn!(batch = %batch.identity, "在制批次无法定位阶段,跳过");
                }
                continue;
            }
        };
        department.insert(
            phase.clone(),
            char_suffix(&batch.identity, DEPARTMENT_CODE_LEN).to_string(),
        );
        totals.add(phase, batch.amount);
    }

    let mut records: Vec<WipRecord> = totals
        .into_buckets()
        .into_iter()
        .map(|(phase, amount)| WipRecord {
            identity: format!("{}_{}", now, phase),
            department_identity: department.remove(&phase).unwrap_or_default(),
            transition_identity: phase,
            quantity: amount.round() as i64,
            date_time: now.clone(),
        })
        .collect();
    sort_by_identity(&mut records);
    Ok(records)
}

pub fn export_inventory(ctx: &RunContext<'_>) -> ExportResult<Vec<InventoryRecord>> {
    let batches = ctx.snapshot.entity_batches()?;
    let operations = ctx.snapshot.operations()?;
    let departments = ctx.snapshot.departments()?;
    let entities = ctx.snapshot.entities()?;

    let operation_index = RefIndex::build("operation", operations, |o| o.id);
    let department_index = RefIndex::build("department", departments, |d| d.id);
    let entity_index = RefIndex::build("entity", entities, |e| e.id);

    let mut totals: Accumulator<InventoryKey, f64> = Accumulator::new();
    for batch in batches {
        let phase = match batch_phase(ctx, batch)? {
            Some(phase) => phase.to_string(),
            None => {
                if batch.operation_id.is_some() || batch.operation_progress != 0.0 {
                    warn!(batch = %batch.identity, "在制批次无法定位阶段,跳过");
                }
                continue;
            }
        };
        // 工序或其部门参照缺失的批次记到兜底部门,不中断导出
        let department = batch
            .operation_id
            .and_then(|id| operation_index.get(id))
            .and_then(|operation| department_index.get(operation.department_id))
            .map(|department| department.identity.clone())
            .unwrap_or_else(|| {
                warn!(batch = %batch.identity, fallback = %ctx.config.fallback_department,
                    "批次部门参照缺失,记入兜底部门");
                ctx.config.fallback_department.clone()
            });
        let entity = entity_index.require(batch.entity_id)?;
        totals.add(
            InventoryKey {
                phase,
                department,
                entity: entity.identity.clone(),
            },
            batch.amount,
        );
    }

    let mut records: Vec<InventoryRecord> = totals
        .into_buckets()
        .into_iter()
        .map(|(key, amount)| InventoryRecord {
            identity: format!("{}|{}|{}", key.phase, key.department, key.entity),
            department_identity: key.department,
            assembly_element_identity: key.entity,
            transition_identity: key.phase,
            quantity_assembly_element: amount,
        })
        .collect();
    sort_by_identity(&mut records);
    Ok(records)
}

pub fn export_pg_wip(ctx: &RunContext<'_>) -> ExportResult<Vec<PgWipRecord>> {
    let batches = ctx.snapshot.entity_batches()?;
    let today = ctx.today();

    let mut totals: Accumulator<String, f64> = Accumulator::new();
    let mut department: HashMap<String, String> = HashMap::new();
    for batch in batches {
        // 批次快照是历史副本,计划系统只要现势批次
        if batch.entity_batch_snapshot_id.is_some() {
            continue;
        }
        let phase = match batch_phase(ctx, batch)? {
            Some(phase) => phase.to_string(),
            None => {
                if batch.operation_id.is_some() || batch.operation_progress != 0.0 {
                    info!(entity_id = batch.entity_id, "产品无可用路线,批次不计");
                }
                continue;
            }
        };
        department.insert(
            phase.clone(),
            char_suffix(&batch.identity, DEPARTMENT_CODE_LEN).to_string(),
        );
        totals.add(phase, batch.amount);
    }

    let mut records: Vec<PgWipRecord> = totals
        .into_buckets()
        .into_iter()
        .map(|(phase, amount)| PgWipRecord {
            identity: format!("{}_{}", today, phase),
            warehouse: department.remove(&phase).unwrap_or_default(),
            transition_identity: phase,
            quantity: amount.round() as i64,
            date: today,
        })
        .collect();
    sort_by_identity(&mut records);
    Ok(records)
}
