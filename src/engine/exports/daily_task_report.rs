// ==========================================
// 仿真/MES 工艺阶段导出桥 - 班次任务导出
// ==========================================
// 职责: 仿真任务按(工序 identity × 日期 × 时段)聚合,
//       并按设备拆分子数量
// 口径: 早于今天的任务整行丢弃;数量按完成率取整差累计;
//       合并持久化快照的动作由流水线完成,这里只产出新集
// ==========================================

use crate::domain::record::{DailyTaskRecord, EquipmentQuantity};
use crate::domain::types::TimeSlot;
use crate::engine::aggregator::{
    floor_delta, parse_task_timestamp, Accumulator, TaskEquipmentKey, TaskKey,
};
use crate::engine::classifier::ExclusionPolicy;
use crate::engine::context::RunContext;
use crate::engine::reference_index::RefIndex;
use crate::error::ExportResult;
use chrono::Timelike;
use std::collections::HashMap;
use tracing::warn;

pub fn export_daily_tasks(ctx: &RunContext<'_>) -> ExportResult<Vec<DailyTaskRecord>> {
    let operations = ctx.snapshot.operations()?;
    let routes = ctx.snapshot.routes()?;
    let departments = ctx.snapshot.departments()?;
    let entities = ctx.snapshot.entities()?;
    let equipment = ctx.snapshot.equipment()?;
    let simulation_equipment = ctx.snapshot.simulation_equipment()?;
    let links = ctx.snapshot.task_equipment_links()?;

    let operation_index = RefIndex::build("operation", operations, |o| o.id);
    let route_index = RefIndex::build("entity_route", routes, |r| r.id);
    let department_index = RefIndex::build("department", departments, |d| d.id);
    let entity_index = RefIndex::build("entity", entities, |e| e.id);
    let equipment_index = RefIndex::build("equipment", equipment, |e| e.id);
    let simulation_equipment_index =
        RefIndex::build("simulation_equipment", simulation_equipment, |e| e.id);
    let link_index = RefIndex::build("simulation_operation_task_equipment", links, |l| {
        l.simulation_operation_task_id
    });

    let phases = ctx.phases()?;
    let policy = ExclusionPolicy::DailyTasks;
    let today = ctx.today();

    let tasks = ctx.snapshot.task_window(ctx.config.daily_task_period)?;

    let mut report: Accumulator<TaskKey, i64> = Accumulator::new();
    let mut by_equipment: Accumulator<TaskEquipmentKey, i64> = Accumulator::new();
    let mut entity_by_operation: HashMap<String, String> = HashMap::new();

    for task in &tasks {
        let operation = operation_index.require(task.operation_id)?;
        let department = department_index.require(operation.department_id)?;

        // 部门白/黑名单来自业务配置
        if let Some(skip) = &ctx.config.skip_departments {
            if skip.contains(&department.identity) {
                continue;
            }
        }
        if let Some(only) = &ctx.config.only_departments {
            if !only.contains(&department.identity) {
                continue;
            }
        }
        if policy.excludes(operation) {
            continue;
        }

        let route = route_index.require(operation.entity_route_id)?;
        let phase = match phases.get(operation.id) {
            Some(phase) => phase,
            None => {
                warn!(operation = %operation.identity, "班次任务跳过无阶段工序");
                continue;
            }
        };
        // nop 无第二段的工序没有任务编号可用
        let suffix = match operation.nop.split('_').nth(1) {
            Some(suffix) => suffix,
            None => continue,
        };
        let operation_identity = format!("{}_{}", phase, suffix);

        let started = parse_task_timestamp(&task.start_date)?;
        let slot = TimeSlot::from_hour(started.hour());
        let task_date = started.date();
        if task_date < today {
            continue;
        }

        entity_by_operation.insert(
            operation_identity.clone(),
            entity_index.require(route.entity_id)?.identity.clone(),
        );

        let quantity = floor_delta(task.entity_amount, task.start_labor, task.stop_labor);
        report.add(
            TaskKey {
                operation: operation_identity.clone(),
                date: task_date,
                slot,
            },
            quantity,
        );

        // 任务 → 仿真设备 → 物理设备
        let link = link_index.require(task.id)?;
        let sim_equipment = simulation_equipment_index.require(link.simulation_equipment_id)?;
        if let Some(equipment_id) = sim_equipment.equipment_id {
            let physical = equipment_index.require(equipment_id)?;
            if let Some(identity) = physical.identity.as_deref().filter(|s| !s.is_empty()) {
                by_equipment.add(
                    TaskEquipmentKey {
                        operation: operation_identity,
                        date: task_date,
                        slot,
                        equipment: identity.to_string(),
                    },
                    quantity,
                );
            }
        }
    }

    // 设备子分桶并回各自的任务分桶
    let mut equipment_lists: HashMap<TaskKey, Vec<EquipmentQuantity>> = HashMap::new();
    for (key, quantity) in by_equipment.into_buckets() {
        equipment_lists
            .entry(TaskKey {
                operation: key.operation,
                date: key.date,
                slot: key.slot,
            })
            .or_default()
            .push(EquipmentQuantity {
                identity: key.equipment,
                quantity,
            });
    }
    for list in equipment_lists.values_mut() {
        list.sort_by(|a, b| a.identity.cmp(&b.identity));
    }

    let mut records: Vec<DailyTaskRecord> = report
        .into_buckets()
        .into_iter()
        .map(|(key, quantity)| {
            let equipments = equipment_lists.remove(&key).unwrap_or_default();
            DailyTaskRecord {
                identity: format!("{}_{}_{}", key.date, key.slot, key.operation),
                operation_identity: key.operation.clone(),
                assembly_element_identity: entity_by_operation
                    .get(&key.operation)
                    .cloned()
                    .unwrap_or_default(),
                quantity_plan: quantity,
                date_begin: key.date,
                time_begin: key.slot,
                equipments: Some(equipments),
            }
        })
        .collect();
    records.sort_by(|a, b| a.identity.cmp(&b.identity));
    Ok(records)
}
