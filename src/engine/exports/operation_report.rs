// ==========================================
// 仿真/MES 工艺阶段导出桥 - 工序报表导出
// ==========================================
// 职责: 过滤后的工序清单,identity 重编为 "{阶段}_{nop 尾段}"
// 口径: 路线内位置优先级在其他跳过条件之前计数
//       (保持与历史输出一致的编号)
// ==========================================

use crate::domain::record::OperationRecord;
use crate::domain::reference::Operation;
use crate::engine::aggregator::seconds_to_hours;
use crate::engine::classifier::ExclusionPolicy;
use crate::engine::context::RunContext;
use crate::engine::exports::sort_by_identity;
use crate::engine::reference_index::RefIndex;
use crate::error::ExportResult;
use std::collections::HashMap;

pub fn export_operations(ctx: &RunContext<'_>) -> ExportResult<Vec<OperationRecord>> {
    let operations = ctx.snapshot.operations()?;
    let routes = ctx.snapshot.routes()?;
    let entities = ctx.snapshot.entities()?;
    let departments = ctx.snapshot.departments()?;
    let classes = ctx.snapshot.equipment_classes()?;
    let route_index = RefIndex::build("entity_route", routes, |r| r.id);
    let entity_index = RefIndex::build("entity", entities, |e| e.id);
    let department_index = RefIndex::build("department", departments, |d| d.id);
    let class_index = RefIndex::build("equipment_class", classes, |c| c.id);
    let phases = ctx.phases()?;

    let policy = ExclusionPolicy::OperationReport;
    let mut filtered: Vec<&Operation> = operations
        .iter()
        .filter(|operation| !policy.excludes(operation))
        .collect();
    filtered.sort_by(|a, b| a.nop.cmp(&b.nop));

    let mut priority_by_route: HashMap<i64, u32> = HashMap::new();
    let mut records = Vec::new();

    for operation in filtered {
        let route_id = operation.entity_route_id;
        // 位置优先级先于其余跳过条件计数
        let priority = priority_by_route.entry(route_id).or_insert(0);
        *priority += 1;
        let priority = *priority;

        let route = route_index.require(route_id)?;

        // nop 无 "_" 的工序没有尾段可编号
        let suffix = match operation.nop.rsplit('_').next() {
            Some(suffix) if operation.nop.contains('_') => suffix,
            _ => continue,
        };
        let phase = match phases.get(operation.id) {
            Some(phase) => phase,
            None => continue,
        };

        records.push(OperationRecord {
            identity: format!("{}_{}", phase, suffix),
            transition_identity: phase.to_string(),
            assembly_element_identity: entity_index.require(route.entity_id)?.identity.clone(),
            department_identity: department_index
                .require(operation.department_id)?
                .identity
                .clone(),
            work_center_identity: class_index
                .require(operation.equipment_class_id)?
                .identity
                .clone(),
            technological_process_identity: route.identity.clone(),
            number: operation.nop.clone(),
            priority,
            name: operation.name.clone(),
            piece_time: seconds_to_hours(operation.prod_time),
        });
    }

    sort_by_identity(&mut records);
    Ok(records)
}
