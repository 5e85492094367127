// ==========================================
// 仿真/MES 工艺阶段导出桥 - 阶段导出
// ==========================================
// 职责: 阶段清单(含上下游部门)与阶段目录(含步序优先级)
// 口径: 每个阶段 identity 只输出一次,以首次出现的路线位置为准
// ==========================================

use crate::domain::record::{PhaseCatalogRecord, PhaseRecord};
use crate::domain::reference::Operation;
use crate::domain::types::{char_prefix, char_suffix};
use crate::engine::classifier::ExclusionPolicy;
use crate::engine::context::RunContext;
use crate::engine::exports::sort_by_identity;
use crate::engine::reference_index::RefIndex;
use crate::engine::route_walker::StepTracker;
use crate::error::ExportResult;
use std::collections::HashSet;

/// 合成"外协入库"伴随阶段的优先级,排在所有真实步序之后
const VPSK_PRIORITY: u32 = 999;

fn sorted_by_route_and_nop(operations: &[Operation]) -> Vec<&Operation> {
    let mut ordered: Vec<&Operation> = operations.iter().collect();
    ordered.sort_by(|a, b| {
        (a.entity_route_id, a.nop.as_str()).cmp(&(b.entity_route_id, b.nop.as_str()))
    });
    ordered
}

/// 阶段清单: 每个阶段一条,带路线上的上游/本道/下游部门
pub fn export_phases(ctx: &RunContext<'_>) -> ExportResult<Vec<PhaseRecord>> {
    let operations = ctx.snapshot.operations()?;
    let routes = ctx.snapshot.routes()?;
    let entities = ctx.snapshot.entities()?;
    let route_index = RefIndex::build("entity_route", routes, |r| r.id);
    let entity_index = RefIndex::build("entity", entities, |e| e.id);
    let phases = ctx.phases()?;
    let route_steps = ctx.route_steps()?;

    let short = ctx.config.short_phase_name_length;
    let mut tracker = StepTracker::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut records = Vec::new();

    for operation in sorted_by_route_and_nop(operations) {
        let route_id = operation.entity_route_id;
        let phase = match phases.get(operation.id) {
            Some(phase) => phase,
            None => continue,
        };
        let step = tracker.advance(route_id, phase) as usize;

        if !seen.insert(phase.to_string()) {
            continue;
        }
        let route = route_index.require(route_id)?;
        let entity = entity_index.require(route.entity_id)?;
        records.push(PhaseRecord {
            identity: phase.to_string(),
            name: char_suffix(phase, short).to_string(),
            incoming_department_identity: route_steps
                .department_at(route_id, step - 1)
                .map(str::to_owned),
            processing_department_identity: route_steps
                .department_at(route_id, step)
                .map(str::to_owned),
            outgoing_department_identity: route_steps
                .department_at(route_id, step + 1)
                .map(str::to_owned),
            assembly_element_identity: entity.identity.clone(),
        });
    }

    sort_by_identity(&mut records);
    Ok(records)
}

/// 阶段目录: 步序优先级 + 部门,并为不含 "-" 的阶段
/// 合成 "{前缀}_VPSK" 伴随行
pub fn export_phase_catalog(ctx: &RunContext<'_>) -> ExportResult<Vec<PhaseCatalogRecord>> {
    let operations = ctx.snapshot.operations()?;
    let routes = ctx.snapshot.routes()?;
    let departments = ctx.snapshot.departments()?;
    let route_index = RefIndex::build("entity_route", routes, |r| r.id);
    let department_index = RefIndex::build("department", departments, |d| d.id);
    let phases = ctx.phases()?;

    let short = ctx.config.short_phase_name_length;
    let prefix_len = ctx.config.phase_name_length;
    let policy = ExclusionPolicy::PhaseCatalog;

    let mut tracker = StepTracker::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut records = Vec::new();

    for operation in sorted_by_route_and_nop(operations) {
        if policy.excludes(operation) {
            continue;
        }
        let route_id = operation.entity_route_id;
        let phase = match phases.get(operation.id) {
            Some(phase) => phase,
            None => continue,
        };
        let department = department_index.require(operation.department_id)?;
        let step = tracker.advance(route_id, phase);

        if !seen.insert(phase.to_string()) {
            continue;
        }
        let route = route_index.require(route_id)?;
        records.push(PhaseCatalogRecord {
            identity: phase.to_string(),
            technological_process_identity: route.identity.clone(),
            name: char_suffix(phase, short).to_string(),
            priority: step,
            department_identity: department.identity.clone(),
        });

        // 不含 "-" 的阶段配一条外协入库伴随行
        if !phase.contains('-') {
            let companion = format!("{}_VPSK", char_prefix(phase, prefix_len));
            if seen.insert(companion.clone()) {
                records.push(PhaseCatalogRecord {
                    identity: companion.clone(),
                    technological_process_identity: route.identity.clone(),
                    name: companion,
                    priority: VPSK_PRIORITY,
                    department_identity: department.identity.clone(),
                });
            }
        }
    }

    sort_by_identity(&mut records);
    Ok(records)
}
