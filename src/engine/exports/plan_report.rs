// ==========================================
// 仿真/MES 工艺阶段导出桥 - BFG 计划导出
// ==========================================
// 职责: 仿真任务按阶段×日期聚合出投产/产出计划
// 口径: 每个阶段只认其工序列表(nop 字典序)的第一道(投产)
//       或最后一道(产出);早于今天的任务日期钳到今天
// ==========================================

use crate::domain::record::PlanRecord;
use crate::domain::reference::Operation;
use crate::domain::types::PlanKind;
use crate::engine::aggregator::{floor_delta, parse_task_timestamp, Accumulator, PlanKey};
use crate::engine::classifier::ExclusionPolicy;
use crate::engine::context::RunContext;
use crate::engine::exports::sort_by_identity;
use crate::error::ExportResult;
use std::collections::HashMap;
use tracing::debug;

/// 计划窗口: start_time ≤ 720 小时的任务
const PLAN_TASK_HORIZON_HOURS: i64 = 720;

pub fn export_plan(ctx: &RunContext<'_>, kind: PlanKind) -> ExportResult<Vec<PlanRecord>> {
    let operations = ctx.snapshot.operations()?;
    let phases = ctx.phases()?;
    let policy = ExclusionPolicy::PlanReport;

    // 阶段 → 该阶段的工序列表(nop 字典序)
    let mut ordered: Vec<&Operation> = operations
        .iter()
        .filter(|operation| !policy.excludes(operation))
        .collect();
    ordered.sort_by(|a, b| {
        (a.entity_route_id, a.nop.as_str()).cmp(&(b.entity_route_id, b.nop.as_str()))
    });

    let mut by_phase: HashMap<&str, Vec<&Operation>> = HashMap::new();
    for operation in ordered {
        if let Some(phase) = phases.get(operation.id) {
            by_phase.entry(phase).or_default().push(operation);
        }
    }
    for group in by_phase.values_mut() {
        group.sort_by(|a, b| a.nop.cmp(&b.nop));
    }

    // 阶段边界工序: 投产取第一道,产出取最后一道
    let boundary: HashMap<&str, i64> = by_phase
        .iter()
        .filter_map(|(phase, group)| {
            let operation = match kind {
                PlanKind::Launch => group.first()?,
                PlanKind::Finish => group.last()?,
            };
            Some((*phase, operation.id))
        })
        .collect();

    let today = ctx.today();
    let tasks = ctx.snapshot.task_window(PLAN_TASK_HORIZON_HOURS)?;
    let mut report: Accumulator<PlanKey, i64> = Accumulator::new();

    for task in &tasks {
        let phase = match phases.get(task.operation_id) {
            Some(phase) => phase,
            None => continue,
        };
        match boundary.get(phase) {
            Some(boundary_id) if *boundary_id == task.operation_id => {}
            Some(_) => continue,
            None => {
                debug!(operation_id = task.operation_id, "阶段无边界工序,任务跳过");
                continue;
            }
        }

        let raw_date = match kind {
            PlanKind::Launch => &task.start_date,
            PlanKind::Finish => &task.stop_date,
        };
        let task_date = parse_task_timestamp(raw_date)?.date().max(today);

        report.add(
            PlanKey {
                phase: phase.to_string(),
                date: task_date,
            },
            floor_delta(task.entity_amount, task.start_labor, task.stop_labor),
        );
    }

    let mut records: Vec<PlanRecord> = report
        .into_buckets()
        .into_iter()
        .map(|(key, quantity)| PlanRecord {
            identity: format!("{}_{}", key.date, key.phase),
            transition_identity: key.phase,
            date: key.date,
            quantity,
            kind,
        })
        .collect();
    sort_by_identity(&mut records);
    Ok(records)
}
