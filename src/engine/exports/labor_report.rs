// ==========================================
// 仿真/MES 工艺阶段导出桥 - 阶段工时导出
// ==========================================
// 职责: 按阶段汇总 加工时间 × 定员系数 的工时
// 口径: 质检类工种(контролер/otk)不计入定员系数;
//       无定员记录的工序系数为 0(可选外键的默认语义)
// ==========================================

use crate::domain::record::LaborRecord;
use crate::engine::aggregator::{seconds_to_hours, Accumulator};
use crate::engine::context::RunContext;
use crate::engine::exports::sort_by_identity;
use crate::engine::reference_index::RefIndex;
use crate::error::ExportResult;
use tracing::debug;

/// 不计入定员的工种标识子串(小写比较)
const EXCLUDED_PROFESSION_MARKERS: [&str; 2] = ["контролер", "otk"];

pub fn export_phase_labor(ctx: &RunContext<'_>) -> ExportResult<Vec<LaborRecord>> {
    let operations = ctx.snapshot.operations()?;
    let professions = ctx.snapshot.professions()?;
    let links = ctx.snapshot.operation_professions()?;
    let profession_index = RefIndex::build("profession", professions, |p| p.id);
    let phases = ctx.phases()?;

    // 工序 → 定员系数
    let mut multiplicator: Accumulator<i64, f64> = Accumulator::new();
    for link in links {
        let profession = profession_index.require(link.profession_id)?;
        let identity = profession.identity.to_lowercase();
        if EXCLUDED_PROFESSION_MARKERS
            .iter()
            .any(|marker| identity.contains(marker))
        {
            continue;
        }
        multiplicator.add(link.operation_id, link.amount);
    }

    // 阶段 → 工时秒
    let mut labor: Accumulator<String, f64> = Accumulator::new();
    for operation in operations {
        let phase = match phases.get(operation.id) {
            Some(phase) => phase,
            None => {
                debug!(operation = %operation.identity, "工时汇总跳过无阶段工序");
                continue;
            }
        };
        labor.add(
            phase.to_string(),
            operation.prod_time * multiplicator.get(&operation.id),
        );
    }

    let today = ctx.today();
    let mut records: Vec<LaborRecord> = labor
        .into_buckets()
        .into_iter()
        .map(|(phase, seconds)| LaborRecord {
            identity: format!("{}_{}", phase, today),
            transition_identity: phase,
            date: today,
            total_time: seconds_to_hours(seconds),
        })
        .collect();
    sort_by_identity(&mut records);
    Ok(records)
}
