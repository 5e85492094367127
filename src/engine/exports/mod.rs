// ==========================================
// 仿真/MES 工艺阶段导出桥 - 导出操作层
// ==========================================
// 职责: 基于派生结构组装各类输出记录
// 红线: 不做任何 I/O;落盘/发送由 output 层与流水线负责
// ==========================================

pub mod daily_task_report;
pub mod labor_report;
pub mod master_data;
pub mod operation_report;
pub mod phase_report;
pub mod plan_report;
pub mod wip_report;

use crate::domain::record::IdentifiedRecord;

/// 统一按 identity 排序,保证同一快照下输出可复现
pub(crate) fn sort_by_identity<T: IdentifiedRecord>(records: &mut [T]) {
    records.sort_by(|a, b| a.identity().cmp(b.identity()));
}
