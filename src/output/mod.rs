// ==========================================
// 仿真/MES 工艺阶段导出桥 - 输出层
// ==========================================
// 职责: 导出记录落盘(每条记录一个 JSON 文件)与班次任务快照持久化
// ==========================================

mod json_dir;
mod snapshot_store;

pub use json_dir::write_records;
pub use snapshot_store::SnapshotStore;
