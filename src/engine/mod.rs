// ==========================================
// 仿真/MES 工艺阶段导出桥 - 引擎层
// ==========================================
// 职责: 阶段解析、路线推导、聚合与各类导出组装
// 红线: 引擎层不做 I/O;取数经 SourceSnapshot,落盘经 output 层
// ==========================================

pub mod aggregator;
pub mod classifier;
pub mod context;
pub mod exports;
pub mod phase_resolver;
pub mod reference_index;
pub mod route_walker;
pub mod snapshot_merge;

// 重导出核心结构
pub use aggregator::Accumulator;
pub use classifier::ExclusionPolicy;
pub use context::RunContext;
pub use phase_resolver::{MainRouteIndex, PhaseMap};
pub use reference_index::RefIndex;
pub use route_walker::{RouteStepIndex, StepTracker};
pub use snapshot_merge::merge_with_snapshot;
