// ==========================================
// 仿真/MES 工艺阶段导出桥 - 阶段解析引擎
// ==========================================
// 职责: 工序 id → 阶段 identity 的一次性全量解析与缓存
// 红线: 整个运行只解析一次;重复查询 O(1);
//       空阶段链接是可恢复事件,不中止运行
// ==========================================

mod core;

#[cfg(test)]
mod tests;

pub use self::core::{MainRouteIndex, PhaseMap};
