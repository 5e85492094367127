// ==========================================
// 仿真/MES 工艺阶段导出桥 - 路线遍历引擎
// ==========================================
// 职责: 按路线导出阶段切换处的部门序列与步序号
// 红线: nop 按字符串字典序排序,不得改成数值序
//       (业务依赖 "010_1" < "010_2" < "020_1" 的分组效果)
// ==========================================

mod core;


pub use self::core::{RouteStepIndex, StepTracker};
