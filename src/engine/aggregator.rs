// ==========================================
// 仿真/MES 工艺阶段导出桥 - 事实聚合引擎
// ==========================================
// 职责: 数量/工时事实按(阶段 × 次级维度)分桶的加法累计
// 口径: 工时秒÷3600 保留 4 位小数;数量按完成率取整差累计;
//       累计满足交换律与结合律(浮点求和误差除外)
// ==========================================

mod core;


pub use self::core::{
    floor_delta, parse_task_timestamp, seconds_to_hours, Accumulator, InventoryKey, PlanKey,
    TaskEquipmentKey, TaskKey,
};
