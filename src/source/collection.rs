// ==========================================
// 仿真/MES 工艺阶段导出桥 - 数据源协作方接口
// ==========================================
// 职责: 定义"按表取整张集合"的抽象
// 红线: 分页拼接、重试、登录会话都属于协作方内部事务,
//       核心只消费拼接完成的扁平行序列
// ==========================================

use crate::error::ExportResult;
use serde_json::{Map, Value};

/// 上游返回的一行: 字段名 → 值 的扁平映射
pub type RawRow = Map<String, Value>;

// ==========================================
// Table - 参照表标识
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Operation,
    EntityRoute,
    EntityRoutePhase,
    Department,
    Equipment,
    EquipmentClass,
    Entity,
    SpecificationItem,
    Profession,
    OperationProfession,
    EntityBatch,
    SimulationOperationTask,
    SimulationEquipment,
    SimulationOperationTaskEquipment,
}

impl Table {
    /// 上游集合名(同时用作文件名与诊断信息)
    pub fn as_str(&self) -> &'static str {
        match self {
            Table::Operation => "operation",
            Table::EntityRoute => "entity_route",
            Table::EntityRoutePhase => "entity_route_phase",
            Table::Department => "department",
            Table::Equipment => "equipment",
            Table::EquipmentClass => "equipment_class",
            Table::Entity => "entity",
            Table::SpecificationItem => "specification_item",
            Table::Profession => "profession",
            Table::OperationProfession => "operation_profession",
            Table::EntityBatch => "entity_batch",
            Table::SimulationOperationTask => "simulation_operation_task",
            Table::SimulationEquipment => "simulation_equipment",
            Table::SimulationOperationTaskEquipment => "simulation_operation_task_equipment",
        }
    }
}

// ==========================================
// CollectionSource - 数据源协作方
// ==========================================
/// 数据源抽象
///
/// # 契约
/// - `fetch_collection` 返回整张表的行序列,按上游源序拼接完毕
/// - 取数失败(网络/格式)即致命,调用方中止本次运行
pub trait CollectionSource {
    /// 取整张参照表
    fn fetch_collection(&self, table: Table) -> ExportResult<Vec<RawRow>>;

    /// 取仿真任务窗口: start_time <= horizon_hours 且 type=0 的任务行
    fn fetch_task_window(&self, horizon_hours: i64) -> ExportResult<Vec<RawRow>>;

    /// 主仿真会话 id
    fn primary_session(&self) -> ExportResult<i64>;
}
