// ==========================================
// 仿真/MES 工艺阶段导出桥 - 领域模型层
// ==========================================
// 职责: 定义参照表行、输出记录与基础类型
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod record;
pub mod reference;
pub mod types;

// 重导出核心类型
pub use record::{
    DailyTaskRecord, DepartmentRecord, EntityRecord, EquipmentClassRecord, EquipmentQuantity,
    EquipmentRecord, ErpFactRecord, ErpPlanRecord, IdentifiedRecord, InventoryRecord, LaborRecord,
    OperationRecord, PgWipRecord, PhaseCatalogRecord, PhaseRecord, PlanRecord, RouteRecord,
    SpecItemRecord, SpecRecord, WipRecord,
};
pub use reference::{
    Department, Entity, EntityBatch, EntityRoute, Equipment, EquipmentClass, Operation,
    OperationProfession, Profession, RoutePhase, SimulationEquipment, SimulationTask,
    SpecificationItem, TaskEquipmentLink,
};
pub use types::{PlanKind, TimeSlot};
