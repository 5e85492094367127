// ==========================================
// 仿真/MES 工艺阶段导出桥 - 本次运行的取数快照
// ==========================================
// 职责: 按表惰性取数 + 类型化解码,每张表每次运行至多取一次
// 红线: 快照对引擎只读;派生结构由引擎另行计算,
//       不在这里混入任何派生缓存
// ==========================================

use crate::domain::reference::{
    Department, Entity, EntityBatch, EntityRoute, Equipment, EquipmentClass, Operation,
    OperationProfession, Profession, RoutePhase, SimulationEquipment, SimulationTask,
    TaskEquipmentLink,
};
use crate::domain::SpecificationItem;
use crate::error::{ExportError, ExportResult};
use crate::source::collection::{CollectionSource, RawRow, Table};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::cell::OnceCell;
use tracing::info;

/// 行序列 → 类型化集合;任何一行缺字段/类型不符即致命
fn decode_rows<T: DeserializeOwned>(table: Table, rows: Vec<RawRow>) -> ExportResult<Vec<T>> {
    rows.into_iter()
        .map(|row| {
            serde_json::from_value(Value::Object(row)).map_err(|e| ExportError::Decode {
                table: table.as_str(),
                source: e,
            })
        })
        .collect()
}

// ==========================================
// SourceSnapshot - 单次运行的取数快照
// ==========================================
// 单线程批处理,用 OnceCell 做"取过即缓存"
pub struct SourceSnapshot {
    source: Box<dyn CollectionSource>,
    operations: OnceCell<Vec<Operation>>,
    routes: OnceCell<Vec<EntityRoute>>,
    route_phases: OnceCell<Vec<RoutePhase>>,
    departments: OnceCell<Vec<Department>>,
    equipment: OnceCell<Vec<Equipment>>,
    equipment_classes: OnceCell<Vec<EquipmentClass>>,
    entities: OnceCell<Vec<Entity>>,
    specification_items: OnceCell<Vec<SpecificationItem>>,
    professions: OnceCell<Vec<Profession>>,
    operation_professions: OnceCell<Vec<OperationProfession>>,
    entity_batches: OnceCell<Vec<EntityBatch>>,
    simulation_equipment: OnceCell<Vec<SimulationEquipment>>,
    task_equipment_links: OnceCell<Vec<TaskEquipmentLink>>,
}

impl SourceSnapshot {
    pub fn new(source: Box<dyn CollectionSource>) -> Self {
        Self {
            source,
            operations: OnceCell::new(),
            routes: OnceCell::new(),
            route_phases: OnceCell::new(),
            departments: OnceCell::new(),
            equipment: OnceCell::new(),
            equipment_classes: OnceCell::new(),
            entities: OnceCell::new(),
            specification_items: OnceCell::new(),
            professions: OnceCell::new(),
            operation_professions: OnceCell::new(),
            entity_batches: OnceCell::new(),
            simulation_equipment: OnceCell::new(),
            task_equipment_links: OnceCell::new(),
        }
    }

    /// 取过即缓存的统一实现
    fn cached<'a, T: DeserializeOwned>(
        &self,
        cell: &'a OnceCell<Vec<T>>,
        table: Table,
    ) -> ExportResult<&'a [T]> {
        if let Some(rows) = cell.get() {
            return Ok(rows);
        }
        let raw = self.source.fetch_collection(table)?;
        let decoded = decode_rows(table, raw)?;
        info!(table = table.as_str(), rows = decoded.len(), "集合已就绪");
        Ok(cell.get_or_init(|| decoded))
    }

    pub fn operations(&self) -> ExportResult<&[Operation]> {
        self.cached(&self.operations, Table::Operation)
    }

    pub fn routes(&self) -> ExportResult<&[EntityRoute]> {
        self.cached(&self.routes, Table::EntityRoute)
    }

    pub fn route_phases(&self) -> ExportResult<&[RoutePhase]> {
        self.cached(&self.route_phases, Table::EntityRoutePhase)
    }

    pub fn departments(&self) -> ExportResult<&[Department]> {
        self.cached(&self.departments, Table::Department)
    }

    pub fn equipment(&self) -> ExportResult<&[Equipment]> {
        self.cached(&self.equipment, Table::Equipment)
    }

    pub fn equipment_classes(&self) -> ExportResult<&[EquipmentClass]> {
        self.cached(&self.equipment_classes, Table::EquipmentClass)
    }

    pub fn entities(&self) -> ExportResult<&[Entity]> {
        self.cached(&self.entities, Table::Entity)
    }

    pub fn specification_items(&self) -> ExportResult<&[SpecificationItem]> {
        self.cached(&self.specification_items, Table::SpecificationItem)
    }

    pub fn professions(&self) -> ExportResult<&[Profession]> {
        self.cached(&self.professions, Table::Profession)
    }

    pub fn operation_professions(&self) -> ExportResult<&[OperationProfession]> {
        self.cached(&self.operation_professions, Table::OperationProfession)
    }

    pub fn entity_batches(&self) -> ExportResult<&[EntityBatch]> {
        self.cached(&self.entity_batches, Table::EntityBatch)
    }

    pub fn simulation_equipment(&self) -> ExportResult<&[SimulationEquipment]> {
        self.cached(&self.simulation_equipment, Table::SimulationEquipment)
    }

    pub fn task_equipment_links(&self) -> ExportResult<&[TaskEquipmentLink]> {
        self.cached(&self.task_equipment_links, Table::SimulationOperationTaskEquipment)
    }

    /// 仿真任务窗口(不缓存: 两个调用方的窗口半径不同)
    pub fn task_window(&self, horizon_hours: i64) -> ExportResult<Vec<SimulationTask>> {
        let raw = self.source.fetch_task_window(horizon_hours)?;
        decode_rows(Table::SimulationOperationTask, raw)
    }

    pub fn primary_session(&self) -> ExportResult<i64> {
        self.source.primary_session()
    }
}
