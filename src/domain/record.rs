// ==========================================
// 仿真/MES 工艺阶段导出桥 - 输出记录模型
// ==========================================
// 口径: 每种导出类型一个记录结构,字段名与下游消费方约定一致
// 红线: 每条记录必须携带稳定 identity,
//       供快照合并与下游幂等 upsert 使用
// ==========================================

use crate::domain::types::{PlanKind, TimeSlot};
use chrono::NaiveDate;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

/// 所有输出记录的公共约束: 稳定 identity
pub trait IdentifiedRecord {
    fn identity(&self) -> &str;
}

macro_rules! impl_identified {
    ($($ty:ty),+ $(,)?) => {
        $(impl IdentifiedRecord for $ty {
            fn identity(&self) -> &str {
                &self.identity
            }
        })+
    };
}

// ==========================================
// 主数据记录
// ==========================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityRecord {
    pub identity: String,
    pub name: String,
    pub vendor_code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentRecord {
    pub identity: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentClassRecord {
    pub identity: String,
    pub class_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentRecord {
    pub identity: String,
    pub number: String,
    pub model: String,
    pub work_center_identity: String,
    pub department_identity: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecItemRecord {
    pub assembly_element_identity: String,
    pub quantity_assembly_element: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecRecord {
    pub identity: String,
    pub parent_assembly_element_identity: String,
    pub items: Vec<SpecItemRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRecord {
    pub identity: String,
    pub assembly_element_identity: String,
    pub name: String,
}

// ==========================================
// 阶段/工序记录
// ==========================================

/// 阶段记录: 含路线上的上游/本道/下游部门
/// 位于路线首尾的阶段,对应方向上没有部门(输出 null)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseRecord {
    pub identity: String,
    pub name: String,
    pub incoming_department_identity: Option<String>,
    pub processing_department_identity: Option<String>,
    pub outgoing_department_identity: Option<String>,
    pub assembly_element_identity: String,
}

/// 阶段目录记录: 含路线内步序优先级
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseCatalogRecord {
    pub identity: String,
    pub technological_process_identity: String,
    pub name: String,
    pub priority: u32,
    pub department_identity: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationRecord {
    pub identity: String,
    pub transition_identity: String,
    pub assembly_element_identity: String,
    pub department_identity: String,
    pub work_center_identity: String,
    pub technological_process_identity: String,
    pub number: String,
    pub priority: u32,
    pub name: String,
    pub piece_time: f64, // 小时,保留 4 位小数
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LaborRecord {
    pub identity: String,
    pub transition_identity: String,
    pub date: NaiveDate,
    pub total_time: f64, // 小时,保留 4 位小数
}

// ==========================================
// 计划记录
// ==========================================
// 数量列名随计划类型变化(quantityLaunch / quantityPlanBFG),
// 手写 Serialize 以在运行期选择列名
#[derive(Debug, Clone, PartialEq)]
pub struct PlanRecord {
    pub identity: String,
    pub transition_identity: String,
    pub date: NaiveDate,
    pub quantity: i64,
    pub kind: PlanKind,
}

impl Serialize for PlanRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("PlanRecord", 4)?;
        state.serialize_field("identity", &self.identity)?;
        state.serialize_field("transitionIdentity", &self.transition_identity)?;
        state.serialize_field("date", &self.date)?;
        state.serialize_field(self.kind.quantity_column(), &self.quantity)?;
        state.end()
    }
}

// ==========================================
// 班次任务记录(参与快照合并)
// ==========================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentQuantity {
    pub identity: String,
    pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTaskRecord {
    pub identity: String,
    pub operation_identity: String,
    pub assembly_element_identity: String,
    pub quantity_plan: i64,
    pub date_begin: NaiveDate,
    pub time_begin: TimeSlot,
    pub equipments: Option<Vec<EquipmentQuantity>>,
}

// ==========================================
// 在制品/库存记录
// ==========================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WipRecord {
    pub identity: String,
    pub department_identity: String,
    pub transition_identity: String,
    pub quantity: i64,
    pub date_time: String, // %Y-%m-%dT%H:%M:%S
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRecord {
    pub identity: String, // "{phase}|{department}|{entity}"
    pub department_identity: String,
    pub assembly_element_identity: String,
    pub transition_identity: String,
    pub quantity_assembly_element: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PgWipRecord {
    pub identity: String,
    pub warehouse: String,
    pub transition_identity: String,
    pub quantity: i64,
    pub date: NaiveDate,
}

// ==========================================
// ERP 文件导入记录
// ==========================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErpPlanRecord {
    pub identity: String,
    pub transition_identity: String,
    pub date: String, // 来源文件中的日期串(点号已替换为连字符)
    #[serde(rename = "quantityPlanERP")]
    pub quantity_plan_erp: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErpFactRecord {
    pub identity: String, // "{code}|{date}"
    pub transition_identity: String,
    pub date: String,
    pub quantity_actual: f64,
}

impl_identified!(
    EntityRecord,
    DepartmentRecord,
    EquipmentClassRecord,
    EquipmentRecord,
    SpecRecord,
    RouteRecord,
    PhaseRecord,
    PhaseCatalogRecord,
    OperationRecord,
    LaborRecord,
    PlanRecord,
    DailyTaskRecord,
    WipRecord,
    InventoryRecord,
    PgWipRecord,
    ErpPlanRecord,
    ErpFactRecord,
);
