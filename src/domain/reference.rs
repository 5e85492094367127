// ==========================================
// 仿真/MES 工艺阶段导出桥 - 参照表行模型
// ==========================================
// 口径: 每张参照表一条扁平记录,字段与上游 REST 集合一致
// 红线: 取到即不可变;缺少必要字段视为数据契约违约(解码即失败)
// ==========================================

use serde::Deserialize;

// ==========================================
// Operation - 工序
// ==========================================
// identity 串内嵌业务标记(调整/检验/报废等),由分类器解读
// nop 为路线内顺序号字符串,排序必须按字典序(业务约束,勿改数值序)
#[derive(Debug, Clone, Deserialize)]
pub struct Operation {
    pub id: i64,
    pub identity: String,
    #[serde(default)]
    pub name: String,
    pub nop: String,                          // 路线内顺序号(字符串)
    pub entity_route_id: i64,                 // 所属路线
    pub entity_route_phase_id: Option<i64>,   // 阶段链接(可空)
    pub department_id: i64,                   // 执行部门
    pub equipment_class_id: i64,              // 设备类别(工作中心)
    #[serde(default)]
    pub prep_time: f64,                       // 准备时间(秒)
    #[serde(default)]
    pub prod_time: f64,                       // 加工时间(秒)
}

// ==========================================
// EntityRoute - 工艺路线
// ==========================================
// alternate=false 的路线为该产品的主路线(每个产品至多一条)
#[derive(Debug, Clone, Deserialize)]
pub struct EntityRoute {
    pub id: i64,
    pub identity: String,
    pub entity_id: i64,
    pub alternate: bool,
}

// ==========================================
// RoutePhase - 路线阶段
// ==========================================
#[derive(Debug, Clone, Deserialize)]
pub struct RoutePhase {
    pub id: i64,
    pub identity: String,
}

// ==========================================
// Department - 部门
// ==========================================
#[derive(Debug, Clone, Deserialize)]
pub struct Department {
    pub id: i64,
    pub identity: String,
    #[serde(default)]
    pub name: String,
}

// ==========================================
// Equipment / EquipmentClass - 设备与设备类别
// ==========================================
#[derive(Debug, Clone, Deserialize)]
pub struct Equipment {
    pub id: i64,
    pub identity: Option<String>, // 可能为空串/空值,导出时跳过
    #[serde(default)]
    pub name: String,
    pub equipment_class_id: i64,
    pub department_id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EquipmentClass {
    pub id: i64,
    pub identity: String,
    #[serde(default)]
    pub name: String,
}

// ==========================================
// Entity - 产品(装配元素)
// ==========================================
#[derive(Debug, Clone, Deserialize)]
pub struct Entity {
    pub id: i64,
    pub identity: String,
    #[serde(default)]
    pub name: String,
}

// ==========================================
// SpecificationItem - BOM 条目
// ==========================================
#[derive(Debug, Clone, Deserialize)]
pub struct SpecificationItem {
    pub parent_id: i64,
    pub child_id: i64,
    pub amount: f64,
}

// ==========================================
// Profession / OperationProfession - 工种与工序定员
// ==========================================
#[derive(Debug, Clone, Deserialize)]
pub struct Profession {
    pub id: i64,
    pub identity: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OperationProfession {
    pub operation_id: i64,
    pub profession_id: i64,
    pub amount: f64,
}

// ==========================================
// EntityBatch - 在制品批次
// ==========================================
// operation_id 为空且 operation_progress>0 表示批次已完成主路线;
// identity 末 4 位编码存放部门(上游约定)
#[derive(Debug, Clone, Deserialize)]
pub struct EntityBatch {
    pub identity: String,
    pub entity_id: i64,
    pub operation_id: Option<i64>,
    pub amount: f64,
    #[serde(default)]
    pub operation_progress: f64,
    #[serde(default)]
    pub entity_batch_snapshot_id: Option<i64>,
}

// ==========================================
// 仿真任务相关行
// ==========================================
// 来源为仿真会话的排程结果;start/stop_labor 为完成率(缺省 0/1)
#[derive(Debug, Clone, Deserialize)]
pub struct SimulationTask {
    pub id: i64,
    pub operation_id: i64,
    pub entity_amount: f64,
    #[serde(default)]
    pub start_labor: Option<f64>,
    #[serde(default)]
    pub stop_labor: Option<f64>,
    pub start_date: String, // 原样字符串,解析交给聚合器
    pub stop_date: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SimulationEquipment {
    pub id: i64,
    pub equipment_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TaskEquipmentLink {
    pub simulation_operation_task_id: i64,
    pub simulation_equipment_id: i64,
}
