// ==========================================
// 仿真/MES 工艺阶段导出桥 - 主数据导出
// ==========================================
// 职责: 产品/部门/设备/BOM/路线目录的薄导出
// 口径: 参照链接缺失一律致命(参照数据不一致)
// ==========================================

use crate::domain::record::{
    DepartmentRecord, EntityRecord, EquipmentClassRecord, EquipmentRecord, RouteRecord,
    SpecItemRecord, SpecRecord,
};
use crate::engine::context::RunContext;
use crate::engine::exports::sort_by_identity;
use crate::engine::reference_index::RefIndex;
use crate::error::ExportResult;
use std::collections::BTreeMap;

/// 产品目录;vendorCode 复用 identity(下游约定)
pub fn export_entities(ctx: &RunContext<'_>) -> ExportResult<Vec<EntityRecord>> {
    let mut records: Vec<EntityRecord> = ctx
        .snapshot
        .entities()?
        .iter()
        .map(|entity| EntityRecord {
            identity: entity.identity.clone(),
            name: entity.name.clone(),
            vendor_code: entity.identity.clone(),
        })
        .collect();
    sort_by_identity(&mut records);
    Ok(records)
}

/// 部门目录
pub fn export_departments(ctx: &RunContext<'_>) -> ExportResult<Vec<DepartmentRecord>> {
    let mut records: Vec<DepartmentRecord> = ctx
        .snapshot
        .departments()?
        .iter()
        .map(|department| DepartmentRecord {
            identity: department.identity.clone(),
            name: department.name.clone(),
        })
        .collect();
    sort_by_identity(&mut records);
    Ok(records)
}

/// 设备类别(工作中心)目录
pub fn export_equipment_classes(ctx: &RunContext<'_>) -> ExportResult<Vec<EquipmentClassRecord>> {
    let mut records: Vec<EquipmentClassRecord> = ctx
        .snapshot
        .equipment_classes()?
        .iter()
        .map(|class| EquipmentClassRecord {
            identity: class.identity.clone(),
            class_name: class.name.clone(),
        })
        .collect();
    sort_by_identity(&mut records);
    Ok(records)
}

/// 物理设备目录;identity 为空的行跳过
pub fn export_equipment(ctx: &RunContext<'_>) -> ExportResult<Vec<EquipmentRecord>> {
    let classes = ctx.snapshot.equipment_classes()?;
    let departments = ctx.snapshot.departments()?;
    let class_index = RefIndex::build("equipment_class", classes, |c| c.id);
    let department_index = RefIndex::build("department", departments, |d| d.id);

    let mut records = Vec::new();
    for equipment in ctx.snapshot.equipment()? {
        let identity = match equipment.identity.as_deref() {
            Some(identity) if !identity.is_empty() => identity,
            _ => continue,
        };
        records.push(EquipmentRecord {
            identity: identity.to_string(),
            number: identity.to_string(),
            model: equipment.name.clone(),
            work_center_identity: class_index
                .require(equipment.equipment_class_id)?
                .identity
                .clone(),
            department_identity: department_index
                .require(equipment.department_id)?
                .identity
                .clone(),
        });
    }
    sort_by_identity(&mut records);
    Ok(records)
}

/// BOM: 子件按父产品聚合
pub fn export_specifications(ctx: &RunContext<'_>) -> ExportResult<Vec<SpecRecord>> {
    let entities = ctx.snapshot.entities()?;
    let entity_index = RefIndex::build("entity", entities, |e| e.id);

    let mut grouped: BTreeMap<String, Vec<SpecItemRecord>> = BTreeMap::new();
    for item in ctx.snapshot.specification_items()? {
        let parent = entity_index.require(item.parent_id)?;
        let child = entity_index.require(item.child_id)?;
        grouped
            .entry(parent.identity.clone())
            .or_default()
            .push(SpecItemRecord {
                assembly_element_identity: child.identity.clone(),
                quantity_assembly_element: item.amount,
            });
    }

    Ok(grouped
        .into_iter()
        .map(|(parent, items)| SpecRecord {
            identity: parent.clone(),
            parent_assembly_element_identity: parent,
            items,
        })
        .collect())
}

/// 路线目录
pub fn export_routes(ctx: &RunContext<'_>) -> ExportResult<Vec<RouteRecord>> {
    let entities = ctx.snapshot.entities()?;
    let entity_index = RefIndex::build("entity", entities, |e| e.id);

    let mut records = Vec::new();
    for route in ctx.snapshot.routes()? {
        records.push(RouteRecord {
            identity: route.identity.clone(),
            assembly_element_identity: entity_index.require(route.entity_id)?.identity.clone(),
            name: route.identity.clone(),
        });
    }
    sort_by_identity(&mut records);
    Ok(records)
}
