use crate::domain::reference::{EntityRoute, Operation, RoutePhase};
use crate::engine::reference_index::RefIndex;
use crate::error::ExportResult;
use std::collections::HashMap;
use tracing::warn;

// ==========================================
// PhaseMap - 工序→阶段 解析结果
// ==========================================
// 整个运行只计算一次;查不到的工序返回 None("无阶段"信号)
pub struct PhaseMap {
    by_operation: HashMap<i64, String>,
    failures: usize,
}

impl PhaseMap {
    /// 对整个工序集合做一次性解析
    ///
    /// 规则:
    /// - 阶段链接非空: 经 entity_route_phase 索引取阶段 identity,
    ///   链接指向的阶段不存在视为参照不一致(致命)
    /// - 阶段链接为空: 记一次解析失败并告警;
    ///   identity 含 "(" 的工序是刻意不解析的(注释/试验工序),静默跳过
    pub fn resolve_all(
        operations: &[Operation],
        route_phases: &[RoutePhase],
    ) -> ExportResult<Self> {
        let phase_index = RefIndex::build("entity_route_phase", route_phases, |p| p.id);

        // 按 nop 字典序遍历,保证告警顺序与路线顺序一致
        let mut ordered: Vec<&Operation> = operations.iter().collect();
        ordered.sort_by(|a, b| a.nop.cmp(&b.nop));

        let mut by_operation = HashMap::with_capacity(operations.len());
        let mut failures = 0usize;
        for operation in ordered {
            match operation.entity_route_phase_id {
                Some(phase_id) => {
                    let phase = phase_index.require(phase_id)?;
                    by_operation.insert(operation.id, phase.identity.clone());
                }
                None => {
                    if !operation.identity.contains('(') {
                        warn!(operation = %operation.identity, "未找到工序对应的阶段");
                        failures += 1;
                    }
                }
            }
        }

        Ok(Self {
            by_operation,
            failures,
        })
    }

    /// O(1) 查询;工序不存在或未解析时返回 None,不报错
    pub fn get(&self, operation_id: i64) -> Option<&str> {
        self.by_operation.get(&operation_id).map(String::as_str)
    }

    /// 本次运行的解析失败计数
    pub fn resolution_failures(&self) -> usize {
        self.failures
    }

    pub fn len(&self) -> usize {
        self.by_operation.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_operation.is_empty()
    }
}

// ==========================================
// MainRouteIndex - 主路线与末道工序
// ==========================================
// 每个产品至多一条 alternate=false 的主路线;
// 末道工序按 nop 字典序取最后一条(批次收尾时的阶段归属)
pub struct MainRouteIndex {
    main_route_by_entity: HashMap<i64, i64>,
    last_operation_by_route: HashMap<i64, i64>,
}

impl MainRouteIndex {
    pub fn build(routes: &[EntityRoute], operations: &[Operation]) -> Self {
        let mut main_route_by_entity = HashMap::new();
        for route in routes.iter().filter(|r| !r.alternate) {
            main_route_by_entity.insert(route.entity_id, route.id);
        }

        let mut ordered: Vec<&Operation> = operations.iter().collect();
        ordered.sort_by(|a, b| a.nop.cmp(&b.nop));

        let mut last_operation_by_route = HashMap::new();
        for operation in ordered {
            last_operation_by_route.insert(operation.entity_route_id, operation.id);
        }

        Self {
            main_route_by_entity,
            last_operation_by_route,
        }
    }

    pub fn has_main_route(&self, entity_id: i64) -> bool {
        self.main_route_by_entity.contains_key(&entity_id)
    }

    /// 产品主路线末道工序的阶段;无主路线/无工序/未解析时为 None
    pub fn last_phase<'a>(&self, entity_id: i64, phases: &'a PhaseMap) -> Option<&'a str> {
        let route_id = self.main_route_by_entity.get(&entity_id)?;
        let operation_id = self.last_operation_by_route.get(route_id)?;
        phases.get(*operation_id)
    }
}
