use crate::domain::reference::{Department, Operation};
use crate::engine::phase_resolver::PhaseMap;
use crate::engine::reference_index::RefIndex;
use crate::error::ExportResult;
use std::collections::HashMap;

// ==========================================
// RouteStepIndex - 路线的部门序列
// ==========================================
// 每条路线的序列以 None 哨兵开头与收尾,
// 使第 i 个阶段的上游(i-1)/下游(i+1)查询永不越界
pub struct RouteStepIndex {
    departments: HashMap<i64, Vec<Option<String>>>,
}

impl RouteStepIndex {
    /// 构建全部路线的部门序列
    ///
    /// 遍历按 (路线, nop 字典序) 排序的工序;
    /// 解析出的阶段(含"未解析"这一取值)相对上一道发生变化时,
    /// 把当前工序的部门追加进该路线的序列
    pub fn build(
        operations: &[Operation],
        phases: &PhaseMap,
        departments: &RefIndex<'_, Department>,
    ) -> ExportResult<Self> {
        let mut ordered: Vec<&Operation> = operations.iter().collect();
        ordered.sort_by(|a, b| {
            (a.entity_route_id, a.nop.as_str()).cmp(&(b.entity_route_id, b.nop.as_str()))
        });

        let mut sequences: HashMap<i64, Vec<Option<String>>> = HashMap::new();
        let mut prev_phase: HashMap<i64, Option<String>> = HashMap::new();

        for operation in ordered {
            let route_id = operation.entity_route_id;
            let phase = phases.get(operation.id).map(str::to_owned);
            let department = departments.require(operation.department_id)?;

            // 路线首次出现: 带上头部哨兵
            let sequence = sequences.entry(route_id).or_insert_with(|| vec![None]);
            let prev = prev_phase.entry(route_id).or_insert(None);

            if *prev != phase {
                sequence.push(Some(department.identity.clone()));
                *prev = phase;
            }
        }

        // 尾部哨兵
        for sequence in sequences.values_mut() {
            sequence.push(None);
        }

        Ok(Self {
            departments: sequences,
        })
    }

    /// 路线上第 idx 个位置的部门;哨兵与越界都归为"无部门"
    pub fn department_at(&self, route_id: i64, idx: usize) -> Option<&str> {
        self.departments
            .get(&route_id)?
            .get(idx)?
            .as_deref()
    }

    /// 路线的序列长度(含两端哨兵),仅用于诊断
    pub fn sequence_len(&self, route_id: i64) -> usize {
        self.departments.get(&route_id).map_or(0, Vec::len)
    }
}

// ==========================================
// StepTracker - 路线内步序计数器
// ==========================================
// 首个解析出的阶段记步序 1,此后每次阶段变化 +1;
// 调用方只对"已解析出阶段"的工序推进
pub struct StepTracker {
    prev_phase: HashMap<i64, String>,
    step: HashMap<i64, u32>,
}

impl StepTracker {
    pub fn new() -> Self {
        Self {
            prev_phase: HashMap::new(),
            step: HashMap::new(),
        }
    }

    /// 推进一道工序,返回其所处的步序号(从 1 开始,严格单调不减)
    pub fn advance(&mut self, route_id: i64, phase: &str) -> u32 {
        match self.prev_phase.get_mut(&route_id) {
            None => {
                self.prev_phase.insert(route_id, phase.to_owned());
                self.step.insert(route_id, 1);
                1
            }
            Some(prev) => {
                let counter = self.step.entry(route_id).or_insert(1);
                if prev != phase {
                    *counter += 1;
                    *prev = phase.to_owned();
                }
                *counter
            }
        }
    }
}

impl Default for StepTracker {
    fn default() -> Self {
        Self::new()
    }
}
