// ==========================================
// 仿真/MES 工艺阶段导出桥 - 标识分类器
// ==========================================
// 职责: 工序标识串上的业务排除规则,纯函数谓词
// 口径: 标记字符集属于业务配置,全部集中在本文件,
//       任一谓词命中即排除(逻辑或)
// ==========================================

use crate::domain::reference::Operation;

// ===== 业务标记集(随业务签核变化时只改这里) =====

/// 调整类子工序标记(西里尔字符)
const SETUP_MARKER: char = 'н';
/// 检验类子工序标记(西里尔字符)
const INSPECTION_MARKER: char = 'с';
/// 返工/转运类工序尾缀
const REWORK_SUFFIX: char = 'Ц';
/// 维护类工序尾缀(西里尔与拉丁两种写法并存于源数据)
const MAINTENANCE_SUFFIXES: [&str; 2] = ["МН", "MH"];
/// 不计数的预备步骤 nop 尾缀
const PREPARATORY_NOP_SUFFIX: &str = "_1";

// ==========================================
// 独立谓词(可单独测试与审计)
// ==========================================

/// identity 含调整标记
pub fn has_setup_marker(identity: &str) -> bool {
    identity.contains(SETUP_MARKER)
}

/// identity 含检验标记
pub fn has_inspection_marker(identity: &str) -> bool {
    identity.contains(INSPECTION_MARKER)
}

/// identity 以返工尾缀结尾
pub fn has_rework_suffix(identity: &str) -> bool {
    identity.ends_with(REWORK_SUFFIX)
}

/// identity 以维护尾缀结尾
pub fn has_maintenance_suffix(identity: &str) -> bool {
    MAINTENANCE_SUFFIXES
        .iter()
        .any(|suffix| identity.ends_with(suffix))
}

/// nop 以 "_1" 结尾(预备步骤,不计入工序报表)
pub fn is_preparatory_step(nop: &str) -> bool {
    nop.ends_with(PREPARATORY_NOP_SUFFIX)
}

// ==========================================
// ExclusionPolicy - 各导出的组合口径
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExclusionPolicy {
    /// 阶段目录: 剔除调整/检验子工序
    PhaseCatalog,
    /// 工序报表: 全部五条规则
    OperationReport,
    /// 计划导出: 只剔除调整子工序
    PlanReport,
    /// 班次任务: 全部五条规则
    DailyTasks,
}

impl ExclusionPolicy {
    /// 任一成员谓词命中即排除
    pub fn excludes(&self, operation: &Operation) -> bool {
        let identity = operation.identity.as_str();
        match self {
            ExclusionPolicy::PhaseCatalog => {
                has_setup_marker(identity) || has_inspection_marker(identity)
            }
            ExclusionPolicy::PlanReport => has_setup_marker(identity),
            ExclusionPolicy::OperationReport | ExclusionPolicy::DailyTasks => {
                has_setup_marker(identity)
                    || has_inspection_marker(identity)
                    || has_rework_suffix(identity)
                    || has_maintenance_suffix(identity)
                    || is_preparatory_step(&operation.nop)
            }
        }
    }
}
