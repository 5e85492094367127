// ==========================================
// 仿真/MES 工艺阶段导出桥 - 核心库
// ==========================================
// 技术栈: Rust + serde + chrono
// 系统定位: 批处理导出工具 (单线程, 同步 I/O)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 记录与类型
pub mod domain;

// 数据源层 - 取数快照
pub mod source;

// 引擎层 - 解析/聚合/导出
pub mod engine;

// 导入层 - ERP/人员 CSV 文件
pub mod importer;

// 输出层 - JSON 目录与任务快照
pub mod output;

// 配置层 - 业务配置
pub mod config;

// 流水线 - 单次运行编排
pub mod pipeline;

// 日志系统
pub mod logging;

// 统一错误类型
pub mod error;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{PlanKind, TimeSlot};
pub use domain::IdentifiedRecord;

// 引擎
pub use engine::{
    merge_with_snapshot, Accumulator, ExclusionPolicy, MainRouteIndex, PhaseMap, RefIndex,
    RouteStepIndex, RunContext, StepTracker,
};

// 配置与流水线
pub use config::ExportConfig;
pub use pipeline::{ExportKind, RunSummary};

// 错误
pub use error::{ExportError, ExportResult};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "仿真/MES 工艺阶段导出桥";

// ==========================================
// 预编译检查
// ==========================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
