// ==========================================
// 仿真/MES 工艺阶段导出桥 - 配置层
// ==========================================
// 职责: 业务配置的加载与查询(JSON 文件)
// ==========================================

mod export_config;

pub use export_config::ExportConfig;
