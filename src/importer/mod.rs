// ==========================================
// 仿真/MES 工艺阶段导出桥 - 文件导入层
// ==========================================
// 职责: 读取 ERP 计划/实绩与人员表的 CSV 文件并转为输出记录
// 口径: 文件路径来自业务配置;未配置路径即配置错误
// ==========================================

mod employee;
mod erp_fact;
mod erp_plan;

pub use employee::{import_employees, EmployeeRecord};
pub use erp_fact::import_erp_fact;
pub use erp_plan::import_erp_plan;

use crate::error::{ExportError, ExportResult};
use std::path::{Path, PathBuf};

/// 取配置中的 CSV 路径;缺失时给出带名字的配置错误
pub(crate) fn required_csv<'a>(
    path: &'a Option<PathBuf>,
    name: &str,
) -> ExportResult<&'a Path> {
    path.as_deref()
        .ok_or_else(|| ExportError::Config(format!("未配置 {} 文件路径", name)))
}
