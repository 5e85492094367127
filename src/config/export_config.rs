use crate::error::{ExportError, ExportResult};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

// ==========================================
// ExportConfig - 业务配置
// ==========================================
// 来源: JSON 配置文件;查找顺序为显式路径 → 工作目录
//       config.json → 用户配置目录
// ==========================================

const CONFIG_FILE_NAME: &str = "config.json";
const CONFIG_DIR_NAME: &str = "mes-phase-export";

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExportConfig {
    /// 取数目录(每个集合一个 JSON 文件)
    pub source_dir: PathBuf,
    /// 输出根目录
    pub output_dir: PathBuf,
    /// 导出类型 → 子目录名;未配置的类型用类型名本身
    #[serde(default)]
    pub folders: BTreeMap<String, String>,
    /// 不带 --export 时要运行的导出类型(kebab-case 名)
    #[serde(default)]
    pub exports: Vec<String>,

    // ===== 标识切分与聚合口径 =====
    #[serde(default = "default_phase_name_length")]
    pub phase_name_length: usize,
    #[serde(default)]
    pub short_phase_name_length: usize,
    /// 班次任务取数时窗(小时)
    #[serde(default = "default_daily_task_period")]
    pub daily_task_period: i64,
    /// 库存导出的兜底部门码
    #[serde(default = "default_fallback_department")]
    pub fallback_department: String,

    // ===== 运行期选项 =====
    /// 指定仿真会话;缺省用数据源标记的主会话
    #[serde(default)]
    pub session: Option<i64>,
    #[serde(default)]
    pub skip_departments: Option<Vec<String>>,
    #[serde(default)]
    pub only_departments: Option<Vec<String>>,

    // ===== 文件路径 =====
    /// 班次任务跨运行快照
    #[serde(default = "default_snapshot_file")]
    pub snapshot_file: PathBuf,
    #[serde(default)]
    pub erp_plan_csv: Option<PathBuf>,
    #[serde(default)]
    pub erp_fact_csv: Option<PathBuf>,
    #[serde(default)]
    pub employee_csv: Option<PathBuf>,
}

fn default_phase_name_length() -> usize {
    12
}

fn default_daily_task_period() -> i64 {
    720
}

fn default_fallback_department() -> String {
    "02904".to_string()
}

fn default_snapshot_file() -> PathBuf {
    PathBuf::from("tasks.csv.bak")
}

impl ExportConfig {
    /// 按查找顺序定位并加载配置文件
    pub fn load(explicit: Option<&Path>) -> ExportResult<Self> {
        let path = Self::locate(explicit)?;
        debug!(path = %path.display(), "加载配置文件");
        Self::from_file(&path)
    }

    pub fn from_file(path: &Path) -> ExportResult<Self> {
        let raw = fs::read_to_string(path).map_err(|e| ExportError::SourceIo {
            path: path.display().to_string(),
            source: e,
        })?;
        serde_json::from_str(&raw).map_err(|e| {
            ExportError::Config(format!("配置文件 {} 解析失败: {}", path.display(), e))
        })
    }

    fn locate(explicit: Option<&Path>) -> ExportResult<PathBuf> {
        if let Some(path) = explicit {
            return Ok(path.to_path_buf());
        }
        let local = PathBuf::from(CONFIG_FILE_NAME);
        if local.exists() {
            return Ok(local);
        }
        if let Some(base) = dirs::config_dir() {
            let user = base.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME);
            if user.exists() {
                return Ok(user);
            }
        }
        Err(ExportError::Config(format!(
            "找不到配置文件: 工作目录与用户配置目录下均无 {}",
            CONFIG_FILE_NAME
        )))
    }

    /// 某导出类型的输出子目录名
    pub fn folder_for<'a>(&'a self, export_name: &'a str) -> &'a str {
        self.folders
            .get(export_name)
            .map(String::as_str)
            .unwrap_or(export_name)
    }
}
