// ==========================================
// 仿真/MES 工艺阶段导出桥 - 文件数据源实现
// ==========================================
// 布局: <dir>/<table>.json,每个文件是一个扁平对象数组
//       (上游分页抓取后拼接落盘的产物)
// ==========================================

use crate::error::{ExportError, ExportResult};
use crate::source::collection::{CollectionSource, RawRow, Table};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

// ==========================================
// JsonDirSource - 目录式 JSON 数据源
// ==========================================
pub struct JsonDirSource {
    dir: PathBuf,
}

impl JsonDirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn read_rows(&self, path: &Path) -> ExportResult<Vec<RawRow>> {
        let body = fs::read_to_string(path).map_err(|e| ExportError::SourceIo {
            path: path.display().to_string(),
            source: e,
        })?;

        // 响应体不是合法 JSON 即致命
        let value: Value =
            serde_json::from_str(&body).map_err(|e| ExportError::MalformedBody {
                path: path.display().to_string(),
                detail: e.to_string(),
            })?;

        match value {
            Value::Array(rows) => rows
                .into_iter()
                .map(|row| match row {
                    Value::Object(map) => Ok(map),
                    other => Err(ExportError::MalformedBody {
                        path: path.display().to_string(),
                        detail: format!("期望对象行,实际为 {}", other),
                    }),
                })
                .collect(),
            other => Err(ExportError::MalformedBody {
                path: path.display().to_string(),
                detail: format!("期望对象数组,实际为 {}", other),
            }),
        }
    }
}

impl CollectionSource for JsonDirSource {
    fn fetch_collection(&self, table: Table) -> ExportResult<Vec<RawRow>> {
        let path = self.dir.join(format!("{}.json", table.as_str()));
        let rows = self.read_rows(&path)?;
        debug!(table = table.as_str(), rows = rows.len(), "已读取集合");
        Ok(rows)
    }

    fn fetch_task_window(&self, horizon_hours: i64) -> ExportResult<Vec<RawRow>> {
        // 文件源持有整张任务表,窗口过滤在此完成
        let rows = self.fetch_collection(Table::SimulationOperationTask)?;
        let filtered: Vec<RawRow> = rows
            .into_iter()
            .filter(|row| {
                let start_time = row
                    .get("start_time")
                    .and_then(Value::as_f64)
                    .unwrap_or(0.0);
                let task_type = row.get("type").and_then(Value::as_i64).unwrap_or(0);
                start_time <= horizon_hours as f64 && task_type == 0
            })
            .collect();
        debug!(rows = filtered.len(), horizon_hours, "已读取任务窗口");
        Ok(filtered)
    }

    fn primary_session(&self) -> ExportResult<i64> {
        let path = self.dir.join("primary_simulation_session.json");
        let body = fs::read_to_string(&path).map_err(|e| ExportError::SourceIo {
            path: path.display().to_string(),
            source: e,
        })?;
        let value: Value =
            serde_json::from_str(&body).map_err(|e| ExportError::MalformedBody {
                path: path.display().to_string(),
                detail: e.to_string(),
            })?;
        value
            .get("data")
            .and_then(Value::as_i64)
            .ok_or_else(|| ExportError::MissingField {
                table: "primary_simulation_session",
                field: "data",
            })
    }
}
