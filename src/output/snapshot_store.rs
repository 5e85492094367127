use crate::domain::record::DailyTaskRecord;
use crate::domain::types::TimeSlot;
use crate::error::{ExportError, ExportResult};
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

// ==========================================
// 班次任务快照存储
// ==========================================
// 职责: 上次运行的班次任务集以 CSV 持久化,供跨运行合并
// 口径: 文件缺失等价于空快照(首次运行);
//       写入先落临时文件再原子改名,避免半写状态
// ==========================================

const COLUMNS: [&str; 7] = [
    "identity",
    "operationIdentity",
    "assemblyElementIdentity",
    "quantityPlan",
    "dateBegin",
    "timeBegin",
    "equipments",
];

pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// 读取持久化快照;文件不存在视为空集
    pub fn load(&self) -> ExportResult<Vec<DailyTaskRecord>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "快照文件不存在,按空快照处理");
            return Ok(Vec::new());
        }

        let mut reader = csv::Reader::from_path(&self.path)?;
        let headers = reader.headers()?.clone();
        let column = |name: &str| headers.iter().position(|h| h == name);
        let columns: Vec<usize> = COLUMNS
            .iter()
            .map(|name| {
                column(name).ok_or_else(|| ExportError::MalformedBody {
                    path: self.path.display().to_string(),
                    detail: format!("快照缺少列 {}", name),
                })
            })
            .collect::<ExportResult<_>>()?;

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            let cell = |i: usize| row.get(columns[i]).unwrap_or_default();

            let malformed = |detail: String| ExportError::MalformedBody {
                path: self.path.display().to_string(),
                detail,
            };
            let quantity_plan = cell(3)
                .parse::<i64>()
                .map_err(|e| malformed(format!("quantityPlan 列不是整数: {}", e)))?;
            let date_begin = NaiveDate::parse_from_str(cell(4), "%Y-%m-%d")
                .map_err(|e| malformed(format!("dateBegin 列不是日期: {}", e)))?;
            let time_begin = TimeSlot::parse(cell(5))
                .ok_or_else(|| malformed(format!("timeBegin 列取值非法: {:?}", cell(5))))?;
            let equipments = match cell(6) {
                "" => None,
                raw => serde_json::from_str(raw)
                    .map_err(|e| malformed(format!("equipments 列不是合法 JSON: {}", e)))?,
            };

            records.push(DailyTaskRecord {
                identity: cell(0).to_string(),
                operation_identity: cell(1).to_string(),
                assembly_element_identity: cell(2).to_string(),
                quantity_plan,
                date_begin,
                time_begin,
                equipments,
            });
        }
        info!(count = records.len(), path = %self.path.display(), "快照读取完成");
        Ok(records)
    }

    /// 全量覆盖写入
    pub fn save(&self, records: &[DailyTaskRecord]) -> ExportResult<()> {
        let tmp = self.path.with_extension("tmp");
        {
            let mut writer = csv::Writer::from_path(&tmp)?;
            writer.write_record(COLUMNS)?;
            for record in records {
                let equipments = match &record.equipments {
                    Some(list) => serde_json::to_string(list).map_err(|e| {
                        ExportError::MalformedBody {
                            path: tmp.display().to_string(),
                            detail: e.to_string(),
                        }
                    })?,
                    None => String::new(),
                };
                writer.write_record([
                    record.identity.as_str(),
                    record.operation_identity.as_str(),
                    record.assembly_element_identity.as_str(),
                    &record.quantity_plan.to_string(),
                    &record.date_begin.format("%Y-%m-%d").to_string(),
                    record.time_begin.as_str(),
                    &equipments,
                ])?;
            }
            writer.flush()?;
        }
        fs::rename(&tmp, &self.path)?;
        info!(count = records.len(), path = %self.path.display(), "快照写入完成");
        Ok(())
    }
}
