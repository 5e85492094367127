use crate::domain::record::ErpPlanRecord;
use crate::engine::exports::sort_by_identity;
use crate::error::{ExportError, ExportResult};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

// ==========================================
// ERP 计划导入
// ==========================================
// 文件列: CODE / DATE_TO / AMOUNT;数量列允许为空(视为 0)

#[derive(Debug, Deserialize)]
struct ErpPlanRow {
    #[serde(rename = "CODE")]
    code: String,
    #[serde(rename = "DATE_TO")]
    date_to: String,
    #[serde(rename = "AMOUNT")]
    amount: String,
}

pub fn import_erp_plan(path: &Path) -> ExportResult<Vec<ErpPlanRecord>> {
    let mut reader = csv::Reader::from_path(path)?;

    let mut records = Vec::new();
    for row in reader.deserialize() {
        let row: ErpPlanRow = row?;
        let amount = row.amount.trim();
        let quantity = if amount.is_empty() {
            0
        } else {
            amount
                .parse::<i64>()
                .map_err(|e| ExportError::MalformedBody {
                    path: path.display().to_string(),
                    detail: format!("AMOUNT 列不是整数 ({}): {}", amount, e),
                })?
        };
        records.push(ErpPlanRecord {
            identity: format!("{}_{}", row.code, row.date_to),
            transition_identity: format!("{}_", row.code),
            date: row.date_to.replace('.', "-"),
            quantity_plan_erp: quantity,
        });
    }
    info!(count = records.len(), "ERP 计划文件读取完成");
    sort_by_identity(&mut records);
    Ok(records)
}
