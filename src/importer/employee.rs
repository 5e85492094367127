use crate::domain::record::IdentifiedRecord;
use crate::engine::exports::sort_by_identity;
use crate::error::{ExportError, ExportResult};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

// ==========================================
// 人员表导入
// ==========================================
// 文件列不固定,整行透传;identity 列必须存在(落盘文件名用)

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployeeRecord {
    #[serde(skip)]
    identity: String,
    #[serde(flatten)]
    fields: BTreeMap<String, String>,
}

impl IdentifiedRecord for EmployeeRecord {
    fn identity(&self) -> &str {
        &self.identity
    }
}

pub fn import_employees(path: &Path) -> ExportResult<Vec<EmployeeRecord>> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let fields: BTreeMap<String, String> = headers
            .iter()
            .zip(row.iter())
            .map(|(header, value)| (header.to_string(), value.to_string()))
            .collect();
        let identity = fields
            .get("identity")
            .cloned()
            .ok_or(ExportError::MissingField {
                table: "employee",
                field: "identity",
            })?;
        records.push(EmployeeRecord { identity, fields });
    }
    info!(count = records.len(), "人员表读取完成");
    sort_by_identity(&mut records);
    Ok(records)
}
