use crate::domain::record::ErpFactRecord;
use crate::domain::reference::Operation;
use crate::domain::types::{char_prefix, char_skip};
use crate::engine::aggregator::Accumulator;
use crate::engine::context::RunContext;
use crate::engine::exports::sort_by_identity;
use crate::engine::reference_index::RefIndex;
use crate::error::ExportResult;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

// ==========================================
// ERP 实绩导入
// ==========================================
// 文件列: CODE / DATE / AMOUNT
// 口径: 只保留 CODE 与对应路线组末道工序匹配的行,
//       按 (阶段码 × 日期) 累计数量

#[derive(Debug, Deserialize)]
struct ErpFactRow {
    #[serde(rename = "CODE")]
    code: String,
    #[serde(rename = "DATE")]
    date: String,
    #[serde(rename = "AMOUNT")]
    amount: f64,
}

pub fn import_erp_fact(ctx: &RunContext<'_>, path: &Path) -> ExportResult<Vec<ErpFactRecord>> {
    let operations = ctx.snapshot.operations()?;
    let routes = ctx.snapshot.routes()?;
    let route_index = RefIndex::build("entity_route", routes, |r| r.id);
    let prefix_len = ctx.config.phase_name_length;

    // 工序按 (路线, nop) 排序后归入路线组,组内再按 nop 排
    let mut ordered: Vec<&Operation> = operations.iter().collect();
    ordered.sort_by(|a, b| {
        (a.entity_route_id, a.nop.as_str()).cmp(&(b.entity_route_id, b.nop.as_str()))
    });

    let mut groups: HashMap<String, Vec<&Operation>> = HashMap::new();
    for operation in ordered {
        let route = route_index.require(operation.entity_route_id)?;
        let group_key = format!(
            "{}_{}",
            char_prefix(&operation.identity, prefix_len),
            char_skip(&route.identity, prefix_len + 1)
        );
        groups.entry(group_key).or_default().push(operation);
    }
    for group in groups.values_mut() {
        group.sort_by(|a, b| a.nop.cmp(&b.nop));
    }

    let mut reader = csv::Reader::from_path(path)?;
    let mut totals: Accumulator<String, f64> = Accumulator::new();
    for row in reader.deserialize() {
        let row: ErpFactRow = row?;
        let code_prefix = char_prefix(&row.code, prefix_len + 1);
        let last = match groups.get(code_prefix).and_then(|group| group.last()) {
            Some(last) => last,
            None => continue,
        };
        // 完整 CODE 必须与末道工序的标识前段一致
        if row.code != char_prefix(&last.identity, prefix_len + 10) {
            continue;
        }
        totals.add(
            format!("{}|{}", code_prefix, row.date.replace('.', "-")),
            row.amount,
        );
    }

    let mut records: Vec<ErpFactRecord> = totals
        .into_buckets()
        .into_iter()
        .map(|(key, amount)| {
            let (code, date) = key.split_once('|').unwrap_or((key.as_str(), ""));
            ErpFactRecord {
                transition_identity: code.to_string(),
                date: date.to_string(),
                identity: key.clone(),
                quantity_actual: amount,
            }
        })
        .collect();
    info!(count = records.len(), "ERP 实绩文件读取完成");
    sort_by_identity(&mut records);
    Ok(records)
}
