// ==========================================
// 仿真/MES 工艺阶段导出桥 - 快照合并引擎
// ==========================================
// 职责: 新算出的记录集与上一次持久化快照的对账
// 口径: 新记录原样保留;旧记录若键已消失且日期不早于今天,
//       数量清零、设备清单置空后带入(报零而不是悄悄丢弃);
//       早于今天的旧记录整条丢弃
// ==========================================

use crate::domain::record::DailyTaskRecord;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// 合并新旧记录集,产出替换快照的完整集合(按 identity 排序)
///
/// # 参数
/// - `fresh`: 本次运行聚合出的记录
/// - `persisted`: 上一次运行落盘的记录(文件缺失时传空集)
/// - `today`: 本次运行的日历日期
pub fn merge_with_snapshot(
    fresh: Vec<DailyTaskRecord>,
    persisted: Vec<DailyTaskRecord>,
    today: NaiveDate,
) -> Vec<DailyTaskRecord> {
    // BTreeMap 顺带给出稳定的输出顺序
    let mut merged: BTreeMap<String, DailyTaskRecord> = fresh
        .into_iter()
        .map(|record| (record.identity.clone(), record))
        .collect();

    for mut record in persisted {
        if record.date_begin < today {
            continue;
        }
        if merged.contains_key(&record.identity) {
            continue;
        }
        // 曾有计划但本次无数据: 报零带入
        record.quantity_plan = 0;
        record.equipments = None;
        merged.insert(record.identity.clone(), record);
    }

    merged.into_values().collect()
}
