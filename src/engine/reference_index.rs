// ==========================================
// 仿真/MES 工艺阶段导出桥 - 参照索引
// ==========================================
// 职责: 把集合行构建为按主键的查找结构(叶子组件,无依赖)
// 口径: 重复键后者覆盖前者(上游以源序保证唯一);
//       查不到返回 None,require 变体升级为致命的参照不一致错误
// ==========================================

use crate::error::{ExportError, ExportResult};
use std::collections::HashMap;

// ==========================================
// RefIndex - 按 id 的参照索引
// ==========================================
pub struct RefIndex<'a, T> {
    table: &'static str,
    map: HashMap<i64, &'a T>,
}

impl<'a, T> RefIndex<'a, T> {
    /// 构建索引
    ///
    /// # 参数
    /// - `table`: 表名,仅用于错误诊断
    /// - `rows`: 集合行(源序)
    /// - `key`: 主键提取器
    pub fn build(table: &'static str, rows: &'a [T], key: impl Fn(&T) -> i64) -> Self {
        let mut map = HashMap::with_capacity(rows.len());
        for row in rows {
            // 重复键: 后者覆盖
            map.insert(key(row), row);
        }
        Self { table, map }
    }

    /// 容忍缺失的查找
    pub fn get(&self, id: i64) -> Option<&'a T> {
        self.map.get(&id).copied()
    }

    /// 不容忍缺失的查找: 查不到说明参照数据不一致,致命
    pub fn require(&self, id: i64) -> ExportResult<&'a T> {
        self.map.get(&id).copied().ok_or(ExportError::MissingReference {
            table: self.table,
            key: id.to_string(),
        })
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
