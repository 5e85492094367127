// ==========================================
// 仿真/MES 工艺阶段导出桥 - 领域类型定义
// ==========================================
// 口径: 班次时段只有两个固定值(07:00 / 19:00),
//       按来源时间戳的小时数离散化
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 班次时段 (Time Slot)
// ==========================================
// 红线: 只有两个取值,跨边界编码必须精确复现
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TimeSlot {
    #[serde(rename = "07:00:00")]
    Morning, // 早班,07:00 起
    #[serde(rename = "19:00:00")]
    Evening, // 晚班,19:00 起
}

impl TimeSlot {
    /// 按小时数离散化: hour >= 12 归入晚班,否则早班
    pub fn from_hour(hour: u32) -> Self {
        if hour >= 12 {
            TimeSlot::Evening
        } else {
            TimeSlot::Morning
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeSlot::Morning => "07:00:00",
            TimeSlot::Evening => "19:00:00",
        }
    }

    /// 从快照文件中的字符串还原
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "07:00:00" => Some(TimeSlot::Morning),
            "19:00:00" => Some(TimeSlot::Evening),
            _ => None,
        }
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ==========================================
// 计划类型 (Plan Kind)
// ==========================================
// 投产计划取每个阶段工序列表的第一道工序,
// 产出计划取最后一道;数量列名随类型变化
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlanKind {
    Launch, // 投产计划
    Finish, // 产出计划
}

impl PlanKind {
    /// 输出记录中的数量列名
    pub fn quantity_column(&self) -> &'static str {
        match self {
            PlanKind::Launch => "quantityLaunch",
            PlanKind::Finish => "quantityPlanBFG",
        }
    }
}

// ==========================================
// 字符级切片辅助
// ==========================================
// 标识串可能含西里尔字符,切片必须按字符而非字节

/// 前 n 个字符
pub fn char_prefix(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// 后 n 个字符
pub fn char_suffix(s: &str, n: usize) -> &str {
    let len = s.chars().count();
    if n >= len {
        return s;
    }
    match s.char_indices().nth(len - n) {
        Some((idx, _)) => &s[idx..],
        None => s,
    }
}

/// 从第 n 个字符起的剩余部分
pub fn char_skip(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[idx..],
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_slot_from_hour() {
        assert_eq!(TimeSlot::from_hour(0), TimeSlot::Morning);
        assert_eq!(TimeSlot::from_hour(11), TimeSlot::Morning);
        assert_eq!(TimeSlot::from_hour(12), TimeSlot::Evening);
        assert_eq!(TimeSlot::from_hour(23), TimeSlot::Evening);
    }

    #[test]
    fn test_char_slices_with_cyrillic() {
        assert_eq!(char_prefix("операция", 4), "опер");
        assert_eq!(char_suffix("10МН", 2), "МН");
        assert_eq!(char_suffix("ab", 5), "ab");
        assert_eq!(char_skip("опер", 2), "ер");
        assert_eq!(char_skip("аб", 5), "");
    }
}
