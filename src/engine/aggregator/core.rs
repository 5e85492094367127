use crate::domain::types::TimeSlot;
use crate::error::{ExportError, ExportResult};
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};
use std::collections::HashMap;
use std::hash::Hash;
use std::ops::AddAssign;

// 仿真时间戳带时区后缀,小数秒可缺省
const TASK_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%z";
// 厂区本地时间相对来源时间戳的固定偏移
const PLANT_OFFSET_HOURS: i64 = 3;

// ==========================================
// 数值口径
// ==========================================

/// 秒 → 小时,保留 4 位小数
pub fn seconds_to_hours(seconds: f64) -> f64 {
    (seconds / 3600.0 * 10000.0).round() / 10000.0
}

/// 完成率取整差: floor(amount·stop) − floor(amount·start)
///
/// stop 缺省为 1,start 缺省为 0;缺省下退化为 floor(amount)
pub fn floor_delta(amount: f64, start: Option<f64>, stop: Option<f64>) -> i64 {
    let stop = stop.unwrap_or(1.0);
    let start = start.unwrap_or(0.0);
    (amount * stop).floor() as i64 - (amount * start).floor() as i64
}

/// 解析仿真任务时间戳并折算为厂区本地的 naive 时间
pub fn parse_task_timestamp(raw: &str) -> ExportResult<NaiveDateTime> {
    let parsed = DateTime::parse_from_str(raw, TASK_TIMESTAMP_FORMAT)
        .map_err(|_| ExportError::Timestamp { raw: raw.to_string() })?;
    Ok((parsed - Duration::hours(PLANT_OFFSET_HOURS)).naive_local())
}

// ==========================================
// 复合分桶键
// ==========================================
// 扁平的复合键取代逐层默认字典,迭代与测试都直接

/// 计划分桶: 阶段 × 日期
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlanKey {
    pub phase: String,
    pub date: NaiveDate,
}

/// 班次任务分桶: 工序 × 日期 × 时段
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaskKey {
    pub operation: String,
    pub date: NaiveDate,
    pub slot: TimeSlot,
}

/// 班次任务设备子分桶
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaskEquipmentKey {
    pub operation: String,
    pub date: NaiveDate,
    pub slot: TimeSlot,
    pub equipment: String,
}

/// 库存分桶: 阶段 × 部门 × 产品
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InventoryKey {
    pub phase: String,
    pub department: String,
    pub entity: String,
}

// ==========================================
// Accumulator - 加法累计器
// ==========================================
pub struct Accumulator<K, V> {
    buckets: HashMap<K, V>,
}

impl<K: Eq + Hash, V: Default + Copy + AddAssign> Accumulator<K, V> {
    pub fn new() -> Self {
        Self {
            buckets: HashMap::new(),
        }
    }

    /// 向分桶累加;不存在的分桶从加法单位元起步
    pub fn add(&mut self, key: K, value: V) {
        *self.buckets.entry(key).or_default() += value;
    }

    pub fn get(&self, key: &K) -> V {
        self.buckets.get(key).copied().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.buckets.iter()
    }

    pub fn into_buckets(self) -> HashMap<K, V> {
        self.buckets
    }
}

impl<K: Eq + Hash, V: Default + Copy + AddAssign> Default for Accumulator<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
