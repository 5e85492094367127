// ==========================================
// 仿真/MES 工艺阶段导出桥 - 运行上下文
// ==========================================
// 职责: 持有本次运行的取数快照与按需计算的派生结构
// 口径: 每个派生结构一个显式类型字段,惰性计算、全程只算一次
//       (取代按字符串标签的全局缓存字典)
// ==========================================

use crate::config::ExportConfig;
use crate::engine::phase_resolver::{MainRouteIndex, PhaseMap};
use crate::engine::reference_index::RefIndex;
use crate::engine::route_walker::RouteStepIndex;
use crate::error::ExportResult;
use crate::source::SourceSnapshot;
use chrono::{NaiveDate, NaiveDateTime};
use std::cell::OnceCell;

// ==========================================
// RunContext - 单次运行的上下文
// ==========================================
pub struct RunContext<'a> {
    pub snapshot: &'a SourceSnapshot,
    pub config: &'a ExportConfig,
    /// 本次运行的挂钟时刻(厂区本地)
    pub now: NaiveDateTime,
    phases: OnceCell<PhaseMap>,
    route_steps: OnceCell<RouteStepIndex>,
    main_routes: OnceCell<MainRouteIndex>,
}

impl<'a> RunContext<'a> {
    pub fn new(snapshot: &'a SourceSnapshot, config: &'a ExportConfig, now: NaiveDateTime) -> Self {
        Self {
            snapshot,
            config,
            now,
            phases: OnceCell::new(),
            route_steps: OnceCell::new(),
            main_routes: OnceCell::new(),
        }
    }

    /// 本次运行的日历日期
    pub fn today(&self) -> NaiveDate {
        self.now.date()
    }

    /// 工序→阶段 解析结果(算过即缓存)
    pub fn phases(&self) -> ExportResult<&PhaseMap> {
        if let Some(phases) = self.phases.get() {
            return Ok(phases);
        }
        let resolved = PhaseMap::resolve_all(
            self.snapshot.operations()?,
            self.snapshot.route_phases()?,
        )?;
        Ok(self.phases.get_or_init(|| resolved))
    }

    /// 路线部门序列(算过即缓存)
    pub fn route_steps(&self) -> ExportResult<&RouteStepIndex> {
        if let Some(steps) = self.route_steps.get() {
            return Ok(steps);
        }
        let departments = self.snapshot.departments()?;
        let dept_index = RefIndex::build("department", departments, |d| d.id);
        let built = RouteStepIndex::build(self.snapshot.operations()?, self.phases()?, &dept_index)?;
        Ok(self.route_steps.get_or_init(|| built))
    }

    /// 主路线索引(算过即缓存)
    pub fn main_routes(&self) -> ExportResult<&MainRouteIndex> {
        if let Some(index) = self.main_routes.get() {
            return Ok(index);
        }
        let built = MainRouteIndex::build(self.snapshot.routes()?, self.snapshot.operations()?);
        Ok(self.main_routes.get_or_init(|| built))
    }
}
