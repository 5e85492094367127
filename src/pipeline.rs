// ==========================================
// 仿真/MES 工艺阶段导出桥 - 运行流水线
// ==========================================
// 职责: 一次运行 = 建快照 → 建上下文 → 逐个导出 → 落盘
// 口径: 导出之间无依赖,顺序执行;任一导出的致命错误中止整次运行
// ==========================================

use crate::config::ExportConfig;
use crate::engine::context::RunContext;
use crate::engine::exports::{
    daily_task_report, labor_report, master_data, operation_report, phase_report, plan_report,
    wip_report,
};
use crate::engine::snapshot_merge::merge_with_snapshot;
use crate::error::{ExportError, ExportResult};
use crate::importer::{import_employees, import_erp_fact, import_erp_plan, required_csv};
use crate::output::{write_records, SnapshotStore};
use crate::source::{JsonDirSource, SourceSnapshot};
use chrono::NaiveDateTime;
use clap::ValueEnum;
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::{info, info_span};
use uuid::Uuid;

use crate::domain::types::PlanKind;

// ==========================================
// ExportKind - 导出类型
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExportKind {
    Entities,
    Departments,
    EquipmentClasses,
    Equipment,
    Specifications,
    Routes,
    Phases,
    PhaseCatalog,
    Operations,
    PhaseLabor,
    PlanLaunch,
    PlanFinish,
    DailyTasks,
    Wip,
    Inventory,
    PgWip,
    ErpPlan,
    ErpFact,
    Employees,
}

impl ExportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportKind::Entities => "entities",
            ExportKind::Departments => "departments",
            ExportKind::EquipmentClasses => "equipment-classes",
            ExportKind::Equipment => "equipment",
            ExportKind::Specifications => "specifications",
            ExportKind::Routes => "routes",
            ExportKind::Phases => "phases",
            ExportKind::PhaseCatalog => "phase-catalog",
            ExportKind::Operations => "operations",
            ExportKind::PhaseLabor => "phase-labor",
            ExportKind::PlanLaunch => "plan-launch",
            ExportKind::PlanFinish => "plan-finish",
            ExportKind::DailyTasks => "daily-tasks",
            ExportKind::Wip => "wip",
            ExportKind::Inventory => "inventory",
            ExportKind::PgWip => "pg-wip",
            ExportKind::ErpPlan => "erp-plan",
            ExportKind::ErpFact => "erp-fact",
            ExportKind::Employees => "employees",
        }
    }

    /// 配置文件中的类型名 → 类型
    pub fn from_name(name: &str) -> Option<Self> {
        Self::value_variants()
            .iter()
            .copied()
            .find(|kind| kind.as_str() == name)
    }

    /// 需要仿真任务数据的类型(会话号只对这些有意义)
    fn needs_session(&self) -> bool {
        matches!(
            self,
            ExportKind::PlanLaunch | ExportKind::PlanFinish | ExportKind::DailyTasks
        )
    }
}

// ==========================================
// RunSummary - 单次运行汇总
// ==========================================
#[derive(Debug)]
pub struct RunSummary {
    pub run_id: Uuid,
    /// 导出类型名 → 写出的记录数
    pub written: BTreeMap<&'static str, usize>,
}

/// 整次运行入口
pub fn run(
    config: &ExportConfig,
    kinds: &[ExportKind],
    now: NaiveDateTime,
) -> ExportResult<RunSummary> {
    let run_id = Uuid::new_v4();
    let span = info_span!("export_run", %run_id);
    let _guard = span.enter();

    if kinds.is_empty() {
        return Err(ExportError::Config(
            "没有要运行的导出类型(--export 或配置 exports 至少给一个)".to_string(),
        ));
    }

    let source = JsonDirSource::new(config.source_dir.clone());
    let snapshot = SourceSnapshot::new(Box::new(source));
    let ctx = RunContext::new(&snapshot, config, now);

    if kinds.iter().any(ExportKind::needs_session) {
        let session = match config.session {
            Some(session) => session,
            None => snapshot.primary_session()?,
        };
        info!(session, "使用仿真会话");
    }

    let mut written = BTreeMap::new();
    for kind in kinds {
        let count = run_one(&ctx, *kind)?;
        info!(export = kind.as_str(), count, "导出完成");
        written.insert(kind.as_str(), count);
    }

    if let Ok(phases) = ctx.phases() {
        let failures = phases.resolution_failures();
        if failures > 0 {
            info!(failures, "本次运行存在未解析阶段的工序");
        }
    }

    Ok(RunSummary { run_id, written })
}

fn run_one(ctx: &RunContext<'_>, kind: ExportKind) -> ExportResult<usize> {
    let config = ctx.config;
    let base = config.output_dir.as_path();
    let folder = config.folder_for(kind.as_str());

    match kind {
        ExportKind::Entities => write_records(&master_data::export_entities(ctx)?, base, folder),
        ExportKind::Departments => {
            write_records(&master_data::export_departments(ctx)?, base, folder)
        }
        ExportKind::EquipmentClasses => {
            write_records(&master_data::export_equipment_classes(ctx)?, base, folder)
        }
        ExportKind::Equipment => write_records(&master_data::export_equipment(ctx)?, base, folder),
        ExportKind::Specifications => {
            write_records(&master_data::export_specifications(ctx)?, base, folder)
        }
        ExportKind::Routes => write_records(&master_data::export_routes(ctx)?, base, folder),
        ExportKind::Phases => write_records(&phase_report::export_phases(ctx)?, base, folder),
        ExportKind::PhaseCatalog => {
            write_records(&phase_report::export_phase_catalog(ctx)?, base, folder)
        }
        ExportKind::Operations => {
            write_records(&operation_report::export_operations(ctx)?, base, folder)
        }
        ExportKind::PhaseLabor => {
            write_records(&labor_report::export_phase_labor(ctx)?, base, folder)
        }
        ExportKind::PlanLaunch => write_records(
            &plan_report::export_plan(ctx, PlanKind::Launch)?,
            base,
            folder,
        ),
        ExportKind::PlanFinish => write_records(
            &plan_report::export_plan(ctx, PlanKind::Finish)?,
            base,
            folder,
        ),
        ExportKind::DailyTasks => {
            let fresh = daily_task_report::export_daily_tasks(ctx)?;
            let store = SnapshotStore::new(config.snapshot_file.clone());
            let persisted = store.load()?;
            let merged = merge_with_snapshot(fresh, persisted, ctx.today());
            store.save(&merged)?;
            write_records(&merged, base, folder)
        }
        ExportKind::Wip => write_records(&wip_report::export_wip(ctx)?, base, folder),
        ExportKind::Inventory => write_records(&wip_report::export_inventory(ctx)?, base, folder),
        ExportKind::PgWip => write_records(&wip_report::export_pg_wip(ctx)?, base, folder),
        ExportKind::ErpPlan => {
            let path = required_csv(&config.erp_plan_csv, "ERP 计划")?;
            write_records(&import_erp_plan(path)?, base, folder)
        }
        ExportKind::ErpFact => {
            let path = required_csv(&config.erp_fact_csv, "ERP 实绩")?;
            write_records(&import_erp_fact(ctx, path)?, base, folder)
        }
        ExportKind::Employees => {
            let path = required_csv(&config.employee_csv, "人员表")?;
            write_records(&import_employees(path)?, base, folder)
        }
    }
}

/// 配置中的导出名列表 → 类型列表;未知名字即配置错误
pub fn kinds_from_names(names: &[String]) -> ExportResult<Vec<ExportKind>> {
    names
        .iter()
        .map(|name| {
            ExportKind::from_name(name)
                .ok_or_else(|| ExportError::Config(format!("未知的导出类型: {}", name)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names_round_trip() {
        for kind in ExportKind::value_variants() {
            assert_eq!(ExportKind::from_name(kind.as_str()), Some(*kind));
        }
    }

    #[test]
    fn test_unknown_kind_name_rejected() {
        let parsed = kinds_from_names(&["no-such-export".to_string()]);
        assert!(parsed.is_err());
    }
}
