// ==========================================
// 引擎间集成测试
// ==========================================
// 职责: 验证阶段解析 → 路线推导 → 各类导出在
//       标准数据集上的协作结果
// ==========================================

mod helpers;

use chrono::NaiveDate;
use helpers::{fixture_now, test_config, write_standard_fixture};
use mes_phase_export::domain::types::PlanKind;
use mes_phase_export::engine::exports::{
    daily_task_report, labor_report, master_data, operation_report, phase_report, plan_report,
    wip_report,
};
use mes_phase_export::engine::RunContext;
use mes_phase_export::source::{JsonDirSource, SourceSnapshot};
use mes_phase_export::ExportConfig;
use tempfile::TempDir;

struct Fixture {
    _source: TempDir,
    _output: TempDir,
    snapshot: SourceSnapshot,
    config: ExportConfig,
}

fn create_fixture() -> Fixture {
    mes_phase_export::logging::init_test();
    let source = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write_standard_fixture(source.path());
    let config = test_config(source.path(), output.path());
    let snapshot = SourceSnapshot::new(Box::new(JsonDirSource::new(source.path())));
    Fixture {
        snapshot,
        config,
        _source: source,
        _output: output,
    }
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 9, d).unwrap()
}

// ==========================================
// 阶段解析与主路线
// ==========================================

#[test]
fn test_phase_resolution_over_fixture() {
    let fx = create_fixture();
    let ctx = RunContext::new(&fx.snapshot, &fx.config, fixture_now());

    let phases = ctx.phases().unwrap();
    assert_eq!(phases.get(1001), Some("PH-A"));
    assert_eq!(phases.get(1003), Some("PH-B"));
    assert_eq!(phases.get(2000), Some("PHC"));
    // 带括号的无阶段工序: 静默跳过,不计失败
    assert_eq!(phases.get(1004), None);
    assert_eq!(phases.resolution_failures(), 0);

    // 主路线末道工序(nop 字典序最后一条)的阶段
    let main_routes = ctx.main_routes().unwrap();
    assert_eq!(main_routes.last_phase(2, phases), Some("PHC"));
    assert!(main_routes.has_main_route(1));
}

// ==========================================
// 阶段清单与阶段目录
// ==========================================

#[test]
fn test_export_phases_department_chain() {
    let fx = create_fixture();
    let ctx = RunContext::new(&fx.snapshot, &fx.config, fixture_now());

    let records = phase_report::export_phases(&ctx).unwrap();
    let identities: Vec<&str> = records.iter().map(|r| r.identity.as_str()).collect();
    assert_eq!(identities, vec!["PH-A", "PH-B", "PHC"]);

    let ph_a = &records[0];
    assert_eq!(ph_a.incoming_department_identity, None);
    assert_eq!(ph_a.processing_department_identity.as_deref(), Some("01100"));
    assert_eq!(ph_a.outgoing_department_identity.as_deref(), Some("01200"));
    assert_eq!(ph_a.assembly_element_identity, "DET-001");

    let ph_b = &records[1];
    assert_eq!(ph_b.incoming_department_identity.as_deref(), Some("01100"));
    assert_eq!(ph_b.processing_department_identity.as_deref(), Some("01200"));
    assert_eq!(ph_b.outgoing_department_identity, None);

    let phc = &records[2];
    assert_eq!(phc.incoming_department_identity, None);
    assert_eq!(phc.processing_department_identity.as_deref(), Some("01200"));
    assert_eq!(phc.assembly_element_identity, "DET-002");
}

#[test]
fn test_export_phase_catalog_with_companion_row() {
    let fx = create_fixture();
    let ctx = RunContext::new(&fx.snapshot, &fx.config, fixture_now());

    let records = phase_report::export_phase_catalog(&ctx).unwrap();
    let identities: Vec<&str> = records.iter().map(|r| r.identity.as_str()).collect();
    // PHC 不含 "-",因此带一条 _VPSK 伴随行
    assert_eq!(identities, vec!["PH-A", "PH-B", "PHC", "PHC_VPSK"]);

    let by_identity = |id: &str| records.iter().find(|r| r.identity == id).unwrap();
    assert_eq!(by_identity("PH-A").priority, 1);
    assert_eq!(by_identity("PH-A").department_identity, "01100");
    assert_eq!(by_identity("PH-B").priority, 2);
    assert_eq!(by_identity("PHC").priority, 1);
    assert_eq!(by_identity("PHC").technological_process_identity, "DET-002_R");
    assert_eq!(by_identity("PHC_VPSK").priority, 999);
    assert_eq!(by_identity("PHC_VPSK").name, "PHC_VPSK");
}

// ==========================================
// 工序报表
// ==========================================

#[test]
fn test_export_operations_filters_and_priorities() {
    let fx = create_fixture();
    let ctx = RunContext::new(&fx.snapshot, &fx.config, fixture_now());

    let records = operation_report::export_operations(&ctx).unwrap();
    let identities: Vec<&str> = records.iter().map(|r| r.identity.as_str()).collect();
    // 010_1/020_1(准备步)与 OP-Eн(调整标记)被过滤;
    // 无阶段的 OP-PRE(test) 占掉路线 10 的首个优先级后被跳过
    assert_eq!(identities, vec!["PH-A_2", "PH-B_2", "PHC_2"]);

    let ph_a = &records[0];
    assert_eq!(ph_a.priority, 2);
    assert_eq!(ph_a.number, "010_2");
    assert_eq!(ph_a.piece_time, 2.0);
    assert_eq!(ph_a.department_identity, "01100");
    assert_eq!(ph_a.work_center_identity, "WC-01");
    assert_eq!(ph_a.technological_process_identity, "DET-001_R");
    assert_eq!(ph_a.assembly_element_identity, "DET-001");

    assert_eq!(records[1].priority, 3);
    assert_eq!(records[2].priority, 1);
}

// ==========================================
// 阶段工时
// ==========================================

#[test]
fn test_export_phase_labor_excludes_inspection_professions() {
    let fx = create_fixture();
    let ctx = RunContext::new(&fx.snapshot, &fx.config, fixture_now());

    let records = labor_report::export_phase_labor(&ctx).unwrap();
    let by_phase = |phase: &str| {
        records
            .iter()
            .find(|r| r.transition_identity == phase)
            .unwrap()
    };
    // PH-A: 7200 秒 × 定员 2(ОТК 的 1.0 不计) = 4.0 小时
    assert_eq!(by_phase("PH-A").total_time, 4.0);
    assert_eq!(by_phase("PH-B").total_time, 1.0);
    assert_eq!(by_phase("PHC").total_time, 1.0);
    assert_eq!(by_phase("PH-A").identity, "PH-A_2026-09-02");
    assert_eq!(by_phase("PH-A").date, day(2));
}

// ==========================================
// 投产/产出计划
// ==========================================

#[test]
fn test_export_plan_launch_uses_first_operation_of_phase() {
    let fx = create_fixture();
    let ctx = RunContext::new(&fx.snapshot, &fx.config, fixture_now());

    let records = plan_report::export_plan(&ctx, PlanKind::Launch).unwrap();
    // 只有 PHC 的任务落在其阶段首道工序上
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].identity, "2026-09-03_PHC");
    assert_eq!(records[0].quantity, 7);
    assert_eq!(records[0].date, day(3));
}

#[test]
fn test_export_plan_finish_clamps_past_dates_to_today() {
    let fx = create_fixture();
    let ctx = RunContext::new(&fx.snapshot, &fx.config, fixture_now());

    let records = plan_report::export_plan(&ctx, PlanKind::Finish).unwrap();
    let by_identity = |id: &str| records.iter().find(|r| r.identity == id).unwrap();

    // PH-A: 两个半程任务各 6 件,完工都落在今天
    assert_eq!(by_identity("2026-09-02_PH-A").quantity, 12);
    // PH-B: 昨天完工的任务钳到今天
    assert_eq!(by_identity("2026-09-02_PH-B").quantity, 4);
    assert_eq!(by_identity("2026-09-03_PHC").quantity, 7);
    assert_eq!(records.len(), 3);
}

// ==========================================
// 班次任务
// ==========================================

#[test]
fn test_export_daily_tasks_buckets_and_equipment() {
    let fx = create_fixture();
    let ctx = RunContext::new(&fx.snapshot, &fx.config, fixture_now());

    let records = daily_task_report::export_daily_tasks(&ctx).unwrap();
    let identities: Vec<&str> = records.iter().map(|r| r.identity.as_str()).collect();
    // 昨天开工的任务整行丢弃
    assert_eq!(
        identities,
        vec![
            "2026-09-02_07:00:00_PH-A_2",
            "2026-09-02_19:00:00_PH-A_2",
            "2026-09-03_07:00:00_PHC_2",
        ]
    );

    let morning = &records[0];
    assert_eq!(morning.operation_identity, "PH-A_2");
    assert_eq!(morning.assembly_element_identity, "DET-001");
    assert_eq!(morning.quantity_plan, 6);
    let equipments = morning.equipments.as_ref().unwrap();
    assert_eq!(equipments.len(), 1);
    assert_eq!(equipments[0].identity, "EQ-100");
    assert_eq!(equipments[0].quantity, 6);

    // 晚班任务的仿真设备没有物理设备链接
    let evening = &records[1];
    assert_eq!(evening.quantity_plan, 6);
    assert_eq!(evening.equipments.as_deref(), Some(&[][..]));

    let phc = &records[2];
    assert_eq!(phc.quantity_plan, 7);
    assert_eq!(phc.assembly_element_identity, "DET-002");
}

#[test]
fn test_export_daily_tasks_respects_department_filters() {
    let fx = create_fixture();
    let mut config = fx.config.clone();
    config.skip_departments = Some(vec!["01100".to_string()]);
    let ctx = RunContext::new(&fx.snapshot, &config, fixture_now());

    let records = daily_task_report::export_daily_tasks(&ctx).unwrap();
    // 01100 的 PH-A 任务被跳过,只剩 PHC
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].operation_identity, "PHC_2");

    let mut config = fx.config.clone();
    config.only_departments = Some(vec!["01100".to_string()]);
    let ctx = RunContext::new(&fx.snapshot, &config, fixture_now());
    let records = daily_task_report::export_daily_tasks(&ctx).unwrap();
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r.operation_identity == "PH-A_2"));
}

// ==========================================
// 在制品
// ==========================================

#[test]
fn test_export_wip_aggregates_batches_by_phase() {
    let fx = create_fixture();
    let ctx = RunContext::new(&fx.snapshot, &fx.config, fixture_now());

    let records = wip_report::export_wip(&ctx).unwrap();
    let by_phase = |phase: &str| {
        records
            .iter()
            .find(|r| r.transition_identity == phase)
            .unwrap()
    };
    // PH-A: 10.4 + 2.0 → 12;完成率 0 的批次不计
    assert_eq!(by_phase("PH-A").quantity, 12);
    // 已完工批次回落到主路线末道工序的阶段
    assert_eq!(by_phase("PHC").quantity, 5);
    assert_eq!(by_phase("PHC").department_identity, "1200");
    assert_eq!(by_phase("PH-A").department_identity, "2904");
    assert_eq!(by_phase("PH-A").date_time, "2026-09-02T10:00:00");
    assert_eq!(by_phase("PH-A").identity, "2026-09-02T10:00:00_PH-A");
    assert_eq!(records.len(), 2);
}

#[test]
fn test_export_inventory_falls_back_to_default_department() {
    let fx = create_fixture();
    let ctx = RunContext::new(&fx.snapshot, &fx.config, fixture_now());

    let records = wip_report::export_inventory(&ctx).unwrap();
    let identities: Vec<&str> = records.iter().map(|r| r.identity.as_str()).collect();
    // 无工序的完工批次没有部门参照,记入兜底部门 02904
    assert_eq!(identities, vec!["PH-A|01100|DET-001", "PHC|02904|DET-002"]);
    assert!((records[0].quantity_assembly_element - 12.4).abs() < 1e-9);
    assert_eq!(records[1].department_identity, "02904");
    assert_eq!(records[1].assembly_element_identity, "DET-002");
}

#[test]
fn test_export_pg_wip_skips_batch_snapshots() {
    let fx = create_fixture();
    let ctx = RunContext::new(&fx.snapshot, &fx.config, fixture_now());

    let records = wip_report::export_pg_wip(&ctx).unwrap();
    let by_phase = |phase: &str| {
        records
            .iter()
            .find(|r| r.transition_identity == phase)
            .unwrap()
    };
    // 快照批次(entity_batch_snapshot_id 非空)不计
    assert_eq!(by_phase("PH-A").quantity, 10);
    assert_eq!(by_phase("PH-A").warehouse, "1100");
    assert_eq!(by_phase("PH-A").identity, "2026-09-02_PH-A");
    assert_eq!(by_phase("PH-A").date, day(2));
    assert_eq!(by_phase("PHC").quantity, 5);
}

// ==========================================
// 主数据
// ==========================================

#[test]
fn test_export_master_data() {
    let fx = create_fixture();
    let ctx = RunContext::new(&fx.snapshot, &fx.config, fixture_now());

    let entities = master_data::export_entities(&ctx).unwrap();
    assert_eq!(entities.len(), 2);
    assert_eq!(entities[0].identity, "DET-001");
    assert_eq!(entities[0].vendor_code, "DET-001");

    // identity 为空/缺失的设备行跳过
    let equipment = master_data::export_equipment(&ctx).unwrap();
    let identities: Vec<&str> = equipment.iter().map(|r| r.identity.as_str()).collect();
    assert_eq!(identities, vec!["EQ-100", "EQ-300"]);
    assert_eq!(equipment[0].work_center_identity, "WC-01");
    assert_eq!(equipment[1].department_identity, "01200");

    let specs = master_data::export_specifications(&ctx).unwrap();
    assert_eq!(specs.len(), 1);
    assert_eq!(specs[0].identity, "DET-001");
    assert_eq!(specs[0].items.len(), 1);
    assert_eq!(specs[0].items[0].assembly_element_identity, "DET-002");
    assert_eq!(specs[0].items[0].quantity_assembly_element, 2.5);

    let routes = master_data::export_routes(&ctx).unwrap();
    assert_eq!(routes.len(), 2);
    assert_eq!(routes[0].assembly_element_identity, "DET-001");
}
