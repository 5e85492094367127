// ==========================================
// 集成测试辅助
// ==========================================
// 职责: 标准小厂数据集(两条路线/三个阶段/四个批次)的
//       JSON 文件夹 fixture 与测试配置
// ==========================================

use chrono::{NaiveDate, NaiveDateTime};
use mes_phase_export::ExportConfig;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;

/// 固定的"运行时刻": 2026-09-02 10:00 本地
pub fn fixture_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 9, 2)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap()
}

pub fn write_table(dir: &Path, table: &str, rows: Value) {
    fs::write(dir.join(format!("{}.json", table)), rows.to_string()).unwrap();
}

/// 最小可用配置,指向给定的取数/输出目录
pub fn test_config(source_dir: &Path, output_dir: &Path) -> ExportConfig {
    serde_json::from_value(json!({
        "source_dir": source_dir,
        "output_dir": output_dir,
    }))
    .unwrap()
}

/// 标准数据集
///
/// 两个产品,各一条主路线:
/// - DET-001 (路线 10): 一道无阶段的前置工序,然后 PH-A(部门 01100)
///   两道、PH-B(部门 01200)两道
/// - DET-002 (路线 20): PHC(部门 01200)两道,第二道带调整标记 "н"
///
/// 四个在制批次、四条仿真任务(其中一条在昨天,应被班次任务丢弃)
pub fn write_standard_fixture(dir: &Path) {
    write_table(
        dir,
        "department",
        json!([
            {"id": 1, "identity": "01100", "name": "Цех 1"},
            {"id": 2, "identity": "01200", "name": "Цех 2"},
            {"id": 3, "identity": "02904", "name": "Склад"},
        ]),
    );
    write_table(
        dir,
        "equipment_class",
        json!([
            {"id": 1, "identity": "WC-01", "name": "Токарные"},
            {"id": 2, "identity": "WC-02", "name": "Фрезерные"},
        ]),
    );
    write_table(
        dir,
        "equipment",
        json!([
            {"id": 1, "identity": "EQ-100", "name": "Станок 100", "equipment_class_id": 1, "department_id": 1},
            {"id": 2, "identity": null, "name": "Без кода", "equipment_class_id": 1, "department_id": 1},
            {"id": 3, "identity": "EQ-300", "name": "Станок 300", "equipment_class_id": 2, "department_id": 2},
            {"id": 4, "identity": "", "name": "Пустой код", "equipment_class_id": 1, "department_id": 1},
        ]),
    );
    write_table(
        dir,
        "entity",
        json!([
            {"id": 1, "identity": "DET-001", "name": "Деталь 1"},
            {"id": 2, "identity": "DET-002", "name": "Деталь 2"},
        ]),
    );
    write_table(
        dir,
        "specification_item",
        json!([
            {"parent_id": 1, "child_id": 2, "amount": 2.5},
        ]),
    );
    write_table(
        dir,
        "entity_route",
        json!([
            {"id": 10, "identity": "DET-001_R", "entity_id": 1, "alternate": false},
            {"id": 20, "identity": "DET-002_R", "entity_id": 2, "alternate": false},
        ]),
    );
    write_table(
        dir,
        "entity_route_phase",
        json!([
            {"id": 100, "identity": "PH-A"},
            {"id": 101, "identity": "PH-B"},
            {"id": 102, "identity": "PHC"},
        ]),
    );
    write_table(
        dir,
        "operation",
        json!([
            {"id": 1000, "identity": "OP-A1", "name": "Подготовка A", "nop": "010_1",
             "entity_route_id": 10, "entity_route_phase_id": 100,
             "department_id": 1, "equipment_class_id": 1, "prod_time": 1800.0},
            {"id": 1001, "identity": "OP-A2", "name": "Обработка A", "nop": "010_2",
             "entity_route_id": 10, "entity_route_phase_id": 100,
             "department_id": 1, "equipment_class_id": 1, "prod_time": 7200.0},
            {"id": 1002, "identity": "OP-B1", "name": "Подготовка B", "nop": "020_1",
             "entity_route_id": 10, "entity_route_phase_id": 101,
             "department_id": 2, "equipment_class_id": 2, "prod_time": 600.0},
            {"id": 1003, "identity": "OP-B2", "name": "Обработка B", "nop": "020_2",
             "entity_route_id": 10, "entity_route_phase_id": 101,
             "department_id": 2, "equipment_class_id": 2, "prod_time": 3600.0},
            {"id": 1004, "identity": "OP-PRE(test)", "name": "Разовая", "nop": "001_2",
             "entity_route_id": 10, "entity_route_phase_id": null,
             "department_id": 1, "equipment_class_id": 1, "prod_time": 0.0},
            {"id": 2000, "identity": "OP-D2", "name": "Обработка C", "nop": "010_2",
             "entity_route_id": 20, "entity_route_phase_id": 102,
             "department_id": 2, "equipment_class_id": 2, "prod_time": 3600.0},
            {"id": 2001, "identity": "OP-Eн", "name": "Наладка C", "nop": "020_2",
             "entity_route_id": 20, "entity_route_phase_id": 102,
             "department_id": 2, "equipment_class_id": 2, "prod_time": 1800.0},
        ]),
    );
    write_table(
        dir,
        "profession",
        json!([
            {"id": 1, "identity": "Слесарь"},
            {"id": 2, "identity": "Контролер ОТК"},
        ]),
    );
    write_table(
        dir,
        "operation_profession",
        json!([
            {"operation_id": 1001, "profession_id": 1, "amount": 2.0},
            {"operation_id": 1001, "profession_id": 2, "amount": 1.0},
            {"operation_id": 1003, "profession_id": 1, "amount": 1.0},
            {"operation_id": 2000, "profession_id": 1, "amount": 1.0},
        ]),
    );
    write_table(
        dir,
        "entity_batch",
        json!([
            {"identity": "BATCH-0001-01100", "entity_id": 1, "operation_id": 1001,
             "amount": 10.4, "operation_progress": 0.5},
            {"identity": "BATCH-0002-01200", "entity_id": 2, "operation_id": null,
             "amount": 5.0, "operation_progress": 1.0},
            {"identity": "BATCH-0003-01100", "entity_id": 1, "operation_id": null,
             "amount": 3.0, "operation_progress": 0.0},
            {"identity": "BATCH-0004-02904", "entity_id": 1, "operation_id": 1001,
             "amount": 2.0, "operation_progress": 0.1, "entity_batch_snapshot_id": 77},
        ]),
    );
    write_table(
        dir,
        "simulation_operation_task",
        json!([
            {"id": 5000, "operation_id": 1001, "entity_amount": 12.0,
             "start_labor": 0.0, "stop_labor": 0.5,
             "start_date": "2026-09-02T10:30:00.000000+0300",
             "stop_date": "2026-09-02T14:00:00.000000+0300",
             "start_time": 4.0, "type": 0},
            {"id": 5001, "operation_id": 1001, "entity_amount": 12.0,
             "start_labor": 0.5, "stop_labor": 1.0,
             "start_date": "2026-09-02T22:00:00.000000+0300",
             "stop_date": "2026-09-03T01:00:00.000000+0300",
             "start_time": 16.0, "type": 0},
            {"id": 5002, "operation_id": 1003, "entity_amount": 4.0,
             "start_date": "2026-09-01T09:00:00.000000+0300",
             "stop_date": "2026-09-01T12:00:00.000000+0300",
             "start_time": 1.0, "type": 0},
            {"id": 5003, "operation_id": 2000, "entity_amount": 7.3,
             "start_date": "2026-09-03T08:00:00.000000+0300",
             "stop_date": "2026-09-03T20:00:00.000000+0300",
             "start_time": 26.0, "type": 0},
        ]),
    );
    write_table(
        dir,
        "simulation_equipment",
        json!([
            {"id": 9000, "equipment_id": 1},
            {"id": 9001, "equipment_id": null},
        ]),
    );
    write_table(
        dir,
        "simulation_operation_task_equipment",
        json!([
            {"simulation_operation_task_id": 5000, "simulation_equipment_id": 9000},
            {"simulation_operation_task_id": 5001, "simulation_equipment_id": 9001},
            {"simulation_operation_task_id": 5002, "simulation_equipment_id": 9000},
            {"simulation_operation_task_id": 5003, "simulation_equipment_id": 9000},
        ]),
    );
    fs::write(
        dir.join("primary_simulation_session.json"),
        json!({"data": 42}).to_string(),
    )
    .unwrap();
}
