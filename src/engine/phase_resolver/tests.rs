use super::{MainRouteIndex, PhaseMap};
use crate::domain::reference::{EntityRoute, Operation, RoutePhase};

// ==========================================
// 测试辅助函数
// ==========================================

fn create_operation(
    id: i64,
    route_id: i64,
    nop: &str,
    identity: &str,
    phase_link: Option<i64>,
) -> Operation {
    Operation {
        id,
        identity: identity.to_string(),
        name: format!("工序 {}", identity),
        nop: nop.to_string(),
        entity_route_id: route_id,
        entity_route_phase_id: phase_link,
        department_id: 10,
        equipment_class_id: 20,
        prep_time: 0.0,
        prod_time: 3600.0,
    }
}

fn create_phase(id: i64, identity: &str) -> RoutePhase {
    RoutePhase {
        id,
        identity: identity.to_string(),
    }
}

fn create_route(id: i64, entity_id: i64, identity: &str, alternate: bool) -> EntityRoute {
    EntityRoute {
        id,
        identity: identity.to_string(),
        entity_id,
        alternate,
    }
}

// ==========================================
// 阶段解析
// ==========================================

#[test]
fn test_resolve_linked_operations() {
    let operations = vec![
        create_operation(1, 100, "010", "OP-1", Some(1)),
        create_operation(2, 100, "020", "OP-2", Some(2)),
    ];
    let phases = vec![create_phase(1, "PH-A"), create_phase(2, "PH-B")];

    let map = PhaseMap::resolve_all(&operations, &phases).unwrap();
    assert_eq!(map.get(1), Some("PH-A"));
    assert_eq!(map.get(2), Some("PH-B"));
    assert_eq!(map.resolution_failures(), 0);
}

#[test]
fn test_null_link_counts_as_failure() {
    let operations = vec![create_operation(1, 100, "010", "OP-1", None)];
    let map = PhaseMap::resolve_all(&operations, &[]).unwrap();
    assert_eq!(map.get(1), None);
    assert_eq!(map.resolution_failures(), 1);
}

#[test]
fn test_parenthesis_marker_is_silent() {
    // 含 "(" 的 identity 是刻意不解析的业务标记
    let operations = vec![create_operation(1, 100, "010", "(试验工序)", None)];
    let map = PhaseMap::resolve_all(&operations, &[]).unwrap();
    assert_eq!(map.get(1), None);
    assert_eq!(map.resolution_failures(), 0);
}

#[test]
fn test_unknown_operation_yields_none() {
    let map = PhaseMap::resolve_all(&[], &[]).unwrap();
    assert_eq!(map.get(999), None);
}

#[test]
fn test_dangling_phase_link_is_fatal() {
    let operations = vec![create_operation(1, 100, "010", "OP-1", Some(77))];
    let result = PhaseMap::resolve_all(&operations, &[]);
    assert!(result.is_err());
}

#[test]
fn test_resolution_is_deterministic() {
    // 同一快照下两次解析结果一致(记忆化正确性)
    let operations = vec![
        create_operation(1, 100, "010", "OP-1", Some(1)),
        create_operation(2, 100, "020", "OP-2", Some(1)),
    ];
    let phases = vec![create_phase(1, "PH-A")];

    let first = PhaseMap::resolve_all(&operations, &phases).unwrap();
    let second = PhaseMap::resolve_all(&operations, &phases).unwrap();
    for id in [1, 2] {
        assert_eq!(first.get(id), second.get(id));
        assert_eq!(first.get(id), first.get(id));
    }
}

// ==========================================
// 主路线索引
// ==========================================

#[test]
fn test_main_route_last_phase() {
    let routes = vec![
        create_route(100, 7, "R-MAIN", false),
        create_route(101, 7, "R-ALT", true),
    ];
    // nop 字典序下 "020" 在 "010" 之后,末道工序应为 id=2
    let operations = vec![
        create_operation(2, 100, "020", "OP-2", Some(2)),
        create_operation(1, 100, "010", "OP-1", Some(1)),
    ];
    let phases = vec![create_phase(1, "PH-A"), create_phase(2, "PH-B")];
    let map = PhaseMap::resolve_all(&operations, &phases).unwrap();

    let index = MainRouteIndex::build(&routes, &operations);
    assert!(index.has_main_route(7));
    assert_eq!(index.last_phase(7, &map), Some("PH-B"));
    assert_eq!(index.last_phase(8, &map), None);
}
