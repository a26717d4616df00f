// ==========================================
// 城市固体废弃物工具集 - 分摊引擎集成测试
// ==========================================
// 覆盖: 内连接、缺失比例、建筑垃圾系数、线性缩放、汇总
// ==========================================

mod test_helpers;

use test_helpers::{assert_close, composition, flow};
use waste_toolkit::engine::{total_processed, DEFAULT_SUMMARY_MATERIALS};
use waste_toolkit::{AllocationEngine, DebrisFractionTable, Material};

#[test]
fn test_documented_example_row() {
    // 组分 {A, Vidros=0.1} × 流量 {A, RJ, Dom+Pub=1000}
    let engine = AllocationEngine::new();
    let results = engine.allocate(
        &[composition("A", &[(Material::Glass, 0.1)])],
        &[flow("RJ", "A", Some(1000.0), None)],
        &DebrisFractionTable::standard(),
    );

    assert_eq!(results.len(), 1);
    let row = &results[0];
    assert_eq!(row.region, "RJ");
    assert_eq!(row.unit_type, "A");
    assert_close(row.quantity(Material::Glass).unwrap(), 100.0);
    for material in [
        Material::PaperCardboard,
        Material::Plastics,
        Material::Metals,
        Material::Organics,
    ] {
        assert_eq!(row.quantity(material), Some(0.0), "{} 应为 0", material);
    }
}

#[test]
fn test_join_is_inner() {
    let engine = AllocationEngine::new();
    let flows = vec![
        flow("RJ", "A", Some(10.0), Some(10.0)),
        flow("SP", "X", Some(10.0), Some(10.0)),
        flow("MG", "Y", None, None),
        flow("BA", "A", None, Some(1.0)),
    ];

    let run = engine.run(
        &[composition("A", &[(Material::Organics, 0.5)])],
        &flows,
        &DebrisFractionTable::standard(),
    );

    assert_eq!(run.results.len(), 2);
    assert_eq!(run.skipped_flow_rows, 2);
    assert!(run.results.iter().all(|r| r.unit_type == "A"));
    assert_eq!(
        run.results.iter().map(|r| r.region.as_str()).collect::<Vec<_>>(),
        vec!["RJ", "BA"],
        "结果顺序与流量表一致"
    );
}

#[test]
fn test_debris_allocation_scales_linearly() {
    let engine = AllocationEngine::new();
    let table = DebrisFractionTable::standard();
    let record = composition("A", &[]);

    let small = engine.allocate_row(&record, &flow("RJ", "A", None, Some(100.0)), &table);
    let large = engine.allocate_row(&record, &flow("RJ", "A", None, Some(300.0)), &table);

    for (material, fraction) in table.entries() {
        let s = small.quantity(*material).unwrap();
        let l = large.quantity(*material).unwrap();
        assert_close(s, 100.0 * fraction);
        assert_close(l, 3.0 * s);
    }
}

#[test]
fn test_debris_sum_is_not_the_aggregate() {
    let engine = AllocationEngine::new();
    let row = engine.allocate_row(
        &composition("A", &[]),
        &flow("RJ", "A", None, Some(1000.0)),
        &DebrisFractionTable::standard(),
    );

    let allocated: f64 = row.quantities.values().sum();
    assert_close(allocated, 984.92);
    assert!(allocated < 1000.0);
}

#[test]
fn test_custom_debris_table_is_used_verbatim() {
    let engine = AllocationEngine::new();
    let table = DebrisFractionTable::from_pairs([
        (Material::Concrete, 0.5),
        (Material::Brick, 0.25),
    ])
    .unwrap();

    let results = engine.allocate(
        &[composition("A", &[])],
        &[flow("RS", "A", None, Some(40.0))],
        &table,
    );

    assert_eq!(results[0].quantities.len(), 2);
    assert_close(results[0].quantity(Material::Concrete).unwrap(), 20.0);
    assert_close(results[0].quantity(Material::Brick).unwrap(), 10.0);
}

#[test]
fn test_allocation_is_deterministic() {
    let engine = AllocationEngine::new();
    let compositions = vec![composition("A", &[(Material::Plastics, 0.3)])];
    let flows = vec![flow("RJ", "A", Some(7.0), Some(3.0))];
    let table = DebrisFractionTable::standard();

    let first = engine.allocate(&compositions, &flows, &table);
    let second = engine.allocate(&compositions, &flows, &table);

    assert_eq!(first, second);
}

#[test]
fn test_total_processed_over_results() {
    let engine = AllocationEngine::new();
    let results = engine.allocate(
        &[composition("A", &[(Material::Glass, 0.1), (Material::Organics, 0.4)])],
        &[flow("RJ", "A", Some(100.0), Some(100.0))],
        &DebrisFractionTable::standard(),
    );

    // Vidros 10 + Orgânicos 40 + Papel 0.23 + Concreto 6.77 + Argamassa 10.65
    assert_close(total_processed(&results, &DEFAULT_SUMMARY_MATERIALS), 67.65);
    assert_eq!(total_processed(&[], &DEFAULT_SUMMARY_MATERIALS), 0.0);
}
