//! 集成測試

use proptest::prelude::*;
use rust_decimal::Decimal;
use sewing_calc::{DerivationOptions, ForecastSelection, RequirementEngine};
use sewing_core::{
    BreakdownMatrix, ColorVariant, ConsumptionSpec, FloorConfig, InMemoryStyleCatalog, Order,
    SewingError, SizeBreakdownRow, SizeBucket, Style, TechPack, TechPackCategory, TechPackItem,
};
use std::str::FromStr;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn sample_order() -> Order {
    Order::new("ORD-1001", "ST-2025-01 - Winter", 60)
        .with_unit_id("UNIT-2")
        .with_size_breakdown(vec![
            SizeBreakdownRow::new("Red")
                .with_quantity(SizeBucket::S, 10)
                .with_quantity(SizeBucket::M, 20),
            SizeBreakdownRow::new("Blue")
                .with_quantity(SizeBucket::S, 5)
                .with_quantity(SizeBucket::M, 0),
        ])
}

/// 技術包 JSON（與讀取層提供的格式相同）
const HOODIE_TECH_PACK: &str = r#"{
    "categories": [
        {
            "name": "Trims",
            "items": [
                {
                    "field_name": "Zipper",
                    "reference_text": "YKK #5 coil",
                    "variants": [
                        { "colors": ["Red"], "consumption": { "formula": "PER_PIECE", "factor": 1 } }
                    ]
                },
                {
                    "field_name": "Drawcord",
                    "consumption": { "formula": "PIECE_RATIO", "factor": "3" },
                    "variants": [
                        {
                            "colors": ["Red", "Blue"],
                            "attachments": [
                                { "name": "cord.png", "url": "https://cdn/cord.png", "type": "image" }
                            ],
                            "size_variants": [
                                { "sizes": ["S"] },
                                { "sizes": ["M"], "reference_text": "long cord",
                                  "consumption": { "factor": "0" } }
                            ]
                        }
                    ]
                }
            ]
        },
        {
            "name": "Packing",
            "items": [
                { "field_name": "Poly Bag", "consumption": { "formula": "PER_PIECE", "factor": "1.02" } },
                { "field_name": "Carton", "consumption": { "formula": "PIECE_RATIO" } }
            ]
        }
    ]
}"#;

fn hoodie_catalog() -> InMemoryStyleCatalog {
    let tech_pack: TechPack = serde_json::from_str(HOODIE_TECH_PACK).unwrap();
    [Style::new("ST-2025-01")
        .with_name("Hoodie")
        .with_tech_pack(tech_pack)]
    .into_iter()
    .collect()
}

#[test]
fn test_zipper_scenario() {
    let tech_pack = TechPack::new(vec![TechPackCategory::new(
        "Trims",
        vec![TechPackItem::new("Zipper").with_variants(vec![ColorVariant::new(["Red"])
            .with_consumption(ConsumptionSpec::per_piece(Decimal::ONE))])],
    )]);

    let results = RequirementEngine::derive(&sample_order(), Some(&tech_pack));

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].item_name, "Zipper");
    assert_eq!(results[0].total, Decimal::from(30));
    assert_eq!(results[0].lines.len(), 1);
    assert_eq!(results[0].lines[0].scope_label, "Color: Red");
    assert_eq!(results[0].lines[0].matched_piece_count, 30);
    assert_eq!(results[0].lines[0].calculated_quantity, Decimal::from(30));
}

#[test]
fn test_detail_view_from_catalog() {
    let order = sample_order();
    let options = DerivationOptions::default();
    let results = RequirementEngine::derive_for_order(&order, &hoodie_catalog(), options);

    let names: Vec<_> = results.iter().map(|r| r.item_name.as_str()).collect();
    // Carton 沒有係數，整個物料被省略
    assert_eq!(names, vec!["Zipper", "Drawcord", "Poly Bag"]);

    let zipper = &results[0];
    assert_eq!(zipper.total, Decimal::from(30));
    assert_eq!(zipper.lines[0].reference_text, "YKK #5 coil");

    // S 尺碼：15 件 ÷ 3 = 5；M 尺碼係數明確設為 0 → 不產生明細
    let drawcord = &results[1];
    assert_eq!(drawcord.lines.len(), 1);
    assert_eq!(drawcord.lines[0].scope_label, "Red/Blue - S");
    assert_eq!(drawcord.lines[0].matched_piece_count, 15);
    assert_eq!(drawcord.lines[0].calculated_quantity, Decimal::from(5));
    assert_eq!(drawcord.lines[0].attachments.len(), 1);
    assert_eq!(drawcord.total, Decimal::from(5));

    // 全域需求使用訂單數量 60，不是分配合計 35
    let poly_bag = &results[2];
    assert_eq!(poly_bag.lines[0].scope_label, "Global Requirement");
    assert_eq!(poly_bag.lines[0].matched_piece_count, 60);
    assert_eq!(poly_bag.total, dec("61.2"));
}

#[test]
fn test_global_requirement_ignores_breakdown() {
    let tech_pack = TechPack::new(vec![TechPackCategory::new(
        "Labels",
        vec![TechPackItem::new("Size Label")
            .with_consumption(ConsumptionSpec::piece_ratio(Decimal::from(3)))],
    )]);

    let with_rows = sample_order();
    let without_rows = Order::new("ORD-1002", "ST-2025-01", 60);

    let a = RequirementEngine::derive(&with_rows, Some(&tech_pack));
    let b = RequirementEngine::derive(&without_rows, Some(&tech_pack));

    assert_eq!(a[0].total, Decimal::from(20));
    assert_eq!(a[0].total, b[0].total);
}

#[test]
fn test_unlinked_style_yields_empty_state() {
    let mut order = sample_order();
    order.style_ref = "ST-UNKNOWN - Winter".to_string();

    let options = DerivationOptions::default();
    let results = RequirementEngine::derive_for_order(&order, &hoodie_catalog(), options);

    assert!(results.is_empty());
    assert!(ForecastSelection::new(results).is_empty());
}

#[test]
fn test_forecast_to_material_requests() {
    let order = sample_order();
    let config = FloorConfig::from_json_str(r#"{ "unit_id": "UNIT-2", "material_unit": "pcs" }"#)
        .unwrap();
    assert!(config.is_visible(&order));

    let results = RequirementEngine::derive_for_order(
        &order,
        &hoodie_catalog(),
        DerivationOptions::from_config(&config),
    );
    let mut selection = ForecastSelection::new(results);

    // 只保留拉鍊與膠袋
    selection.set_item(1, false).unwrap();
    let drafts = selection.materialize(&order, &config).unwrap();

    let descriptions: Vec<_> = drafts.iter().map(|d| d.description.as_str()).collect();
    assert_eq!(
        descriptions,
        vec!["Zipper (Color: Red)", "Poly Bag (Global Requirement)"]
    );
    assert_eq!(drafts[1].quantity, dec("61.2"));
    assert!(drafts.iter().all(|d| d.order_id == "ORD-1001" && d.unit == "pcs"));

    selection.clear_all();
    assert!(matches!(
        selection.materialize(&order, &config),
        Err(SewingError::EmptySelection)
    ));
}

#[test]
fn test_print_sheet_matches_detail_view() {
    // 明細、預測與列印使用同一個推導結果
    let order = sample_order();
    let catalog = hoodie_catalog();

    let detail =
        RequirementEngine::derive_for_order(&order, &catalog, DerivationOptions::default());
    let print = RequirementEngine::derive_for_order(&order, &catalog, DerivationOptions::default());
    let forecast = ForecastSelection::new(
        RequirementEngine::derive_for_order(&order, &catalog, DerivationOptions::default()),
    );

    assert_eq!(detail, print);
    assert_eq!(detail.as_slice(), forecast.results());

    let json = serde_json::to_value(&detail).unwrap();
    assert_eq!(json[0]["item_name"], "Zipper");
    assert_eq!(json[0]["lines"][0]["scope_label"], "Color: Red");
}

#[test]
fn test_quantity_override_dialog_selection() {
    let rows = vec![
        SizeBreakdownRow::new("Red")
            .with_quantity(SizeBucket::S, 1)
            .with_quantity(SizeBucket::M, 2),
        SizeBreakdownRow::new("Blue")
            .with_quantity(SizeBucket::S, 3)
            .with_quantity(SizeBucket::M, 4),
    ];

    assert_eq!(
        BreakdownMatrix::selection_total(&rows, &[0], &[SizeBucket::M]),
        7
    );
}

fn rows_strategy() -> impl Strategy<Value = Vec<SizeBreakdownRow>> {
    prop::collection::vec(prop::array::uniform6(0u32..500), 0..6).prop_map(|grid| {
        grid.into_iter()
            .enumerate()
            .map(|(idx, quantities)| SizeBreakdownRow {
                color: ["Red", "Blue", "Green"][idx % 3].to_string(),
                quantities,
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn prop_selection_total_is_union(
        rows in rows_strategy(),
        selected_rows in prop::collection::vec(0usize..8, 0..4),
        bucket_mask in prop::array::uniform6(any::<bool>()),
    ) {
        let selected_buckets: Vec<SizeBucket> = SizeBucket::ALL
            .into_iter()
            .zip(bucket_mask)
            .filter_map(|(bucket, on)| on.then_some(bucket))
            .collect();

        let mut row_set: Vec<usize> = selected_rows.clone();
        row_set.sort_unstable();
        row_set.dedup();

        let row_part: u64 = row_set.iter().filter_map(|&i| rows.get(i)).map(|r| r.total()).sum();
        let bucket_part: u64 = selected_buckets
            .iter()
            .map(|&b| BreakdownMatrix::column_total(&rows, b))
            .sum();
        let overlap: u64 = row_set
            .iter()
            .filter_map(|&i| rows.get(i))
            .flat_map(|r| selected_buckets.iter().map(move |&b| u64::from(r.quantity(b))))
            .sum();

        prop_assert_eq!(
            BreakdownMatrix::selection_total(&rows, &selected_rows, &selected_buckets),
            row_part + bucket_part - overlap
        );
    }

    #[test]
    fn prop_derivation_is_deterministic(rows in rows_strategy(), quantity in 0u64..10_000) {
        let tech_pack: TechPack = serde_json::from_str(HOODIE_TECH_PACK).unwrap();
        let order = Order::new("ORD-P", "ST-2025-01", quantity).with_size_breakdown(rows);

        let first = RequirementEngine::derive(&order, Some(&tech_pack));
        let second = RequirementEngine::derive(&order, Some(&tech_pack));

        prop_assert_eq!(&first, &second);
        for result in &first {
            prop_assert!(result.total > Decimal::ZERO);
            prop_assert!(result.lines.iter().all(|l| l.calculated_quantity > Decimal::ZERO));
        }
    }
}
