//! # 車縫訂單物料預測完整範例
//!
//! 這個範例展示從訂單到物料申請的完整流程：
//! - 款式：連帽衫（技術包含顏色/尺碼變體）
//! - 訂單：紅、藍兩色的尺碼分配
//! - 預測：勾選需要的需求行，產生物料申請

use rust_decimal::Decimal;
use sewing_calc::{DerivationOptions, ForecastSelection, RequirementEngine};
use sewing_core::*;
use tracing_subscriber::EnvFilter;

/// 示範用寫入端：只印出草稿
struct ConsoleSink;

impl MaterialRequestSink for ConsoleSink {
    fn create_requests(
        &mut self,
        drafts: Vec<MaterialRequestDraft>,
    ) -> std::result::Result<usize, Box<dyn std::error::Error + Send + Sync>> {
        for draft in &drafts {
            println!(
                "  ├─ {} | 數量: {} {} | 附件: {}",
                draft.description,
                draft.quantity,
                draft.unit,
                draft.attachments.len()
            );
        }
        Ok(drafts.len())
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("🧵 ===== 車縫訂單物料預測範例 =====");
    println!();

    // ========== 1. 車間配置 ==========
    println!("⚙️  步驟 1: 載入車間配置");
    let config = FloorConfig::from_json_str(r#"{ "unit_id": "UNIT-2", "material_unit": "pcs" }"#)?;
    println!("   ✓ 車縫單位: {:?}", config.unit_id);
    println!();

    // ========== 2. 建立款式與技術包 ==========
    println!("📐 步驟 2: 建立款式技術包");
    let catalog: InMemoryStyleCatalog = [create_hoodie_style()].into_iter().collect();
    println!("   ✓ 款式數: {}", catalog.len());
    println!();

    // ========== 3. 訂單 ==========
    println!("📦 步驟 3: 讀取車縫訂單");
    let orders = vec![
        Order::new("ORD-1001", "HD-2025 - Winter Drop", 60)
            .with_unit_id("UNIT-2")
            .with_size_breakdown(vec![
                SizeBreakdownRow::new("Red")
                    .with_quantity(SizeBucket::S, 10)
                    .with_quantity(SizeBucket::M, 20)
                    .with_quantity(SizeBucket::L, 10),
                SizeBreakdownRow::new("Blue")
                    .with_quantity(SizeBucket::S, 5)
                    .with_quantity(SizeBucket::M, 15),
            ]),
        Order::new("ORD-1002", "HD-2025", 40).with_unit_id("UNIT-5"),
    ];

    let visible = config.visible_orders(&orders);
    println!("   ✓ 本單位可見訂單: {} / {}", visible.len(), orders.len());
    println!();

    // ========== 4. 推導物料需求 ==========
    println!("🚀 步驟 4: 推導物料需求");
    for order in visible {
        let options = DerivationOptions::from_config(&config);
        let results = RequirementEngine::derive_for_order(order, &catalog, options);

        println!("訂單: {} ({} 件)", order.id, order.quantity);
        for result in &results {
            println!("物料: {} | 總量: {}", result.item_name, result.total);
            for line in &result.lines {
                println!(
                    "  ├─ {} | 件數: {} | 需求: {}",
                    line.scope_label, line.matched_piece_count, line.calculated_quantity
                );
            }
        }
        println!();

        // ========== 5. 選取並建立物料申請 ==========
        println!("📋 步驟 5: 建立物料申請（取消全域膠袋）");
        let mut selection = ForecastSelection::new(results);
        if let Some(idx) = selection
            .results()
            .iter()
            .position(|r| r.item_name == "Poly Bag")
        {
            selection.set_item(idx, false)?;
        }

        let created = selection.submit(order, &config, &mut ConsoleSink)?;
        println!("   ✓ 已建立 {} 筆物料申請", created);
        println!();
    }

    println!("✅ 物料預測完成！");
    Ok(())
}

/// 建立連帽衫技術包
fn create_hoodie_style() -> Style {
    let trims = TechPackCategory::new(
        "Trims",
        vec![
            TechPackItem::new("Zipper")
                .with_reference_text("YKK #5 coil, matching tape")
                .with_variants(vec![
                    ColorVariant::new(["Red"])
                        .with_consumption(ConsumptionSpec::per_piece(Decimal::ONE)),
                    ColorVariant::new(["Blue"])
                        .with_reference_text("YKK #5 navy tape")
                        .with_consumption(ConsumptionSpec::per_piece(Decimal::ONE)),
                ]),
            TechPackItem::new("Drawcord")
                .with_consumption(ConsumptionSpec::per_piece(Decimal::new(12, 1)))
                .with_variants(vec![ColorVariant::new(["Red", "Blue"])
                    .with_attachments(vec![Attachment::new(
                        "drawcord.png",
                        "https://cdn.example.com/drawcord.png",
                        AttachmentKind::Image,
                    )])
                    .with_size_variants(vec![
                        SizeVariant::new(["S", "M"]),
                        SizeVariant::new(["L", "XL"])
                            .with_consumption(ConsumptionSpec::factor_only(Decimal::new(14, 1))),
                    ])]),
        ],
    );

    let packing = TechPackCategory::new(
        "Packing",
        vec![
            TechPackItem::new("Poly Bag")
                .with_consumption(ConsumptionSpec::per_piece(Decimal::ONE)),
            TechPackItem::new("Carton")
                .with_consumption(ConsumptionSpec::piece_ratio(Decimal::from(24))),
        ],
    );

    Style::new("HD-2025")
        .with_name("Fleece Hoodie")
        .with_tech_pack(TechPack::new(vec![trims, packing]))
}
