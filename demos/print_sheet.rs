//! 列印工單範例：以推導結果產生純文字物料表

use rust_decimal::Decimal;
use sewing_calc::{DerivationOptions, RequirementEngine, RequirementResult};
use sewing_core::{
    BreakdownMatrix, ColorVariant, ConsumptionSpec, Order, SizeBreakdownRow, SizeBucket,
    SizeFormat, SizeVariant, TechPack, TechPackCategory, TechPackItem,
};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let order = Order::new("ORD-2040", "PT-880 - Numeric Run", 48)
        .with_size_format(SizeFormat::Numeric)
        .with_size_breakdown(vec![
            SizeBreakdownRow::new("Khaki")
                .with_quantity(SizeBucket::S, 6)
                .with_quantity(SizeBucket::M, 12)
                .with_quantity(SizeBucket::L, 12),
            SizeBreakdownRow::new("Olive")
                .with_quantity(SizeBucket::M, 8)
                .with_quantity(SizeBucket::L, 10),
        ]);

    let tech_pack = TechPack::new(vec![TechPackCategory::new(
        "Trims",
        vec![
            TechPackItem::new("Waist Elastic (cm)").with_variants(vec![ColorVariant::new([
                "Khaki", "Olive",
            ])
            .with_size_variants(vec![
                SizeVariant::new(["65", "70"])
                    .with_consumption(ConsumptionSpec::per_piece(Decimal::from(68))),
                SizeVariant::new(["75", "80"])
                    .with_consumption(ConsumptionSpec::per_piece(Decimal::from(78))),
            ])]),
            TechPackItem::new("Button").with_consumption(ConsumptionSpec::per_piece(Decimal::ONE)),
        ],
    )]);

    tracing::info!("列印訂單 {}", order.id);

    let results = RequirementEngine::derive_with_options(
        &order,
        Some(&tech_pack),
        DerivationOptions::default(),
    );

    print_breakdown(&order);
    print_requirements(&results);

    Ok(())
}

/// 尺碼分配表
fn print_breakdown(order: &Order) {
    println!("訂單 {} / 款號 {}", order.id, order.style_number());
    print!("{:<10}", "顏色");
    for bucket in SizeBucket::ALL {
        print!("{:>6}", bucket.label(order.size_format));
    }
    println!("{:>8}", "合計");

    for row in &order.size_breakdown {
        print!("{:<10}", row.color);
        for bucket in SizeBucket::ALL {
            print!("{:>6}", row.quantity(bucket));
        }
        println!("{:>8}", row.total());
    }

    print!("{:<10}", "合計");
    for bucket in SizeBucket::ALL {
        print!("{:>6}", BreakdownMatrix::column_total(&order.size_breakdown, bucket));
    }
    println!("{:>8}", order.breakdown_total());
    println!();
}

/// 物料需求表
fn print_requirements(results: &[RequirementResult]) {
    if results.is_empty() {
        println!("（此款式沒有技術包需求）");
        return;
    }

    for result in results {
        println!("{:<24}{:>12}", result.item_name, result.total);
        for line in &result.lines {
            println!(
                "  {:<22}{:>12}  ({} 件)",
                line.scope_label, line.calculated_quantity, line.matched_piece_count
            );
        }
    }
}
