//! 物料需求推導引擎
//!
//! 以訂單的顏色/尺碼分配走訪技術包，依覆寫鏈計算每個範圍的需求，
//! 並彙總為每個物料的總量與範圍明細。

use rayon::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sewing_core::{
    Attachment, ColorVariant, FloorConfig, Order, SizeBreakdownRow, SizeBucket, SizeFormat,
    SizeVariant, StyleCatalog, TechPack, TechPackItem,
};

use crate::consumption::ConsumptionResolver;
use crate::overrides::OverrideChain;

/// 全域需求的範圍標籤
pub const GLOBAL_SCOPE_LABEL: &str = "Global Requirement";

/// 單一範圍的需求明細
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequirementLine {
    /// 範圍標籤
    pub scope_label: String,

    /// 範圍內的件數
    pub matched_piece_count: u64,

    /// 計算後的需求數量（已進位到小數第二位）
    pub calculated_quantity: Decimal,

    /// 參考說明
    pub reference_text: String,

    /// 參考附件
    pub attachments: Vec<Attachment>,
}

/// 單一物料的需求結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequirementResult {
    /// 物料名稱
    pub item_name: String,

    /// 需求總量（各行進位後加總，再進位）
    pub total: Decimal,

    /// 範圍明細（宣告順序）
    pub lines: Vec<RequirementLine>,
}

/// 推導選項
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DerivationOptions {
    /// 子變體比對用的尺碼標籤格式（None 使用訂單的格式）
    pub label_format: Option<SizeFormat>,
}

impl DerivationOptions {
    /// 建構器模式：覆寫尺碼標籤格式
    pub fn with_label_format(mut self, format: SizeFormat) -> Self {
        self.label_format = Some(format);
        self
    }

    /// 由車間配置建立
    pub fn from_config(config: &FloorConfig) -> Self {
        Self {
            label_format: config.size_label_format,
        }
    }
}

/// 需求推導引擎
///
/// 純函數：不持有狀態，同樣輸入永遠得到同樣（含順序）的結果。
pub struct RequirementEngine;

impl RequirementEngine {
    /// 推導訂單的物料需求
    ///
    /// 沒有技術包時返回空序列。
    pub fn derive(order: &Order, tech_pack: Option<&TechPack>) -> Vec<RequirementResult> {
        Self::derive_with_options(order, tech_pack, DerivationOptions::default())
    }

    /// 推導訂單的物料需求（指定選項）
    pub fn derive_with_options(
        order: &Order,
        tech_pack: Option<&TechPack>,
        options: DerivationOptions,
    ) -> Vec<RequirementResult> {
        let Some(tech_pack) = tech_pack else {
            tracing::debug!("訂單 {} 沒有連結技術包", order.id);
            return Vec::new();
        };

        let label_format = options.label_format.unwrap_or(order.size_format);

        tracing::info!(
            "開始推導物料需求：訂單 {}，分配 {} 行，尺碼格式 {:?}",
            order.id,
            order.size_breakdown.len(),
            label_format
        );

        let results: Vec<RequirementResult> = tech_pack
            .items()
            .filter_map(|item| Self::derive_item(order, item, label_format))
            .collect();

        tracing::info!("推導完成：訂單 {}，物料 {} 項", order.id, results.len());

        results
    }

    /// 依訂單款號查詢款式後推導
    ///
    /// 查無款式或款式沒有技術包都返回空序列。
    pub fn derive_for_order<C: StyleCatalog + ?Sized>(
        order: &Order,
        catalog: &C,
        options: DerivationOptions,
    ) -> Vec<RequirementResult> {
        let style_number = order.style_number();
        match catalog.find_by_style_number(style_number) {
            Some(style) => Self::derive_with_options(order, style.tech_pack.as_ref(), options),
            None => {
                tracing::debug!("找不到款式 {}（訂單 {}）", style_number, order.id);
                Vec::new()
            }
        }
    }

    /// 並行推導多張訂單
    ///
    /// 輸出順序與輸入相同。
    pub fn derive_many(
        pairs: &[(Order, Option<TechPack>)],
        options: DerivationOptions,
    ) -> Vec<Vec<RequirementResult>> {
        pairs
            .par_iter()
            .map(|(order, tech_pack)| Self::derive_with_options(order, tech_pack.as_ref(), options))
            .collect()
    }

    /// 單一物料
    fn derive_item(
        order: &Order,
        item: &TechPackItem,
        label_format: SizeFormat,
    ) -> Option<RequirementResult> {
        let mut lines = Vec::new();

        match item.variants.as_deref() {
            Some(variants) if !variants.is_empty() => {
                for variant in variants {
                    Self::derive_variant(order, item, variant, label_format, &mut lines);
                }
            }
            _ => {
                if item.consumption.is_some() {
                    let chain = OverrideChain::item(item);
                    let label = GLOBAL_SCOPE_LABEL.to_string();
                    Self::push_line(&mut lines, chain, label, order.quantity);
                }
            }
        }

        let Some(sum) = lines
            .iter()
            .try_fold(Decimal::ZERO, |acc, l| acc.checked_add(l.calculated_quantity))
        else {
            tracing::warn!("物料 {} 需求總量溢位，略過", item.field_name);
            return None;
        };
        let total = ConsumptionResolver::round_up(sum);

        if total > Decimal::ZERO {
            Some(RequirementResult {
                item_name: item.field_name.clone(),
                total,
                lines,
            })
        } else {
            tracing::debug!("物料 {} 需求為 0，略過", item.field_name);
            None
        }
    }

    /// 單一顏色變體
    fn derive_variant(
        order: &Order,
        item: &TechPackItem,
        variant: &ColorVariant,
        label_format: SizeFormat,
        lines: &mut Vec<RequirementLine>,
    ) {
        let matching_rows: Vec<&SizeBreakdownRow> = order
            .size_breakdown
            .iter()
            .filter(|row| variant.covers_color(&row.color))
            .collect();

        if matching_rows.is_empty() {
            tracing::debug!(
                "物料 {} 顏色 {:?} 無對應分配行",
                item.field_name,
                variant.colors
            );
            return;
        }

        let colors = variant.colors.join("/");

        match variant.size_variants.as_deref() {
            Some(size_variants) if !size_variants.is_empty() => {
                for size_variant in size_variants {
                    let piece_count =
                        Self::size_scope_pieces(&matching_rows, size_variant, label_format);
                    if piece_count == 0 {
                        tracing::debug!(
                            "物料 {} 範圍 {} - {:?} 件數為 0",
                            item.field_name,
                            colors,
                            size_variant.sizes
                        );
                        continue;
                    }

                    let chain = OverrideChain::size_variant(item, variant, size_variant);
                    let label = format!("{} - {}", colors, size_variant.sizes.join("/"));
                    Self::push_line(lines, chain, label, piece_count);
                }
            }
            _ => {
                if variant.consumption.is_some() {
                    let piece_count = matching_rows.iter().map(|row| row.total()).sum();
                    let chain = OverrideChain::variant(item, variant);
                    Self::push_line(lines, chain, format!("Color: {}", colors), piece_count);
                }
            }
        }
    }

    /// 子變體範圍內的件數：對應行 × 對應尺碼桶
    fn size_scope_pieces(
        rows: &[&SizeBreakdownRow],
        size_variant: &SizeVariant,
        label_format: SizeFormat,
    ) -> u64 {
        let target_buckets: Vec<SizeBucket> = SizeBucket::ALL
            .into_iter()
            .filter(|bucket| size_variant.covers_size(bucket.label(label_format)))
            .collect();

        rows.iter()
            .flat_map(|row| {
                target_buckets
                    .iter()
                    .map(move |&bucket| u64::from(row.quantity(bucket)))
            })
            .sum()
    }

    /// 計算並加入一行
    ///
    /// 需求為 0 的範圍不產生明細；數量超出 `Decimal` 範圍的範圍視為無效資料，
    /// 記錄警告後略過，不中斷其他範圍的推導。
    fn push_line(
        lines: &mut Vec<RequirementLine>,
        chain: OverrideChain<'_>,
        scope_label: String,
        piece_count: u64,
    ) {
        let effective = chain.consumption();
        let Some(quantity) =
            ConsumptionResolver::resolve_rounded(effective.formula, effective.factor, piece_count)
        else {
            tracing::warn!(
                "範圍 {} 需求數量溢位（件數 {}，係數 {:?}），略過",
                scope_label,
                piece_count,
                effective.factor
            );
            return;
        };

        if quantity.is_zero() {
            tracing::debug!("範圍 {} 需求為 0，不產生明細", scope_label);
            return;
        }

        lines.push(RequirementLine {
            scope_label,
            matched_piece_count: piece_count,
            calculated_quantity: quantity,
            reference_text: chain.reference_text().to_string(),
            attachments: chain.attachments().to_vec(),
        });
    }
}
