//! 三層覆寫解析（項目 → 顏色變體 → 尺碼子變體）

use rust_decimal::Decimal;
use sewing_core::{
    Attachment, ColorVariant, ConsumptionFormula, ConsumptionSpec, SizeVariant, TechPackItem,
};

/// 解析後的有效用量規格
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectiveConsumption {
    pub formula: ConsumptionFormula,
    /// 最具體層級明確設定的係數（全部未設定則為 None，計算時視為 0）
    pub factor: Option<Decimal>,
}

/// 單一需求範圍的覆寫鏈
///
/// 每一層只是一般資料記錄，解析就是由最不具體到最具體的折疊。
#[derive(Debug, Clone, Copy)]
pub struct OverrideChain<'a> {
    item: &'a TechPackItem,
    variant: Option<&'a ColorVariant>,
    size_variant: Option<&'a SizeVariant>,
}

impl<'a> OverrideChain<'a> {
    /// 項目層級（全域需求）
    pub fn item(item: &'a TechPackItem) -> Self {
        Self {
            item,
            variant: None,
            size_variant: None,
        }
    }

    /// 顏色變體層級
    pub fn variant(item: &'a TechPackItem, variant: &'a ColorVariant) -> Self {
        Self {
            item,
            variant: Some(variant),
            size_variant: None,
        }
    }

    /// 尺碼子變體層級
    pub fn size_variant(
        item: &'a TechPackItem,
        variant: &'a ColorVariant,
        size_variant: &'a SizeVariant,
    ) -> Self {
        Self {
            item,
            variant: Some(variant),
            size_variant: Some(size_variant),
        }
    }

    fn consumption_levels(&self) -> [Option<&'a ConsumptionSpec>; 3] {
        [
            self.item.consumption.as_ref(),
            self.variant.and_then(|v| v.consumption.as_ref()),
            self.size_variant.and_then(|s| s.consumption.as_ref()),
        ]
    }

    /// 公式與係數各自獨立解析，最具體者優先
    pub fn consumption(&self) -> EffectiveConsumption {
        let (formula, factor) = self.consumption_levels().into_iter().flatten().fold(
            (None, None),
            |(formula, factor), spec| (spec.formula.or(formula), spec.factor.or(factor)),
        );

        EffectiveConsumption {
            formula: formula.unwrap_or_default(),
            factor,
        }
    }

    /// 參考說明：最具體的非空值
    pub fn reference_text(&self) -> &'a str {
        let levels = [
            self.size_variant.map(|s| s.reference_text.as_str()),
            self.variant.map(|v| v.reference_text.as_str()),
            Some(self.item.reference_text.as_str()),
        ];
        levels
            .into_iter()
            .flatten()
            .find(|text| !text.is_empty())
            .unwrap_or_default()
    }

    /// 附件：最具體的非空清單
    pub fn attachments(&self) -> &'a [Attachment] {
        let levels = [
            self.size_variant.map(|s| s.attachments.as_slice()),
            self.variant.map(|v| v.attachments.as_slice()),
            Some(self.item.attachments.as_slice()),
        ];
        levels
            .into_iter()
            .flatten()
            .find(|attachments| !attachments.is_empty())
            .unwrap_or_default()
    }
}
