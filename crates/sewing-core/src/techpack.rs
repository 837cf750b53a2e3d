//! 技術包（Tech Pack）模型
//!
//! 款式的物料規格：分類 → 欄位項目 → 顏色變體 → 尺碼子變體，
//! 每一層都可覆寫用量公式、參考說明與附件。

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 用量公式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConsumptionFormula {
    /// 每件用量：需求 = 件數 × 係數
    #[default]
    PerPiece,
    /// 件數比：需求 = 件數 ÷ 係數
    PieceRatio,
}

/// 用量規格
///
/// 在變體層級上，兩個欄位都是「未設定則繼承」。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConsumptionSpec {
    /// 公式（未設定時向上層繼承）
    #[serde(default)]
    pub formula: Option<ConsumptionFormula>,

    /// 係數（明確設為 0 也算已設定）
    #[serde(default)]
    pub factor: Option<Decimal>,
}

impl ConsumptionSpec {
    /// 創建完整的用量規格
    pub fn new(formula: ConsumptionFormula, factor: Decimal) -> Self {
        Self {
            formula: Some(formula),
            factor: Some(factor),
        }
    }

    /// 每件用量
    pub fn per_piece(factor: Decimal) -> Self {
        Self::new(ConsumptionFormula::PerPiece, factor)
    }

    /// 件數比
    pub fn piece_ratio(factor: Decimal) -> Self {
        Self::new(ConsumptionFormula::PieceRatio, factor)
    }

    /// 只覆寫係數，公式沿用上層
    pub fn factor_only(factor: Decimal) -> Self {
        Self {
            formula: None,
            factor: Some(factor),
        }
    }

    /// 只覆寫公式，係數沿用上層
    pub fn formula_only(formula: ConsumptionFormula) -> Self {
        Self {
            formula: Some(formula),
            factor: None,
        }
    }
}

/// 附件類型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    Image,
    Document,
}

/// 參考附件
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub name: String,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: AttachmentKind,
}

impl Attachment {
    pub fn new(name: impl Into<String>, url: impl Into<String>, kind: AttachmentKind) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            kind,
        }
    }
}

/// 尺碼子變體
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SizeVariant {
    /// 適用尺碼標籤
    pub sizes: Vec<String>,

    /// 參考說明（空字串表示繼承）
    #[serde(default)]
    pub reference_text: String,

    /// 附件（空表示繼承）
    #[serde(default)]
    pub attachments: Vec<Attachment>,

    #[serde(default)]
    pub consumption: Option<ConsumptionSpec>,
}

impl SizeVariant {
    pub fn new<S: Into<String>>(sizes: impl IntoIterator<Item = S>) -> Self {
        Self {
            sizes: sizes.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// 建構器模式：設置用量規格
    pub fn with_consumption(mut self, spec: ConsumptionSpec) -> Self {
        self.consumption = Some(spec);
        self
    }

    /// 建構器模式：設置參考說明
    pub fn with_reference_text(mut self, text: impl Into<String>) -> Self {
        self.reference_text = text.into();
        self
    }

    /// 建構器模式：設置附件
    pub fn with_attachments(mut self, attachments: Vec<Attachment>) -> Self {
        self.attachments = attachments;
        self
    }

    pub fn covers_size(&self, label: &str) -> bool {
        self.sizes.iter().any(|s| s == label)
    }
}

/// 顏色變體
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ColorVariant {
    /// 適用顏色
    pub colors: Vec<String>,

    #[serde(default)]
    pub reference_text: String,

    #[serde(default)]
    pub attachments: Vec<Attachment>,

    #[serde(default)]
    pub consumption: Option<ConsumptionSpec>,

    /// 尺碼子變體（存在時由子變體決定需求）
    #[serde(default)]
    pub size_variants: Option<Vec<SizeVariant>>,
}

impl ColorVariant {
    pub fn new<S: Into<String>>(colors: impl IntoIterator<Item = S>) -> Self {
        Self {
            colors: colors.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// 建構器模式：設置用量規格
    pub fn with_consumption(mut self, spec: ConsumptionSpec) -> Self {
        self.consumption = Some(spec);
        self
    }

    /// 建構器模式：設置參考說明
    pub fn with_reference_text(mut self, text: impl Into<String>) -> Self {
        self.reference_text = text.into();
        self
    }

    /// 建構器模式：設置附件
    pub fn with_attachments(mut self, attachments: Vec<Attachment>) -> Self {
        self.attachments = attachments;
        self
    }

    /// 建構器模式：設置尺碼子變體
    pub fn with_size_variants(mut self, size_variants: Vec<SizeVariant>) -> Self {
        self.size_variants = Some(size_variants);
        self
    }

    /// 顏色是否屬於此變體（大小寫敏感）
    pub fn covers_color(&self, color: &str) -> bool {
        self.colors.iter().any(|c| c == color)
    }
}

/// 技術包欄位項目（一種物料）
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TechPackItem {
    /// 欄位名稱（物料名）
    pub field_name: String,

    #[serde(default)]
    pub reference_text: String,

    #[serde(default)]
    pub attachments: Vec<Attachment>,

    /// 項目層級用量（無變體時套用於整張訂單數量）
    #[serde(default)]
    pub consumption: Option<ConsumptionSpec>,

    #[serde(default)]
    pub variants: Option<Vec<ColorVariant>>,
}

impl TechPackItem {
    pub fn new(field_name: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            ..Default::default()
        }
    }

    /// 建構器模式：設置用量規格
    pub fn with_consumption(mut self, spec: ConsumptionSpec) -> Self {
        self.consumption = Some(spec);
        self
    }

    /// 建構器模式：設置參考說明
    pub fn with_reference_text(mut self, text: impl Into<String>) -> Self {
        self.reference_text = text.into();
        self
    }

    /// 建構器模式：設置附件
    pub fn with_attachments(mut self, attachments: Vec<Attachment>) -> Self {
        self.attachments = attachments;
        self
    }

    /// 建構器模式：設置顏色變體
    pub fn with_variants(mut self, variants: Vec<ColorVariant>) -> Self {
        self.variants = Some(variants);
        self
    }
}

/// 技術包分類
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TechPackCategory {
    pub name: String,
    #[serde(default)]
    pub items: Vec<TechPackItem>,
}

impl TechPackCategory {
    pub fn new(name: impl Into<String>, items: Vec<TechPackItem>) -> Self {
        Self {
            name: name.into(),
            items,
        }
    }
}

/// 技術包
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TechPack {
    /// 分類（宣告順序即顯示與列印順序）
    #[serde(default)]
    pub categories: Vec<TechPackCategory>,
}

impl TechPack {
    pub fn new(categories: Vec<TechPackCategory>) -> Self {
        Self { categories }
    }

    /// 依宣告順序走訪所有項目
    pub fn items(&self) -> impl Iterator<Item = &TechPackItem> {
        self.categories.iter().flat_map(|c| c.items.iter())
    }
}

/// 款式
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Style {
    /// 款號
    pub style_number: String,

    #[serde(default)]
    pub name: String,

    /// 技術包（可能尚未建立）
    #[serde(default)]
    pub tech_pack: Option<TechPack>,
}

impl Style {
    pub fn new(style_number: impl Into<String>) -> Self {
        Self {
            style_number: style_number.into(),
            name: String::new(),
            tech_pack: None,
        }
    }

    /// 建構器模式：設置款式名稱
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// 建構器模式：設置技術包
    pub fn with_tech_pack(mut self, tech_pack: TechPack) -> Self {
        self.tech_pack = Some(tech_pack);
        self
    }
}
