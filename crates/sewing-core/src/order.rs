//! 車縫訂單模型

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::breakdown::{BreakdownMatrix, SizeBreakdownRow, SizeFormat};

/// 款號參照中的限定詞分隔符
const STYLE_QUALIFIER_SEPARATOR: &str = " - ";

/// 車縫訂單（由外部讀取層提供，核心只讀）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// 訂單ID
    pub id: String,

    /// 款號參照（可能帶 " - " 之後的限定詞）
    pub style_ref: String,

    /// 訂單總數量
    pub quantity: u64,

    /// 顏色/尺碼分配
    #[serde(default)]
    pub size_breakdown: Vec<SizeBreakdownRow>,

    /// 尺碼格式
    #[serde(default)]
    pub size_format: SizeFormat,

    /// 所屬車縫單位
    #[serde(default)]
    pub unit_id: Option<String>,

    /// 交期
    #[serde(default)]
    pub delivery_date: Option<NaiveDate>,
}

impl Order {
    /// 創建新的訂單
    pub fn new(id: impl Into<String>, style_ref: impl Into<String>, quantity: u64) -> Self {
        Self {
            id: id.into(),
            style_ref: style_ref.into(),
            quantity,
            size_breakdown: Vec::new(),
            size_format: SizeFormat::Standard,
            unit_id: None,
            delivery_date: None,
        }
    }

    /// 建構器模式：設置尺碼分配
    pub fn with_size_breakdown(mut self, rows: Vec<SizeBreakdownRow>) -> Self {
        self.size_breakdown = rows;
        self
    }

    /// 建構器模式：設置尺碼格式
    pub fn with_size_format(mut self, format: SizeFormat) -> Self {
        self.size_format = format;
        self
    }

    /// 建構器模式：設置車縫單位
    pub fn with_unit_id(mut self, unit_id: impl Into<String>) -> Self {
        self.unit_id = Some(unit_id.into());
        self
    }

    /// 建構器模式：設置交期
    pub fn with_delivery_date(mut self, date: NaiveDate) -> Self {
        self.delivery_date = Some(date);
        self
    }

    /// 識別款式用的款號（去掉 " - " 之後的限定詞）
    pub fn style_number(&self) -> &str {
        self.style_ref
            .split(STYLE_QUALIFIER_SEPARATOR)
            .next()
            .unwrap_or_default()
            .trim()
    }

    /// 分配矩陣總和（可能與 `quantity` 不同）
    pub fn breakdown_total(&self) -> u64 {
        BreakdownMatrix::grand_total(&self.size_breakdown)
    }
}
