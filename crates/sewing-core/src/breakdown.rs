//! 尺碼/顏色分配矩陣

use serde::{Deserialize, Serialize};

/// 尺碼桶數量（固定 6 格）
pub const BUCKET_COUNT: usize = 6;

/// 尺碼桶
///
/// 桶鍵與標籤格式無關：同一數量永遠落在同一個桶，
/// 標籤（`S` 或 `65`）只取決於 [`SizeFormat`]。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeBucket {
    S,
    M,
    L,
    Xl,
    Xxl,
    Xxxl,
}

impl SizeBucket {
    /// 依固定順序列出所有桶
    pub const ALL: [SizeBucket; BUCKET_COUNT] = [
        SizeBucket::S,
        SizeBucket::M,
        SizeBucket::L,
        SizeBucket::Xl,
        SizeBucket::Xxl,
        SizeBucket::Xxxl,
    ];

    /// 桶在矩陣中的欄位索引
    pub fn index(self) -> usize {
        self as usize
    }

    /// 依尺碼格式取得顯示標籤
    pub fn label(self, format: SizeFormat) -> &'static str {
        format.labels()[self.index()]
    }
}

/// 訂單尺碼格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeFormat {
    /// 字母尺碼：S, M, L, XL, XXL, 3XL
    #[default]
    Standard,
    /// 數字尺碼：65 ~ 90
    Numeric,
}

impl SizeFormat {
    const STANDARD_LABELS: [&'static str; BUCKET_COUNT] = ["S", "M", "L", "XL", "XXL", "3XL"];
    const NUMERIC_LABELS: [&'static str; BUCKET_COUNT] = ["65", "70", "75", "80", "85", "90"];

    /// 此格式下 6 個桶的標籤
    pub fn labels(self) -> &'static [&'static str; BUCKET_COUNT] {
        match self {
            SizeFormat::Standard => &Self::STANDARD_LABELS,
            SizeFormat::Numeric => &Self::NUMERIC_LABELS,
        }
    }
}

/// 單一顏色的尺碼分配
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeBreakdownRow {
    /// 顏色
    pub color: String,

    /// 各尺碼桶數量（未設定視為 0）
    #[serde(default)]
    pub quantities: [u32; BUCKET_COUNT],
}

impl SizeBreakdownRow {
    /// 創建空白分配行
    pub fn new(color: impl Into<String>) -> Self {
        Self {
            color: color.into(),
            quantities: [0; BUCKET_COUNT],
        }
    }

    /// 建構器模式：設置某尺碼桶數量
    pub fn with_quantity(mut self, bucket: SizeBucket, quantity: u32) -> Self {
        self.quantities[bucket.index()] = quantity;
        self
    }

    /// 獲取某尺碼桶數量
    pub fn quantity(&self, bucket: SizeBucket) -> u32 {
        self.quantities[bucket.index()]
    }

    /// 行合計（6 個桶總和）
    pub fn total(&self) -> u64 {
        self.quantities.iter().map(|&q| u64::from(q)).sum()
    }
}

/// 分配矩陣計算器
pub struct BreakdownMatrix;

impl BreakdownMatrix {
    /// 欄合計：所有行在某尺碼桶的總和
    pub fn column_total(rows: &[SizeBreakdownRow], bucket: SizeBucket) -> u64 {
        rows.iter().map(|r| u64::from(r.quantity(bucket))).sum()
    }

    /// 矩陣總和
    pub fn grand_total(rows: &[SizeBreakdownRow]) -> u64 {
        rows.iter().map(SizeBreakdownRow::total).sum()
    }

    /// 選取合計
    ///
    /// 加總所有「行被選取 或 桶被選取」的格子（聯集，非交集），
    /// 交叉格只計一次。超出範圍的行索引會被忽略。
    pub fn selection_total(
        rows: &[SizeBreakdownRow],
        selected_rows: &[usize],
        selected_buckets: &[SizeBucket],
    ) -> u64 {
        rows.iter()
            .enumerate()
            .flat_map(move |(row_idx, row)| {
                let row_selected = selected_rows.contains(&row_idx);
                SizeBucket::ALL.into_iter().filter_map(move |bucket| {
                    (row_selected || selected_buckets.contains(&bucket))
                        .then(|| u64::from(row.quantity(bucket)))
                })
            })
            .sum()
    }
}
