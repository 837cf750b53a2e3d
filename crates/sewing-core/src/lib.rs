//! # Sewing Core
//!
//! 縫製車間核心資料模型與類型定義

pub mod breakdown;
pub mod catalog;
pub mod config;
pub mod order;
pub mod request;
pub mod techpack;

// Re-export 主要類型
pub use breakdown::{BreakdownMatrix, SizeBreakdownRow, SizeBucket, SizeFormat, BUCKET_COUNT};
pub use catalog::{InMemoryStyleCatalog, StyleCatalog};
pub use config::FloorConfig;
pub use order::Order;
pub use request::{MaterialRequestDraft, MaterialRequestSink};
pub use techpack::{
    Attachment, AttachmentKind, ColorVariant, ConsumptionFormula, ConsumptionSpec, SizeVariant,
    Style, TechPack, TechPackCategory, TechPackItem,
};

/// 縫製 MRP 錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum SewingError {
    #[error("未選擇任何需求項目，無法建立物料申請")]
    EmptySelection,

    #[error("找不到需求行: 項目 {item}, 行 {line}")]
    UnknownSelection { item: usize, line: usize },

    #[error("配置錯誤: {0}")]
    Config(String),

    #[error("配置解析失敗: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("物料申請寫入失敗: {0}")]
    Persistence(String),
}

pub type Result<T> = std::result::Result<T, SewingError>;
