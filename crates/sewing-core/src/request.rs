//! 物料申請草稿

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::techpack::Attachment;

/// 物料申請草稿（由需求預測的已選取行產生，尚未寫入）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialRequestDraft {
    /// 草稿ID
    pub id: Uuid,

    /// 來源訂單ID
    pub order_id: String,

    /// 描述：`<物料名> (<範圍標籤>)`
    pub description: String,

    /// 申請數量
    pub quantity: Decimal,

    /// 單位
    pub unit: String,

    /// 參考附件
    pub attachments: Vec<Attachment>,

    /// 需要日期（沿用訂單交期）
    pub required_by: Option<NaiveDate>,
}

impl MaterialRequestDraft {
    /// 創建新的物料申請草稿
    pub fn new(
        order_id: String,
        item_name: &str,
        scope_label: &str,
        quantity: Decimal,
        unit: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            order_id,
            description: Self::describe(item_name, scope_label),
            quantity,
            unit,
            attachments: Vec::new(),
            required_by: None,
        }
    }

    /// 申請描述格式
    pub fn describe(item_name: &str, scope_label: &str) -> String {
        format!("{} ({})", item_name, scope_label)
    }

    /// 建構器模式：設置附件
    pub fn with_attachments(mut self, attachments: Vec<Attachment>) -> Self {
        self.attachments = attachments;
        self
    }

    /// 建構器模式：設置需要日期
    pub fn with_required_by(mut self, date: Option<NaiveDate>) -> Self {
        self.required_by = date;
        self
    }
}

/// 物料申請寫入端（外部協作者）
pub trait MaterialRequestSink {
    /// 寫入草稿，返回實際建立的筆數
    fn create_requests(
        &mut self,
        drafts: Vec<MaterialRequestDraft>,
    ) -> std::result::Result<usize, Box<dyn std::error::Error + Send + Sync>>;
}
