//! 車間配置

use serde::{Deserialize, Serialize};

use crate::breakdown::SizeFormat;
use crate::order::Order;
use crate::{Result, SewingError};

fn default_material_unit() -> String {
    "pcs".to_string()
}

/// 車間配置（注入到查詢邊界，取代全域的「目前單位」常數）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorConfig {
    /// 可見的車縫單位（None 表示全部）
    #[serde(default)]
    pub unit_id: Option<String>,

    /// 物料申請預設單位
    #[serde(default = "default_material_unit")]
    pub material_unit: String,

    /// 子變體比對時的尺碼標籤格式覆寫
    ///
    /// 預設 None：使用訂單本身的 `size_format`。
    #[serde(default)]
    pub size_label_format: Option<SizeFormat>,
}

impl FloorConfig {
    /// 創建預設配置
    pub fn new() -> Self {
        Self {
            unit_id: None,
            material_unit: default_material_unit(),
            size_label_format: None,
        }
    }

    /// 從 JSON 載入配置
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: FloorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// 建構器模式：設置車縫單位
    pub fn with_unit_id(mut self, unit_id: impl Into<String>) -> Self {
        self.unit_id = Some(unit_id.into());
        self
    }

    /// 建構器模式：設置物料單位
    pub fn with_material_unit(mut self, unit: impl Into<String>) -> Self {
        self.material_unit = unit.into();
        self
    }

    /// 建構器模式：設置尺碼標籤格式覆寫
    pub fn with_size_label_format(mut self, format: SizeFormat) -> Self {
        self.size_label_format = Some(format);
        self
    }

    /// 檢查配置
    pub fn validate(&self) -> Result<()> {
        if self.material_unit.trim().is_empty() {
            return Err(SewingError::Config("material_unit 不可為空".to_string()));
        }
        if matches!(&self.unit_id, Some(id) if id.trim().is_empty()) {
            return Err(SewingError::Config("unit_id 不可為空字串".to_string()));
        }
        Ok(())
    }

    /// 訂單是否屬於本單位
    pub fn is_visible(&self, order: &Order) -> bool {
        match &self.unit_id {
            None => true,
            Some(unit) => order.unit_id.as_deref() == Some(unit.as_str()),
        }
    }

    /// 過濾出本單位可見的訂單
    pub fn visible_orders<'a>(&self, orders: &'a [Order]) -> Vec<&'a Order> {
        orders.iter().filter(|o| self.is_visible(o)).collect()
    }
}

impl Default for FloorConfig {
    fn default() -> Self {
        Self::new()
    }
}
