//! 款式查詢邊界

use std::collections::HashMap;

use crate::techpack::Style;

/// 依款號查詢款式
///
/// 查無款式不是錯誤：呼叫端應視為「沒有連結的技術包」。
pub trait StyleCatalog {
    fn find_by_style_number(&self, style_number: &str) -> Option<Style>;
}

/// 記憶體款式目錄
#[derive(Debug, Clone, Default)]
pub struct InMemoryStyleCatalog {
    styles: HashMap<String, Style>,
}

impl InMemoryStyleCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// 加入（或取代）款式
    pub fn insert(&mut self, style: Style) {
        self.styles.insert(style.style_number.clone(), style);
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

impl FromIterator<Style> for InMemoryStyleCatalog {
    fn from_iter<I: IntoIterator<Item = Style>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for style in iter {
            catalog.insert(style);
        }
        catalog
    }
}

impl StyleCatalog for InMemoryStyleCatalog {
    fn find_by_style_number(&self, style_number: &str) -> Option<Style> {
        self.styles.get(style_number).cloned()
    }
}
