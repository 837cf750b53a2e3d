//! 需求預測選取

use sewing_core::{
    FloorConfig, MaterialRequestDraft, MaterialRequestSink, Order, Result, SewingError,
};

use crate::derivation::{RequirementLine, RequirementResult};

/// 需求預測選取集
///
/// 每一行需求各有一個選取旗標；建立時預設全選。
#[derive(Debug, Clone)]
pub struct ForecastSelection {
    results: Vec<RequirementResult>,
    selected: Vec<Vec<bool>>,
}

impl ForecastSelection {
    /// 由推導結果建立（全選）
    pub fn new(results: Vec<RequirementResult>) -> Self {
        let selected = results.iter().map(|r| vec![true; r.lines.len()]).collect();
        Self { results, selected }
    }

    /// 推導結果
    pub fn results(&self) -> &[RequirementResult] {
        &self.results
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// 行是否被選取（不存在的行視為未選取）
    pub fn is_selected(&self, item: usize, line: usize) -> bool {
        self.selected
            .get(item)
            .and_then(|lines| lines.get(line))
            .copied()
            .unwrap_or(false)
    }

    fn flag_mut(&mut self, item: usize, line: usize) -> Result<&mut bool> {
        self.selected
            .get_mut(item)
            .and_then(|lines| lines.get_mut(line))
            .ok_or(SewingError::UnknownSelection { item, line })
    }

    /// 切換單行，返回切換後的狀態
    pub fn toggle_line(&mut self, item: usize, line: usize) -> Result<bool> {
        let flag = self.flag_mut(item, line)?;
        *flag = !*flag;
        Ok(*flag)
    }

    /// 設置單行
    pub fn set_line(&mut self, item: usize, line: usize, selected: bool) -> Result<()> {
        *self.flag_mut(item, line)? = selected;
        Ok(())
    }

    /// 設置某物料的所有行
    pub fn set_item(&mut self, item: usize, selected: bool) -> Result<()> {
        let lines = self
            .selected
            .get_mut(item)
            .ok_or(SewingError::UnknownSelection { item, line: 0 })?;
        lines.iter_mut().for_each(|flag| *flag = selected);
        Ok(())
    }

    /// 全選
    pub fn select_all(&mut self) {
        self.set_all(true);
    }

    /// 全部取消
    pub fn clear_all(&mut self) {
        self.set_all(false);
    }

    fn set_all(&mut self, selected: bool) {
        self.selected
            .iter_mut()
            .flat_map(|lines| lines.iter_mut())
            .for_each(|flag| *flag = selected);
    }

    /// 已選取行數
    pub fn selected_count(&self) -> usize {
        self.selected.iter().flatten().filter(|&&flag| flag).count()
    }

    /// 依推導順序列出已選取的行
    pub fn selected_lines(
        &self,
    ) -> impl Iterator<Item = (&RequirementResult, &RequirementLine)> + '_ {
        self.results
            .iter()
            .zip(&self.selected)
            .flat_map(|(result, flags)| {
                result
                    .lines
                    .iter()
                    .zip(flags)
                    .filter(|(_, flag)| **flag)
                    .map(move |(line, _)| (result, line))
            })
    }

    /// 將已選取的行轉成物料申請草稿
    ///
    /// 沒有任何選取時返回 [`SewingError::EmptySelection`]，不產生部分結果。
    pub fn materialize(
        &self,
        order: &Order,
        config: &FloorConfig,
    ) -> Result<Vec<MaterialRequestDraft>> {
        if self.selected_count() == 0 {
            return Err(SewingError::EmptySelection);
        }

        Ok(self
            .selected_lines()
            .map(|(result, line)| {
                MaterialRequestDraft::new(
                    order.id.clone(),
                    &result.item_name,
                    &line.scope_label,
                    line.calculated_quantity,
                    config.material_unit.clone(),
                )
                .with_attachments(line.attachments.clone())
                .with_required_by(order.delivery_date)
            })
            .collect())
    }

    /// 驗證、產生草稿並交給寫入端
    ///
    /// 寫入端失敗時返回 [`SewingError::Persistence`]；選取狀態不受影響，可重試。
    pub fn submit<S: MaterialRequestSink + ?Sized>(
        &self,
        order: &Order,
        config: &FloorConfig,
        sink: &mut S,
    ) -> Result<usize> {
        let drafts = self.materialize(order, config)?;
        let count = drafts.len();

        tracing::info!("訂單 {} 建立物料申請 {} 筆", order.id, count);

        sink.create_requests(drafts).map_err(|e| {
            tracing::warn!("訂單 {} 物料申請寫入失敗: {}", order.id, e);
            SewingError::Persistence(e.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use sewing_core::{Attachment, AttachmentKind};

    fn line(label: &str, quantity: i64) -> RequirementLine {
        RequirementLine {
            scope_label: label.to_string(),
            matched_piece_count: quantity as u64,
            calculated_quantity: Decimal::from(quantity),
            reference_text: String::new(),
            attachments: Vec::new(),
        }
    }

    fn sample_selection() -> ForecastSelection {
        let mut zipper_red = line("Color: Red", 30);
        zipper_red.attachments = vec![Attachment::new(
            "zip.png",
            "https://cdn/zip.png",
            AttachmentKind::Image,
        )];

        ForecastSelection::new(vec![
            RequirementResult {
                item_name: "Zipper".to_string(),
                total: Decimal::from(35),
                lines: vec![zipper_red, line("Color: Blue", 5)],
            },
            RequirementResult {
                item_name: "Hang Tag".to_string(),
                total: Decimal::from(35),
                lines: vec![line("Global Requirement", 35)],
            },
        ])
    }

    fn order() -> Order {
        Order::new("ORD-9", "ST-9", 35)
            .with_delivery_date(NaiveDate::from_ymd_opt(2025, 11, 30).unwrap())
    }

    struct RecordingSink {
        created: Vec<MaterialRequestDraft>,
        fail: bool,
    }

    impl MaterialRequestSink for RecordingSink {
        fn create_requests(
            &mut self,
            drafts: Vec<MaterialRequestDraft>,
        ) -> std::result::Result<usize, Box<dyn std::error::Error + Send + Sync>> {
            if self.fail {
                return Err("connection reset".into());
            }
            let count = drafts.len();
            self.created.extend(drafts);
            Ok(count)
        }
    }

    #[test]
    fn test_starts_fully_selected() {
        let selection = sample_selection();

        assert_eq!(selection.selected_count(), 3);
        assert!(selection.is_selected(0, 1));
        assert!(!selection.is_selected(5, 0));
    }

    #[test]
    fn test_toggle_and_bulk_operations() {
        let mut selection = sample_selection();

        assert!(!selection.toggle_line(0, 1).unwrap());
        assert_eq!(selection.selected_count(), 2);

        selection.set_item(1, false).unwrap();
        assert_eq!(selection.selected_count(), 1);

        selection.clear_all();
        assert_eq!(selection.selected_count(), 0);

        selection.select_all();
        assert_eq!(selection.selected_count(), 3);

        selection.set_line(1, 0, false).unwrap();
        assert!(!selection.is_selected(1, 0));
    }

    #[test]
    fn test_unknown_line_is_rejected() {
        let mut selection = sample_selection();

        assert!(matches!(
            selection.toggle_line(0, 7),
            Err(SewingError::UnknownSelection { item: 0, line: 7 })
        ));
        assert!(selection.set_item(4, true).is_err());
    }

    #[test]
    fn test_materialize_selected_lines() {
        let mut selection = sample_selection();
        selection.toggle_line(0, 1).unwrap();

        let config = FloorConfig::new().with_material_unit("roll");
        let drafts = selection.materialize(&order(), &config).unwrap();

        assert_eq!(drafts.len(), 2);
        assert_eq!(drafts[0].description, "Zipper (Color: Red)");
        assert_eq!(drafts[0].quantity, Decimal::from(30));
        assert_eq!(drafts[0].unit, "roll");
        assert_eq!(drafts[0].attachments.len(), 1);
        assert_eq!(drafts[0].order_id, "ORD-9");
        assert_eq!(drafts[0].required_by, NaiveDate::from_ymd_opt(2025, 11, 30));
        assert_eq!(drafts[1].description, "Hang Tag (Global Requirement)");
    }

    #[test]
    fn test_empty_selection_is_rejected() {
        let mut selection = sample_selection();
        selection.clear_all();

        let err = selection.materialize(&order(), &FloorConfig::new()).unwrap_err();
        assert!(matches!(err, SewingError::EmptySelection));

        let mut sink = RecordingSink { created: Vec::new(), fail: false };
        assert!(selection.submit(&order(), &FloorConfig::new(), &mut sink).is_err());
        assert!(sink.created.is_empty());
    }

    #[test]
    fn test_submit_and_persistence_failure() {
        let selection = sample_selection();
        let config = FloorConfig::new();

        let mut sink = RecordingSink { created: Vec::new(), fail: false };
        assert_eq!(selection.submit(&order(), &config, &mut sink).unwrap(), 3);
        assert_eq!(sink.created.len(), 3);

        let mut failing = RecordingSink { created: Vec::new(), fail: true };
        let err = selection.submit(&order(), &config, &mut failing).unwrap_err();
        assert!(matches!(err, SewingError::Persistence(ref msg) if msg == "connection reset"));

        // 失敗後仍可重試
        assert_eq!(selection.selected_count(), 3);
        assert_eq!(selection.submit(&order(), &config, &mut sink).unwrap(), 3);
    }
}
