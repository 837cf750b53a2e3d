//! 用量計算

use rust_decimal::{Decimal, RoundingStrategy};
use sewing_core::ConsumptionFormula;

/// 需求數量保留的小數位數
pub const QUANTITY_SCALE: u32 = 2;

/// 用量計算器
pub struct ConsumptionResolver;

impl ConsumptionResolver {
    /// 依公式計算需求數量（未捨入）
    ///
    /// 係數為 0 或未設定時返回 `Some(0)`，不論公式為何。
    /// 結果超出 `Decimal` 可表示範圍時返回 `None`。
    pub fn resolve(
        formula: ConsumptionFormula,
        factor: Option<Decimal>,
        piece_count: u64,
    ) -> Option<Decimal> {
        let factor = match factor {
            Some(f) if !f.is_zero() => f,
            _ => return Some(Decimal::ZERO),
        };

        let pieces = Decimal::from(piece_count);
        match formula {
            ConsumptionFormula::PerPiece => pieces.checked_mul(factor),
            ConsumptionFormula::PieceRatio => pieces.checked_div(factor),
        }
    }

    /// 無條件進位到小數第二位：ceil(value × 100) / 100
    pub fn round_up(value: Decimal) -> Decimal {
        value.round_dp_with_strategy(QUANTITY_SCALE, RoundingStrategy::ToPositiveInfinity)
    }

    /// 計算並進位（溢位時返回 `None`）
    pub fn resolve_rounded(
        formula: ConsumptionFormula,
        factor: Option<Decimal>,
        piece_count: u64,
    ) -> Option<Decimal> {
        Self::resolve(formula, factor, piece_count).map(Self::round_up)
    }
}
