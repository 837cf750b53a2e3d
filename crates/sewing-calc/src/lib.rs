//! # Sewing Calculation Engine
//!
//! 物料需求推導引擎：用量計算、覆寫解析、需求推導與預測選取

pub mod consumption;
pub mod derivation;
pub mod forecast;
pub mod overrides;

// Re-export 主要類型
pub use consumption::{ConsumptionResolver, QUANTITY_SCALE};
pub use derivation::{
    DerivationOptions, RequirementEngine, RequirementLine, RequirementResult, GLOBAL_SCOPE_LABEL,
};
pub use forecast::ForecastSelection;
pub use overrides::{EffectiveConsumption, OverrideChain};
