//! # Sewing MRP
//!
//! 縫製車間物料需求：核心模型與推導引擎的統一入口

pub use rust_decimal::Decimal;
pub use sewing_calc as calc;
pub use sewing_core as model;

pub use sewing_calc::{
    ConsumptionResolver, DerivationOptions, ForecastSelection, RequirementEngine, RequirementLine,
    RequirementResult,
};
pub use sewing_core::{
    BreakdownMatrix, FloorConfig, Order, SewingError, SizeBreakdownRow, SizeBucket, SizeFormat,
    Style, StyleCatalog, TechPack,
};
