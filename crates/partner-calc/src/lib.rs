//! # Partner Calculation Engine
//!
//! 訂單材料需求與成本計算引擎

pub mod format;
pub mod quantity;
pub mod report;
pub mod requirement;
pub mod summary;

// Re-export 主要類型
pub use quantity::{
    CalculationOutcome, ManualCalculation, MaterialQuantityCalculator, QuantityInput,
};
pub use report::{render_error, render_reference_info, render_request_report};
pub use requirement::{
    LineRequirement, MaterialRequirement, RequestMaterialPlan, RequirementBuilder,
};
pub use summary::{summarize_requests, RequestSummary};

use serde::Serialize;

/// 計劃警告
#[derive(Debug, Clone, Serialize)]
pub struct PlanWarning {
    /// 訂單行號
    pub line_no: usize,
    pub message: String,
    pub severity: WarningSeverity,
}

impl PlanWarning {
    pub fn new(line_no: usize, message: String, severity: WarningSeverity) -> Self {
        Self {
            line_no,
            message,
            severity,
        }
    }

    pub fn info(line_no: usize, message: String) -> Self {
        Self::new(line_no, message, WarningSeverity::Info)
    }

    pub fn warning(line_no: usize, message: String) -> Self {
        Self::new(line_no, message, WarningSeverity::Warning)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WarningSeverity {
    Info,
    Warning,
}
