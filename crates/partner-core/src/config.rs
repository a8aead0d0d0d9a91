//! 計算與報表配置

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{CalcError, Result};

/// 材料計算配置
///
/// 演示計算使用固定的材料類型與產品參數，對每個訂單行套用一次公式。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CalcConfig {
    /// 演示計算的材料類型ID
    pub demo_material_type_id: i64,

    /// 演示計算的現有庫存（產品單位）
    pub demo_stock_quantity: i64,

    /// 演示計算的產品參數 1
    pub demo_parameter_1: Decimal,

    /// 演示計算的產品參數 2
    pub demo_parameter_2: Decimal,

    /// 報表分隔線寬度
    pub separator_width: usize,

    /// 貨幣後綴
    pub currency: String,

    /// 參考資訊中列出的材料數量上限
    pub reference_material_limit: usize,
}

impl Default for CalcConfig {
    fn default() -> Self {
        Self {
            demo_material_type_id: 1,
            demo_stock_quantity: 0,
            demo_parameter_1: Decimal::new(15, 1),
            demo_parameter_2: Decimal::new(2, 0),
            separator_width: 60,
            currency: "р.".to_string(),
            reference_material_limit: 10,
        }
    }
}

impl CalcConfig {
    /// 創建預設配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 從 JSON 字串載入（缺少的欄位使用預設值）
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| CalcError::Load(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// 建構器模式：設置演示材料類型
    pub fn with_demo_material_type(mut self, material_type_id: i64) -> Self {
        self.demo_material_type_id = material_type_id;
        self
    }

    /// 建構器模式：設置演示庫存
    pub fn with_demo_stock(mut self, stock_quantity: i64) -> Self {
        self.demo_stock_quantity = stock_quantity;
        self
    }

    /// 建構器模式：設置演示產品參數
    pub fn with_demo_parameters(mut self, parameter_1: Decimal, parameter_2: Decimal) -> Self {
        self.demo_parameter_1 = parameter_1;
        self.demo_parameter_2 = parameter_2;
        self
    }

    /// 建構器模式：設置分隔線寬度
    pub fn with_separator_width(mut self, width: usize) -> Self {
        self.separator_width = width;
        self
    }

    /// 建構器模式：設置貨幣後綴
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// 建構器模式：設置參考材料上限
    pub fn with_reference_material_limit(mut self, limit: usize) -> Self {
        self.reference_material_limit = limit;
        self
    }

    /// 報表分隔線
    pub fn separator(&self) -> String {
        "=".repeat(self.separator_width)
    }

    /// 檢查配置是否合理
    pub fn validate(&self) -> Result<()> {
        if self.separator_width == 0 {
            return Err(CalcError::InvalidInput("Ширина разделителя должна быть больше 0".to_string()));
        }
        if self.demo_stock_quantity < 0 {
            return Err(CalcError::InvalidInput("Демонстрационный остаток не может быть отрицательным".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_config() {
        let config = CalcConfig::new();

        assert_eq!(config.demo_material_type_id, 1);
        assert_eq!(config.demo_stock_quantity, 0);
        assert_eq!(config.demo_parameter_1, dec!(1.5));
        assert_eq!(config.demo_parameter_2, dec!(2));
        assert_eq!(config.separator().len(), 60);
        assert_eq!(config.reference_material_limit, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = CalcConfig::new()
            .with_demo_material_type(3)
            .with_demo_stock(5)
            .with_demo_parameters(dec!(2.5), dec!(1.5))
            .with_separator_width(40)
            .with_currency("₽")
            .with_reference_material_limit(3);

        assert_eq!(config.demo_material_type_id, 3);
        assert_eq!(config.demo_stock_quantity, 5);
        assert_eq!(config.demo_parameter_1, dec!(2.5));
        assert_eq!(config.separator(), "=".repeat(40));
        assert_eq!(config.currency, "₽");
        assert_eq!(config.reference_material_limit, 3);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = CalcConfig::from_json_str(r#"{ "separator_width": 30 }"#).unwrap();

        assert_eq!(config.separator_width, 30);
        assert_eq!(config.demo_material_type_id, 1);
        assert_eq!(config.currency, "р.");
    }

    #[test]
    fn test_invalid_config() {
        assert!(CalcConfig::from_json_str(r#"{ "separator_width": 0 }"#).is_err());
        assert!(CalcConfig::new().with_demo_stock(-1).validate().is_err());
    }
}
