//! 材料數量計算

use partner_core::{CalcError, Catalog, Result};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 材料數量計算輸入
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityInput {
    /// 產品類型ID
    pub product_type_id: i64,

    /// 材料類型ID
    pub material_type_id: i64,

    /// 需要的產品數量
    pub required_quantity: i64,

    /// 倉庫中已有的產品數量
    pub stock_quantity: i64,

    /// 產品參數 1（正數）
    pub parameter_1: Decimal,

    /// 產品參數 2（正數）
    pub parameter_2: Decimal,
}

impl QuantityInput {
    /// 創建新的計算輸入，產品參數預設為 1
    pub fn new(
        product_type_id: i64,
        material_type_id: i64,
        required_quantity: i64,
        stock_quantity: i64,
    ) -> Self {
        Self {
            product_type_id,
            material_type_id,
            required_quantity,
            stock_quantity,
            parameter_1: Decimal::ONE,
            parameter_2: Decimal::ONE,
        }
    }

    /// 建構器模式：設置產品參數
    pub fn with_parameters(mut self, parameter_1: Decimal, parameter_2: Decimal) -> Self {
        self.parameter_1 = parameter_1;
        self.parameter_2 = parameter_2;
        self
    }

    /// 檢查輸入參數
    pub fn validate(&self) -> Result<()> {
        if self.required_quantity <= 0 {
            return Err(CalcError::InvalidInput(format!(
                "требуемое количество должно быть положительным: {}",
                self.required_quantity
            )));
        }
        if self.stock_quantity < 0 {
            return Err(CalcError::InvalidInput(format!(
                "количество на складе не может быть отрицательным: {}",
                self.stock_quantity
            )));
        }
        if self.parameter_1 <= Decimal::ZERO || self.parameter_2 <= Decimal::ZERO {
            return Err(CalcError::InvalidInput(format!(
                "параметры продукции должны быть положительными: {} / {}",
                self.parameter_1, self.parameter_2
            )));
        }
        Ok(())
    }

    /// 需要生產的數量（扣除庫存，不低於 0）
    pub fn production_quantity(&self) -> i64 {
        self.required_quantity
            .saturating_sub(self.stock_quantity)
            .max(0)
    }
}

/// 材料數量計算器
pub struct MaterialQuantityCalculator<'a> {
    catalog: &'a Catalog,
}

impl<'a> MaterialQuantityCalculator<'a> {
    /// 創建新的計算器
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// 計算生產所需的材料數量（整數單位，向上取整）
    ///
    /// 全部產品已有庫存時回傳 0。
    pub fn calculate(&self, input: &QuantityInput) -> Result<u64> {
        input.validate()?;

        let product_type = self
            .catalog
            .product_type(input.product_type_id)
            .ok_or(CalcError::ProductTypeNotFound(input.product_type_id))?;
        let coefficient = product_type
            .coefficient
            .ok_or(CalcError::MissingCoefficient(product_type.id))?;

        let material_type = self
            .catalog
            .material_type(input.material_type_id)
            .ok_or(CalcError::MaterialTypeNotFound(input.material_type_id))?;
        let loss_multiplier = material_type.loss_multiplier()?;

        let production = input.production_quantity();
        tracing::debug!(
            "Расчет материала: тип продукции {}, тип материала {}, к производству {}",
            product_type.id,
            material_type.id,
            production
        );

        material_units(
            production,
            input.parameter_1,
            input.parameter_2,
            coefficient,
            loss_multiplier,
        )
    }

    /// 相容舊介面的整數結果：錯誤時回傳 -1
    pub fn calculate_or_sentinel(&self, input: &QuantityInput) -> i64 {
        to_sentinel(&self.calculate(input))
    }
}

/// 材料數量公式
///
/// `ceil(production × p1 × p2 × coefficient × loss_multiplier)`
pub fn material_units(
    production: i64,
    parameter_1: Decimal,
    parameter_2: Decimal,
    coefficient: Decimal,
    loss_multiplier: Decimal,
) -> Result<u64> {
    if production <= 0 {
        return Ok(0);
    }

    let overflow = || CalcError::Overflow(format!("расчет материала для {} ед. продукции", production));

    let per_unit = parameter_1
        .checked_mul(parameter_2)
        .and_then(|v| v.checked_mul(coefficient))
        .ok_or_else(overflow)?;
    let effective_per_unit = per_unit.checked_mul(loss_multiplier).ok_or_else(overflow)?;
    let total = Decimal::from(production)
        .checked_mul(effective_per_unit)
        .ok_or_else(overflow)?
        .ceil();

    if total < Decimal::ZERO {
        return Err(CalcError::InvalidInput(format!("отрицательное количество материала: {}", total)));
    }
    total.to_u64().ok_or_else(overflow)
}

/// 將計算結果轉為整數哨兵值（錯誤為 -1）
pub fn to_sentinel(result: &Result<u64>) -> i64 {
    match result {
        Ok(units) => i64::try_from(*units).unwrap_or(-1),
        Err(_) => -1,
    }
}

/// 手動計算結果分類
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalculationOutcome {
    /// 資料無效或找不到類型
    Failed(CalcError),
    /// 全部產品已有庫存
    AllInStock,
    /// 計算成功
    Calculated(u64),
}

impl CalculationOutcome {
    pub fn from_result(result: Result<u64>) -> Self {
        match result {
            Ok(0) => CalculationOutcome::AllInStock,
            Ok(units) => CalculationOutcome::Calculated(units),
            Err(e) => CalculationOutcome::Failed(e),
        }
    }

    /// 材料單位數（錯誤時為 -1）
    pub fn units(&self) -> i64 {
        match self {
            CalculationOutcome::Failed(_) => -1,
            CalculationOutcome::AllInStock => 0,
            CalculationOutcome::Calculated(units) => i64::try_from(*units).unwrap_or(-1),
        }
    }

    pub fn status_message(&self) -> String {
        match self {
            CalculationOutcome::Failed(e) => format!("Ошибка: неверные данные или типы не найдены ({})", e),
            CalculationOutcome::AllInStock => "Вся продукция уже на складе".to_string(),
            CalculationOutcome::Calculated(_) => "Расчет выполнен успешно".to_string(),
        }
    }
}

/// 手動計算表單狀態
#[derive(Debug, Clone)]
pub struct ManualCalculation {
    pub input: QuantityInput,
    pub outcome: Option<CalculationOutcome>,
}

impl Default for ManualCalculation {
    fn default() -> Self {
        Self {
            input: QuantityInput::new(1, 1, 100, 0),
            outcome: None,
        }
    }
}

impl ManualCalculation {
    pub fn new() -> Self {
        Self::default()
    }

    /// 執行計算並記錄結果
    pub fn calculate(&mut self, catalog: &Catalog) -> &CalculationOutcome {
        let result = MaterialQuantityCalculator::new(catalog).calculate(&self.input);
        self.outcome.insert(CalculationOutcome::from_result(result))
    }

    /// 狀態訊息（尚未計算時提示輸入）
    pub fn status_message(&self) -> String {
        self.outcome
            .as_ref()
            .map(CalculationOutcome::status_message)
            .unwrap_or_else(|| "Введите данные".to_string())
    }

    /// 恢復預設輸入並清除結果
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
