//! 合作夥伴訂單模型

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{CalcError, Result};

/// 訂單狀態常量
pub struct RequestStatus;

impl RequestStatus {
    /// 新訂單的預設狀態
    pub const NEW: &'static str = "Новая";
}

/// 訂單行
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestProduct {
    /// 產品ID
    pub product_id: i64,

    /// 訂購數量
    pub quantity: i64,

    /// 單價
    pub unit_price: Decimal,
}

impl RequestProduct {
    pub fn new(product_id: i64, quantity: i64, unit_price: Decimal) -> Self {
        Self {
            product_id,
            quantity,
            unit_price,
        }
    }

    /// 行合計 = 數量 × 單價
    pub fn line_total(&self) -> Result<Decimal> {
        Decimal::from(self.quantity)
            .checked_mul(self.unit_price)
            .ok_or_else(|| {
                CalcError::Overflow(format!("сумма по продукции {}", self.product_id))
            })
    }
}

/// 合作夥伴訂單
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartnerRequest {
    /// 訂單ID
    pub id: i64,

    /// 合作夥伴ID
    pub partner_id: i64,

    /// 訂單日期
    pub request_date: NaiveDate,

    /// 狀態
    #[serde(default = "default_status")]
    pub status: String,

    /// 訂單行
    #[serde(default)]
    pub items: Vec<RequestProduct>,
}

fn default_status() -> String {
    RequestStatus::NEW.to_string()
}

impl PartnerRequest {
    /// 創建新的訂單（預設狀態，無訂單行）
    pub fn new(id: i64, partner_id: i64, request_date: NaiveDate) -> Self {
        Self {
            id,
            partner_id,
            request_date,
            status: default_status(),
            items: Vec::new(),
        }
    }

    /// 建構器模式：設置狀態
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// 建構器模式：添加訂單行（不合併、不驗證）
    pub fn with_item(mut self, item: RequestProduct) -> Self {
        self.items.push(item);
        self
    }

    /// 訂單編號，例如 `З-0007`
    pub fn request_number(&self) -> String {
        format!("З-{:04}", self.id)
    }

    /// 訂單總金額
    pub fn total_cost(&self) -> Result<Decimal> {
        self.items.iter().try_fold(Decimal::ZERO, |total, item| {
            total
                .checked_add(item.line_total()?)
                .ok_or_else(|| CalcError::Overflow(format!("сумма заявки {}", self.request_number())))
        })
    }

    pub fn products_count(&self) -> usize {
        self.items.len()
    }

    /// 添加產品
    ///
    /// 同一產品已存在時累加數量，不新增訂單行。
    pub fn add_item(&mut self, product_id: i64, quantity: i64, unit_price: Decimal) -> Result<()> {
        if quantity <= 0 {
            return Err(CalcError::InvalidInput(format!(
                "количество должно быть целым положительным числом: {}",
                quantity
            )));
        }

        match self.items.iter_mut().find(|i| i.product_id == product_id) {
            Some(existing) => {
                existing.quantity = existing.quantity.checked_add(quantity).ok_or_else(|| {
                    CalcError::Overflow(format!("количество продукции {}", product_id))
                })?;
            }
            None => self
                .items
                .push(RequestProduct::new(product_id, quantity, unit_price)),
        }
        Ok(())
    }

    /// 移除產品
    pub fn remove_item(&mut self, product_id: i64) -> Option<RequestProduct> {
        let index = self.items.iter().position(|i| i.product_id == product_id)?;
        Some(self.items.remove(index))
    }

    /// 驗證訂單，一次回報全部問題
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        if self.partner_id == 0 {
            errors.push("• Необходимо выбрать партнера".to_string());
        }
        if self.items.is_empty() {
            errors.push("• Необходимо добавить хотя бы одну позицию продукции".to_string());
        }
        for item in &self.items {
            if item.unit_price < Decimal::ZERO {
                errors.push(format!("• Стоимость продукции {} не может быть отрицательной", item.product_id));
            }
            if item.quantity <= 0 {
                errors.push(format!("• Количество продукции {} должно быть положительным числом", item.product_id));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(CalcError::Validation(errors))
        }
    }
}
