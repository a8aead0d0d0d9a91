//! 材料庫存視圖

use rust_decimal::Decimal;

use crate::catalog::{Material, MaterialType};

/// 材料庫存狀態
#[derive(Debug, Clone, Copy)]
pub struct MaterialStock<'a> {
    pub material: &'a Material,
    pub material_type: Option<&'a MaterialType>,
}

impl<'a> MaterialStock<'a> {
    pub fn new(material: &'a Material, material_type: Option<&'a MaterialType>) -> Self {
        Self {
            material,
            material_type,
        }
    }

    /// 現有庫存（未記錄時視為 0）
    pub fn quantity_in_stock(&self) -> Decimal {
        self.material.quantity_in_stock.unwrap_or(Decimal::ZERO)
    }

    /// 檢查庫存是否低於最低庫存
    pub fn is_low_stock(&self) -> bool {
        self.quantity_in_stock() < self.material.minimum_quantity
    }

    /// 庫存價值 = 庫存 × 單價
    pub fn stock_value(&self) -> Decimal {
        self.quantity_in_stock() * self.material.unit_price.unwrap_or(Decimal::ZERO)
    }

    pub fn status_label(&self) -> &'static str {
        if self.is_low_stock() {
            "НИЗКИЙ ЗАПАС"
        } else {
            "НОРМА"
        }
    }

    /// 補足到最低庫存所需數量
    pub fn shortage(&self) -> Decimal {
        if self.is_low_stock() {
            self.material.minimum_quantity - self.quantity_in_stock()
        } else {
            Decimal::ZERO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_low_stock() {
        let material = Material::new(1, "Дуб", 1, "м3")
            .with_unit_price(dec!(1500))
            .with_stock(dec!(4), dec!(10));
        let stock = MaterialStock::new(&material, None);

        assert!(stock.is_low_stock());
        assert_eq!(stock.status_label(), "НИЗКИЙ ЗАПАС");
        assert_eq!(stock.shortage(), dec!(6));
        assert_eq!(stock.stock_value(), dec!(6000));
    }

    #[test]
    fn test_normal_stock() {
        let material = Material::new(2, "Клей", 2, "л").with_stock(dec!(10), dec!(10));
        let stock = MaterialStock::new(&material, None);

        assert!(!stock.is_low_stock());
        assert_eq!(stock.status_label(), "НОРМА");
        assert_eq!(stock.shortage(), Decimal::ZERO);
        // 無單價時庫存價值為 0
        assert_eq!(stock.stock_value(), Decimal::ZERO);
    }

    #[test]
    fn test_missing_stock_counts_as_zero() {
        let mut material = Material::new(3, "Лак", 2, "л");
        material.minimum_quantity = dec!(1);
        let stock = MaterialStock::new(&material, None);

        assert_eq!(stock.quantity_in_stock(), Decimal::ZERO);
        assert!(stock.is_low_stock());
    }
}
