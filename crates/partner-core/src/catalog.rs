//! 參考資料目錄（產品類型、材料類型、材料、產品、物料清單）

use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::partner::{Partner, RecommendationRule};
use crate::request::PartnerRequest;
use crate::stock::MaterialStock;
use crate::{CalcError, Result};

/// 產品類型
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductType {
    /// 產品類型ID
    pub id: i64,

    /// 名稱
    pub name: String,

    /// 產品類型係數
    #[serde(default)]
    pub coefficient: Option<Decimal>,
}

impl ProductType {
    /// 創建新的產品類型
    pub fn new(id: i64, name: impl Into<String>, coefficient: Decimal) -> Self {
        Self {
            id,
            name: name.into(),
            coefficient: Some(coefficient),
        }
    }
}

/// 材料類型
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialType {
    /// 材料類型ID
    pub id: i64,

    /// 名稱
    pub name: String,

    /// 原料損耗率（小數，0.05 代表 5%）
    #[serde(default)]
    pub loss_percentage: Option<Decimal>,
}

impl MaterialType {
    /// 創建新的材料類型
    pub fn new(id: i64, name: impl Into<String>, loss_percentage: Decimal) -> Self {
        Self {
            id,
            name: name.into(),
            loss_percentage: Some(loss_percentage),
        }
    }

    /// 損耗放大倍數 (1 + 損耗率)
    pub fn loss_multiplier(&self) -> Result<Decimal> {
        let loss = self
            .loss_percentage
            .ok_or(CalcError::MissingLossPercentage(self.id))?;
        Decimal::ONE.checked_add(loss).ok_or_else(|| {
            CalcError::Overflow(format!("процент потерь типа материала {}", self.id))
        })
    }
}

/// 材料
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Material {
    /// 材料ID
    pub id: i64,

    /// 名稱
    pub name: String,

    /// 材料類型ID
    pub material_type_id: i64,

    /// 計量單位
    pub unit_measurement: String,

    /// 單價
    #[serde(default)]
    pub unit_price: Option<Decimal>,

    /// 現有庫存
    #[serde(default)]
    pub quantity_in_stock: Option<Decimal>,

    /// 最低庫存
    #[serde(default)]
    pub minimum_quantity: Decimal,

    /// 每包數量
    #[serde(default)]
    pub quantity_per_package: Decimal,
}

impl Material {
    /// 創建新的材料
    pub fn new(
        id: i64,
        name: impl Into<String>,
        material_type_id: i64,
        unit_measurement: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            material_type_id,
            unit_measurement: unit_measurement.into(),
            unit_price: None,
            quantity_in_stock: None,
            minimum_quantity: Decimal::ZERO,
            quantity_per_package: Decimal::ZERO,
        }
    }

    /// 建構器模式：設置單價
    pub fn with_unit_price(mut self, price: Decimal) -> Self {
        self.unit_price = Some(price);
        self
    }

    /// 建構器模式：設置庫存與最低庫存
    pub fn with_stock(mut self, in_stock: Decimal, minimum: Decimal) -> Self {
        self.quantity_in_stock = Some(in_stock);
        self.minimum_quantity = minimum;
        self
    }

    /// 建構器模式：設置每包數量
    pub fn with_quantity_per_package(mut self, qty: Decimal) -> Self {
        self.quantity_per_package = qty;
        self
    }
}

/// 產品
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// 產品ID
    pub id: i64,

    /// 產品類型ID
    pub product_type_id: i64,

    /// 名稱
    pub name: String,

    /// 貨號
    pub article: String,

    /// 合作夥伴最低售價
    #[serde(default)]
    pub min_partner_price: Decimal,
}

impl Product {
    /// 創建新的產品
    pub fn new(
        id: i64,
        product_type_id: i64,
        name: impl Into<String>,
        article: impl Into<String>,
        min_partner_price: Decimal,
    ) -> Self {
        Self {
            id,
            product_type_id,
            name: name.into(),
            article: article.into(),
            min_partner_price,
        }
    }
}

/// 物料清單行：每單位產品所需的材料數量
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductMaterial {
    pub product_id: i64,
    pub material_id: i64,
    pub quantity: Decimal,
}

impl ProductMaterial {
    pub fn new(product_id: i64, material_id: i64, quantity: Decimal) -> Self {
        Self {
            product_id,
            material_id,
            quantity,
        }
    }
}

/// 唯讀資料目錄
///
/// 計算引擎只讀取此目錄，從不修改其中的參考資料。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalog {
    pub product_types: Vec<ProductType>,
    pub material_types: Vec<MaterialType>,
    pub materials: Vec<Material>,
    pub products: Vec<Product>,
    pub product_materials: Vec<ProductMaterial>,
    pub partners: Vec<Partner>,
    pub requests: Vec<PartnerRequest>,
}

impl Catalog {
    /// 創建空目錄
    pub fn new() -> Self {
        Self::default()
    }

    /// 從 JSON 字串載入
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| CalcError::Load(e.to_string()))
    }

    /// 從 JSON 檔案載入
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| CalcError::Load(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&content)
    }

    pub fn product_type(&self, id: i64) -> Option<&ProductType> {
        self.product_types.iter().find(|pt| pt.id == id)
    }

    pub fn material_type(&self, id: i64) -> Option<&MaterialType> {
        self.material_types.iter().find(|mt| mt.id == id)
    }

    pub fn material(&self, id: i64) -> Option<&Material> {
        self.materials.iter().find(|m| m.id == id)
    }

    pub fn product(&self, id: i64) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn partner(&self, id: i64) -> Option<&Partner> {
        self.partners.iter().find(|p| p.id == id)
    }

    pub fn request(&self, id: i64) -> Option<&PartnerRequest> {
        self.requests.iter().find(|r| r.id == id)
    }

    /// 材料所屬的材料類型
    pub fn material_type_of(&self, material: &Material) -> Option<&MaterialType> {
        self.material_type(material.material_type_id)
    }

    /// 產品所屬的產品類型
    pub fn product_type_of(&self, product: &Product) -> Option<&ProductType> {
        self.product_type(product.product_type_id)
    }

    /// 產品的物料清單（保持插入順序）
    pub fn materials_for_product(&self, product_id: i64) -> Vec<&ProductMaterial> {
        self.product_materials
            .iter()
            .filter(|pm| pm.product_id == product_id)
            .collect()
    }

    /// 依合作夥伴評級推薦產品
    ///
    /// 找不到合作夥伴時回傳全部產品。
    pub fn recommended_products(&self, partner_id: i64) -> Vec<&Product> {
        let rule = self
            .partner(partner_id)
            .map(Partner::recommendation_rule)
            .unwrap_or(RecommendationRule::All);

        self.products
            .iter()
            .filter(|p| rule.allows(p.product_type_id))
            .collect()
    }

    /// 依名稱、貨號或產品類型名稱搜尋產品（不分大小寫）
    pub fn search_products(&self, filter: &str) -> Vec<&Product> {
        let needle = filter.trim().to_lowercase();
        if needle.is_empty() {
            return self.products.iter().collect();
        }

        self.products
            .iter()
            .filter(|p| {
                let type_name = self
                    .product_type_of(p)
                    .map(|pt| pt.name.to_lowercase())
                    .unwrap_or_default();
                p.name.to_lowercase().contains(&needle)
                    || p.article.to_lowercase().contains(&needle)
                    || type_name.contains(&needle)
            })
            .collect()
    }

    /// 所有材料的庫存視圖
    pub fn material_stocks(&self) -> Vec<MaterialStock<'_>> {
        self.materials
            .iter()
            .map(|m| MaterialStock::new(m, self.material_type_of(m)))
            .collect()
    }

    /// 低於最低庫存的材料
    pub fn low_stock_materials(&self) -> Vec<MaterialStock<'_>> {
        self.material_stocks()
            .into_iter()
            .filter(MaterialStock::is_low_stock)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.product_types = vec![
            ProductType::new(1, "Ламинат", dec!(2.35)),
            ProductType::new(2, "Паркетная доска", dec!(5.15)),
        ];
        catalog.material_types = vec![MaterialType::new(1, "Древесина", dec!(0.0055))];
        catalog.materials = vec![
            Material::new(10, "Дуб", 1, "м3")
                .with_unit_price(dec!(1200))
                .with_stock(dec!(5), dec!(10)),
            Material::new(11, "Клей", 1, "л").with_stock(dec!(40), dec!(10)),
        ];
        catalog.products = vec![
            Product::new(100, 1, "Ламинат Дуб", "LAM-001", dec!(850)),
            Product::new(101, 2, "Паркет Ясень", "PAR-002", dec!(2400)),
        ];
        catalog.product_materials = vec![
            ProductMaterial::new(100, 10, dec!(0.02)),
            ProductMaterial::new(101, 10, dec!(0.05)),
            ProductMaterial::new(100, 11, dec!(0.1)),
        ];
        catalog
    }

    #[test]
    fn test_lookups() {
        let catalog = sample_catalog();

        assert_eq!(catalog.product(100).unwrap().article, "LAM-001");
        assert!(catalog.product(999).is_none());
        assert_eq!(catalog.product_type(2).unwrap().coefficient, Some(dec!(5.15)));

        let material = catalog.material(10).unwrap();
        assert_eq!(catalog.material_type_of(material).unwrap().name, "Древесина");
    }

    #[test]
    fn test_materials_for_product_keeps_order() {
        let catalog = sample_catalog();
        let rows = catalog.materials_for_product(100);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].material_id, 10);
        assert_eq!(rows[1].material_id, 11);
    }

    #[test]
    fn test_search_products() {
        let catalog = sample_catalog();

        assert_eq!(catalog.search_products("").len(), 2);
        assert_eq!(catalog.search_products("  ").len(), 2);
        assert_eq!(catalog.search_products("lam-").len(), 1);
        assert_eq!(catalog.search_products("ясень").len(), 1);
        // 依產品類型名稱搜尋
        assert_eq!(catalog.search_products("паркетная")[0].id, 101);
        assert!(catalog.search_products("сталь").is_empty());
    }

    #[test]
    fn test_low_stock_materials() {
        let catalog = sample_catalog();
        let low = catalog.low_stock_materials();

        assert_eq!(low.len(), 1);
        assert_eq!(low[0].material.id, 10);
    }

    #[test]
    fn test_loss_multiplier() {
        let mt = MaterialType::new(3, "Пропитка", dec!(0.25));
        assert_eq!(mt.loss_multiplier().unwrap(), dec!(1.25));

        let missing = MaterialType {
            id: 4,
            name: "Лак".to_string(),
            loss_percentage: None,
        };
        assert_eq!(
            missing.loss_multiplier(),
            Err(CalcError::MissingLossPercentage(4))
        );
    }

    #[test]
    fn test_loss_multiplier_overflow() {
        let mt = MaterialType::new(5, "Пропитка", Decimal::MAX);
        assert!(matches!(mt.loss_multiplier(), Err(CalcError::Overflow(_))));
    }

    #[test]
    fn test_from_json_defaults_missing_collections() {
        let json = r#"{
            "product_types": [{ "id": 1, "name": "Ламинат", "coefficient": "2.35" }],
            "material_types": [{ "id": 1, "name": "Древесина" }]
        }"#;

        let catalog = Catalog::from_json_str(json).unwrap();
        assert_eq!(catalog.product_types.len(), 1);
        assert_eq!(catalog.material_types[0].loss_percentage, None);
        assert!(catalog.products.is_empty());
        assert!(catalog.requests.is_empty());
    }

    #[test]
    fn test_from_json_invalid() {
        let err = Catalog::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, CalcError::Load(_)));
    }
}
