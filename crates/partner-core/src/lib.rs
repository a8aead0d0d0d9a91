//! # Partner Core
//!
//! 合作夥伴訂單的核心資料模型與類型定義

pub mod catalog;
pub mod config;
pub mod partner;
pub mod request;
pub mod stock;

// Re-export 主要類型
pub use catalog::{Catalog, Material, MaterialType, Product, ProductMaterial, ProductType};
pub use config::CalcConfig;
pub use partner::{Partner, RecommendationRule};
pub use request::{PartnerRequest, RequestProduct, RequestStatus};
pub use stock::MaterialStock;

/// 計算錯誤類型
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, thiserror::Error)]
pub enum CalcError {
    #[error("Некорректные входные данные: {0}")]
    InvalidInput(String),

    #[error("Тип продукции не найден: {0}")]
    ProductTypeNotFound(i64),

    #[error("У типа продукции {0} не задан коэффициент")]
    MissingCoefficient(i64),

    #[error("Тип материала не найден: {0}")]
    MaterialTypeNotFound(i64),

    #[error("У типа материала {0} не задан процент потерь")]
    MissingLossPercentage(i64),

    #[error("Заявка не найдена: {0}")]
    RequestNotFound(i64),

    #[error("Партнер не найден: {0}")]
    PartnerNotFound(i64),

    #[error("Заявка не прошла проверку:\n{}", .0.join("\n"))]
    Validation(Vec<String>),

    #[error("Арифметическое переполнение: {0}")]
    Overflow(String),

    #[error("Ошибка загрузки данных: {0}")]
    Load(String),
}

pub type Result<T> = std::result::Result<T, CalcError>;
