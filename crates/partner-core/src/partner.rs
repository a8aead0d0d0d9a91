//! 合作夥伴模型

use serde::{Deserialize, Serialize};

/// 地址缺省顯示值
pub const DEFAULT_ADDRESS: &str = "Адрес не указан";

/// 電話缺省顯示值
pub const DEFAULT_PHONE: &str = "+7 XXX XXX XX XX";

/// 合作夥伴
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Partner {
    /// 合作夥伴ID
    pub id: i64,

    /// 合作夥伴類型（如 ООО、ЗАО）
    #[serde(default)]
    pub partner_type: String,

    /// 公司名稱
    pub company_name: String,

    /// 負責人
    #[serde(default)]
    pub director_name: String,

    #[serde(default)]
    pub address: Option<String>,

    /// 評級
    #[serde(default)]
    pub rating: Option<i32>,

    #[serde(default)]
    pub phone: Option<String>,

    #[serde(default)]
    pub email: String,

    /// 納稅人識別號
    #[serde(default)]
    pub inn: String,
}

impl Partner {
    /// 創建新的合作夥伴
    pub fn new(id: i64, partner_type: impl Into<String>, company_name: impl Into<String>) -> Self {
        Self {
            id,
            partner_type: partner_type.into(),
            company_name: company_name.into(),
            director_name: String::new(),
            address: None,
            rating: None,
            phone: None,
            email: String::new(),
            inn: String::new(),
        }
    }

    /// 建構器模式：設置評級
    pub fn with_rating(mut self, rating: i32) -> Self {
        self.rating = Some(rating);
        self
    }

    /// 建構器模式：設置地址
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// 建構器模式：設置電話
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn display_address(&self) -> &str {
        self.address.as_deref().unwrap_or(DEFAULT_ADDRESS)
    }

    pub fn display_phone(&self) -> &str {
        self.phone.as_deref().unwrap_or(DEFAULT_PHONE)
    }

    pub fn display_rating(&self) -> i32 {
        self.rating.unwrap_or(0)
    }

    /// 依評級決定推薦產品範圍
    pub fn recommendation_rule(&self) -> RecommendationRule {
        match self.rating {
            Some(r) if r >= 8 => RecommendationRule::Premium,
            Some(r) if r >= 5 => RecommendationRule::Standard,
            _ => RecommendationRule::All,
        }
    }
}

/// 推薦規則
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecommendationRule {
    /// 高評級：僅產品類型 1 與 5
    Premium,
    /// 中評級：排除產品類型 1
    Standard,
    /// 不過濾
    All,
}

impl RecommendationRule {
    /// 檢查產品類型是否在推薦範圍內
    pub fn allows(&self, product_type_id: i64) -> bool {
        match self {
            RecommendationRule::Premium => product_type_id == 1 || product_type_id == 5,
            RecommendationRule::Standard => product_type_id != 1,
            RecommendationRule::All => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_display_defaults() {
        let partner = Partner::new(1, "ООО", "Паркет 29");

        assert_eq!(partner.display_address(), DEFAULT_ADDRESS);
        assert_eq!(partner.display_phone(), DEFAULT_PHONE);
        assert_eq!(partner.display_rating(), 0);

        let partner = partner
            .with_address("Архангельск, ул. Ленина 1")
            .with_phone("+7 911 000 00 00")
            .with_rating(7);
        assert_eq!(partner.display_address(), "Архангельск, ул. Ленина 1");
        assert_eq!(partner.display_phone(), "+7 911 000 00 00");
        assert_eq!(partner.display_rating(), 7);
    }

    #[rstest]
    #[case(Some(10), RecommendationRule::Premium)]
    #[case(Some(8), RecommendationRule::Premium)]
    #[case(Some(7), RecommendationRule::Standard)]
    #[case(Some(5), RecommendationRule::Standard)]
    #[case(Some(4), RecommendationRule::All)]
    #[case(None, RecommendationRule::All)]
    fn test_recommendation_rule(#[case] rating: Option<i32>, #[case] expected: RecommendationRule) {
        let mut partner = Partner::new(1, "ЗАО", "Стройдом");
        partner.rating = rating;
        assert_eq!(partner.recommendation_rule(), expected);
    }

    #[rstest]
    #[case(RecommendationRule::Premium, 1, true)]
    #[case(RecommendationRule::Premium, 5, true)]
    #[case(RecommendationRule::Premium, 2, false)]
    #[case(RecommendationRule::Standard, 1, false)]
    #[case(RecommendationRule::Standard, 3, true)]
    #[case(RecommendationRule::All, 1, true)]
    fn test_rule_allows(
        #[case] rule: RecommendationRule,
        #[case] product_type_id: i64,
        #[case] expected: bool,
    ) {
        assert_eq!(rule.allows(product_type_id), expected);
    }
}
