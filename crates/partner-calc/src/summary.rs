//! 訂單列表摘要

use chrono::NaiveDate;
use partner_core::{Catalog, Result};
use rust_decimal::Decimal;
use serde::Serialize;

/// 訂單摘要（列表顯示用）
#[derive(Debug, Clone, Serialize)]
pub struct RequestSummary {
    pub id: i64,
    pub request_number: String,
    pub partner_name: String,
    pub partner_type: String,
    pub request_date: NaiveDate,
    pub status: String,
    pub products_count: usize,
    pub total_cost: Decimal,
    pub partner_address: String,
    pub partner_phone: String,
    pub partner_rating: i32,
}

/// 彙總全部訂單，依訂單ID排序
///
/// 找不到合作夥伴的訂單不列出；金額溢位時回傳錯誤。
pub fn summarize_requests(catalog: &Catalog) -> Result<Vec<RequestSummary>> {
    let mut summaries = Vec::with_capacity(catalog.requests.len());

    for request in &catalog.requests {
        let Some(partner) = catalog.partner(request.partner_id) else {
            tracing::warn!(
                "Партнер {} заявки {} не найден, заявка пропущена",
                request.partner_id,
                request.request_number()
            );
            continue;
        };

        summaries.push(RequestSummary {
            id: request.id,
            request_number: request.request_number(),
            partner_name: partner.company_name.clone(),
            partner_type: partner.partner_type.clone(),
            request_date: request.request_date,
            status: request.status.clone(),
            products_count: request.products_count(),
            total_cost: request.total_cost()?,
            partner_address: partner.display_address().to_string(),
            partner_phone: partner.display_phone().to_string(),
            partner_rating: partner.display_rating(),
        });
    }

    summaries.sort_by_key(|s| s.id);
    Ok(summaries)
}
