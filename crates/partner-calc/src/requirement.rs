//! 訂單材料需求計算

use chrono::NaiveDate;
use partner_core::{CalcConfig, CalcError, Catalog, Product, RequestProduct, Result};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::quantity::{MaterialQuantityCalculator, QuantityInput};
use crate::PlanWarning;

/// 單一材料需求（含損耗與成本）
#[derive(Debug, Clone, Serialize)]
pub struct MaterialRequirement {
    pub material_id: i64,
    pub material_name: String,
    pub material_type_name: String,
    pub unit_measurement: String,

    /// 損耗率（小數）
    pub loss_percentage: Decimal,

    /// 基本用量 = 單位用量 × 訂購數量
    pub base_quantity: Decimal,

    /// 含損耗用量 = 基本用量 × (1 + 損耗率)
    pub quantity_with_loss: Decimal,

    /// 材料單價（未定價為 None）
    pub unit_price: Option<Decimal>,

    /// 材料成本（未定價為 0）
    pub cost: Decimal,
}

/// 訂單行的材料需求
#[derive(Debug, Clone, Serialize)]
pub struct LineRequirement {
    /// 行號（從 1 開始，跳過的產品也佔用行號）
    pub line_no: usize,
    pub product_id: i64,
    pub product_name: String,
    pub article: String,
    pub product_type_name: Option<String>,
    pub product_type_coefficient: Option<Decimal>,
    pub quantity: i64,
    pub unit_price: Decimal,
    pub line_total: Decimal,

    /// 演示計算結果（固定材料類型與產品參數）
    pub demo_material_units: std::result::Result<u64, CalcError>,

    /// 產品是否登記了物料清單（不論材料能否解析）
    pub has_bom_rows: bool,

    /// 物料清單展開結果
    pub materials: Vec<MaterialRequirement>,
}

impl LineRequirement {
    /// 該行材料成本
    pub fn material_cost(&self) -> Result<Decimal> {
        self.materials.iter().try_fold(Decimal::ZERO, |total, m| {
            total
                .checked_add(m.cost)
                .ok_or_else(|| {
                    CalcError::Overflow(format!("стоимость материалов позиции {}", self.line_no))
                })
        })
    }
}


/// 訂單材料計劃
#[derive(Debug, Clone, Serialize)]
pub struct RequestMaterialPlan {
    pub request_id: i64,
    pub request_number: String,
    pub partner_name: String,
    pub request_date: NaiveDate,
    pub status: String,

    /// 訂單行需求（不含找不到的產品）
    pub lines: Vec<LineRequirement>,

    /// 材料總成本
    pub total_material_cost: Decimal,

    /// 產品總金額（全部訂單行）
    pub product_cost: Decimal,

    /// 毛利 = 產品總金額 - 材料總成本
    pub margin: Decimal,

    /// 是否有任何訂單行登記了物料清單
    pub has_materials: bool,

    /// 警告信息
    pub warnings: Vec<PlanWarning>,
}

impl RequestMaterialPlan {
    pub fn add_warning(&mut self, warning: PlanWarning) {
        self.warnings.push(warning);
    }
}

/// 訂單材料需求建構器
pub struct RequirementBuilder<'a> {
    catalog: &'a Catalog,
    config: &'a CalcConfig,
}

impl<'a> RequirementBuilder<'a> {
    /// 創建新的建構器
    pub fn new(catalog: &'a Catalog, config: &'a CalcConfig) -> Self {
        Self { catalog, config }
    }

    /// 計算訂單的材料需求、成本與毛利
    pub fn build(&self, request_id: i64) -> Result<RequestMaterialPlan> {
        let request = self
            .catalog
            .request(request_id)
            .ok_or(CalcError::RequestNotFound(request_id))?;
        let partner = self
            .catalog
            .partner(request.partner_id)
            .ok_or(CalcError::PartnerNotFound(request.partner_id))?;

        tracing::info!(
            "Расчет материалов для заявки {}: позиций {}",
            request.request_number(),
            request.items.len()
        );

        let mut plan = RequestMaterialPlan {
            request_id: request.id,
            request_number: request.request_number(),
            partner_name: partner.company_name.clone(),
            request_date: request.request_date,
            status: request.status.clone(),
            lines: Vec::new(),
            total_material_cost: Decimal::ZERO,
            product_cost: request.total_cost()?,
            margin: Decimal::ZERO,
            has_materials: false,
            warnings: Vec::new(),
        };

        for (index, item) in request.items.iter().enumerate() {
            let line_no = index + 1;
            let Some(product) = self.catalog.product(item.product_id) else {
                tracing::warn!(
                    "Позиция {}: продукция {} не найдена, пропущена",
                    line_no,
                    item.product_id
                );
                plan.add_warning(PlanWarning::warning(
                    line_no,
                    format!("Продукция {} не найдена", item.product_id),
                ));
                continue;
            };

            let line = self.build_line(line_no, item, product, &mut plan)?;
            tracing::debug!(
                "Позиция {}: продукция {}, материалов {}",
                line_no,
                product.article,
                line.materials.len()
            );
            plan.lines.push(line);
        }

        let mut total_material_cost = Decimal::ZERO;
        for line in &plan.lines {
            total_material_cost = total_material_cost
                .checked_add(line.material_cost()?)
                .ok_or_else(|| {
                    CalcError::Overflow(format!("стоимость материалов заявки {}", plan.request_number))
                })?;
        }
        plan.total_material_cost = total_material_cost;
        plan.has_materials = plan.lines.iter().any(|l| l.has_bom_rows);
        plan.margin = plan
            .product_cost
            .checked_sub(plan.total_material_cost)
            .ok_or_else(|| CalcError::Overflow(format!("маржа заявки {}", plan.request_number)))?;

        tracing::info!(
            "Заявка {} рассчитана: материалы {}, маржа {}",
            plan.request_number,
            plan.total_material_cost,
            plan.margin
        );

        Ok(plan)
    }

    fn build_line(
        &self,
        line_no: usize,
        item: &RequestProduct,
        product: &Product,
        plan: &mut RequestMaterialPlan,
    ) -> Result<LineRequirement> {
        let product_type = self.catalog.product_type_of(product);

        let demo_input = QuantityInput::new(
            product.product_type_id,
            self.config.demo_material_type_id,
            item.quantity,
            self.config.demo_stock_quantity,
        )
        .with_parameters(self.config.demo_parameter_1, self.config.demo_parameter_2);
        let demo_material_units = MaterialQuantityCalculator::new(self.catalog).calculate(&demo_input);

        let rows = self.catalog.materials_for_product(product.id);
        let mut materials = Vec::with_capacity(rows.len());
        for row in &rows {
            let Some(material) = self.catalog.material(row.material_id) else {
                tracing::warn!("Позиция {}: материал {} не найден", line_no, row.material_id);
                plan.add_warning(PlanWarning::info(
                    line_no,
                    format!("Материал {} не найден", row.material_id),
                ));
                continue;
            };
            let Some(material_type) = self.catalog.material_type_of(material) else {
                tracing::warn!("Позиция {}: у материала {} нет типа", line_no, material.name);
                plan.add_warning(PlanWarning::info(
                    line_no,
                    format!("Тип материала {} не найден", material.name),
                ));
                continue;
            };

            let row_overflow =
                || CalcError::Overflow(format!("материал {} позиции {}", material.id, line_no));
            let loss_percentage = material_type
                .loss_percentage
                .ok_or(CalcError::MissingLossPercentage(material_type.id))?;
            let loss_multiplier = material_type.loss_multiplier()?;
            let base_quantity = row
                .quantity
                .checked_mul(Decimal::from(item.quantity))
                .ok_or_else(row_overflow)?;
            let quantity_with_loss = base_quantity
                .checked_mul(loss_multiplier)
                .ok_or_else(row_overflow)?;
            let cost = match material.unit_price {
                Some(price) => quantity_with_loss.checked_mul(price).ok_or_else(row_overflow)?,
                None => Decimal::ZERO,
            };

            materials.push(MaterialRequirement {
                material_id: material.id,
                material_name: material.name.clone(),
                material_type_name: material_type.name.clone(),
                unit_measurement: material.unit_measurement.clone(),
                loss_percentage,
                base_quantity,
                quantity_with_loss,
                unit_price: material.unit_price,
                cost,
            });
        }

        Ok(LineRequirement {
            line_no,
            product_id: product.id,
            product_name: product.name.clone(),
            article: product.article.clone(),
            product_type_name: product_type.map(|pt| pt.name.clone()),
            product_type_coefficient: product_type.and_then(|pt| pt.coefficient),
            quantity: item.quantity,
            unit_price: item.unit_price,
            line_total: item.line_total()?,
            demo_material_units,
            has_bom_rows: !rows.is_empty(),
            materials,
        })
    }
}
