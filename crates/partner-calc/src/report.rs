//! 文字報表輸出

use partner_core::{CalcConfig, CalcError, Catalog};

use crate::format;
use crate::requirement::{LineRequirement, MaterialRequirement, RequestMaterialPlan};

/// 逐行累積報表文字
#[derive(Debug, Default)]
struct ReportWriter {
    lines: Vec<String>,
}

impl ReportWriter {
    fn line(&mut self, text: impl Into<String>) {
        self.lines.push(text.into());
    }

    fn blank(&mut self) {
        self.lines.push(String::new());
    }

    fn finish(self) -> String {
        let mut text = self.lines.join("\n");
        text.push('\n');
        text
    }
}

/// 輸出訂單材料計算報表
pub fn render_request_report(plan: &RequestMaterialPlan, config: &CalcConfig) -> String {
    let mut out = ReportWriter::default();
    let separator = config.separator();

    out.line(format!("РАСЧЕТ МАТЕРИАЛОВ ДЛЯ ЗАЯВКИ #{}", plan.request_id));
    out.line(format!("Партнер: {}", plan.partner_name));
    out.line(format!("Дата: {}", format::date(plan.request_date)));
    out.line(format!("Статус: {}", plan.status));
    out.line(separator.clone());

    for line in &plan.lines {
        write_line(&mut out, line, config);
    }

    if !plan.has_materials {
        out.blank();
        out.line("ВНИМАНИЕ: Для продукции в заявке не указаны материалы.");
    }

    out.blank();
    out.line(separator);
    out.line(format!(
        "ОБЩАЯ СТОИМОСТЬ МАТЕРИАЛОВ: {}",
        format::money(plan.total_material_cost, &config.currency)
    ));
    out.line(format!(
        "СТОИМОСТЬ ПРОДУКЦИИ: {}",
        format::money(plan.product_cost, &config.currency)
    ));
    out.line(format!("МАРЖА: {}", format::money(plan.margin, &config.currency)));

    out.finish()
}

fn write_line(out: &mut ReportWriter, line: &LineRequirement, config: &CalcConfig) {
    let currency = config.currency.as_str();

    out.blank();
    out.line(format!("[ПРОДУКЦИЯ #{}] {}", line.line_no, line.product_name));
    out.line(format!("  Артикул: {}", line.article));
    out.line(format!(
        "  Тип продукции: {}",
        line.product_type_name.as_deref().unwrap_or("-")
    ));
    out.line(format!(
        "  Коэффициент типа: {}",
        format::coefficient(line.product_type_coefficient)
    ));
    out.line(format!("  Количество в заявке: {} шт.", line.quantity));
    out.line(format!("  Цена за единицу: {}", format::money(line.unit_price, currency)));
    out.line(format!("  Общая стоимость: {}", format::money(line.line_total, currency)));

    out.blank();
    out.line("  ДЕМОНСТРАЦИЯ РАСЧЕТА МАТЕРИАЛОВ:");
    match &line.demo_material_units {
        Ok(units) => out.line(format!("  Расчет материала (тестовый): {} ед.", units)),
        Err(e) => out.line(format!("  Расчет материала: ошибка ({})", e)),
    }

    if !line.has_bom_rows {
        out.line("  Информация о материалах не найдена");
        return;
    }

    // 清單中的材料全部無法解析時只輸出標題
    out.line("  НЕОБХОДИМЫЕ МАТЕРИАЛЫ:");
    for material in &line.materials {
        write_material(out, material, currency);
    }
}

fn write_material(out: &mut ReportWriter, material: &MaterialRequirement, currency: &str) {
    out.line(format!(
        "  • {} ({}):",
        material.material_name, material.material_type_name
    ));
    out.line(format!(
        "    Базовое количество: {} {}",
        format::number(material.base_quantity),
        material.unit_measurement
    ));
    out.line(format!(
        "    Процент потерь: {}",
        format::percent(material.loss_percentage)
    ));
    out.line(format!(
        "    С учетом потерь: {} {}",
        format::number(material.quantity_with_loss),
        material.unit_measurement
    ));
    if let Some(price) = material.unit_price {
        out.line(format!("    Цена за единицу: {}", format::money(price, currency)));
        out.line(format!(
            "    Стоимость материала: {}",
            format::money(material.cost, currency)
        ));
    }
}

/// 輸出產品類型、材料類型與材料的參考資訊
pub fn render_reference_info(catalog: &Catalog, config: &CalcConfig) -> String {
    let mut out = ReportWriter::default();

    out.line("СПРАВОЧНАЯ ИНФОРМАЦИЯ О ТИПАХ ПРОДУКЦИИ И МАТЕРИАЛОВ");
    out.line("=".repeat(config.separator_width));

    out.blank();
    out.line("ТИПЫ ПРОДУКЦИИ:");
    out.line("-".repeat(16));
    for pt in &catalog.product_types {
        out.line(format!(
            "ID: {}, Название: {}, Коэффициент: {}",
            pt.id,
            pt.name,
            format::coefficient(pt.coefficient)
        ));
    }

    out.blank();
    out.line("ТИПЫ МАТЕРИАЛОВ:");
    out.line("-".repeat(16));
    for mt in &catalog.material_types {
        let loss = mt
            .loss_percentage
            .map(format::percent)
            .unwrap_or_else(|| "-".to_string());
        out.line(format!("ID: {}, Название: {}, Процент потерь: {}", mt.id, mt.name, loss));
    }

    out.blank();
    out.line("МАТЕРИАЛЫ:");
    out.line("-".repeat(16));
    for m in catalog.materials.iter().take(config.reference_material_limit) {
        let type_name = catalog
            .material_type_of(m)
            .map(|mt| mt.name.as_str())
            .unwrap_or("-");
        out.line(format!(
            "ID: {}, Название: {}, Тип: {}, Ед.изм: {}",
            m.id, m.name, type_name, m.unit_measurement
        ));
    }

    out.finish()
}

/// 計算失敗時的報表文字
pub fn render_error(error: &CalcError) -> String {
    match error {
        CalcError::RequestNotFound(_) => "Заявка не найдена".to_string(),
        other => format!("Ошибка расчета: {}", other),
    }
}
