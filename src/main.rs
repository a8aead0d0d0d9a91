//! 合作夥伴訂單材料計算命令列工具

mod logging;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use partner_calc::{
    format, render_error, render_reference_info, render_request_report, summarize_requests,
    CalculationOutcome, MaterialQuantityCalculator, QuantityInput, RequirementBuilder,
};
use partner_core::{CalcConfig, Catalog, Product};
use rust_decimal::Decimal;

#[derive(Parser, Debug)]
#[command(
    name = "partner-mrp",
    version,
    about = "Расчет материалов по заявкам партнеров",
    long_about = None
)]
struct Cli {
    /// Файл данных (JSON)
    catalog: PathBuf,

    /// Файл настроек расчета (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    /// Список заявок
    Requests,

    /// Расчет материалов для заявки
    Report {
        /// Номер заявки
        request_id: i64,

        /// Вывод в формате JSON
        #[arg(long)]
        json: bool,
    },

    /// Справочная информация о типах продукции и материалов
    Reference,

    /// Материалы с запасом ниже минимального
    LowStock,

    /// Поиск продукции (пустой запрос: вся продукция)
    Products {
        /// Название, артикул или тип продукции
        filter: Vec<String>,
    },

    /// Рекомендуемая продукция для партнера
    Recommend {
        /// Номер партнера
        partner_id: i64,
    },

    /// Расчет количества материала
    #[command(allow_negative_numbers = true)]
    Calc {
        /// Тип продукции
        product_type_id: i64,
        /// Тип материала
        material_type_id: i64,
        /// Требуемое количество продукции
        required: i64,
        /// Количество продукции на складе
        stock: i64,
        /// Первый параметр продукции
        parameter_1: Decimal,
        /// Второй параметр продукции
        parameter_2: Decimal,
    },
}

fn load_config(path: Option<&Path>) -> Result<CalcConfig> {
    let Some(path) = path else {
        return Ok(CalcConfig::default());
    };
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Не удалось прочитать настройки {}", path.display()))?;
    CalcConfig::from_json_str(&content)
        .with_context(|| format!("Некорректные настройки {}", path.display()))
}

fn print_products(catalog: &Catalog, products: &[&Product], config: &CalcConfig) {
    for product in products {
        let type_name = catalog
            .product_type_of(product)
            .map(|pt| pt.name.as_str())
            .unwrap_or("-");
        println!(
            "{:>4}  {:<12} {:<30} {:<20} {}",
            product.id,
            product.article,
            product.name,
            type_name,
            format::money(product.min_partner_price, &config.currency)
        );
    }
}

fn run(cli: Cli) -> Result<()> {
    let catalog = Catalog::from_path(&cli.catalog)
        .with_context(|| format!("Не удалось загрузить данные {}", cli.catalog.display()))?;
    let config = load_config(cli.config.as_deref())?;

    tracing::info!(
        "Данные загружены: продукция {}, материалы {}, заявки {}",
        catalog.products.len(),
        catalog.materials.len(),
        catalog.requests.len()
    );

    match cli.command {
        Command::Requests => {
            for s in summarize_requests(&catalog)? {
                println!(
                    "{}  {}  {} {}  {}  {}  позиций {}  {}  рейтинг {}",
                    s.request_number,
                    format::date(s.request_date),
                    s.partner_type,
                    s.partner_name,
                    s.status,
                    s.partner_phone,
                    s.products_count,
                    format::money(s.total_cost, &config.currency),
                    s.partner_rating
                );
            }
        }
        Command::Report { request_id, json } => {
            let plan = match RequirementBuilder::new(&catalog, &config).build(request_id) {
                Ok(plan) => plan,
                Err(e) => {
                    println!("{}", render_error(&e));
                    bail!("Расчет заявки {} не выполнен: {}", request_id, e);
                }
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&plan)?);
            } else {
                print!("{}", render_request_report(&plan, &config));
            }
        }
        Command::Reference => print!("{}", render_reference_info(&catalog, &config)),
        Command::LowStock => {
            for stock in catalog.low_stock_materials() {
                println!(
                    "{}  {}  остаток {} / минимум {} {}  нехватка {}",
                    stock.material.name,
                    stock.status_label(),
                    format::number(stock.quantity_in_stock()),
                    format::number(stock.material.minimum_quantity),
                    stock.material.unit_measurement,
                    format::number(stock.shortage())
                );
            }
        }
        Command::Products { filter } => {
            let filter = filter.join(" ");
            print_products(&catalog, &catalog.search_products(&filter), &config);
        }
        Command::Recommend { partner_id } => {
            if let Some(partner) = catalog.partner(partner_id) {
                println!("Рекомендуемая продукция для: {}", partner.company_name);
            }
            print_products(&catalog, &catalog.recommended_products(partner_id), &config);
        }
        Command::Calc {
            product_type_id,
            material_type_id,
            required,
            stock,
            parameter_1,
            parameter_2,
        } => {
            let input = QuantityInput::new(product_type_id, material_type_id, required, stock)
                .with_parameters(parameter_1, parameter_2);
            let result = MaterialQuantityCalculator::new(&catalog).calculate(&input);
            let outcome = CalculationOutcome::from_result(result);
            println!("{}", outcome.units());
            println!("{}", outcome.status_message());
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    logging::init();

    let cli = Cli::parse();
    run(cli)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use rstest::rstest;

    fn parse(args: &[&str]) -> std::result::Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("partner-mrp").chain(args.iter().copied()))
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_report() {
        let cli = parse(&["data.json", "report", "12", "--json"]).unwrap();

        assert_eq!(cli.catalog, PathBuf::from("data.json"));
        assert_eq!(
            cli.command,
            Command::Report {
                request_id: 12,
                json: true
            }
        );
        assert!(cli.config.is_none());
    }

    #[rstest]
    #[case(&["data.json", "--config", "cfg.json", "reference"])]
    #[case(&["data.json", "reference", "--config", "cfg.json"])]
    fn test_parse_config_flag(#[case] args: &[&str]) {
        let cli = parse(args).unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("cfg.json")));
        assert_eq!(cli.command, Command::Reference);
    }

    #[test]
    fn test_parse_calc() {
        let cli = parse(&["data.json", "calc", "1", "2", "100", "20", "2.5", "1.5"]).unwrap();

        assert_eq!(
            cli.command,
            Command::Calc {
                product_type_id: 1,
                material_type_id: 2,
                required: 100,
                stock: 20,
                parameter_1: Decimal::new(25, 1),
                parameter_2: Decimal::new(15, 1),
            }
        );
    }

    #[test]
    fn test_parse_calc_negative_values() {
        // 負數交給計算器回報為無效輸入
        let cli = parse(&["data.json", "calc", "1", "1", "-10", "0", "1", "1"]).unwrap();

        assert!(matches!(cli.command, Command::Calc { required: -10, .. }));
    }

    #[rstest]
    #[case(&["data.json", "products", "Ламинат", "Дуб"], &["Ламинат", "Дуб"])]
    #[case(&["data.json", "products"], &[])]
    #[case(&["data.json", "products", "--", "--json"], &["--json"])]
    fn test_parse_products_filter(#[case] args: &[&str], #[case] expected: &[&str]) {
        let cli = parse(args).unwrap();
        let expected: Vec<String> = expected.iter().map(|s| s.to_string()).collect();

        assert_eq!(cli.command, Command::Products { filter: expected });
    }

    #[rstest]
    #[case(&[])]
    #[case(&["data.json"])]
    #[case(&["data.json", "unknown"])]
    #[case(&["data.json", "report"])]
    #[case(&["data.json", "report", "abc"])]
    #[case(&["data.json", "report", "3", "junk"])]
    #[case(&["data.json", "requests", "--json"])]
    #[case(&["data.json", "products", "--json"])]
    #[case(&["data.json", "recommend", "1", "2"])]
    #[case(&["data.json", "calc", "1", "1", "10"])]
    #[case(&["data.json", "calc", "1", "1", "10", "0", "x", "1"])]
    #[case(&["data.json", "reference", "--config"])]
    fn test_parse_errors(#[case] args: &[&str]) {
        assert!(parse(args).is_err());
    }
}
