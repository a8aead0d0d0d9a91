//! 報表數字與日期格式

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

/// 兩位小數、千分位分隔，例如 `1,234.50`
pub fn number(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    format!("{}{}.{}", sign, group_thousands(int_part), frac_part)
}

/// 金額格式
pub fn money(value: Decimal, currency: &str) -> String {
    format!("{} {}", number(value), currency)
}

/// 小數轉百分比，例如 `0.0055` → `0.55%`
pub fn percent(fraction: Decimal) -> String {
    format!("{}%", number(fraction.saturating_mul(Decimal::ONE_HUNDRED)))
}

/// 日期格式 `dd.mm.yyyy`
pub fn date(value: NaiveDate) -> String {
    value.format("%d.%m.%Y").to_string()
}

/// 係數原樣輸出（去除尾隨零）
pub fn coefficient(value: Option<Decimal>) -> String {
    value
        .map(|v| v.normalize().to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(dec!(0), "0.00")]
    #[case(dec!(5), "5.00")]
    #[case(dec!(999.999), "1,000.00")]
    #[case(dec!(1234.5), "1,234.50")]
    #[case(dec!(1234567.891), "1,234,567.89")]
    #[case(dec!(2.345), "2.35")]
    #[case(dec!(-2.345), "-2.35")]
    #[case(dec!(-1500), "-1,500.00")]
    #[case(dec!(-0.001), "0.00")]
    fn test_number(#[case] value: Decimal, #[case] expected: &str) {
        assert_eq!(number(value), expected);
    }

    #[test]
    fn test_money() {
        assert_eq!(money(dec!(12500.5), "р."), "12,500.50 р.");
    }

    #[rstest]
    #[case(dec!(0.0055), "0.55%")]
    #[case(dec!(0.1), "10.00%")]
    #[case(dec!(0), "0.00%")]
    fn test_percent(#[case] value: Decimal, #[case] expected: &str) {
        assert_eq!(percent(value), expected);
    }

    #[test]
    fn test_date() {
        let d = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        assert_eq!(date(d), "07.03.2025");
    }

    #[test]
    fn test_coefficient() {
        assert_eq!(coefficient(Some(dec!(2.350))), "2.35");
        assert_eq!(coefficient(None), "-");
    }
}
