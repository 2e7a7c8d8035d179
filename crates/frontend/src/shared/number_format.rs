//! Number formatting for summaries and tables

/// Currency shown next to every tax amount.
pub const CURRENCY: &str = "GHS";

/// Форматирует число с разделителем тысяч (запятая) и указанным количеством знаков после точки
pub fn format_number_with_decimals(value: f64, decimals: usize) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let formatted = format!("{:.*}", decimals, value);

    let (integer_part, decimal_part) = match formatted.split_once('.') {
        Some((integer, decimal)) => (integer, Some(decimal)),
        None => (formatted.as_str(), None),
    };

    // Вставляем запятые каждые 3 цифры с конца целой части
    let mut result = String::new();
    for (i, c) in integer_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 && c != '-' {
            result.push(',');
        }
        result.push(c);
    }
    let formatted_integer: String = result.chars().rev().collect();

    match decimal_part {
        Some(d) => format!("{}.{}", formatted_integer, d),
        None => formatted_integer,
    }
}

/// `GHS 1,150.00`
pub fn format_money(value: f64) -> String {
    format!("{} {}", CURRENCY, format_number_with_decimals(value, 2))
}

/// `34.00%` for `decimals = 2`
pub fn format_percent(value: f64, decimals: usize) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    format!("{:.*}%", decimals, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(1150.0), "GHS 1,150.00");
        assert_eq!(format_money(1234567.891), "GHS 1,234,567.89");
        assert_eq!(format_money(0.0), "GHS 0.00");
        assert_eq!(format_money(f64::NAN), "GHS 0.00");
    }

    #[test]
    fn test_format_number_with_decimals() {
        assert_eq!(format_number_with_decimals(1234.567, 0), "1,235");
        assert_eq!(format_number_with_decimals(1234.567, 1), "1,234.6");
        assert_eq!(format_number_with_decimals(-1234.5, 2), "-1,234.50");
        assert_eq!(format_number_with_decimals(999.0, 0), "999");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(34.0, 2), "34.00%");
        assert_eq!(format_percent(100.0 / 3.0, 1), "33.3%");
    }
}
