//! FILENAME: core/pivot-data/src/format.rs
//! PURPOSE: Number formatting for aggregator display text.
//! CONTEXT: Converts raw aggregated values into the strings shown in table
//! cells. Missing values render as an empty string.

use serde::{Deserialize, Serialize};

/// Display format attached to a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NumberFormat {
    /// Integers without a decimal point, decimals trimmed of trailing zeros.
    General,
    /// Fixed number of decimal places.
    Fixed {
        decimal_places: u8,
        use_thousands_separator: bool,
    },
}

impl Default for NumberFormat {
    fn default() -> Self {
        NumberFormat::General
    }
}

/// Format an optional value according to the specified format.
pub fn format_number(value: Option<f64>, format: &NumberFormat) -> String {
    let value = match value {
        Some(v) if v.is_finite() => v,
        Some(v) if v.is_nan() => return String::new(),
        Some(v) => return if v > 0.0 { "∞".to_string() } else { "-∞".to_string() },
        None => return String::new(),
    };

    match format {
        NumberFormat::General => format_general(value),
        NumberFormat::Fixed {
            decimal_places,
            use_thousands_separator,
        } => format_decimal(value, *decimal_places, *use_thousands_separator),
    }
}

fn format_general(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }

    let abs_value = value.abs();

    // Scientific notation for very large or very small magnitudes
    if abs_value >= 1e10 || abs_value < 1e-4 {
        return format_scientific(value);
    }

    if value.fract() == 0.0 && abs_value < 1e15 {
        return format!("{:.0}", value);
    }

    // Up to 10 decimals, trailing zeros trimmed
    let formatted = format!("{:.10}", value);
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

fn format_scientific(value: f64) -> String {
    let formatted = format!("{:.5e}", value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => {
            let mantissa = mantissa.trim_end_matches('0').trim_end_matches('.');
            format!("{}e{}", mantissa, exponent)
        }
        None => formatted,
    }
}

fn format_decimal(value: f64, decimal_places: u8, use_thousands_separator: bool) -> String {
    let rounded = format!("{:.prec$}", value, prec = decimal_places as usize);

    if use_thousands_separator {
        add_thousands_separator(&rounded)
    } else {
        rounded
    }
}

fn add_thousands_separator(s: &str) -> String {
    let (integer_part, decimal_part) = match s.split_once('.') {
        Some((int, dec)) => (int, Some(dec)),
        None => (s, None),
    };

    let negative = integer_part.starts_with('-');
    let digits: Vec<char> = integer_part.chars().filter(|c| c.is_ascii_digit()).collect();

    let mut result = String::with_capacity(s.len() + digits.len() / 3 + 1);
    if negative {
        result.push('-');
    }
    let len = digits.len();
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }

    if let Some(decimal) = decimal_part {
        result.push('.');
        result.push_str(decimal);
    }

    result
}
