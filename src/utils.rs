use serde_json::Value;

/// Spreadsheet phone numbers arrive as floats (`9876543210.0`, `9.87654321e9`).
/// Numeric values are truncated to their integer digits; text that parses as
/// a number is treated the same, any other text is kept trimmed.
pub fn normalize_phone(value: &Value) -> String {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(u) = n.as_u64() {
                u.to_string()
            } else {
                n.as_f64().map(float_to_digits).unwrap_or_default()
            }
        }
        Value::String(s) => {
            let t = s.trim();
            match t.parse::<f64>() {
                Ok(f) if f.is_finite() => float_to_digits(f),
                _ => t.to_string(),
            }
        }
        Value::Bool(b) => (*b as i64).to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

fn float_to_digits(f: f64) -> String {
    format!("{:.0}", f.trunc())
}

/// Cell texts a spreadsheet export uses for "no value".
pub const NA_STRINGS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// `null` cells and the [`NA_STRINGS`] texts are missing; normalization
/// turns them into `""`.
pub fn is_missing(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => NA_STRINGS.contains(&s.as_str()),
        _ => false,
    }
}

/// Text form of a cell for the fixed-schema certificate fields.
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => format!("{:.0}", f),
            _ => n.to_string(),
        },
        other => other.to_string(),
    }
}
