use serde::Deserialize;
use serde_json::Value;

/// Currency assumed when the document does not name one.
pub const DEFAULT_CURRENCY: &str = "MXN";

/// Image shown for items without a usable photo reference.
pub const PLACEHOLDER_IMG: &str = "assets/img/placeholder.jpg";

/// The full menu document. Loaded once per session and never mutated;
/// every filtered view is computed fresh from it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MenuDocument {
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub sections: Vec<Section>,
}

/// A named group of items. Section order is display order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Section {
    pub title: String,
    #[serde(default)]
    pub hint: Option<String>,
    #[serde(default)]
    pub items: Vec<Item>,
}

/// A single purchasable entry. `price` is kept as raw JSON because real
/// documents carry numbers, nulls, and the occasional "N/A" string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Item {
    pub name: String,
    #[serde(default)]
    pub desc: Option<String>,
    #[serde(default)]
    pub price: Option<Value>,
    #[serde(default)]
    pub img: Option<String>,
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

/// Format a price for display.
///
/// Absent and null prices render as empty text. Values that coerce to a
/// finite number render as a zero-fraction currency amount in the es-MX
/// convention ("$" for MXN, the currency code otherwise, comma-grouped
/// thousands). Anything else passes through as its raw text.
pub fn format_price(price: Option<&Value>, currency: &str) -> String {
    let value = match price {
        None | Some(Value::Null) => return String::new(),
        Some(v) => v,
    };

    match coerce_number(value) {
        Some(n) => format_currency(n, currency),
        None => raw_text(value),
    }
}

fn coerce_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

fn raw_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn format_currency(amount: f64, currency: &str) -> String {
    let grouped = group_thousands(amount.round() as i64);
    if currency == DEFAULT_CURRENCY {
        format!("${grouped}")
    } else {
        format!("{currency} {grouped}")
    }
}

fn group_thousands(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if amount < 0 {
        out.push('-');
    }
    let lead = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i != 0 && i % 3 == lead % 3 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Resolve an item's image reference, probing whether it actually loads.
///
/// A missing or unloadable reference falls back to the placeholder exactly
/// once; the placeholder itself is never probed, so a broken placeholder
/// cannot re-trigger the fallback.
pub fn resolve_image<F>(img: Option<&str>, loads: F) -> String
where
    F: Fn(&str) -> bool,
{
    match img {
        Some(src) if loads(src) => src.to_string(),
        _ => PLACEHOLDER_IMG.to_string(),
    }
}
