/// Symbol used for every monetary value on the dashboard.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "R$";

/// Render `amount` as `"<symbol> 1.234,50"` (pt-BR separators, two decimals).
///
/// A negative amount keeps its sign after the symbol (`"R$ -10,00"`), unless it
/// rounds to zero.
pub fn format_currency(amount: f64, symbol: &str) -> String {
    format!("{symbol} {}", format_number(amount, 2))
}

/// [`format_currency`] with the default `R$` symbol.
pub fn format_brl(amount: f64) -> String {
    format_currency(amount, DEFAULT_CURRENCY_SYMBOL)
}

/// Quantities are shown without decimals when they are whole numbers.
pub fn format_quantity(quantity: f64) -> String {
    if quantity.fract() == 0.0 {
        format_number(quantity, 0)
    } else {
        format_number(quantity, 2)
    }
}

/// pt-BR number rendering: `.` between thousands, `,` before the decimals.
pub fn format_number(amount: f64, decimals: usize) -> String {
    if !amount.is_finite() {
        return amount.to_string();
    }

    let fixed = format!("{:.*}", decimals, amount.abs());
    let (int_part, frac) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };
    let is_zero = fixed.bytes().all(|b| b == b'0' || b == b'.');
    let sign = if amount < 0.0 && !is_zero { "-" } else { "" };

    let grouped = group_thousands(int_part);
    match frac {
        Some(f) => format!("{sign}{grouped},{f}"),
        None => format!("{sign}{grouped}"),
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}
