//! Monetary value formatting for inspection views.

use procura_core::config::DisplayConfig;

/// Renders amounts like `R$ 1.234.567,89`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueFormatter {
    currency_symbol: String,
    decimal_separator: char,
    thousands_separator: char,
    decimal_places: u8,
}

impl Default for ValueFormatter {
    fn default() -> Self {
        Self::from_config(&DisplayConfig::default())
    }
}

impl ValueFormatter {
    pub fn new(
        currency_symbol: impl Into<String>,
        decimal_separator: char,
        thousands_separator: char,
        decimal_places: u8,
    ) -> Self {
        Self {
            currency_symbol: currency_symbol.into(),
            decimal_separator,
            thousands_separator,
            decimal_places,
        }
    }

    pub fn from_config(config: &DisplayConfig) -> Self {
        Self::new(
            config.effective_currency_symbol(),
            config.effective_decimal_separator(),
            config.effective_thousands_separator(),
            config.effective_decimal_places(),
        )
    }

    /// Format `value`. Non-finite values render as `"n/a"`.
    pub fn format(&self, value: f64) -> String {
        if !value.is_finite() {
            return "n/a".to_string();
        }

        let rounded = format!("{:.*}", self.decimal_places as usize, value.abs());
        let (int_part, frac_part) = match rounded.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (rounded.as_str(), None),
        };

        let mut out = String::with_capacity(rounded.len() + self.currency_symbol.len() + 8);
        // No minus sign for values that round to zero.
        if value < 0.0 && rounded.bytes().any(|b| (b'1'..=b'9').contains(&b)) {
            out.push('-');
        }
        if !self.currency_symbol.is_empty() {
            out.push_str(&self.currency_symbol);
            out.push(' ');
        }
        let len = int_part.len();
        for (i, digit) in int_part.chars().enumerate() {
            if i > 0 && (len - i) % 3 == 0 {
                out.push(self.thousands_separator);
            }
            out.push(digit);
        }
        if let Some(frac) = frac_part {
            out.push(self.decimal_separator);
            out.push_str(frac);
        }
        out
    }

    /// Format an optional value; missing values render as `"n/a"`.
    pub fn format_opt(&self, value: Option<f64>) -> String {
        value.map_or_else(|| "n/a".to_string(), |v| self.format(v))
    }
}
