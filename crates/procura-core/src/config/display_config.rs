//! Display configuration for human-readable monetary values.

use serde::{Deserialize, Serialize};

/// How outlier inspection views render amounts.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DisplayConfig {
    /// Currency symbol placed before the amount. Default: "R$".
    pub currency_symbol: Option<String>,
    /// Decimal separator. Default: ','.
    pub decimal_separator: Option<char>,
    /// Thousands separator. Default: '.'.
    pub thousands_separator: Option<char>,
    /// Fractional digits. Default: 2.
    pub decimal_places: Option<u8>,
}

impl DisplayConfig {
    /// Returns the effective currency symbol, defaulting to "R$".
    pub fn effective_currency_symbol(&self) -> &str {
        self.currency_symbol.as_deref().unwrap_or("R$")
    }

    /// Returns the effective decimal separator, defaulting to ','.
    pub fn effective_decimal_separator(&self) -> char {
        self.decimal_separator.unwrap_or(',')
    }

    /// Returns the effective thousands separator, defaulting to '.'.
    pub fn effective_thousands_separator(&self) -> char {
        self.thousands_separator.unwrap_or('.')
    }

    /// Returns the effective number of decimal places, defaulting to 2.
    pub fn effective_decimal_places(&self) -> u8 {
        self.decimal_places.unwrap_or(2)
    }
}
