//! Formatting adapter.

/// An external formatter for money amounts.
///
/// Receives the plain decimal amount (`"1234.50"`) and the currency code
/// (`"EUR"`) and returns the final text. Closures work as formatters:
///
/// ```
/// use std::sync::Arc;
/// use tally_core::{Currency, Money};
///
/// let eur = Arc::new(Currency::new("EUR", 978, "Euro", 2));
/// let money = Money::of("1234.5", &eur).unwrap();
/// let text = money.format_with(&|amount: &str, code: &str| format!("{amount} {code}"));
/// assert_eq!(text, "1234.50 EUR");
/// ```
pub trait MoneyFormatter {
    /// Formats `amount` in the currency `currency_code`.
    fn format(&self, amount: &str, currency_code: &str) -> String;
}

impl<F> MoneyFormatter for F
where
    F: Fn(&str, &str) -> String,
{
    fn format(&self, amount: &str, currency_code: &str) -> String {
        self(amount, currency_code)
    }
}
