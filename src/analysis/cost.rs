//! Energy-to-cost conversion.

use std::fmt;

/// Billing currency for cost figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Currency {
    /// United States dollar.
    #[default]
    Usd,
    /// Algerian dinar.
    Dzd,
}

impl Currency {
    /// Default per-kWh rate for this currency.
    pub fn default_rate(self) -> f64 {
        match self {
            Currency::Usd => 0.15,
            Currency::Dzd => 4.81,
        }
    }

    /// ISO 4217 code.
    pub fn code(self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Dzd => "DZD",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Cost of a quantity of energy: `energy_kwh * rate`.
pub fn cost(energy_kwh: f64, rate: f64) -> f64 {
    energy_kwh * rate
}

/// A derived cost figure; always recomputed, never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostFigure {
    /// Energy being priced, in kWh.
    pub energy_kwh: f64,
    /// Per-kWh rate in the figure's currency.
    pub rate: f64,
    /// Currency of the rate.
    pub currency: Currency,
}

impl CostFigure {
    /// Price `energy_kwh` at `rate`.
    pub fn new(energy_kwh: f64, rate: f64, currency: Currency) -> Self {
        Self {
            energy_kwh,
            rate,
            currency,
        }
    }

    /// Monetary amount.
    pub fn amount(&self) -> f64 {
        cost(self.energy_kwh, self.rate)
    }
}

impl fmt::Display for CostFigure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} {}", self.amount(), self.currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn cost_is_the_plain_product() {
        assert_relative_eq!(cost(100.0, 0.15), 15.0);
        assert_relative_eq!(cost(0.0, 4.81), 0.0);
    }

    #[test]
    fn default_rates_per_currency() {
        assert_relative_eq!(Currency::Usd.default_rate(), 0.15);
        assert_relative_eq!(Currency::Dzd.default_rate(), 4.81);
    }

    #[test]
    fn figure_formats_amount_and_code() {
        let figure = CostFigure::new(100.0, 0.15, Currency::Usd);
        assert_relative_eq!(figure.amount(), 15.0);
        assert_eq!(figure.to_string(), "15.00 USD");

        let figure = CostFigure::new(10.0, 4.81, Currency::Dzd);
        assert_eq!(figure.to_string(), "48.10 DZD");
    }
}
