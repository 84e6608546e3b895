//! Rule-based advisory messages over the computed statistics.

/// Inputs the advisory rules evaluate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdvisorInput {
    /// Idle sample share, in percent.
    pub idle_ratio_pct: f64,
    /// Total cost of the analyzed span, in the configured currency.
    pub total_cost: f64,
    /// Per-kWh rate.
    pub rate: f64,
    /// Total energy over the analyzed span, in kWh.
    pub total_energy_kwh: f64,
    /// Number of calendar months spanned.
    pub month_count: usize,
    /// Mean power across present hours, in kW.
    pub mean_power_kw: f64,
}

/// Idle share above which standby consumption is called out, in percent.
const IDLE_RATIO_LIMIT_PCT: f64 = 20.0;

/// Cost rule threshold: total cost beyond `rate * 100` (i.e. more than
/// 100 kWh worth of energy) suggests efficiency work.
const COST_ENERGY_EQUIVALENT_KWH: f64 = 100.0;

/// Excess-consumption multiplier over mean power.
const EXCESS_FACTOR: f64 = 1.2;

/// Evaluate the three advisory rules in declaration order.
///
/// Rules are independent and non-exclusive: zero to three messages come
/// back, always in rule order.
pub fn advise(input: &AdvisorInput) -> Vec<String> {
    let mut messages = Vec::new();

    if input.idle_ratio_pct > IDLE_RATIO_LIMIT_PCT {
        messages.push(format!(
            "Idle consumption accounts for {:.1}% of samples; reduce standby loads to cut baseline usage.",
            input.idle_ratio_pct
        ));
    }

    if input.total_cost > input.rate * COST_ENERGY_EQUIVALENT_KWH {
        messages.push(format!(
            "Total cost {:.2} exceeds the equivalent of {:.0} kWh at the current rate; consider efficiency improvements.",
            input.total_cost, COST_ENERGY_EQUIVALENT_KWH
        ));
    }

    // Known unit mismatch: compares energy per month (kWh) against mean
    // power (kW). Kept as the advisory heuristic rather than corrected.
    if input.month_count > 0 {
        let monthly_energy = input.total_energy_kwh / input.month_count as f64;
        if monthly_energy > input.mean_power_kw * EXCESS_FACTOR {
            messages.push(format!(
                "Average monthly energy ({monthly_energy:.1} kWh) runs well above the mean power level; investigate excess consumption."
            ));
        }
    }

    messages
}
