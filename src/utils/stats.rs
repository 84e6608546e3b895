//! Statistical helpers.

/// Quantile function of the standard normal distribution.
///
/// Abramowitz & Stegun rational approximation (formula 26.2.23), accurate to
/// about 4.5e-4, which is plenty for prediction-interval widths.
pub fn quantile_normal(p: f64) -> f64 {
    if p <= 0.0 {
        return f64::NEG_INFINITY;
    }
    if p >= 1.0 {
        return f64::INFINITY;
    }

    let tail = p.min(1.0 - p);
    let t = (-2.0 * tail.ln()).sqrt();

    let numerator = 2.515517 + 0.802853 * t + 0.010328 * t * t;
    let denominator = 1.0 + 1.432788 * t + 0.189269 * t * t + 0.001308 * t * t * t;
    let z = t - numerator / denominator;

    if p < 0.5 {
        -z
    } else {
        z
    }
}
