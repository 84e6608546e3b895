//! Differencing and integration for seasonal ARIMA models.

/// Apply `d` rounds of first differencing.
pub fn difference(series: &[f64], d: usize) -> Vec<f64> {
    let mut result = series.to_vec();
    for _ in 0..d {
        if result.len() <= 1 {
            return vec![];
        }
        result = result.windows(2).map(|w| w[1] - w[0]).collect();
    }
    result
}

/// Apply `d` rounds of seasonal differencing at lag `period`.
///
/// Returns an empty vector when a round has fewer points than the period;
/// callers treat that as a series with no estimable observations rather
/// than silently passing values through undifferenced.
pub fn seasonal_difference(series: &[f64], d: usize, period: usize) -> Vec<f64> {
    if period == 0 {
        return series.to_vec();
    }
    let mut result = series.to_vec();
    for _ in 0..d {
        if result.len() <= period {
            return vec![];
        }
        result = result
            .iter()
            .skip(period)
            .zip(result.iter())
            .map(|(curr, prev)| curr - prev)
            .collect();
    }
    result
}

/// Reverse `d` rounds of first differencing for forecast values.
///
/// `original` is the undifferenced history; its tail supplies the starting
/// levels at each integration stage.
pub fn integrate(forecast: &[f64], original: &[f64], d: usize) -> Vec<f64> {
    if d == 0 || forecast.is_empty() {
        return forecast.to_vec();
    }

    let mut result = forecast.to_vec();
    for level in (0..d).rev() {
        let base = difference(original, level);
        let mut cumsum = base.last().copied().unwrap_or(0.0);
        for value in &mut result {
            cumsum += *value;
            *value = cumsum;
        }
    }
    result
}

/// Reverse `d` rounds of seasonal differencing at lag `period` for forecast
/// values.
///
/// `history` is the series before seasonal differencing. Lags that reach
/// before the start of the history are taken as zero, matching the
/// conditional-sum-of-squares convention used at fit time.
pub fn seasonal_integrate(forecast: &[f64], history: &[f64], d: usize, period: usize) -> Vec<f64> {
    if d == 0 || period == 0 || forecast.is_empty() {
        return forecast.to_vec();
    }

    let mut result = forecast.to_vec();
    for level in (0..d).rev() {
        let mut extended = seasonal_difference(history, level, period);
        let mut out = Vec::with_capacity(result.len());
        for &diff in &result {
            let lag = extended
                .len()
                .checked_sub(period)
                .map(|i| extended[i])
                .unwrap_or(0.0);
            let value = diff + lag;
            extended.push(value);
            out.push(value);
        }
        result = out;
    }
    result
}
