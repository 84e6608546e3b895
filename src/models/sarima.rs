//! Seasonal ARIMA model fitted by conditional sum of squares.

use crate::error::{AnalysisError, Result};
use crate::models::diff::{difference, integrate, seasonal_difference, seasonal_integrate};
use crate::models::Forecaster;
use crate::utils::optimization::{simplex_minimize, SimplexConfig};
use crate::utils::stats::quantile_normal;
use tracing::debug;

/// SARIMA order specification (p, d, q)(P, D, Q)[s].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SarimaSpec {
    /// Non-seasonal AR order.
    pub p: usize,
    /// Non-seasonal differencing order.
    pub d: usize,
    /// Non-seasonal MA order.
    pub q: usize,
    /// Seasonal AR order.
    pub cap_p: usize,
    /// Seasonal differencing order.
    pub cap_d: usize,
    /// Seasonal MA order.
    pub cap_q: usize,
    /// Seasonal period.
    pub s: usize,
}

impl SarimaSpec {
    /// Create a new specification.
    pub fn new(p: usize, d: usize, q: usize, cap_p: usize, cap_d: usize, cap_q: usize, s: usize) -> Self {
        Self {
            p,
            d,
            q,
            cap_p,
            cap_d,
            cap_q,
            s,
        }
    }

    /// SARIMA(1,1,1)(1,1,0)[12], the monthly-consumption specification.
    pub fn monthly() -> Self {
        Self::new(1, 1, 1, 1, 1, 0, 12)
    }

    /// Total number of estimated parameters (intercept included).
    pub fn num_params(&self) -> usize {
        1 + self.p + self.q + self.cap_p + self.cap_q
    }
}

/// Seasonal autoregressive-integrated-moving-average model.
///
/// Differencing removes trend (`d`) and the repeating seasonal pattern
/// (`D` at lag `s`); the remaining series is modelled with multiplicative
/// AR/MA polynomials and estimated by minimizing the conditional sum of
/// squares, with pre-sample lags conditioned on zero. The zero-conditioning
/// lets short histories (down to one seasonal cycle) fit by degenerating
/// smoothly into a drift-plus-seasonal-difference continuation.
#[derive(Debug, Clone)]
pub struct Sarima {
    spec: SarimaSpec,
    intercept: f64,
    ar: Vec<f64>,
    ma: Vec<f64>,
    sar: Vec<f64>,
    sma: Vec<f64>,
    /// Original series.
    original: Option<Vec<f64>>,
    /// After non-seasonal differencing.
    diffed: Option<Vec<f64>>,
    /// After both differencing passes; the series the recursion runs on.
    working: Option<Vec<f64>>,
    residuals: Option<Vec<f64>>,
    residual_variance: Option<f64>,
    aic: Option<f64>,
}

impl Sarima {
    /// Create an unfitted model with the given specification.
    pub fn new(spec: SarimaSpec) -> Self {
        Self {
            spec,
            intercept: 0.0,
            ar: vec![],
            ma: vec![],
            sar: vec![],
            sma: vec![],
            original: None,
            diffed: None,
            working: None,
            residuals: None,
            residual_variance: None,
            aic: None,
        }
    }

    /// SARIMA(1,1,1)(1,1,0)[12] for monthly data.
    pub fn monthly() -> Self {
        Self::new(SarimaSpec::monthly())
    }

    /// Model specification.
    pub fn spec(&self) -> SarimaSpec {
        self.spec
    }

    /// Non-seasonal AR coefficients.
    pub fn ar_coefficients(&self) -> &[f64] {
        &self.ar
    }

    /// Non-seasonal MA coefficients.
    pub fn ma_coefficients(&self) -> &[f64] {
        &self.ma
    }

    /// Seasonal AR coefficients.
    pub fn seasonal_ar_coefficients(&self) -> &[f64] {
        &self.sar
    }

    /// Intercept of the differenced series.
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Akaike information criterion, when estimable.
    pub fn aic(&self) -> Option<f64> {
        self.aic
    }

    /// Residuals on the differenced scale.
    pub fn residuals(&self) -> Option<&[f64]> {
        self.residuals.as_deref()
    }

    /// One-step prediction of the working series at time `t`.
    ///
    /// Lags reaching before the start of the series contribute zero, both
    /// for values (as deviations from the intercept) and residuals.
    #[allow(clippy::too_many_arguments)]
    fn one_step(
        spec: &SarimaSpec,
        intercept: f64,
        ar: &[f64],
        ma: &[f64],
        sar: &[f64],
        sma: &[f64],
        working: &[f64],
        residuals: &[f64],
        t: i64,
    ) -> f64 {
        let dev = |idx: i64| -> f64 {
            if idx >= 0 && (idx as usize) < working.len() {
                working[idx as usize] - intercept
            } else {
                0.0
            }
        };
        let res = |idx: i64| -> f64 {
            if idx >= 0 && (idx as usize) < residuals.len() {
                residuals[idx as usize]
            } else {
                0.0
            }
        };
        let s = spec.s as i64;

        let mut pred = intercept;

        // Multiplicative AR polynomial: lags i+1, (j+1)s, and the cross term.
        for (i, &phi) in ar.iter().enumerate() {
            pred += phi * dev(t - 1 - i as i64);
        }
        for (j, &sphi) in sar.iter().enumerate() {
            pred += sphi * dev(t - (j as i64 + 1) * s);
        }
        for (i, &phi) in ar.iter().enumerate() {
            for (j, &sphi) in sar.iter().enumerate() {
                pred -= phi * sphi * dev(t - 1 - i as i64 - (j as i64 + 1) * s);
            }
        }

        // Multiplicative MA polynomial over past residuals.
        for (i, &theta) in ma.iter().enumerate() {
            pred += theta * res(t - 1 - i as i64);
        }
        for (j, &stheta) in sma.iter().enumerate() {
            pred += stheta * res(t - (j as i64 + 1) * s);
        }
        for (i, &theta) in ma.iter().enumerate() {
            for (j, &stheta) in sma.iter().enumerate() {
                pred += theta * stheta * res(t - 1 - i as i64 - (j as i64 + 1) * s);
            }
        }

        pred
    }

    /// Residual recursion over the whole working series; returns the
    /// residuals and their sum of squares.
    fn css(
        spec: &SarimaSpec,
        working: &[f64],
        intercept: f64,
        ar: &[f64],
        ma: &[f64],
        sar: &[f64],
        sma: &[f64],
    ) -> (Vec<f64>, f64) {
        let n = working.len();
        let mut residuals = vec![0.0; n];
        let mut css = 0.0;

        for t in 0..n {
            let pred = Self::one_step(
                spec,
                intercept,
                ar,
                ma,
                sar,
                sma,
                working,
                &residuals[..t],
                t as i64,
            );
            let error = working[t] - pred;
            residuals[t] = error;
            css += error * error;
        }

        (residuals, css)
    }

    fn split_params<'a>(&self, params: &'a [f64]) -> (f64, &'a [f64], &'a [f64], &'a [f64], &'a [f64]) {
        let spec = &self.spec;
        let mut offset = 1;
        let ar = &params[offset..offset + spec.p];
        offset += spec.p;
        let ma = &params[offset..offset + spec.q];
        offset += spec.q;
        let sar = &params[offset..offset + spec.cap_p];
        offset += spec.cap_p;
        let sma = &params[offset..offset + spec.cap_q];
        (params[0], ar, ma, sar, sma)
    }

    fn estimate(&mut self, working: &[f64]) -> Result<()> {
        let spec = self.spec;
        let mean = working.iter().sum::<f64>() / working.len() as f64;
        let n_coeff = spec.num_params() - 1;

        if n_coeff == 0 {
            self.intercept = mean;
            return Ok(());
        }

        let mut initial = vec![0.0; spec.num_params()];
        initial[0] = mean;
        for (i, slot) in initial[1..].iter_mut().enumerate() {
            *slot = 0.1 / (i + 1) as f64;
        }

        // Intercept unbounded; coefficients kept inside the unit interval
        // for stationarity and invertibility.
        let mut bounds = vec![(f64::NEG_INFINITY, f64::INFINITY)];
        bounds.extend(std::iter::repeat((-0.99, 0.99)).take(n_coeff));

        let result = simplex_minimize(
            |params| {
                let (intercept, ar, ma, sar, sma) = self.split_params(params);
                Self::css(&spec, working, intercept, ar, ma, sar, sma).1
            },
            &initial,
            Some(&bounds),
            &SimplexConfig::default(),
        );

        if !result.converged || !result.value.is_finite() {
            return Err(AnalysisError::ForecastFit(format!(
                "parameter estimation did not converge after {} iterations",
                result.iterations
            )));
        }

        let (intercept, ar, ma, sar, sma) = self.split_params(&result.point);
        self.intercept = intercept;
        self.ar = ar.to_vec();
        self.ma = ma.to_vec();
        self.sar = sar.to_vec();
        self.sma = sma.to_vec();
        Ok(())
    }

    fn finalize_fit(&mut self, working: &[f64]) {
        if working.is_empty() {
            self.residuals = Some(vec![]);
            return;
        }

        let (residuals, css) = Self::css(
            &self.spec,
            working,
            self.intercept,
            &self.ar,
            &self.ma,
            &self.sar,
            &self.sma,
        );

        let n = residuals.len() as f64;
        let variance = css / n;
        self.residual_variance = Some(variance);
        if variance > 0.0 {
            let k = self.spec.num_params() as f64;
            let ll = -0.5 * n * (1.0 + variance.ln() + (2.0 * std::f64::consts::PI).ln());
            self.aic = Some(-2.0 * ll + 2.0 * k);
        }
        self.residuals = Some(residuals);
    }

    /// Point predictions with normal-approximation prediction intervals at
    /// the given confidence `level` (e.g. 0.95).
    pub fn predict_with_intervals(
        &self,
        horizon: usize,
        level: f64,
    ) -> Result<(Vec<f64>, Vec<f64>, Vec<f64>)> {
        if !(0.0..1.0).contains(&level) {
            return Err(AnalysisError::InvalidParameter(format!(
                "confidence level must be in (0, 1), got {level}"
            )));
        }

        let point = self.predict(horizon)?;
        let variance = self.residual_variance.unwrap_or(0.0);
        let z = quantile_normal((1.0 + level) / 2.0);

        let mut lower = Vec::with_capacity(horizon);
        let mut upper = Vec::with_capacity(horizon);
        for (h, &value) in point.iter().enumerate() {
            // Forecast variance grows with the horizon.
            let se = (variance * (h + 1) as f64).sqrt();
            lower.push(value - z * se);
            upper.push(value + z * se);
        }

        Ok((point, lower, upper))
    }
}

impl Default for Sarima {
    fn default() -> Self {
        Self::monthly()
    }
}

impl Forecaster for Sarima {
    fn fit(&mut self, values: &[f64]) -> Result<()> {
        if values.len() <= self.spec.d + 1 {
            return Err(AnalysisError::ForecastFit(format!(
                "series of length {} is too short to difference {} times",
                values.len(),
                self.spec.d
            )));
        }

        let diffed = difference(values, self.spec.d);
        let working = seasonal_difference(&diffed, self.spec.cap_d, self.spec.s);

        self.ar = vec![0.0; self.spec.p];
        self.ma = vec![0.0; self.spec.q];
        self.sar = vec![0.0; self.spec.cap_p];
        self.sma = vec![0.0; self.spec.cap_q];
        self.intercept = 0.0;
        self.residual_variance = None;
        self.aic = None;

        if working.len() > self.spec.num_params() {
            self.estimate(&working)?;
        } else if !working.is_empty() {
            // Too few doubly-differenced points to estimate coefficients;
            // keep them at zero and carry the mean as drift.
            self.intercept = working.iter().sum::<f64>() / working.len() as f64;
            debug!(
                points = working.len(),
                "history too short for coefficient estimation, using drift-only fit"
            );
        } else {
            debug!("doubly differenced series is empty, forecast continues the seasonal pattern");
        }

        self.finalize_fit(&working);
        self.original = Some(values.to_vec());
        self.diffed = Some(diffed);
        self.working = Some(working);
        Ok(())
    }

    fn predict(&self, horizon: usize) -> Result<Vec<f64>> {
        let original = self.original.as_ref().ok_or_else(|| {
            AnalysisError::InvalidParameter("model must be fitted before prediction".to_string())
        })?;
        let diffed = self.diffed.as_ref().ok_or_else(|| {
            AnalysisError::InvalidParameter("model must be fitted before prediction".to_string())
        })?;
        let working = self.working.as_ref().ok_or_else(|| {
            AnalysisError::InvalidParameter("model must be fitted before prediction".to_string())
        })?;

        if horizon == 0 {
            return Ok(vec![]);
        }

        let mut extended = working.clone();
        let mut residuals = self.residuals.clone().unwrap_or_default();

        for _ in 0..horizon {
            let t = extended.len() as i64;
            let pred = Self::one_step(
                &self.spec,
                self.intercept,
                &self.ar,
                &self.ma,
                &self.sar,
                &self.sma,
                &extended,
                &residuals,
                t,
            );
            extended.push(pred);
            // Future shocks are unknown and taken as zero.
            residuals.push(0.0);
        }

        let forecast_working = &extended[working.len()..];
        let forecast_diffed =
            seasonal_integrate(forecast_working, diffed, self.spec.cap_d, self.spec.s);
        Ok(integrate(&forecast_diffed, original, self.spec.d))
    }

    fn name(&self) -> &str {
        "SARIMA"
    }

    fn is_fitted(&self) -> bool {
        self.original.is_some()
    }
}
