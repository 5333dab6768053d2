//! Trend extrapolation over a population time series.

use crate::error::{PipelineError, Result};
use crate::table::TimeSeries;

/// A model fitted to `(year, population)` pairs that extrapolates to other years.
pub trait Predictor {
    /// Fit the model to a country's time series.
    fn fit(&mut self, series: &TimeSeries) -> Result<()>;

    /// Predicted population for `year`.
    fn predict(&self, year: f64) -> Result<f64>;

    /// Coefficient of determination on the series the model was fitted to.
    fn score(&self) -> Result<f64>;
}

/// Ordinary least squares line `population = intercept + slope * year`.
#[derive(Debug, Clone, Default)]
pub struct LinearRegression {
    fit: Option<Fit>,
}

#[derive(Debug, Clone, Copy)]
struct Fit {
    slope: f64,
    intercept: f64,
    r_squared: f64,
}

impl LinearRegression {
    pub fn new() -> Self { Self::default() }

    #[inline] pub fn is_fitted(&self) -> bool { self.fit.is_some() }

    /// Slope in people per year.
    pub fn slope(&self) -> Result<f64> { Ok(self.fitted()?.slope) }

    pub fn intercept(&self) -> Result<f64> { Ok(self.fitted()?.intercept) }

    fn fitted(&self) -> Result<&Fit> {
        self.fit.as_ref()
            .ok_or_else(|| PipelineError::Model("model not fitted, call fit() first".into()))
    }

    /// Fit directly to `(x, y)` pairs.
    pub fn fit_points(&mut self, points: &[(f64, f64)]) -> Result<()> {
        if points.len() < 2 {
            return Err(PipelineError::Model(format!("need at least 2 points to fit a line, got {}", points.len())));
        }
        if points.iter().any(|(x, y)| !x.is_finite() || !y.is_finite()) {
            return Err(PipelineError::Model("cannot fit non-finite points".into()));
        }

        // Centered sums keep year-scale inputs well conditioned.
        let n = points.len() as f64;
        let x_mean = points.iter().map(|&(x, _)| x).sum::<f64>() / n;
        let y_mean = points.iter().map(|&(_, y)| y).sum::<f64>() / n;

        let (sxx, sxy, syy) = points.iter().fold((0.0, 0.0, 0.0), |(sxx, sxy, syy), &(x, y)| {
            let (dx, dy) = (x - x_mean, y - y_mean);
            (sxx + dx * dx, sxy + dx * dy, syy + dy * dy)
        });
        if sxx == 0.0 {
            return Err(PipelineError::Model("all x values are equal, slope is undefined".into()));
        }

        let slope = sxy / sxx;
        let intercept = y_mean - slope * x_mean;
        // A constant target is fitted exactly by the flat line.
        let r_squared = if syy == 0.0 { 1.0 } else { (sxy * sxy) / (sxx * syy) };

        self.fit = Some(Fit { slope, intercept, r_squared });
        Ok(())
    }
}

impl Predictor for LinearRegression {
    fn fit(&mut self, series: &TimeSeries) -> Result<()> {
        let points = series.points.iter()
            .map(|&(year, pop)| (year as f64, pop as f64))
            .collect::<Vec<_>>();
        self.fit_points(&points)
    }

    fn predict(&self, year: f64) -> Result<f64> {
        let fit = self.fitted()?;
        Ok(fit.intercept + fit.slope * year)
    }

    fn score(&self) -> Result<f64> { Ok(self.fitted()?.r_squared) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(points: &[(u16, u64)]) -> TimeSeries {
        TimeSeries { country: "Testland".into(), points: points.to_vec() }
    }

    #[test]
    fn exact_line_is_recovered() {
        let mut model = LinearRegression::new();
        model.fit_points(&[(1.0, 3.0), (2.0, 5.0), (3.0, 7.0), (4.0, 9.0)]).unwrap();
        assert!((model.slope().unwrap() - 2.0).abs() < 1e-12);
        assert!((model.intercept().unwrap() - 1.0).abs() < 1e-12);
        assert!((model.predict(10.0).unwrap() - 21.0).abs() < 1e-9);
        assert!((model.score().unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn increasing_trend_extrapolates_past_last_value() {
        let series = series(&[
            (1970, 15_274_351), (1980, 19_678_444), (1990, 24_570_814), (2000, 28_793_672),
            (2010, 32_464_865), (2015, 34_663_603), (2020, 36_688_772), (2022, 37_457_971),
        ]);
        let mut model = LinearRegression::new();
        model.fit(&series).unwrap();

        let prediction = model.predict(2030.0).unwrap();
        assert!(prediction > 37_457_971.0, "prediction {prediction}");
        assert!(model.slope().unwrap() > 0.0);
        assert!(model.score().unwrap() > 0.95);
    }

    #[test]
    fn single_point_is_model_error() {
        let mut model = LinearRegression::new();
        assert!(matches!(model.fit(&series(&[(2022, 10)])), Err(PipelineError::Model(_))));
        assert!(!model.is_fitted());
    }

    #[test]
    fn equal_years_is_model_error() {
        let mut model = LinearRegression::new();
        assert!(matches!(model.fit(&series(&[(2022, 10), (2022, 12)])), Err(PipelineError::Model(_))));
    }

    #[test]
    fn predict_before_fit_is_model_error() {
        let model = LinearRegression::new();
        assert!(matches!(model.predict(2030.0), Err(PipelineError::Model(_))));
        assert!(matches!(model.score(), Err(PipelineError::Model(_))));
    }

    #[test]
    fn flat_series_predicts_constant() {
        let mut model = LinearRegression::new();
        model.fit(&series(&[(2000, 50), (2010, 50), (2020, 50)])).unwrap();
        assert!((model.predict(2030.0).unwrap() - 50.0).abs() < 1e-9);
        assert_eq!(model.score().unwrap(), 1.0);
    }
}
