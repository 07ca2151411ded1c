//! Linear baseline fit, residual split and policy-driven baseline reshape.

/// Divisor of the reshape slope, tied to the 101-sample contour.
const RESHAPE_SLOPE_DIVISOR: f64 = 51.0;

/// A contour decomposed into a fitted line plus residual.
#[derive(Debug, Clone, PartialEq)]
pub struct BaselineFit {
    /// Line value at `x = 0`
    pub intercept: f64,
    /// Change over the full normalized span `x = 0..=1`
    pub slope: f64,
    pub baseline: Vec<f64>,
    /// `contour - baseline`, sample by sample
    pub residual: Vec<f64>,
    /// Largest baseline value
    pub max_value: f64,
    /// First sample holding `max_value`; always an endpoint for a sloped line
    pub peak_index: usize,
}

impl BaselineFit {
    /// Least-squares degree-1 fit over `x = i / (n - 1)`.
    ///
    /// An empty contour gives an empty fit; a single sample fits a flat line.
    pub fn fit(contour: &[f64]) -> Self {
        let n = contour.len();
        if n == 0 {
            return Self {
                intercept: 0.0,
                slope: 0.0,
                baseline: Vec::new(),
                residual: Vec::new(),
                max_value: 0.0,
                peak_index: 0,
            };
        }

        let xs: Vec<f64> = (0..n)
            .map(|i| if n > 1 { i as f64 / (n - 1) as f64 } else { 0.0 })
            .collect();
        let mean_x = xs.iter().sum::<f64>() / n as f64;
        let mean_y = contour.iter().sum::<f64>() / n as f64;

        let (sxy, sxx) = xs
            .iter()
            .zip(contour)
            .fold((0.0, 0.0), |(sxy, sxx), (&x, &y)| {
                let dx = x - mean_x;
                (sxy + dx * (y - mean_y), sxx + dx * dx)
            });
        let slope = if sxx > 0.0 { sxy / sxx } else { 0.0 };
        let intercept = mean_y - slope * mean_x;

        let baseline: Vec<f64> = xs.iter().map(|&x| intercept + slope * x).collect();
        let residual: Vec<f64> = contour.iter().zip(&baseline).map(|(c, b)| c - b).collect();

        let (peak_index, max_value) = baseline
            .iter()
            .copied()
            .enumerate()
            .fold((0, f64::NEG_INFINITY), |best, (i, v)| if v > best.1 { (i, v) } else { best });

        Self {
            intercept,
            slope,
            baseline,
            residual,
            max_value,
            peak_index,
        }
    }

    /// Mean of the fitted baseline.
    pub fn mean(&self) -> f64 {
        if self.baseline.is_empty() {
            return 0.0;
        }
        self.baseline.iter().sum::<f64>() / self.baseline.len() as f64
    }
}

/// Generate a new baseline from the fitted one and a pitch half-range.
///
/// The ramp starts at `max * (1 + h)` and falls with slope
/// `(mean - max - max * h) / 51` per sample, replacing the fitted slope.
pub fn reshape_baseline(fit: &BaselineFit, pitch_half_range: f64) -> Vec<f64> {
    let max = fit.max_value;
    let top = max + max * pitch_half_range;
    let step = (fit.mean() - top) / RESHAPE_SLOPE_DIVISOR;

    log::trace!(
        "Reshape: peak {:.1} Hz at sample {}, half-range {:.3}",
        max,
        fit.peak_index,
        pitch_half_range
    );

    (0..fit.baseline.len()).map(|x| step * x as f64 + top).collect()
}

/// Add a residual back onto a baseline.
pub fn recombine(residual: &[f64], baseline: &[f64]) -> Vec<f64> {
    residual.iter().zip(baseline).map(|(r, b)| r + b).collect()
}
