//! Statistical transforms backing the smoothed-trend geometry.

use trueno::Vector;

/// Pair up x/y series, dropping records where either value is non-finite,
/// and sort by x.
#[must_use]
pub fn finite_pairs_by_x(x: &[f32], y: &[f32]) -> Vec<(f32, f32)> {
    let n = x.len().min(y.len());
    let mut pairs: Vec<(f32, f32)> = (0..n)
        .filter(|&i| x[i].is_finite() && y[i].is_finite())
        .map(|i| (x[i], y[i]))
        .collect();
    pairs.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
    pairs
}

/// Ordinary least-squares fit over paired samples.
///
/// Returns `(slope, intercept)`, or `None` when fewer than two finite
/// pairs exist or all x values coincide. Means go through trueno's SIMD
/// reductions.
#[must_use]
pub fn linear_fit(x: &[f32], y: &[f32]) -> Option<(f32, f32)> {
    let pairs = finite_pairs_by_x(x, y);
    if pairs.len() < 2 {
        return None;
    }

    let xs: Vec<f32> = pairs.iter().map(|p| p.0).collect();
    let ys: Vec<f32> = pairs.iter().map(|p| p.1).collect();

    let mean_x = Vector::from_vec(xs.clone()).mean().unwrap_or(0.0);
    let mean_y = Vector::from_vec(ys.clone()).mean().unwrap_or(0.0);

    let mut sxx = 0.0f32;
    let mut sxy = 0.0f32;
    for (xi, yi) in &pairs {
        let dx = xi - mean_x;
        sxx += dx * dx;
        sxy += dx * (yi - mean_y);
    }

    if sxx.abs() < f32::EPSILON {
        return None;
    }

    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;
    Some((slope, intercept))
}

/// Centered rolling mean over samples sorted by x.
///
/// Each output point keeps its x position; its y is the mean of the
/// surrounding `window` samples (clipped at the series edges). A window
/// of zero or one returns the sorted input unchanged.
#[must_use]
pub fn rolling_mean(x: &[f32], y: &[f32], window: usize) -> Vec<(f32, f32)> {
    let pairs = finite_pairs_by_x(x, y);
    if window <= 1 || pairs.len() < 2 {
        return pairs;
    }

    let half = window / 2;
    let n = pairs.len();
    (0..n)
        .map(|i| {
            let lo = i.saturating_sub(half);
            let hi = (i + half + 1).min(n);
            let sum: f32 = pairs[lo..hi].iter().map(|p| p.1).sum();
            (pairs[i].0, sum / (hi - lo) as f32)
        })
        .collect()
}
